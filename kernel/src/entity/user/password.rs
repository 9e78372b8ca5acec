use sha2::{Digest, Sha256};
use uuid::Uuid;
use vodca::{AsRefln, Fromln};

const SCHEME: &str = "sha256";

/// Salted digest in the form `sha256$<salt>$<hex digest>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct UserPassword(String);

impl UserPassword {
    /// Returns `None` for a blank password.
    pub fn hash(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let salt = Uuid::new_v4().simple().to_string();
        Some(Self(format!("{SCHEME}${salt}${}", digest(&salt, raw))))
    }

    /// Wraps a digest that was produced by [`UserPassword::hash`] earlier.
    pub fn from_digest(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn verify(&self, raw: &str) -> bool {
        let mut parts = self.0.splitn(3, '$');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(SCHEME), Some(salt), Some(expected)) => digest(salt, raw) == expected,
            _ => false,
        }
    }
}

fn digest(salt: &str, raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}
