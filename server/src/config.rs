use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use error_stack::{Report, ResultExt};

use kernel::KernelError;

const REPOSITORY: &str = "LIBRARY_REPOSITORY";
const DATABASE_URL: &str = "DATABASE_URL";
const DATA_PATH: &str = "LIBRARY_DATA_PATH";
const TESTING: &str = "LIBRARY_TESTING";
const BIND: &str = "LIBRARY_BIND";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryKind {
    Memory,
    Database,
}

impl FromStr for RepositoryKind {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "database" => Ok(Self::Database),
            other => Err(Report::new(KernelError::Internal).attach_printable(format!(
                "{REPOSITORY} must be `memory` or `database`, got `{other}`"
            ))),
        }
    }
}

/// Process settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub repository: RepositoryKind,
    pub database_url: String,
    pub data_path: PathBuf,
    /// Forces the database to be cleared and reseeded.
    pub testing: bool,
    pub bind: SocketAddr,
}

impl Config {
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("loaded {}", path.display()),
            Err(_) => tracing::debug!("no .env file, using the process environment"),
        }
        Self::from_lookup(|key| driver::env(key).ok())
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> error_stack::Result<Self, KernelError> {
        let repository = lookup(REPOSITORY)
            .map(|kind| kind.parse::<RepositoryKind>())
            .transpose()?
            .unwrap_or(RepositoryKind::Memory);
        let database_url =
            lookup(DATABASE_URL).unwrap_or_else(|| "sqlite://library.db".to_string());
        let data_path = lookup(DATA_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data"));
        let testing = lookup(TESTING).is_some_and(|flag| flag.trim().eq_ignore_ascii_case("true"));
        let bind = lookup(BIND).unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let bind = bind
            .parse::<SocketAddr>()
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("{BIND} is not a socket address: {bind}"))?;
        Ok(Self {
            repository,
            database_url,
            data_path,
            testing,
            bind,
        })
    }
}
