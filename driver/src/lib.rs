use error_stack::ResultExt;
use kernel::KernelError;

use crate::error::ConvertError;

pub mod database;
mod error;
pub mod importer;

/// Reads `key` from the environment, loading `.env` on first use.
pub fn env(key: &str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key)
        .convert_error()
        .attach_printable_lazy(|| format!("Env {} not specified", key))
}
