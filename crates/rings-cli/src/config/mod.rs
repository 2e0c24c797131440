mod credentials;

pub use credentials::{CredentialStore, GatewaySettings};

use crate::error::{Result, RingsError};
use std::path::PathBuf;

/// Default data directory name
const DATA_DIR_NAME: &str = "rings";

/// Get the data directory path for storing credentials
/// Returns ~/.local/share/rings on Unix, ~/Library/Application Support/rings on macOS
pub fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|p| p.join(DATA_DIR_NAME))
        .ok_or_else(|| RingsError::config("Could not determine data directory"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &PathBuf) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
