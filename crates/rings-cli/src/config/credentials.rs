use crate::client::AccessToken;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const TOKEN_FILENAME: &str = "token.json";
const GATEWAY_FILENAME: &str = "gateway.json";

/// Gateway connection settings saved at pairing time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GatewaySettings {
    /// Base URL of the health gateway, e.g. http://gateway.local:8080
    pub url: String,
}

/// Manages per-profile credential storage for the health gateway.
/// Tokens are plain JSON files with restrictive permissions.
pub struct CredentialStore {
    profile: String,
    base_dir: PathBuf,
}

impl CredentialStore {
    /// Create a new credential store for the given profile
    pub fn new(profile: Option<String>) -> Result<Self> {
        let profile = profile.unwrap_or_else(|| "default".to_string());
        let base_dir = super::data_dir()?.join(&profile);
        super::ensure_dir(&base_dir)?;

        Ok(Self { profile, base_dir })
    }

    /// Create a credential store with a custom base directory (for testing)
    pub fn with_dir(profile: impl Into<String>, base_dir: PathBuf) -> Result<Self> {
        let profile = profile.into();
        let dir = base_dir.join(&profile);
        super::ensure_dir(&dir)?;

        Ok(Self {
            profile,
            base_dir: dir,
        })
    }

    /// Get the profile name
    pub fn profile(&self) -> &str {
        &self.profile
    }

    fn write_json(&self, filename: &str, json: String) -> Result<()> {
        let path = self.base_dir.join(filename);
        fs::write(&path, json)?;

        // Set restrictive permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Save the access token to storage
    pub fn save_token(&self, token: &AccessToken) -> Result<()> {
        self.write_json(TOKEN_FILENAME, serde_json::to_string_pretty(token)?)
    }

    /// Load the access token from storage
    pub fn load_token(&self) -> Result<Option<AccessToken>> {
        let path = self.base_dir.join(TOKEN_FILENAME);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        let token: AccessToken = serde_json::from_str(&json)?;
        Ok(Some(token))
    }

    /// Save gateway settings to storage
    pub fn save_gateway(&self, settings: &GatewaySettings) -> Result<()> {
        self.write_json(GATEWAY_FILENAME, serde_json::to_string_pretty(settings)?)
    }

    /// Load gateway settings from storage
    pub fn load_gateway(&self) -> Result<Option<GatewaySettings>> {
        let path = self.base_dir.join(GATEWAY_FILENAME);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        let settings: GatewaySettings = serde_json::from_str(&json)?;
        Ok(Some(settings))
    }

    /// Load both settings and token, returns None if either is missing
    pub fn load_credentials(&self) -> Result<Option<(GatewaySettings, AccessToken)>> {
        let settings = self.load_gateway()?;
        let token = self.load_token()?;

        match (settings, token) {
            (Some(s), Some(t)) => Ok(Some((s, t))),
            _ => Ok(None),
        }
    }

    /// Check if credentials exist
    pub fn has_credentials(&self) -> bool {
        self.base_dir.join(TOKEN_FILENAME).exists()
            && self.base_dir.join(GATEWAY_FILENAME).exists()
    }

    /// Clear all stored credentials
    pub fn clear(&self) -> Result<()> {
        for filename in [TOKEN_FILENAME, GATEWAY_FILENAME] {
            let path = self.base_dir.join(filename);
            if path.exists() {
                fs::remove_file(path)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_settings() -> GatewaySettings {
        GatewaySettings {
            url: "http://gateway.local:8080".to_string(),
        }
    }

    #[test]
    fn test_credential_store_creation() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialStore::with_dir("test_profile", temp_dir.path().to_path_buf());
        assert!(store.is_ok());
        assert_eq!(store.unwrap().profile(), "test_profile");
    }

    #[test]
    fn test_save_and_load_token() {
        let temp_dir = TempDir::new().unwrap();
        let store =
            CredentialStore::with_dir("test_profile", temp_dir.path().to_path_buf()).unwrap();

        let token = AccessToken::new("test_access");
        store.save_token(&token).unwrap();

        let loaded = store.load_token().unwrap();
        assert_eq!(loaded, Some(token));
    }

    #[test]
    fn test_load_missing_token() {
        let temp_dir = TempDir::new().unwrap();
        let store =
            CredentialStore::with_dir("test_profile", temp_dir.path().to_path_buf()).unwrap();

        let loaded = store.load_token().unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_and_load_gateway() {
        let temp_dir = TempDir::new().unwrap();
        let store =
            CredentialStore::with_dir("test_profile", temp_dir.path().to_path_buf()).unwrap();

        let settings = test_settings();
        store.save_gateway(&settings).unwrap();

        let loaded = store.load_gateway().unwrap();
        assert_eq!(loaded, Some(settings));
    }

    #[test]
    fn test_partial_credentials_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let store =
            CredentialStore::with_dir("test_profile", temp_dir.path().to_path_buf()).unwrap();

        // Only save the token
        store.save_token(&AccessToken::new("test_access")).unwrap();

        // load_credentials should return None because settings are missing
        let loaded = store.load_credentials().unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_has_and_clear_credentials() {
        let temp_dir = TempDir::new().unwrap();
        let store =
            CredentialStore::with_dir("test_profile", temp_dir.path().to_path_buf()).unwrap();

        assert!(!store.has_credentials());

        store.save_token(&AccessToken::new("test_access")).unwrap();
        store.save_gateway(&test_settings()).unwrap();
        assert!(store.has_credentials());

        store.clear().unwrap();
        assert!(!store.has_credentials());
    }

    #[test]
    fn test_profiles_are_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let store_a =
            CredentialStore::with_dir("profile_a", temp_dir.path().to_path_buf()).unwrap();
        let store_b =
            CredentialStore::with_dir("profile_b", temp_dir.path().to_path_buf()).unwrap();

        store_a.save_token(&AccessToken::new("token_a")).unwrap();

        assert!(store_a.load_token().unwrap().is_some());
        assert!(store_b.load_token().unwrap().is_none());
    }
}
