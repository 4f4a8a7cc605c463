use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;

const KEYRING_USER: &str = "session-token";
const CREDENTIALS_FILE_NAME: &str = "credentials";
const TOKEN_ENV_VAR: &str = "JURIS_AUTH__TOKEN";

/// Where a loaded token came from (for `juris auth status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Keyring,
    Env,
    File,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
        }
    }
}

/// CLI credential storage.
///
/// Priority on load: keyring → `JURIS_AUTH__TOKEN` env → file
/// (`~/.juris/credentials`). Stores go to the keyring, falling back to the
/// file when no keyring is available.
pub struct TokenStore {
    service: String,
    file: Option<PathBuf>,
}

impl TokenStore {
    /// Store under the given keyring service name (see `auth.keyring_service`).
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            file: default_credentials_path(),
        }
    }

    /// Override the fallback credentials file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    fn entry(&self) -> Option<keyring::Entry> {
        keyring::Entry::new(&self.service, KEYRING_USER).ok()
    }

    fn credentials_path(&self) -> Result<&Path, AuthError> {
        self.file.as_deref().ok_or_else(|| {
            AuthError::TokenStoreError("home directory not found, cannot store credentials".into())
        })
    }

    /// Store a session token in the OS keychain. Falls back to file if keyring
    /// unavailable.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if both keyring and file storage fail.
    pub fn store(&self, token: &str) -> Result<(), AuthError> {
        match self.entry() {
            Some(entry) => match entry.set_password(token) {
                Ok(()) => Ok(()),
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                    store_file(self.credentials_path()?, token)
                }
            },
            None => {
                tracing::warn!("keyring unavailable; falling back to file");
                store_file(self.credentials_path()?, token)
            }
        }
    }

    /// Load the stored token and where it came from.
    #[must_use]
    pub fn load_with_source(&self) -> Option<(String, TokenSource)> {
        if let Some(entry) = self.entry()
            && let Ok(token) = entry.get_password()
            && !token.is_empty()
        {
            return Some((token, TokenSource::Keyring));
        }

        if let Ok(token) = std::env::var(TOKEN_ENV_VAR)
            && !token.is_empty()
        {
            return Some((token, TokenSource::Env));
        }

        self.file
            .as_deref()
            .and_then(load_file)
            .map(|token| (token, TokenSource::File))
    }

    #[must_use]
    pub fn load(&self) -> Option<String> {
        self.load_with_source().map(|(token, _)| token)
    }

    /// Delete stored credentials from keyring and file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
    pub fn delete(&self) -> Result<(), AuthError> {
        if let Some(entry) = self.entry() {
            // May not exist.
            let _ = entry.delete_credential();
        }

        if let Some(path) = self.file.as_deref()
            && path.exists()
        {
            fs::remove_file(path).map_err(|e| {
                AuthError::TokenStoreError(format!("failed to delete {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }
}

fn default_credentials_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".juris").join(CREDENTIALS_FILE_NAME))
}

fn store_file(path: &Path, token: &str) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(path, token)
        .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::TokenStoreError(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

fn load_file(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
