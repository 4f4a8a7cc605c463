//! Session and credential configuration.

use serde::{Deserialize, Serialize};

/// Thirty days.
const fn default_session_ttl_hours() -> u32 {
    720
}

fn default_keyring_service() -> String {
    String::from("juris-cli")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Lifetime of newly issued sessions, in hours.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u32,

    /// OS keychain service name the CLI stores its session token under.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: default_session_ttl_hours(),
            keyring_service: default_keyring_service(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_correct() {
        let config = AuthConfig::default();
        assert_eq!(config.session_ttl_hours, 720);
        assert_eq!(config.keyring_service, "juris-cli");
    }
}
