//! Server configuration loaded from the environment.

/// Where the save/load API listens.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 3001,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl ServerConfig {
    /// Read `CODE_CLICKER_HOST` and `CODE_CLICKER_PORT`, falling back to
    /// `0.0.0.0:3001`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the port is not a valid `u16`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = lookup("CODE_CLICKER_HOST")
            .map(|h| h.trim().to_owned())
            .filter(|h| !h.is_empty())
            .unwrap_or(defaults.host);

        let port = match lookup("CODE_CLICKER_PORT") {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
                var: "CODE_CLICKER_PORT",
                reason: format!("{e}"),
            })?,
            None => defaults.port,
        };

        Ok(Self { host, port })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup_in(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 3001);
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_lookup(lookup_in(&[
            ("CODE_CLICKER_HOST", "127.0.0.1"),
            ("CODE_CLICKER_PORT", " 8088 "),
        ]))
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8088);
    }

    #[test]
    fn blank_host_uses_default() {
        let config = ServerConfig::from_lookup(lookup_in(&[("CODE_CLICKER_HOST", "  ")])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn host_name_is_kept_as_given() {
        let config =
            ServerConfig::from_lookup(lookup_in(&[("CODE_CLICKER_HOST", " localhost ")])).unwrap();
        assert_eq!(config.host, "localhost");
    }

    #[test]
    fn bad_port_is_an_error() {
        for bad in ["http", "70000", "-1"] {
            let err = ServerConfig::from_lookup(lookup_in(&[("CODE_CLICKER_PORT", bad)])).unwrap_err();
            assert!(err.to_string().contains("CODE_CLICKER_PORT"), "{err}");
        }
    }
}
