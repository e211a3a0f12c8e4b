//! JSON configuration file loading.

use anyhow::Context;
use insert_workers::InserterConfiguration;
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// Connection settings plus the `inserter` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub host: String,
    /// Accepts either `"5432"` or `5432`.
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
    pub database: String,
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub inserter: InserterConfiguration,
}

impl Config {
    /// Load and validate a configuration file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open config file {path:?}"))?;
        Self::from_json(&content).with_context(|| format!("Cannot parse config file {path:?}"))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for (field, value) in [
            ("host", &self.host),
            ("database", &self.database),
            ("username", &self.username),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("'{field}' must not be empty");
            }
        }
        if self.port == 0 {
            anyhow::bail!("'port' must not be 0");
        }
        Ok(())
    }

    /// Connection target with the password masked, for logging.
    pub fn masked_target(&self) -> String {
        format!(
            "postgres://{}:***@{}:{}/{}",
            self.username, self.host, self.port, self.database
        )
    }
}

fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid port '{text}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_target() {
        let config = Config::from_json(
            r#"{"host": "db", "port": 5433, "database": "demo", "username": "app", "password": "secret"}"#,
        )
        .unwrap();
        assert_eq!(config.masked_target(), "postgres://app:***@db:5433/demo");
    }

    #[test]
    fn test_port_forms() {
        for port in ["\"5432\"", "5432", "\" 5432 \""] {
            let json = format!(
                r#"{{"host": "h", "port": {port}, "database": "d", "username": "u"}}"#
            );
            assert_eq!(Config::from_json(&json).unwrap().port, 5432);
        }
        assert!(Config::from_json(
            r#"{"host": "h", "port": "abc", "database": "d", "username": "u"}"#
        )
        .is_err());
    }

    #[test]
    fn test_empty_host_rejected() {
        let err = Config::from_json(
            r#"{"host": " ", "port": 5432, "database": "d", "username": "u"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("'host'"));
    }
}
