//! Generator settings: values baked into generated code (API base URL, server bind, database connection).
//! Each field can be overridden from an `ARCHITECT_*` environment variable.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub name: String,
    pub user: String,
    pub host: String,
    pub port: u16,
    pub password: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            name: "postgres".into(),
            user: "postgres".into(),
            host: "psql".into(),
            port: 5432,
            password: "password".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Base URL the generated pages use to reach the generated backend.
    pub api_base_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub database: DatabaseSettings,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        GeneratorSettings {
            api_base_url: "http://localhost:8000".into(),
            server_host: "0.0.0.0".into(),
            server_port: 8000,
            database: DatabaseSettings::default(),
        }
    }
}

impl GeneratorSettings {
    /// Defaults overridden by `ARCHITECT_*` env vars.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `ARCHITECT_*` key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut s = GeneratorSettings::default();
        if let Some(v) = lookup("ARCHITECT_API_BASE_URL") {
            s.api_base_url = v;
        }
        if let Some(v) = lookup("ARCHITECT_SERVER_HOST") {
            s.server_host = v;
        }
        if let Some(v) = lookup("ARCHITECT_SERVER_PORT") {
            s.server_port = parse_port("ARCHITECT_SERVER_PORT", &v, s.server_port);
        }
        if let Some(v) = lookup("ARCHITECT_DB_NAME") {
            s.database.name = v;
        }
        if let Some(v) = lookup("ARCHITECT_DB_USER") {
            s.database.user = v;
        }
        if let Some(v) = lookup("ARCHITECT_DB_HOST") {
            s.database.host = v;
        }
        if let Some(v) = lookup("ARCHITECT_DB_PORT") {
            s.database.port = parse_port("ARCHITECT_DB_PORT", &v, s.database.port);
        }
        if let Some(v) = lookup("ARCHITECT_DB_PASSWORD") {
            s.database.password = v;
        }
        s
    }

    /// API base URL without a trailing slash, ready for path concatenation.
    pub fn api_base(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

fn parse_port(key: &str, value: &str, default: u16) -> u16 {
    value.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(key, value, default, "invalid port, using default");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn lookup_overrides_defaults() {
        let env: HashMap<&str, &str> = [
            ("ARCHITECT_API_BASE_URL", "http://api.internal:9000/"),
            ("ARCHITECT_SERVER_PORT", "9000"),
            ("ARCHITECT_DB_HOST", "db"),
            ("ARCHITECT_DB_PORT", "not-a-port"),
        ]
        .into_iter()
        .collect();
        let s = GeneratorSettings::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(s.api_base(), "http://api.internal:9000");
        assert_eq!(s.server_port, 9000);
        assert_eq!(s.server_host, "0.0.0.0");
        assert_eq!(s.database.host, "db");
        assert_eq!(s.database.port, 5432);
        assert_eq!(s.database.user, "postgres");
    }

    #[test]
    fn partial_json_uses_defaults() {
        let s: GeneratorSettings = serde_json::from_str(r#"{ "database": { "name": "library" } }"#).unwrap();
        assert_eq!(s.database.name, "library");
        assert_eq!(s.database.password, "password");
        assert_eq!(s.api_base_url, "http://localhost:8000");
    }
}
