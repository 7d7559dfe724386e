//! Server Configuration

use std::path::PathBuf;

/// Settings read from the environment (after `.env`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// `BIND_ADDR`
    pub bind_addr: String,

    /// `BACKEND_URL`: origin of the payments API
    pub backend_url: String,

    /// `STATIC_DIR`: built frontend (index.html, wasm, js)
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            backend_url: "http://localhost:8080".into(),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            backend_url: get("BACKEND_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.backend_url),
            static_dir: get("STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.backend_url, "http://localhost:8080");
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("BIND_ADDR", "127.0.0.1:4000"),
            ("BACKEND_URL", "https://api.example.com/"),
            ("STATIC_DIR", "  "),
        ]
        .into_iter()
        .collect();

        let config = ServerConfig::from_lookup(|key| env.get(key).map(|v| (*v).to_string()));
        assert_eq!(config.bind_addr, "127.0.0.1:4000");
        assert_eq!(config.backend_url, "https://api.example.com");
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }
}
