use std::env;
use std::time::Duration;

const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_API_BASE_URI: &str = "/api";
const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub cleanup_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            api_base_uri: DEFAULT_API_BASE_URI.to_string(),
            cleanup_interval_secs: DEFAULT_CLEANUP_INTERVAL_SECS,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // 解析失败的值回退到默认值
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let server_port = lookup("SERVER_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.server_port);

        let api_base_uri = lookup("API_BASE_URI")
            .map(|v| normalize_base_uri(&v))
            .unwrap_or(defaults.api_base_uri);

        let cleanup_interval_secs = lookup("CLEANUP_INTERVAL_SECS")
            .and_then(|v| v.trim().trim_end_matches('s').parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(defaults.cleanup_interval_secs);

        Config {
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            api_base_uri,
            cleanup_interval_secs,
        }
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

// 保证以 / 开头且不以 / 结尾，axum 的 nest 不接受空前缀或 "/"
fn normalize_base_uri(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URI.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[]));

        assert_eq!(config, Config::default());
        assert_eq!(config.cleanup_interval(), Duration::from_secs(300));
    }

    #[test]
    fn test_reads_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "8080"),
            ("API_BASE_URI", "v1/"),
            ("CLEANUP_INTERVAL_SECS", "60s"),
        ]));

        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.api_base_uri, "/v1");
        assert_eq!(config.cleanup_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_port_fallback_and_invalid_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "4000"),
            ("CLEANUP_INTERVAL_SECS", "0"),
            ("API_BASE_URI", "/"),
        ]));
        assert_eq!(config.server_port, 4000);
        assert_eq!(config.cleanup_interval_secs, DEFAULT_CLEANUP_INTERVAL_SECS);
        assert_eq!(config.api_base_uri, DEFAULT_API_BASE_URI);

        let config = Config::from_lookup(lookup_from(&[("SERVER_PORT", "not-a-port")]));
        assert_eq!(config.server_port, DEFAULT_SERVER_PORT);
    }
}
