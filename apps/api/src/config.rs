use std::net::SocketAddr;

use anyhow::{Context, Result};

const DEFAULT_DATABASE_URL: &str = "sqlite://sourcing.db";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` leaves the AI gateway unconfigured.
    pub anthropic_api_key: Option<String>,
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub allowed_origins: Vec<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let debug = parse_bool(&env_or("DEBUG", "true")).context("DEBUG must be true or false")?;

        Ok(Config {
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            host: env_or("API_HOST", "0.0.0.0"),
            port: env_or("API_PORT", "8000")
                .parse::<u16>()
                .context("API_PORT must be a valid port number")?,
            debug,
            allowed_origins: parse_origins(&env_or("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS)),
            rust_log: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| if debug { "debug" } else { "info" }.to_string()),
        })
    }

    /// First address `API_HOST:API_PORT` resolves to. Hostnames such as
    /// `localhost` and IPv6 literals such as `::` are accepted.
    pub async fn listen_addr(&self) -> Result<SocketAddr> {
        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("Cannot resolve API_HOST '{}'", self.host))?
            .next()
            .with_context(|| format!("API_HOST '{}' resolved to no address", self.host))
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognised boolean '{other}'"),
    }
}

/// Splits a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_skips_blanks() {
        let origins = parse_origins(" http://a.test , ,http://b.test,");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    fn config_with_host(host: &str, port: u16) -> Config {
        Config {
            anthropic_api_key: None,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: host.to_string(),
            port,
            debug: false,
            allowed_origins: vec![],
            rust_log: "info".to_string(),
        }
    }

    #[tokio::test]
    async fn test_listen_addr_resolves_hostname_and_binds() {
        let addr = config_with_host("localhost", 0).listen_addr().await.unwrap();
        assert!(addr.ip().is_loopback());

        let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[tokio::test]
    async fn test_listen_addr_accepts_ip_literals() {
        let v6 = config_with_host("::", 8000).listen_addr().await.unwrap();
        assert!(v6.is_ipv6() && v6.ip().is_unspecified());
        assert_eq!(v6.port(), 8000);

        let v4 = config_with_host("0.0.0.0", 8000).listen_addr().await.unwrap();
        assert_eq!(v4, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert!(parse_bool("True").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("maybe").is_err());
    }
}
