use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub cors_origin: String,
    pub notify: NotifyConfig,
}

/// Where roster snapshots are pushed after tallies and kills.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: 13000,
            timeout: Duration::from_millis(250),
        }
    }
}

impl NotifyConfig {
    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            cors_origin: "http://localhost:3000".to_string(),
            notify: NotifyConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_addr = parse_var("BIND_ADDR", defaults.bind_addr);
        let cors_origin = env::var("CORS_ORIGIN").unwrap_or(defaults.cors_origin);
        let enabled = parse_var("NOTIFY_ENABLED", defaults.notify.enabled);
        let host = env::var("NOTIFY_HOST").unwrap_or(defaults.notify.host);
        let port = parse_var("NOTIFY_PORT", defaults.notify.port);
        let timeout_ms = parse_var(
            "NOTIFY_TIMEOUT_MS",
            defaults.notify.timeout.as_millis() as u64,
        );

        Self {
            bind_addr,
            cors_origin,
            notify: NotifyConfig {
                enabled,
                host,
                port,
                timeout: Duration::from_millis(timeout_ms),
            },
        }
    }
}

fn parse_var<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match env::var(key) {
        Ok(raw) => raw.parse::<T>().unwrap_or_else(|_| {
            log::warn!("{}={} is not valid, using {:?}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
