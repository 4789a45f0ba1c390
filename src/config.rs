use std::net::IpAddr;

use ipnet::IpNet;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub static_dir: String,
    pub max_body_size: usize,
    pub trusted_proxies: Vec<IpNet>,
    pub rate_limit: u32,
    pub rate_limit_window_secs: u64,
    pub smtp_retries: u32,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub tls_mode: TlsMode,
    pub user: String,
    pub pass: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TlsMode {
    StartTls,
    Tls,
    None,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_or("DATABASE_URL", "sqlite://contacts.db?mode=rwc");

        let host: IpAddr = env_or("MAILFORM_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid MAILFORM_HOST: {e}"))?;

        let port: u16 = env_or("MAILFORM_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid MAILFORM_PORT: {e}"))?;

        let static_dir = env_or("MAILFORM_STATIC_DIR", "public");

        let max_body_size: usize = env_or("MAILFORM_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid MAILFORM_MAX_BODY_SIZE: {e}"))?;

        let trusted_proxies: Vec<IpNet> = env_or("MAILFORM_TRUSTED_PROXIES", "")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|e| format!("Invalid MAILFORM_TRUSTED_PROXIES entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rate_limit: u32 = env_or("MAILFORM_RATE_LIMIT", "10")
            .parse()
            .map_err(|e| format!("Invalid MAILFORM_RATE_LIMIT: {e}"))?;

        let rate_limit_window_secs: u64 = env_or("MAILFORM_RATE_WINDOW_SECS", "60")
            .parse()
            .map_err(|e| format!("Invalid MAILFORM_RATE_WINDOW_SECS: {e}"))?;

        let smtp_retries: u32 = env_or("MAILFORM_SMTP_RETRIES", "1")
            .parse()
            .map_err(|e| format!("Invalid MAILFORM_SMTP_RETRIES: {e}"))?;

        let log_level = env_or("MAILFORM_LOG_LEVEL", "info");

        // The SMTP block is all-or-nothing: without a host, credentials and a
        // destination the notifier is disabled rather than half-configured.
        let smtp = match (
            std::env::var("MAILFORM_SMTP_HOST").ok(),
            std::env::var("MAILFORM_SMTP_USER").ok(),
            std::env::var("MAILFORM_SMTP_PASS").ok(),
            std::env::var("MAILFORM_CONTACT_TO").ok(),
        ) {
            (Some(host), Some(user), Some(pass), Some(to)) => {
                let port: u16 = env_or("MAILFORM_SMTP_PORT", "587")
                    .parse()
                    .map_err(|e| format!("Invalid MAILFORM_SMTP_PORT: {e}"))?;

                let tls_mode = match env_or("MAILFORM_SMTP_TLS", "starttls").as_str() {
                    "tls" => TlsMode::Tls,
                    "none" => TlsMode::None,
                    _ => TlsMode::StartTls,
                };

                let from = env_or("MAILFORM_SMTP_FROM", &user);

                Some(SmtpConfig {
                    host,
                    port,
                    tls_mode,
                    user,
                    pass,
                    from,
                    to,
                })
            }
            _ => None,
        };

        Ok(Config {
            database_url,
            host,
            port,
            static_dir,
            max_body_size,
            trusted_proxies,
            rate_limit,
            rate_limit_window_secs,
            smtp_retries,
            log_level,
            smtp,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
