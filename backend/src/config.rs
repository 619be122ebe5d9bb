use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Lifetime of a login session, in hours.
    pub session_ttl_hours: i64,
    /// Number of blogs returned per feed page.
    pub feed_page_size: i64,
    /// Minimum gap between admitted mutating requests for one session.
    pub rate_limit_window_ms: i64,
    pub rate_limit_ip_max_requests: u32,
    pub rate_limit_ip_window_seconds: u64,
    pub cookie_secure: bool,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/blogserver".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .unwrap_or(8000);

        let session_ttl_hours = env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24);

        let feed_page_size = env::var("FEED_PAGE_SIZE")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        let rate_limit_window_ms = env::var("RATE_LIMIT_WINDOW_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .unwrap_or(1000);

        let rate_limit_ip_max_requests = env::var("RATE_LIMIT_IP_MAX_REQUESTS")
            .unwrap_or_else(|_| "15".to_string())
            .parse()
            .unwrap_or(15);

        let rate_limit_ip_window_seconds = env::var("RATE_LIMIT_IP_WINDOW_SECONDS")
            .unwrap_or_else(|_| "900".to_string())
            .parse()
            .unwrap_or(900);

        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|value| value == "true" || value == "1")
            .unwrap_or(false);

        Ok(Config {
            database_url,
            port,
            session_ttl_hours,
            feed_page_size,
            rate_limit_window_ms,
            rate_limit_ip_max_requests,
            rate_limit_ip_window_seconds,
            cookie_secure,
        })
    }
}
