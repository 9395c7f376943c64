use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Page size used when a listing request doesn't ask for one.
    pub page_size: i64,
    /// Largest page size the request layer will pass through.
    pub max_page_size: i64,
    pub http_port: u16,
    pub db_max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: 20,
            max_page_size: 100,
            http_port: 8080,
            db_max_connections: 5,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        let defaults = Self::default();

        let page_size = match env::var("QUIZBOARD_PAGE_SIZE") {
            Ok(val) => val.parse::<i64>().unwrap_or(defaults.page_size).max(1),
            Err(_) => defaults.page_size,
        };

        let max_page_size = match env::var("QUIZBOARD_MAX_PAGE_SIZE") {
            Ok(val) => val
                .parse::<i64>()
                .unwrap_or(defaults.max_page_size)
                .max(page_size),
            Err(_) => defaults.max_page_size.max(page_size),
        };

        let http_port = match env::var("QUIZBOARD_HTTP_PORT") {
            Ok(val) => val.parse::<u16>().unwrap_or(defaults.http_port),
            Err(_) => defaults.http_port,
        };

        let db_max_connections = match env::var("QUIZBOARD_DB_MAX_CONNECTIONS") {
            Ok(val) => val
                .parse::<u32>()
                .unwrap_or(defaults.db_max_connections)
                .max(1),
            Err(_) => defaults.db_max_connections,
        };

        Self {
            page_size,
            max_page_size,
            http_port,
            db_max_connections,
        }
    }

    /// Turns a requested page size into one the engine can serve.
    pub fn clamp_page_size(&self, requested: Option<i64>) -> i64 {
        requested
            .unwrap_or(self.page_size)
            .clamp(1, self.max_page_size)
    }
}
