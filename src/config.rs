use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub session_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://jurnal.db".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| "5533".to_string()).parse().expect("PORT must be a number"),
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .unwrap_or_else(|_| "168".to_string())
                .parse()
                .expect("SESSION_TTL_HOURS must be a number"),
        }
    }
}
