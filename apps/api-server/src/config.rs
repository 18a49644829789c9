//! Application configuration loaded from environment variables.

use std::env;

use quill_core::domain::Author;
#[cfg(feature = "postgres")]
use quill_infra::DatabaseConfig;
use quill_infra::JwtConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    /// Authors loaded into the in-memory repository (`SEED_AUTHORS=7:Ada,8:Grace`).
    pub seed_authors: Vec<Author>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        #[cfg(feature = "postgres")]
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            #[cfg(feature = "postgres")]
            database,
            jwt: JwtConfig::from_env(),
            seed_authors: env::var("SEED_AUTHORS")
                .map(|s| parse_seed_authors(&s))
                .unwrap_or_default(),
        }
    }
}

/// Parse `id:name` pairs separated by commas. Malformed entries are skipped.
pub fn parse_seed_authors(raw: &str) -> Vec<Author> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let parsed = entry.split_once(':').and_then(|(id, name)| {
                let name = name.trim();
                match (id.trim().parse(), name.is_empty()) {
                    (Ok(id), false) => Some(Author {
                        id,
                        name: name.to_string(),
                    }),
                    _ => None,
                }
            });
            if parsed.is_none() {
                tracing::warn!("Ignoring malformed SEED_AUTHORS entry: {:?}", entry);
            }
            parsed
        })
        .collect()
}
