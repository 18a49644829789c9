//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::PostService;
use quill_core::ports::{PostRepository, TokenService};
use quill_infra::{InMemoryPostRepository, JwtTokenService};

use crate::config::AppConfig;

/// Which repository backs the running server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    Memory,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Postgres => "postgres",
            StorageKind::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub tokens: Arc<dyn TokenService>,
    pub storage: StorageKind,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn PostRepository>,
        tokens: Arc<dyn TokenService>,
        storage: StorageKind,
    ) -> Self {
        Self {
            posts: PostService::new(repo),
            tokens,
            storage,
        }
    }

    /// Build the application state with appropriate implementations.
    pub async fn from_config(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        #[cfg(feature = "postgres")]
        let (repo, storage): (Arc<dyn PostRepository>, StorageKind) = {
            if let Some(db_config) = &config.database {
                match quill_infra::database::connect(db_config).await {
                    Ok(conn) => (
                        Arc::new(quill_infra::PostgresPostRepository::new(conn)),
                        StorageKind::Postgres,
                    ),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (memory_repo(config), StorageKind::Memory)
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (memory_repo(config), StorageKind::Memory)
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (repo, storage): (Arc<dyn PostRepository>, StorageKind) = {
            tracing::info!("Running without postgres feature - using in-memory repository");
            (memory_repo(config), StorageKind::Memory)
        };

        tracing::info!(storage = storage.as_str(), "Application state initialized");

        Self::new(repo, tokens, storage)
    }
}

fn memory_repo(config: &AppConfig) -> Arc<dyn PostRepository> {
    tracing::info!(
        authors = config.seed_authors.len(),
        "Seeding in-memory repository"
    );
    Arc::new(InMemoryPostRepository::with_authors(
        config.seed_authors.iter().cloned(),
    ))
}
