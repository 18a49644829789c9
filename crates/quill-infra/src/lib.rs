//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory storage only
//! - `postgres` - PostgreSQL storage via SeaORM
//! - `auth` - JWT token verification

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::InMemoryPostRepository;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresPostRepository};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};
