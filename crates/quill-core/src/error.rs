//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error("Principal is not allowed to modify {entity_type} {id}")]
    Forbidden { entity_type: &'static str, id: i32 },

    #[error("Principal subject is not a numeric author id: {0:?}")]
    InvalidPrincipal(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
