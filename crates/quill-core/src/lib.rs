//! # Quill Core
//!
//! The domain layer of the Quill blog API.
//! This crate contains the post rules and the ports infrastructure must implement,
//! with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::PostService;
