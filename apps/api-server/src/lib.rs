//! # Quill API Server
//!
//! Actix-web surface of the blog API: configuration, state, middleware and handlers.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;
