//! # Quill Shared
//!
//! Wire types of the blog API: request schemas, response envelopes and
//! the payload validator used by the write routes.

pub mod dto;
pub mod response;
pub mod validation;

pub use response::{ErrorBody, MessageBody};
pub use validation::{PayloadError, parse_payload};
