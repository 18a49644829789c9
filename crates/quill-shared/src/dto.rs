//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use validator::Validate;

use quill_core::domain::PostDraft;

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
}

impl From<CreatePostRequest> for PostDraft {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
        }
    }
}

/// Request to update a post's title and content.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePostRequest {
    pub id: i32,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
}

impl UpdatePostRequest {
    pub fn into_parts(self) -> (i32, PostDraft) {
        (
            self.id,
            PostDraft {
                title: self.title,
                content: self.content,
            },
        )
    }
}

/// Response to a successful create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedPostResponse {
    pub id: i32,
}

/// Single-entity envelope: `{"response": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityResponse<T> {
    pub response: T,
}

/// Listing envelope: `{"blogs": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse<T> {
    pub blogs: Vec<T>,
}
