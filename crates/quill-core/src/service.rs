//! Post service - the operations exposed by the blog routes.

use std::sync::Arc;

use crate::domain::{NewPost, Post, PostChanges, PostDraft, PostSummary};
use crate::error::{DomainError, RepoError};
use crate::ports::{PostRepository, Principal};

const POST: &str = "post";
const AUTHOR: &str = "author";

/// Composes principal checks with repository calls.
///
/// Every method returns `DomainError::NotFound` for absent rows and
/// `DomainError::Internal` for storage failures, so callers can tell the two apart.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Create a post owned by the principal.
    pub async fn create(&self, principal: &Principal, draft: PostDraft) -> Result<Post, DomainError> {
        let author_id = principal.author_id()?;

        self.repo
            .create(NewPost::new(author_id, draft))
            .await
            .map_err(|e| match e {
                RepoError::NotFound | RepoError::ForeignKey(_) => DomainError::NotFound {
                    entity_type: AUTHOR,
                    id: author_id,
                },
                other => internal(other),
            })
    }

    /// Replace title and content of a post the principal owns.
    pub async fn update(
        &self,
        principal: &Principal,
        id: i32,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        let author_id = principal.author_id()?;

        let existing = self
            .repo
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or(DomainError::NotFound {
                entity_type: POST,
                id,
            })?;

        if existing.author_id != author_id {
            return Err(DomainError::Forbidden {
                entity_type: POST,
                id,
            });
        }

        self.repo
            .update(PostChanges::new(id, draft))
            .await
            .map_err(|e| match e {
                RepoError::NotFound => DomainError::NotFound {
                    entity_type: POST,
                    id,
                },
                other => internal(other),
            })
    }

    pub async fn list(&self) -> Result<Vec<PostSummary>, DomainError> {
        self.repo.list_summaries().await.map_err(internal)
    }

    pub async fn get(&self, id: i32) -> Result<PostSummary, DomainError> {
        self.repo
            .find_summary(id)
            .await
            .map_err(internal)?
            .ok_or(DomainError::NotFound {
                entity_type: POST,
                id,
            })
    }
}

fn internal(err: RepoError) -> DomainError {
    DomainError::Internal(err.to_string())
}
