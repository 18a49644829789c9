use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges, PostSummary};
use crate::error::RepoError;

/// Post repository over the posts table and its author relation.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post and return it with its assigned id.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Replace title and content. Fails with `RepoError::NotFound` if no row matches.
    async fn update(&self, changes: PostChanges) -> Result<Post, RepoError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError>;

    /// Find a post projected with its author's name.
    async fn find_summary(&self, id: i32) -> Result<Option<PostSummary>, RepoError>;

    /// All posts projected with their author's name.
    async fn list_summaries(&self) -> Result<Vec<PostSummary>, RepoError>;
}
