//! In-memory post repository - used when no database is configured, and by tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::domain::{Author, AuthorName, NewPost, Post, PostChanges, PostSummary};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

#[derive(Default)]
struct Store {
    authors: BTreeMap<i32, Author>,
    posts: BTreeMap<i32, Post>,
    last_post_id: i32,
}

impl Store {
    fn summarize(&self, post: &Post) -> PostSummary {
        let name = self
            .authors
            .get(&post.author_id)
            .map(|a| a.name.clone())
            .unwrap_or_default();

        PostSummary {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            author: AuthorName { name },
        }
    }
}

/// In-memory post repository with the same foreign-key rule as the database:
/// a post can only be created for a known author.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
        }
    }

    /// Repository pre-loaded with the given authors and no posts.
    pub fn with_authors(authors: impl IntoIterator<Item = Author>) -> Self {
        let store = Store {
            authors: authors.into_iter().map(|a| (a.id, a)).collect(),
            ..Store::default()
        };

        Self {
            store: RwLock::new(store),
        }
    }

    /// Register an author. Authors are never created through the API.
    pub async fn add_author(&self, author: Author) {
        let mut store = self.store.write().await;
        store.authors.insert(author.id, author);
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        if !store.authors.contains_key(&new_post.author_id) {
            return Err(RepoError::ForeignKey(format!(
                "author {} does not exist",
                new_post.author_id
            )));
        }

        store.last_post_id += 1;
        let post = Post {
            id: store.last_post_id,
            title: new_post.title,
            content: new_post.content,
            author_id: new_post.author_id,
        };
        store.posts.insert(post.id, post.clone());

        Ok(post)
    }

    async fn update(&self, changes: PostChanges) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let post = store
            .posts
            .get_mut(&changes.id)
            .ok_or(RepoError::NotFound)?;

        post.title = changes.title;
        post.content = changes.content;

        Ok(post.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.get(&id).cloned())
    }

    async fn find_summary(&self, id: i32) -> Result<Option<PostSummary>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.get(&id).map(|p| store.summarize(p)))
    }

    async fn list_summaries(&self) -> Result<Vec<PostSummary>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.values().map(|p| store.summarize(p)).collect())
    }
}
