use serde::{Deserialize, Serialize};

/// Post entity - a blog post as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author_id: i32,
}

/// Title and content supplied by a caller, before an author is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

/// A post ready to be inserted. The id is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author_id: i32,
    pub title: String,
    pub content: String,
}

impl NewPost {
    pub fn new(author_id: i32, draft: PostDraft) -> Self {
        Self {
            author_id,
            title: draft.title,
            content: draft.content,
        }
    }
}

/// Replacement title and content for an existing post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub id: i32,
    pub title: String,
    pub content: String,
}

impl PostChanges {
    pub fn new(id: i32, draft: PostDraft) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
        }
    }
}

/// Public projection of a post: no author id, only the author's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author: AuthorName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorName {
    pub name: String,
}
