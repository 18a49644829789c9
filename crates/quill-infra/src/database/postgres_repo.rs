//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, SqlErr,
};

use quill_core::domain::{AuthorName, NewPost, Post, PostChanges, PostSummary};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::author;
use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL post repository sharing the process-wide pool.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

/// Row shape of the post/author join.
#[derive(Debug, FromQueryResult)]
struct SummaryRow {
    id: i32,
    title: String,
    content: String,
    author_name: String,
}

impl From<SummaryRow> for PostSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            author: AuthorName {
                name: row.author_name,
            },
        }
    }
}

/// Posts joined to their author, selecting only the public columns.
fn summaries() -> Select<PostEntity> {
    PostEntity::find()
        .select_only()
        .column(post::Column::Id)
        .column(post::Column::Title)
        .column(post::Column::Content)
        .column_as(author::Column::Name, "author_name")
        .join(JoinType::InnerJoin, post::Relation::Author.def())
        .order_by_asc(post::Column::Id)
}

fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return RepoError::ForeignKey(msg),
        Some(SqlErr::UniqueConstraintViolation(msg)) => return RepoError::Constraint(msg),
        _ => {}
    }

    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        tracing::debug!(author_id = new_post.author_id, "Inserting post");

        let model = post::ActiveModel {
            title: Set(new_post.title),
            content: Set(new_post.content),
            author_id: Set(new_post.author_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, changes: PostChanges) -> Result<Post, RepoError> {
        tracing::debug!(post_id = changes.id, "Updating post");

        let model = post::ActiveModel {
            id: Unchanged(changes.id),
            title: Set(changes.title),
            content: Set(changes.content),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => RepoError::NotFound,
            other => map_db_err(other),
        })?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_summary(&self, id: i32) -> Result<Option<PostSummary>, RepoError> {
        let row = summaries()
            .filter(post::Column::Id.eq(id))
            .into_model::<SummaryRow>()
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Into::into))
    }

    async fn list_summaries(&self) -> Result<Vec<PostSummary>, RepoError> {
        let rows = summaries()
            .into_model::<SummaryRow>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
