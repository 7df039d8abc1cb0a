//! PostgreSQL Repository Implementations
//!
//! One row per aggregate: likes/shares as UUID arrays, comments and the
//! repost snapshot as JSONB. Every engagement mutation runs inside a
//! transaction that takes `SELECT ... FOR UPDATE` on the row, so concurrent
//! writers on the same post are serialized instead of racing.

use chrono::{DateTime, Utc};
use identity::domain::value_object::user_id::UserId;
use kernel::id::{CommentId, PostId};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPool;
use sqlx::types::Json;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entity::post::{AuthorSnapshot, Comment, CommentAuthor, Post, Repost};
use crate::domain::repository::{PostRepository, ShareOutcome};
use crate::error::FeedResult;

/// PostgreSQL-backed post repository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock the aggregate row for a read-modify-write
    async fn lock_row(
        tx: &mut Transaction<'_, Postgres>,
        post_id: &PostId,
    ) -> FeedResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE post_id = $1 FOR UPDATE"
        ))
        .bind(post_id.as_uuid())
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.map(PostRow::into_post))
    }
}

const POST_COLUMNS: &str = r#"
    post_id,
    content,
    author_id,
    author_name,
    author_username,
    author_email,
    likes,
    comments,
    shares,
    media_handle,
    repost,
    created_at,
    updated_at
"#;

impl PostRepository for PgPostRepository {
    async fn create(&self, post: &Post) -> FeedResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                content,
                author_id,
                author_name,
                author_username,
                author_email,
                likes,
                comments,
                shares,
                media_handle,
                repost,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(&post.content)
        .bind(post.author.id.as_uuid())
        .bind(&post.author.name)
        .bind(&post.author.username)
        .bind(&post.author.email)
        .bind(uuid_vec(&post.likes))
        .bind(Json(comment_records(&post.comments)))
        .bind(uuid_vec(&post.shares))
        .bind(&post.media_handle)
        .bind(post.repost.as_ref().map(|r| Json(RepostRecord::from(r))))
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, post_id: &PostId) -> FeedResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE post_id = $1"
        ))
        .bind(post_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn list_by_author(&self, author_id: &UserId) -> FeedResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE author_id = $1 ORDER BY created_at DESC"
        ))
        .bind(author_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn toggle_like(
        &self,
        post_id: &PostId,
        user_id: &UserId,
    ) -> FeedResult<Option<Post>> {
        let mut tx = self.pool.begin().await?;

        let Some(mut post) = Self::lock_row(&mut tx, post_id).await? else {
            return Ok(None);
        };

        post.toggle_like(*user_id);
        post.touch();

        sqlx::query("UPDATE posts SET likes = $2, updated_at = $3 WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .bind(uuid_vec(&post.likes))
            .bind(post.updated_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(post))
    }

    async fn add_comment(
        &self,
        post_id: &PostId,
        comment: Comment,
    ) -> FeedResult<Option<Post>> {
        let mut tx = self.pool.begin().await?;

        let Some(mut post) = Self::lock_row(&mut tx, post_id).await? else {
            return Ok(None);
        };

        post.comments.push(comment);
        post.touch();

        sqlx::query("UPDATE posts SET comments = $2, updated_at = $3 WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .bind(Json(comment_records(&post.comments)))
            .bind(post.updated_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(post))
    }

    async fn add_share(
        &self,
        post_id: &PostId,
        user_id: &UserId,
    ) -> FeedResult<Option<ShareOutcome>> {
        let mut tx = self.pool.begin().await?;

        let Some(mut post) = Self::lock_row(&mut tx, post_id).await? else {
            return Ok(None);
        };

        if !post.add_share(*user_id) {
            return Ok(Some(ShareOutcome::AlreadyShared));
        }

        sqlx::query("UPDATE posts SET shares = $2, updated_at = $3 WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .bind(uuid_vec(&post.shares))
            .bind(post.updated_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(ShareOutcome::Shared(post)))
    }

    async fn delete_by_author(
        &self,
        post_id: &PostId,
        author_id: &UserId,
    ) -> FeedResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "DELETE FROM posts WHERE post_id = $1 AND author_id = $2 RETURNING {POST_COLUMNS}"
        ))
        .bind(post_id.as_uuid())
        .bind(author_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }
}

fn uuid_vec(ids: &[UserId]) -> Vec<Uuid> {
    ids.iter().map(|id| id.into_uuid()).collect()
}

fn comment_records(comments: &[Comment]) -> Vec<CommentRecord> {
    comments.iter().map(CommentRecord::from).collect()
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    content: Option<String>,
    author_id: Uuid,
    author_name: String,
    author_username: String,
    author_email: String,
    likes: Vec<Uuid>,
    comments: Json<Vec<CommentRecord>>,
    shares: Vec<Uuid>,
    media_handle: Option<String>,
    repost: Option<Json<RepostRecord>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: PostId::from_uuid(self.post_id),
            content: self.content,
            author: AuthorSnapshot {
                id: UserId::from_uuid(self.author_id),
                name: self.author_name,
                username: self.author_username,
                email: self.author_email,
            },
            likes: self.likes.into_iter().map(UserId::from_uuid).collect(),
            comments: self.comments.0.into_iter().map(CommentRecord::into_comment).collect(),
            shares: self.shares.into_iter().map(UserId::from_uuid).collect(),
            media_handle: self.media_handle,
            repost: self.repost.map(|r| r.0.into_repost()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// JSONB shape of an embedded comment
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentRecord {
    id: Uuid,
    content: String,
    author_id: Uuid,
    author_name: String,
    author_username: String,
    created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentRecord {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.comment_id.into_uuid(),
            content: comment.content.clone(),
            author_id: comment.author.id.into_uuid(),
            author_name: comment.author.name.clone(),
            author_username: comment.author.username.clone(),
            created_at: comment.created_at,
        }
    }
}

impl CommentRecord {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::from_uuid(self.id),
            content: self.content,
            author: CommentAuthor {
                id: UserId::from_uuid(self.author_id),
                name: self.author_name,
                username: self.author_username,
            },
            created_at: self.created_at,
        }
    }
}

/// JSONB shape of the repost snapshot
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepostRecord {
    original_post_id: Uuid,
    original_author: String,
    original_author_id: Uuid,
    original_content: Option<String>,
    original_media: Option<String>,
}

impl From<&Repost> for RepostRecord {
    fn from(repost: &Repost) -> Self {
        Self {
            original_post_id: repost.original_post_id.into_uuid(),
            original_author: repost.original_author.clone(),
            original_author_id: repost.original_author_id.into_uuid(),
            original_content: repost.original_content.clone(),
            original_media: repost.original_media.clone(),
        }
    }
}

impl RepostRecord {
    fn into_repost(self) -> Repost {
        Repost {
            original_post_id: PostId::from_uuid(self.original_post_id),
            original_author: self.original_author,
            original_author_id: UserId::from_uuid(self.original_author_id),
            original_content: self.original_content,
            original_media: self.original_media,
        }
    }
}
