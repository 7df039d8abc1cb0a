//! API DTOs (Data Transfer Objects)
//!
//! `PostResponse::render` is the one place a stored media handle becomes a
//! public URL, and the one place engagement totals are derived.

use chrono::{DateTime, Utc};
use platform::storage::MediaStorage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::post::{Comment, Post, Repost};

// ============================================================================
// Requests
// ============================================================================

/// Comment request. Content is optional so missing input surfaces as the
/// documented 400 instead of a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    #[serde(default)]
    pub content: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Post author as rendered. The stored snapshot also carries the email,
/// which is never exposed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAuthorResponse {
    pub id: Uuid,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthorResponse {
    pub id: Uuid,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub author: CommentAuthorResponse,
    pub created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.comment_id.into_uuid(),
            content: comment.content.clone(),
            author: CommentAuthorResponse {
                id: comment.author.id.into_uuid(),
                name: comment.author.name.clone(),
                username: comment.author.username.clone(),
            },
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepostResponse {
    pub original_post_id: Uuid,
    pub original_author: String,
    pub original_author_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_media: Option<String>,
}

impl From<&Repost> for RepostResponse {
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

/// Public post representation with derived engagement totals
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Fully-qualified media URL, resolved from the storage backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    pub author: PostAuthorResponse,
    pub likes: Vec<Uuid>,
    pub total_likes: usize,
    pub comments: Vec<CommentResponse>,
    pub total_comments: usize,
    pub shares: Vec<Uuid>,
    pub total_shares: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repost: Option<RepostResponse>,
    pub created_at: DateTime<Utc>,
}

impl PostResponse {
    /// Render a post, resolving its media handle against the storage backend
    pub fn render<S: MediaStorage>(post: &Post, storage: &S) -> Self {
        Self {
            id: post.post_id.into_uuid(),
            content: post.content.clone(),
            media: post
                .media_handle
                .as_deref()
                .map(|handle| storage.public_url(handle)),
            author: PostAuthorResponse {
                id: post.author.id.into_uuid(),
                name: post.author.name.clone(),
                username: post.author.username.clone(),
            },
            likes: post.likes.iter().map(|id| id.into_uuid()).collect(),
            total_likes: post.likes.len(),
            comments: post.comments.iter().map(CommentResponse::from).collect(),
            total_comments: post.comments.len(),
            shares: post.shares.iter().map(|id| id.into_uuid()).collect(),
            total_shares: post.shares.len(),
            repost: post.repost.as_ref().map(RepostResponse::from),
            created_at: post.created_at,
        }
    }
}

/// Response carrying a single post
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostEnvelopeResponse {
    pub success: bool,
    pub post: PostResponse,
}

/// Response carrying a post list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsEnvelopeResponse {
    pub success: bool,
    pub posts: Vec<PostResponse>,
}

/// Response for deletion
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub success: bool,
    pub message: &'static str,
}
