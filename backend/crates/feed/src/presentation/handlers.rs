//! HTTP Handlers
//!
//! Create-post accepts `multipart/form-data` with `content`, `media`, and
//! `repostOf` fields. Everything else is plain JSON.

use axum::Extension;
use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use identity::domain::repository::UserRepository;
use identity::presentation::middleware::CurrentUser;
use kernel::id::PostId;
use platform::storage::{MediaStorage, MediaUpload};

use crate::application::{
    AddCommentUseCase, CreatePostInput, CreatePostUseCase, DeletePostUseCase, SharePostUseCase,
    ToggleLikeUseCase,
};
use crate::domain::repository::PostRepository;
use crate::error::{FeedError, FeedResult};
use crate::presentation::dto::{
    CommentRequest, DeletedResponse, PostEnvelopeResponse, PostResponse, PostsEnvelopeResponse,
};

/// Shared state for feed handlers
pub struct FeedAppState<P, U, S>
where
    P: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    S: MediaStorage + Send + Sync + 'static,
{
    pub posts: Arc<P>,
    pub users: Arc<U>,
    pub storage: Arc<S>,
}

// Manual impl: derive(Clone) would require P/U/S themselves to be Clone
impl<P, U, S> Clone for FeedAppState<P, U, S>
where
    P: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    S: MediaStorage + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            posts: self.posts.clone(),
            users: self.users.clone(),
            storage: self.storage.clone(),
        }
    }
}

fn parse_post_id(raw: &str) -> FeedResult<PostId> {
    raw.parse().map_err(|_| FeedError::InvalidPostId)
}

// ============================================================================
// Create
// ============================================================================

/// POST /api/users
pub async fn create_post<P, U, S>(
    State(state): State<FeedAppState<P, U, S>>,
    Extension(current): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> FeedResult<impl IntoResponse>
where
    P: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    S: MediaStorage + Send + Sync + 'static,
{
    let mut input = CreatePostInput {
        content: None,
        media: None,
        repost_of: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FeedError::Validation(e.to_string()))?
    {
        match field.name() {
            Some("content") => {
                input.content = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| FeedError::Validation(e.to_string()))?,
                );
            }
            Some("repostOf") => {
                input.repost_of = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| FeedError::Validation(e.to_string()))?,
                );
            }
            Some("media") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| FeedError::Validation(e.to_string()))?;

                input.media = Some(MediaUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let use_case = CreatePostUseCase::new(
        state.posts.clone(),
        state.users.clone(),
        state.storage.clone(),
    );
    let post = use_case.execute(&current.0, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(PostEnvelopeResponse {
            success: true,
            post: PostResponse::render(&post, state.storage.as_ref()),
        }),
    ))
}

// ============================================================================
// List
// ============================================================================

/// GET /api/users/my-posts
pub async fn my_posts<P, U, S>(
    State(state): State<FeedAppState<P, U, S>>,
    Extension(current): Extension<CurrentUser>,
) -> FeedResult<Json<PostsEnvelopeResponse>>
where
    P: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    S: MediaStorage + Send + Sync + 'static,
{
    let use_case = crate::application::ListUserPostsUseCase::new(state.posts.clone());
    let posts = use_case.execute(&current.0).await?;

    Ok(Json(PostsEnvelopeResponse {
        success: true,
        posts: posts
            .iter()
            .map(|post| PostResponse::render(post, state.storage.as_ref()))
            .collect(),
    }))
}

// ============================================================================
// Engagement
// ============================================================================

/// POST /api/users/{postId}/like
pub async fn toggle_like<P, U, S>(
    State(state): State<FeedAppState<P, U, S>>,
    Extension(current): Extension<CurrentUser>,
    Path(post_id): Path<String>,
) -> FeedResult<Json<PostEnvelopeResponse>>
where
    P: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    S: MediaStorage + Send + Sync + 'static,
{
    let post_id = parse_post_id(&post_id)?;

    let use_case = ToggleLikeUseCase::new(state.posts.clone());
    let post = use_case.execute(&post_id, &current.0).await?;

    Ok(Json(PostEnvelopeResponse {
        success: true,
        post: PostResponse::render(&post, state.storage.as_ref()),
    }))
}

/// POST /api/users/{postId}/comments
pub async fn add_comment<P, U, S>(
    State(state): State<FeedAppState<P, U, S>>,
    Extension(current): Extension<CurrentUser>,
    Path(post_id): Path<String>,
    Json(req): Json<CommentRequest>,
) -> FeedResult<Json<PostEnvelopeResponse>>
where
    P: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    S: MediaStorage + Send + Sync + 'static,
{
    let post_id = parse_post_id(&post_id)?;

    let use_case = AddCommentUseCase::new(state.posts.clone(), state.users.clone());
    let post = use_case
        .execute(&post_id, &current.0, &req.content.unwrap_or_default())
        .await?;

    Ok(Json(PostEnvelopeResponse {
        success: true,
        post: PostResponse::render(&post, state.storage.as_ref()),
    }))
}

/// POST /api/users/{postId}/share
pub async fn share_post<P, U, S>(
    State(state): State<FeedAppState<P, U, S>>,
    Extension(current): Extension<CurrentUser>,
    Path(post_id): Path<String>,
) -> FeedResult<Json<PostEnvelopeResponse>>
where
    P: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    S: MediaStorage + Send + Sync + 'static,
{
    let post_id = parse_post_id(&post_id)?;

    let use_case = SharePostUseCase::new(state.posts.clone());
    let post = use_case.execute(&post_id, &current.0).await?;

    Ok(Json(PostEnvelopeResponse {
        success: true,
        post: PostResponse::render(&post, state.storage.as_ref()),
    }))
}

// ============================================================================
// Delete
// ============================================================================

/// DELETE /api/users/{postId}
pub async fn delete_post<P, U, S>(
    State(state): State<FeedAppState<P, U, S>>,
    Extension(current): Extension<CurrentUser>,
    Path(post_id): Path<String>,
) -> FeedResult<Json<DeletedResponse>>
where
    P: PostRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    S: MediaStorage + Send + Sync + 'static,
{
    let post_id = parse_post_id(&post_id)?;

    let use_case = DeletePostUseCase::new(state.posts.clone(), state.storage.clone());
    use_case.execute(&post_id, &current.0).await?;

    Ok(Json(DeletedResponse {
        success: true,
        message: "Post deleted successfully",
    }))
}
