//! Create Post Use Case
//!
//! Media is staged to storage before the author lookup; if the author or
//! the repost target turns out to be missing, the staged object is deleted
//! best-effort so failed requests do not leak storage.

use std::sync::Arc;

use identity::domain::repository::UserRepository;
use identity::domain::value_object::user_id::UserId;
use kernel::id::PostId;
use platform::storage::{MediaStorage, MediaUpload};

use crate::domain::entity::post::{AuthorSnapshot, Post, Repost};
use crate::domain::repository::PostRepository;
use crate::error::{FeedError, FeedResult};

/// Create post input
pub struct CreatePostInput {
    pub content: Option<String>,
    pub media: Option<MediaUpload>,
    /// Post id to repost, as received from the client
    pub repost_of: Option<String>,
}

impl CreatePostInput {
    fn is_empty(&self) -> bool {
        self.content.as_deref().is_none_or(|c| c.trim().is_empty())
            && self.media.is_none()
            && self.repost_of.is_none()
    }
}

/// Create post use case
pub struct CreatePostUseCase<P, U, S>
where
    P: PostRepository,
    U: UserRepository,
    S: MediaStorage,
{
    posts: Arc<P>,
    users: Arc<U>,
    storage: Arc<S>,
}

impl<P, U, S> CreatePostUseCase<P, U, S>
where
    P: PostRepository,
    U: UserRepository,
    S: MediaStorage,
{
    pub fn new(posts: Arc<P>, users: Arc<U>, storage: Arc<S>) -> Self {
        Self {
            posts,
            users,
            storage,
        }
    }

    pub async fn execute(&self, author_id: &UserId, input: CreatePostInput) -> FeedResult<Post> {
        if input.is_empty() {
            return Err(FeedError::Validation(
                "Post content or media is required".to_string(),
            ));
        }

        // Stage media first; later failures must clean it up
        let media_handle = match input.media {
            Some(upload) => Some(self.storage.store(upload).await?.handle),
            None => None,
        };

        let author = match self.users.find_by_id(author_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                self.discard_staged(&media_handle).await;
                return Err(FeedError::UserNotFound);
            }
            Err(e) => {
                self.discard_staged(&media_handle).await;
                return Err(FeedError::Internal(e.to_string()));
            }
        };

        let repost = match &input.repost_of {
            Some(raw) => match self.resolve_repost(raw).await {
                Ok(repost) => Some(repost),
                Err(e) => {
                    self.discard_staged(&media_handle).await;
                    return Err(e);
                }
            },
            None => None,
        };

        let snapshot = AuthorSnapshot {
            id: author.user_id,
            name: author.name.clone(),
            username: author.username.as_str().to_string(),
            email: author.email.as_str().to_string(),
        };

        let post = Post::new(snapshot, input.content, media_handle, repost);
        self.posts.create(&post).await?;

        tracing::info!(
            post_id = %post.post_id,
            author_id = %post.author.id,
            has_media = post.media_handle.is_some(),
            is_repost = post.repost.is_some(),
            "Post created"
        );

        Ok(post)
    }

    /// Snapshot the repost target, resolving its media to a URL up front
    async fn resolve_repost(&self, raw_id: &str) -> FeedResult<Repost> {
        let original_id: PostId = raw_id.parse().map_err(|_| FeedError::InvalidPostId)?;

        let original = self
            .posts
            .find_by_id(&original_id)
            .await?
            .ok_or(FeedError::PostNotFound)?;

        let media_url = original
            .media_handle
            .as_deref()
            .map(|handle| self.storage.public_url(handle));

        Ok(Repost::snapshot_of(&original, media_url))
    }

    /// Compensating delete for a staged upload; failure is logged, not escalated
    async fn discard_staged(&self, media_handle: &Option<String>) {
        if let Some(handle) = media_handle
            && let Err(e) = self.storage.delete(handle).await
        {
            tracing::warn!(handle = %handle, error = %e, "Failed to discard staged media");
        }
    }
}
