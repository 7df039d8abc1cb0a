//! Delete Post Use Case
//!
//! The lookup filters by post id AND author id, so an absent post and a
//! non-author caller produce the same not-found answer. Media cleanup is
//! best-effort: a storage failure is logged and the deletion still counts.

use std::sync::Arc;

use identity::domain::value_object::user_id::UserId;
use kernel::id::PostId;
use platform::storage::MediaStorage;

use crate::domain::repository::PostRepository;
use crate::error::{FeedError, FeedResult};

/// Delete post use case
pub struct DeletePostUseCase<P, S>
where
    P: PostRepository,
    S: MediaStorage,
{
    posts: Arc<P>,
    storage: Arc<S>,
}

impl<P, S> DeletePostUseCase<P, S>
where
    P: PostRepository,
    S: MediaStorage,
{
    pub fn new(posts: Arc<P>, storage: Arc<S>) -> Self {
        Self { posts, storage }
    }

    pub async fn execute(&self, post_id: &PostId, user_id: &UserId) -> FeedResult<()> {
        let deleted = self
            .posts
            .delete_by_author(post_id, user_id)
            .await?
            .ok_or(FeedError::NotFoundOrNotAuthor)?;

        if let Some(handle) = &deleted.media_handle
            && let Err(e) = self.storage.delete(handle).await
        {
            tracing::warn!(
                post_id = %post_id,
                handle = %handle,
                error = %e,
                "Failed to delete media for removed post"
            );
        }

        tracing::info!(post_id = %post_id, author_id = %user_id, "Post deleted");

        Ok(())
    }
}
