//! Toggle Like Use Case

use std::sync::Arc;

use identity::domain::value_object::user_id::UserId;
use kernel::id::PostId;

use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::error::{FeedError, FeedResult};

/// Toggle like use case
pub struct ToggleLikeUseCase<P>
where
    P: PostRepository,
{
    posts: Arc<P>,
}

impl<P> ToggleLikeUseCase<P>
where
    P: PostRepository,
{
    pub fn new(posts: Arc<P>) -> Self {
        Self { posts }
    }

    /// Like if not yet liked, unlike otherwise
    pub async fn execute(&self, post_id: &PostId, user_id: &UserId) -> FeedResult<Post> {
        let post = self
            .posts
            .toggle_like(post_id, user_id)
            .await?
            .ok_or(FeedError::PostNotFound)?;

        tracing::debug!(
            post_id = %post.post_id,
            user_id = %user_id,
            liked = post.likes.contains(user_id),
            "Like toggled"
        );

        Ok(post)
    }
}
