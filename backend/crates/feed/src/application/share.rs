//! Share Post Use Case

use std::sync::Arc;

use identity::domain::value_object::user_id::UserId;
use kernel::id::PostId;

use crate::domain::entity::post::Post;
use crate::domain::repository::{PostRepository, ShareOutcome};
use crate::error::{FeedError, FeedResult};

/// Share post use case
pub struct SharePostUseCase<P>
where
    P: PostRepository,
{
    posts: Arc<P>,
}

impl<P> SharePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(posts: Arc<P>) -> Self {
        Self { posts }
    }

    /// Record a share once per user; a repeat is an error, not a no-op
    pub async fn execute(&self, post_id: &PostId, user_id: &UserId) -> FeedResult<Post> {
        match self.posts.add_share(post_id, user_id).await? {
            None => Err(FeedError::PostNotFound),
            Some(ShareOutcome::AlreadyShared) => Err(FeedError::AlreadyShared),
            Some(ShareOutcome::Shared(post)) => {
                tracing::debug!(post_id = %post.post_id, user_id = %user_id, "Post shared");
                Ok(post)
            }
        }
    }
}
