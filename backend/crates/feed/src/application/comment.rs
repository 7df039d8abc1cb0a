//! Add Comment Use Case

use std::sync::Arc;

use identity::domain::repository::UserRepository;
use identity::domain::value_object::user_id::UserId;
use kernel::id::PostId;

use crate::domain::entity::post::{Comment, CommentAuthor, Post};
use crate::domain::repository::PostRepository;
use crate::error::{FeedError, FeedResult};

/// Add comment use case
pub struct AddCommentUseCase<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    posts: Arc<P>,
    users: Arc<U>,
}

impl<P, U> AddCommentUseCase<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    pub fn new(posts: Arc<P>, users: Arc<U>) -> Self {
        Self { posts, users }
    }

    pub async fn execute(
        &self,
        post_id: &PostId,
        user_id: &UserId,
        content: &str,
    ) -> FeedResult<Post> {
        let content = content.trim();
        if content.is_empty() {
            return Err(FeedError::Validation(
                "Comment content is required".to_string(),
            ));
        }

        // Commenting user resolved for the snapshot
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| FeedError::Internal(e.to_string()))?
            .ok_or(FeedError::UserNotFound)?;

        let author = CommentAuthor {
            id: user.user_id,
            name: user.name.clone(),
            username: user.username.as_str().to_string(),
        };

        let post = self
            .posts
            .add_comment(post_id, Comment::new(author, content))
            .await?
            .ok_or(FeedError::PostNotFound)?;

        tracing::debug!(post_id = %post.post_id, user_id = %user_id, "Comment added");

        Ok(post)
    }
}
