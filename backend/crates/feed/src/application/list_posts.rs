//! List User Posts Use Case

use std::sync::Arc;

use identity::domain::value_object::user_id::UserId;

use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::error::FeedResult;

/// List user posts use case
pub struct ListUserPostsUseCase<P>
where
    P: PostRepository,
{
    posts: Arc<P>,
}

impl<P> ListUserPostsUseCase<P>
where
    P: PostRepository,
{
    pub fn new(posts: Arc<P>) -> Self {
        Self { posts }
    }

    /// The author's posts, newest first
    pub async fn execute(&self, author_id: &UserId) -> FeedResult<Vec<Post>> {
        self.posts.list_by_author(author_id).await
    }
}
