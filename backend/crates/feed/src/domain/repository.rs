//! Repository Traits
//!
//! Interfaces for post persistence. Engagement mutations live behind the
//! repository so an implementation can serialize concurrent writers per
//! aggregate (the Postgres backend locks the row for the read-modify-write).

use identity::domain::value_object::user_id::UserId;
use kernel::id::PostId;

use crate::domain::entity::post::{Comment, Post};
use crate::error::FeedResult;

/// Result of a share attempt on an existing post
#[derive(Debug, Clone)]
pub enum ShareOutcome {
    /// Share recorded, updated aggregate returned
    Shared(Post),
    /// The user had already shared this post
    AlreadyShared,
}

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Persist a new aggregate
    async fn create(&self, post: &Post) -> FeedResult<()>;

    /// Find a post by ID
    async fn find_by_id(&self, post_id: &PostId) -> FeedResult<Option<Post>>;

    /// All posts by the given author, newest first
    async fn list_by_author(&self, author_id: &UserId) -> FeedResult<Vec<Post>>;

    /// Toggle the user's like, returning the updated aggregate
    /// (`None` if the post is absent)
    async fn toggle_like(&self, post_id: &PostId, user_id: &UserId)
    -> FeedResult<Option<Post>>;

    /// Append a comment, returning the updated aggregate
    async fn add_comment(&self, post_id: &PostId, comment: Comment)
    -> FeedResult<Option<Post>>;

    /// Record a share once per user
    async fn add_share(
        &self,
        post_id: &PostId,
        user_id: &UserId,
    ) -> FeedResult<Option<ShareOutcome>>;

    /// Delete the post only if `author_id` authored it, returning the
    /// deleted aggregate. Absent post and wrong author both yield `None`.
    async fn delete_by_author(
        &self,
        post_id: &PostId,
        author_id: &UserId,
    ) -> FeedResult<Option<Post>>;
}
