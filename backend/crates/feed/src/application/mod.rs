//! Application Layer
//!
//! One use case per engagement operation.

pub mod comment;
pub mod create_post;
pub mod delete_post;
pub mod like;
pub mod list_posts;
pub mod share;

pub use comment::AddCommentUseCase;
pub use create_post::{CreatePostInput, CreatePostUseCase};
pub use delete_post::DeletePostUseCase;
pub use like::ToggleLikeUseCase;
pub use list_posts::ListUserPostsUseCase;
pub use share::SharePostUseCase;
