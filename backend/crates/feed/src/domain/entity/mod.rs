//! Domain Entities

pub mod post;

pub use post::{AuthorSnapshot, Comment, CommentAuthor, Post, Repost};
