//! Post Aggregate
//!
//! A post owns its likes, comments, and shares. Author fields on the post
//! and on each comment are value copies taken at write time, not live
//! references: they do not follow later profile changes. Engagement counts
//! are derived from the embedded collections, never stored.

use chrono::{DateTime, Utc};
use identity::domain::value_object::user_id::UserId;
use kernel::id::{CommentId, PostId};

/// Author identity captured when the post is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSnapshot {
    pub id: UserId,
    pub name: String,
    pub username: String,
    /// Kept for the stored record, never rendered
    pub email: String,
}

/// Author identity captured when a comment is appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentAuthor {
    pub id: UserId,
    pub name: String,
    pub username: String,
}

/// A comment embedded in its post. Append-only, no independent lifecycle.
#[derive(Debug, Clone)]
pub struct Comment {
    pub comment_id: CommentId,
    pub content: String,
    pub author: CommentAuthor,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(author: CommentAuthor, content: impl Into<String>) -> Self {
        Self {
            comment_id: CommentId::new(),
            content: content.into().trim().to_string(),
            author,
            created_at: Utc::now(),
        }
    }
}

/// Point-in-time copy of another post, attached at creation.
/// Does not update if the original changes or is deleted.
#[derive(Debug, Clone)]
pub struct Repost {
    pub original_post_id: PostId,
    pub original_author: String,
    pub original_author_id: UserId,
    pub original_content: Option<String>,
    /// Resolved public URL at repost time
    pub original_media: Option<String>,
}

impl Repost {
    /// Snapshot an existing post, resolving its media handle to the
    /// given URL up front
    pub fn snapshot_of(original: &Post, original_media_url: Option<String>) -> Self {
        Self {
            original_post_id: original.post_id,
            original_author: original.author.name.clone(),
            original_author_id: original.author.id,
            original_content: original.content.clone(),
            original_media: original_media_url,
        }
    }
}

/// Post aggregate root
#[derive(Debug, Clone)]
pub struct Post {
    pub post_id: PostId,
    pub content: Option<String>,
    pub author: AuthorSnapshot,
    /// Liking user ids, set semantics, insertion order
    pub likes: Vec<UserId>,
    pub comments: Vec<Comment>,
    /// Sharing user ids, set semantics, insertion order
    pub shares: Vec<UserId>,
    /// Opaque storage handle, resolved to a URL at render time
    pub media_handle: Option<String>,
    pub repost: Option<Repost>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a post with empty engagement collections
    pub fn new(
        author: AuthorSnapshot,
        content: Option<String>,
        media_handle: Option<String>,
        repost: Option<Repost>,
    ) -> Self {
        let now = Utc::now();

        Self {
            post_id: PostId::new(),
            content: content
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            author,
            likes: Vec::new(),
            comments: Vec::new(),
            shares: Vec::new(),
            media_handle,
            repost,
            created_at: now,
            updated_at: now,
        }
    }

    /// Idempotent like toggle. Returns `true` if the user likes the post
    /// after the call.
    pub fn toggle_like(&mut self, user_id: UserId) -> bool {
        match self.likes.iter().position(|id| *id == user_id) {
            Some(index) => {
                self.likes.remove(index);
                false
            }
            None => {
                self.likes.push(user_id);
                true
            }
        }
    }

    /// Append a comment with the current timestamp
    pub fn add_comment(&mut self, author: CommentAuthor, content: impl Into<String>) {
        self.comments.push(Comment::new(author, content));
        self.touch();
    }

    /// Add-once share. Returns `false` if the user already shared this post.
    pub fn add_share(&mut self, user_id: UserId) -> bool {
        if self.shares.contains(&user_id) {
            return false;
        }
        self.shares.push(user_id);
        self.touch();
        true
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
