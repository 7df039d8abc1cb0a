//! Unit tests for Feed crate
//! Use cases run against in-memory repositories and storage.

#[cfg(test)]
mod support {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};

    use identity::domain::entity::user::User;
    use identity::domain::repository::{ConflictField, UserRepository};
    use identity::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
    use identity::error::IdentityResult;
    use kernel::id::PostId;
    use platform::password::HashedPassword;
    use platform::storage::{MediaStorage, MediaUpload, StorageError, StoredMedia};

    use crate::domain::entity::post::{Comment, Post};
    use crate::domain::repository::{PostRepository, ShareOutcome};
    use crate::error::FeedResult;

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    #[derive(Default)]
    pub struct MemUserRepository {
        pub users: Mutex<Vec<(User, HashedPassword)>>,
    }

    impl MemUserRepository {
        pub async fn seed(&self, email: &str, username: &str, name: &str) -> User {
            let user = User::new(
                Email::new(email).unwrap(),
                UserName::new(username).unwrap(),
                name,
            );
            let hash = platform::password::ClearTextPassword::new("a decent password".to_string())
                .unwrap()
                .hash(None)
                .unwrap();
            self.create(&user, &hash).await.unwrap();
            user
        }
    }

    impl UserRepository for MemUserRepository {
        async fn create(&self, user: &User, password_hash: &HashedPassword) -> IdentityResult<()> {
            self.users
                .lock()
                .unwrap()
                .push((user.clone(), password_hash.clone()));
            Ok(())
        }

        async fn find_by_id(&self, user_id: &UserId) -> IdentityResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|(u, _)| u.user_id == *user_id)
                .map(|(u, _)| u.clone()))
        }

        async fn find_for_login(
            &self,
            email: &Email,
        ) -> IdentityResult<Option<(User, HashedPassword)>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|(u, _)| u.email == *email)
                .cloned())
        }

        async fn find_conflict(
            &self,
            email: &Email,
            username: &UserName,
        ) -> IdentityResult<Option<ConflictField>> {
            let users = self.users.lock().unwrap();
            if users.iter().any(|(u, _)| u.email == *email) {
                return Ok(Some(ConflictField::Email));
            }
            if users.iter().any(|(u, _)| u.username == *username) {
                return Ok(Some(ConflictField::Username));
            }
            Ok(None)
        }

        async fn set_biometric_key(
            &self,
            user_id: &UserId,
            _public_key: &str,
        ) -> IdentityResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|(u, _)| u.user_id == *user_id)
                .map(|(u, _)| u.clone()))
        }
    }

    // ------------------------------------------------------------------
    // Posts
    // ------------------------------------------------------------------

    #[derive(Default)]
    pub struct MemPostRepository {
        pub posts: Mutex<Vec<Post>>,
    }

    impl PostRepository for MemPostRepository {
        async fn create(&self, post: &Post) -> FeedResult<()> {
            self.posts.lock().unwrap().push(post.clone());
            Ok(())
        }

        async fn find_by_id(&self, post_id: &PostId) -> FeedResult<Option<Post>> {
            Ok(self
                .posts
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.post_id == *post_id)
                .cloned())
        }

        async fn list_by_author(&self, author_id: &UserId) -> FeedResult<Vec<Post>> {
            let mut posts: Vec<Post> = self
                .posts
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.author.id == *author_id)
                .cloned()
                .collect();
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(posts)
        }

        async fn toggle_like(
            &self,
            post_id: &PostId,
            user_id: &UserId,
        ) -> FeedResult<Option<Post>> {
            let mut posts = self.posts.lock().unwrap();
            Ok(posts.iter_mut().find(|p| p.post_id == *post_id).map(|p| {
                p.toggle_like(*user_id);
                p.touch();
                p.clone()
            }))
        }

        async fn add_comment(
            &self,
            post_id: &PostId,
            comment: Comment,
        ) -> FeedResult<Option<Post>> {
            let mut posts = self.posts.lock().unwrap();
            Ok(posts.iter_mut().find(|p| p.post_id == *post_id).map(|p| {
                p.comments.push(comment);
                p.touch();
                p.clone()
            }))
        }

        async fn add_share(
            &self,
            post_id: &PostId,
            user_id: &UserId,
        ) -> FeedResult<Option<ShareOutcome>> {
            let mut posts = self.posts.lock().unwrap();
            Ok(posts.iter_mut().find(|p| p.post_id == *post_id).map(|p| {
                if p.add_share(*user_id) {
                    ShareOutcome::Shared(p.clone())
                } else {
                    ShareOutcome::AlreadyShared
                }
            }))
        }

        async fn delete_by_author(
            &self,
            post_id: &PostId,
            author_id: &UserId,
        ) -> FeedResult<Option<Post>> {
            let mut posts = self.posts.lock().unwrap();
            let index = posts
                .iter()
                .position(|p| p.post_id == *post_id && p.author.id == *author_id);
            Ok(index.map(|i| posts.remove(i)))
        }
    }

    // ------------------------------------------------------------------
    // Storage
    // ------------------------------------------------------------------

    #[derive(Default)]
    pub struct MemMediaStorage {
        pub objects: Mutex<HashMap<String, Vec<u8>>>,
        counter: AtomicU64,
    }

    impl MemMediaStorage {
        pub fn object_count(&self) -> usize {
            self.objects.lock().unwrap().len()
        }
    }

    impl MediaStorage for MemMediaStorage {
        async fn store(&self, upload: MediaUpload) -> Result<StoredMedia, StorageError> {
            if !platform::storage::is_allowed_media_type(&upload.content_type) {
                return Err(StorageError::UnsupportedMediaType(upload.content_type));
            }
            let handle = format!(
                "{}-{}",
                self.counter.fetch_add(1, Ordering::Relaxed),
                upload.file_name
            );
            self.objects
                .lock()
                .unwrap()
                .insert(handle.clone(), upload.bytes);
            Ok(StoredMedia { handle })
        }

        async fn delete(&self, handle: &str) -> Result<(), StorageError> {
            self.objects
                .lock()
                .unwrap()
                .remove(handle)
                .map(|_| ())
                .ok_or(StorageError::InvalidHandle)
        }

        fn public_url(&self, handle: &str) -> String {
            format!("http://test/uploads/{handle}")
        }
    }

    pub fn png_upload(name: &str) -> MediaUpload {
        MediaUpload {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        }
    }
}

#[cfg(test)]
mod create_post_tests {
    use std::sync::Arc;

    use crate::application::{CreatePostInput, CreatePostUseCase};
    use crate::error::FeedError;
    use identity::domain::value_object::user_id::UserId;

    use super::support::{MemMediaStorage, MemPostRepository, MemUserRepository, png_upload};

    fn empty_input() -> CreatePostInput {
        CreatePostInput {
            content: None,
            media: None,
            repost_of: None,
        }
    }

    #[tokio::test]
    async fn test_create_requires_content_or_media() {
        let posts = Arc::new(MemPostRepository::default());
        let users = Arc::new(MemUserRepository::default());
        let storage = Arc::new(MemMediaStorage::default());
        let author = users.seed("a@x.com", "alice", "Alice").await;

        let use_case = CreatePostUseCase::new(posts, users, storage);

        let err = use_case
            .execute(&author.user_id, empty_input())
            .await
            .unwrap_err();
        match err {
            FeedError::Validation(msg) => {
                assert_eq!(msg, "Post content or media is required")
            }
            other => panic!("expected Validation, got {other:?}"),
        }

        // Blank content alone is still empty
        let err = use_case
            .execute(
                &author.user_id,
                CreatePostInput {
                    content: Some("   ".to_string()),
                    ..empty_input()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_captures_author_snapshot() {
        let posts = Arc::new(MemPostRepository::default());
        let users = Arc::new(MemUserRepository::default());
        let storage = Arc::new(MemMediaStorage::default());
        let author = users.seed("a@x.com", "alice", "Alice").await;

        let post = CreatePostUseCase::new(posts.clone(), users, storage)
            .execute(
                &author.user_id,
                CreatePostInput {
                    content: Some("hello".to_string()),
                    ..empty_input()
                },
            )
            .await
            .unwrap();

        assert_eq!(post.author.id, author.user_id);
        assert_eq!(post.author.name, "Alice");
        assert_eq!(post.author.username, "alice");
        assert!(post.likes.is_empty());
        assert!(post.comments.is_empty());
        assert!(post.shares.is_empty());
        assert_eq!(posts.posts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_stores_media() {
        let posts = Arc::new(MemPostRepository::default());
        let users = Arc::new(MemUserRepository::default());
        let storage = Arc::new(MemMediaStorage::default());
        let author = users.seed("a@x.com", "alice", "Alice").await;

        let post = CreatePostUseCase::new(posts, users, storage.clone())
            .execute(
                &author.user_id,
                CreatePostInput {
                    media: Some(png_upload("cat.png")),
                    ..empty_input()
                },
            )
            .await
            .unwrap();

        let handle = post.media_handle.expect("media handle");
        assert!(storage.objects.lock().unwrap().contains_key(&handle));
    }

    #[tokio::test]
    async fn test_create_discards_staged_media_for_unknown_author() {
        let posts = Arc::new(MemPostRepository::default());
        let users = Arc::new(MemUserRepository::default());
        let storage = Arc::new(MemMediaStorage::default());

        let err = CreatePostUseCase::new(posts.clone(), users, storage.clone())
            .execute(
                &UserId::new(),
                CreatePostInput {
                    media: Some(png_upload("cat.png")),
                    ..empty_input()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, FeedError::UserNotFound));
        // Compensating delete removed the staged object
        assert_eq!(storage.object_count(), 0);
        assert!(posts.posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_repost_snapshots_original() {
        let posts = Arc::new(MemPostRepository::default());
        let users = Arc::new(MemUserRepository::default());
        let storage = Arc::new(MemMediaStorage::default());
        let alice = users.seed("a@x.com", "alice", "Alice").await;
        let bob = users.seed("b@x.com", "bob", "Bob").await;

        let use_case = CreatePostUseCase::new(posts, users, storage);

        let original = use_case
            .execute(
                &alice.user_id,
                CreatePostInput {
                    content: Some("original".to_string()),
                    media: Some(png_upload("cat.png")),
                    repost_of: None,
                },
            )
            .await
            .unwrap();

        let repost = use_case
            .execute(
                &bob.user_id,
                CreatePostInput {
                    content: Some("look at this".to_string()),
                    media: None,
                    repost_of: Some(original.post_id.to_string()),
                },
            )
            .await
            .unwrap();

        let snapshot = repost.repost.expect("repost payload");
        assert_eq!(snapshot.original_post_id, original.post_id);
        assert_eq!(snapshot.original_author, "Alice");
        assert_eq!(snapshot.original_author_id, alice.user_id);
        assert_eq!(snapshot.original_content.as_deref(), Some("original"));
        // Media resolved to a URL at snapshot time
        let url = snapshot.original_media.expect("original media url");
        assert!(url.starts_with("http://test/uploads/"));
    }

    #[tokio::test]
    async fn test_create_repost_of_missing_post() {
        let posts = Arc::new(MemPostRepository::default());
        let users = Arc::new(MemUserRepository::default());
        let storage = Arc::new(MemMediaStorage::default());
        let author = users.seed("a@x.com", "alice", "Alice").await;

        let use_case = CreatePostUseCase::new(posts, users, storage.clone());

        let err = use_case
            .execute(
                &author.user_id,
                CreatePostInput {
                    content: None,
                    media: Some(png_upload("cat.png")),
                    repost_of: Some(uuid::Uuid::new_v4().to_string()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::PostNotFound));
        assert_eq!(storage.object_count(), 0);

        let err = use_case
            .execute(
                &author.user_id,
                CreatePostInput {
                    content: Some("x".to_string()),
                    media: None,
                    repost_of: Some("not-a-uuid".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::InvalidPostId));
    }
}

#[cfg(test)]
mod engagement_tests {
    use std::sync::Arc;

    use crate::application::{
        AddCommentUseCase, CreatePostInput, CreatePostUseCase, SharePostUseCase,
        ToggleLikeUseCase,
    };
    use crate::domain::entity::post::Post;
    use crate::error::FeedError;
    use identity::domain::entity::user::User;
    use kernel::id::PostId;

    use super::support::{MemMediaStorage, MemPostRepository, MemUserRepository};

    async fn seeded() -> (Arc<MemPostRepository>, Arc<MemUserRepository>, User, Post) {
        let posts = Arc::new(MemPostRepository::default());
        let users = Arc::new(MemUserRepository::default());
        let storage = Arc::new(MemMediaStorage::default());
        let author = users.seed("a@x.com", "alice", "Alice").await;

        let post = CreatePostUseCase::new(posts.clone(), users.clone(), storage)
            .execute(
                &author.user_id,
                CreatePostInput {
                    content: Some("hello".to_string()),
                    media: None,
                    repost_of: None,
                },
            )
            .await
            .unwrap();

        (posts, users, author, post)
    }

    #[tokio::test]
    async fn test_like_toggle_is_idempotent() {
        let (posts, _, author, post) = seeded().await;
        let use_case = ToggleLikeUseCase::new(posts);

        let liked = use_case.execute(&post.post_id, &author.user_id).await.unwrap();
        assert_eq!(liked.likes, vec![author.user_id]);

        let unliked = use_case.execute(&post.post_id, &author.user_id).await.unwrap();
        assert!(unliked.likes.is_empty());
    }

    #[tokio::test]
    async fn test_like_missing_post() {
        let (posts, _, author, _) = seeded().await;

        let err = ToggleLikeUseCase::new(posts)
            .execute(&PostId::new(), &author.user_id)
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::PostNotFound));
    }

    #[tokio::test]
    async fn test_share_add_once() {
        let (posts, _, author, post) = seeded().await;
        let use_case = SharePostUseCase::new(posts);

        let shared = use_case.execute(&post.post_id, &author.user_id).await.unwrap();
        assert_eq!(shared.shares, vec![author.user_id]);

        let err = use_case
            .execute(&post.post_id, &author.user_id)
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::AlreadyShared));

        // Exactly one share recorded in total
        let again = use_case
            .execute(&post.post_id, &author.user_id)
            .await
            .unwrap_err();
        assert!(matches!(again, FeedError::AlreadyShared));
    }

    #[tokio::test]
    async fn test_comment_appends_with_snapshot() {
        let (posts, users, _, post) = seeded().await;
        let bob = users.seed("b@x.com", "bob", "Bob").await;

        let use_case = AddCommentUseCase::new(posts, users);
        let updated = use_case
            .execute(&post.post_id, &bob.user_id, "  hi  ")
            .await
            .unwrap();

        assert_eq!(updated.comments.len(), 1);
        assert_eq!(updated.comments[0].content, "hi");
        assert_eq!(updated.comments[0].author.id, bob.user_id);
        assert_eq!(updated.comments[0].author.name, "Bob");
    }

    #[tokio::test]
    async fn test_comment_requires_content() {
        let (posts, users, author, post) = seeded().await;

        let err = AddCommentUseCase::new(posts, users)
            .execute(&post.post_id, &author.user_id, "   ")
            .await
            .unwrap_err();
        match err {
            FeedError::Validation(msg) => assert_eq!(msg, "Comment content is required"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}

#[cfg(test)]
mod delete_tests {
    use std::sync::Arc;

    use crate::application::{CreatePostInput, CreatePostUseCase, DeletePostUseCase};
    use crate::domain::repository::PostRepository;
    use crate::error::FeedError;

    use super::support::{MemMediaStorage, MemPostRepository, MemUserRepository, png_upload};

    #[tokio::test]
    async fn test_non_author_delete_leaves_post() {
        let posts = Arc::new(MemPostRepository::default());
        let users = Arc::new(MemUserRepository::default());
        let storage = Arc::new(MemMediaStorage::default());
        let alice = users.seed("a@x.com", "alice", "Alice").await;
        let mallory = users.seed("m@x.com", "mallory", "Mallory").await;

        let post = CreatePostUseCase::new(posts.clone(), users, storage.clone())
            .execute(
                &alice.user_id,
                CreatePostInput {
                    content: Some("hello".to_string()),
                    media: None,
                    repost_of: None,
                },
            )
            .await
            .unwrap();

        let err = DeletePostUseCase::new(posts.clone(), storage)
            .execute(&post.post_id, &mallory.user_id)
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::NotFoundOrNotAuthor));

        // Post still retrievable afterward
        assert!(posts.find_by_id(&post.post_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_author_delete_removes_post_and_media() {
        let posts = Arc::new(MemPostRepository::default());
        let users = Arc::new(MemUserRepository::default());
        let storage = Arc::new(MemMediaStorage::default());
        let alice = users.seed("a@x.com", "alice", "Alice").await;

        let post = CreatePostUseCase::new(posts.clone(), users, storage.clone())
            .execute(
                &alice.user_id,
                CreatePostInput {
                    content: Some("hello".to_string()),
                    media: Some(png_upload("cat.png")),
                    repost_of: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(storage.object_count(), 1);

        DeletePostUseCase::new(posts.clone(), storage.clone())
            .execute(&post.post_id, &alice.user_id)
            .await
            .unwrap();

        assert!(posts.find_by_id(&post.post_id).await.unwrap().is_none());
        assert_eq!(storage.object_count(), 0);
    }
}

#[cfg(test)]
mod scenario_tests {
    use std::sync::Arc;

    use identity::application::config::IdentityConfig;
    use identity::application::login::{LoginInput, LoginUseCase};
    use identity::application::register::{RegisterInput, RegisterUseCase};
    use identity::application::token::TokenService;

    use crate::application::{
        CreatePostInput, CreatePostUseCase, DeletePostUseCase, ListUserPostsUseCase,
        SharePostUseCase, ToggleLikeUseCase,
    };
    use crate::error::FeedError;

    use super::support::{MemMediaStorage, MemPostRepository, MemUserRepository};

    /// register -> login -> post -> like -> unlike -> comment -> share -> delete
    #[tokio::test]
    async fn test_full_engagement_scenario() {
        let users = Arc::new(MemUserRepository::default());
        let posts = Arc::new(MemPostRepository::default());
        let storage = Arc::new(MemMediaStorage::default());
        let config = Arc::new(IdentityConfig::with_random_secret());

        // Register
        let registered = RegisterUseCase::new(users.clone(), config.clone())
            .execute(RegisterInput {
                email: "a@x.com".to_string(),
                password: "secret1".to_string(),
                name: "Alice".to_string(),
                username: "alice".to_string(),
            })
            .await
            .unwrap();
        let user_id = registered.user.user_id;

        // Login, token decodes to the same user id
        let login = LoginUseCase::new(users.clone(), config.clone())
            .execute(LoginInput {
                email: "a@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();
        let verified = TokenService::new(config).verify(&login.token).unwrap();
        assert_eq!(verified, user_id);

        // Create post
        let post = CreatePostUseCase::new(posts.clone(), users.clone(), storage.clone())
            .execute(
                &user_id,
                CreatePostInput {
                    content: Some("hello".to_string()),
                    media: None,
                    repost_of: None,
                },
            )
            .await
            .unwrap();
        assert!(post.likes.is_empty());
        assert!(post.comments.is_empty());

        // Like then unlike
        let like = ToggleLikeUseCase::new(posts.clone());
        let liked = like.execute(&post.post_id, &user_id).await.unwrap();
        assert_eq!(liked.likes, vec![user_id]);
        let unliked = like.execute(&post.post_id, &user_id).await.unwrap();
        assert!(unliked.likes.is_empty());

        // Comment
        let commented = crate::application::AddCommentUseCase::new(posts.clone(), users.clone())
            .execute(&post.post_id, &user_id, "hi")
            .await
            .unwrap();
        assert_eq!(commented.comments.len(), 1);
        assert_eq!(commented.comments[0].content, "hi");

        // Share once, second attempt rejected
        let share = SharePostUseCase::new(posts.clone());
        let shared = share.execute(&post.post_id, &user_id).await.unwrap();
        assert_eq!(shared.shares, vec![user_id]);
        assert!(matches!(
            share.execute(&post.post_id, &user_id).await.unwrap_err(),
            FeedError::AlreadyShared
        ));

        // Delete, then the post is gone from the author's list
        DeletePostUseCase::new(posts.clone(), storage)
            .execute(&post.post_id, &user_id)
            .await
            .unwrap();

        let remaining = ListUserPostsUseCase::new(posts)
            .execute(&user_id)
            .await
            .unwrap();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn test_my_posts_newest_first() {
        let users = Arc::new(MemUserRepository::default());
        let posts = Arc::new(MemPostRepository::default());
        let storage = Arc::new(MemMediaStorage::default());
        let alice = users.seed("a@x.com", "alice", "Alice").await;

        let create = CreatePostUseCase::new(posts.clone(), users, storage);
        for content in ["first", "second", "third"] {
            create
                .execute(
                    &alice.user_id,
                    CreatePostInput {
                        content: Some(content.to_string()),
                        media: None,
                        repost_of: None,
                    },
                )
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let listed = ListUserPostsUseCase::new(posts)
            .execute(&alice.user_id)
            .await
            .unwrap();

        let contents: Vec<_> = listed
            .iter()
            .map(|p| p.content.as_deref().unwrap())
            .collect();
        assert_eq!(contents, vec!["third", "second", "first"]);
    }
}
