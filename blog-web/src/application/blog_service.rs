use std::sync::Arc;

use chrono::Local;
use tracing::info;

use crate::application::guard::SessionGuard;
use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostDraft, UpdatePostRequest, format_post_date};
use crate::domain::session::SessionToken;

pub(crate) struct BlogService<R: PostRepository, G: SessionGuard> {
    repo: R,
    guard: Arc<G>,
}

impl<R: PostRepository, G: SessionGuard> BlogService<R, G> {
    pub(crate) fn new(repo: R, guard: Arc<G>) -> Self {
        Self { repo, guard }
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.repo.list_posts().await
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        self.repo.get_post(id).await
    }

    pub(crate) async fn create_post(
        &self,
        session: Option<&SessionToken>,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        let admin = self.guard.require_admin(session).await?;
        let draft = draft.validate()?;

        if self.repo.find_by_title(&draft.title).await?.is_some() {
            return Err(DomainError::DuplicateTitle);
        }

        let new_post = NewPost {
            draft,
            date: format_post_date(Local::now().date_naive()),
            author_id: admin.id(),
        };
        let post = self.repo.create_post(new_post).await?;
        info!(post_id = post.id, author = %admin.user().name, "post created");
        Ok(post)
    }

    pub(crate) async fn update_post(
        &self,
        session: Option<&SessionToken>,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let admin = self.guard.require_admin(session).await?;
        let req = req.validate()?;

        if self.repo.get_post(post_id).await?.is_none() {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }
        if let Some(existing) = self.repo.find_by_title(&req.draft.title).await?
            && existing.id != post_id
        {
            return Err(DomainError::DuplicateTitle);
        }

        let patch = PostPatch {
            draft: req.draft,
            author_id: req.author_id,
        };
        let post = self
            .repo
            .update_post(post_id, patch)
            .await?
            .ok_or(DomainError::NotFound(format!("post id: {post_id}")))?;
        info!(post_id, editor_id = admin.id(), "post updated");
        Ok(post)
    }

    /// Any signed-in user may delete; the post's comments go with it.
    pub(crate) async fn delete_post(
        &self,
        session: Option<&SessionToken>,
        post_id: i64,
    ) -> Result<(), DomainError> {
        let user = self.guard.require_user(session).await?;

        let deleted = self.repo.delete_post(post_id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }
        info!(post_id, user_id = user.id, "post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Local;

    use super::BlogService;
    use crate::application::guard::SessionGuard;
    use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
    use crate::domain::error::DomainError;
    use crate::domain::post::{Post, PostDraft, UpdatePostRequest, format_post_date};
    use crate::domain::session::SessionToken;
    use crate::domain::user::{Role, User};

    /// Resolves any token to a fixed user.
    struct FakeGuard {
        user: Option<User>,
    }

    #[async_trait]
    impl SessionGuard for FakeGuard {
        async fn current_user(
            &self,
            session: Option<&SessionToken>,
        ) -> Result<Option<User>, DomainError> {
            Ok(session.and_then(|_| self.user.clone()))
        }
    }

    #[derive(Clone, Default)]
    struct FakePostRepo {
        posts: Arc<Mutex<Vec<Post>>>,
        created_input: Arc<Mutex<Option<NewPost>>>,
        update_call: Arc<Mutex<Option<(i64, PostPatch)>>>,
    }

    impl FakePostRepo {
        fn count(&self) -> usize {
            self.posts.lock().expect("posts mutex poisoned").len()
        }
    }

    #[async_trait]
    impl PostRepository for FakePostRepo {
        async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created_input mutex poisoned") = Some(input.clone());
            let mut posts = self.posts.lock().expect("posts mutex poisoned");
            let post = Post::new(
                posts.len() as i64 + 1,
                input.draft,
                input.date,
                input.author_id,
                "Ada",
            )?;
            posts.push(post.clone());
            Ok(post)
        }

        async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
            Ok(self
                .posts
                .lock()
                .expect("posts mutex poisoned")
                .iter()
                .find(|post| post.id == id)
                .cloned())
        }

        async fn find_by_title(&self, title: &str) -> Result<Option<Post>, DomainError> {
            Ok(self
                .posts
                .lock()
                .expect("posts mutex poisoned")
                .iter()
                .find(|post| post.title == title)
                .cloned())
        }

        async fn update_post(
            &self,
            id: i64,
            patch: PostPatch,
        ) -> Result<Option<Post>, DomainError> {
            *self
                .update_call
                .lock()
                .expect("update_call mutex poisoned") = Some((id, patch.clone()));
            let mut posts = self.posts.lock().expect("posts mutex poisoned");
            let Some(post) = posts.iter_mut().find(|post| post.id == id) else {
                return Ok(None);
            };
            post.title = patch.draft.title;
            post.author_id = patch.author_id;
            Ok(Some(post.clone()))
        }

        async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
            let mut posts = self.posts.lock().expect("posts mutex poisoned");
            let before = posts.len();
            posts.retain(|post| post.id != id);
            Ok(posts.len() < before)
        }

        async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
            Ok(self.posts.lock().expect("posts mutex poisoned").clone())
        }
    }

    fn admin() -> User {
        User::new(1, "Ada", "ada@example.com", Role::Admin).expect("valid user")
    }

    fn member() -> User {
        User::new(2, "Bob", "bob@example.com", Role::Member).expect("valid user")
    }

    fn service(repo: FakePostRepo, user: Option<User>) -> BlogService<FakePostRepo, FakeGuard> {
        BlogService::new(repo, Arc::new(FakeGuard { user }))
    }

    fn token() -> SessionToken {
        SessionToken::new("token")
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            subtitle: "subtitle".to_string(),
            body: "body".to_string(),
            img_url: "https://example.com/cover.png".to_string(),
        }
    }

    #[tokio::test]
    async fn admin_creates_post_with_server_side_date_and_author() {
        let repo = FakePostRepo::default();
        let service = service(repo.clone(), Some(admin()));

        let created = service
            .create_post(Some(&token()), draft("  Hello  "))
            .await
            .expect("create_post must succeed");

        assert_eq!(created.title, "Hello");
        let input = repo
            .created_input
            .lock()
            .expect("created_input mutex poisoned")
            .clone()
            .expect("repo input must be captured");
        assert_eq!(input.author_id, 1);
        assert_eq!(input.date, format_post_date(Local::now().date_naive()));
    }

    #[tokio::test]
    async fn member_cannot_create_and_nothing_is_stored() {
        let repo = FakePostRepo::default();
        let service = service(repo.clone(), Some(member()));

        let err = service
            .create_post(Some(&token()), draft("Hello"))
            .await
            .expect_err("member must be forbidden");

        assert!(matches!(err, DomainError::Forbidden));
        assert_eq!(repo.count(), 0);
        assert!(
            repo.created_input
                .lock()
                .expect("created_input mutex poisoned")
                .is_none()
        );
    }

    #[tokio::test]
    async fn anonymous_cannot_create() {
        let repo = FakePostRepo::default();
        let service = service(repo.clone(), Some(admin()));

        let err = service
            .create_post(None, draft("Hello"))
            .await
            .expect_err("anonymous must be forbidden");
        assert!(matches!(err, DomainError::Forbidden));
        assert_eq!(repo.count(), 0);
    }

    #[tokio::test]
    async fn duplicate_title_leaves_post_count_unchanged() {
        let repo = FakePostRepo::default();
        let service = service(repo.clone(), Some(admin()));
        service
            .create_post(Some(&token()), draft("Hello"))
            .await
            .expect("first create");

        let err = service
            .create_post(Some(&token()), draft("Hello"))
            .await
            .expect_err("duplicate must fail");

        assert!(matches!(err, DomainError::DuplicateTitle));
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn update_passes_fields_and_author_to_repo() {
        let repo = FakePostRepo::default();
        let service = service(repo.clone(), Some(admin()));
        let post = service
            .create_post(Some(&token()), draft("Hello"))
            .await
            .expect("create");

        let updated = service
            .update_post(
                Some(&token()),
                post.id,
                UpdatePostRequest {
                    draft: draft("  Hello again "),
                    author_id: 2,
                },
            )
            .await
            .expect("update must succeed");
        assert_eq!(updated.title, "Hello again");

        let (id, patch) = repo
            .update_call
            .lock()
            .expect("update_call mutex poisoned")
            .clone()
            .expect("update call must be captured");
        assert_eq!(id, post.id);
        assert_eq!(patch.author_id, 2);
        assert_eq!(patch.draft.title, "Hello again");
    }

    #[tokio::test]
    async fn update_keeps_own_title_but_rejects_anothers() {
        let repo = FakePostRepo::default();
        let service = service(repo, Some(admin()));
        let first = service
            .create_post(Some(&token()), draft("First"))
            .await
            .expect("create");
        service
            .create_post(Some(&token()), draft("Second"))
            .await
            .expect("create");

        let same = UpdatePostRequest {
            draft: draft("First"),
            author_id: 1,
        };
        service
            .update_post(Some(&token()), first.id, same)
            .await
            .expect("keeping the title is fine");

        let clash = UpdatePostRequest {
            draft: draft("Second"),
            author_id: 1,
        };
        let err = service
            .update_post(Some(&token()), first.id, clash)
            .await
            .expect_err("clash must fail");
        assert!(matches!(err, DomainError::DuplicateTitle));
    }

    #[tokio::test]
    async fn update_of_missing_post_is_not_found() {
        let service = service(FakePostRepo::default(), Some(admin()));

        let err = service
            .update_post(
                Some(&token()),
                42,
                UpdatePostRequest {
                    draft: draft("Nope"),
                    author_id: 1,
                },
            )
            .await
            .expect_err("post must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_of_missing_post_wins_over_title_clash() {
        let repo = FakePostRepo::default();
        let service = service(repo.clone(), Some(admin()));
        service
            .create_post(Some(&token()), draft("Taken"))
            .await
            .expect("create");

        let err = service
            .update_post(
                Some(&token()),
                99,
                UpdatePostRequest {
                    draft: draft("Taken"),
                    author_id: 1,
                },
            )
            .await
            .expect_err("post must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(
            repo.update_call
                .lock()
                .expect("update_call mutex poisoned")
                .is_none()
        );
    }

    #[tokio::test]
    async fn member_may_delete_but_anonymous_may_not() {
        let repo = FakePostRepo::default();
        let post = service(repo.clone(), Some(admin()))
            .create_post(Some(&token()), draft("Hello"))
            .await
            .expect("create");

        let as_member = service(repo.clone(), Some(member()));
        let err = as_member
            .delete_post(None, post.id)
            .await
            .expect_err("anonymous must be rejected");
        assert!(matches!(err, DomainError::Unauthenticated));
        assert_eq!(repo.count(), 1);

        as_member
            .delete_post(Some(&token()), post.id)
            .await
            .expect("member delete");
        assert_eq!(repo.count(), 0);

        let err = as_member
            .delete_post(Some(&token()), post.id)
            .await
            .expect_err("second delete must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
