use std::sync::Arc;

use crate::domain::{NewPost, Page, PageRequest, Post, Translation, paginate};
use crate::error::DomainError;
use crate::ports::{PostRepository, Translator};

/// Post operations: listing, lookup, and translate-then-store creation.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    translator: Arc<dyn Translator>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, translator: Arc<dyn Translator>) -> Self {
        Self { posts, translator }
    }

    /// List one page of posts, oldest first within the page.
    pub async fn list(&self, request: &PageRequest) -> Result<Page<Post>, DomainError> {
        let rows = self
            .posts
            .find_page(request.cursor.as_deref(), request.take())
            .await?;

        let page = paginate(rows, request.limit, |post| post.id.clone());

        tracing::debug!(
            count = page.items.len(),
            has_more = page.next_cursor.is_some(),
            "Listed posts"
        );

        Ok(page)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id.to_string())
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity_type: "post",
                id: id.to_string(),
            })
    }

    /// Translate title and text, then store the post.
    ///
    /// Translation failures never fail the call: the affected field holds
    /// the sentinel text instead. Store failures are returned as-is.
    pub async fn create(&self, new_post: NewPost) -> Result<Post, DomainError> {
        let (text, title) = futures::join!(
            self.translator.translate(&new_post.text),
            self.translator.translate(&new_post.title),
        );
        let text = Translation::from_result("text", text);
        let title = Translation::from_result("title", title);

        let post = Post::new(
            new_post.id_or_generate(),
            title.into_content(),
            text.into_content(),
        );

        let saved = self.posts.insert(post).await?;
        tracing::info!(post_id = %saved.id, "Post created");

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::TRANSLATION_FAILED;
    use crate::error::{RepoError, TranslationError};
    use crate::ports::BaseRepository;

    #[derive(Default)]
    struct StubRepository {
        rows: Mutex<Vec<Post>>,
        last_take: Mutex<Option<u64>>,
    }

    #[async_trait]
    impl BaseRepository<Post, String> for StubRepository {
        async fn find_by_id(&self, id: String) -> Result<Option<Post>, RepoError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|p| p.id == id).cloned())
        }

        async fn insert(&self, post: Post) -> Result<Post, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|p| p.id == post.id) {
                return Err(RepoError::Constraint("posts_pkey".into()));
            }
            rows.push(post.clone());
            Ok(post)
        }
    }

    #[async_trait]
    impl PostRepository for StubRepository {
        async fn find_page(&self, _cursor: Option<&str>, take: u64) -> Result<Vec<Post>, RepoError> {
            *self.last_take.lock().unwrap() = Some(take);
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().take(take as usize).cloned().collect())
        }
    }

    struct EchoTranslator;

    #[async_trait]
    impl Translator for EchoTranslator {
        async fn translate(&self, text: &str) -> Result<String, TranslationError> {
            Ok(format!("es:{text}"))
        }
    }

    struct FailingTranslator;

    #[async_trait]
    impl Translator for FailingTranslator {
        async fn translate(&self, _text: &str) -> Result<String, TranslationError> {
            Err(TranslationError::EmptyResponse)
        }
    }

    struct BlankTranslator;

    #[async_trait]
    impl Translator for BlankTranslator {
        async fn translate(&self, _text: &str) -> Result<String, TranslationError> {
            Ok(String::new())
        }
    }

    /// Translates titles only; the text call fails.
    struct TitleOnlyTranslator;

    #[async_trait]
    impl Translator for TitleOnlyTranslator {
        async fn translate(&self, text: &str) -> Result<String, TranslationError> {
            if text.starts_with("Title") {
                Ok(text.replace("Title", "Título"))
            } else {
                Err(TranslationError::Api("rate limited".into()))
            }
        }
    }

    fn service(repo: Arc<StubRepository>, translator: impl Translator + 'static) -> PostService {
        PostService::new(repo, Arc::new(translator))
    }

    /// Posts newest first, `created_at` one minute apart.
    fn newest_first(ids: &[&str]) -> Vec<Post> {
        let base = Utc::now();
        ids.iter()
            .enumerate()
            .map(|(i, id)| {
                let mut post = Post::new(id.to_string(), format!("t{id}"), format!("x{id}"));
                post.created_at = base - Duration::minutes(i as i64);
                post.updated_at = post.created_at;
                post
            })
            .collect()
    }

    #[tokio::test]
    async fn list_requests_one_extra_row_and_holds_it_back() {
        let repo = Arc::new(StubRepository::default());
        *repo.rows.lock().unwrap() = newest_first(&["a", "b", "c", "d", "e"]);
        let service = service(repo.clone(), EchoTranslator);

        let request = PageRequest::new(Some(2), None).unwrap();
        let page = service.list(&request).await.unwrap();

        assert_eq!(*repo.last_take.lock().unwrap(), Some(3));
        let ids: Vec<_> = page.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(page.items[0].created_at < page.items[1].created_at);
        assert_eq!(page.next_cursor.as_deref(), Some("c"));
    }

    #[tokio::test]
    async fn get_by_id_returns_exact_post() {
        let repo = Arc::new(StubRepository::default());
        let posts = newest_first(&["a", "b"]);
        *repo.rows.lock().unwrap() = posts.clone();
        let service = service(repo, EchoTranslator);

        assert_eq!(service.get_by_id("b").await.unwrap(), posts[1]);
    }

    #[tokio::test]
    async fn get_by_id_unknown_is_not_found() {
        let service = service(Arc::new(StubRepository::default()), EchoTranslator);

        let err = service.get_by_id("missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id, .. } if id == "missing"));
    }

    #[tokio::test]
    async fn create_stores_translated_fields() {
        let repo = Arc::new(StubRepository::default());
        let service = service(repo.clone(), EchoTranslator);

        let new_post = NewPost::new(None, "Hello".into(), "World".into()).unwrap();
        let post = service.create(new_post).await.unwrap();

        assert_eq!(post.title, "es:Hello");
        assert_eq!(post.text, "es:World");
        assert_eq!(post.created_at, post.updated_at);
        assert_eq!(repo.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_with_failed_translations_stores_sentinels() {
        let service = service(Arc::new(StubRepository::default()), FailingTranslator);

        let new_post = NewPost::new(None, "Hello".into(), "World".into()).unwrap();
        let post = service.create(new_post).await.unwrap();

        assert_eq!(post.title, TRANSLATION_FAILED);
        assert_eq!(post.text, TRANSLATION_FAILED);
    }

    #[tokio::test]
    async fn create_with_blank_translations_stores_sentinels() {
        let service = service(Arc::new(StubRepository::default()), BlankTranslator);

        let new_post = NewPost::new(None, "Hello".into(), "World".into()).unwrap();
        let post = service.create(new_post).await.unwrap();

        assert_eq!(post.title, TRANSLATION_FAILED);
        assert_eq!(post.text, TRANSLATION_FAILED);

        let stored = service.get_by_id(&post.id).await.unwrap();
        assert!(!stored.title.is_empty() && !stored.text.is_empty());
    }

    #[tokio::test]
    async fn create_degrades_only_the_failed_field() {
        let service = service(Arc::new(StubRepository::default()), TitleOnlyTranslator);

        let new_post = NewPost::new(None, "Title one".into(), "body".into()).unwrap();
        let post = service.create(new_post).await.unwrap();

        assert_eq!(post.title, "Título one");
        assert_eq!(post.text, TRANSLATION_FAILED);
    }

    #[tokio::test]
    async fn create_with_taken_id_is_a_persistence_error() {
        let repo = Arc::new(StubRepository::default());
        let service = service(repo.clone(), EchoTranslator);
        let id = uuid::Uuid::new_v4().to_string();

        let first = NewPost::new(Some(id.clone()), "One".into(), "first".into()).unwrap();
        service.create(first).await.unwrap();

        let second = NewPost::new(Some(id.clone()), "Two".into(), "second".into()).unwrap();
        let err = service.create(second).await.unwrap_err();

        assert!(matches!(
            err,
            DomainError::Persistence(RepoError::Constraint(_))
        ));
        let rows = repo.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, "es:first");
    }
}
