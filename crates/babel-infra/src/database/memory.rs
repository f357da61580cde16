//! In-memory post store - used when no database is configured.

use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use babel_core::domain::Post;
use babel_core::error::RepoError;
use babel_core::ports::{BaseRepository, PostRepository};

/// In-memory post repository using a HashMap behind an async RwLock.
///
/// Orders and pages exactly like the PostgreSQL store.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<String, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, String> for InMemoryPostRepository {
    async fn find_by_id(&self, id: String) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;

        if posts.contains_key(&post.id) {
            return Err(RepoError::Constraint(format!(
                "post with id '{}' already exists",
                post.id
            )));
        }

        posts.insert(post.id.clone(), post.clone());
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_page(&self, cursor: Option<&str>, take: u64) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;

        let mut ordered: Vec<&Post> = posts.values().collect();
        ordered.sort_by_key(|p| Reverse((p.created_at, p.id.clone())));

        let start = match cursor {
            Some(cursor) => match ordered.iter().position(|p| p.id == cursor) {
                Some(index) => index,
                None => return Ok(Vec::new()),
            },
            None => 0,
        };

        let take = usize::try_from(take).unwrap_or(usize::MAX);
        Ok(ordered
            .into_iter()
            .skip(start)
            .take(take)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use async_trait::async_trait;
    use babel_core::PostService;
    use babel_core::domain::{NewPost, PageRequest, TRANSLATION_FAILED};
    use babel_core::error::{DomainError, TranslationError};
    use babel_core::ports::Translator;
    use chrono::{Duration, Utc};

    use super::*;
    use crate::translation::DisabledTranslator;

    struct UppercaseTranslator;

    #[async_trait]
    impl Translator for UppercaseTranslator {
        async fn translate(&self, text: &str) -> Result<String, TranslationError> {
            Ok(text.to_uppercase())
        }
    }

    /// Seeds posts whose `created_at` increases with their position in `ids`.
    async fn seeded(ids: &[&str]) -> Arc<InMemoryPostRepository> {
        let repo = Arc::new(InMemoryPostRepository::new());
        let base = Utc::now() - Duration::hours(1);
        for (i, id) in ids.iter().enumerate() {
            let mut post = Post::new(id.to_string(), format!("title {id}"), format!("text {id}"));
            post.created_at = base + Duration::seconds(i as i64);
            post.updated_at = post.created_at;
            repo.insert(post).await.unwrap();
        }
        repo
    }

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn find_page_is_newest_first_and_inclusive_of_cursor() {
        let repo = seeded(&["a", "b", "c", "d", "e"]).await;

        let first = repo.find_page(None, 3).await.unwrap();
        assert_eq!(ids(&first), vec!["e", "d", "c"]);

        let from_c = repo.find_page(Some("c"), 3).await.unwrap();
        assert_eq!(ids(&from_c), vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn unknown_cursor_yields_empty_window() {
        let repo = seeded(&["a", "b"]).await;
        assert!(repo.find_page(Some("zzz"), 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn equal_timestamps_are_ordered_by_id() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let at = Utc::now();
        for id in ["x", "z", "y"] {
            let mut post = Post::new(id.into(), "t".into(), "x".into());
            post.created_at = at;
            repo.insert(post).await.unwrap();
        }

        let window = repo.find_page(None, 10).await.unwrap();
        assert_eq!(ids(&window), vec!["z", "y", "x"]);
    }

    #[tokio::test]
    async fn duplicate_insert_is_a_constraint_error() {
        let repo = seeded(&["a"]).await;
        let clash = Post::new("a".into(), "other".into(), "other".into());

        let err = repo.insert(clash).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));

        let kept = repo.find_by_id("a".into()).await.unwrap().unwrap();
        assert_eq!(kept.title, "title a");
    }

    #[tokio::test]
    async fn two_item_pages_walk_the_example_store() {
        // a is the newest post, e the oldest
        let repo = seeded(&["e", "d", "c", "b", "a"]).await;
        let service = PostService::new(repo, Arc::new(DisabledTranslator));

        let first = service
            .list(&PageRequest::new(Some(2), None).unwrap())
            .await
            .unwrap();
        assert_eq!(ids(&first.items), vec!["b", "a"]);
        assert_eq!(first.next_cursor.as_deref(), Some("c"));

        let second = service
            .list(&PageRequest::new(Some(2), first.next_cursor).unwrap())
            .await
            .unwrap();
        assert_eq!(ids(&second.items), vec!["d", "c"]);
        assert_eq!(second.next_cursor.as_deref(), Some("e"));

        let third = service
            .list(&PageRequest::new(Some(2), second.next_cursor).unwrap())
            .await
            .unwrap();
        assert_eq!(ids(&third.items), vec!["e"]);
        assert_eq!(third.next_cursor, None);
    }

    #[tokio::test]
    async fn pagination_visits_every_post_exactly_once() {
        let all: Vec<String> = (0..23).map(|i| format!("post-{i:02}")).collect();
        let refs: Vec<&str> = all.iter().map(String::as_str).collect();
        let repo = seeded(&refs).await;
        let service = PostService::new(repo, Arc::new(DisabledTranslator));

        for limit in [1, 4, 7, 23, 100] {
            let mut seen = Vec::new();
            let mut cursor = None;
            let mut pages = 0;

            loop {
                let page = service
                    .list(&PageRequest::new(Some(limit), cursor).unwrap())
                    .await
                    .unwrap();
                assert!(page.items.len() as u64 <= limit);
                assert!(
                    page.items
                        .windows(2)
                        .all(|w| w[0].created_at <= w[1].created_at),
                    "items must be ascending within a page"
                );
                seen.extend(page.items.into_iter().map(|p| p.id));
                pages += 1;
                assert!(pages <= all.len() + 1, "pagination did not terminate");

                match page.next_cursor {
                    Some(next) => cursor = Some(next),
                    None => break,
                }
            }

            let unique: HashSet<_> = seen.iter().collect();
            assert_eq!(seen.len(), all.len(), "limit {limit}");
            assert_eq!(unique.len(), all.len(), "limit {limit}");
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips_through_the_store() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let service = PostService::new(repo.clone(), Arc::new(UppercaseTranslator));

        let created = service
            .create(NewPost::new(None, "hola".into(), "mundo".into()).unwrap())
            .await
            .unwrap();

        assert_eq!(created.title, "HOLA");
        assert_eq!(service.get_by_id(&created.id).await.unwrap(), created);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn create_without_translator_stores_sentinels() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let service = PostService::new(repo, Arc::new(DisabledTranslator));

        let created = service
            .create(NewPost::new(None, "hola".into(), "mundo".into()).unwrap())
            .await
            .unwrap();

        assert_eq!(created.title, TRANSLATION_FAILED);
        assert_eq!(created.text, TRANSLATION_FAILED);
    }

    #[tokio::test]
    async fn create_with_taken_id_does_not_overwrite() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let service = PostService::new(repo.clone(), Arc::new(UppercaseTranslator));
        let id = uuid::Uuid::new_v4().to_string();

        service
            .create(NewPost::new(Some(id.clone()), "one".into(), "first".into()).unwrap())
            .await
            .unwrap();
        let err = service
            .create(NewPost::new(Some(id.clone()), "two".into(), "second".into()).unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Persistence(RepoError::Constraint(_))));
        assert_eq!(service.get_by_id(&id).await.unwrap().text, "FIRST");
    }
}
