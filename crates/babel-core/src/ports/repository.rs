use async_trait::async_trait;

use crate::domain::Post;
use crate::error::RepoError;

/// Generic repository trait defining the record store operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Fails with `RepoError::Constraint` if the key is taken.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, String> {
    /// Up to `take` posts ordered newest first (`created_at` desc, then `id` desc).
    ///
    /// With a cursor the window starts at the cursor post itself. An unknown
    /// cursor yields an empty window.
    async fn find_page(&self, cursor: Option<&str>, take: u64) -> Result<Vec<Post>, RepoError>;
}
