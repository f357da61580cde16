//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use babel_core::domain::Post;
use babel_core::error::RepoError;
use babel_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn find_page(&self, cursor: Option<&str>, take: u64) -> Result<Vec<Post>, RepoError> {
        let mut query = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .limit(take);

        if let Some(cursor) = cursor {
            let Some(anchor) = PostEntity::find_by_id(cursor.to_string())
                .one(&self.db)
                .await
                .map_err(map_db_err)?
            else {
                tracing::debug!(cursor, "Cursor matches no post");
                return Ok(Vec::new());
            };

            // Everything at or after the anchor in (created_at desc, id desc) order.
            query = query.filter(
                Condition::any()
                    .add(post::Column::CreatedAt.lt(anchor.created_at))
                    .add(
                        Condition::all()
                            .add(post::Column::CreatedAt.eq(anchor.created_at))
                            .add(post::Column::Id.lte(anchor.id)),
                    ),
            );
        }

        let rows = query.all(&self.db).await.map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
