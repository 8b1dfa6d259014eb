use crate::abstract_trait::CategoryQueryRepositoryTrait;
use async_trait::async_trait;
use shared::config::ConnectionPool;
use shared::errors::RepositoryError;
use shared::model::Category as CategoryModel;
use tracing::error;

pub struct CategoryQueryRepository {
    db: ConnectionPool,
}

impl CategoryQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryQueryRepositoryTrait for CategoryQueryRepository {
    async fn find_all(&self) -> Result<Vec<CategoryModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, CategoryModel>(
            r#"
            SELECT category_id, name
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to list categories: {:?}", err);
            RepositoryError::from(err)
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CategoryModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, CategoryModel>(
            r#"
            SELECT category_id, name
            FROM categories
            WHERE category_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch category {}: {:?}", id, err);
            RepositoryError::from(err)
        })
    }
}
