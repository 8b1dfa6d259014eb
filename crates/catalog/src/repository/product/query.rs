use crate::abstract_trait::ProductQueryRepositoryTrait;
use crate::domain::requests::ProductListQuery;
use async_trait::async_trait;
use shared::config::ConnectionPool;
use shared::errors::RepositoryError;
use shared::model::Product as ProductModel;
use tracing::error;

pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(
        &self,
        filter: &ProductListQuery,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT product_id, name, description, price, category_id, created_at, updated_at
            FROM products
            WHERE ($1::BIGINT IS NULL OR category_id = $1)
              AND ($2::BIGINT IS NULL OR price = $2)
            ORDER BY name
            "#,
        )
        .bind(filter.category)
        .bind(filter.price)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to list products: {:?}", err);
            RepositoryError::from(err)
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ProductModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT product_id, name, description, price, category_id, created_at, updated_at
            FROM products
            WHERE product_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch product {}: {:?}", id, err);
            RepositoryError::from(err)
        })
    }

    async fn find_by_category_ids(
        &self,
        category_ids: &[i64],
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT product_id, name, description, price, category_id, created_at, updated_at
            FROM products
            WHERE category_id = ANY($1)
            ORDER BY name
            "#,
        )
        .bind(category_ids.to_vec())
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to list products by categories: {:?}", err);
            RepositoryError::from(err)
        })
    }
}
