use crate::abstract_trait::CategoryCommandRepositoryTrait;
use crate::domain::requests::{CreateCategoryRequest, UpdateCategoryRequest};
use async_trait::async_trait;
use shared::config::ConnectionPool;
use shared::errors::RepositoryError;
use shared::model::Category as CategoryModel;
use tracing::{error, info};

pub struct CategoryCommandRepository {
    db: ConnectionPool,
}

impl CategoryCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryCommandRepositoryTrait for CategoryCommandRepository {
    async fn create(&self, req: &CreateCategoryRequest) -> Result<CategoryModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let category = sqlx::query_as::<_, CategoryModel>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING category_id, name
            "#,
        )
        .bind(&req.name)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create category {}: {:?}", req.name, err);
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created category ID {} ({})",
            category.category_id, category.name
        );
        Ok(category)
    }

    async fn update(
        &self,
        id: i64,
        req: &UpdateCategoryRequest,
    ) -> Result<CategoryModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let category = sqlx::query_as::<_, CategoryModel>(
            r#"
            UPDATE categories
            SET name = $2
            WHERE category_id = $1
            RETURNING category_id, name
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update category {}: {:?}", id, err);
            RepositoryError::from(err)
        })?
        .ok_or(RepositoryError::NotFound)?;

        info!("🔄 Updated category ID {}", category.category_id);
        Ok(category)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // owned products, images and comments go with it via FK cascade
        let result = sqlx::query(
            r#"
            DELETE FROM categories
            WHERE category_id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to delete category {}: {:?}", id, err);
            RepositoryError::from(err)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted category ID {}", id);
        Ok(())
    }
}
