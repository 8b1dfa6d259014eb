use super::{CATEGORY_LIST_CACHE_KEY, assemble_categories};
use crate::abstract_trait::{
    CategoryCommandServiceTrait, DynCategoryCommandRepository, DynImageQueryRepository,
    DynProductQueryRepository,
};
use crate::domain::{
    requests::{CreateCategoryRequest, UpdateCategoryRequest},
    response::{ApiResponse, CategoryResponse},
};
use crate::storage::FileStorage;
use async_trait::async_trait;
use shared::cache::CacheStore;
use shared::errors::ServiceError;
use std::sync::Arc;
use tracing::{info, warn};

pub struct CategoryCommandServiceDeps {
    pub command: DynCategoryCommandRepository,
    pub products: DynProductQueryRepository,
    pub images: DynImageQueryRepository,
    pub cache_store: Arc<CacheStore>,
    pub storage: Arc<FileStorage>,
}

pub struct CategoryCommandService {
    command: DynCategoryCommandRepository,
    products: DynProductQueryRepository,
    images: DynImageQueryRepository,
    cache_store: Arc<CacheStore>,
    storage: Arc<FileStorage>,
}

impl CategoryCommandService {
    pub fn new(deps: CategoryCommandServiceDeps) -> Self {
        let CategoryCommandServiceDeps {
            command,
            products,
            images,
            cache_store,
            storage,
        } = deps;

        Self {
            command,
            products,
            images,
            cache_store,
            storage,
        }
    }

    /// Categories are authenticated-or-read-only: anonymous callers may
    /// list and retrieve, never mutate.
    fn ensure_authenticated(caller: Option<i64>) -> Result<i64, ServiceError> {
        caller.ok_or_else(|| {
            warn!("❌ Anonymous caller attempted a category mutation");
            ServiceError::Forbidden("Authentication required to modify categories".to_string())
        })
    }
}

#[async_trait]
impl CategoryCommandServiceTrait for CategoryCommandService {
    async fn create(
        &self,
        caller: Option<i64>,
        req: &CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        Self::ensure_authenticated(caller)?;

        let category = self.command.create(req).await.map_err(ServiceError::Repo)?;
        self.cache_store
            .delete_from_cache(CATEGORY_LIST_CACHE_KEY)
            .await;

        info!("✅ Category '{}' created", category.name);

        Ok(ApiResponse::success(
            "Category created successfully",
            CategoryResponse {
                id: category.category_id,
                name: category.name,
                products: Vec::new(),
            },
        ))
    }

    async fn update(
        &self,
        caller: Option<i64>,
        id: i64,
        req: &UpdateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        Self::ensure_authenticated(caller)?;

        let category = self
            .command
            .update(id, req)
            .await
            .map_err(ServiceError::Repo)?;
        self.cache_store
            .delete_from_cache(CATEGORY_LIST_CACHE_KEY)
            .await;

        let mut data =
            assemble_categories(vec![category], &self.products, &self.images, &self.storage)
                .await
                .map_err(ServiceError::Repo)?;
        let category = data
            .pop()
            .ok_or_else(|| ServiceError::Internal("Category assembly came back empty".into()))?;

        Ok(ApiResponse::success(
            "Category updated successfully",
            category,
        ))
    }

    async fn delete(
        &self,
        caller: Option<i64>,
        id: i64,
    ) -> Result<ApiResponse<bool>, ServiceError> {
        Self::ensure_authenticated(caller)?;

        self.command.delete(id).await.map_err(ServiceError::Repo)?;
        self.cache_store
            .delete_from_cache(CATEGORY_LIST_CACHE_KEY)
            .await;

        Ok(ApiResponse::success("Category deleted successfully", true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::{
        CategoryCommandRepositoryTrait, CategoryQueryServiceTrait, ImageQueryRepositoryTrait,
        ProductQueryRepositoryTrait,
    };
    use crate::domain::requests::ProductListQuery;
    use crate::service::category::CategoryQueryService;
    use shared::errors::RepositoryError;
    use shared::model::{Category as CategoryModel, Image as ImageModel, Product as ProductModel};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockCategoryQueryRepo {
        categories: Mutex<Vec<CategoryModel>>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl crate::abstract_trait::CategoryQueryRepositoryTrait for MockCategoryQueryRepo {
        async fn find_all(&self) -> Result<Vec<CategoryModel>, RepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.categories.lock().unwrap().clone())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<CategoryModel>, RepositoryError> {
            Ok(self
                .categories
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.category_id == id)
                .cloned())
        }
    }

    struct MockCategoryCommandRepo {
        next_id: AtomicUsize,
    }

    #[async_trait]
    impl CategoryCommandRepositoryTrait for MockCategoryCommandRepo {
        async fn create(
            &self,
            req: &CreateCategoryRequest,
        ) -> Result<CategoryModel, RepositoryError> {
            Ok(CategoryModel {
                category_id: self.next_id.fetch_add(1, Ordering::SeqCst) as i64,
                name: req.name.clone(),
            })
        }

        async fn update(
            &self,
            id: i64,
            req: &UpdateCategoryRequest,
        ) -> Result<CategoryModel, RepositoryError> {
            Ok(CategoryModel {
                category_id: id,
                name: req.name.clone(),
            })
        }

        async fn delete(&self, _id: i64) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    struct EmptyProductQueryRepo;

    #[async_trait]
    impl ProductQueryRepositoryTrait for EmptyProductQueryRepo {
        async fn find_all(
            &self,
            _filter: &ProductListQuery,
        ) -> Result<Vec<ProductModel>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _id: i64) -> Result<Option<ProductModel>, RepositoryError> {
            Ok(None)
        }

        async fn find_by_category_ids(
            &self,
            _category_ids: &[i64],
        ) -> Result<Vec<ProductModel>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    struct EmptyImageQueryRepo;

    #[async_trait]
    impl ImageQueryRepositoryTrait for EmptyImageQueryRepo {
        async fn find_by_id(&self, _id: i64) -> Result<Option<ImageModel>, RepositoryError> {
            Ok(None)
        }

        async fn find_by_product(
            &self,
            _product_id: i64,
        ) -> Result<Vec<ImageModel>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn find_by_product_ids(
            &self,
            _product_ids: &[i64],
        ) -> Result<Vec<ImageModel>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    fn storage() -> Arc<FileStorage> {
        Arc::new(FileStorage::new("/tmp/media-test", "http://localhost:8000"))
    }

    fn query_repo() -> Arc<MockCategoryQueryRepo> {
        Arc::new(MockCategoryQueryRepo {
            categories: Mutex::new(vec![CategoryModel {
                category_id: 1,
                name: "Phones".into(),
            }]),
            calls: AtomicUsize::new(0),
        })
    }

    fn command_service(cache: Arc<CacheStore>) -> CategoryCommandService {
        CategoryCommandService::new(CategoryCommandServiceDeps {
            command: Arc::new(MockCategoryCommandRepo {
                next_id: AtomicUsize::new(10),
            }),
            products: Arc::new(EmptyProductQueryRepo),
            images: Arc::new(EmptyImageQueryRepo),
            cache_store: cache,
            storage: storage(),
        })
    }

    #[tokio::test]
    async fn anonymous_mutations_are_forbidden() {
        let cache = Arc::new(CacheStore::in_memory());
        let service = command_service(cache);

        let req = CreateCategoryRequest {
            name: "Tablets".into(),
        };

        let err = service.create(None, &req).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let err = service.delete(None, 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn list_is_read_through_cached() {
        let cache = Arc::new(CacheStore::in_memory());
        let repo = query_repo();
        let service = CategoryQueryService::new(
            repo.clone(),
            Arc::new(EmptyProductQueryRepo),
            Arc::new(EmptyImageQueryRepo),
            cache.clone(),
            storage(),
        );

        let first = service.find_all().await.expect("first list");
        assert_eq!(first.data.len(), 1);
        assert_eq!(repo.calls.load(Ordering::SeqCst), 1);

        let second = service.find_all().await.expect("second list");
        assert_eq!(second.data.len(), 1);
        // served verbatim from cache, repository untouched
        assert_eq!(repo.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn create_invalidates_cached_list() {
        let cache = Arc::new(CacheStore::in_memory());
        let repo = query_repo();
        let query_service = CategoryQueryService::new(
            repo.clone(),
            Arc::new(EmptyProductQueryRepo),
            Arc::new(EmptyImageQueryRepo),
            cache.clone(),
            storage(),
        );
        let command_service = command_service(cache.clone());

        query_service.find_all().await.expect("prime cache");
        assert!(
            cache
                .get_from_cache::<ApiResponse<Vec<CategoryResponse>>>(CATEGORY_LIST_CACHE_KEY)
                .await
                .is_some()
        );

        let req = CreateCategoryRequest {
            name: "Tablets".into(),
        };
        let created = command_service.create(Some(1), &req).await.expect("create");
        assert_eq!(created.data.name, "Tablets");

        // the stale list entry must no longer be served
        assert!(
            cache
                .get_from_cache::<ApiResponse<Vec<CategoryResponse>>>(CATEGORY_LIST_CACHE_KEY)
                .await
                .is_none()
        );

        repo.categories.lock().unwrap().push(CategoryModel {
            category_id: 10,
            name: "Tablets".into(),
        });
        let listed = query_service.find_all().await.expect("relist");
        assert_eq!(listed.data.len(), 2);
        assert_eq!(repo.calls.load(Ordering::SeqCst), 2);
    }
}
