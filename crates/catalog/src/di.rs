use crate::abstract_trait::{
    DynAuthService, DynAuthTokenQueryRepository, DynCategoryCommandService,
    DynCategoryQueryService, DynCommentCommandService, DynCommentQueryService,
    DynImageCommandService, DynImageQueryService, DynProductCommandService,
    DynProductQueryService, DynProductWriteHook,
};
use crate::repository::{
    AuthTokenCommandRepository, AuthTokenQueryRepository, CategoryCommandRepository,
    CategoryQueryRepository, CommentCommandRepository, CommentQueryRepository,
    ImageCommandRepository, ImageQueryRepository, ProductCommandRepository,
    ProductQueryRepository, RevokedTokenRepository, UserQueryRepository,
};
use crate::service::{
    auth::{AuthService, AuthServiceDeps},
    category::{CategoryCommandService, CategoryCommandServiceDeps, CategoryQueryService},
    comment::{CommentCommandService, CommentCommandServiceDeps, CommentQueryService},
    image::{ImageCommandService, ImageQueryService},
    product::{
        ProductCacheInvalidator, ProductCommandService, ProductCommandServiceDeps,
        ProductQueryService,
    },
};
use crate::storage::FileStorage;
use shared::abstract_trait::{DynClock, DynHashing, DynJwtService};
use shared::cache::CacheStore;
use shared::config::{ConnectionPool, RedisPool};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub redis: RedisPool,
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub clock: DynClock,
    pub storage: Arc<FileStorage>,
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub category_query: DynCategoryQueryService,
    pub category_command: DynCategoryCommandService,
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
    pub image_query: DynImageQueryService,
    pub image_command: DynImageCommandService,
    pub comment_query: DynCommentQueryService,
    pub comment_command: DynCommentCommandService,
    pub auth: DynAuthService,
    /// exposed for the auth-context middleware's `Token` scheme lookups
    pub auth_tokens: DynAuthTokenQueryRepository,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject").finish_non_exhaustive()
    }
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps) -> Self {
        let DependenciesInjectDeps {
            pool,
            redis,
            hash,
            jwt,
            clock,
            storage,
        } = deps;

        let cache = Arc::new(CacheStore::new(redis.pool.clone()));

        // repositories
        let category_query_repo = Arc::new(CategoryQueryRepository::new(pool.clone()));
        let category_command_repo = Arc::new(CategoryCommandRepository::new(pool.clone()));

        let product_hook =
            Arc::new(ProductCacheInvalidator::new(cache.clone())) as DynProductWriteHook;
        let product_query_repo = Arc::new(ProductQueryRepository::new(pool.clone()));
        let product_command_repo = Arc::new(ProductCommandRepository::new(
            pool.clone(),
            product_hook.clone(),
        ));

        let image_query_repo = Arc::new(ImageQueryRepository::new(pool.clone()));
        let image_command_repo = Arc::new(ImageCommandRepository::new(pool.clone()));

        let comment_query_repo = Arc::new(CommentQueryRepository::new(pool.clone()));
        let comment_command_repo = Arc::new(CommentCommandRepository::new(pool.clone()));

        let user_query_repo = Arc::new(UserQueryRepository::new(pool.clone()));
        let token_query_repo = Arc::new(AuthTokenQueryRepository::new(pool.clone()));
        let token_command_repo = Arc::new(AuthTokenCommandRepository::new(pool.clone()));
        let revoked_repo = Arc::new(RevokedTokenRepository::new(pool.clone()));

        // services
        let category_query = Arc::new(CategoryQueryService::new(
            category_query_repo.clone(),
            product_query_repo.clone(),
            image_query_repo.clone(),
            cache.clone(),
            storage.clone(),
        )) as DynCategoryQueryService;

        let category_command =
            Arc::new(CategoryCommandService::new(CategoryCommandServiceDeps {
                command: category_command_repo,
                products: product_query_repo.clone(),
                images: image_query_repo.clone(),
                cache_store: cache.clone(),
                storage: storage.clone(),
            })) as DynCategoryCommandService;

        let product_query = Arc::new(ProductQueryService::new(
            product_query_repo.clone(),
            image_query_repo.clone(),
            cache.clone(),
            storage.clone(),
        )) as DynProductQueryService;

        let product_command = Arc::new(ProductCommandService::new(ProductCommandServiceDeps {
            command: product_command_repo,
            query: product_query_repo.clone(),
            categories: category_query_repo,
            images_query: image_query_repo.clone(),
            images_command: image_command_repo.clone(),
            storage: storage.clone(),
        })) as DynProductCommandService;

        let image_query = Arc::new(ImageQueryService::new(
            image_query_repo,
            storage.clone(),
        )) as DynImageQueryService;

        let image_command = Arc::new(ImageCommandService::new(
            image_command_repo,
            product_query_repo.clone(),
            storage.clone(),
        )) as DynImageCommandService;

        let comment_query = Arc::new(CommentQueryService::new(
            comment_query_repo.clone(),
            storage.clone(),
        )) as DynCommentQueryService;

        let comment_command = Arc::new(CommentCommandService::new(CommentCommandServiceDeps {
            command: comment_command_repo,
            query: comment_query_repo,
            products: product_query_repo,
            clock,
            storage,
        })) as DynCommentCommandService;

        let auth = Arc::new(AuthService::new(AuthServiceDeps {
            users: user_query_repo,
            token_query: token_query_repo.clone(),
            token_command: token_command_repo,
            revoked: revoked_repo,
            jwt,
            hash,
        })) as DynAuthService;

        Self {
            category_query,
            category_command,
            product_query,
            product_command,
            image_query,
            image_command,
            comment_query,
            comment_command,
            auth,
            auth_tokens: token_query_repo,
        }
    }
}
