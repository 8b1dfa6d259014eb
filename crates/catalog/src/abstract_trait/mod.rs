mod category;
mod comment;
mod image;
mod product;
mod token;
mod user;

pub use self::category::{
    CategoryCommandRepositoryTrait, CategoryCommandServiceTrait, CategoryQueryRepositoryTrait,
    CategoryQueryServiceTrait, DynCategoryCommandRepository, DynCategoryCommandService,
    DynCategoryQueryRepository, DynCategoryQueryService,
};
pub use self::comment::{
    CommentCommandRepositoryTrait, CommentCommandServiceTrait, CommentQueryRepositoryTrait,
    CommentQueryServiceTrait, DynCommentCommandRepository, DynCommentCommandService,
    DynCommentQueryRepository, DynCommentQueryService,
};
pub use self::image::{
    DynImageCommandRepository, DynImageCommandService, DynImageQueryRepository,
    DynImageQueryService, ImageCommandRepositoryTrait, ImageCommandServiceTrait,
    ImageQueryRepositoryTrait, ImageQueryServiceTrait,
};
pub use self::product::{
    DynProductCommandRepository, DynProductCommandService, DynProductQueryRepository,
    DynProductQueryService, DynProductWriteHook, ProductCommandRepositoryTrait,
    ProductCommandServiceTrait, ProductQueryRepositoryTrait, ProductQueryServiceTrait,
    ProductWriteHook,
};
pub use self::token::{
    AuthServiceTrait, AuthTokenCommandRepositoryTrait, AuthTokenQueryRepositoryTrait,
    DynAuthService, DynAuthTokenCommandRepository, DynAuthTokenQueryRepository,
    DynRevokedTokenRepository, RevokedTokenRepositoryTrait,
};
pub use self::user::{DynUserQueryRepository, UserQueryRepositoryTrait};
