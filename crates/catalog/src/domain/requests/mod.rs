mod auth;
mod category;
mod comment;
mod image;
mod product;

pub use self::auth::{LoginRequest, LogoutJwtRequest, RefreshTokenRequest};
pub use self::category::{CreateCategoryRequest, UpdateCategoryRequest};
pub use self::comment::{CreateCommentRequest, NewComment, UpdateCommentRequest};
pub use self::image::CreateImageRequest;
pub use self::product::{CreateProductRequest, ProductListQuery, UpdateProductRequest};
