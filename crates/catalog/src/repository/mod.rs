mod category;
mod comment;
mod image;
mod product;
mod token;
mod user;

pub use self::category::{CategoryCommandRepository, CategoryQueryRepository};
pub use self::comment::{CommentCommandRepository, CommentQueryRepository};
pub use self::image::{ImageCommandRepository, ImageQueryRepository};
pub use self::product::{ProductCommandRepository, ProductQueryRepository};
pub use self::token::{
    AuthTokenCommandRepository, AuthTokenQueryRepository, RevokedTokenRepository,
};
pub use self::user::UserQueryRepository;
