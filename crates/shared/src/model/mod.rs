mod auth_token;
mod category;
mod comment;
mod image;
mod product;
mod user;

pub use self::auth_token::AuthToken;
pub use self::category::Category;
pub use self::comment::Comment;
pub use self::image::Image;
pub use self::product::Product;
pub use self::user::User;
