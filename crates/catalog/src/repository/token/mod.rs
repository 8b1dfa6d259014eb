mod command;
mod query;

pub use self::command::{AuthTokenCommandRepository, RevokedTokenRepository};
pub use self::query::AuthTokenQueryRepository;
