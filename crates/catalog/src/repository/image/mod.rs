mod command;
mod query;

pub use self::command::ImageCommandRepository;
pub use self::query::ImageQueryRepository;
