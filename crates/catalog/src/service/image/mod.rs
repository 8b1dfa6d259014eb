mod command;
mod query;

pub use self::command::ImageCommandService;
pub use self::query::ImageQueryService;
