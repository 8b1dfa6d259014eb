mod command;
mod query;

pub use self::command::{CommentCommandService, CommentCommandServiceDeps};
pub use self::query::CommentQueryService;
