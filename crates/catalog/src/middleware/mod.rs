pub mod auth;
pub mod validate;
pub mod weekday;

pub use self::auth::{AuthCredential, AuthUser, CurrentUser, auth_context_middleware};
pub use self::validate::SimpleValidatedJson;
pub use self::weekday::weekday_gate_middleware;
