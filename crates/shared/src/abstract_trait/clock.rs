use chrono::{DateTime, Utc};
use std::sync::Arc;

pub type DynClock = Arc<dyn Clock + Send + Sync>;

/// Source of wall-clock time. Services never read system time directly so
/// time-windowed rules stay testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
