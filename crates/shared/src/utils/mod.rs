mod clock;
mod logs;
mod random_string;
mod shutdown;

pub use self::clock::{FixedClock, SystemClock};
pub use self::logs::init_logger;
pub use self::random_string::generate_random_string;
pub use self::shutdown::shutdown_signal;
