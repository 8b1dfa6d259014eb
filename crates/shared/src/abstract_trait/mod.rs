mod clock;
mod hashing;
mod jwt;

pub use self::clock::{Clock, DynClock};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait};
