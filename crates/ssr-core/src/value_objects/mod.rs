//! Value objects - immutable types that represent domain concepts

mod geo;
mod login;
mod roles;
mod snowflake;

pub use geo::GeoPosition;
pub use login::{local_part, split_login, LoginPattern};
pub use roles::Roles;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
