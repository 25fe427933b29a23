//! Model to entity mappers
//!
//! - `From<Model> for Entity`: convert database rows to domain objects
//! - `*Insert` structs: flatten entities into bind values

mod association;
mod audit_log;
mod control;
mod rejection_reason;
mod user;

pub use control::ControlInsert;
pub use user::UserInsert;
