//! Axum extractors for request handling
//!
//! Custom extractors for authentication, body validation and query strings.

mod auth;
mod query;
mod validated;

pub use auth::AuthUser;
pub use query::QueryParams;
pub use validated::ValidatedJson;
pub(crate) use validated::json_rejection;
