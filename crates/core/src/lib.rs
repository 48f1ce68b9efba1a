//! `usergate-core`: domain foundation for the users service.
//!
//! This crate contains **pure domain** types (no HTTP, no storage).

pub mod entity;
pub mod error;
pub mod id;
pub mod query;
pub mod user;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::UserId;
pub use query::{ListParams, UserQuery, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use user::{User, UserInput};
