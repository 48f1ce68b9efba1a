//! Infrastructure layer: the user store and its database wiring.

pub mod db;
pub mod user_store;

pub use db::{DbConfig, create_pool};
pub use user_store::{InMemoryUserStore, PostgresUserStore, StoreError, UserStore};
