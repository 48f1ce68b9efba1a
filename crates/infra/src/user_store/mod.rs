//! User store boundary.
//!
//! Every operation is a single atomic store call; there are no transactions
//! spanning several operations and no retries.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryUserStore;
pub use postgres::PostgresUserStore;

use std::sync::Arc;

use thiserror::Error;
use usergate_core::{User, UserId, UserInput, UserQuery};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for user records.
///
/// Inputs are expected to be validated by the caller.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a record; the store assigns the id.
    async fn create(&self, input: UserInput) -> Result<User, StoreError>;

    async fn get(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Filtered, windowed read in primary-key order.
    async fn list(&self, query: &UserQuery) -> Result<Vec<User>, StoreError>;

    /// Replace every mutable field of `id`. `None` when no such row exists.
    async fn update(&self, id: UserId, input: UserInput) -> Result<Option<User>, StoreError>;

    /// `false` when no such row existed.
    async fn delete(&self, id: UserId) -> Result<bool, StoreError>;
}

#[async_trait::async_trait]
impl<S> UserStore for Arc<S>
where
    S: UserStore + ?Sized,
{
    async fn create(&self, input: UserInput) -> Result<User, StoreError> {
        (**self).create(input).await
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, StoreError> {
        (**self).get(id).await
    }

    async fn list(&self, query: &UserQuery) -> Result<Vec<User>, StoreError> {
        (**self).list(query).await
    }

    async fn update(&self, id: UserId, input: UserInput) -> Result<Option<User>, StoreError> {
        (**self).update(id, input).await
    }

    async fn delete(&self, id: UserId) -> Result<bool, StoreError> {
        (**self).delete(id).await
    }
}
