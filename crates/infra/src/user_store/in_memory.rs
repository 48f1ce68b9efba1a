use std::collections::BTreeMap;
use std::sync::RwLock;

use usergate_core::{Entity, User, UserId, UserInput, UserQuery};

use super::{StoreError, UserStore};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<UserId, User>,
    last_id: i64,
}

/// In-memory user store for tests/dev.
///
/// Ids start at 1 and are never reused; rows iterate in id order.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Table>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, input: UserInput) -> Result<User, StoreError> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        table.last_id += 1;
        let user = User::from_input(UserId::new(table.last_id), input);
        table.rows.insert(user.id(), user.clone());
        Ok(user)
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let table = self.inner.read().map_err(|_| poisoned())?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn list(&self, query: &UserQuery) -> Result<Vec<User>, StoreError> {
        let table = self.inner.read().map_err(|_| poisoned())?;
        Ok(query.select(table.rows.values()))
    }

    async fn update(&self, id: UserId, input: UserInput) -> Result<Option<User>, StoreError> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        *row = User::from_input(id, input);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: UserId) -> Result<bool, StoreError> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        Ok(table.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, age: i32) -> UserInput {
        UserInput::new(name, format!("{}@x.com", name.to_lowercase()), age)
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = InMemoryUserStore::new();
        let a = store.create(input("Al", 30)).await.unwrap();
        let b = store.create(input("Bo", 31)).await.unwrap();
        assert_eq!(a.id, UserId::new(1));
        assert_eq!(b.id, UserId::new(2));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryUserStore::new();
        let a = store.create(input("Al", 30)).await.unwrap();
        assert!(store.delete(a.id).await.unwrap());
        let b = store.create(input("Bo", 31)).await.unwrap();
        assert_eq!(b.id, UserId::new(2));
    }

    #[tokio::test]
    async fn get_returns_none_for_unknown_id() {
        let store = InMemoryUserStore::new();
        assert!(store.get(UserId::new(5)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_replaces_all_fields_and_keeps_id() {
        let store = InMemoryUserStore::new();
        let created = store.create(input("Al", 30)).await.unwrap();

        let updated = store
            .update(created.id, UserInput::new("Alfred", "alfred@y.org", 44))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Alfred");
        assert_eq!(updated.email, "alfred@y.org");
        assert_eq!(updated.age, 44);
        assert_eq!(store.get(created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn update_of_missing_row_is_none() {
        let store = InMemoryUserStore::new();
        let result = store.update(UserId::new(9), input("Al", 30)).await.unwrap();
        assert!(result.is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn delete_reports_missing_rows() {
        let store = InMemoryUserStore::new();
        assert!(!store.delete(UserId::new(1)).await.unwrap());
    }

    #[tokio::test]
    async fn list_applies_filters_then_window() {
        let store = InMemoryUserStore::new();
        for i in 0..15 {
            let name = if i % 3 == 0 { "Tri" } else { "Other" };
            store.create(input(name, 20 + i)).await.unwrap();
        }

        let page2 = store.list(&UserQuery::new(2, 10, None, None)).await.unwrap();
        assert_eq!(page2.len(), 5);
        assert_eq!(page2[0].id, UserId::new(11));

        let tri = store.list(&UserQuery::new(1, 10, Some("Tri".into()), None)).await.unwrap();
        assert_eq!(tri.len(), 5);
        assert!(tri.iter().all(|u| u.name == "Tri"));

        let aged = store.list(&UserQuery::new(1, 10, None, Some(23))).await.unwrap();
        assert_eq!(aged.len(), 1);
        assert_eq!(aged[0].age, 23);
    }
}
