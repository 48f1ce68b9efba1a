//! Postgres-backed user store.
//!
//! ## Thread Safety
//!
//! Uses the SQLx connection pool, which is `Clone + Send + Sync`; each
//! operation checks out one connection for a single statement.
//!
//! ## Schema
//!
//! `users` is created on startup if absent (`ensure_schema`). There is no
//! migration tooling.

use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use usergate_core::{User, UserId, UserInput, UserQuery};

use super::{StoreError, UserStore};
use crate::db::{DbConfig, create_pool};

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id    BIGSERIAL PRIMARY KEY,
    name  TEXT    NOT NULL,
    email TEXT    NOT NULL,
    age   INTEGER NOT NULL
)
"#;

#[derive(Debug, Clone, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    age: i32,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId::new(row.id),
            name: row.name,
            email: row.email,
            age: row.age,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect, then make sure the `users` table exists.
    pub async fn connect(config: &DbConfig) -> Result<Self, StoreError> {
        let store = Self::new(create_pool(config).await?);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
        tracing::debug!("users table ready");
        Ok(())
    }
}

/// `SELECT ... WHERE <filters> ORDER BY id LIMIT <limit> OFFSET <offset>`.
fn build_list_query(query: &UserQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT id, name, email, age FROM users");
    let mut has_where = false;

    if let Some(name) = query.name() {
        qb.push(" WHERE name = ").push_bind(name.to_string());
        has_where = true;
    }
    if let Some(age) = query.age() {
        qb.push(if has_where { " AND age = " } else { " WHERE age = " })
            .push_bind(age);
    }

    let limit = i64::try_from(query.limit()).unwrap_or(i64::MAX);
    let offset = i64::try_from(query.offset()).unwrap_or(i64::MAX);
    qb.push(" ORDER BY id LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    qb
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    async fn create(&self, input: UserInput) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"INSERT INTO users (name, email, age) VALUES ($1, $2, $3) RETURNING id, name, email, age"#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.age)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"SELECT id, name, email, age FROM users WHERE id = $1"#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    async fn list(&self, query: &UserQuery) -> Result<Vec<User>, StoreError> {
        let mut qb = build_list_query(query);
        let rows = qb
            .build_query_as::<UserRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update(&self, id: UserId, input: UserInput) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"UPDATE users SET name = $2, email = $3, age = $4 WHERE id = $1 RETURNING id, name, email, age"#,
        )
        .bind(id.get())
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.age)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    async fn delete(&self, id: UserId) -> Result<bool, StoreError> {
        let result = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
