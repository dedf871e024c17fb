//! Persistence for todo items.
//!
//! # Design
//! Handlers depend on the `ItemStore` trait, injected as router state, so a
//! store can be swapped without touching HTTP code. `SqliteItemStore` is the
//! production implementation. Each trait method issues a single statement
//! (list issues a count and a select) and there are no cross-request
//! transactions.
//!
//! Deleting is a soft delete: the row's status becomes `Deleted` and every
//! read filters such rows out, so a soft-deleted item behaves as missing.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use todo_core::{ItemPatch, Paging, Status, TodoItem};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// No live (non-deleted) row has this id.
    #[error("item {0} not found")]
    NotFound(i64),

    /// A stored status value is not one of the canonical strings.
    #[error("fail to scan status from sql: {0}")]
    InvalidStatus(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Item persistence used by the HTTP handlers.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Inserts a row with storage-assigned id and timestamps. `title` must
    /// already be validated.
    async fn create(&self, title: &str, status: Status) -> Result<TodoItem>;

    /// Returns one page of live items, newest id first, and the total number
    /// of live items.
    async fn list(&self, paging: &Paging) -> Result<(Vec<TodoItem>, i64)>;

    async fn get(&self, id: i64) -> Result<TodoItem>;

    /// Writes only the fields present in `patch`.
    async fn update(&self, id: i64, patch: &ItemPatch) -> Result<()>;

    /// Marks a live item as `Deleted`.
    async fn soft_delete(&self, id: i64) -> Result<()>;
}

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todo_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'Doing',
    created_at DATETIME,
    updated_at DATETIME
)
"#;

const SELECT_COLUMNS: &str = "SELECT id, title, status, created_at, updated_at FROM todo_items";

/// Pool settings for `SqliteItemStore::connect`.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

pub struct SqliteItemStore {
    pool: SqlitePool,
}

impl SqliteItemStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `options.url`. Every connection to `sqlite::memory:`
    /// is a separate database, so in-memory URLs get a single connection
    /// that is never recycled.
    pub async fn connect(options: &StoreOptions) -> Result<Self> {
        let in_memory = options.url.contains(":memory:");
        debug!(url = %options.url, in_memory, "opening sqlite pool");

        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(options.acquire_timeout);
        pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(options.max_connections)
        };

        let pool = pool_options.connect(&options.url).await?;

        Ok(Self::new(pool))
    }

    /// Creates `todo_items` if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn row_to_item(row: &SqliteRow) -> Result<TodoItem> {
        let raw_status: String = row
            .try_get("status")
            .map_err(|e| StorageError::InvalidStatus(e.to_string()))?;
        let status = Status::from_str(raw_status.trim())
            .map_err(|_| StorageError::InvalidStatus(raw_status.clone()))?;

        Ok(TodoItem {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            status,
            created_at: row.try_get::<Option<DateTime<Utc>>, _>("created_at")?,
            updated_at: row.try_get::<Option<DateTime<Utc>>, _>("updated_at")?,
        })
    }
}

#[async_trait]
impl ItemStore for SqliteItemStore {
    async fn create(&self, title: &str, status: Status) -> Result<TodoItem> {
        let now = Utc::now();
        debug!(title, %status, "inserting item");

        let result = sqlx::query(
            r#"
            INSERT INTO todo_items (title, status, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(title)
        .bind(status.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        // Read back without the live-row filter: a new item may start as Deleted.
        let id = result.last_insert_rowid();
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound(id))?;

        Self::row_to_item(&row)
    }

    async fn list(&self, paging: &Paging) -> Result<(Vec<TodoItem>, i64)> {
        debug!(page = paging.page, limit = paging.limit, "listing items");

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todo_items WHERE status <> ?")
            .bind(Status::Deleted.as_str())
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE status <> ? ORDER BY id DESC LIMIT ? OFFSET ?"
        ))
        .bind(Status::Deleted.as_str())
        .bind(paging.limit)
        .bind(paging.offset())
        .fetch_all(&self.pool)
        .await?;

        let items = rows
            .iter()
            .map(Self::row_to_item)
            .collect::<Result<Vec<_>>>()?;

        Ok((items, total))
    }

    async fn get(&self, id: i64) -> Result<TodoItem> {
        debug!(id, "fetching item");

        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ? AND status <> ?"))
            .bind(id)
            .bind(Status::Deleted.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound(id))?;

        Self::row_to_item(&row)
    }

    async fn update(&self, id: i64, patch: &ItemPatch) -> Result<()> {
        debug!(id, ?patch, "updating item");

        if patch.is_empty() {
            return self.get(id).await.map(|_| ());
        }

        let mut assignments = Vec::new();
        if patch.title.is_some() {
            assignments.push("title = ?");
        }
        if patch.status.is_some() {
            assignments.push("status = ?");
        }
        assignments.push("updated_at = ?");

        let sql = format!(
            "UPDATE todo_items SET {} WHERE id = ? AND status <> ?",
            assignments.join(", ")
        );
        let mut query = sqlx::query(&sql);

        // Bind in the same order as the assignments above.
        if let Some(title) = &patch.title {
            query = query.bind(title);
        }
        if let Some(status) = patch.status {
            query = query.bind(status.as_str());
        }
        query = query
            .bind(Utc::now())
            .bind(id)
            .bind(Status::Deleted.as_str());

        let result = query.execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(id));
        }
        Ok(())
    }

    async fn soft_delete(&self, id: i64) -> Result<()> {
        debug!(id, "soft-deleting item");

        let result = sqlx::query(
            "UPDATE todo_items SET status = ?, updated_at = ? WHERE id = ? AND status <> ?",
        )
        .bind(Status::Deleted.as_str())
        .bind(Utc::now())
        .bind(id)
        .bind(Status::Deleted.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(id));
        }
        Ok(())
    }
}
