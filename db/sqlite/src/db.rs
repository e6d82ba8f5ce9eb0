use std::{path::Path, str::FromStr, time::Duration};

use anyhow::Result;
use sqlx::{
    query::{Query, QueryAs},
    sqlite::{
        SqliteArguments, SqliteConnectOptions, SqlitePoolOptions, SqliteQueryResult, SqliteRow,
    },
    Error, Pool, Sqlite,
};
use tokio::fs;

use crate::query::{client, contact, newsletter, project};

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

pub struct SqliteDb {
    pool: Pool<Sqlite>,
}

impl SqliteDb {
    pub async fn new(
        path: &str,
        max_connections: &u32,
        busy_timeout_ms: &Option<u64>,
    ) -> Result<Self> {
        lb_log::info(Some("⚡"), "[SQLite] Initializing component");

        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{path}"))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_millis(
                busy_timeout_ms.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS),
            ));
        let pool = SqlitePoolOptions::new()
            .max_connections(*max_connections)
            .connect_with(options)
            .await?;

        Self::init(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn execute<'a>(
        &self,
        query: Query<'a, Sqlite, SqliteArguments<'a>>,
    ) -> Result<SqliteQueryResult, Error> {
        query.execute(&self.pool).await
    }

    pub async fn fetch_optional<
        'a,
        T: Send + Unpin + for<'r> sqlx::FromRow<'r, SqliteRow>,
    >(
        &self,
        query: QueryAs<'a, Sqlite, T, SqliteArguments<'a>>,
    ) -> Result<Option<T>, Error> {
        query.fetch_optional(&self.pool).await
    }

    pub async fn fetch_all<'a, T: Send + Unpin + for<'r> sqlx::FromRow<'r, SqliteRow>>(
        &self,
        query: QueryAs<'a, Sqlite, T, SqliteArguments<'a>>,
    ) -> Result<Vec<T>, Error> {
        query.fetch_all(&self.pool).await
    }

    async fn init(pool: &Pool<Sqlite>) -> Result<()> {
        tokio::try_join!(
            project::init(pool),
            client::init(pool),
            contact::init(pool),
            newsletter::init(pool),
        )?;
        Ok(())
    }
}

/// Whether `err` is SQLite rejecting a row that collides with a unique index.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<Error>(),
        Some(Error::Database(db_err)) if db_err.is_unique_violation()
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use tempfile::TempDir;

    use super::*;

    pub async fn temp_db() -> (TempDir, SqliteDb) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("leadbase.db");
        let db = SqliteDb::new(path.to_str().unwrap(), &2, &None)
            .await
            .unwrap();
        (dir, db)
    }

    #[tokio::test]
    async fn new_creates_database_file_and_parent_dir() {
        let (dir, _db) = temp_db().await;
        assert!(dir.path().join("data").join("leadbase.db").is_file());
    }

    #[tokio::test]
    async fn reopening_keeps_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leadbase.db");
        let path = path.to_str().unwrap();

        drop(SqliteDb::new(path, &1, &Some(100)).await.unwrap());
        assert!(SqliteDb::new(path, &1, &Some(100)).await.is_ok());
    }
}
