use anyhow::Result;
use sqlx::{Executor, Pool, Sqlite};
use uuid::Uuid;

use crate::{db::SqliteDb, model::client::ClientModel};

const UPSERT: &str = "INSERT INTO \"clients\" (\"id\", \"created_at\", \"updated_at\", \"name\", \"description\", \"designation\", \"image\") VALUES (?, ?, ?, ?, ?, ?, ?) ON CONFLICT (\"id\") DO UPDATE SET \"updated_at\" = excluded.\"updated_at\", \"name\" = excluded.\"name\", \"description\" = excluded.\"description\", \"designation\" = excluded.\"designation\", \"image\" = excluded.\"image\"";
const SELECT: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"description\", \"designation\", \"image\" FROM \"clients\" WHERE \"id\" = ?";
const SELECT_MANY: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"description\", \"designation\", \"image\" FROM \"clients\" ORDER BY \"created_at\" DESC, \"id\" DESC";
const DELETE: &str = "DELETE FROM \"clients\" WHERE \"id\" = ?";

pub async fn init(pool: &Pool<Sqlite>) -> Result<()> {
    lb_log::info(Some("🔧"), "[SQLite] Setting up clients table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"clients\" (\"id\" blob, \"created_at\" timestamp, \"updated_at\" timestamp, \"name\" text, \"description\" text, \"designation\" text, \"image\" text, PRIMARY KEY (\"id\"))").await?;

    pool.prepare(UPSERT).await?;
    pool.prepare(SELECT).await?;
    pool.prepare(SELECT_MANY).await?;
    pool.prepare(DELETE).await?;

    Ok(())
}

impl SqliteDb {
    pub async fn upsert_client(&self, value: &ClientModel) -> Result<()> {
        self.execute(
            sqlx::query(UPSERT)
                .bind(value.id())
                .bind(value.created_at())
                .bind(value.updated_at())
                .bind(value.name())
                .bind(value.description())
                .bind(value.designation())
                .bind(value.image()),
        )
        .await?;
        Ok(())
    }

    pub async fn select_client(&self, id: &Uuid) -> Result<Option<ClientModel>> {
        Ok(self.fetch_optional(sqlx::query_as(SELECT).bind(id)).await?)
    }

    pub async fn select_many_clients(&self) -> Result<Vec<ClientModel>> {
        Ok(self.fetch_all(sqlx::query_as(SELECT_MANY)).await?)
    }

    pub async fn delete_client(&self, id: &Uuid) -> Result<u64> {
        Ok(self
            .execute(sqlx::query(DELETE).bind(id))
            .await?
            .rows_affected())
    }
}
