use anyhow::Result;
use sqlx::{Executor, Pool, Sqlite};
use uuid::Uuid;

use crate::{db::SqliteDb, model::contact::ContactModel};

const INSERT: &str = "INSERT INTO \"contacts\" (\"id\", \"created_at\", \"full_name\", \"email\", \"mobile\", \"city\") VALUES (?, ?, ?, ?, ?, ?)";
const SELECT: &str = "SELECT \"id\", \"created_at\", \"full_name\", \"email\", \"mobile\", \"city\" FROM \"contacts\" WHERE \"id\" = ?";
const SELECT_MANY: &str = "SELECT \"id\", \"created_at\", \"full_name\", \"email\", \"mobile\", \"city\" FROM \"contacts\" ORDER BY \"created_at\" DESC, \"id\" DESC";
const DELETE: &str = "DELETE FROM \"contacts\" WHERE \"id\" = ?";

pub async fn init(pool: &Pool<Sqlite>) -> Result<()> {
    lb_log::info(Some("🔧"), "[SQLite] Setting up contacts table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"contacts\" (\"id\" blob, \"created_at\" timestamp, \"full_name\" text, \"email\" text, \"mobile\" text, \"city\" text, PRIMARY KEY (\"id\"))").await?;

    pool.prepare(INSERT).await?;
    pool.prepare(SELECT).await?;
    pool.prepare(SELECT_MANY).await?;
    pool.prepare(DELETE).await?;

    Ok(())
}

impl SqliteDb {
    pub async fn insert_contact(&self, value: &ContactModel) -> Result<()> {
        self.execute(
            sqlx::query(INSERT)
                .bind(value.id())
                .bind(value.created_at())
                .bind(value.full_name())
                .bind(value.email())
                .bind(value.mobile())
                .bind(value.city()),
        )
        .await?;
        Ok(())
    }

    pub async fn select_contact(&self, id: &Uuid) -> Result<Option<ContactModel>> {
        Ok(self.fetch_optional(sqlx::query_as(SELECT).bind(id)).await?)
    }

    pub async fn select_many_contacts(&self) -> Result<Vec<ContactModel>> {
        Ok(self.fetch_all(sqlx::query_as(SELECT_MANY)).await?)
    }

    pub async fn delete_contact(&self, id: &Uuid) -> Result<u64> {
        Ok(self
            .execute(sqlx::query(DELETE).bind(id))
            .await?
            .rows_affected())
    }
}
