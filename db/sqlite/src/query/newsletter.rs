use anyhow::Result;
use sqlx::{Executor, Pool, Sqlite};
use uuid::Uuid;

use crate::{db::SqliteDb, model::newsletter::NewsletterModel};

const INSERT: &str = "INSERT INTO \"newsletters\" (\"id\", \"subscribed_at\", \"email\") VALUES (?, ?, ?)";
const SELECT: &str = "SELECT \"id\", \"subscribed_at\", \"email\" FROM \"newsletters\" WHERE \"id\" = ?";
const SELECT_BY_EMAIL: &str = "SELECT \"id\", \"subscribed_at\", \"email\" FROM \"newsletters\" WHERE \"email\" = ?";
const SELECT_MANY: &str = "SELECT \"id\", \"subscribed_at\", \"email\" FROM \"newsletters\" ORDER BY \"subscribed_at\" DESC, \"id\" DESC";
const DELETE: &str = "DELETE FROM \"newsletters\" WHERE \"id\" = ?";

pub async fn init(pool: &Pool<Sqlite>) -> Result<()> {
    lb_log::info(Some("🔧"), "[SQLite] Setting up newsletters table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"newsletters\" (\"id\" blob, \"subscribed_at\" timestamp, \"email\" text, PRIMARY KEY (\"id\"))").await?;
    pool.execute("CREATE UNIQUE INDEX IF NOT EXISTS \"newsletters_email_idx\" ON \"newsletters\" (\"email\")").await?;

    pool.prepare(INSERT).await?;
    pool.prepare(SELECT).await?;
    pool.prepare(SELECT_BY_EMAIL).await?;
    pool.prepare(SELECT_MANY).await?;
    pool.prepare(DELETE).await?;

    Ok(())
}

impl SqliteDb {
    pub async fn insert_newsletter(&self, value: &NewsletterModel) -> Result<()> {
        self.execute(
            sqlx::query(INSERT)
                .bind(value.id())
                .bind(value.subscribed_at())
                .bind(value.email()),
        )
        .await?;
        Ok(())
    }

    pub async fn select_newsletter(&self, id: &Uuid) -> Result<Option<NewsletterModel>> {
        Ok(self.fetch_optional(sqlx::query_as(SELECT).bind(id)).await?)
    }

    pub async fn select_newsletter_by_email(&self, email: &str) -> Result<Option<NewsletterModel>> {
        Ok(self
            .fetch_optional(sqlx::query_as(SELECT_BY_EMAIL).bind(email))
            .await?)
    }

    pub async fn select_many_newsletters(&self) -> Result<Vec<NewsletterModel>> {
        Ok(self.fetch_all(sqlx::query_as(SELECT_MANY)).await?)
    }

    pub async fn delete_newsletter(&self, id: &Uuid) -> Result<u64> {
        Ok(self
            .execute(sqlx::query(DELETE).bind(id))
            .await?
            .rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use crate::{
        db::{is_unique_violation, tests::temp_db},
        model::newsletter::NewsletterModel,
    };

    #[tokio::test]
    async fn email_lookup_and_unique_index() {
        let (_dir, db) = temp_db().await;
        let now = Utc::now();

        db.insert_newsletter(&NewsletterModel::new(&Uuid::now_v7(), &now, "ana@example.com"))
            .await
            .unwrap();

        let found = db
            .select_newsletter_by_email("ana@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.email(), "ana@example.com");
        assert!(db
            .select_newsletter_by_email("bob@example.com")
            .await
            .unwrap()
            .is_none());

        let err = db
            .insert_newsletter(&NewsletterModel::new(&Uuid::now_v7(), &now, "ana@example.com"))
            .await
            .unwrap_err();
        assert!(is_unique_violation(&err));
        assert!(!is_unique_violation(&anyhow::anyhow!("disk full")));
    }
}
