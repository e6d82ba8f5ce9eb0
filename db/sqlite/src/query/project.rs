use anyhow::Result;
use sqlx::{Executor, Pool, Sqlite};
use uuid::Uuid;

use crate::{db::SqliteDb, model::project::ProjectModel};

const UPSERT: &str = "INSERT INTO \"projects\" (\"id\", \"created_at\", \"updated_at\", \"name\", \"description\", \"image\") VALUES (?, ?, ?, ?, ?, ?) ON CONFLICT (\"id\") DO UPDATE SET \"updated_at\" = excluded.\"updated_at\", \"name\" = excluded.\"name\", \"description\" = excluded.\"description\", \"image\" = excluded.\"image\"";
const SELECT: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"description\", \"image\" FROM \"projects\" WHERE \"id\" = ?";
const SELECT_MANY: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"description\", \"image\" FROM \"projects\" ORDER BY \"created_at\" DESC, \"id\" DESC";
const DELETE: &str = "DELETE FROM \"projects\" WHERE \"id\" = ?";

pub async fn init(pool: &Pool<Sqlite>) -> Result<()> {
    lb_log::info(Some("🔧"), "[SQLite] Setting up projects table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"projects\" (\"id\" blob, \"created_at\" timestamp, \"updated_at\" timestamp, \"name\" text, \"description\" text, \"image\" text, PRIMARY KEY (\"id\"))").await?;

    pool.prepare(UPSERT).await?;
    pool.prepare(SELECT).await?;
    pool.prepare(SELECT_MANY).await?;
    pool.prepare(DELETE).await?;

    Ok(())
}

impl SqliteDb {
    pub async fn upsert_project(&self, value: &ProjectModel) -> Result<()> {
        self.execute(
            sqlx::query(UPSERT)
                .bind(value.id())
                .bind(value.created_at())
                .bind(value.updated_at())
                .bind(value.name())
                .bind(value.description())
                .bind(value.image()),
        )
        .await?;
        Ok(())
    }

    pub async fn select_project(&self, id: &Uuid) -> Result<Option<ProjectModel>> {
        Ok(self.fetch_optional(sqlx::query_as(SELECT).bind(id)).await?)
    }

    pub async fn select_many_projects(&self) -> Result<Vec<ProjectModel>> {
        Ok(self.fetch_all(sqlx::query_as(SELECT_MANY)).await?)
    }

    pub async fn delete_project(&self, id: &Uuid) -> Result<u64> {
        Ok(self
            .execute(sqlx::query(DELETE).bind(id))
            .await?
            .rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use crate::{db::tests::temp_db, model::project::ProjectModel};

    #[tokio::test]
    async fn upsert_inserts_then_updates() {
        let (_dir, db) = temp_db().await;
        let id = Uuid::now_v7();
        let now = Utc::now();

        db.upsert_project(&ProjectModel::new(
            &id,
            &now,
            &now,
            "Skyline Tower",
            "A 40-story build",
            "/uploads/projects/project-1.jpg",
        ))
        .await
        .unwrap();
        db.upsert_project(&ProjectModel::new(
            &id,
            &now,
            &(now + Duration::seconds(5)),
            "Skyline Tower II",
            "A 41-story build",
            "/uploads/projects/project-2.jpg",
        ))
        .await
        .unwrap();

        let project = db.select_project(&id).await.unwrap().unwrap();
        assert_eq!(project.name(), "Skyline Tower II");
        assert_eq!(project.description(), "A 41-story build");
        assert_eq!(project.image(), "/uploads/projects/project-2.jpg");
        assert_eq!(
            project.created_at().timestamp_millis(),
            now.timestamp_millis()
        );
        assert_eq!(db.select_many_projects().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn select_many_is_newest_first() {
        let (_dir, db) = temp_db().await;
        let now = Utc::now();

        for (offset, name) in [(0, "oldest"), (20, "newest"), (10, "middle")] {
            let at = now + Duration::seconds(offset);
            db.upsert_project(&ProjectModel::new(&Uuid::now_v7(), &at, &at, name, "d", "i"))
                .await
                .unwrap();
        }

        let names: Vec<String> = db
            .select_many_projects()
            .await
            .unwrap()
            .iter()
            .map(|project| project.name().to_owned())
            .collect();
        assert_eq!(names, ["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn missing_project_is_none_and_delete_reports_rows() {
        let (_dir, db) = temp_db().await;
        let id = Uuid::now_v7();

        assert!(db.select_project(&id).await.unwrap().is_none());
        assert_eq!(db.delete_project(&id).await.unwrap(), 0);

        let now = Utc::now();
        db.upsert_project(&ProjectModel::new(&id, &now, &now, "n", "d", "i"))
            .await
            .unwrap();
        assert_eq!(db.delete_project(&id).await.unwrap(), 1);
        assert!(db.select_project(&id).await.unwrap().is_none());
    }
}
