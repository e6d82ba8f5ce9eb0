use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lb_asset::{AssetKind, AssetOwner};
use lb_db_sqlite::model::project::ProjectModel as ProjectSqliteModel;
use lb_error::Error;
use uuid::Uuid;

use crate::Db;

pub struct ProjectDao {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
    description: String,
    image: String,
}

impl ProjectDao {
    pub fn new(name: &str, description: &str, image: &str) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
            name: name.to_owned(),
            description: description.to_owned(),
            image: image.to_owned(),
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn updated_at(&self) -> &DateTime<Utc> {
        &self.updated_at
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_owned();
    }

    pub async fn db_save(&mut self, db: &Db) -> Result<()> {
        self.updated_at = Utc::now();
        match db {
            Db::SqliteDb(db) => db.upsert_project(&self.to_sqlitedb_model()).await,
        }
    }

    pub async fn db_select(db: &Db, id: &Uuid) -> Result<Self> {
        let model = match db {
            Db::SqliteDb(db) => db.select_project(id).await?.map(Self::from_sqlitedb_model),
        };
        model.ok_or_else(|| Error::NotFound("Project not found".to_owned()).into())
    }

    pub async fn db_select_many(db: &Db) -> Result<Vec<Self>> {
        match db {
            Db::SqliteDb(db) => Ok(db
                .select_many_projects()
                .await?
                .into_iter()
                .map(Self::from_sqlitedb_model)
                .collect()),
        }
    }

    pub async fn db_delete(db: &Db, id: &Uuid) -> Result<()> {
        let deleted = match db {
            Db::SqliteDb(db) => db.delete_project(id).await?,
        };
        if deleted == 0 {
            return Err(Error::NotFound("Project not found".to_owned()).into());
        }
        Ok(())
    }

    fn from_sqlitedb_model(model: ProjectSqliteModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            name: model.name().to_owned(),
            description: model.description().to_owned(),
            image: model.image().to_owned(),
        }
    }

    fn to_sqlitedb_model(&self) -> ProjectSqliteModel {
        ProjectSqliteModel::new(
            &self.id,
            &self.created_at,
            &self.updated_at,
            &self.name,
            &self.description,
            &self.image,
        )
    }
}

#[async_trait]
impl AssetOwner for ProjectDao {
    type Store = Db;

    const KIND: AssetKind = AssetKind::Project;

    fn image(&self) -> &str {
        &self.image
    }

    fn set_image(&mut self, image: &str) {
        self.image = image.to_owned();
    }

    async fn save_record(&mut self, store: &Db) -> Result<()> {
        self.db_save(store).await
    }

    async fn delete_record(&self, store: &Db) -> Result<()> {
        Self::db_delete(store, &self.id).await
    }
}
