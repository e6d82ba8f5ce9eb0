use anyhow::Result;
use chrono::{DateTime, Utc};
use lb_db_sqlite::{
    db::is_unique_violation, model::newsletter::NewsletterModel as NewsletterSqliteModel,
};
use lb_error::Error;
use uuid::Uuid;

use crate::Db;

pub struct NewsletterDao {
    id: Uuid,
    subscribed_at: DateTime<Utc>,
    email: String,
}

impl NewsletterDao {
    /// Subscriptions are keyed on the lower-cased address.
    pub fn new(email: &str) -> Self {
        Self {
            id: Uuid::now_v7(),
            subscribed_at: Utc::now(),
            email: email.trim().to_lowercase(),
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn subscribed_at(&self) -> &DateTime<Utc> {
        &self.subscribed_at
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Rejects an address that is already subscribed with `Error::Duplicate`.
    /// The unique index settles concurrent subscriptions that both pass the
    /// lookup.
    pub async fn db_insert(&self, db: &Db) -> Result<()> {
        if Self::db_select_by_email(db, &self.email).await?.is_some() {
            return Err(duplicate());
        }

        match db {
            Db::SqliteDb(db) => match db.insert_newsletter(&self.to_sqlitedb_model()).await {
                Err(err) if is_unique_violation(&err) => Err(duplicate()),
                res => res,
            },
        }
    }

    pub async fn db_select(db: &Db, id: &Uuid) -> Result<Self> {
        let model = match db {
            Db::SqliteDb(db) => db
                .select_newsletter(id)
                .await?
                .map(Self::from_sqlitedb_model),
        };
        model.ok_or_else(|| Error::NotFound("Subscriber not found".to_owned()).into())
    }

    pub async fn db_select_by_email(db: &Db, email: &str) -> Result<Option<Self>> {
        let email = email.trim().to_lowercase();
        match db {
            Db::SqliteDb(db) => Ok(db
                .select_newsletter_by_email(&email)
                .await?
                .map(Self::from_sqlitedb_model)),
        }
    }

    pub async fn db_select_many(db: &Db) -> Result<Vec<Self>> {
        match db {
            Db::SqliteDb(db) => Ok(db
                .select_many_newsletters()
                .await?
                .into_iter()
                .map(Self::from_sqlitedb_model)
                .collect()),
        }
    }

    pub async fn db_delete(db: &Db, id: &Uuid) -> Result<()> {
        let deleted = match db {
            Db::SqliteDb(db) => db.delete_newsletter(id).await?,
        };
        if deleted == 0 {
            return Err(Error::NotFound("Subscriber not found".to_owned()).into());
        }
        Ok(())
    }

    fn from_sqlitedb_model(model: NewsletterSqliteModel) -> Self {
        Self {
            id: *model.id(),
            subscribed_at: *model.subscribed_at(),
            email: model.email().to_owned(),
        }
    }

    fn to_sqlitedb_model(&self) -> NewsletterSqliteModel {
        NewsletterSqliteModel::new(&self.id, &self.subscribed_at, &self.email)
    }
}

fn duplicate() -> anyhow::Error {
    Error::Duplicate("Email already subscribed".to_owned()).into()
}
