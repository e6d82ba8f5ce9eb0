use anyhow::Result;
use chrono::{DateTime, Utc};
use lb_db_sqlite::model::contact::ContactModel as ContactSqliteModel;
use lb_error::Error;
use uuid::Uuid;

use crate::Db;

pub struct ContactDao {
    id: Uuid,
    created_at: DateTime<Utc>,
    full_name: String,
    email: String,
    mobile: String,
    city: String,
}

impl ContactDao {
    pub fn new(full_name: &str, email: &str, mobile: &str, city: &str) -> Self {
        Self {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
            full_name: full_name.to_owned(),
            email: email.to_owned(),
            mobile: mobile.to_owned(),
            city: city.to_owned(),
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn mobile(&self) -> &str {
        &self.mobile
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub async fn db_insert(&self, db: &Db) -> Result<()> {
        match db {
            Db::SqliteDb(db) => db.insert_contact(&self.to_sqlitedb_model()).await,
        }
    }

    pub async fn db_select(db: &Db, id: &Uuid) -> Result<Self> {
        let model = match db {
            Db::SqliteDb(db) => db.select_contact(id).await?.map(Self::from_sqlitedb_model),
        };
        model.ok_or_else(|| Error::NotFound("Contact not found".to_owned()).into())
    }

    pub async fn db_select_many(db: &Db) -> Result<Vec<Self>> {
        match db {
            Db::SqliteDb(db) => Ok(db
                .select_many_contacts()
                .await?
                .into_iter()
                .map(Self::from_sqlitedb_model)
                .collect()),
        }
    }

    pub async fn db_delete(db: &Db, id: &Uuid) -> Result<()> {
        let deleted = match db {
            Db::SqliteDb(db) => db.delete_contact(id).await?,
        };
        if deleted == 0 {
            return Err(Error::NotFound("Contact not found".to_owned()).into());
        }
        Ok(())
    }

    fn from_sqlitedb_model(model: ContactSqliteModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            full_name: model.full_name().to_owned(),
            email: model.email().to_owned(),
            mobile: model.mobile().to_owned(),
            city: model.city().to_owned(),
        }
    }

    fn to_sqlitedb_model(&self) -> ContactSqliteModel {
        ContactSqliteModel::new(
            &self.id,
            &self.created_at,
            &self.full_name,
            &self.email,
            &self.mobile,
            &self.city,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::temp_db;

    #[tokio::test]
    async fn insert_list_and_delete() {
        let (_dir, db) = temp_db().await;

        let contact = ContactDao::new("Ana Lima", "ana@example.com", "+5511999990000", "Recife");
        contact.db_insert(&db).await.unwrap();

        let contacts = ContactDao::db_select_many(&db).await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].full_name(), "Ana Lima");
        assert_eq!(contacts[0].city(), "Recife");

        ContactDao::db_delete(&db, contact.id()).await.unwrap();
        let err = ContactDao::db_select(&db, contact.id()).await.err().unwrap();
        assert!(matches!(Error::from(err), Error::NotFound(_)));
    }
}
