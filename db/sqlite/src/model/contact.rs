use chrono::{DateTime, Utc};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(FromRow)]
pub struct ContactModel {
    id: Uuid,
    created_at: DateTime<Utc>,
    full_name: String,
    email: String,
    mobile: String,
    city: String,
}

impl ContactModel {
    pub fn new(
        id: &Uuid,
        created_at: &DateTime<Utc>,
        full_name: &str,
        email: &str,
        mobile: &str,
        city: &str,
    ) -> Self {
        Self {
            id: *id,
            created_at: *created_at,
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
}
