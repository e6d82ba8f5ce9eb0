use chrono::{DateTime, Utc};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(FromRow)]
pub struct NewsletterModel {
    id: Uuid,
    subscribed_at: DateTime<Utc>,
    email: String,
}

impl NewsletterModel {
    pub fn new(id: &Uuid, subscribed_at: &DateTime<Utc>, email: &str) -> Self {
        Self {
            id: *id,
            subscribed_at: *subscribed_at,
            email: email.to_owned(),
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
}
