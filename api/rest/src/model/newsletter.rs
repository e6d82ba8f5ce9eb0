use chrono::{DateTime, Utc};
use lb_dao::newsletter::NewsletterDao;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeReqJson {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email format")
    )]
    email: String,
}

impl SubscribeReqJson {
    pub fn email(&self) -> &str {
        &self.email
    }
}

#[derive(Deserialize)]
pub struct SubscriberReqPath {
    subscriber_id: Uuid,
}

impl SubscriberReqPath {
    pub fn subscriber_id(&self) -> &Uuid {
        &self.subscriber_id
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberResJson {
    id: Uuid,
    subscribed_at: DateTime<Utc>,
    email: String,
}

impl SubscriberResJson {
    pub fn from_dao(subscriber_data: &NewsletterDao) -> Self {
        Self {
            id: *subscriber_data.id(),
            subscribed_at: *subscriber_data.subscribed_at(),
            email: subscriber_data.email().to_owned(),
        }
    }
}
