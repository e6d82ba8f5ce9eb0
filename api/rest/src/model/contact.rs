use chrono::{DateTime, Utc};
use lb_dao::contact::ContactDao;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneContactReqJson {
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    full_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "All fields are required"),
        email(message = "Invalid email format")
    )]
    email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    mobile: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    city: String,
}

impl InsertOneContactReqJson {
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

#[derive(Deserialize)]
pub struct ContactReqPath {
    contact_id: Uuid,
}

impl ContactReqPath {
    pub fn contact_id(&self) -> &Uuid {
        &self.contact_id
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResJson {
    id: Uuid,
    created_at: DateTime<Utc>,
    full_name: String,
    email: String,
    mobile: String,
    city: String,
}

impl ContactResJson {
    pub fn from_dao(contact_data: &ContactDao) -> Self {
        Self {
            id: *contact_data.id(),
            created_at: *contact_data.created_at(),
            full_name: contact_data.full_name().to_owned(),
            email: contact_data.email().to_owned(),
            mobile: contact_data.mobile().to_owned(),
            city: contact_data.city().to_owned(),
        }
    }
}
