use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use lb_asset::InboundFile;
use lb_dao::client::ClientDao;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{inbound_image, non_blank};

#[derive(MultipartForm)]
pub struct InsertOneClientReqForm {
    name: Option<Text<String>>,
    description: Option<Text<String>>,
    designation: Option<Text<String>>,
    image: Option<Bytes>,
}

impl InsertOneClientReqForm {
    pub fn name(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    pub fn description(&self) -> Option<&str> {
        non_blank(&self.description)
    }

    pub fn designation(&self) -> Option<&str> {
        non_blank(&self.designation)
    }

    pub fn image(&self) -> Option<InboundFile> {
        inbound_image(&self.image)
    }
}

#[derive(Deserialize)]
pub struct ClientReqPath {
    client_id: Uuid,
}

impl ClientReqPath {
    pub fn client_id(&self) -> &Uuid {
        &self.client_id
    }
}

#[derive(MultipartForm)]
pub struct UpdateOneClientReqForm {
    name: Option<Text<String>>,
    description: Option<Text<String>>,
    designation: Option<Text<String>>,
    image: Option<Bytes>,
}

impl UpdateOneClientReqForm {
    pub fn name(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    pub fn description(&self) -> Option<&str> {
        non_blank(&self.description)
    }

    pub fn designation(&self) -> Option<&str> {
        non_blank(&self.designation)
    }

    pub fn image(&self) -> Option<InboundFile> {
        inbound_image(&self.image)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResJson {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
    description: String,
    designation: String,
    image: String,
}

impl ClientResJson {
    pub fn from_dao(client_data: &ClientDao) -> Self {
        Self {
            id: *client_data.id(),
            created_at: *client_data.created_at(),
            updated_at: *client_data.updated_at(),
            name: client_data.name().to_owned(),
            description: client_data.description().to_owned(),
            designation: client_data.designation().to_owned(),
            image: client_data.image().to_owned(),
        }
    }
}
