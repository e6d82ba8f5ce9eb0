use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use lb_asset::InboundFile;
use lb_dao::project::ProjectDao;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{inbound_image, non_blank};

#[derive(MultipartForm)]
pub struct InsertOneProjectReqForm {
    name: Option<Text<String>>,
    description: Option<Text<String>>,
    image: Option<Bytes>,
}

impl InsertOneProjectReqForm {
    pub fn name(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    pub fn description(&self) -> Option<&str> {
        non_blank(&self.description)
    }

    pub fn image(&self) -> Option<InboundFile> {
        inbound_image(&self.image)
    }
}

#[derive(Deserialize)]
pub struct FindOneProjectReqPath {
    project_id: Uuid,
}

impl FindOneProjectReqPath {
    pub fn project_id(&self) -> &Uuid {
        &self.project_id
    }
}

#[derive(Deserialize)]
pub struct UpdateOneProjectReqPath {
    project_id: Uuid,
}

impl UpdateOneProjectReqPath {
    pub fn project_id(&self) -> &Uuid {
        &self.project_id
    }
}

#[derive(MultipartForm)]
pub struct UpdateOneProjectReqForm {
    name: Option<Text<String>>,
    description: Option<Text<String>>,
    image: Option<Bytes>,
}

impl UpdateOneProjectReqForm {
    pub fn name(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    pub fn description(&self) -> Option<&str> {
        non_blank(&self.description)
    }

    pub fn image(&self) -> Option<InboundFile> {
        inbound_image(&self.image)
    }
}

#[derive(Deserialize)]
pub struct DeleteOneProjectReqPath {
    project_id: Uuid,
}

impl DeleteOneProjectReqPath {
    pub fn project_id(&self) -> &Uuid {
        &self.project_id
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResJson {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
    description: String,
    image: String,
}

impl ProjectResJson {
    pub fn from_dao(project_data: &ProjectDao) -> Self {
        Self {
            id: *project_data.id(),
            created_at: *project_data.created_at(),
            updated_at: *project_data.updated_at(),
            name: project_data.name().to_owned(),
            description: project_data.description().to_owned(),
            image: project_data.image().to_owned(),
        }
    }
}
