use actix_multipart::form::{bytes::Bytes, text::Text, MultipartFormConfig};
use actix_web::{http::StatusCode, HttpResponse, HttpResponseBuilder};
use lb_asset::{staging::MAX_UPLOAD_SIZE, InboundFile};
use lb_error::Error;
use serde::Serialize;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::error_handler::multipart_error_handler;

pub mod client;
pub mod contact;
pub mod newsletter;
pub mod project;

// Slack above the file cap so oversized uploads still reach the size check
// with its own message; text fields share the in-memory budget.
const MULTIPART_MEMORY_LIMIT: usize = MAX_UPLOAD_SIZE + 1024 * 1024;

pub fn multipart_config() -> MultipartFormConfig {
    MultipartFormConfig::default()
        .memory_limit(MULTIPART_MEMORY_LIMIT)
        .total_limit(MULTIPART_MEMORY_LIMIT)
        .error_handler(multipart_error_handler)
}

#[derive(Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorRes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl Response {
    pub fn data<T: Serialize>(status_code: &StatusCode, data: T) -> HttpResponse {
        match serde_json::to_value(data) {
            Ok(data) => HttpResponseBuilder::new(*status_code).json(Self {
                error: None,
                data: Some(data),
            }),
            Err(err) => Self::error(&Error::Internal(err.to_string())),
        }
    }

    pub fn error(err: &Error) -> HttpResponse {
        let status_code = match err {
            Error::Validation(_) | Error::Processing(_) | Error::Duplicate(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self::error_raw(&status_code, &err.to_string())
    }

    pub fn error_raw(status_code: &StatusCode, message: &str) -> HttpResponse {
        if status_code.is_server_error() {
            lb_log::error(None, message);
        } else {
            lb_log::debug(None, message);
        }

        HttpResponseBuilder::new(*status_code).json(Self {
            error: Some(ErrorRes {
                status: match status_code.canonical_reason() {
                    Some(status_code) => status_code.to_owned(),
                    None => "Unknown".to_owned(),
                },
                message: message.to_owned(),
            }),
            data: None,
        })
    }
}

#[derive(Serialize)]
pub struct ErrorRes {
    status: String,
    message: String,
}

#[derive(Serialize)]
pub struct DeleteResJson {
    id: Uuid,
}

impl DeleteResJson {
    pub fn new(id: &Uuid) -> Self {
        Self { id: *id }
    }
}

/// A "missing field" failure wins over a malformed one, so an empty email
/// reports the field as required rather than badly formatted.
pub fn validation_error(errors: &ValidationErrors) -> Error {
    let field_errors = errors.field_errors();
    let mut field_errors = field_errors
        .values()
        .flat_map(|errors| errors.iter())
        .collect::<Vec<_>>();
    field_errors.sort_by_key(|err| err.code != "length");

    let message = field_errors
        .first()
        .and_then(|err| err.message.as_ref())
        .map(|message| message.to_string())
        .unwrap_or_else(|| errors.to_string());

    Error::Validation(message)
}

/// Trimmed text of an optional multipart field; blank counts as absent.
pub fn non_blank(text: &Option<Text<String>>) -> Option<&str> {
    text.as_ref()
        .map(|text| text.0.trim())
        .filter(|text| !text.is_empty())
}

/// The `image` part of a form, if the client sent one. A part with neither a
/// file name nor content is how browsers encode an empty file input.
pub fn inbound_image(image: &Option<Bytes>) -> Option<InboundFile> {
    let image = image.as_ref()?;
    if image.file_name.is_none() && image.data.is_empty() {
        return None;
    }

    Some(InboundFile::new(
        "image",
        &image.file_name,
        &image.content_type,
        image.data.clone(),
    ))
}
