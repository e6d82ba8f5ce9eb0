use actix_multipart::MultipartError;
use actix_web::{
    body::{to_bytes, MessageBody},
    dev::ServiceResponse,
    error::{InternalError, PayloadError},
    http::{header, StatusCode},
    middleware::ErrorHandlerResponse,
    HttpRequest, Result,
};
use futures::executor;
use lb_asset::staging;

use crate::model::Response;

/// Rewraps error responses produced outside the handlers (routing, extractors,
/// static files) into the JSON envelope.
pub fn default_error_handler<B: MessageBody>(
    svc_res: ServiceResponse<B>,
) -> Result<ErrorHandlerResponse<B>> {
    if let Some(content_type) = svc_res.response().headers().get(header::CONTENT_TYPE) {
        if let Ok(content_type) = content_type.to_str() {
            if content_type.to_lowercase() == "application/json" {
                return Ok(ErrorHandlerResponse::Response(svc_res.map_into_left_body()));
            }
        }
    }

    let (req, res) = svc_res.into_parts();

    let status_code = res.status();
    let body = executor::block_on(async {
        match to_bytes(res.into_body()).await {
            Ok(bytes) => match String::from_utf8(bytes.to_vec()) {
                Ok(str) => str,
                Err(err) => err.to_string(),
            },
            Err(err) => err.into().to_string(),
        }
    });
    let message = if body.is_empty() {
        status_code
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_owned()
    } else {
        body
    };

    let res = Response::error_raw(&status_code, &message);

    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, res).map_into_right_body(),
    ))
}

pub fn multipart_error_handler(err: MultipartError, _: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        MultipartError::Payload(PayloadError::Overflow) => staging::too_large().to_string(),
        err => err.to_string(),
    };

    InternalError::from_response(err, Response::error_raw(&StatusCode::BAD_REQUEST, &message))
        .into()
}
