//! HTTP mapping for [`DemoError`].

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use devdemo_core::error::{ClientCode, DemoError};

/// Error returned by handlers; renders as `{"code": ..., "msg": ...}`.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] DemoError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.client_code() {
            ClientCode::BadRequest => StatusCode::BAD_REQUEST,
            ClientCode::NotFound => StatusCode::NOT_FOUND,
            ClientCode::InvalidPayload => StatusCode::UNPROCESSABLE_ENTITY,
            ClientCode::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ClientCode::UnsupportedVersion | ClientCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let msg = rejection.body_text();
        let err = match rejection {
            JsonRejection::JsonDataError(_) => DemoError::InvalidPayload(msg),
            JsonRejection::MissingJsonContentType(_) => DemoError::UnsupportedMediaType(msg),
            _ => DemoError::BadRequest(msg),
        };
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = json!({
            "code": self.0.client_code().as_str(),
            "msg": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
