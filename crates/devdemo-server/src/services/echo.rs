use axum::{extract::rejection::JsonRejection, Json};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct EchoIn {
    pub msg: String,
}

#[derive(Debug, Serialize)]
pub struct EchoOut {
    pub msg: String,
    /// Length in characters, not bytes.
    pub length: usize,
}

/// `POST /echo`: return the message together with its character count.
pub async fn echo(payload: Result<Json<EchoIn>, JsonRejection>) -> Result<Json<EchoOut>, ApiError> {
    let Json(EchoIn { msg }) = payload?;
    let length = msg.chars().count();
    Ok(Json(EchoOut { msg, length }))
}
