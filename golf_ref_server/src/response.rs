use axum::response::{IntoResponse, Response};
use axum::http::StatusCode;
use serde::{Serialize, Deserialize};
use tracing::error;

use golf_ref_entities::policy::eligibility::AssignmentRefusal;

#[derive(Debug, Clone)]
pub struct APIError {
    pub message: String,
    pub code: StatusCode,
    pub reason: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct APIErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl APIError {
    pub fn new(message: String) -> Self {
        APIError {
            message,
            code: StatusCode::INTERNAL_SERVER_ERROR,
            reason: None,
        }
    }

    /// Policy refusals keep their machine readable reason code in the
    /// body. `Forbidden` is an authority problem, everything else is a
    /// validation failure.
    pub fn refusal(refusal: AssignmentRefusal) -> Self {
        let code = match refusal {
            AssignmentRefusal::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::BAD_REQUEST,
        };
        APIError {
            message: refusal.to_string(),
            code,
            reason: Some(refusal.code()),
        }
    }
}

impl From<anyhow::Error> for APIError {
    fn from(err: anyhow::Error) -> Self {
        error!("Error while handling request {}", err.to_string());
        APIError { message: err.to_string(), code: StatusCode::INTERNAL_SERVER_ERROR, reason: None }
    }
}

impl IntoResponse for APIError
{
    fn into_response(self) -> Response {
        let mut res = serde_json::to_string(&APIErrorResponse {
            message: self.message.clone(),
            reason: self.reason.map(|r| r.to_string()),
        }).unwrap().into_response();
        *res.status_mut() = self.code;
        res
    }
}

impl From<(StatusCode, &str)> for APIError {
    fn from((code, message): (StatusCode, &str)) -> Self {
        error!("Error while handling request {}", message);
        APIError { message: message.to_string(), code, reason: None }
    }
}

impl From<(StatusCode, String)> for APIError {
    fn from((code, message): (StatusCode, String)) -> Self {
        error!("Error while handling request {}", message);
        APIError { message, code, reason: None }
    }
}

pub fn handle_error<E>(err: E) -> APIError
where
    E: std::error::Error
{
    error!("Error while handling request {}", err);
    APIError::new(err.to_string())
}

pub fn handle_error_dyn(err: Box<dyn std::error::Error>) -> APIError
{
    error!("Error while handling request {}", err);
    APIError::new(err.to_string())
}
