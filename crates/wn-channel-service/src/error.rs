use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use wn_channel::ChannelError;
use wn_linkbudget::LinkOutcomeError;
use wn_mac::MacModelError;

/// Internal error type threaded through the compute pipeline, classified
/// per the error taxonomy in spec §7 before it reaches the API boundary.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("scene_error: {0}")]
    Scene(#[from] ChannelError),

    #[error("channel_error: {0}")]
    McsTable(#[from] LinkOutcomeError),

    #[error("sinr_error: {0}")]
    Mac(#[from] MacModelError),

    #[error("sinr_error: interferer '{0}' missing a MAC context required by its configured model")]
    InterfererMacMismatch(String),
}

/// HTTP-facing error: status code plus a one-line classified message, per
/// the teacher's `ApiError` shape (status + message, `IntoResponse` via a
/// JSON envelope).
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: msg.into() }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: msg.into() }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: msg.into() }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match &err {
            ServiceError::Scene(ChannelError::SceneFileNotFound(_) | ChannelError::UnknownMaterial(_)) => ApiError::bad_request(err.to_string()),
            ServiceError::Scene(_) => ApiError::internal(err.to_string()),
            ServiceError::McsTable(_) => ApiError::bad_request(err.to_string()),
            ServiceError::Mac(_) | ServiceError::InterfererMacMismatch(_) => ApiError::bad_request(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}
