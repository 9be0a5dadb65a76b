use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::bookings::BookingServiceError;
use crate::config::ConfigError;
use crate::listings::ListingServiceError;
use crate::response::ErrorBody;
use crate::store::StoreError;
use crate::telemetry::TelemetryError;
use crate::users::Role;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Listing(#[from] ListingServiceError),
    #[error("{0}")]
    Booking(#[from] BookingServiceError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("authentication required: {0}")]
    Unauthenticated(String),
    #[error("role '{role}' is not permitted to perform this action")]
    Forbidden { role: Role },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Listing(err) => match err {
                ListingServiceError::InvalidId { .. } | ListingServiceError::InvalidRent(_) => {
                    StatusCode::BAD_REQUEST
                }
                ListingServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ListingServiceError::Unauthorized(_) => StatusCode::FORBIDDEN,
                ListingServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Booking(err) => match err {
                BookingServiceError::InvalidId { .. } => StatusCode::BAD_REQUEST,
                BookingServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                BookingServiceError::Unauthorized(_) => StatusCode::FORBIDDEN,
                BookingServiceError::InvalidTransition(_) => StatusCode::CONFLICT,
                BookingServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let body = Json(ErrorBody::new(status, self.to_string()));
        (status, body).into_response()
    }
}
