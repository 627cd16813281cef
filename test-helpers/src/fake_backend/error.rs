use actix_web::{HttpResponse, ResponseError, body::BoxBody, http::StatusCode};
use serde_json::json;

use super::store::StoreError;

/// Failures as the fake backend reports them.
///
/// The body shapes deliberately vary the way real backends do: some errors
/// carry a `title`, some a `message`, some an `error` field, and unexpected
/// failures are plain text.
#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("Unauthorized")]
    Unauthorized(#[source] anyhow::Error),
    #[error("Forbidden")]
    Forbidden(#[source] anyhow::Error),
    #[error("Bad request")]
    BadRequest(#[source] anyhow::Error),
    #[error("Not found")]
    NotFound(#[source] anyhow::Error),
    #[error("Conflict")]
    Conflict(#[source] anyhow::Error),
    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl ResponseError for APIError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let status = self.status_code();
        match self {
            Self::NotFound(e) => HttpResponse::build(status).json(json!({
                "title": self.to_string(),
                "detail": e.to_string(),
            })),
            Self::Unauthorized(e)
            | Self::BadRequest(e)
            | Self::Conflict(e) => HttpResponse::build(status)
                .json(json!({ "message": e.to_string() })),
            Self::Forbidden(e) => HttpResponse::build(status)
                .json(json!({ "error": e.to_string() })),
            Self::UnexpectedError(e) => {
                tracing::error!("{e:#}");
                HttpResponse::build(status).body(self.to_string())
            }
        }
    }
}

impl From<StoreError> for APIError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidCredentials | StoreError::InvalidSession => {
                APIError::Unauthorized(e.into())
            }
            StoreError::NotPermitted => APIError::Forbidden(e.into()),
            StoreError::ArtistNotFound
            | StoreError::PartyNotFound
            | StoreError::VenueNotFound
            | StoreError::NewsNotFound
            | StoreError::TicketTypeNotFound => APIError::NotFound(e.into()),
            StoreError::EmailTaken | StoreError::InsufficientTickets(_) => {
                APIError::Conflict(e.into())
            }
            StoreError::NotOnSale | StoreError::Invalid(_) => {
                APIError::BadRequest(e.into())
            }
        }
    }
}
