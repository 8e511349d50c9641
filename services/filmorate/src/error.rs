use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use filmorate_domain::validation::FieldError;

/// Filmorate domain error variants.
///
/// Every variant except `Internal` is a recoverable client error; callers fix
/// the input and retry.
#[derive(Debug, thiserror::Error)]
pub enum FilmorateError {
    #[error("user not found")]
    UserNotFound,
    #[error("film not found")]
    FilmNotFound,
    #[error("genre not found")]
    GenreNotFound,
    #[error("rating not found")]
    RatingNotFound,
    #[error("cannot befriend yourself")]
    SelfFriendship,
    #[error("count must be a positive integer")]
    InvalidCount,
    #[error("{0}")]
    InvalidField(#[from] FieldError),
    #[error("like not found")]
    LikeNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl FilmorateError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::FilmNotFound => "FILM_NOT_FOUND",
            Self::GenreNotFound => "GENRE_NOT_FOUND",
            Self::RatingNotFound => "RATING_NOT_FOUND",
            Self::SelfFriendship => "SELF_FRIENDSHIP",
            Self::InvalidCount => "INVALID_COUNT",
            Self::InvalidField(field) => match field {
                FieldError::Email => "INVALID_EMAIL",
                FieldError::Login => "INVALID_LOGIN",
                FieldError::Birthday => "INVALID_BIRTHDAY",
                FieldError::Name => "INVALID_NAME",
                FieldError::Description => "INVALID_DESCRIPTION",
                FieldError::ReleaseDate => "INVALID_RELEASE_DATE",
                FieldError::Duration => "INVALID_DURATION",
            },
            Self::LikeNotFound => "LIKE_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for FilmorateError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound | Self::FilmNotFound | Self::GenreNotFound | Self::RatingNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::SelfFriendship | Self::InvalidCount | Self::InvalidField(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::LikeNotFound => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Only 500s are logged here; the trace layer already records every status.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
