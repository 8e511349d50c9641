//! Field-level validation failures.

/// A single rejected input field.
///
/// Raised before any store access, so a request carrying one of these never
/// reaches the entity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("email must be a well-formed address")]
    Email,
    #[error("login must be non-blank and contain no spaces")]
    Login,
    #[error("birthday cannot be in the future")]
    Birthday,
    #[error("name must not be blank")]
    Name,
    #[error("description must be non-blank and at most 200 characters")]
    Description,
    #[error("release date cannot be earlier than 1895-12-28")]
    ReleaseDate,
    #[error("duration must be a positive number of minutes")]
    Duration,
}
