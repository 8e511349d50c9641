use axum::{
    Json,
    extract::{Path, State},
};

use filmorate_domain::id::{GenreId, RatingId};

use crate::error::FilmorateError;
use crate::handlers::film::NamedResponse;
use crate::state::AppState;
use crate::usecase::reference::{
    GetGenreUseCase, GetRatingUseCase, ListGenresUseCase, ListRatingsUseCase,
};

// ── GET /genres ──────────────────────────────────────────────────────────────

pub async fn list_genres(
    State(state): State<AppState>,
) -> Result<Json<Vec<NamedResponse>>, FilmorateError> {
    let usecase = ListGenresUseCase { repo: state.repo() };
    let genres = usecase.execute().await?;
    Ok(Json(genres.into_iter().map(NamedResponse::from).collect()))
}

// ── GET /genres/{id} ─────────────────────────────────────────────────────────

pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<NamedResponse>, FilmorateError> {
    let usecase = GetGenreUseCase { repo: state.repo() };
    let genre = usecase.execute(GenreId(id)).await?;
    Ok(Json(genre.into()))
}

// ── GET /mpa ─────────────────────────────────────────────────────────────────

pub async fn list_ratings(
    State(state): State<AppState>,
) -> Result<Json<Vec<NamedResponse>>, FilmorateError> {
    let usecase = ListRatingsUseCase { repo: state.repo() };
    let ratings = usecase.execute().await?;
    Ok(Json(ratings.into_iter().map(NamedResponse::from).collect()))
}

// ── GET /mpa/{id} ────────────────────────────────────────────────────────────

pub async fn get_rating(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<NamedResponse>, FilmorateError> {
    let usecase = GetRatingUseCase { repo: state.repo() };
    let rating = usecase.execute(RatingId(id)).await?;
    Ok(Json(rating.into()))
}
