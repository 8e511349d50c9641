use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use filmorate_domain::id::{FilmId, UserId};

use crate::error::FilmorateError;
use crate::state::AppState;
use crate::usecase::like::{AddLikeUseCase, CountLikesUseCase, RemoveLikeUseCase};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikesResponse {
    pub film_id: FilmId,
    pub likes: u64,
}

// ── PUT /films/{id}/like/{userId} ────────────────────────────────────────────

pub async fn add_like(
    State(state): State<AppState>,
    Path((film_id, user_id)): Path<(i64, i64)>,
) -> Result<Json<LikesResponse>, FilmorateError> {
    let usecase = AddLikeUseCase {
        repo: state.repo(),
        films: state.repo(),
        users: state.repo(),
    };
    let film_id = FilmId(film_id);
    let likes = usecase.execute(film_id, UserId(user_id)).await?;
    Ok(Json(LikesResponse { film_id, likes }))
}

// ── DELETE /films/{id}/like/{userId} ─────────────────────────────────────────

pub async fn remove_like(
    State(state): State<AppState>,
    Path((film_id, user_id)): Path<(i64, i64)>,
) -> Result<Json<LikesResponse>, FilmorateError> {
    let usecase = RemoveLikeUseCase {
        repo: state.repo(),
        films: state.repo(),
        users: state.repo(),
    };
    let film_id = FilmId(film_id);
    let likes = usecase.execute(film_id, UserId(user_id)).await?;
    Ok(Json(LikesResponse { film_id, likes }))
}

// ── GET /films/{id}/likes ────────────────────────────────────────────────────

pub async fn count_likes(
    State(state): State<AppState>,
    Path(film_id): Path<i64>,
) -> Result<Json<LikesResponse>, FilmorateError> {
    let usecase = CountLikesUseCase {
        repo: state.repo(),
        films: state.repo(),
    };
    let film_id = FilmId(film_id);
    let likes = usecase.execute(film_id).await?;
    Ok(Json(LikesResponse { film_id, likes }))
}
