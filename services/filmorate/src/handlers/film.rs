use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use filmorate_domain::id::{FilmId, GenreId, RatingId};

use crate::domain::types::{Film, Genre, Rating};
use crate::error::FilmorateError;
use crate::state::AppState;
use crate::usecase::film::{
    CreateFilmUseCase, DeleteFilmUseCase, FilmInput, GetFilmUseCase, ListFilmsUseCase,
    UpdateFilmUseCase,
};
use crate::usecase::popular::{DEFAULT_POPULAR_COUNT, TopFilmsUseCase};
use crate::usecase::reference::ReferenceGuard;

// ── Shared types ─────────────────────────────────────────────────────────────

/// `{"id": n}` reference to a genre or rating. Any `name` sent along is ignored.
#[derive(Deserialize)]
pub struct IdRef {
    pub id: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmRequest {
    /// Required on `PUT /films`, ignored on create.
    pub id: Option<FilmId>,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub mpa: IdRef,
    pub genres: Option<Vec<IdRef>>,
}

impl FilmRequest {
    fn into_input(self) -> FilmInput {
        FilmInput {
            name: self.name,
            description: self.description,
            release_date: self.release_date,
            duration: self.duration,
            rating_id: RatingId(self.mpa.id),
            genre_ids: self
                .genres
                .map(|genres| genres.into_iter().map(|g| GenreId(g.id)).collect()),
        }
    }
}

/// Genre or rating as rendered inside a film and by the reference endpoints.
#[derive(Debug, Serialize)]
pub struct NamedResponse {
    pub id: i32,
    pub name: String,
}

impl From<Genre> for NamedResponse {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id.0,
            name: genre.name,
        }
    }
}

impl From<Rating> for NamedResponse {
    fn from(rating: Rating) -> Self {
        Self {
            id: rating.id.0,
            name: rating.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmResponse {
    pub id: FilmId,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub mpa: NamedResponse,
    pub genres: Vec<NamedResponse>,
}

impl From<Film> for FilmResponse {
    fn from(film: Film) -> Self {
        Self {
            id: film.id,
            name: film.name,
            description: film.description,
            release_date: film.release_date,
            duration: film.duration,
            mpa: film.rating.into(),
            genres: film.genres.into_iter().map(NamedResponse::from).collect(),
        }
    }
}

fn films_response(films: Vec<Film>) -> Json<Vec<FilmResponse>> {
    Json(films.into_iter().map(FilmResponse::from).collect())
}

// ── POST /films ──────────────────────────────────────────────────────────────

pub async fn create_film(
    State(state): State<AppState>,
    Json(body): Json<FilmRequest>,
) -> Result<(StatusCode, Json<FilmResponse>), FilmorateError> {
    let usecase = CreateFilmUseCase {
        repo: state.repo(),
        guard: ReferenceGuard { repo: state.repo() },
    };
    let film = usecase.execute(body.into_input()).await?;
    Ok((StatusCode::CREATED, Json(film.into())))
}

// ── PUT /films ───────────────────────────────────────────────────────────────

pub async fn update_film(
    State(state): State<AppState>,
    Json(body): Json<FilmRequest>,
) -> Result<Json<FilmResponse>, FilmorateError> {
    let id = body.id.ok_or(FilmorateError::FilmNotFound)?;
    let usecase = UpdateFilmUseCase {
        repo: state.repo(),
        guard: ReferenceGuard { repo: state.repo() },
    };
    let film = usecase.execute(id, body.into_input()).await?;
    Ok(Json(film.into()))
}

// ── GET /films ───────────────────────────────────────────────────────────────

pub async fn list_films(
    State(state): State<AppState>,
) -> Result<Json<Vec<FilmResponse>>, FilmorateError> {
    let usecase = ListFilmsUseCase { repo: state.repo() };
    Ok(films_response(usecase.execute().await?))
}

// ── GET /films/{id} ──────────────────────────────────────────────────────────

pub async fn get_film(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<FilmResponse>, FilmorateError> {
    let usecase = GetFilmUseCase { repo: state.repo() };
    let film = usecase.execute(FilmId(id)).await?;
    Ok(Json(film.into()))
}

// ── DELETE /films/{id} ───────────────────────────────────────────────────────

pub async fn delete_film(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, FilmorateError> {
    let usecase = DeleteFilmUseCase { repo: state.repo() };
    usecase.execute(FilmId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /films/popular ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PopularQuery {
    pub count: Option<i64>,
}

pub async fn popular_films(
    State(state): State<AppState>,
    Query(query): Query<PopularQuery>,
) -> Result<Json<Vec<FilmResponse>>, FilmorateError> {
    let usecase = TopFilmsUseCase {
        likes: state.repo(),
        films: state.repo(),
    };
    let films = usecase
        .execute(query.count.unwrap_or(DEFAULT_POPULAR_COUNT))
        .await?;
    Ok(films_response(films))
}
