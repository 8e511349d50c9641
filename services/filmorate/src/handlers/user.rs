use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use filmorate_domain::id::UserId;

use crate::domain::types::User;
use crate::error::FilmorateError;
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserUseCase, GetUserUseCase, ListUsersUseCase, UpdateUserUseCase, UserInput,
};

// ── Shared types ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UserRequest {
    /// Required on `PUT /users`, ignored on create.
    pub id: Option<UserId>,
    pub email: String,
    pub login: String,
    pub name: Option<String>,
    pub birthday: NaiveDate,
}

impl UserRequest {
    fn into_input(self) -> UserInput {
        UserInput {
            email: self.email,
            login: self.login,
            name: self.name,
            birthday: self.birthday,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: NaiveDate,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            login: user.login,
            name: user.name,
            birthday: user.birthday,
        }
    }
}

// ── POST /users ──────────────────────────────────────────────────────────────

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<UserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), FilmorateError> {
    let usecase = CreateUserUseCase { repo: state.repo() };
    let user = usecase.execute(body.into_input()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── PUT /users ───────────────────────────────────────────────────────────────

pub async fn update_user(
    State(state): State<AppState>,
    Json(body): Json<UserRequest>,
) -> Result<Json<UserResponse>, FilmorateError> {
    let id = body.id.ok_or(FilmorateError::UserNotFound)?;
    let usecase = UpdateUserUseCase { repo: state.repo() };
    let user = usecase.execute(id, body.into_input()).await?;
    Ok(Json(user.into()))
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, FilmorateError> {
    let usecase = ListUsersUseCase { repo: state.repo() };
    let users = usecase.execute().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, FilmorateError> {
    let usecase = GetUserUseCase { repo: state.repo() };
    let user = usecase.execute(UserId(id)).await?;
    Ok(Json(user.into()))
}
