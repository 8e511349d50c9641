use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use filmorate_domain::friendship::FriendshipStatus;
use filmorate_domain::id::UserId;

use crate::domain::types::Friend;
use crate::error::FilmorateError;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::friendship::{
    ListFriendsUseCase, MutualFriendsUseCase, RemoveFriendUseCase, RequestFriendUseCase,
};

#[derive(Debug, Serialize)]
pub struct FriendResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub friendship: FriendshipStatus,
}

impl From<Friend> for FriendResponse {
    fn from(friend: Friend) -> Self {
        Self {
            user: friend.user.into(),
            friendship: friend.status,
        }
    }
}

// ── PUT /users/{id}/friends/{friendId} ───────────────────────────────────────

pub async fn add_friend(
    State(state): State<AppState>,
    Path((id, friend_id)): Path<(i64, i64)>,
) -> Result<Json<FriendResponse>, FilmorateError> {
    let usecase = RequestFriendUseCase {
        repo: state.repo(),
        users: state.repo(),
    };
    let friend = usecase.execute(UserId(id), UserId(friend_id)).await?;
    Ok(Json(friend.into()))
}

// ── DELETE /users/{id}/friends/{friendId} ────────────────────────────────────

pub async fn remove_friend(
    State(state): State<AppState>,
    Path((id, friend_id)): Path<(i64, i64)>,
) -> Result<StatusCode, FilmorateError> {
    let usecase = RemoveFriendUseCase {
        repo: state.repo(),
        users: state.repo(),
    };
    usecase.execute(UserId(id), UserId(friend_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users/{id}/friends ──────────────────────────────────────────────────

pub async fn list_friends(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<FriendResponse>>, FilmorateError> {
    let usecase = ListFriendsUseCase {
        repo: state.repo(),
        users: state.repo(),
    };
    let friends = usecase.execute(UserId(id)).await?;
    Ok(Json(friends.into_iter().map(FriendResponse::from).collect()))
}

// ── GET /users/{id}/friends/common/{otherId} ─────────────────────────────────

pub async fn common_friends(
    State(state): State<AppState>,
    Path((id, other_id)): Path<(i64, i64)>,
) -> Result<Json<Vec<UserResponse>>, FilmorateError> {
    let usecase = MutualFriendsUseCase {
        repo: state.repo(),
        users: state.repo(),
    };
    let users = usecase.execute(UserId(id), UserId(other_id)).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
