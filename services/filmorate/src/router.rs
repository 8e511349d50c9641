use axum::{
    Router,
    routing::{get, put},
};

use filmorate_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    film::{create_film, delete_film, get_film, list_films, popular_films, update_film},
    friend::{add_friend, common_friends, list_friends, remove_friend},
    health::{healthz, readyz},
    like::{add_like, count_likes, remove_like},
    reference::{get_genre, get_rating, list_genres, list_ratings},
    user::{create_user, get_user, list_users, update_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", get(list_users).post(create_user).put(update_user))
        .route("/users/{id}", get(get_user))
        // Friends
        .route("/users/{id}/friends", get(list_friends))
        .route(
            "/users/{id}/friends/{friend_id}",
            put(add_friend).delete(remove_friend),
        )
        .route("/users/{id}/friends/common/{other_id}", get(common_friends))
        // Films
        .route("/films", get(list_films).post(create_film).put(update_film))
        .route("/films/popular", get(popular_films))
        .route("/films/{id}", get(get_film).delete(delete_film))
        // Likes
        .route("/films/{id}/like/{user_id}", put(add_like).delete(remove_like))
        .route("/films/{id}/likes", get(count_likes))
        // Reference data
        .route("/genres", get(list_genres))
        .route("/genres/{id}", get(get_genre))
        .route("/mpa", get(list_ratings))
        .route("/mpa/{id}", get(get_rating))
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
