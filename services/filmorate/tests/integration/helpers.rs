use axum_test::TestServer;
use chrono::NaiveDate;
use serde_json::{Value, json};

use filmorate::domain::types::{Film, User};
use filmorate::infra::{MemoryStore, Store};
use filmorate::router::build_router;
use filmorate::state::AppState;
use filmorate::usecase::film::{CreateFilmUseCase, FilmInput};
use filmorate::usecase::reference::ReferenceGuard;
use filmorate::usecase::user::{CreateUserUseCase, UserInput};
use filmorate_domain::id::{GenreId, RatingId};

pub fn memory_store() -> Store {
    Store::Memory(MemoryStore::new())
}

pub async fn create_user(store: &Store, login: &str) -> User {
    CreateUserUseCase {
        repo: store.clone(),
    }
    .execute(UserInput {
        email: format!("{login}@example.com"),
        login: login.to_owned(),
        name: None,
        birthday: NaiveDate::from_ymd_opt(1991, 3, 14).unwrap(),
    })
    .await
    .unwrap()
}

pub fn film_input(name: &str, genre_ids: &[i32]) -> FilmInput {
    FilmInput {
        name: name.to_owned(),
        description: format!("{name} description"),
        release_date: NaiveDate::from_ymd_opt(2001, 9, 1).unwrap(),
        duration: 120,
        rating_id: RatingId(3),
        genre_ids: Some(genre_ids.iter().copied().map(GenreId).collect()),
    }
}

pub async fn create_film(store: &Store, name: &str) -> Film {
    CreateFilmUseCase {
        repo: store.clone(),
        guard: ReferenceGuard {
            repo: store.clone(),
        },
    }
    .execute(film_input(name, &[]))
    .await
    .unwrap()
}

pub fn test_server() -> TestServer {
    let state = AppState {
        store: memory_store(),
    };
    TestServer::new(build_router(state)).unwrap()
}

pub fn user_body(login: &str) -> Value {
    json!({
        "email": format!("{login}@example.com"),
        "login": login,
        "name": "",
        "birthday": "1990-01-01",
    })
}

pub fn film_body(name: &str) -> Value {
    json!({
        "name": name,
        "description": "A film worth watching",
        "releaseDate": "1999-03-31",
        "duration": 136,
        "mpa": { "id": 4 },
        "genres": [{ "id": 6 }, { "id": 4 }, { "id": 6 }],
    })
}
