use filmorate::error::FilmorateError;
use filmorate::usecase::film::{
    CreateFilmUseCase, DeleteFilmUseCase, GetFilmUseCase, ListFilmsUseCase, UpdateFilmUseCase,
};
use filmorate::usecase::like::{AddLikeUseCase, CountLikesUseCase};
use filmorate::usecase::reference::ReferenceGuard;
use filmorate_domain::id::{FilmId, GenreId, RatingId};

use crate::helpers::{create_film, create_user, film_input, memory_store};

#[tokio::test]
async fn should_store_film_with_resolved_references() {
    let store = memory_store();
    let film = CreateFilmUseCase {
        repo: store.clone(),
        guard: ReferenceGuard {
            repo: store.clone(),
        },
    }
    .execute(film_input("Spirited Away", &[3, 2, 3]))
    .await
    .unwrap();

    assert_eq!(film.rating.name, "PG-13");
    let genres: Vec<(GenreId, &str)> = film.genres.iter().map(|g| (g.id, g.name.as_str())).collect();
    assert_eq!(genres, vec![(GenreId(2), "Drama"), (GenreId(3), "Animation")]);

    let loaded = GetFilmUseCase {
        repo: store.clone(),
    }
    .execute(film.id)
    .await
    .unwrap();
    assert_eq!(loaded, film);
}

#[tokio::test]
async fn should_persist_nothing_when_genre_is_unknown() {
    let store = memory_store();
    let result = CreateFilmUseCase {
        repo: store.clone(),
        guard: ReferenceGuard {
            repo: store.clone(),
        },
    }
    .execute(film_input("Ghost", &[1, 99]))
    .await;
    assert!(matches!(result, Err(FilmorateError::GenreNotFound)));

    let films = ListFilmsUseCase {
        repo: store.clone(),
    }
    .execute()
    .await
    .unwrap();
    assert!(films.is_empty());
}

#[tokio::test]
async fn should_reject_unknown_rating() {
    let store = memory_store();
    let mut input = film_input("Ghost", &[]);
    input.rating_id = RatingId(0);
    let result = CreateFilmUseCase {
        repo: store.clone(),
        guard: ReferenceGuard {
            repo: store.clone(),
        },
    }
    .execute(input)
    .await;
    assert!(matches!(result, Err(FilmorateError::RatingNotFound)));
}

#[tokio::test]
async fn should_replace_or_keep_genres_on_update() {
    let store = memory_store();
    let film = create_film(&store, "Alien").await;
    let update = UpdateFilmUseCase {
        repo: store.clone(),
        guard: ReferenceGuard {
            repo: store.clone(),
        },
    };

    let updated = update
        .execute(film.id, film_input("Alien", &[4]))
        .await
        .unwrap();
    assert_eq!(updated.genres.len(), 1);

    let mut keep = film_input("Alien: Director's Cut", &[]);
    keep.genre_ids = None;
    let updated = update.execute(film.id, keep).await.unwrap();
    assert_eq!(updated.name, "Alien: Director's Cut");
    assert_eq!(updated.genres[0].id, GenreId(4));
}

#[tokio::test]
async fn should_reject_update_with_unknown_genre_without_changes() {
    let store = memory_store();
    let film = create_film(&store, "Alien").await;
    let result = UpdateFilmUseCase {
        repo: store.clone(),
        guard: ReferenceGuard {
            repo: store.clone(),
        },
    }
    .execute(film.id, film_input("Aliens", &[77]))
    .await;
    assert!(matches!(result, Err(FilmorateError::GenreNotFound)));

    let loaded = GetFilmUseCase {
        repo: store.clone(),
    }
    .execute(film.id)
    .await
    .unwrap();
    assert_eq!(loaded.name, "Alien");
}

#[tokio::test]
async fn should_cascade_likes_on_delete() {
    let store = memory_store();
    let film = create_film(&store, "Alien").await;
    let user = create_user(&store, "ripley").await;
    AddLikeUseCase {
        repo: store.clone(),
        films: store.clone(),
        users: store.clone(),
    }
    .execute(film.id, user.id)
    .await
    .unwrap();

    let delete = DeleteFilmUseCase {
        repo: store.clone(),
    };
    delete.execute(film.id).await.unwrap();
    assert!(matches!(
        delete.execute(film.id).await,
        Err(FilmorateError::FilmNotFound)
    ));

    let count = CountLikesUseCase {
        repo: store.clone(),
        films: store.clone(),
    }
    .execute(film.id)
    .await;
    assert!(matches!(count, Err(FilmorateError::FilmNotFound)));
}

#[tokio::test]
async fn should_return_film_not_found_for_unknown_id() {
    let store = memory_store();
    let result = GetFilmUseCase {
        repo: store.clone(),
    }
    .execute(FilmId(12))
    .await;
    assert!(matches!(result, Err(FilmorateError::FilmNotFound)));
}
