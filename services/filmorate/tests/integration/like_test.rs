use filmorate::error::FilmorateError;
use filmorate::infra::Store;
use filmorate::usecase::film::DeleteFilmUseCase;
use filmorate::usecase::like::{AddLikeUseCase, CountLikesUseCase, RemoveLikeUseCase};
use filmorate::usecase::popular::TopFilmsUseCase;
use filmorate_domain::id::{FilmId, UserId};

use crate::helpers::{create_film, create_user, memory_store};

fn add(store: &Store) -> AddLikeUseCase<Store, Store, Store> {
    AddLikeUseCase {
        repo: store.clone(),
        films: store.clone(),
        users: store.clone(),
    }
}

fn remove(store: &Store) -> RemoveLikeUseCase<Store, Store, Store> {
    RemoveLikeUseCase {
        repo: store.clone(),
        films: store.clone(),
        users: store.clone(),
    }
}

fn top(store: &Store) -> TopFilmsUseCase<Store, Store> {
    TopFilmsUseCase {
        likes: store.clone(),
        films: store.clone(),
    }
}

// ── Like ledger ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_keep_count_when_like_is_repeated() {
    let store = memory_store();
    let film = create_film(&store, "Heat").await;
    let user = create_user(&store, "neil").await;

    assert_eq!(add(&store).execute(film.id, user.id).await.unwrap(), 1);
    assert_eq!(add(&store).execute(film.id, user.id).await.unwrap(), 1);
}

#[tokio::test]
async fn should_restore_prior_count_after_remove() {
    let store = memory_store();
    let film = create_film(&store, "Heat").await;
    let a = create_user(&store, "neil").await;
    let b = create_user(&store, "vincent").await;

    add(&store).execute(film.id, a.id).await.unwrap();
    add(&store).execute(film.id, b.id).await.unwrap();
    assert_eq!(remove(&store).execute(film.id, b.id).await.unwrap(), 1);

    let count = CountLikesUseCase {
        repo: store.clone(),
        films: store.clone(),
    }
    .execute(film.id)
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn should_reject_removal_of_absent_like_on_every_call() {
    let store = memory_store();
    let film = create_film(&store, "Heat").await;
    let user = create_user(&store, "neil").await;

    for _ in 0..3 {
        let result = remove(&store).execute(film.id, user.id).await;
        assert!(
            matches!(result, Err(FilmorateError::LikeNotFound)),
            "expected LikeNotFound, got {result:?}"
        );
    }
}

#[tokio::test]
async fn should_reject_like_on_unknown_ids() {
    let store = memory_store();
    let film = create_film(&store, "Heat").await;
    let user = create_user(&store, "neil").await;

    let result = add(&store).execute(FilmId(404), user.id).await;
    assert!(matches!(result, Err(FilmorateError::FilmNotFound)));
    let result = add(&store).execute(film.id, UserId(404)).await;
    assert!(matches!(result, Err(FilmorateError::UserNotFound)));
    let result = remove(&store).execute(film.id, UserId(404)).await;
    assert!(matches!(result, Err(FilmorateError::UserNotFound)));
}

// ── Popularity ranking ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_rank_most_liked_film_first() {
    let store = memory_store();
    let first = create_film(&store, "First").await;
    let second = create_film(&store, "Second").await;
    let mut users = Vec::new();
    for login in ["u1", "u2", "u3", "u4", "u5"] {
        users.push(create_user(&store, login).await);
    }
    for user in &users[..3] {
        add(&store).execute(first.id, user.id).await.unwrap();
    }
    for user in &users[3..] {
        add(&store).execute(second.id, user.id).await.unwrap();
    }

    let films = top(&store).execute(1).await.unwrap();
    assert_eq!(films.len(), 1);
    assert_eq!(films[0].id, first.id);
}

#[tokio::test]
async fn should_fill_tail_with_unliked_films_by_id() {
    let store = memory_store();
    let a = create_film(&store, "A").await;
    let b = create_film(&store, "B").await;
    let c = create_film(&store, "C").await;
    let user = create_user(&store, "solo").await;
    add(&store).execute(c.id, user.id).await.unwrap();

    let ids: Vec<FilmId> = top(&store)
        .execute(10)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(ids, vec![c.id, a.id, b.id]);
}

#[tokio::test]
async fn should_reflect_ledger_state_at_call_time() {
    let store = memory_store();
    let a = create_film(&store, "A").await;
    let b = create_film(&store, "B").await;
    let user = create_user(&store, "fickle").await;

    add(&store).execute(b.id, user.id).await.unwrap();
    assert_eq!(top(&store).execute(1).await.unwrap()[0].id, b.id);

    remove(&store).execute(b.id, user.id).await.unwrap();
    add(&store).execute(a.id, user.id).await.unwrap();
    assert_eq!(top(&store).execute(1).await.unwrap()[0].id, a.id);
}

#[tokio::test]
async fn should_drop_deleted_film_from_ranking() {
    let store = memory_store();
    let a = create_film(&store, "A").await;
    let b = create_film(&store, "B").await;
    let user = create_user(&store, "critic").await;
    add(&store).execute(a.id, user.id).await.unwrap();

    DeleteFilmUseCase {
        repo: store.clone(),
    }
    .execute(a.id)
    .await
    .unwrap();

    let ids: Vec<FilmId> = top(&store)
        .execute(10)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(ids, vec![b.id]);
}

#[tokio::test]
async fn should_reject_non_positive_count() {
    let store = memory_store();
    let result = top(&store).execute(0).await;
    assert!(matches!(result, Err(FilmorateError::InvalidCount)));
}
