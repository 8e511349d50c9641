//! `DbStore` against a live PostgreSQL.
//!
//! Runs only when `FILMORATE_TEST_DATABASE_URL` is set. The database is reset
//! with a fresh migration, so point it at a throwaway instance.

use chrono::NaiveDate;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;

use filmorate::domain::repository::{
    FilmRepository, FriendshipRepository, LikeRepository, UserRepository,
};
use filmorate::domain::types::{FilmFields, UserFields};
use filmorate::error::FilmorateError;
use filmorate::infra::DbStore;
use filmorate_domain::friendship::{FriendEdge, FriendshipOp};
use filmorate_domain::id::{FilmId, GenreId, RatingId, UserId};
use filmorate_domain::popularity::{LikeTally, rank};
use filmorate_migration::Migrator;

const DATABASE_URL_ENV: &str = "FILMORATE_TEST_DATABASE_URL";

async fn fresh_store() -> Option<DbStore> {
    let url = std::env::var(DATABASE_URL_ENV).ok()?;
    let db = Database::connect(&url).await.unwrap();
    Migrator::fresh(&db).await.unwrap();
    Some(DbStore { db })
}

fn user_fields(login: &str) -> UserFields {
    UserFields {
        email: format!("{login}@example.com"),
        login: login.to_owned(),
        name: login.to_owned(),
        birthday: NaiveDate::from_ymd_opt(1988, 2, 29).unwrap(),
    }
}

fn film_fields(name: &str) -> FilmFields {
    FilmFields {
        name: name.to_owned(),
        description: format!("{name} description"),
        release_date: NaiveDate::from_ymd_opt(1999, 3, 31).unwrap(),
        duration: 136,
        rating_id: RatingId(4),
    }
}

async fn check_users(store: &DbStore) {
    let neo = UserRepository::create(store, &user_fields("neo")).await.unwrap();
    assert!(matches!(
        UserRepository::create(store, &user_fields("neo")).await,
        Err(FilmorateError::UserAlreadyExists)
    ));
    assert!(
        UserRepository::update(store, UserId(neo.id.0 + 1000), &user_fields("ghost"))
            .await
            .unwrap()
            .is_none()
    );
    let renamed = UserRepository::update(store, neo.id, &user_fields("thomas"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.login, "thomas");
}

async fn check_likes_and_tally(store: &DbStore) {
    let fan = UserRepository::create(store, &user_fields("fan")).await.unwrap();
    let critic = UserRepository::create(store, &user_fields("critic")).await.unwrap();
    let matrix = FilmRepository::create(store, &film_fields("Matrix"), &[GenreId(6), GenreId(2)])
        .await
        .unwrap();
    let quiet = FilmRepository::create(store, &film_fields("Quiet"), &[])
        .await
        .unwrap();
    let genre_ids: Vec<GenreId> = matrix.genres.iter().map(|g| g.id).collect();
    assert_eq!(genre_ids, vec![GenreId(2), GenreId(6)]);

    assert!(store.add(matrix.id, fan.id).await.unwrap());
    assert!(!store.add(matrix.id, fan.id).await.unwrap());
    assert!(store.add(matrix.id, critic.id).await.unwrap());
    assert_eq!(store.count(matrix.id).await.unwrap(), 2);

    // Films without likes still appear in the tally.
    let ranked = rank(store.tally().await.unwrap(), 10);
    assert_eq!(
        ranked,
        vec![
            LikeTally {
                film_id: matrix.id,
                likes: 2
            },
            LikeTally {
                film_id: quiet.id,
                likes: 0
            },
        ]
    );

    assert!(matches!(
        store.add(FilmId(quiet.id.0 + 1000), fan.id).await,
        Err(FilmorateError::FilmNotFound)
    ));

    assert!(store.remove(matrix.id, critic.id).await.unwrap());
    assert!(!store.remove(matrix.id, critic.id).await.unwrap());

    assert!(FilmRepository::delete(store, matrix.id).await.unwrap());
    assert_eq!(store.count(matrix.id).await.unwrap(), 0);
}

async fn check_friendships(store: &DbStore) {
    let a = UserRepository::create(store, &user_fields("alice")).await.unwrap().id;
    let b = UserRepository::create(store, &user_fields("bob")).await.unwrap().id;

    store.apply(a, b, FriendshipOp::Request).await.unwrap();
    store.apply(b, a, FriendshipOp::Request).await.unwrap();
    let mut edges = store.edges_of(a).await.unwrap();
    edges.sort_by_key(|e| e.from);
    assert!(edges.iter().all(|e| e.confirmed));
    assert_eq!(edges.len(), 2);

    store.apply(a, b, FriendshipOp::Remove).await.unwrap();
    assert_eq!(
        store.edges_of(b).await.unwrap(),
        vec![FriendEdge {
            from: b,
            to: a,
            confirmed: false
        }]
    );

    let c = UserRepository::create(store, &user_fields("carol")).await.unwrap().id;
    let (s1, s2) = (store.clone(), store.clone());
    let h1 = tokio::spawn(async move { s1.apply(a, c, FriendshipOp::Request).await });
    let h2 = tokio::spawn(async move { s2.apply(c, a, FriendshipOp::Request).await });
    h1.await.unwrap().unwrap();
    h2.await.unwrap().unwrap();
    let crossing: Vec<FriendEdge> = store
        .edges_of(c)
        .await
        .unwrap()
        .into_iter()
        .filter(|e| e.from == c || e.to == c)
        .collect();
    assert_eq!(crossing.len(), 2);
    assert!(crossing.iter().all(|e| e.confirmed));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn should_honor_repository_contract_on_postgres() {
    let Some(store) = fresh_store().await else {
        eprintln!("{DATABASE_URL_ENV} not set, skipping");
        return;
    };
    check_users(&store).await;
    check_likes_and_tally(&store).await;
    check_friendships(&store).await;
}
