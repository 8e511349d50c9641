use chrono::NaiveDate;

use filmorate_domain::friendship::FriendshipStatus;
use filmorate_domain::id::{FilmId, GenreId, RatingId, UserId};

/// Registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: NaiveDate,
}

/// Validated user fields for create/update. `name` is already defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// MPA content rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    pub id: RatingId,
    pub name: String,
}

/// A film with its rating and genres resolved. Genres are sorted by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Film {
    pub id: FilmId,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    /// Minutes.
    pub duration: i32,
    pub rating: Rating,
    pub genres: Vec<Genre>,
}

/// Validated scalar film fields for create/update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmFields {
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub rating_id: RatingId,
}

/// A user as seen in someone's friend list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Friend {
    pub user: User,
    pub status: FriendshipStatus,
}

/// Genre reference rows, as seeded by the `create_reference_tables` migration.
pub const GENRES: [(i32, &str); 6] = [
    (1, "Comedy"),
    (2, "Drama"),
    (3, "Animation"),
    (4, "Thriller"),
    (5, "Documentary"),
    (6, "Action"),
];

/// Rating reference rows, as seeded by the `create_reference_tables` migration.
pub const RATINGS: [(i32, &str); 5] = [(1, "G"), (2, "PG"), (3, "PG-13"), (4, "R"), (5, "NC-17")];

/// Deduplicate genre ids, ascending.
pub fn normalize_genre_ids(ids: &[GenreId]) -> Vec<GenreId> {
    let mut ids = ids.to_vec();
    ids.sort();
    ids.dedup();
    ids
}
