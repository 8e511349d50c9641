#![allow(async_fn_in_trait)]

use filmorate_domain::friendship::{FriendEdge, FriendPair, FriendshipOp};
use filmorate_domain::id::{FilmId, GenreId, RatingId, UserId};
use filmorate_domain::popularity::LikeTally;

use crate::domain::types::{Film, FilmFields, Genre, Rating, User, UserFields};
use crate::error::FilmorateError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, FilmorateError>;

    /// Users with the given ids, ascending by id. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, FilmorateError>;

    /// All users, ascending by id.
    async fn list(&self) -> Result<Vec<User>, FilmorateError>;

    async fn exists(&self, id: UserId) -> Result<bool, FilmorateError>;

    /// Fails with `UserAlreadyExists` when the email is taken.
    async fn create(&self, fields: &UserFields) -> Result<User, FilmorateError>;

    /// Replace all fields. Returns `None` if the user does not exist; fails with
    /// `UserAlreadyExists` when the email belongs to another user.
    async fn update(
        &self,
        id: UserId,
        fields: &UserFields,
    ) -> Result<Option<User>, FilmorateError>;
}

/// Repository for films and their genre associations.
///
/// Callers run the reference guard first; implementations may still reject a
/// dangling reference through foreign keys.
pub trait FilmRepository: Send + Sync {
    async fn find_by_id(&self, id: FilmId) -> Result<Option<Film>, FilmorateError>;

    /// Films with the given ids, in no particular order. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[FilmId]) -> Result<Vec<Film>, FilmorateError>;

    /// All films, ascending by id.
    async fn list(&self) -> Result<Vec<Film>, FilmorateError>;

    async fn exists(&self, id: FilmId) -> Result<bool, FilmorateError>;

    /// Insert the film and its genre set atomically.
    async fn create(
        &self,
        fields: &FilmFields,
        genre_ids: &[GenreId],
    ) -> Result<Film, FilmorateError>;

    /// Replace scalar fields, and the genre set when `genre_ids` is `Some`.
    /// Returns `None` if the film does not exist.
    async fn update(
        &self,
        id: FilmId,
        fields: &FilmFields,
        genre_ids: Option<&[GenreId]>,
    ) -> Result<Option<Film>, FilmorateError>;

    /// Delete the film with its likes and genre links. Returns `true` if it existed.
    async fn delete(&self, id: FilmId) -> Result<bool, FilmorateError>;
}

/// Read-only access to the genre and rating reference tables.
pub trait ReferenceRepository: Send + Sync {
    async fn genre_exists(&self, id: GenreId) -> Result<bool, FilmorateError>;
    async fn rating_exists(&self, id: RatingId) -> Result<bool, FilmorateError>;
    async fn find_genre(&self, id: GenreId) -> Result<Option<Genre>, FilmorateError>;
    async fn find_rating(&self, id: RatingId) -> Result<Option<Rating>, FilmorateError>;
    /// Ascending by id.
    async fn list_genres(&self) -> Result<Vec<Genre>, FilmorateError>;
    /// Ascending by id.
    async fn list_ratings(&self) -> Result<Vec<Rating>, FilmorateError>;
}

/// Set of (film, user) like edges.
pub trait LikeRepository: Send + Sync {
    /// Record a like. Returns `false` if it was already present.
    async fn add(&self, film_id: FilmId, user_id: UserId) -> Result<bool, FilmorateError>;

    /// Drop a like. Returns `false` if there was nothing to drop.
    async fn remove(&self, film_id: FilmId, user_id: UserId) -> Result<bool, FilmorateError>;

    async fn count(&self, film_id: FilmId) -> Result<u64, FilmorateError>;

    /// Like count of every stored film, including films with no likes.
    async fn tally(&self) -> Result<Vec<LikeTally>, FilmorateError>;
}

/// Directed friendship edges.
pub trait FriendshipRepository: Send + Sync {
    /// Atomically read the pair `user ↔ target`, apply `op` to the `user → target`
    /// edge via [`FriendPair::apply`], persist the result and return it.
    async fn apply(
        &self,
        user: UserId,
        target: UserId,
        op: FriendshipOp,
    ) -> Result<FriendPair, FilmorateError>;

    /// Every edge where `user` is either endpoint.
    async fn edges_of(&self, user: UserId) -> Result<Vec<FriendEdge>, FilmorateError>;
}
