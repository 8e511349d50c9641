pub mod db;
pub mod memory;

use filmorate_domain::friendship::{FriendEdge, FriendPair, FriendshipOp};
use filmorate_domain::id::{FilmId, GenreId, RatingId, UserId};
use filmorate_domain::popularity::LikeTally;

use crate::domain::repository::{
    FilmRepository, FriendshipRepository, LikeRepository, ReferenceRepository, UserRepository,
};
use crate::domain::types::{Film, FilmFields, Genre, Rating, User, UserFields};
use crate::error::FilmorateError;

pub use db::DbStore;
pub use memory::MemoryStore;

/// Storage backend selected at startup.
#[derive(Clone)]
pub enum Store {
    Postgres(DbStore),
    Memory(MemoryStore),
}

/// Forward a repository call to whichever backend is active.
macro_rules! delegate {
    ($self:ident, $trait:ident :: $method:ident ( $($arg:expr),* )) => {
        match $self {
            Store::Postgres(store) => $trait::$method(store, $($arg),*).await,
            Store::Memory(store) => $trait::$method(store, $($arg),*).await,
        }
    };
}

impl Store {
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    pub async fn ping(&self) -> Result<(), FilmorateError> {
        match self {
            Self::Postgres(store) => store.ping().await,
            Self::Memory(store) => store.ping().await,
        }
    }
}

impl UserRepository for Store {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, FilmorateError> {
        delegate!(self, UserRepository::find_by_id(id))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, FilmorateError> {
        delegate!(self, UserRepository::find_by_ids(ids))
    }

    async fn list(&self) -> Result<Vec<User>, FilmorateError> {
        delegate!(self, UserRepository::list())
    }

    async fn exists(&self, id: UserId) -> Result<bool, FilmorateError> {
        delegate!(self, UserRepository::exists(id))
    }

    async fn create(&self, fields: &UserFields) -> Result<User, FilmorateError> {
        delegate!(self, UserRepository::create(fields))
    }

    async fn update(
        &self,
        id: UserId,
        fields: &UserFields,
    ) -> Result<Option<User>, FilmorateError> {
        delegate!(self, UserRepository::update(id, fields))
    }
}

impl FilmRepository for Store {
    async fn find_by_id(&self, id: FilmId) -> Result<Option<Film>, FilmorateError> {
        delegate!(self, FilmRepository::find_by_id(id))
    }

    async fn find_by_ids(&self, ids: &[FilmId]) -> Result<Vec<Film>, FilmorateError> {
        delegate!(self, FilmRepository::find_by_ids(ids))
    }

    async fn list(&self) -> Result<Vec<Film>, FilmorateError> {
        delegate!(self, FilmRepository::list())
    }

    async fn exists(&self, id: FilmId) -> Result<bool, FilmorateError> {
        delegate!(self, FilmRepository::exists(id))
    }

    async fn create(
        &self,
        fields: &FilmFields,
        genre_ids: &[GenreId],
    ) -> Result<Film, FilmorateError> {
        delegate!(self, FilmRepository::create(fields, genre_ids))
    }

    async fn update(
        &self,
        id: FilmId,
        fields: &FilmFields,
        genre_ids: Option<&[GenreId]>,
    ) -> Result<Option<Film>, FilmorateError> {
        delegate!(self, FilmRepository::update(id, fields, genre_ids))
    }

    async fn delete(&self, id: FilmId) -> Result<bool, FilmorateError> {
        delegate!(self, FilmRepository::delete(id))
    }
}

impl ReferenceRepository for Store {
    async fn genre_exists(&self, id: GenreId) -> Result<bool, FilmorateError> {
        delegate!(self, ReferenceRepository::genre_exists(id))
    }

    async fn rating_exists(&self, id: RatingId) -> Result<bool, FilmorateError> {
        delegate!(self, ReferenceRepository::rating_exists(id))
    }

    async fn find_genre(&self, id: GenreId) -> Result<Option<Genre>, FilmorateError> {
        delegate!(self, ReferenceRepository::find_genre(id))
    }

    async fn find_rating(&self, id: RatingId) -> Result<Option<Rating>, FilmorateError> {
        delegate!(self, ReferenceRepository::find_rating(id))
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, FilmorateError> {
        delegate!(self, ReferenceRepository::list_genres())
    }

    async fn list_ratings(&self) -> Result<Vec<Rating>, FilmorateError> {
        delegate!(self, ReferenceRepository::list_ratings())
    }
}

impl LikeRepository for Store {
    async fn add(&self, film_id: FilmId, user_id: UserId) -> Result<bool, FilmorateError> {
        delegate!(self, LikeRepository::add(film_id, user_id))
    }

    async fn remove(&self, film_id: FilmId, user_id: UserId) -> Result<bool, FilmorateError> {
        delegate!(self, LikeRepository::remove(film_id, user_id))
    }

    async fn count(&self, film_id: FilmId) -> Result<u64, FilmorateError> {
        delegate!(self, LikeRepository::count(film_id))
    }

    async fn tally(&self) -> Result<Vec<LikeTally>, FilmorateError> {
        delegate!(self, LikeRepository::tally())
    }
}

impl FriendshipRepository for Store {
    async fn apply(
        &self,
        user: UserId,
        target: UserId,
        op: FriendshipOp,
    ) -> Result<FriendPair, FilmorateError> {
        delegate!(self, FriendshipRepository::apply(user, target, op))
    }

    async fn edges_of(&self, user: UserId) -> Result<Vec<FriendEdge>, FilmorateError> {
        delegate!(self, FriendshipRepository::edges_of(user))
    }
}
