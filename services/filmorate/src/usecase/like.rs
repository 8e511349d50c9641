use tracing::info;

use filmorate_domain::id::{FilmId, UserId};

use crate::domain::repository::{FilmRepository, LikeRepository, UserRepository};
use crate::error::FilmorateError;
use crate::usecase::film::ensure_film_exists;
use crate::usecase::user::ensure_user_exists;

// ── AddLike ──────────────────────────────────────────────────────────────────

pub struct AddLikeUseCase<L: LikeRepository, F: FilmRepository, U: UserRepository> {
    pub repo: L,
    pub films: F,
    pub users: U,
}

impl<L: LikeRepository, F: FilmRepository, U: UserRepository> AddLikeUseCase<L, F, U> {
    /// Idempotent; returns the film's like count afterwards.
    pub async fn execute(&self, film_id: FilmId, user_id: UserId) -> Result<u64, FilmorateError> {
        ensure_film_exists(&self.films, film_id).await?;
        ensure_user_exists(&self.users, user_id).await?;
        if self.repo.add(film_id, user_id).await? {
            info!(film_id = %film_id, user_id = %user_id, "like added");
        }
        self.repo.count(film_id).await
    }
}

// ── RemoveLike ───────────────────────────────────────────────────────────────

pub struct RemoveLikeUseCase<L: LikeRepository, F: FilmRepository, U: UserRepository> {
    pub repo: L,
    pub films: F,
    pub users: U,
}

impl<L: LikeRepository, F: FilmRepository, U: UserRepository> RemoveLikeUseCase<L, F, U> {
    /// Fails with `LikeNotFound` when the user does not like the film.
    pub async fn execute(&self, film_id: FilmId, user_id: UserId) -> Result<u64, FilmorateError> {
        ensure_film_exists(&self.films, film_id).await?;
        ensure_user_exists(&self.users, user_id).await?;
        if !self.repo.remove(film_id, user_id).await? {
            return Err(FilmorateError::LikeNotFound);
        }
        info!(film_id = %film_id, user_id = %user_id, "like removed");
        self.repo.count(film_id).await
    }
}

// ── CountLikes ───────────────────────────────────────────────────────────────

pub struct CountLikesUseCase<L: LikeRepository, F: FilmRepository> {
    pub repo: L,
    pub films: F,
}

impl<L: LikeRepository, F: FilmRepository> CountLikesUseCase<L, F> {
    pub async fn execute(&self, film_id: FilmId) -> Result<u64, FilmorateError> {
        ensure_film_exists(&self.films, film_id).await?;
        self.repo.count(film_id).await
    }
}
