use filmorate_domain::id::{GenreId, RatingId};

use crate::domain::repository::ReferenceRepository;
use crate::domain::types::{Genre, Rating};
use crate::error::FilmorateError;

// ── ReferenceGuard ───────────────────────────────────────────────────────────

/// Checks that the genre and rating ids a film points at exist.
///
/// Runs before any film write, so a rejected payload leaves no rows behind.
pub struct ReferenceGuard<R: ReferenceRepository> {
    pub repo: R,
}

impl<R: ReferenceRepository> ReferenceGuard<R> {
    pub async fn assert_genre_exists(&self, id: GenreId) -> Result<(), FilmorateError> {
        if self.repo.genre_exists(id).await? {
            Ok(())
        } else {
            Err(FilmorateError::GenreNotFound)
        }
    }

    pub async fn assert_rating_exists(&self, id: RatingId) -> Result<(), FilmorateError> {
        if self.repo.rating_exists(id).await? {
            Ok(())
        } else {
            Err(FilmorateError::RatingNotFound)
        }
    }

    /// Rating first, then every genre in the given order.
    pub async fn assert_film_references(
        &self,
        rating_id: RatingId,
        genre_ids: &[GenreId],
    ) -> Result<(), FilmorateError> {
        self.assert_rating_exists(rating_id).await?;
        for id in genre_ids {
            self.assert_genre_exists(*id).await?;
        }
        Ok(())
    }
}

// ── Genres ───────────────────────────────────────────────────────────────────

pub struct ListGenresUseCase<R: ReferenceRepository> {
    pub repo: R,
}

impl<R: ReferenceRepository> ListGenresUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Genre>, FilmorateError> {
        self.repo.list_genres().await
    }
}

pub struct GetGenreUseCase<R: ReferenceRepository> {
    pub repo: R,
}

impl<R: ReferenceRepository> GetGenreUseCase<R> {
    pub async fn execute(&self, id: GenreId) -> Result<Genre, FilmorateError> {
        self.repo
            .find_genre(id)
            .await?
            .ok_or(FilmorateError::GenreNotFound)
    }
}

// ── Ratings ──────────────────────────────────────────────────────────────────

pub struct ListRatingsUseCase<R: ReferenceRepository> {
    pub repo: R,
}

impl<R: ReferenceRepository> ListRatingsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Rating>, FilmorateError> {
        self.repo.list_ratings().await
    }
}

pub struct GetRatingUseCase<R: ReferenceRepository> {
    pub repo: R,
}

impl<R: ReferenceRepository> GetRatingUseCase<R> {
    pub async fn execute(&self, id: RatingId) -> Result<Rating, FilmorateError> {
        self.repo
            .find_rating(id)
            .await?
            .ok_or(FilmorateError::RatingNotFound)
    }
}
