use chrono::NaiveDate;
use tracing::info;

use filmorate_domain::film::{
    validate_description, validate_duration, validate_name, validate_release_date,
};
use filmorate_domain::id::{FilmId, GenreId, RatingId};

use crate::domain::repository::{FilmRepository, ReferenceRepository};
use crate::domain::types::{Film, FilmFields, normalize_genre_ids};
use crate::error::FilmorateError;
use crate::usecase::reference::ReferenceGuard;

/// Fail with `FilmNotFound` unless `id` is a stored film.
pub async fn ensure_film_exists<R: FilmRepository>(
    repo: &R,
    id: FilmId,
) -> Result<(), FilmorateError> {
    if repo.exists(id).await? {
        Ok(())
    } else {
        Err(FilmorateError::FilmNotFound)
    }
}

pub struct FilmInput {
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub rating_id: RatingId,
    /// `None` on update keeps the stored genre set.
    pub genre_ids: Option<Vec<GenreId>>,
}

impl FilmInput {
    fn validate(self) -> Result<(FilmFields, Option<Vec<GenreId>>), FilmorateError> {
        validate_name(&self.name)?;
        validate_description(&self.description)?;
        validate_release_date(self.release_date)?;
        validate_duration(self.duration)?;
        let fields = FilmFields {
            name: self.name,
            description: self.description,
            release_date: self.release_date,
            duration: self.duration,
            rating_id: self.rating_id,
        };
        let genre_ids = self.genre_ids.as_deref().map(normalize_genre_ids);
        Ok((fields, genre_ids))
    }
}

// ── CreateFilm ───────────────────────────────────────────────────────────────

pub struct CreateFilmUseCase<F: FilmRepository, R: ReferenceRepository> {
    pub repo: F,
    pub guard: ReferenceGuard<R>,
}

impl<F: FilmRepository, R: ReferenceRepository> CreateFilmUseCase<F, R> {
    pub async fn execute(&self, input: FilmInput) -> Result<Film, FilmorateError> {
        let (fields, genre_ids) = input.validate()?;
        let genre_ids = genre_ids.unwrap_or_default();
        self.guard
            .assert_film_references(fields.rating_id, &genre_ids)
            .await?;
        let film = self.repo.create(&fields, &genre_ids).await?;
        info!(film_id = %film.id, genres = film.genres.len(), "film created");
        Ok(film)
    }
}

// ── UpdateFilm ───────────────────────────────────────────────────────────────

pub struct UpdateFilmUseCase<F: FilmRepository, R: ReferenceRepository> {
    pub repo: F,
    pub guard: ReferenceGuard<R>,
}

impl<F: FilmRepository, R: ReferenceRepository> UpdateFilmUseCase<F, R> {
    pub async fn execute(&self, id: FilmId, input: FilmInput) -> Result<Film, FilmorateError> {
        let (fields, genre_ids) = input.validate()?;
        ensure_film_exists(&self.repo, id).await?;
        self.guard
            .assert_film_references(fields.rating_id, genre_ids.as_deref().unwrap_or_default())
            .await?;
        let film = self
            .repo
            .update(id, &fields, genre_ids.as_deref())
            .await?
            .ok_or(FilmorateError::FilmNotFound)?;
        info!(film_id = %film.id, "film updated");
        Ok(film)
    }
}

// ── GetFilm ──────────────────────────────────────────────────────────────────

pub struct GetFilmUseCase<F: FilmRepository> {
    pub repo: F,
}

impl<F: FilmRepository> GetFilmUseCase<F> {
    pub async fn execute(&self, id: FilmId) -> Result<Film, FilmorateError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(FilmorateError::FilmNotFound)
    }
}

// ── ListFilms ────────────────────────────────────────────────────────────────

pub struct ListFilmsUseCase<F: FilmRepository> {
    pub repo: F,
}

impl<F: FilmRepository> ListFilmsUseCase<F> {
    pub async fn execute(&self) -> Result<Vec<Film>, FilmorateError> {
        self.repo.list().await
    }
}

// ── DeleteFilm ───────────────────────────────────────────────────────────────

pub struct DeleteFilmUseCase<F: FilmRepository> {
    pub repo: F,
}

impl<F: FilmRepository> DeleteFilmUseCase<F> {
    pub async fn execute(&self, id: FilmId) -> Result<(), FilmorateError> {
        if !self.repo.delete(id).await? {
            return Err(FilmorateError::FilmNotFound);
        }
        info!(film_id = %id, "film deleted");
        Ok(())
    }
}
