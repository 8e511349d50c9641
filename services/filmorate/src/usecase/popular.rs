use std::collections::HashMap;

use tracing::debug;

use filmorate_domain::id::FilmId;
use filmorate_domain::popularity::rank;

use crate::domain::repository::{FilmRepository, LikeRepository};
use crate::domain::types::Film;
use crate::error::FilmorateError;

pub const DEFAULT_POPULAR_COUNT: i64 = 10;

// ── TopFilms ─────────────────────────────────────────────────────────────────

pub struct TopFilmsUseCase<L: LikeRepository, F: FilmRepository> {
    pub likes: L,
    pub films: F,
}

impl<L: LikeRepository, F: FilmRepository> TopFilmsUseCase<L, F> {
    /// Up to `count` films by like count descending, ties by ascending id.
    /// Aggregates from the ledger on every call.
    pub async fn execute(&self, count: i64) -> Result<Vec<Film>, FilmorateError> {
        if count <= 0 {
            return Err(FilmorateError::InvalidCount);
        }
        let limit = usize::try_from(count).unwrap_or(usize::MAX);
        let ranked = rank(self.likes.tally().await?, limit);
        let ids: Vec<FilmId> = ranked.iter().map(|t| t.film_id).collect();

        let mut by_id: HashMap<FilmId, Film> = self
            .films
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|film| (film.id, film))
            .collect();
        // A film deleted between tally and load is skipped.
        let films: Vec<Film> = ids.iter().filter_map(|id| by_id.remove(id)).collect();
        debug!(requested = count, returned = films.len(), "popular films ranked");
        Ok(films)
    }
}
