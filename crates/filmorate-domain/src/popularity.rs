//! Popularity ranking over per-film like counts.

use std::collections::BTreeMap;

use crate::id::FilmId;

/// Number of distinct likes a film has. Films without likes carry `likes: 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeTally {
    pub film_id: FilmId,
    pub likes: u64,
}

/// Rank films by like count, most liked first, ties broken by ascending film id.
///
/// Tallies for the same film are summed. Zero-like films sort after every liked
/// film, so they only appear when `limit` exceeds the number of liked films.
pub fn rank(tallies: impl IntoIterator<Item = LikeTally>, limit: usize) -> Vec<LikeTally> {
    let mut per_film: BTreeMap<FilmId, u64> = BTreeMap::new();
    for tally in tallies {
        *per_film.entry(tally.film_id).or_default() += tally.likes;
    }
    let mut ranked: Vec<LikeTally> = per_film
        .into_iter()
        .map(|(film_id, likes)| LikeTally { film_id, likes })
        .collect();
    ranked.sort_by(|a, b| b.likes.cmp(&a.likes).then(a.film_id.cmp(&b.film_id)));
    ranked.truncate(limit);
    ranked
}
