use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use filmorate_domain::friendship::{FriendEdge, FriendPair, FriendshipOp};
use filmorate_domain::id::{FilmId, GenreId, RatingId, UserId};
use filmorate_domain::popularity::LikeTally;

use crate::domain::repository::{
    FilmRepository, FriendshipRepository, LikeRepository, ReferenceRepository, UserRepository,
};
use crate::domain::types::{
    Film, FilmFields, GENRES, Genre, RATINGS, Rating, User, UserFields, normalize_genre_ids,
};
use crate::error::FilmorateError;

/// Process-local store used when no database is configured.
///
/// Lock order is `films` → `likes` → per-film like set, and `friendships` →
/// per-pair slot. No lock is held across an `.await`.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

struct Inner {
    users: RwLock<BTreeMap<UserId, User>>,
    next_user_id: AtomicI64,
    films: RwLock<BTreeMap<FilmId, StoredFilm>>,
    next_film_id: AtomicI64,
    genres: BTreeMap<GenreId, String>,
    ratings: BTreeMap<RatingId, String>,
    likes: RwLock<HashMap<FilmId, Arc<Mutex<BTreeSet<UserId>>>>>,
    /// Keyed by `(lower id, higher id)`.
    friendships: RwLock<HashMap<(UserId, UserId), Arc<Mutex<PairSlot>>>>,
}

struct StoredFilm {
    fields: FilmFields,
    genre_ids: Vec<GenreId>,
}

/// Both directed edges of an unordered pair `(lo, hi)`.
///
/// A slot with no edges is unlinked from the map and marked `retired`; a writer
/// that still holds it must fetch a fresh one.
#[derive(Default)]
struct PairSlot {
    lo_to_hi: Option<bool>,
    hi_to_lo: Option<bool>,
    retired: bool,
}

impl PairSlot {
    fn view_from(&self, user: UserId, target: UserId) -> FriendPair {
        let pair = FriendPair {
            outgoing: self.lo_to_hi,
            incoming: self.hi_to_lo,
        };
        if user < target { pair } else { pair.reversed() }
    }

    fn store_from(&mut self, user: UserId, target: UserId, pair: FriendPair) {
        let pair = if user < target { pair } else { pair.reversed() };
        self.lo_to_hi = pair.outgoing;
        self.hi_to_lo = pair.incoming;
    }

    fn is_vacant(&self) -> bool {
        self.lo_to_hi.is_none() && self.hi_to_lo.is_none()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> FilmorateError {
    FilmorateError::Internal(anyhow::anyhow!("memory store lock poisoned"))
}

fn pair_key(a: UserId, b: UserId) -> (UserId, UserId) {
    if a < b { (a, b) } else { (b, a) }
}

impl MemoryStore {
    /// Empty store with the genre and rating reference rows seeded.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                users: RwLock::new(BTreeMap::new()),
                next_user_id: AtomicI64::new(1),
                films: RwLock::new(BTreeMap::new()),
                next_film_id: AtomicI64::new(1),
                genres: GENRES
                    .iter()
                    .map(|(id, name)| (GenreId(*id), (*name).to_owned()))
                    .collect(),
                ratings: RATINGS
                    .iter()
                    .map(|(id, name)| (RatingId(*id), (*name).to_owned()))
                    .collect(),
                likes: RwLock::new(HashMap::new()),
                friendships: RwLock::new(HashMap::new()),
            }),
        }
    }

    pub async fn ping(&self) -> Result<(), FilmorateError> {
        Ok(())
    }

    fn film_view(&self, id: FilmId, stored: &StoredFilm) -> Film {
        let rating_id = stored.fields.rating_id;
        Film {
            id,
            name: stored.fields.name.clone(),
            description: stored.fields.description.clone(),
            release_date: stored.fields.release_date,
            duration: stored.fields.duration,
            rating: Rating {
                id: rating_id,
                name: self
                    .inner
                    .ratings
                    .get(&rating_id)
                    .cloned()
                    .unwrap_or_default(),
            },
            genres: stored
                .genre_ids
                .iter()
                .map(|id| Genre {
                    id: *id,
                    name: self.inner.genres.get(id).cloned().unwrap_or_default(),
                })
                .collect(),
        }
    }

    fn pair_slot(&self, key: (UserId, UserId)) -> Result<Arc<Mutex<PairSlot>>, FilmorateError> {
        if let Some(slot) = self.inner.friendships.read().map_err(poisoned)?.get(&key) {
            return Ok(slot.clone());
        }
        let mut slots = self.inner.friendships.write().map_err(poisoned)?;
        Ok(slots.entry(key).or_default().clone())
    }

    fn existing_slot(
        &self,
        key: (UserId, UserId),
    ) -> Result<Option<Arc<Mutex<PairSlot>>>, FilmorateError> {
        let slots = self.inner.friendships.read().map_err(poisoned)?;
        Ok(slots.get(&key).cloned())
    }

    /// Unlinks the slot for `key` if it holds no edges.
    fn prune_slot(&self, key: (UserId, UserId)) -> Result<(), FilmorateError> {
        let mut slots = self.inner.friendships.write().map_err(poisoned)?;
        let vacant = match slots.get(&key) {
            Some(slot) => {
                let mut slot = slot.lock().map_err(poisoned)?;
                slot.retired = slot.is_vacant();
                slot.retired
            }
            None => false,
        };
        if vacant {
            slots.remove(&key);
        }
        Ok(())
    }

    #[cfg(test)]
    fn pair_slot_count(&self) -> usize {
        self.inner.friendships.read().map(|slots| slots.len()).unwrap_or(0)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

// ── User repository ──────────────────────────────────────────────────────────

impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, FilmorateError> {
        let users = self.inner.users.read().map_err(poisoned)?;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, FilmorateError> {
        let wanted: BTreeSet<UserId> = ids.iter().copied().collect();
        let users = self.inner.users.read().map_err(poisoned)?;
        Ok(wanted
            .into_iter()
            .filter_map(|id| users.get(&id).cloned())
            .collect())
    }

    async fn list(&self) -> Result<Vec<User>, FilmorateError> {
        let users = self.inner.users.read().map_err(poisoned)?;
        Ok(users.values().cloned().collect())
    }

    async fn exists(&self, id: UserId) -> Result<bool, FilmorateError> {
        let users = self.inner.users.read().map_err(poisoned)?;
        Ok(users.contains_key(&id))
    }

    async fn create(&self, fields: &UserFields) -> Result<User, FilmorateError> {
        let mut users = self.inner.users.write().map_err(poisoned)?;
        if users.values().any(|u| u.email == fields.email) {
            return Err(FilmorateError::UserAlreadyExists);
        }
        let id = UserId(self.inner.next_user_id.fetch_add(1, Ordering::Relaxed));
        let user = User {
            id,
            email: fields.email.clone(),
            login: fields.login.clone(),
            name: fields.name.clone(),
            birthday: fields.birthday,
        };
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: UserId,
        fields: &UserFields,
    ) -> Result<Option<User>, FilmorateError> {
        let mut users = self.inner.users.write().map_err(poisoned)?;
        if !users.contains_key(&id) {
            return Ok(None);
        }
        if users
            .values()
            .any(|u| u.id != id && u.email == fields.email)
        {
            return Err(FilmorateError::UserAlreadyExists);
        }
        let user = User {
            id,
            email: fields.email.clone(),
            login: fields.login.clone(),
            name: fields.name.clone(),
            birthday: fields.birthday,
        };
        users.insert(id, user.clone());
        Ok(Some(user))
    }
}

// ── Film repository ──────────────────────────────────────────────────────────

impl FilmRepository for MemoryStore {
    async fn find_by_id(&self, id: FilmId) -> Result<Option<Film>, FilmorateError> {
        let films = self.inner.films.read().map_err(poisoned)?;
        Ok(films.get(&id).map(|stored| self.film_view(id, stored)))
    }

    async fn find_by_ids(&self, ids: &[FilmId]) -> Result<Vec<Film>, FilmorateError> {
        let films = self.inner.films.read().map_err(poisoned)?;
        Ok(ids
            .iter()
            .filter_map(|id| films.get(id).map(|stored| self.film_view(*id, stored)))
            .collect())
    }

    async fn list(&self) -> Result<Vec<Film>, FilmorateError> {
        let films = self.inner.films.read().map_err(poisoned)?;
        Ok(films
            .iter()
            .map(|(id, stored)| self.film_view(*id, stored))
            .collect())
    }

    async fn exists(&self, id: FilmId) -> Result<bool, FilmorateError> {
        let films = self.inner.films.read().map_err(poisoned)?;
        Ok(films.contains_key(&id))
    }

    async fn create(
        &self,
        fields: &FilmFields,
        genre_ids: &[GenreId],
    ) -> Result<Film, FilmorateError> {
        let mut films = self.inner.films.write().map_err(poisoned)?;
        let id = FilmId(self.inner.next_film_id.fetch_add(1, Ordering::Relaxed));
        let stored = StoredFilm {
            fields: fields.clone(),
            genre_ids: normalize_genre_ids(genre_ids),
        };
        let film = self.film_view(id, &stored);
        films.insert(id, stored);
        Ok(film)
    }

    async fn update(
        &self,
        id: FilmId,
        fields: &FilmFields,
        genre_ids: Option<&[GenreId]>,
    ) -> Result<Option<Film>, FilmorateError> {
        let mut films = self.inner.films.write().map_err(poisoned)?;
        let Some(stored) = films.get_mut(&id) else {
            return Ok(None);
        };
        stored.fields = fields.clone();
        if let Some(genre_ids) = genre_ids {
            stored.genre_ids = normalize_genre_ids(genre_ids);
        }
        Ok(Some(self.film_view(id, stored)))
    }

    async fn delete(&self, id: FilmId) -> Result<bool, FilmorateError> {
        let mut films = self.inner.films.write().map_err(poisoned)?;
        if films.remove(&id).is_none() {
            return Ok(false);
        }
        self.inner.likes.write().map_err(poisoned)?.remove(&id);
        Ok(true)
    }
}

// ── Reference repository ─────────────────────────────────────────────────────

impl ReferenceRepository for MemoryStore {
    async fn genre_exists(&self, id: GenreId) -> Result<bool, FilmorateError> {
        Ok(self.inner.genres.contains_key(&id))
    }

    async fn rating_exists(&self, id: RatingId) -> Result<bool, FilmorateError> {
        Ok(self.inner.ratings.contains_key(&id))
    }

    async fn find_genre(&self, id: GenreId) -> Result<Option<Genre>, FilmorateError> {
        Ok(self.inner.genres.get(&id).map(|name| Genre {
            id,
            name: name.clone(),
        }))
    }

    async fn find_rating(&self, id: RatingId) -> Result<Option<Rating>, FilmorateError> {
        Ok(self.inner.ratings.get(&id).map(|name| Rating {
            id,
            name: name.clone(),
        }))
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, FilmorateError> {
        Ok(self
            .inner
            .genres
            .iter()
            .map(|(id, name)| Genre {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }

    async fn list_ratings(&self) -> Result<Vec<Rating>, FilmorateError> {
        Ok(self
            .inner
            .ratings
            .iter()
            .map(|(id, name)| Rating {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }
}

// ── Like repository ──────────────────────────────────────────────────────────

impl LikeRepository for MemoryStore {
    async fn add(&self, film_id: FilmId, user_id: UserId) -> Result<bool, FilmorateError> {
        // Holding `films` keeps a concurrent delete from orphaning the new like.
        let films = self.inner.films.read().map_err(poisoned)?;
        if !films.contains_key(&film_id) {
            return Err(FilmorateError::FilmNotFound);
        }
        let existing = self
            .inner
            .likes
            .read()
            .map_err(poisoned)?
            .get(&film_id)
            .cloned();
        let slot = match existing {
            Some(slot) => slot,
            None => self
                .inner
                .likes
                .write()
                .map_err(poisoned)?
                .entry(film_id)
                .or_default()
                .clone(),
        };
        let inserted = slot.lock().map_err(poisoned)?.insert(user_id);
        drop(films);
        Ok(inserted)
    }

    async fn remove(&self, film_id: FilmId, user_id: UserId) -> Result<bool, FilmorateError> {
        let slot = self
            .inner
            .likes
            .read()
            .map_err(poisoned)?
            .get(&film_id)
            .cloned();
        match slot {
            Some(slot) => Ok(slot.lock().map_err(poisoned)?.remove(&user_id)),
            None => Ok(false),
        }
    }

    async fn count(&self, film_id: FilmId) -> Result<u64, FilmorateError> {
        let slot = self
            .inner
            .likes
            .read()
            .map_err(poisoned)?
            .get(&film_id)
            .cloned();
        match slot {
            Some(slot) => Ok(slot.lock().map_err(poisoned)?.len() as u64),
            None => Ok(0),
        }
    }

    async fn tally(&self) -> Result<Vec<LikeTally>, FilmorateError> {
        let films = self.inner.films.read().map_err(poisoned)?;
        let likes = self.inner.likes.read().map_err(poisoned)?;
        let mut tallies = Vec::with_capacity(films.len());
        for film_id in films.keys() {
            let count = match likes.get(film_id) {
                Some(slot) => slot.lock().map_err(poisoned)?.len() as u64,
                None => 0,
            };
            tallies.push(LikeTally {
                film_id: *film_id,
                likes: count,
            });
        }
        Ok(tallies)
    }
}

// ── Friendship repository ────────────────────────────────────────────────────

impl FriendshipRepository for MemoryStore {
    async fn apply(
        &self,
        user: UserId,
        target: UserId,
        op: FriendshipOp,
    ) -> Result<FriendPair, FilmorateError> {
        let key = pair_key(user, target);
        loop {
            let slot = match op {
                FriendshipOp::Request => self.pair_slot(key)?,
                FriendshipOp::Remove => match self.existing_slot(key)? {
                    Some(slot) => slot,
                    None => return Ok(FriendPair::default()),
                },
            };
            let mut slot = slot.lock().map_err(poisoned)?;
            if slot.retired {
                continue;
            }
            let next = slot.view_from(user, target).apply(op);
            slot.store_from(user, target, next);
            let vacant = slot.is_vacant();
            drop(slot);
            if vacant {
                self.prune_slot(key)?;
            }
            return Ok(next);
        }
    }

    async fn edges_of(&self, user: UserId) -> Result<Vec<FriendEdge>, FilmorateError> {
        let slots = self.inner.friendships.read().map_err(poisoned)?;
        let mut edges = Vec::new();
        for ((lo, hi), slot) in slots.iter() {
            if *lo != user && *hi != user {
                continue;
            }
            let slot = slot.lock().map_err(poisoned)?;
            if let Some(confirmed) = slot.lo_to_hi {
                edges.push(FriendEdge {
                    from: *lo,
                    to: *hi,
                    confirmed,
                });
            }
            if let Some(confirmed) = slot.hi_to_lo {
                edges.push(FriendEdge {
                    from: *hi,
                    to: *lo,
                    confirmed,
                });
            }
        }
        Ok(edges)
    }
}
