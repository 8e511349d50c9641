use std::collections::HashMap;

use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, IntoActiveModel as _, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, SqlErr, Statement, TransactionTrait, sea_query::OnConflict,
};

use filmorate_domain::friendship::{FriendEdge, FriendPair, FriendshipOp};
use filmorate_domain::id::{FilmId, GenreId, RatingId, UserId};
use filmorate_domain::popularity::LikeTally;
use filmorate_schema::{film_genres, films, friendships, genres, likes, ratings, users};

use crate::domain::repository::{
    FilmRepository, FriendshipRepository, LikeRepository, ReferenceRepository, UserRepository,
};
use crate::domain::types::{
    Film, FilmFields, Genre, Rating, User, UserFields, normalize_genre_ids,
};
use crate::error::FilmorateError;

/// PostgreSQL-backed store. Schema is owned by `filmorate-migration`.
#[derive(Clone)]
pub struct DbStore {
    pub db: DatabaseConnection,
}

impl DbStore {
    pub async fn ping(&self) -> Result<(), FilmorateError> {
        self.db.ping().await.context("ping database")?;
        Ok(())
    }
}

// ── User repository ──────────────────────────────────────────────────────────

impl UserRepository for DbStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, FilmorateError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, FilmorateError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .context("find users by ids")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn list(&self) -> Result<Vec<User>, FilmorateError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn exists(&self, id: UserId) -> Result<bool, FilmorateError> {
        let count = users::Entity::find_by_id(id.0)
            .count(&self.db)
            .await
            .context("check user exists")?;
        Ok(count > 0)
    }

    async fn create(&self, fields: &UserFields) -> Result<User, FilmorateError> {
        let model = users::ActiveModel {
            email: Set(fields.email.clone()),
            login: Set(fields.login.clone()),
            name: Set(fields.name.clone()),
            birthday: Set(fields.birthday),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| user_write_error(e, "create user"))?;
        Ok(user_from_model(model))
    }

    async fn update(
        &self,
        id: UserId,
        fields: &UserFields,
    ) -> Result<Option<User>, FilmorateError> {
        let result = users::ActiveModel {
            id: Set(id.0),
            email: Set(fields.email.clone()),
            login: Set(fields.login.clone()),
            name: Set(fields.name.clone()),
            birthday: Set(fields.birthday),
        }
        .update(&self.db)
        .await;
        match result {
            Ok(model) => Ok(Some(user_from_model(model))),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(user_write_error(e, "update user")),
        }
    }
}

fn user_write_error(err: DbErr, action: &'static str) -> FilmorateError {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
        return FilmorateError::UserAlreadyExists;
    }
    FilmorateError::Internal(anyhow::Error::new(err).context(action))
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: UserId(model.id),
        email: model.email,
        login: model.login,
        name: model.name,
        birthday: model.birthday,
    }
}

// ── Film repository ──────────────────────────────────────────────────────────

impl FilmRepository for DbStore {
    async fn find_by_id(&self, id: FilmId) -> Result<Option<Film>, FilmorateError> {
        let Some(model) = films::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find film by id")?
        else {
            return Ok(None);
        };
        let mut hydrated = hydrate_films(&self.db, vec![model])
            .await
            .context("load film genres")?;
        Ok(hydrated.pop())
    }

    async fn find_by_ids(&self, ids: &[FilmId]) -> Result<Vec<Film>, FilmorateError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = films::Entity::find()
            .filter(films::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .all(&self.db)
            .await
            .context("find films by ids")?;
        let hydrated = hydrate_films(&self.db, models)
            .await
            .context("load film genres")?;
        Ok(hydrated)
    }

    async fn list(&self) -> Result<Vec<Film>, FilmorateError> {
        let models = films::Entity::find()
            .order_by_asc(films::Column::Id)
            .all(&self.db)
            .await
            .context("list films")?;
        let hydrated = hydrate_films(&self.db, models)
            .await
            .context("load film genres")?;
        Ok(hydrated)
    }

    async fn exists(&self, id: FilmId) -> Result<bool, FilmorateError> {
        let count = films::Entity::find_by_id(id.0)
            .count(&self.db)
            .await
            .context("check film exists")?;
        Ok(count > 0)
    }

    async fn create(
        &self,
        fields: &FilmFields,
        genre_ids: &[GenreId],
    ) -> Result<Film, FilmorateError> {
        let fields = fields.clone();
        let genre_ids = normalize_genre_ids(genre_ids);
        let model = self
            .db
            .transaction::<_, films::Model, DbErr>(|txn| {
                Box::pin(async move {
                    let model = films::ActiveModel {
                        name: Set(fields.name),
                        description: Set(fields.description),
                        release_date: Set(fields.release_date),
                        duration: Set(fields.duration),
                        rating_id: Set(fields.rating_id.0),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    replace_genres(txn, model.id, &genre_ids).await?;
                    Ok(model)
                })
            })
            .await
            .context("create film")?;
        let mut hydrated = hydrate_films(&self.db, vec![model])
            .await
            .context("load film genres")?;
        hydrated
            .pop()
            .ok_or_else(|| FilmorateError::Internal(anyhow::anyhow!("created film vanished")))
    }

    async fn update(
        &self,
        id: FilmId,
        fields: &FilmFields,
        genre_ids: Option<&[GenreId]>,
    ) -> Result<Option<Film>, FilmorateError> {
        let fields = fields.clone();
        let genre_ids = genre_ids.map(normalize_genre_ids);
        let model = self
            .db
            .transaction::<_, Option<films::Model>, DbErr>(|txn| {
                Box::pin(async move {
                    let Some(existing) = films::Entity::find_by_id(id.0)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                    else {
                        return Ok(None);
                    };
                    let mut am = existing.into_active_model();
                    am.name = Set(fields.name);
                    am.description = Set(fields.description);
                    am.release_date = Set(fields.release_date);
                    am.duration = Set(fields.duration);
                    am.rating_id = Set(fields.rating_id.0);
                    let model = am.update(txn).await?;
                    if let Some(genre_ids) = genre_ids {
                        replace_genres(txn, model.id, &genre_ids).await?;
                    }
                    Ok(Some(model))
                })
            })
            .await
            .context("update film")?;
        let Some(model) = model else {
            return Ok(None);
        };
        let mut hydrated = hydrate_films(&self.db, vec![model])
            .await
            .context("load film genres")?;
        Ok(hydrated.pop())
    }

    async fn delete(&self, id: FilmId) -> Result<bool, FilmorateError> {
        // likes and film_genres cascade on the foreign key
        let result = films::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete film")?;
        Ok(result.rows_affected > 0)
    }
}

async fn replace_genres<C: ConnectionTrait>(
    conn: &C,
    film_id: i64,
    genre_ids: &[GenreId],
) -> Result<(), DbErr> {
    film_genres::Entity::delete_many()
        .filter(film_genres::Column::FilmId.eq(film_id))
        .exec(conn)
        .await?;
    if genre_ids.is_empty() {
        return Ok(());
    }
    film_genres::Entity::insert_many(genre_ids.iter().map(|genre_id| film_genres::ActiveModel {
        film_id: Set(film_id),
        genre_id: Set(genre_id.0),
    }))
    .exec_without_returning(conn)
    .await?;
    Ok(())
}

/// Attach rating and genres to film rows. Output order follows `models`.
async fn hydrate_films<C: ConnectionTrait>(
    conn: &C,
    models: Vec<films::Model>,
) -> Result<Vec<Film>, DbErr> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let rating_names: HashMap<i32, String> = ratings::Entity::find()
        .all(conn)
        .await?
        .into_iter()
        .map(|r| (r.id, r.name))
        .collect();
    let genre_names: HashMap<i32, String> = genres::Entity::find()
        .all(conn)
        .await?
        .into_iter()
        .map(|g| (g.id, g.name))
        .collect();
    let links = film_genres::Entity::find()
        .filter(film_genres::Column::FilmId.is_in(models.iter().map(|m| m.id)))
        .order_by_asc(film_genres::Column::GenreId)
        .all(conn)
        .await?;
    let mut genres_by_film: HashMap<i64, Vec<Genre>> = HashMap::new();
    for link in links {
        let name = genre_names.get(&link.genre_id).cloned().unwrap_or_default();
        genres_by_film.entry(link.film_id).or_default().push(Genre {
            id: GenreId(link.genre_id),
            name,
        });
    }

    Ok(models
        .into_iter()
        .map(|model| Film {
            id: FilmId(model.id),
            genres: genres_by_film.remove(&model.id).unwrap_or_default(),
            rating: Rating {
                id: RatingId(model.rating_id),
                name: rating_names
                    .get(&model.rating_id)
                    .cloned()
                    .unwrap_or_default(),
            },
            name: model.name,
            description: model.description,
            release_date: model.release_date,
            duration: model.duration,
        })
        .collect())
}

// ── Reference repository ─────────────────────────────────────────────────────

impl ReferenceRepository for DbStore {
    async fn genre_exists(&self, id: GenreId) -> Result<bool, FilmorateError> {
        let count = genres::Entity::find_by_id(id.0)
            .count(&self.db)
            .await
            .context("check genre exists")?;
        Ok(count > 0)
    }

    async fn rating_exists(&self, id: RatingId) -> Result<bool, FilmorateError> {
        let count = ratings::Entity::find_by_id(id.0)
            .count(&self.db)
            .await
            .context("check rating exists")?;
        Ok(count > 0)
    }

    async fn find_genre(&self, id: GenreId) -> Result<Option<Genre>, FilmorateError> {
        let model = genres::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find genre")?;
        Ok(model.map(|g| Genre {
            id: GenreId(g.id),
            name: g.name,
        }))
    }

    async fn find_rating(&self, id: RatingId) -> Result<Option<Rating>, FilmorateError> {
        let model = ratings::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find rating")?;
        Ok(model.map(|r| Rating {
            id: RatingId(r.id),
            name: r.name,
        }))
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, FilmorateError> {
        let models = genres::Entity::find()
            .order_by_asc(genres::Column::Id)
            .all(&self.db)
            .await
            .context("list genres")?;
        Ok(models
            .into_iter()
            .map(|g| Genre {
                id: GenreId(g.id),
                name: g.name,
            })
            .collect())
    }

    async fn list_ratings(&self) -> Result<Vec<Rating>, FilmorateError> {
        let models = ratings::Entity::find()
            .order_by_asc(ratings::Column::Id)
            .all(&self.db)
            .await
            .context("list ratings")?;
        Ok(models
            .into_iter()
            .map(|r| Rating {
                id: RatingId(r.id),
                name: r.name,
            })
            .collect())
    }
}

// ── Like repository ──────────────────────────────────────────────────────────

impl LikeRepository for DbStore {
    async fn add(&self, film_id: FilmId, user_id: UserId) -> Result<bool, FilmorateError> {
        let like = likes::ActiveModel {
            film_id: Set(film_id.0),
            user_id: Set(user_id.0),
        };
        let result = likes::Entity::insert(like)
            .on_conflict(
                OnConflict::columns([likes::Column::FilmId, likes::Column::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await;
        match result {
            Ok(rows) => Ok(rows > 0),
            // The film was deleted between the existence check and the insert.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) => {
                Err(FilmorateError::FilmNotFound)
            }
            Err(e) => Err(anyhow::Error::new(e).context("add like").into()),
        }
    }

    async fn remove(&self, film_id: FilmId, user_id: UserId) -> Result<bool, FilmorateError> {
        let result = likes::Entity::delete_many()
            .filter(likes::Column::FilmId.eq(film_id.0))
            .filter(likes::Column::UserId.eq(user_id.0))
            .exec(&self.db)
            .await
            .context("remove like")?;
        Ok(result.rows_affected > 0)
    }

    async fn count(&self, film_id: FilmId) -> Result<u64, FilmorateError> {
        let count = likes::Entity::find()
            .filter(likes::Column::FilmId.eq(film_id.0))
            .count(&self.db)
            .await
            .context("count likes")?;
        Ok(count)
    }

    async fn tally(&self) -> Result<Vec<LikeTally>, FilmorateError> {
        #[derive(Debug, FromQueryResult)]
        struct TallyRow {
            film_id: i64,
            likes: i64,
        }

        let rows = TallyRow::find_by_statement(Statement::from_string(
            self.db.get_database_backend(),
            r#"
            SELECT f.id AS film_id, COUNT(l.user_id) AS likes
                FROM films f
                LEFT JOIN likes l ON l.film_id = f.id
                GROUP BY f.id
            "#,
        ))
        .all(&self.db)
        .await
        .context("tally likes")?;

        Ok(rows
            .into_iter()
            .map(|row| LikeTally {
                film_id: FilmId(row.film_id),
                likes: u64::try_from(row.likes).unwrap_or(0),
            })
            .collect())
    }
}

// ── Friendship repository ────────────────────────────────────────────────────

impl FriendshipRepository for DbStore {
    async fn apply(
        &self,
        user: UserId,
        target: UserId,
        op: FriendshipOp,
    ) -> Result<FriendPair, FilmorateError> {
        let pair = self
            .db
            .transaction::<_, FriendPair, DbErr>(|txn| {
                Box::pin(async move {
                    // Lock both user rows in id order so concurrent transitions on
                    // the same pair run one after another.
                    users::Entity::find()
                        .filter(users::Column::Id.is_in([user.0, target.0]))
                        .order_by_asc(users::Column::Id)
                        .lock_exclusive()
                        .all(txn)
                        .await?;

                    let before = FriendPair {
                        outgoing: load_edge(txn, user, target).await?,
                        incoming: load_edge(txn, target, user).await?,
                    };
                    let after = before.apply(op);
                    write_edge(txn, user, target, before.outgoing, after.outgoing).await?;
                    write_edge(txn, target, user, before.incoming, after.incoming).await?;
                    Ok(after)
                })
            })
            .await
            .context("apply friendship transition")?;
        Ok(pair)
    }

    async fn edges_of(&self, user: UserId) -> Result<Vec<FriendEdge>, FilmorateError> {
        let models = friendships::Entity::find()
            .filter(
                friendships::Column::UserId
                    .eq(user.0)
                    .or(friendships::Column::FriendId.eq(user.0)),
            )
            .all(&self.db)
            .await
            .context("list friendship edges")?;
        Ok(models
            .into_iter()
            .map(|m| FriendEdge {
                from: UserId(m.user_id),
                to: UserId(m.friend_id),
                confirmed: m.confirmed,
            })
            .collect())
    }
}

async fn load_edge<C: ConnectionTrait>(
    conn: &C,
    from: UserId,
    to: UserId,
) -> Result<Option<bool>, DbErr> {
    let model = friendships::Entity::find_by_id((from.0, to.0))
        .one(conn)
        .await?;
    Ok(model.map(|m| m.confirmed))
}

/// Persist the `from → to` edge transition, touching the row only when it changed.
async fn write_edge<C: ConnectionTrait>(
    conn: &C,
    from: UserId,
    to: UserId,
    before: Option<bool>,
    after: Option<bool>,
) -> Result<(), DbErr> {
    if before == after {
        return Ok(());
    }
    let row = |confirmed| friendships::ActiveModel {
        user_id: Set(from.0),
        friend_id: Set(to.0),
        confirmed: Set(confirmed),
    };
    match after {
        None => {
            friendships::Entity::delete_by_id((from.0, to.0))
                .exec(conn)
                .await?;
        }
        Some(confirmed) if before.is_none() => {
            friendships::Entity::insert(row(confirmed))
                .exec_without_returning(conn)
                .await?;
        }
        Some(confirmed) => {
            row(confirmed).update(conn).await?;
        }
    }
    Ok(())
}
