use sea_orm::entity::prelude::*;

/// Film record. Genres live in `film_genres`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "films")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: String,
    pub release_date: Date,
    pub duration: i32,
    pub rating_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ratings::Entity",
        from = "Column::RatingId",
        to = "super::ratings::Column::Id"
    )]
    Rating,
    #[sea_orm(has_many = "super::film_genres::Entity")]
    FilmGenres,
    #[sea_orm(has_many = "super::likes::Entity")]
    Likes,
}

impl Related<super::ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rating.def()
    }
}

impl Related<super::film_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilmGenres.def()
    }
}

impl Related<super::likes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
