use sea_orm_migration::prelude::*;

mod m20260301_000001_create_reference_tables;
mod m20260301_000002_create_users;
mod m20260301_000003_create_films;
mod m20260301_000004_create_film_genres;
mod m20260301_000005_create_likes;
mod m20260301_000006_create_friendships;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_reference_tables::Migration),
            Box::new(m20260301_000002_create_users::Migration),
            Box::new(m20260301_000003_create_films::Migration),
            Box::new(m20260301_000004_create_film_genres::Migration),
            Box::new(m20260301_000005_create_likes::Migration),
            Box::new(m20260301_000006_create_friendships::Migration),
        ]
    }
}
