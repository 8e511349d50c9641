use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const GENRES: [(i32, &str); 6] = [
    (1, "Comedy"),
    (2, "Drama"),
    (3, "Animation"),
    (4, "Thriller"),
    (5, "Documentary"),
    (6, "Action"),
];

const RATINGS: [(i32, &str); 5] = [(1, "G"), (2, "PG"), (3, "PG-13"), (4, "R"), (5, "NC-17")];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Genres::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Genres::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Genres::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                Table::create()
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Ratings::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Ratings::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        let mut genres = Query::insert()
            .into_table(Genres::Table)
            .columns([Genres::Id, Genres::Name])
            .to_owned();
        for (id, name) in GENRES {
            genres.values_panic([id.into(), name.into()]);
        }
        manager.exec_stmt(genres).await?;

        let mut ratings = Query::insert()
            .into_table(Ratings::Table)
            .columns([Ratings::Id, Ratings::Name])
            .to_owned();
        for (id, name) in RATINGS {
            ratings.values_panic([id.into(), name.into()]);
        }
        manager.exec_stmt(ratings).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ratings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genres::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Genres {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Ratings {
    Table,
    Id,
    Name,
}
