use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FilmGenres::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FilmGenres::FilmId).big_integer().not_null())
                    .col(ColumnDef::new(FilmGenres::GenreId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(FilmGenres::FilmId)
                            .col(FilmGenres::GenreId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FilmGenres::Table, FilmGenres::FilmId)
                            .to(Films::Table, Films::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FilmGenres::Table, FilmGenres::GenreId)
                            .to(Genres::Table, Genres::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FilmGenres::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FilmGenres {
    Table,
    FilmId,
    GenreId,
}

#[derive(Iden)]
enum Films {
    Table,
    Id,
}

#[derive(Iden)]
enum Genres {
    Table,
    Id,
}
