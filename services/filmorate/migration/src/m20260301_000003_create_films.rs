use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Films::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Films::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Films::Name).string().not_null())
                    .col(ColumnDef::new(Films::Description).string_len(200).not_null())
                    .col(ColumnDef::new(Films::ReleaseDate).date().not_null())
                    .col(ColumnDef::new(Films::Duration).integer().not_null())
                    .col(ColumnDef::new(Films::RatingId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Films::Table, Films::RatingId)
                            .to(Ratings::Table, Ratings::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Films::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Films {
    Table,
    Id,
    Name,
    Description,
    ReleaseDate,
    Duration,
    RatingId,
}

#[derive(Iden)]
enum Ratings {
    Table,
    Id,
}
