use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Likes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Likes::FilmId).big_integer().not_null())
                    .col(ColumnDef::new(Likes::UserId).big_integer().not_null())
                    .primary_key(Index::create().col(Likes::FilmId).col(Likes::UserId))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Likes::Table, Likes::FilmId)
                            .to(Films::Table, Films::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Likes::Table, Likes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Likes::Table)
                    .col(Likes::UserId)
                    .name("idx_likes_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_likes_user_id").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Likes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Likes {
    Table,
    FilmId,
    UserId,
}

#[derive(Iden)]
enum Films {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
