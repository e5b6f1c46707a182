use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Articles::Table)
                    .if_not_exists()
                    .col(pk_auto(Articles::Id))
                    .col(string_len(Articles::Title, 100))
                    .col(string_len(Articles::Summary, 250))
                    .col(text_null(Articles::Description))
                    .col(string_len_null(Articles::Image, 150))
                    .col(timestamp_with_time_zone(Articles::Created))
                    .col(timestamp_with_time_zone_null(Articles::Modified))
                    .to_owned(),
            )
            .await?;

        // Default listing order is newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_articles_created")
                    .table(Articles::Table)
                    .col(Articles::Created)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Articles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Articles {
    Table,
    Id,
    Title,
    Summary,
    Description,
    Image,
    Created,
    Modified,
}
