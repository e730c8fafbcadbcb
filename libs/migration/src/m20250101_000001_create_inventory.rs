use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inventory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Inventory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string(Inventory::Name))
                    .col(text(Inventory::Description))
                    .col(string_null(Inventory::Image))
                    .col(double(Inventory::Price))
                    .col(integer(Inventory::Stock))
                    .col(string(Inventory::Category))
                    .col(boolean(Inventory::Disabled).default(false))
                    .to_owned(),
            )
            .await?;

        // Backs the enabled-only listings
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_inventory_disabled")
                    .table(Inventory::Table)
                    .col(Inventory::Disabled)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Inventory::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Inventory {
    Table,
    Id,
    Name,
    Description,
    Image,
    Price,
    Stock,
    Category,
    Disabled,
}
