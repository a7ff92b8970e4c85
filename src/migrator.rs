use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_cars_table::Migration),
            Box::new(m20240301_000002_create_buyers_table::Migration),
            Box::new(m20240301_000003_create_sellers_table::Migration),
            Box::new(m20240301_000004_create_stocks_table::Migration),
            Box::new(m20240301_000005_create_sales_table::Migration),
            Box::new(m20240301_000006_create_users_table::Migration),
        ]
    }
}

#[derive(DeriveIden)]
pub(crate) enum Cars {
    Table,
    Id,
    Name,
    Year,
    Brand,
}

#[derive(DeriveIden)]
pub(crate) enum Buyers {
    Table,
    Id,
    Name,
    Phone,
    AddressCep,
    AddressPublicPlace,
    AddressCity,
    AddressDistrict,
    AddressState,
}

#[derive(DeriveIden)]
pub(crate) enum Sellers {
    Table,
    Id,
    Name,
    Cpf,
    Phone,
}

#[derive(DeriveIden)]
pub(crate) enum Stocks {
    Table,
    Id,
    CarId,
    Quantity,
}

#[derive(DeriveIden)]
pub(crate) enum Sales {
    Table,
    Id,
    CarId,
    BuyerId,
    SellerId,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Email,
    HashedPassword,
    IsActive,
}

mod m20240301_000001_create_cars_table {
    use super::Cars;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000001_create_cars_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Cars::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Cars::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Cars::Name).string().not_null())
                        .col(ColumnDef::new(Cars::Year).integer().not_null())
                        .col(ColumnDef::new(Cars::Brand).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_cars_name_year_brand")
                        .table(Cars::Table)
                        .col(Cars::Name)
                        .col(Cars::Year)
                        .col(Cars::Brand)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Cars::Table).to_owned())
                .await
        }
    }
}

mod m20240301_000002_create_buyers_table {
    use super::Buyers;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000002_create_buyers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Buyers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Buyers::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Buyers::Name).string().not_null())
                        .col(ColumnDef::new(Buyers::Phone).string().not_null().unique_key())
                        .col(ColumnDef::new(Buyers::AddressCep).string().not_null())
                        .col(ColumnDef::new(Buyers::AddressPublicPlace).string().not_null())
                        .col(ColumnDef::new(Buyers::AddressCity).string().not_null())
                        .col(ColumnDef::new(Buyers::AddressDistrict).string().not_null())
                        .col(ColumnDef::new(Buyers::AddressState).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_buyers_name")
                        .table(Buyers::Table)
                        .col(Buyers::Name)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Buyers::Table).to_owned())
                .await
        }
    }
}

mod m20240301_000003_create_sellers_table {
    use super::Sellers;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000003_create_sellers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Sellers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Sellers::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Sellers::Name).string().not_null())
                        .col(ColumnDef::new(Sellers::Cpf).string().not_null().unique_key())
                        .col(ColumnDef::new(Sellers::Phone).string().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Sellers::Table).to_owned())
                .await
        }
    }
}

mod m20240301_000004_create_stocks_table {
    use super::{Cars, Stocks};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000004_create_stocks_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Stocks::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Stocks::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Stocks::CarId).integer().not_null().unique_key())
                        .col(
                            ColumnDef::new(Stocks::Quantity)
                                .integer()
                                .not_null()
                                .default(0)
                                .check(Expr::col(Stocks::Quantity).gte(0)),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_stocks_car_id")
                                .from(Stocks::Table, Stocks::CarId)
                                .to(Cars::Table, Cars::Id),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Stocks::Table).to_owned())
                .await
        }
    }
}

mod m20240301_000005_create_sales_table {
    use super::{Buyers, Cars, Sales, Sellers};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000005_create_sales_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Sales::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Sales::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Sales::CarId).integer().not_null())
                        .col(ColumnDef::new(Sales::BuyerId).integer().not_null())
                        .col(ColumnDef::new(Sales::SellerId).integer().not_null())
                        .col(
                            ColumnDef::new(Sales::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_car_id")
                                .from(Sales::Table, Sales::CarId)
                                .to(Cars::Table, Cars::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_buyer_id")
                                .from(Sales::Table, Sales::BuyerId)
                                .to(Buyers::Table, Buyers::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_seller_id")
                                .from(Sales::Table, Sales::SellerId)
                                .to(Sellers::Table, Sellers::Id),
                        )
                        .to_owned(),
                )
                .await?;

            for (name, column) in [
                ("idx_sales_car_id", Sales::CarId),
                ("idx_sales_buyer_id", Sales::BuyerId),
                ("idx_sales_seller_id", Sales::SellerId),
            ] {
                manager
                    .create_index(
                        Index::create()
                            .if_not_exists()
                            .name(name)
                            .table(Sales::Table)
                            .col(column)
                            .to_owned(),
                    )
                    .await?;
            }

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Sales::Table).to_owned())
                .await
        }
    }
}

mod m20240301_000006_create_users_table {
    use super::Users;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000006_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Users::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                        .col(ColumnDef::new(Users::HashedPassword).string().not_null())
                        .col(
                            ColumnDef::new(Users::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }
}
