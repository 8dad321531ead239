use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(users_table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await
    }
}

/// Column-level UNIQUE lets Postgres name the constraints
/// `users_email_key` and `users_username_key`; the repository keys its
/// conflict mapping off those names.
fn users_table() -> TableCreateStatement {
    Table::create()
        .table(Users::Table)
        .if_not_exists()
        .col(pk_auto(Users::Id))
        .col(string_len(Users::Email, 255).unique_key())
        .col(string_len(Users::Username, 255).unique_key())
        .col(string_len_null(Users::FirstName, 100))
        .col(string_len_null(Users::LastName, 100))
        .col(string_len(Users::Password, 255))
        .to_owned()
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Username,
    FirstName,
    LastName,
    Password,
}
