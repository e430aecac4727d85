//! Create `cliente` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cliente::Table)
                    .if_not_exists()
                    .col(pk_auto(Cliente::Id))
                    .col(string_len(Cliente::Nome, 150).not_null())
                    .col(string_len(Cliente::Cpf, 11).unique_key().not_null())
                    .col(string_len_null(Cliente::Email, 254))
                    .col(date_null(Cliente::DataNascimento))
                    .col(timestamp_with_time_zone(Cliente::DataCadastro).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Cliente::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Cliente { Table, Id, Nome, Cpf, Email, DataNascimento, DataCadastro }
