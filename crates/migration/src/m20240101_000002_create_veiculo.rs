//! Create `veiculo` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Veiculo::Table)
                    .if_not_exists()
                    .col(pk_auto(Veiculo::Id))
                    .col(string_len(Veiculo::Placa, 8).unique_key().not_null())
                    .col(string_len(Veiculo::Marca, 64).not_null())
                    .col(string_len(Veiculo::Modelo, 64).not_null())
                    .col(integer_null(Veiculo::Ano))
                    .col(string_len_null(Veiculo::Cor, 32))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Veiculo::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Veiculo { Table, Id, Placa, Marca, Modelo, Ano, Cor }
