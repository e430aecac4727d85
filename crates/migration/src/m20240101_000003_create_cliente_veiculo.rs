//! Create `cliente_veiculo` join table.
//!
//! The primary key is the (cliente_id, veiculo_id) pair; rows go away with
//! either side.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClienteVeiculo::Table)
                    .if_not_exists()
                    .col(integer(ClienteVeiculo::ClienteId).not_null())
                    .col(integer(ClienteVeiculo::VeiculoId).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_cliente_veiculo")
                            .col(ClienteVeiculo::ClienteId)
                            .col(ClienteVeiculo::VeiculoId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cliente_veiculo_cliente")
                            .from(ClienteVeiculo::Table, ClienteVeiculo::ClienteId)
                            .to(Cliente::Table, Cliente::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cliente_veiculo_veiculo")
                            .from(ClienteVeiculo::Table, ClienteVeiculo::VeiculoId)
                            .to(Veiculo::Table, Veiculo::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ClienteVeiculo::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ClienteVeiculo { Table, ClienteId, VeiculoId }

#[derive(DeriveIden)]
enum Cliente { Table, Id }

#[derive(DeriveIden)]
enum Veiculo { Table, Id }
