use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Cliente: name search
        manager
            .create_index(
                Index::create()
                    .name("idx_cliente_nome")
                    .table(Cliente::Table)
                    .col(Cliente::Nome)
                    .to_owned(),
            )
            .await?;

        // ClienteVeiculo: the PK covers cliente_id lookups; veiculo_id needs its own
        manager
            .create_index(
                Index::create()
                    .name("idx_cliente_veiculo_veiculo")
                    .table(ClienteVeiculo::Table)
                    .col(ClienteVeiculo::VeiculoId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_cliente_veiculo_veiculo").table(ClienteVeiculo::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_cliente_nome").table(Cliente::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Cliente { Table, Nome }

#[derive(DeriveIden)]
enum ClienteVeiculo { Table, VeiculoId }
