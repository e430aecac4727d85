use sea_orm::{entity::prelude::*, Set, DatabaseConnection, ActiveModelTrait};
use serde::{Deserialize, Serialize};

use crate::{cliente, cliente_veiculo, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "veiculo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub placa: String,
    pub marca: String,
    pub modelo: String,
    pub ano: Option<i32>,
    pub cor: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { ClienteVeiculo }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ClienteVeiculo => Entity::has_many(cliente_veiculo::Entity).into(),
        }
    }
}

impl Related<cliente_veiculo::Entity> for Entity {
    fn to() -> RelationDef { Relation::ClienteVeiculo.def() }
}

impl Related<cliente::Entity> for Entity {
    fn to() -> RelationDef { cliente_veiculo::Relation::Cliente.def() }

    fn via() -> Option<RelationDef> { Some(cliente_veiculo::Relation::Veiculo.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(
    db: &DatabaseConnection,
    placa: &str,
    marca: &str,
    modelo: &str,
) -> Result<Model, errors::ModelError> {
    let placa = placa.trim().to_ascii_uppercase();
    if placa.is_empty() {
        return Err(errors::ModelError::Validation("placa required".into()));
    }
    let am = ActiveModel {
        placa: Set(placa),
        marca: Set(marca.to_string()),
        modelo: Set(modelo.to_string()),
        ano: Set(None),
        cor: Set(None),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
