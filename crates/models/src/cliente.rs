use sea_orm::{entity::prelude::*, Set, DatabaseConnection, ActiveModelTrait};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{cliente_veiculo, errors, veiculo};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cliente")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nome: String,
    #[sea_orm(unique)]
    pub cpf: String,
    pub email: Option<String>,
    pub data_nascimento: Option<Date>,
    pub data_cadastro: DateTimeWithTimeZone,
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

impl Related<veiculo::Entity> for Entity {
    fn to() -> RelationDef { cliente_veiculo::Relation::Veiculo.def() }

    fn via() -> Option<RelationDef> { Some(cliente_veiculo::Relation::Cliente.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

/// Strip everything but digits and require exactly 11 of them.
pub fn validate_cpf(cpf: &str) -> Result<String, errors::ModelError> {
    let digits: String = cpf.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 11 {
        return Err(errors::ModelError::Validation("cpf must have 11 digits".into()));
    }
    Ok(digits)
}

pub async fn create(
    db: &DatabaseConnection,
    nome: &str,
    cpf: &str,
    email: Option<&str>,
) -> Result<Model, errors::ModelError> {
    if nome.trim().is_empty() {
        return Err(errors::ModelError::Validation("nome required".into()));
    }
    let cpf = validate_cpf(cpf)?;
    let am = ActiveModel {
        nome: Set(nome.trim().to_string()),
        cpf: Set(cpf),
        email: Set(email.map(str::to_string)),
        data_nascimento: Set(None),
        data_cadastro: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
