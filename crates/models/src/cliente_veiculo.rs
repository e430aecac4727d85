//! Join entity linking a `cliente` to a `veiculo`.
//!
//! Identity is the (cliente_id, veiculo_id) pair. Both halves are required;
//! an active model missing either is refused before it reaches the database.

use sea_orm::{entity::prelude::*, ActiveValue, DatabaseConnection, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{cliente, errors::ModelError, veiculo};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cliente_veiculo")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub cliente_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub veiculo_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Cliente, Veiculo }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Cliente => Entity::belongs_to(cliente::Entity)
                .from(Column::ClienteId)
                .to(cliente::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Veiculo => Entity::belongs_to(veiculo::Entity)
                .from(Column::VeiculoId)
                .to(veiculo::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<cliente::Entity> for Entity {
    fn to() -> RelationDef { Relation::Cliente.def() }
}

impl Related<veiculo::Entity> for Entity {
    fn to() -> RelationDef { Relation::Veiculo.def() }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        validate(&self).map_err(|e| DbErr::Custom(e.to_string()))?;
        Ok(self)
    }
}

fn required_id(value: &ActiveValue<i32>, name: &str) -> Result<i32, ModelError> {
    match value {
        ActiveValue::Set(id) | ActiveValue::Unchanged(id) if *id > 0 => Ok(*id),
        ActiveValue::Set(_) | ActiveValue::Unchanged(_) => {
            Err(ModelError::Validation(format!("{name} must be positive")))
        }
        ActiveValue::NotSet => Err(ModelError::Validation(format!("{name} is required"))),
    }
}

/// Both key columns present and positive.
pub fn validate(am: &ActiveModel) -> Result<(i32, i32), ModelError> {
    let cliente_id = required_id(&am.cliente_id, "cliente_id")?;
    let veiculo_id = required_id(&am.veiculo_id, "veiculo_id")?;
    Ok((cliente_id, veiculo_id))
}

/// An association with its navigation sides, filled only when loaded eagerly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Association {
    pub cliente_id: i32,
    pub veiculo_id: i32,
    pub cliente: Option<cliente::Model>,
    pub veiculo: Option<veiculo::Model>,
}

impl From<Model> for Association {
    fn from(m: Model) -> Self {
        Self { cliente_id: m.cliente_id, veiculo_id: m.veiculo_id, cliente: None, veiculo: None }
    }
}

impl Association {
    pub fn with_cliente(mut self, cliente: cliente::Model) -> Self {
        self.cliente = Some(cliente);
        self
    }

    pub fn with_veiculo(mut self, veiculo: veiculo::Model) -> Self {
        self.veiculo = Some(veiculo);
        self
    }

    pub fn key(&self) -> (i32, i32) { (self.cliente_id, self.veiculo_id) }
}

pub async fn link(db: &DatabaseConnection, cliente_id: i32, veiculo_id: i32) -> Result<Model, ModelError> {
    let am = ActiveModel { cliente_id: Set(cliente_id), veiculo_id: Set(veiculo_id) };
    validate(&am)?;
    debug!(cliente_id, veiculo_id, "linking veiculo to cliente");
    am.insert(db).await.map_err(ModelError::from)
}

/// Returns whether a row was removed.
pub async fn unlink(db: &DatabaseConnection, cliente_id: i32, veiculo_id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id((cliente_id, veiculo_id)).exec(db).await?;
    Ok(res.rows_affected > 0)
}

/// Links of one cliente with the `veiculo` side loaded.
pub async fn find_for_cliente(db: &DatabaseConnection, cliente_id: i32) -> Result<Vec<Association>, ModelError> {
    let rows = Entity::find()
        .filter(Column::ClienteId.eq(cliente_id))
        .find_also_related(veiculo::Entity)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(link, veiculo)| {
            let assoc = Association::from(link);
            match veiculo {
                Some(v) => assoc.with_veiculo(v),
                None => assoc,
            }
        })
        .collect())
}
