//! Relational model for clients, vehicles and the many-to-many link between them.

pub mod errors;
pub mod db;
pub mod cliente;
pub mod veiculo;
pub mod cliente_veiculo;
