//! Client for the remote `clientes` REST resource.
//!
//! [`ClienteService`] wraps every CRUD and vehicle-association call. It shapes
//! outgoing payloads (digit-only documents, numeric phone/address fields),
//! normalizes incoming ones into [`ClienteResponse`], and picks which remote
//! query serves a [`ClienteFilter`] since the list endpoint takes no filters.
//!
//! ```rust,no_run
//! use gateway::{ClienteFilter, ClienteService};
//!
//! # async fn run() -> gateway::Result<()> {
//! let service = ClienteService::new("http://localhost:8080/api/clientes")?;
//! let found = service.get_all(Some(&ClienteFilter::by_cpf("123.456.789-00"))).await?;
//! let veiculos = service.get_veiculos_by_cliente_id(1).await?;
//! # let _ = (found, veiculos);
//! # Ok(())
//! # }
//! ```

pub mod config;
mod error;
pub mod filter;
pub mod normalize;
pub mod observability;
pub mod pagination;
mod service;
mod types;

pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use filter::FilterStrategy;
pub use pagination::{Page, Pagination};
pub use service::ClienteService;
pub use types::*;
