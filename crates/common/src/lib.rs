//! Shared runtime helpers: environment access and tracing setup.

pub mod env;
pub mod utils;
