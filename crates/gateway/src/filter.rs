//! Which remote query serves a [`ClienteFilter`].
//!
//! The list endpoint takes no query parameters, so a filter is mapped onto one
//! of the dedicated lookups or falls back to listing everything.

use crate::normalize::only_digits;
use crate::types::ClienteFilter;

/// Number of digits in a CPF.
pub const CPF_LEN: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterStrategy {
    /// `GET /by-cpf/{cpf}` with the digit-only CPF
    ByCpf(String),
    /// `GET /search-by-name?nome=` with the name as given
    SearchByName(String),
    /// `GET /`
    ListAll,
    /// No remote call; the result is empty
    Empty,
}

/// Digit-only CPF when it has exactly 11 digits.
pub fn valid_cpf(cpf: &str) -> Option<String> {
    let digits = only_digits(cpf);
    (digits.len() == CPF_LEN).then_some(digits)
}

/// Strategy used by `get_all`. Never [`FilterStrategy::Empty`].
///
/// A valid CPF alone selects the CPF lookup, a name alone selects the name
/// search; any other combination (including an invalid CPF) lists everything.
pub fn resolve(filter: Option<&ClienteFilter>) -> FilterStrategy {
    let Some(filter) = filter else { return FilterStrategy::ListAll };
    match (filter.cpf(), filter.nome()) {
        (Some(cpf), None) => match valid_cpf(cpf) {
            Some(digits) => FilterStrategy::ByCpf(digits),
            None => FilterStrategy::ListAll,
        },
        (None, Some(nome)) => FilterStrategy::SearchByName(nome.to_string()),
        _ => FilterStrategy::ListAll,
    }
}

/// Strategy used by `listar_paginado_filtrado`.
///
/// Same as [`resolve`] except that an invalid CPF given as the only filter
/// yields [`FilterStrategy::Empty`] instead of listing everything.
pub fn resolve_paginated(filter: Option<&ClienteFilter>) -> FilterStrategy {
    if let Some(f) = filter {
        if let (Some(cpf), None) = (f.cpf(), f.nome()) {
            if valid_cpf(cpf).is_none() {
                return FilterStrategy::Empty;
            }
        }
    }
    resolve(filter)
}
