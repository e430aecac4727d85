//! Wire types for the `clientes` resource.
//!
//! `*Raw` types mirror what the server sends; `*Response` types are what
//! callers get after normalization. `*Form` types hold user input as typed,
//! `*Request` types are what goes over the wire after shaping.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// =============================================================================
// Filter
// =============================================================================

/// Loose filter for listing clientes. Blank fields count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClienteFilter {
    pub cpf: Option<String>,
    pub nome: Option<String>,
}

impl ClienteFilter {
    pub fn by_cpf(cpf: impl Into<String>) -> Self {
        Self { cpf: Some(cpf.into()), nome: None }
    }

    pub fn by_nome(nome: impl Into<String>) -> Self {
        Self { cpf: None, nome: Some(nome.into()) }
    }

    pub fn cpf(&self) -> Option<&str> {
        present(self.cpf.as_deref())
    }

    pub fn nome(&self) -> Option<&str> {
        present(self.nome.as_deref())
    }
}

fn present(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.trim().is_empty())
}

// =============================================================================
// Responses
// =============================================================================

/// Cliente as the server returns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteRaw {
    pub id: Option<i64>,
    pub nome: Option<String>,
    pub cpf: Option<String>,
    pub email: Option<String>,
    pub data_nascimento: Option<String>,
    pub data_cadastro: Option<String>,
    pub endereco: Option<EnderecoRaw>,
    pub contato: Option<ContatoRaw>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnderecoRaw {
    pub logradouro: Option<String>,
    pub numero: Option<i64>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub uf: Option<String>,
    pub cep: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContatoRaw {
    pub ddi: Option<i64>,
    pub ddd: Option<i64>,
    pub celular: Option<String>,
}

/// Normalized cliente. Dates are `YYYY-MM-DD` (or empty when unknown);
/// nested records are omitted entirely when the server sent none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteResponse {
    pub id: Option<i64>,
    pub nome: Option<String>,
    pub cpf: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub data_nascimento: String,
    #[serde(default)]
    pub data_cadastro: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endereco_response_dto: Option<EnderecoResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contato_response_dto: Option<ContatoResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnderecoResponse {
    pub logradouro: Option<String>,
    pub numero: Option<i64>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub uf: Option<String>,
    pub cep: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContatoResponse {
    pub ddi: Option<i64>,
    pub ddd: Option<i64>,
    pub celular: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeiculoResponse {
    pub id: i64,
    pub placa: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub ano: Option<i32>,
    pub cor: Option<String>,
}

/// Link returned by the associate call, kept as the server sent it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteVeiculoResponse {
    pub cliente_id: i64,
    pub veiculo_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veiculo: Option<VeiculoResponse>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// =============================================================================
// Requests
// =============================================================================

/// Cliente input as typed by a user. Numeric fields accept strings or numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteForm {
    pub nome: Option<String>,
    pub cpf: Option<String>,
    pub email: Option<String>,
    pub data_nascimento: Option<String>,
    pub endereco_request_dto: Option<EnderecoForm>,
    pub contato_request_dto: Option<ContatoForm>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnderecoForm {
    pub logradouro: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub uf: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub cep: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContatoForm {
    #[serde(default, deserialize_with = "string_or_number")]
    pub ddi: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub ddd: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub celular: Option<String>,
}

/// Shaped create/update body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteRequestPayload {
    pub nome: Option<String>,
    pub cpf: Option<String>,
    pub email: Option<String>,
    pub data_nascimento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endereco_request_dto: Option<EnderecoRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contato_request_dto: Option<ContatoRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnderecoRequest {
    pub logradouro: Option<String>,
    pub numero: i64,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub uf: Option<String>,
    pub cep: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContatoRequest {
    pub ddi: i64,
    pub ddd: i64,
    pub celular: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteVeiculoRequest {
    pub veiculo_ids: Vec<i64>,
}

fn string_or_number<'de, D>(d: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

// =============================================================================
// Errors
// =============================================================================

/// Problem-details style error body.
///
/// `errors` is kept as raw JSON: servers send a list of messages, a map of
/// field to message, or a map of field to list of messages.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    pub title: Option<String>,
    pub detail: Option<String>,
    #[serde(default, alias = "validationErrors")]
    pub errors: Option<Value>,
}

impl ProblemDetails {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.detail.is_none()
            && self.errors.as_ref().map_or(true, |e| flatten_errors(e).is_empty())
    }

    /// `title - detail - errors`, skipping the parts that are missing.
    pub fn message(&self) -> String {
        let errors = self.errors.as_ref().map(|e| flatten_errors(e).join("; "));
        [self.title.clone(), self.detail.clone(), errors]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" - ")
    }
}

/// One line per message; map entries become `field: message`.
fn flatten_errors(errors: &Value) -> Vec<String> {
    match errors {
        Value::Null => Vec::new(),
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(flatten_errors).collect(),
        Value::Object(fields) => fields
            .iter()
            .flat_map(|(field, msgs)| {
                flatten_errors(msgs).into_iter().map(move |m| format!("{field}: {m}"))
            })
            .collect(),
        other => vec![other.to_string()],
    }
}
