//! HTTP client for the `clientes` resource

use std::collections::BTreeSet;

use configs::CLIENTE_API_URL_ENV;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::filter::{self, FilterStrategy};
use crate::observability;
use crate::pagination::{Page, Pagination};
use crate::types::*;

/// Longest slice of a non-JSON error body kept in error messages
const MAX_ERROR_BODY: usize = 512;

/// Client for the remote `clientes` resource and its `veiculos` links.
///
/// Cheap to clone; holds no mutable state besides the connection pool.
#[derive(Debug, Clone)]
pub struct ClienteService {
    client: Client,
    base_url: Option<Url>,
}

impl ClienteService {
    /// Create a service rooted at `base_url` (e.g. `http://localhost:8080/api/clientes`)
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(&GatewayConfig::new(base_url))
    }

    /// Create a service from `CLIENTE_API_URL`.
    ///
    /// A missing variable is not an error yet; every remote operation will
    /// fail with [`GatewayError::MissingBaseUrl`] instead.
    pub fn from_env() -> Result<Self> {
        Self::with_config(&GatewayConfig::from_env())
    }

    pub fn with_config(config: &GatewayConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build()?;
        let base_url = config.base_url.as_deref().map(parse_base_url).transpose()?;
        Ok(Self { client, base_url })
    }

    /// Get the base URL, if configured
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    // =========================================================================
    // Listing and lookup
    // =========================================================================

    /// List clientes, using `filter` to pick the remote query.
    ///
    /// See [`filter::resolve`] for the rules.
    #[instrument(skip(self, filter))]
    pub async fn get_all(&self, filter: Option<&ClienteFilter>) -> Result<Vec<ClienteResponse>> {
        let strategy = filter::resolve(filter);
        debug!(?strategy, "resolved cliente filter");
        self.run_strategy(strategy).await
    }

    /// Paged listing. Unlike [`get_all`](Self::get_all), a CPF-only filter
    /// whose CPF is not 11 digits gives an empty page without a remote call.
    #[instrument(skip(self, filter))]
    pub async fn listar_paginado_filtrado(
        &self,
        filter: Option<&ClienteFilter>,
        pagination: Pagination,
    ) -> Result<Page<ClienteResponse>> {
        let strategy = filter::resolve_paginated(filter);
        debug!(?strategy, "resolved paged cliente filter");
        if strategy == FilterStrategy::Empty {
            observability::LOCAL_SHORT_CIRCUITS_TOTAL.inc();
            return Ok(Page::empty(pagination));
        }
        let items = self.run_strategy(strategy).await?;
        Ok(Page::from_items(items, pagination))
    }

    async fn run_strategy(&self, strategy: FilterStrategy) -> Result<Vec<ClienteResponse>> {
        match strategy {
            FilterStrategy::ByCpf(cpf) => Ok(self.get_by_cpf(&cpf).await?.into_iter().collect()),
            FilterStrategy::SearchByName(nome) => self.search_by_name(&nome).await,
            FilterStrategy::ListAll => self.list_all().await,
            FilterStrategy::Empty => Ok(Vec::new()),
        }
    }

    /// `GET /` with no filtering
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<ClienteResponse>> {
        let url = self.endpoint(&[])?;
        debug!("Listing clientes from {}", url);

        let response = self.send("list_all", self.client.get(url)).await?;
        let raw: Vec<ClienteRaw> = Self::expect_json("list_all", response).await?;
        Ok(raw.into_iter().map(ClienteResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<ClienteResponse> {
        let id = id.to_string();
        let url = self.endpoint(&[&id])?;

        let response = self.send("get_by_id", self.client.get(url)).await?;
        let raw: ClienteRaw = Self::expect_json("get_by_id", response).await?;
        Ok(raw.into())
    }

    /// Exact lookup by CPF. `None` when the CPF is not 11 digits (no remote
    /// call) or when the server answers 404.
    #[instrument(skip(self, cpf))]
    pub async fn get_by_cpf(&self, cpf: &str) -> Result<Option<ClienteResponse>> {
        let Some(digits) = filter::valid_cpf(cpf) else {
            debug!("cpf does not have 11 digits, skipping lookup");
            observability::LOCAL_SHORT_CIRCUITS_TOTAL.inc();
            return Ok(None);
        };
        let url = self.endpoint(&["by-cpf", &digits])?;

        let response = self.send("get_by_cpf", self.client.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("no cliente with this cpf");
            return Ok(None);
        }
        let raw: ClienteRaw = Self::expect_json("get_by_cpf", response).await?;
        Ok(Some(raw.into()))
    }

    /// Name search; `nome` is sent as given. Blank names return nothing locally.
    #[instrument(skip(self))]
    pub async fn search_by_name(&self, nome: &str) -> Result<Vec<ClienteResponse>> {
        if nome.trim().is_empty() {
            observability::LOCAL_SHORT_CIRCUITS_TOTAL.inc();
            return Ok(Vec::new());
        }
        let mut url = self.endpoint(&["search-by-name"])?;
        url.query_pairs_mut().append_pair("nome", nome);

        let response = self.send("search_by_name", self.client.get(url)).await?;
        let raw: Vec<ClienteRaw> = Self::expect_json("search_by_name", response).await?;
        Ok(raw.into_iter().map(ClienteResponse::from).collect())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    #[instrument(skip(self, form))]
    pub async fn create(&self, form: &ClienteForm) -> Result<ClienteResponse> {
        let url = self.endpoint(&[])?;
        let payload = ClienteRequestPayload::from(form);

        let response = self.send("create", self.client.post(url).json(&payload)).await?;
        let raw: ClienteRaw = Self::expect_json("create", response).await?;
        Ok(raw.into())
    }

    #[instrument(skip(self, form))]
    pub async fn update(&self, id: i64, form: &ClienteForm) -> Result<()> {
        let id = id.to_string();
        let url = self.endpoint(&[&id])?;
        let payload = ClienteRequestPayload::from(form);

        let response = self.send("update", self.client.put(url).json(&payload)).await?;
        Self::expect_success("update", response).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let id = id.to_string();
        let url = self.endpoint(&[&id])?;

        let response = self.send("delete", self.client.delete(url)).await?;
        Self::expect_success("delete", response).await
    }

    // =========================================================================
    // Veiculo associations
    // =========================================================================

    /// Veiculos linked to a cliente. 204 means the cliente has none;
    /// 404 means the cliente does not exist.
    #[instrument(skip(self))]
    pub async fn get_veiculos_by_cliente_id(&self, cliente_id: i64) -> Result<Vec<VeiculoResponse>> {
        let id = cliente_id.to_string();
        let url = self.endpoint(&[&id, "veiculos"])?;

        let response = self.send("get_veiculos", self.client.get(url)).await?;
        match response.status() {
            StatusCode::NO_CONTENT => Ok(Vec::new()),
            StatusCode::NOT_FOUND => {
                observability::record_failure("get_veiculos", Some(404));
                Err(GatewayError::ClienteNotFound(cliente_id))
            }
            _ => Self::expect_json("get_veiculos", response).await,
        }
    }

    /// Link veiculos to a cliente. Duplicate ids are sent once.
    #[instrument(skip(self, veiculo_ids))]
    pub async fn associate_veiculos_to_cliente(
        &self,
        cliente_id: i64,
        veiculo_ids: impl IntoIterator<Item = i64>,
    ) -> Result<Vec<ClienteVeiculoResponse>> {
        let id = cliente_id.to_string();
        let url = self.endpoint(&[&id, "veiculos"])?;
        let ids: BTreeSet<i64> = veiculo_ids.into_iter().collect();
        let payload = ClienteVeiculoRequest { veiculo_ids: ids.into_iter().collect() };
        debug!(count = payload.veiculo_ids.len(), "associating veiculos");

        let response = self.send("associate_veiculos", self.client.post(url).json(&payload)).await?;
        Self::expect_json("associate_veiculos", response).await
    }

    #[instrument(skip(self))]
    pub async fn dissociate_veiculo_from_cliente(&self, cliente_id: i64, veiculo_id: i64) -> Result<()> {
        let id = cliente_id.to_string();
        let vid = veiculo_id.to_string();
        let url = self.endpoint(&[&id, "veiculos", &vid])?;

        let response = self.send("dissociate_veiculo", self.client.delete(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            observability::record_failure("dissociate_veiculo", Some(404));
            return Err(GatewayError::AssociationNotFound { cliente_id, veiculo_id });
        }
        Self::expect_success("dissociate_veiculo", response).await
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Base URL with `segments` appended as encoded path segments
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self
            .base_url
            .clone()
            .ok_or(GatewayError::MissingBaseUrl(CLIENTE_API_URL_ENV))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| GatewayError::InvalidBaseUrl("cannot take path segments".into()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<Response> {
        observability::REMOTE_REQUESTS_TOTAL.with_label_values(&[operation]).inc();
        let timer = observability::REMOTE_DURATION.with_label_values(&[operation]).start_timer();
        let result = request.send().await;
        timer.observe_duration();

        result.map_err(|e| {
            warn!(operation, error = %e, "transport failure");
            observability::record_failure(operation, None);
            GatewayError::Http(e)
        })
    }

    async fn expect_json<T: DeserializeOwned>(operation: &'static str, response: Response) -> Result<T> {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| GatewayError::Parse(format!("{operation}: {e}")))
        } else {
            Err(Self::extract_error(operation, response).await)
        }
    }

    async fn expect_success(operation: &'static str, response: Response) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::extract_error(operation, response).await)
        }
    }

    /// Extract error from failed response
    async fn extract_error(operation: &'static str, response: Response) -> GatewayError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        observability::record_failure(operation, Some(status.as_u16()));

        let problem = serde_json::from_str::<ProblemDetails>(&body)
            .ok()
            .filter(|p| !p.is_empty());
        let err = match (status, problem) {
            (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, Some(p)) => {
                GatewayError::Validation(p.message())
            }
            (_, Some(p)) => GatewayError::remote(status.as_u16(), p.message()),
            (_, None) if !body.trim().is_empty() => GatewayError::remote(
                status.as_u16(),
                body.trim().chars().take(MAX_ERROR_BODY).collect::<String>(),
            ),
            (_, None) => GatewayError::remote(status.as_u16(), format!("HTTP {status}")),
        };
        warn!(operation, status = status.as_u16(), error = %err, "remote call failed");
        err
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(GatewayError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_creation() {
        let service = ClienteService::new("http://localhost:8080/api/clientes");
        assert!(service.is_ok());
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(ClienteService::new("not a url"), Err(GatewayError::InvalidUrl(_))));
        assert!(matches!(
            ClienteService::new("mailto:someone@example.com"),
            Err(GatewayError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn endpoints_append_encoded_segments() {
        let service = ClienteService::new("http://localhost:8080/api/clientes/").unwrap();
        assert_eq!(service.endpoint(&[]).unwrap().as_str(), "http://localhost:8080/api/clientes");
        assert_eq!(
            service.endpoint(&["7", "veiculos", "12"]).unwrap().as_str(),
            "http://localhost:8080/api/clientes/7/veiculos/12"
        );
        assert_eq!(
            service.endpoint(&["by-cpf", "a/b"]).unwrap().as_str(),
            "http://localhost:8080/api/clientes/by-cpf/a%2Fb"
        );
    }

    #[tokio::test]
    async fn missing_base_url_fails_on_first_call() {
        let service = ClienteService::with_config(&GatewayConfig::default()).unwrap();
        assert!(service.base_url().is_none());
        let err = service.list_all().await.unwrap_err();
        assert!(matches!(err, GatewayError::MissingBaseUrl(CLIENTE_API_URL_ENV)));
    }

    #[tokio::test]
    async fn local_guards_skip_the_remote() {
        // no base URL: reaching the remote would error
        let service = ClienteService::with_config(&GatewayConfig::default()).unwrap();
        assert_eq!(service.get_by_cpf("123").await.unwrap(), None);
        assert!(service.search_by_name("   ").await.unwrap().is_empty());
        let page = service
            .listar_paginado_filtrado(Some(&ClienteFilter::by_cpf("999")), Pagination::default())
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }
}
