//! In-process stand-in for the remote `clientes` backend.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use gateway::ClienteService;

pub const KNOWN_CPF: &str = "12345678900";
pub const CLIENTE_WITH_VEICULOS: i64 = 1;
pub const CLIENTE_WITHOUT_VEICULOS: i64 = 2;
pub const BROKEN_CLIENTE: i64 = 500;
pub const UNKNOWN_VEICULO: i64 = 999;
/// Rejects unknown veiculos with an ASP.NET `ValidationProblemDetails` body.
pub const DOTNET_VALIDATION_CLIENTE: i64 = 3;

#[derive(Clone, Default)]
pub struct Recorder {
    hits: Arc<Mutex<Vec<String>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl Recorder {
    fn hit(&self, label: impl Into<String>) {
        self.hits.lock().expect("hits lock").push(label.into());
    }

    fn body(&self, body: Value) {
        self.bodies.lock().expect("bodies lock").push(body);
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().expect("hits lock").clone()
    }

    pub fn last_body(&self) -> Option<Value> {
        self.bodies.lock().expect("bodies lock").last().cloned()
    }
}

pub struct TestApp {
    pub base_url: String,
    pub service: ClienteService,
    pub recorder: Recorder,
}

fn maria() -> Value {
    json!({
        "id": 1,
        "nome": "Maria da Silva",
        "cpf": KNOWN_CPF,
        "email": "maria@example.com",
        "dataNascimento": "1990-03-15T00:00:00Z",
        "dataCadastro": "2024-05-01T12:30:00Z",
        "endereco": {
            "logradouro": "Rua das Flores",
            "numero": 120,
            "bairro": "Centro",
            "cidade": "São Paulo",
            "uf": "SP",
            "cep": "01001000"
        },
        "contato": { "ddi": 55, "ddd": 11, "celular": "11912345678" }
    })
}

fn joao() -> Value {
    json!({
        "id": 2,
        "nome": "João Souza",
        "cpf": "98765432100",
        "dataCadastro": "2024-06-10T08:00:00Z",
        "endereco": null
    })
}

fn gol() -> Value {
    json!({ "id": 10, "placa": "ABC1D23", "marca": "VW", "modelo": "Gol", "ano": 2015, "cor": "prata" })
}

async fn list_all(State(rec): State<Recorder>) -> Json<Value> {
    rec.hit("GET /");
    Json(json!([maria(), joao()]))
}

async fn create(State(rec): State<Recorder>, Json(body): Json<Value>) -> Response {
    rec.hit("POST /");
    rec.body(body.clone());
    let mut created = body;
    created["id"] = json!(99);
    created["dataCadastro"] = json!("2024-07-01T09:15:00Z");
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn by_cpf(State(rec): State<Recorder>, Path(cpf): Path<String>) -> Response {
    rec.hit(format!("GET /by-cpf/{cpf}"));
    if cpf == KNOWN_CPF {
        Json(maria()).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

#[derive(Deserialize)]
struct NomeQuery {
    nome: String,
}

async fn search_by_name(State(rec): State<Recorder>, Query(q): Query<NomeQuery>) -> Json<Value> {
    rec.hit(format!("GET /search-by-name?nome={}", q.nome));
    let needle = q.nome.to_lowercase();
    let found: Vec<Value> = [maria(), joao()]
        .into_iter()
        .filter(|c| c["nome"].as_str().unwrap_or_default().to_lowercase().contains(&needle))
        .collect();
    Json(Value::Array(found))
}

async fn get_one(State(rec): State<Recorder>, Path(id): Path<i64>) -> Response {
    rec.hit(format!("GET /{id}"));
    match id {
        1 => Json(maria()).into_response(),
        2 => Json(joao()).into_response(),
        BROKEN_CLIENTE => (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn update(State(rec): State<Recorder>, Path(id): Path<i64>, Json(body): Json<Value>) -> StatusCode {
    rec.hit(format!("PUT /{id}"));
    rec.body(body);
    if id == 1 || id == 2 { StatusCode::NO_CONTENT } else { StatusCode::NOT_FOUND }
}

async fn remove(State(rec): State<Recorder>, Path(id): Path<i64>) -> StatusCode {
    rec.hit(format!("DELETE /{id}"));
    if id == 1 || id == 2 { StatusCode::NO_CONTENT } else { StatusCode::NOT_FOUND }
}

async fn veiculos(State(rec): State<Recorder>, Path(id): Path<i64>) -> Response {
    rec.hit(format!("GET /{id}/veiculos"));
    match id {
        CLIENTE_WITH_VEICULOS => Json(json!([gol()])).into_response(),
        CLIENTE_WITHOUT_VEICULOS => StatusCode::NO_CONTENT.into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn associate(State(rec): State<Recorder>, Path(id): Path<i64>, Json(body): Json<Value>) -> Response {
    rec.hit(format!("POST /{id}/veiculos"));
    rec.body(body.clone());
    let ids: Vec<i64> = body["veiculoIds"]
        .as_array()
        .map(|a| a.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default();
    if ids.contains(&UNKNOWN_VEICULO) && id == DOTNET_VALIDATION_CLIENTE {
        let problem = json!({
            "type": "https://tools.ietf.org/html/rfc9110#section-15.5.1",
            "title": "One or more validation errors occurred.",
            "status": 400,
            "errors": { "VeiculoIds": ["Veiculo 999 inexistente"] },
            "traceId": "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-00"
        });
        return (StatusCode::BAD_REQUEST, Json(problem)).into_response();
    }
    if ids.contains(&UNKNOWN_VEICULO) {
        let problem = json!({
            "type": "about:blank",
            "title": "Validation failed",
            "status": 400,
            "detail": "some veiculos do not exist",
            "errors": ["veiculoIds: 999 not found"]
        });
        return (StatusCode::BAD_REQUEST, Json(problem)).into_response();
    }
    let links: Vec<Value> = ids
        .iter()
        .map(|v| json!({ "clienteId": id, "veiculoId": v, "createdBy": "test" }))
        .collect();
    (StatusCode::CREATED, Json(Value::Array(links))).into_response()
}

async fn dissociate(State(rec): State<Recorder>, Path((id, vid)): Path<(i64, i64)>) -> StatusCode {
    rec.hit(format!("DELETE /{id}/veiculos/{vid}"));
    if id == CLIENTE_WITH_VEICULOS && vid == 10 { StatusCode::NO_CONTENT } else { StatusCode::NOT_FOUND }
}

fn router(recorder: Recorder) -> Router {
    Router::new()
        .route("/api/clientes", get(list_all).post(create))
        .route("/api/clientes/by-cpf/:cpf", get(by_cpf))
        .route("/api/clientes/search-by-name", get(search_by_name))
        .route("/api/clientes/:id", get(get_one).put(update).delete(remove))
        .route("/api/clientes/:id/veiculos", get(veiculos).post(associate))
        .route("/api/clientes/:id/veiculos/:vid", delete(dissociate))
        .with_state(recorder)
}

pub async fn start_backend() -> anyhow::Result<TestApp> {
    let recorder = Recorder::default();
    let app = router(recorder.clone());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}/api/clientes", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    let service = ClienteService::new(&base_url)?;
    Ok(TestApp { base_url, service, recorder })
}
