use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use common::utils::logging::init_logging;
use configs::AppConfig;
use gateway::{observability, ClienteFilter, ClienteService, GatewayConfig, Pagination};

/// Command-line client for the clientes backend
#[derive(Parser)]
#[command(name = "clientes", version, about)]
struct Cli {
    /// Backend collection URL, e.g. http://localhost:8080/api/clientes
    #[arg(short, long, env = "CLIENTE_API_URL")]
    server: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Dump prometheus metrics to stderr before exiting
    #[arg(long)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List clientes, optionally filtered by CPF or name
    List {
        #[arg(long)]
        cpf: Option<String>,
        #[arg(long)]
        nome: Option<String>,
        /// Page number; enables paged output
        #[arg(long)]
        page: Option<u32>,
        #[arg(long, default_value_t = 20)]
        per_page: u32,
    },
    /// Show one cliente
    Get { id: i64 },
    /// List veiculos linked to a cliente
    Veiculos { id: i64 },
    /// Link veiculos to a cliente
    Associate {
        id: i64,
        #[arg(required = true)]
        veiculos: Vec<i64>,
    },
    /// Remove one veiculo link
    Dissociate { id: i64, veiculo: i64 },
    /// Delete a cliente
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    common::env::load_dotenv();
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let run_id = Uuid::new_v4();
    info!(service = "clientes", event = "start", %run_id, version = env!("CARGO_PKG_VERSION"), "clientes cli starting");

    let cfg = AppConfig::load_and_validate().context("loading configuration")?;
    let mut gw_cfg = GatewayConfig::from(&cfg.api);
    if let Some(server) = cli.server.clone() {
        gw_cfg.base_url = Some(server);
    }
    let service = ClienteService::with_config(&gw_cfg)?;

    let result = run(&service, cli.command).await;
    if cli.print_metrics {
        eprintln!("{}", observability::encode_metrics());
    }

    match result {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            info!(service = "clientes", event = "stop", %run_id, "clientes cli finished");
            Ok(())
        }
        Err(e) => {
            error!(service = "clientes", event = "failed", %run_id, error = %e, "command failed");
            Err(e)
        }
    }
}

async fn run(service: &ClienteService, command: Command) -> Result<Value> {
    let output = match command {
        Command::List { cpf, nome, page, per_page } => {
            let filter = ClienteFilter { cpf, nome };
            match page {
                Some(page) => {
                    let page = service
                        .listar_paginado_filtrado(Some(&filter), Pagination::new(page, per_page))
                        .await?;
                    serde_json::to_value(page)?
                }
                None => serde_json::to_value(service.get_all(Some(&filter)).await?)?,
            }
        }
        Command::Get { id } => serde_json::to_value(service.get_by_id(id).await?)?,
        Command::Veiculos { id } => serde_json::to_value(service.get_veiculos_by_cliente_id(id).await?)?,
        Command::Associate { id, veiculos } => {
            serde_json::to_value(service.associate_veiculos_to_cliente(id, veiculos).await?)?
        }
        Command::Dissociate { id, veiculo } => {
            service.dissociate_veiculo_from_cliente(id, veiculo).await?;
            serde_json::json!({ "clienteId": id, "veiculoId": veiculo, "dissociated": true })
        }
        Command::Delete { id } => {
            service.delete(id).await?;
            serde_json::json!({ "id": id, "deleted": true })
        }
    };
    Ok(output)
}
