//! Payroll Engine HTTP server.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::logging;
use payroll_engine::service::PayrollService;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing engine.yaml and seed.yaml
    #[arg(short, long, default_value = "./config/default")]
    config: PathBuf,

    /// Address to listen on, overriding server.bind_address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logging::init();

    let config = ConfigLoader::load(&args.config)?;
    let seed = config.seed();
    info!(
        config_dir = %args.config.display(),
        employees = seed.employees.len(),
        contribution_rules = seed.contribution_rules.len(),
        "Configuration loaded"
    );

    let service = PayrollService::new(Arc::new(config.build_store()), config.payroll());
    let app = create_router(AppState::new(service));

    let addr = args
        .bind
        .unwrap_or_else(|| config.server().bind_address.clone());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Payroll engine listening");

    axum::serve(listener, app).await?;

    Ok(())
}
