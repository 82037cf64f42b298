//! Mint service binary.
//!
//! Loads `.env`, configures logging, loads the service payer (the process
//! exits if it is missing) and serves the transaction-request endpoints.
use std::sync::Arc;

use actix_web::middleware::{self, Logger};
use actix_web::{web, App, HttpServer};
use color_eyre::{eyre::WrapErr, Result};
use dotenvy::dotenv;
use log::info;

use dino_mint_service::{
    api::routes::configure_routes,
    config::{MintConfig, ServerConfig},
    domain::MintService,
    logging::setup_logging,
    metrics::middleware::MetricsMiddleware,
    models::AppState,
    services::{
        CandyMachineRegistry, RpcAssociatedAccountResolver, ServiceKeys, SolanaProvider,
        SolanaProviderTrait,
    },
};

fn initialize_app_state(server: &ServerConfig, mint: MintConfig) -> Result<AppState> {
    let keys = ServiceKeys::from_env().wrap_err("Failed to load service payer")?;

    let provider: Arc<dyn SolanaProviderTrait> = Arc::new(
        SolanaProvider::new(&server.rpc_url, server.rpc_timeout_seconds)
            .wrap_err("Failed to create Solana provider")?,
    );
    let registry = Arc::new(CandyMachineRegistry::new(
        provider.clone(),
        mint.template,
        mint.program_id,
    ));
    let accounts = Arc::new(RpcAssociatedAccountResolver::new(
        provider.clone(),
        keys.clone(),
    ));

    let metadata = mint.metadata();
    let mint_service = MintService::new(provider, registry, accounts, keys, mint);

    Ok(AppState {
        mint_service: Arc::new(mint_service),
        metadata,
    })
}

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // Load environment variables from .env file
    dotenv().ok();

    setup_logging()?;

    let server_config = ServerConfig::from_env().wrap_err("Invalid server configuration")?;
    let mint_config = MintConfig::from_env().wrap_err("Invalid mint configuration")?;
    info!(
        "Minting from template {} (program {}), max quantity {}",
        mint_config.template, mint_config.program_id, mint_config.max_quantity
    );

    let app_state = initialize_app_state(&server_config, mint_config)?;

    info!(
        "Starting server on {}:{}",
        server_config.host, server_config.port
    );
    let server = HttpServer::new(move || {
        App::new()
            .wrap(MetricsMiddleware)
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::DefaultHeaders::new())
            .wrap(Logger::default())
            .app_data(web::ThinData(app_state.clone()))
            .configure(configure_routes)
    })
    .bind((server_config.host.as_str(), server_config.port))?
    .shutdown_timeout(server_config.shutdown_timeout_seconds);

    info!(
        "Server running at http://{}:{}",
        server_config.host, server_config.port
    );

    server.run().await?;
    Ok(())
}
