// Main entry point - Command dispatch and dependency wiring
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::application::generator_service::GeneratorService;
use crate::application::shared::SharedDefinitions;
use crate::infrastructure::config::{load_generator_config, render_config};
use crate::infrastructure::dashboard_writer::write_dashboards;
use crate::presentation::app_state::AppState;
use crate::presentation::cli::{Cli, Commands};
use crate::presentation::handlers::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Load configuration
    let config = load_generator_config(cli.config.as_deref())?;
    let service = GeneratorService::new(SharedDefinitions::from_config(&config));

    match cli.command {
        Commands::Generate { out } => {
            let directory = out.unwrap_or_else(|| config.output.directory.clone());
            let rendered = service.render_all()?;
            let written = write_dashboards(&directory, &rendered)?;
            info!("Generated {} dashboards in {}", written.len(), directory.display());
        }
        Commands::Check => {
            let dashboards = service.dashboards()?;
            println!("{} dashboards OK", dashboards.len());
        }
        Commands::List => {
            for dashboard in service.dashboards()? {
                println!("{}\t{}", dashboard.uid, dashboard.title);
            }
        }
        Commands::Render { uid } => {
            println!("{}", service.render_one(&uid)?.json);
        }
        Commands::Config => {
            print!("{}", render_config(&config)?);
        }
        Commands::Serve { addr } => {
            let addr: SocketAddr = addr
                .unwrap_or_else(|| config.server.address.clone())
                .parse()
                .context("Invalid listen address")?;
            let state = Arc::new(AppState {
                dashboards: service.render_all()?,
            });

            info!("Serving {} dashboards on {}", state.dashboards.len(), addr);
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, router(state)).await?;
        }
    }

    Ok(())
}
