use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use klinik_server::{create_app, KlinikServer};

/// Klinik Engine HTTP Server
#[derive(Parser, Debug)]
#[command(name = "klinik-server")]
#[command(about = "Clinic integration API server (insurance and health-data gateways)")]
struct Args {
    /// Server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(args.verbose);

    info!("starting Klinik Engine HTTP server");
    info!("version: {}", env!("CARGO_PKG_VERSION"));

    // Fails loudly on a missing credential for an enabled integration;
    // disabling one is an explicit *_ENABLED=false decision.
    let server = KlinikServer::new().await?;
    let app = create_app(server);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", args.host, args.port)).await?;
    info!(
        "Klinik Engine server running on http://{}:{}",
        args.host, args.port
    );
    info!(
        "health check available at: http://{}:{}/health",
        args.host, args.port
    );
    info!(
        "API v1 available at: http://{}:{}/api/v1",
        args.host, args.port
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("klinik_server={level},insurance_gateway={level},healthdata_gateway={level},tower_http=info,sqlx=warn,reqwest=info")
            .into()
    });

    let is_development =
        std::env::var("KLINIK_ENV").unwrap_or_else(|_| "development".to_string()) == "development";

    if is_development {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true))
            .init();
    } else {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_ansi(false).json())
            .init();
    }
}
