use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use tokio::signal;

use mercado::config::Config;
use mercado::http::HttpServer;
use mercado::supabase::SupabaseClient;

/// Supabase credentials, PIX key and merchant details come from the
/// environment (or .env), see `Config::from_env`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Host address to bind to, overrides HTTP_HOST
    #[arg(long)]
    host: Option<String>,

    /// HTTP port to listen on, overrides HTTP_PORT
    #[arg(long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .init();

    let config = Config::from_env()?;
    let host = args.host.unwrap_or(config.http_host);
    let port = args.port.unwrap_or(config.http_port);

    let supabase = SupabaseClient::new(
        &config.supabase_url,
        &config.supabase_anon_key,
        &config.supabase_service_role_key,
    );

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| anyhow!("Invalid listen address {}:{}: {}", host, port, e))?;
    let router = HttpServer::new(config.merchant, Arc::new(supabase)).router();

    info!("Starting Mercado server on {}", addr);

    let server = axum::Server::bind(&addr).serve(router.into_make_service());

    // Wait for shutdown signal
    tokio::select! {
        result = server => result?,
        _ = signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
