use anyhow::Result;
use axum::Router;
use clap::Parser;
use resumerag_server::build_app;
use resumerag_server::config::Config;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Data directory for the sled store
    #[arg(long, default_value = "./data")]
    data: PathBuf,
    /// Keep documents and jobs in memory only
    #[arg(long, default_value_t = false)]
    memory: bool,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 4000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let config = Config::from_env((!args.memory).then_some(args.data));
    let app: Router = build_app(&config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, privileged_role = %config.privileged_role, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
