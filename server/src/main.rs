use anyhow::Result;
use axum::Router;
use clap::Parser;
use search_core::IndexEngine;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use server::{build_app, AppState};
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Directory of .txt files to index at startup
    #[arg(long)]
    corpus: Option<PathBuf>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let mut engine = IndexEngine::new();
    if let Some(corpus) = &args.corpus {
        indexer::ingest_dir(&mut engine, corpus)?;
    }
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let app: Router = build_app(AppState::new(engine, admin_token));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
