//! taskrank server - HTTP front for the ranking engine.

use std::net::SocketAddr;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use taskrank_api::{Server, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "taskrank-server")]
#[command(about = "Task ranking HTTP service", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    /// Pin the reference date (YYYY-MM-DD) instead of using today
    #[arg(long)]
    today: Option<NaiveDate>,
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "taskrank_api=info,taskrank_engine=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = ServerConfig {
        bind: cli.bind,
        today: cli.today,
    };

    Server::new(config).run().await
}
