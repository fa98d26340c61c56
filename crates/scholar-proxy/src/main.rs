//! Scholar publications proxy - entry point.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scholar_proxy::{Config, server};

#[derive(Parser, Debug)]
#[command(name = "scholar-proxy")]
#[command(about = "Pagination proxy for Google Scholar publication data via SerpAPI")]
#[command(version)]
struct Cli {
    /// SerpAPI key used when requests carry no serpApiKey parameter
    #[arg(long, env = "SERPAPI_KEY")]
    serpapi_key: Option<String>,

    /// SerpAPI base URL override (useful against a mock server)
    #[arg(long, env = "SERPAPI_BASE_URL")]
    serpapi_base_url: Option<String>,

    /// HTTP server port
    #[arg(long, default_value = "8000", env = "PORT")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cli.port,
        has_server_key = cli.serpapi_key.is_some(),
        "Starting scholar publications proxy"
    );

    let mut config = Config::new(cli.serpapi_key);
    if let Some(base_url) = cli.serpapi_base_url {
        config.serpapi_base_url = base_url;
    }

    server::serve(&config, cli.port).await
}
