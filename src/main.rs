use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Shared expense pool server. Participants register with a name and a
/// unique email; every registration rebalances the equal percentage shares
/// across the whole roster.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Override the configured bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the configured bind port.
    #[arg(long)]
    port: Option<u16>,
}

/// The main entry point for the splitpool application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from the .env file, if one is present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Settings come from defaults, the optional splitpool.toml, and the
    // SPLITPOOL_* environment; CLI flags win over all of them.
    let mut settings = configuration::load_settings()?;
    if let Some(host) = cli.host {
        settings.server.host = host;
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }

    web_server::run(&settings).await
}
