use clap::Parser;
use tracing::error;

use postboard_cli::{logging, run_server, Config};

#[derive(Parser)]
#[command(name = "postboard")]
#[command(about = "Postboard - posts and tags HTTP API")]
#[command(version)]
struct Cli {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// SQLite database URL (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Directory for uploaded images (overrides UPLOAD_DIR)
    #[arg(long)]
    upload_dir: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init_tracing();

    let mut config = Config::from_env().inspect_err(|e| error!("Invalid configuration: {}", e))?;

    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(database_url) = cli.database_url {
        config.database_url = database_url;
    }
    if let Some(upload_dir) = cli.upload_dir {
        config.upload_dir = upload_dir;
    }

    run_server(config).await
}
