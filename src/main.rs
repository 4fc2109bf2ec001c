use clap::Parser;
use mindshield_lib::{config, init_tracing, run, Cli};

#[tokio::main]
async fn main() {
    init_tracing();
    tracing::debug!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
