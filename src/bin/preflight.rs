use rap_interface_editor::{AppConfig, RapClient};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--offline] [--verbose]\n\
         \n\
         Reads env vars (or .env):\n\
           RAP_ENV, RAP_HOSTNAME, RAP_SERVE, RAP_SESSION_KEYS, RAP_SESSION_COOKIE\n\
         --offline   only validate the configuration, do not contact the backend\n"
    );
    std::process::exit(2);
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let offline = args.iter().any(|a| a == "--offline");
    setup_logging(args.iter().any(|a| a == "--verbose"));

    let config = AppConfig::from_env()?;
    info!(serve = %config.serve, "backend");
    info!(
        keys = config.keys.len(),
        cookie = %config.session.key,
        "session"
    );

    if offline {
        info!("preflight OK (offline)");
        return Ok(());
    }

    let client = RapClient::from_config(&config)?;
    let status = client
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("backend {} is not reachable: {}", client.base_url(), e))?;
    if status >= 500 {
        warn!(status, "backend answered with a server error");
    } else {
        info!(status, "backend reachable");
    }

    info!("preflight OK");
    Ok(())
}
