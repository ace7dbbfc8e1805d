use std::env;

use dealer_server::ServerBuilder;
use dealer_server::config::loader::{DEFAULT_CONFIG_FILE, load_config};
use dealer_server::observability;

const CONFIG_ENV: &str = "DEALERS_CONFIG";

#[tokio::main]
async fn main() {
    load_dotenv();
    observability::init_tracing();

    let (config_path, source) = config_path();
    let cfg = match load_config(Some(&config_path)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };
    observability::apply_logging_level(&cfg.logging.level);

    tracing::info!(
        path = %config_path,
        source,
        cache.backend = ?cfg.cache.resolved_backend(),
        "configuration loaded"
    );

    let server = match ServerBuilder::new().with_config(cfg).build().await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Server initialization failed: {e}");
            std::process::exit(2);
        }
    };

    if let Err(err) = server.run().await {
        eprintln!("Server error: {err}");
        std::process::exit(1);
    }
}

/// Local runs keep the ERP and KV credentials in `.env`; deployments set them
/// directly, so a missing file is fine.
fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => eprintln!("Warning: ignoring .env: {e}"),
    }
}

/// `--config <path>`, then `$DEALERS_CONFIG`, then `dealers.toml`. The second
/// value names where the path came from, for the startup log.
fn config_path() -> (String, &'static str) {
    let args: Vec<String> = env::args().skip(1).collect();
    if let Some(path) = args
        .windows(2)
        .find(|pair| pair[0] == "--config")
        .map(|pair| pair[1].clone())
    {
        return (path, "--config");
    }

    match env::var(CONFIG_ENV) {
        Ok(path) if !path.is_empty() => (path, CONFIG_ENV),
        _ => (DEFAULT_CONFIG_FILE.to_string(), "default"),
    }
}
