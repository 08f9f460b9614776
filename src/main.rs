use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use feedrelay::{
    Config, Database, HttpFeedSource, PostRepository, Relay, Result, TelegramNotifier, WebServer,
};

/// Environment variable overriding the configuration file path.
const CONFIG_PATH_ENV: &str = "FEEDRELAY_CONFIG";

#[tokio::main]
async fn main() {
    let config_path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());

    let config = match Config::load_with_env(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    if let Err(e) = feedrelay::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        feedrelay::logging::init_console_only(&config.logging.level);
    }

    info!("feedrelay {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<()> {
    config.validate()?;

    let db = Database::open(&config.database.path).await?;
    PostRepository::new(db.pool()).ensure_schema().await?;

    if config.web.enabled {
        let server = WebServer::new(&config.web, db.clone())?;
        tokio::spawn(async move {
            if let Err(e) = server.run().await {
                error!("Web server error: {}", e);
            }
        });
    }

    let source = Arc::new(HttpFeedSource::new(&config.feed)?);
    let notifier = Arc::new(TelegramNotifier::new(&config.telegram)?);
    let relay = Relay::new(db, source, notifier, &config.feed.url, &config.relay);

    if config.relay.interval_secs > 0 {
        relay
            .run_forever(Duration::from_secs(config.relay.interval_secs))
            .await;
    } else {
        relay.run_once().await?;
        if config.web.enabled {
            info!("Relay run finished; serving the web API until interrupted");
            tokio::signal::ctrl_c().await?;
        }
    }

    Ok(())
}
