mod config;
mod core;
mod providers;
mod store;

use std::path::Path;

use dotenv::dotenv;
use tracing_appender::non_blocking::WorkerGuard;

use crate::config::Config;
use crate::core::agent::OpenAiJokeSource;
use crate::core::generator::JokeGenerator;
use crate::core::runtime::Runtime;
use crate::providers::twitter::Twitter;
use crate::store::JokeStore;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    if let Err(e) = dotenv() {
        eprintln!("Error loading .env file: {}", e);
    }

    let config = Config::from_env()?;
    let _log_guard = init_logging(&config.logging_path)?;

    // A store that cannot be opened is fatal; everything past this point
    // only logs and keeps running.
    let store = JokeStore::open(&config.jokes_db_path)?;
    let generator = JokeGenerator::new(OpenAiJokeSource::new(&config.openai_api_key));
    let poster = Twitter::new(
        &config.twitter_api_key,
        &config.twitter_api_secret,
        &config.twitter_access_token,
        &config.twitter_access_secret,
    );

    let runtime = Runtime::new(generator, poster, store);
    tracing::info!("joke bot starting");
    runtime.run().await
}

fn init_logging(path: &Path) -> Result<WorkerGuard, anyhow::Error> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("LOGGING_PATH has no file name: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    Ok(guard)
}
