use std::env;
use std::path::PathBuf;

/// Environment-sourced settings, read once at startup. Credentials are
/// injected into the provider clients from here instead of living in any
/// process-wide state.
pub struct Config {
    pub twitter_api_key: String,
    pub twitter_api_secret: String,
    pub twitter_access_token: String,
    pub twitter_access_secret: String,
    pub openai_api_key: String,
    pub jokes_db_path: PathBuf,
    pub logging_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Ok(Self {
            twitter_api_key: require("TWITTER_API_KEY")?,
            twitter_api_secret: require("TWITTER_API_SECRET")?,
            twitter_access_token: require("TWITTER_ACCESS_TOKEN")?,
            twitter_access_secret: require("TWITTER_ACCESS_SECRET")?,
            openai_api_key: require("OPENAI_API_KEY")?,
            jokes_db_path: env::var("JOKES_DB_PATH")
                .unwrap_or_else(|_| "jokes.db".to_string())
                .into(),
            logging_path: env::var("LOGGING_PATH")
                .unwrap_or_else(|_| "joke_bot.log".to_string())
                .into(),
        })
    }
}

fn require(name: &str) -> Result<String, anyhow::Error> {
    env::var(name).map_err(|_| anyhow::anyhow!("{name} must be set"))
}
