use std::time::Duration;

use tokio::time::sleep;

use crate::core::agent::JokeSource;
use crate::store::{JokeStore, StoreError};

const MAX_ATTEMPTS: u32 = 8;
const BACKOFF_BASE: Duration = Duration::from_secs(1);
const BACKOFF_CAP: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("joke provider request failed: {0}")]
    Provider(#[source] anyhow::Error),
    #[error("no novel joke after {attempts} attempts")]
    NoveltyExhausted { attempts: u32 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Asks the joke source for text until it produces something not already
/// in the store, then records it. Duplicate responses are retried with
/// exponential backoff up to a fixed cap instead of looping forever.
pub struct JokeGenerator<S: JokeSource> {
    source: S,
    max_attempts: u32,
}

impl<S: JokeSource> JokeGenerator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    #[cfg(test)]
    pub fn with_max_attempts(source: S, max_attempts: u32) -> Self {
        Self {
            source,
            max_attempts,
        }
    }

    /// Returns a joke that was not in the store when this call started.
    /// The joke is inserted before it is returned.
    pub async fn generate(&self, store: &JokeStore) -> Result<String, GenerateError> {
        let mut backoff = BACKOFF_BASE;
        for attempt in 1..=self.max_attempts {
            let joke = self
                .source
                .next_joke()
                .await
                .map_err(GenerateError::Provider)?;

            if store.contains(&joke)? {
                tracing::debug!(attempt, "provider repeated an already-posted joke, retrying");
                sleep(backoff).await;
                backoff = (backoff * 2).min(BACKOFF_CAP);
                continue;
            }

            store.insert(&joke)?;
            return Ok(joke);
        }
        Err(GenerateError::NoveltyExhausted {
            attempts: self.max_attempts,
        })
    }
}
