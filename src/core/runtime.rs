use std::time::Duration;

use chrono::NaiveDate;
use tokio::time::sleep;

use crate::core::agent::JokeSource;
use crate::core::generator::JokeGenerator;
use crate::core::schedule;
use crate::providers::twitter::Publisher;
use crate::store::JokeStore;

const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Wires the generator, the poster and the store together and drives the
/// daily posting loop.
pub struct Runtime<S: JokeSource, P: Publisher> {
    generator: JokeGenerator<S>,
    poster: P,
    store: JokeStore,
}

impl<S: JokeSource, P: Publisher> Runtime<S, P> {
    pub fn new(generator: JokeGenerator<S>, poster: P, store: JokeStore) -> Self {
        Runtime {
            generator,
            poster,
            store,
        }
    }

    /// One generate-and-post cycle. On success the last-posted marker is
    /// advanced to `today` so a restart inside the window cannot trigger a
    /// second post the same day.
    async fn run_cycle(&self, today: NaiveDate) -> Result<(), anyhow::Error> {
        let joke = self.generator.generate(&self.store).await?;
        tracing::info!(joke = %joke, "generated novel joke");
        self.poster.publish(&joke).await?;
        self.store.mark_posted_on(today)?;
        tracing::info!("joke posted successfully");
        Ok(())
    }

    /// Cycle errors are logged and swallowed here; a failed day is simply
    /// skipped and the loop carries on to the next window.
    pub async fn run_guarded_cycle(&self, today: NaiveDate) {
        if let Err(e) = self.run_cycle(today).await {
            tracing::error!(error = %e, "an error occurred while posting joke");
        }
    }

    #[cfg(test)]
    pub(crate) fn poster(&self) -> &P {
        &self.poster
    }

    pub(crate) fn already_posted_on(&self, today: NaiveDate) -> bool {
        match self.store.last_posted_on() {
            Ok(marked) => marked == Some(today),
            Err(e) => {
                tracing::error!(error = %e, "failed to read last-posted marker");
                false
            }
        }
    }

    /// Polling scheduler: wake once a minute, fire one jittered cycle on
    /// entry into the 09:00-09:15 IST window, then park until the next
    /// day's window start.
    pub async fn run(&self) -> Result<(), anyhow::Error> {
        loop {
            let now = schedule::now_ist();
            if schedule::in_posting_window(&now) {
                let today = now.date_naive();
                if self.already_posted_on(today) {
                    tracing::info!(%today, "already posted today, parking until tomorrow");
                } else {
                    let delay = schedule::jitter();
                    tracing::info!(
                        delay_secs = delay.as_secs(),
                        "inside posting window, applying jitter"
                    );
                    sleep(delay).await;
                    self.run_guarded_cycle(today).await;
                }

                let next = schedule::next_window_start(now);
                tracing::info!(next_window = %next, "sleeping until next posting window");
                sleep(schedule::until(schedule::now_ist(), next)).await;
            } else {
                sleep(POLL_INTERVAL).await;
            }
        }
    }
}
