use twitter_v2::authorization::Oauth1aToken;
use twitter_v2::TwitterApi;

/// Outbound posting seam. The runtime publishes through this trait so its
/// error isolation can be tested without hitting the network.
pub trait Publisher {
    async fn publish(&self, text: &str) -> Result<(), anyhow::Error>;
}

pub struct Twitter {
    api: TwitterApi<Oauth1aToken>,
}

impl Twitter {
    pub fn new(
        consumer_key: &str,
        consumer_secret: &str,
        access_token: &str,
        access_token_secret: &str,
    ) -> Self {
        let auth = Oauth1aToken::new(
            consumer_key,
            consumer_secret,
            access_token,
            access_token_secret,
        );
        Twitter {
            api: TwitterApi::new(auth),
        }
    }
}

impl Publisher for Twitter {
    /// One synchronous publish call, no retry. Failures propagate to the
    /// runtime's cycle guard.
    async fn publish(&self, text: &str) -> Result<(), anyhow::Error> {
        let tweet = self
            .api
            .post_tweet()
            .text(text.to_string())
            .send()
            .await?
            .into_data()
            .ok_or_else(|| anyhow::anyhow!("twitter returned no tweet data"))?;
        tracing::info!(tweet_id = %tweet.id, "tweet posted");
        Ok(())
    }
}
