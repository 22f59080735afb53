use rig::agent::Agent as RigAgent;
use rig::completion::Prompt;
use rig::providers::openai::{self, CompletionModel};

const JOKE_PROMPT: &str = "Generate a funny joke:";
const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u64 = 50;

/// Something that can produce a fresh joke on demand. The generator only
/// depends on this seam, which keeps the novelty loop testable with a
/// scripted source.
pub trait JokeSource {
    async fn next_joke(&self) -> Result<String, anyhow::Error>;
}

/// OpenAI-backed joke source: a rig agent with a fixed prompt and fixed
/// sampling configuration.
pub struct OpenAiJokeSource {
    agent: RigAgent<CompletionModel>,
}

impl OpenAiJokeSource {
    pub fn new(api_key: &str) -> Self {
        let client = openai::Client::new(api_key);
        let agent = client
            .agent(openai::GPT_4O)
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS)
            .build();
        OpenAiJokeSource { agent }
    }
}

impl JokeSource for OpenAiJokeSource {
    async fn next_joke(&self) -> Result<String, anyhow::Error> {
        let response = self.agent.prompt(JOKE_PROMPT).await?;
        Ok(response.trim().to_string())
    }
}
