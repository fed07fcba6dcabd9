use reqwest::Client;
use std::time::Duration;

use crate::composer::compose;
use crate::config::Config;
use crate::error::ConfigError;
use crate::generation::GenerationClient;
use crate::scrapper::Scrapper;
use crate::trigger::should_search;

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
/// Generation can take a while on local hardware.
pub const READ_TIMEOUT: Duration = Duration::from_secs(60);

const PROMPT_PREVIEW_CHARS: usize = 150;

/// The one outbound client for the process. Cheap to clone, safe to share
/// between concurrent requests.
pub fn http_client() -> Result<Client, ConfigError> {
    let client = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .read_timeout(READ_TIMEOUT)
        .build()?;
    Ok(client)
}

/// trigger → (scrape → compose) → generate, for one message at a time.
///
/// Holds no per-request state; a single instance serves every request.
#[derive(Debug, Clone)]
pub struct ChatPipeline {
    config: Config,
    scrapper: Scrapper,
    generation: GenerationClient,
}

impl ChatPipeline {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = http_client()?;
        let scrapper = Scrapper::new(client.clone(), &config.search_url)?;
        let generation = GenerationClient::new(
            client,
            config.ollama_api_url.clone(),
            config.ollama_model_name.clone(),
        );
        log::info!(
            "chat pipeline ready. model: {}, generation url: {}, search url: {}",
            config.ollama_model_name,
            config.ollama_api_url,
            config.search_url
        );
        Ok(ChatPipeline {
            config,
            scrapper,
            generation,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Answers a non-blank message. Never fails: degraded paths come back
    /// as the un-augmented answer or as an error sentence.
    pub async fn answer(&self, message: &str) -> String {
        log::info!("received user message: {message}");
        let prompt = self.build_prompt(message).await;
        self.generation.generate(&prompt).await
    }

    /// Runs the trigger, scrape and compose stages only.
    pub async fn build_prompt(&self, message: &str) -> String {
        if !should_search(message) {
            log::info!("heuristic not triggered, sending original message to llm");
            return message.to_string();
        }

        log::info!("heuristic triggered: searching web for query '{message}'");
        let snippets = self.scrapper.search(message).await;
        if snippets.is_empty() {
            log::warn!("web scraping failed or returned no snippets for query: {message}");
        } else {
            log::info!("generated prompt with {} scraped web results", snippets.len());
        }

        let prompt = compose(message, &snippets);
        log::debug!(
            "prompt snippet: {}...",
            prompt.chars().take(PROMPT_PREVIEW_CHARS).collect::<String>()
        );
        prompt
    }
}
