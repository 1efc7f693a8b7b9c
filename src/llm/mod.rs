use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use crate::config::LlmConfig;
use crate::error::{ServiceError, TradingError};


/// Generative text service seam. Returns the first candidate's text, untrimmed.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, system_prompt: &str, user_input: &str) -> Result<String, TradingError>;
}

#[derive(Clone)]
pub struct LLMClient {
    pub client: Client<OpenAIConfig>,
    pub model: String,
    timeout: Duration,
}

impl LLMClient {
    pub fn new(config: &LlmConfig, timeout_secs: u64) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.clone())
            .with_api_base(config.base_url.trim_end_matches('/'));
        let client = Client::with_config(openai_config);
        Self {
            client,
            model: config.model.clone(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[async_trait]
impl TextGenerator for LLMClient {
    async fn generate(&self, system_prompt: &str, user_input: &str) -> Result<String, TradingError> {
        info!("🤖 Sending request to LLM (Model: {})...", self.model);

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([
                ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessageArgs::default()
                        .content(system_prompt)
                        .build()
                        .map_err(ServiceError::from)?,
                ),
                ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(user_input)
                        .build()
                        .map_err(ServiceError::from)?,
                ),
            ])
            .build()
            .map_err(ServiceError::from)?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| ServiceError::Timeout {
                service: "LLM",
                operation: "Generate",
                secs: self.timeout.as_secs(),
            })?
            .map_err(ServiceError::from)?;

        info!("🤖 LLM Response received.");

        Ok(first_candidate(response)?)
    }
}

/// Text of the first choice. No choices, or a first choice without content,
/// is `NoCandidates`.
pub fn first_candidate(response: CreateChatCompletionResponse) -> Result<String, ServiceError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(ServiceError::NoCandidates)
}
