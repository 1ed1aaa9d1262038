use super::{image::UploadedImage, prompt::PromptTemplate};
use crate::{
    Error, Result,
    config::Config,
    llm::{ChatCompletionRequest, ChatMessage, ContentPart, FinishReason, LlmClient},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct RecommenderSettings {
    pub template: PromptTemplate,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

impl RecommenderSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            template: PromptTemplate::new(&config.recommendation),
            max_tokens: config.llm.max_tokens,
            temperature: config.llm.temperature,
        }
    }
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Turns one uploaded photo into dish suggestions with a single completion call.
pub struct Recommender {
    llm: Arc<dyn LlmClient>,
    settings: RecommenderSettings,
}

impl Recommender {
    pub fn new(llm: Arc<dyn LlmClient>, settings: RecommenderSettings) -> Self {
        Self { llm, settings }
    }

    pub fn build_request(
        &self,
        image: &UploadedImage,
        requirements: Option<&str>,
    ) -> ChatCompletionRequest {
        let prompt = self.settings.template.build(requirements);

        ChatCompletionRequest {
            messages: vec![ChatMessage::user(vec![
                ContentPart::Text(prompt),
                ContentPart::ImageUrl(image.to_data_url()),
            ])],
            max_tokens: Some(self.settings.max_tokens),
            temperature: self.settings.temperature,
        }
    }

    pub async fn recommend(
        &self,
        image: &UploadedImage,
        requirements: Option<&str>,
    ) -> Result<String> {
        info!(
            "Requesting recommendations for {} byte {} image (requirements: {})",
            image.len(),
            image.mime().as_str(),
            requirements.is_some_and(|r| !r.is_empty())
        );

        let request = self.build_request(image, requirements);
        let response = self.llm.create_chat_completion(request).await?;

        if let Some(usage) = &response.usage {
            debug!(
                "Completion {} used {} prompt + {} completion tokens",
                response.id, usage.prompt_tokens, usage.completion_tokens
            );
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::llm("Response contained no choices"))?;

        if matches!(choice.finish_reason, Some(FinishReason::Length)) {
            warn!(
                "Recommendation was cut off at {} tokens",
                self.settings.max_tokens
            );
        }

        choice
            .content
            .ok_or_else(|| Error::llm("Response contained no text"))
    }
}
