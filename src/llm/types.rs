use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
    ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
    ImageUrlArgs,
};
use serde::{Deserialize, Serialize};

pub use async_openai::types::FinishReason;

/// One piece of a multimodal message.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text(String),
    /// A remote URL or an inline `data:` URL.
    ImageUrl(String),
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Clone)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Choice {
    pub index: u32,
    pub content: Option<String>,
    pub finish_reason: Option<FinishReason>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl ChatMessage {
    pub fn user(parts: Vec<ContentPart>) -> Self {
        Self {
            role: "user".to_string(),
            parts,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            parts: vec![ContentPart::Text(content.into())],
        }
    }

    pub fn to_openai_message(&self) -> Result<ChatCompletionRequestMessage, crate::Error> {
        match self.role.as_str() {
            "system" => {
                let mut text = String::new();
                for part in &self.parts {
                    match part {
                        ContentPart::Text(t) => text.push_str(t),
                        ContentPart::ImageUrl(_) => {
                            return Err(crate::Error::llm(
                                "System messages cannot carry images",
                            ));
                        }
                    }
                }
                let msg = ChatCompletionRequestSystemMessageArgs::default()
                    .content(ChatCompletionRequestSystemMessageContent::Text(text))
                    .build()
                    .map_err(|e| {
                        crate::Error::llm(format!("Failed to build system message: {}", e))
                    })?;
                Ok(msg.into())
            }
            "user" => {
                let content = match self.parts.as_slice() {
                    [ContentPart::Text(text)] => {
                        ChatCompletionRequestUserMessageContent::Text(text.clone())
                    }
                    parts => ChatCompletionRequestUserMessageContent::Array(
                        parts
                            .iter()
                            .map(to_openai_part)
                            .collect::<Result<Vec<_>, _>>()?,
                    ),
                };
                let msg = ChatCompletionRequestUserMessageArgs::default()
                    .content(content)
                    .build()
                    .map_err(|e| {
                        crate::Error::llm(format!("Failed to build user message: {}", e))
                    })?;
                Ok(msg.into())
            }
            _ => Err(crate::Error::llm(format!(
                "Unknown message role: {}",
                self.role
            ))),
        }
    }
}

fn to_openai_part(
    part: &ContentPart,
) -> Result<ChatCompletionRequestUserMessageContentPart, crate::Error> {
    match part {
        ContentPart::Text(text) => Ok(ChatCompletionRequestMessageContentPartTextArgs::default()
            .text(text.clone())
            .build()
            .map_err(|e| crate::Error::llm(format!("Failed to build text part: {}", e)))?
            .into()),
        ContentPart::ImageUrl(url) => {
            let image_url = ImageUrlArgs::default()
                .url(url.clone())
                .build()
                .map_err(|e| crate::Error::llm(format!("Failed to build image url: {}", e)))?;
            Ok(ChatCompletionRequestMessageContentPartImageArgs::default()
                .image_url(image_url)
                .build()
                .map_err(|e| crate::Error::llm(format!("Failed to build image part: {}", e)))?
                .into())
        }
    }
}
