use async_trait::async_trait;
use dish_advisor::{
    Error, Result,
    llm::{
        ChatCompletionRequest, ChatCompletionResponse, Choice, ContentPart, FinishReason,
        LlmClient, Usage,
    },
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock LLM client that replays queued outcomes and records every request.
#[derive(Debug, Default)]
pub struct MockLlmClient {
    outcomes: Mutex<VecDeque<std::result::Result<ChatCompletionResponse, String>>>,
    requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, text: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Ok(text_response(text)));
        self
    }

    pub fn with_error(self, error: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(error.to_string()));
        self
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Text of the prompt part of the first message of request `index`.
    pub fn prompt_of(&self, index: usize) -> String {
        let requests = self.requests.lock().unwrap();
        requests[index].messages[0]
            .parts
            .iter()
            .find_map(|part| match part {
                ContentPart::Text(text) => Some(text.clone()),
                ContentPart::ImageUrl(_) => None,
            })
            .expect("request has no text part")
    }

    /// URL of the image part of the first message of request `index`.
    pub fn image_url_of(&self, index: usize) -> String {
        let requests = self.requests.lock().unwrap();
        requests[index].messages[0]
            .parts
            .iter()
            .find_map(|part| match part {
                ContentPart::ImageUrl(url) => Some(url.clone()),
                ContentPart::Text(_) => None,
            })
            .expect("request has no image part")
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.requests.lock().unwrap().push(request);

        match self.outcomes.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(error)) => Err(Error::llm(error)),
            None => Err(Error::llm("No more mock responses available")),
        }
    }
}

pub fn text_response(text: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: "chatcmpl-mock".to_string(),
        model: "gpt-4o-mini".to_string(),
        choices: vec![Choice {
            index: 0,
            content: Some(text.to_string()),
            finish_reason: Some(FinishReason::Stop),
        }],
        usage: Some(Usage {
            prompt_tokens: 850,
            completion_tokens: 300,
            total_tokens: 1150,
        }),
    }
}
