//! Chat completions: plain, streaming, and vision input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::client::{Client, ClientError};
use crate::model::{created_date, ChatMessage, Role, ToolCall, Usage};
use crate::options::{
    GenerationOptions, InputExtensionWire, OutputExtensionWire, ReasoningEffort, Tool,
};
use crate::stream;

const CHAT_PATH: &str = "chat/completions";

/// The conversation input: a full message array, or the single-string
/// prompt shorthand the service also accepts.
///
/// The two shapes are explicit variants; which one a request uses is
/// decided at construction, not probed structurally later.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ChatPrompt {
    Messages(Vec<ChatMessage>),
    Text(String),
}

impl ChatPrompt {
    /// A full message-array conversation.
    pub fn messages(messages: Vec<ChatMessage>) -> Self {
        ChatPrompt::Messages(messages)
    }

    /// The single-string prompt shorthand.
    pub fn text(prompt: impl Into<String>) -> Self {
        ChatPrompt::Text(prompt.into())
    }

    fn validate(&self) -> Result<(), ClientError> {
        let present = match self {
            ChatPrompt::Messages(messages) => !messages.is_empty(),
            ChatPrompt::Text(text) => !text.is_empty(),
        };

        if present {
            Ok(())
        } else {
            Err(ClientError::Validation(
                "chat request requires messages or a prompt".to_string(),
            ))
        }
    }
}

/// A chat request before wire normalization.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub prompt: ChatPrompt,
    pub options: GenerationOptions,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, prompt: ChatPrompt) -> Self {
        Self {
            model: model.into(),
            prompt,
            options: GenerationOptions::default(),
        }
    }

    /// Attach generation options.
    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    fn validate(&self) -> Result<(), ClientError> {
        if self.model.is_empty() {
            return Err(ClientError::Validation(
                "chat request requires a model".to_string(),
            ));
        }
        self.prompt.validate()
    }
}

impl Client {
    /// Chat completion.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        request.validate()?;
        let body = ChatWireRequest::from(request);
        self.post_json(CHAT_PATH, &body).await
    }

    /// Streaming chat completion.
    ///
    /// Chunks reach `on_event` in wire order, one at a time. After zero or
    /// more `Ok(chunk)` deliveries the callback receives exactly one
    /// terminal `Err`: [`ClientError::Eof`] on clean close, or the
    /// classified failure - including a rejected initial connection -
    /// otherwise. The returned `Result` reports only pre-network
    /// validation problems.
    pub async fn chat_stream<F>(
        &self,
        request: &ChatRequest,
        mut on_event: F,
    ) -> Result<(), ClientError>
    where
        F: FnMut(Result<ChatChunk, ClientError>),
    {
        request.validate()?;

        let mut body = ChatWireRequest::from(request);
        body.stream = Some(true);

        match self.post_stream(CHAT_PATH, &body).await {
            Ok(response) => stream::dispatch(response, on_event).await,
            Err(e) => on_event(Err(e)),
        }

        Ok(())
    }
}

/// A chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    pub usage: Option<Usage>,
}

impl ChatResponse {
    /// The `created` stamp as a UTC date-time.
    pub fn created_date(&self) -> DateTime<Utc> {
        created_date(self.created)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChatResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponseMessage {
    pub role: Role,
    pub content: Option<String>,
    pub tool_calls: Option<Vec<ToolCall>>,
}

/// One streamed chunk of a chat completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChunk {
    pub id: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<ChunkChoice>,
}

impl ChatChunk {
    /// The `created` stamp as a UTC date-time.
    pub fn created_date(&self) -> DateTime<Utc> {
        created_date(self.created)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkChoice {
    pub index: u32,
    pub delta: ChunkDelta,
    pub finish_reason: Option<String>,
}

/// Incremental content carried by one chunk choice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkDelta {
    pub role: Option<Role>,
    pub content: Option<String>,
}

// --- Wire request ---

#[derive(Debug, Clone, Serialize)]
struct ChatWireRequest {
    model: String,
    messages: ChatPrompt,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    logit_bias: Option<HashMap<String, i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<ReasoningEffort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parallel_tool_calls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<InputExtensionWire>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<OutputExtensionWire>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

impl From<&ChatRequest> for ChatWireRequest {
    fn from(request: &ChatRequest) -> Self {
        let options = &request.options;

        ChatWireRequest {
            model: request.model.clone(),
            messages: request.prompt.clone(),
            max_tokens: options.max_tokens,
            max_completion_tokens: options.max_completion_tokens,
            temperature: options.temperature,
            top_p: options.top_p,
            top_k: options.top_k,
            frequency_penalty: options.frequency_penalty,
            presence_penalty: options.presence_penalty,
            logit_bias: options.logit_bias.clone(),
            stop: options.stop.clone(),
            reasoning_effort: options.reasoning_effort,
            tool_choice: options.tool_choice.clone(),
            tools: options.tools.clone(),
            parallel_tool_calls: options.parallel_tool_calls,
            input: options.input.and_then(|group| group.to_wire()),
            output: options.output.and_then(|group| group.to_wire()),
            stream: None,
        }
    }
}
