//! Text completions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::client::{Client, ClientError};
use crate::model::created_date;
use crate::options::{
    GenerationOptions, InputExtensionWire, OutputExtensionWire, ReasoningEffort, Tool,
};

const COMPLETION_PATH: &str = "completions";

/// A text completion request before wire normalization. Accepts the same
/// optional generation fields as chat.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub options: GenerationOptions,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
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
                "completion request requires a model".to_string(),
            ));
        }
        if self.prompt.is_empty() {
            return Err(ClientError::Validation(
                "completion request requires a prompt".to_string(),
            ));
        }
        Ok(())
    }
}

impl Client {
    /// Text completion.
    pub async fn completions(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ClientError> {
        request.validate()?;
        let body = CompletionWireRequest::from(request);
        self.post_json(COMPLETION_PATH, &body).await
    }
}

/// A text completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    pub created: i64,
    pub model: String,
    pub choices: Vec<CompletionChoice>,
}

impl CompletionResponse {
    /// The `created` stamp as a UTC date-time.
    pub fn created_date(&self) -> DateTime<Utc> {
        created_date(self.created)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    pub index: u32,
    pub text: String,
    pub finish_reason: Option<String>,
}

// --- Wire request ---

#[derive(Debug, Clone, Serialize)]
struct CompletionWireRequest {
    model: String,
    prompt: String,
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
}

impl From<&CompletionRequest> for CompletionWireRequest {
    fn from(request: &CompletionRequest) -> Self {
        let options = &request.options;

        CompletionWireRequest {
            model: request.model.clone(),
            prompt: request.prompt.clone(),
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
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_body_contains_only_supplied_keys() {
        let request = CompletionRequest::new("neural-chat-7b", "Once upon a time");
        let value = serde_json::to_value(CompletionWireRequest::from(&request)).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 2, "unexpected keys: {object:?}");
        assert_eq!(value["model"], "neural-chat-7b");
        assert_eq!(value["prompt"], "Once upon a time");
    }

    #[test]
    fn test_validation_runs_before_anything_else() {
        assert!(CompletionRequest::new("", "prompt").validate().is_err());
        assert!(CompletionRequest::new("model", "").validate().is_err());
        assert!(CompletionRequest::new("model", "prompt").validate().is_ok());
    }
}
