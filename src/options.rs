//! Sparse request options and their wire normalization.
//!
//! Every field here is optional; a field reaches the wire body only when
//! the caller supplied it. The input/output extension groups are the one
//! exception to field-by-field forwarding: a group is included when any of
//! its members was supplied, and an included group is completed with fixed
//! defaults for the members the caller left out.

use std::collections::HashMap;

use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generation parameters shared by the chat and completion endpoints.
///
/// # Example
/// ```rust
/// use guardrail::options::GenerationOptions;
///
/// let options = GenerationOptions::default()
///     .with_temperature(0.7)
///     .with_max_tokens(100)
///     .with_stop(vec!["\n\n".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,

    /// Maximum completion tokens (newer-style cap; some models accept
    /// this instead of `max_tokens`).
    pub max_completion_tokens: Option<u32>,

    /// Temperature for sampling.
    pub temperature: Option<f32>,

    /// Top-p (nucleus) sampling parameter.
    pub top_p: Option<f32>,

    /// Top-k sampling parameter.
    pub top_k: Option<u32>,

    /// Frequency penalty.
    pub frequency_penalty: Option<f32>,

    /// Presence penalty.
    pub presence_penalty: Option<f32>,

    /// Per-token logit biases, keyed by token id.
    pub logit_bias: Option<HashMap<String, i32>>,

    /// Stop sequences.
    pub stop: Option<Vec<String>>,

    /// Reasoning effort for models that expose it.
    pub reasoning_effort: Option<ReasoningEffort>,

    /// Tool selection: the string `"auto"`/`"none"` or a named-tool
    /// object, passed through as given.
    pub tool_choice: Option<Value>,

    /// Tool definitions offered to the model.
    pub tools: Option<Vec<Tool>>,

    /// Whether the model may call several tools in one turn.
    pub parallel_tool_calls: Option<bool>,

    /// Pre-processing safety group (injection blocking, PII handling).
    pub input: Option<InputExtension>,

    /// Post-processing safety group (factuality, toxicity checks).
    pub output: Option<OutputExtension>,
}

impl GenerationOptions {
    /// Set the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the maximum completion tokens.
    pub fn with_max_completion_tokens(mut self, max_completion_tokens: u32) -> Self {
        self.max_completion_tokens = Some(max_completion_tokens);
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the top-p sampling parameter.
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set the top-k sampling parameter.
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Set the frequency penalty.
    pub fn with_frequency_penalty(mut self, penalty: f32) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    /// Set the presence penalty.
    pub fn with_presence_penalty(mut self, penalty: f32) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    /// Set per-token logit biases.
    pub fn with_logit_bias(mut self, logit_bias: HashMap<String, i32>) -> Self {
        self.logit_bias = Some(logit_bias);
        self
    }

    /// Set the stop sequences.
    pub fn with_stop(mut self, stop: Vec<String>) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Set the reasoning effort.
    pub fn with_reasoning_effort(mut self, effort: ReasoningEffort) -> Self {
        self.reasoning_effort = Some(effort);
        self
    }

    /// Set the tool choice.
    pub fn with_tool_choice(mut self, tool_choice: Value) -> Self {
        self.tool_choice = Some(tool_choice);
        self
    }

    /// Set the tool definitions.
    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Allow or forbid parallel tool calls.
    pub fn with_parallel_tool_calls(mut self, parallel: bool) -> Self {
        self.parallel_tool_calls = Some(parallel);
        self
    }

    /// Set the input (pre-processing) extension group.
    pub fn with_input(mut self, input: InputExtension) -> Self {
        self.input = Some(input);
        self
    }

    /// Set the output (post-processing) extension group.
    pub fn with_output(mut self, output: OutputExtension) -> Self {
        self.output = Some(output);
        self
    }
}

/// Reasoning effort levels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Low,
    Medium,
    High,
}

/// A tool definition offered to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub tool_type: String,

    pub function: ToolFunction,
}

impl Tool {
    /// A function tool with a JSON-schema parameter description.
    pub fn function(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: ToolFunction {
                name: name.into(),
                description: Some(description.into()),
                parameters: Some(parameters),
            },
        }
    }
}

/// The function half of a [`Tool`] definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolFunction {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

/// How detected PII is handled before the prompt reaches the model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PiiMode {
    /// Reject the request outright when PII is present.
    Block,
    /// Substitute detected PII and continue.
    Replace,
}

impl PiiMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PiiMode::Block => "block",
            PiiMode::Replace => "replace",
        }
    }
}

/// Substitution strategy when [`PiiMode::Replace`] is in effect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReplaceMethod {
    Random,
    Fake,
    Category,
    Mask,
}

impl ReplaceMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplaceMethod::Random => "random",
            ReplaceMethod::Fake => "fake",
            ReplaceMethod::Category => "category",
            ReplaceMethod::Mask => "mask",
        }
    }
}

/// Pre-processing safety group. Sparse on the client side; see
/// [`InputExtension::to_wire`] for how it reaches the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputExtension {
    pub block_prompt_injection: Option<bool>,
    pub pii: Option<PiiMode>,
    pub pii_replace_method: Option<ReplaceMethod>,
}

impl InputExtension {
    /// Enable or disable prompt-injection blocking.
    pub fn with_block_prompt_injection(mut self, block: bool) -> Self {
        self.block_prompt_injection = Some(block);
        self
    }

    /// Set the PII handling mode.
    pub fn with_pii(mut self, mode: PiiMode) -> Self {
        self.pii = Some(mode);
        self
    }

    /// Set the PII replacement method.
    pub fn with_pii_replace_method(mut self, method: ReplaceMethod) -> Self {
        self.pii_replace_method = Some(method);
        self
    }

    /// Wire form of the group: `None` when no member was supplied;
    /// otherwise every member is present, completed with `false` / empty
    /// string where the caller left one out.
    pub(crate) fn to_wire(&self) -> Option<InputExtensionWire> {
        if self.block_prompt_injection.is_none()
            && self.pii.is_none()
            && self.pii_replace_method.is_none()
        {
            return None;
        }

        Some(InputExtensionWire {
            block_prompt_injection: self.block_prompt_injection.unwrap_or(false),
            pii: self.pii.map(|m| m.as_str().to_string()).unwrap_or_default(),
            pii_replace_method: self
                .pii_replace_method
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct InputExtensionWire {
    pub(crate) block_prompt_injection: bool,
    pub(crate) pii: String,
    pub(crate) pii_replace_method: String,
}

/// Post-processing safety group, sparse like [`InputExtension`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputExtension {
    pub factuality: Option<bool>,
    pub toxicity: Option<bool>,
}

impl OutputExtension {
    /// Enable or disable the factuality post-check.
    pub fn with_factuality(mut self, factuality: bool) -> Self {
        self.factuality = Some(factuality);
        self
    }

    /// Enable or disable the toxicity post-check.
    pub fn with_toxicity(mut self, toxicity: bool) -> Self {
        self.toxicity = Some(toxicity);
        self
    }

    /// Wire form of the group, completed with `false` defaults. `None`
    /// when no member was supplied.
    pub(crate) fn to_wire(&self) -> Option<OutputExtensionWire> {
        if self.factuality.is_none() && self.toxicity.is_none() {
            return None;
        }

        Some(OutputExtensionWire {
            factuality: self.factuality.unwrap_or(false),
            toxicity: self.toxicity.unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct OutputExtensionWire {
    pub(crate) factuality: bool,
    pub(crate) toxicity: bool,
}

/// Safety options for the multipart endpoints.
///
/// These travel as request headers, not form fields; the header/form split
/// is a fixed wire contract with the service.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafetyOptions {
    pub toxicity: Option<bool>,
    pub pii: Option<PiiMode>,
    pub pii_replace_method: Option<ReplaceMethod>,
    pub block_prompt_injection: Option<bool>,
}

impl SafetyOptions {
    /// Enable or disable the toxicity check.
    pub fn with_toxicity(mut self, toxicity: bool) -> Self {
        self.toxicity = Some(toxicity);
        self
    }

    /// Set the PII handling mode.
    pub fn with_pii(mut self, mode: PiiMode) -> Self {
        self.pii = Some(mode);
        self
    }

    /// Set the PII replacement method.
    pub fn with_pii_replace_method(mut self, method: ReplaceMethod) -> Self {
        self.pii_replace_method = Some(method);
        self
    }

    /// Enable or disable prompt-injection blocking.
    pub fn with_block_prompt_injection(mut self, block: bool) -> Self {
        self.block_prompt_injection = Some(block);
        self
    }

    /// Attach the supplied options as `Toxicity`, `Pii`, `Replace-Method`,
    /// and `Injection` request headers. Unsupplied options add no header.
    pub(crate) fn apply_headers(&self, mut req: RequestBuilder) -> RequestBuilder {
        if let Some(toxicity) = self.toxicity {
            req = req.header("Toxicity", bool_str(toxicity));
        }
        if let Some(pii) = self.pii {
            req = req.header("Pii", pii.as_str());
        }
        if let Some(method) = self.pii_replace_method {
            req = req.header("Replace-Method", method.as_str());
        }
        if let Some(injection) = self.block_prompt_injection {
            req = req.header("Injection", bool_str(injection));
        }
        req
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
