//! # guardrail - Guarded Inference API Client
//!
//! A small, pragmatic Rust client for a guarded-inference platform:
//! chat, completion, and embedding calls plus the safety surface
//! (factuality, toxicity, prompt-injection, PII) and the file-based
//! capabilities (audio transcription, document extraction).
//!
//! ## Features
//! - Async-first, tokio compatible
//! - One error type whose messages are the whole error contract
//! - Streaming chat over Server-Sent Events with ordered callback delivery
//! - Sparse request options: only fields you set reach the wire
//! - Vision and multimodal-embedding input from URL- or file-backed images
//!
//! ## Architecture
//!
//! Every endpoint funnels through one transport core with three request
//! shapes: plain GET, JSON POST, and multipart POST. The transport
//! classifies HTTP statuses into fixed error messages and
//! content-negotiates response bodies; the per-capability modules under
//! [`api`] stay thin.
//!
//! Streaming calls deliver chunks through a caller-supplied callback and
//! terminate with a distinguished `EOF` error value - check
//! [`ClientError::is_eof`] before treating a stream error as a failure.
//!
//! ## Example
//! ```no_run
//! use guardrail::{ChatMessage, ChatPrompt, ChatRequest, Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("your-api-key");
//!
//!     let request = ChatRequest::new(
//!         "neural-chat-7b",
//!         ChatPrompt::messages(vec![ChatMessage::user("Hello!")]),
//!     );
//!
//!     let response = client.chat(&request).await?;
//!     println!("{:?}", response.choices[0].message.content);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
mod http;
pub mod image;
pub mod model;
pub mod options;
pub mod sse;
mod stream;
pub mod upload;

// Re-exports for convenience
pub use api::audio::{TimestampGranularity, TranscriptionRequest, TranscriptionResponse};
pub use api::chat::{ChatChunk, ChatPrompt, ChatRequest, ChatResponse};
pub use api::completion::{CompletionRequest, CompletionResponse};
pub use api::documents::{DocumentExtractRequest, DocumentExtractResponse};
pub use api::embeddings::{EmbeddingInput, EmbeddingsResponse};
pub use api::rerank::{RerankRequest, RerankResponse};
pub use api::translate::{TranslateRequest, TranslateResponse};
pub use client::{Client, ClientConfig, ClientError, SecretString};
pub use image::{FileImage, ImageSource, NetworkImage};
pub use model::{ChatMessage, Content, ContentPart, Role};
pub use options::{
    GenerationOptions, InputExtension, OutputExtension, PiiMode, ReplaceMethod, SafetyOptions,
};
pub use upload::FileUpload;
