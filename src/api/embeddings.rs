//! Embeddings over text, images, or both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{Client, ClientError};
use crate::image::ImageSource;
use crate::model::created_date;

const EMBEDDINGS_PATH: &str = "embeddings";

/// One embeddings input item: text, an image, or a text+image pair.
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Base64-encoded image payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl EmbeddingInput {
    /// A text-only input.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            image: None,
        }
    }

    /// An image-only input, encoded from any [`ImageSource`].
    pub async fn image(source: &dyn ImageSource) -> Result<Self, ClientError> {
        Ok(Self {
            text: None,
            image: Some(source.encode_base64().await?),
        })
    }

    /// A paired text and image input.
    pub async fn multimodal(
        text: impl Into<String>,
        source: &dyn ImageSource,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            text: Some(text.into()),
            image: Some(source.encode_base64().await?),
        })
    }
}

impl Client {
    /// Compute embeddings for the given inputs.
    pub async fn embeddings(
        &self,
        model: &str,
        input: &[EmbeddingInput],
    ) -> Result<EmbeddingsResponse, ClientError> {
        if model.is_empty() {
            return Err(ClientError::Validation(
                "embeddings request requires a model".to_string(),
            ));
        }
        if input.is_empty() {
            return Err(ClientError::Validation(
                "embeddings request requires input".to_string(),
            ));
        }

        let body = EmbeddingsWireRequest { model, input };
        self.post_json(EMBEDDINGS_PATH, &body).await
    }
}

/// An embeddings response.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsResponse {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    pub created: i64,
    pub model: String,
    pub data: Vec<Embedding>,
}

impl EmbeddingsResponse {
    /// The `created` stamp as a UTC date-time.
    pub fn created_date(&self) -> DateTime<Utc> {
        created_date(self.created)
    }
}

/// One embedding vector, in input order.
#[derive(Debug, Clone, Deserialize)]
pub struct Embedding {
    pub index: u32,
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub object: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct EmbeddingsWireRequest<'a> {
    model: &'a str,
    input: &'a [EmbeddingInput],
}
