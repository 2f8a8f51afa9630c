//! Machine translation across the service's engine pool.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{Client, ClientError};
use crate::model::created_date;

const TRANSLATE_PATH: &str = "translate";

/// A translation request. Language codes are passed through as the
/// service expects them (e.g. `eng`, `spa`).
#[derive(Debug, Clone)]
pub struct TranslateRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
    /// Allow the service to consult third-party engines.
    pub use_third_party_engine: bool,
}

impl TranslateRequest {
    pub fn new(
        text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            use_third_party_engine: false,
        }
    }

    /// Allow or forbid third-party engines.
    pub fn with_third_party_engine(mut self, allow: bool) -> Self {
        self.use_third_party_engine = allow;
        self
    }

    fn validate(&self) -> Result<(), ClientError> {
        if self.text.is_empty() {
            return Err(ClientError::Validation(
                "translate request requires text".to_string(),
            ));
        }
        if self.source_lang.is_empty() || self.target_lang.is_empty() {
            return Err(ClientError::Validation(
                "translate request requires source and target languages".to_string(),
            ));
        }
        Ok(())
    }
}

impl Client {
    /// Translate text, returning every engine's candidate plus the best
    /// pick. A failed engine shows up as a per-entry error status, not as
    /// a failed call.
    pub async fn translate(
        &self,
        request: &TranslateRequest,
    ) -> Result<TranslateResponse, ClientError> {
        request.validate()?;

        let body = TranslateWireRequest {
            text: &request.text,
            source_lang: &request.source_lang,
            target_lang: &request.target_lang,
            use_third_party_engine: request.use_third_party_engine,
        };
        self.post_json(TRANSLATE_PATH, &body).await
    }
}

/// A translation response.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateResponse {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    pub created: i64,
    pub best_translation: String,
    pub best_score: f64,
    pub best_translation_model: String,
    /// Every engine's candidate, scores and statuses preserved exactly as
    /// served.
    pub translations: Vec<Translation>,
}

impl TranslateResponse {
    /// The `created` stamp as a UTC date-time.
    pub fn created_date(&self) -> DateTime<Utc> {
        created_date(self.created)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Translation {
    pub score: f64,
    pub translation: String,
    pub model: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
struct TranslateWireRequest<'a> {
    text: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
    use_third_party_engine: bool,
}
