//! Toxicity scoring.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{Client, ClientError};
use crate::model::created_date;

const TOXICITY_PATH: &str = "toxicity";

impl Client {
    /// Score the toxicity of `text`.
    pub async fn toxicity(&self, text: &str) -> Result<ToxicityResponse, ClientError> {
        if text.is_empty() {
            return Err(ClientError::Validation(
                "toxicity request requires text".to_string(),
            ));
        }

        let body = ToxicityWireRequest { text };
        self.post_json(TOXICITY_PATH, &body).await
    }
}

/// A toxicity response.
#[derive(Debug, Clone, Deserialize)]
pub struct ToxicityResponse {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    pub created: i64,
    pub checks: Vec<ToxicityCheck>,
}

impl ToxicityResponse {
    /// The `created` stamp as a UTC date-time.
    pub fn created_date(&self) -> DateTime<Utc> {
        created_date(self.created)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToxicityCheck {
    pub index: u32,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
struct ToxicityWireRequest<'a> {
    text: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_request_shape() {
        let value = serde_json::to_value(ToxicityWireRequest { text: "hello" }).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 1);
        assert_eq!(value["text"], "hello");
    }
}
