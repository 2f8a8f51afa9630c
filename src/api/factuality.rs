//! Factuality check of a claim against a reference text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{Client, ClientError};
use crate::model::created_date;

const FACTUALITY_PATH: &str = "factuality";

impl Client {
    /// Score how well `text` is supported by `reference`.
    pub async fn factuality(
        &self,
        reference: &str,
        text: &str,
    ) -> Result<FactualityResponse, ClientError> {
        if reference.is_empty() {
            return Err(ClientError::Validation(
                "factuality request requires a reference".to_string(),
            ));
        }
        if text.is_empty() {
            return Err(ClientError::Validation(
                "factuality request requires text".to_string(),
            ));
        }

        let body = FactualityWireRequest { reference, text };
        self.post_json(FACTUALITY_PATH, &body).await
    }
}

/// A factuality response.
#[derive(Debug, Clone, Deserialize)]
pub struct FactualityResponse {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    pub created: i64,
    pub checks: Vec<FactualityCheck>,
}

impl FactualityResponse {
    /// The `created` stamp as a UTC date-time.
    pub fn created_date(&self) -> DateTime<Utc> {
        created_date(self.created)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FactualityCheck {
    pub index: u32,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
struct FactualityWireRequest<'a> {
    reference: &'a str,
    text: &'a str,
}
