//! PII replacement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{Client, ClientError};
use crate::model::created_date;
use crate::options::ReplaceMethod;

const PII_PATH: &str = "PII";

impl Client {
    /// Replace detected PII in `prompt` using the given method.
    pub async fn replace_pii(
        &self,
        prompt: &str,
        method: ReplaceMethod,
    ) -> Result<PiiResponse, ClientError> {
        if prompt.is_empty() {
            return Err(ClientError::Validation(
                "PII request requires a prompt".to_string(),
            ));
        }

        let body = PiiWireRequest {
            prompt,
            replace: true,
            replace_method: method.as_str(),
        };
        self.post_json(PII_PATH, &body).await
    }
}

/// A PII replacement response.
#[derive(Debug, Clone, Deserialize)]
pub struct PiiResponse {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    pub created: i64,
    pub checks: Vec<PiiCheck>,
}

impl PiiResponse {
    /// The `created` stamp as a UTC date-time.
    pub fn created_date(&self) -> DateTime<Utc> {
        created_date(self.created)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PiiCheck {
    pub index: u32,
    pub new_prompt: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct PiiWireRequest<'a> {
    prompt: &'a str,
    replace: bool,
    replace_method: &'a str,
}
