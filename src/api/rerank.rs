//! Document reranking against a query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{Client, ClientError};
use crate::model::created_date;

const RERANK_PATH: &str = "rerank";

/// A rerank request.
#[derive(Debug, Clone)]
pub struct RerankRequest {
    pub model: String,
    pub query: String,
    pub documents: Vec<String>,
    /// Whether the response should echo the document texts back.
    pub return_documents: bool,
}

impl RerankRequest {
    pub fn new(model: impl Into<String>, query: impl Into<String>, documents: Vec<String>) -> Self {
        Self {
            model: model.into(),
            query: query.into(),
            documents,
            return_documents: false,
        }
    }

    /// Ask the service to echo document texts in the results.
    pub fn with_return_documents(mut self, return_documents: bool) -> Self {
        self.return_documents = return_documents;
        self
    }

    fn validate(&self) -> Result<(), ClientError> {
        if self.model.is_empty() {
            return Err(ClientError::Validation(
                "rerank request requires a model".to_string(),
            ));
        }
        if self.query.is_empty() {
            return Err(ClientError::Validation(
                "rerank request requires a query".to_string(),
            ));
        }
        if self.documents.is_empty() {
            return Err(ClientError::Validation(
                "rerank request requires documents".to_string(),
            ));
        }
        Ok(())
    }
}

impl Client {
    /// Order `documents` by relevance to the query.
    pub async fn rerank(&self, request: &RerankRequest) -> Result<RerankResponse, ClientError> {
        request.validate()?;

        let body = RerankWireRequest {
            model: &request.model,
            query: &request.query,
            documents: &request.documents,
            return_documents: request.return_documents,
        };
        self.post_json(RERANK_PATH, &body).await
    }
}

/// A rerank response; results are ordered most-relevant first.
#[derive(Debug, Clone, Deserialize)]
pub struct RerankResponse {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    pub created: i64,
    pub model: String,
    pub results: Vec<RerankResult>,
}

impl RerankResponse {
    /// The `created` stamp as a UTC date-time.
    pub fn created_date(&self) -> DateTime<Utc> {
        created_date(self.created)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RerankResult {
    /// Position of the document in the request's `documents` list.
    pub index: u32,
    pub relevance_score: f64,
    /// Echoed document text when `return_documents` was set.
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct RerankWireRequest<'a> {
    model: &'a str,
    query: &'a str,
    documents: &'a [String],
    return_documents: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_requires_documents() {
        let request = RerankRequest::new("rerank-lite", "query", vec![]);
        assert!(request.validate().is_err());

        let request = RerankRequest::new("rerank-lite", "query", vec!["doc".to_string()]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_wire_request_always_carries_return_documents() {
        let request = RerankRequest::new("rerank-lite", "q", vec!["d".to_string()]);
        let body = RerankWireRequest {
            model: &request.model,
            query: &request.query,
            documents: &request.documents,
            return_documents: request.return_documents,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["return_documents"], false);
    }
}
