//! Document content extraction over a multipart upload.

use reqwest::multipart::Form;
use serde::Deserialize;

use crate::client::{Client, ClientError};
use crate::options::SafetyOptions;
use crate::upload::FileUpload;

const EXTRACT_PATH: &str = "documents/extract";

/// A document extraction request.
///
/// Form field names are camelCase on this endpoint; safety options travel
/// as request headers like the other multipart call.
#[derive(Debug)]
pub struct DocumentExtractRequest {
    pub file: FileUpload,
    pub embed_images: Option<bool>,
    pub output_format: Option<String>,
    pub chunk_document: Option<bool>,
    pub chunk_size: Option<u32>,
    pub enable_ocr: Option<bool>,
    pub safety: SafetyOptions,
}

impl DocumentExtractRequest {
    pub fn new(file: FileUpload) -> Self {
        Self {
            file,
            embed_images: None,
            output_format: None,
            chunk_document: None,
            chunk_size: None,
            enable_ocr: None,
            safety: SafetyOptions::default(),
        }
    }

    /// Embed images from the document into the extracted output.
    pub fn with_embed_images(mut self, embed: bool) -> Self {
        self.embed_images = Some(embed);
        self
    }

    /// Set the output format (e.g. `markdown`).
    pub fn with_output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = Some(format.into());
        self
    }

    /// Split the extracted content into chunks.
    pub fn with_chunk_document(mut self, chunk: bool) -> Self {
        self.chunk_document = Some(chunk);
        self
    }

    /// Set the chunk size.
    pub fn with_chunk_size(mut self, size: u32) -> Self {
        self.chunk_size = Some(size);
        self
    }

    /// Run OCR over image-only pages.
    pub fn with_enable_ocr(mut self, enable: bool) -> Self {
        self.enable_ocr = Some(enable);
        self
    }

    /// Attach safety options (delivered as request headers).
    pub fn with_safety(mut self, safety: SafetyOptions) -> Self {
        self.safety = safety;
        self
    }

    async fn into_form(self) -> Result<(Form, SafetyOptions), ClientError> {
        let safety = self.safety;
        let mut form = Form::new().part("file", self.file.into_part().await?);

        if let Some(embed) = self.embed_images {
            form = form.text("embedImages", if embed { "true" } else { "false" });
        }
        if let Some(format) = self.output_format {
            form = form.text("outputFormat", format);
        }
        if let Some(chunk) = self.chunk_document {
            form = form.text("chunkDocument", if chunk { "true" } else { "false" });
        }
        if let Some(size) = self.chunk_size {
            form = form.text("chunkSize", size.to_string());
        }
        if let Some(ocr) = self.enable_ocr {
            form = form.text("enableOCR", if ocr { "true" } else { "false" });
        }

        Ok((form, safety))
    }
}

impl Client {
    /// Extract the text content of a document.
    pub async fn extract_document(
        &self,
        request: DocumentExtractRequest,
    ) -> Result<DocumentExtractResponse, ClientError> {
        let (form, safety) = request.into_form().await?;
        self.post_multipart(EXTRACT_PATH, form, &safety).await
    }
}

/// A document extraction response.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentExtractResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub object: Option<String>,
    pub contents: String,
}
