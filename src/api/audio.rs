//! Audio transcription over a multipart upload.

use reqwest::multipart::Form;
use serde::Deserialize;

use crate::client::{Client, ClientError};
use crate::options::SafetyOptions;
use crate::upload::FileUpload;

const TRANSCRIPTION_PATH: &str = "audio/transcriptions";

/// Timestamp resolution for transcription output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampGranularity {
    Word,
    Segment,
}

impl TimestampGranularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampGranularity::Word => "word",
            TimestampGranularity::Segment => "segment",
        }
    }
}

/// An audio transcription request.
///
/// Scalar parameters travel as form fields next to the file part; the
/// safety options travel as request headers (see [`SafetyOptions`]).
#[derive(Debug)]
pub struct TranscriptionRequest {
    pub file: FileUpload,
    pub model: String,
    pub language: Option<String>,
    pub prompt: Option<String>,
    pub temperature: Option<f32>,
    pub timestamp_granularities: Option<Vec<TimestampGranularity>>,
    pub diarization: Option<bool>,
    pub response_format: Option<String>,
    pub safety: SafetyOptions,
}

impl TranscriptionRequest {
    pub fn new(file: FileUpload, model: impl Into<String>) -> Self {
        Self {
            file,
            model: model.into(),
            language: None,
            prompt: None,
            temperature: None,
            timestamp_granularities: None,
            diarization: None,
            response_format: None,
            safety: SafetyOptions::default(),
        }
    }

    /// Set the spoken language hint.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the transcription prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Request word- or segment-level timestamps.
    pub fn with_timestamp_granularities(
        mut self,
        granularities: Vec<TimestampGranularity>,
    ) -> Self {
        self.timestamp_granularities = Some(granularities);
        self
    }

    /// Enable or disable speaker diarization.
    pub fn with_diarization(mut self, diarization: bool) -> Self {
        self.diarization = Some(diarization);
        self
    }

    /// Set the response format.
    pub fn with_response_format(mut self, format: impl Into<String>) -> Self {
        self.response_format = Some(format.into());
        self
    }

    /// Attach safety options (delivered as request headers).
    pub fn with_safety(mut self, safety: SafetyOptions) -> Self {
        self.safety = safety;
        self
    }

    fn validate(&self) -> Result<(), ClientError> {
        if self.model.is_empty() {
            return Err(ClientError::Validation(
                "transcription request requires a model".to_string(),
            ));
        }
        Ok(())
    }

    async fn into_form(self) -> Result<(Form, SafetyOptions), ClientError> {
        let safety = self.safety;
        let mut form = Form::new()
            .part("file", self.file.into_part().await?)
            .text("model", self.model);

        if let Some(language) = self.language {
            form = form.text("language", language);
        }
        if let Some(prompt) = self.prompt {
            form = form.text("prompt", prompt);
        }
        if let Some(temperature) = self.temperature {
            form = form.text("temperature", temperature.to_string());
        }
        if let Some(granularities) = self.timestamp_granularities {
            for granularity in granularities {
                form = form.text("timestamps_granularities[]", granularity.as_str());
            }
        }
        if let Some(diarization) = self.diarization {
            form = form.text("diarization", if diarization { "true" } else { "false" });
        }
        if let Some(format) = self.response_format {
            form = form.text("response_format", format);
        }

        Ok((form, safety))
    }
}

impl Client {
    /// Transcribe an audio file.
    pub async fn transcribe_audio(
        &self,
        request: TranscriptionRequest,
    ) -> Result<TranscriptionResponse, ClientError> {
        request.validate()?;

        let (form, safety) = request.into_form().await?;
        self.post_multipart(TRANSCRIPTION_PATH, form, &safety).await
    }
}

/// A transcription response.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionResponse {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_wire_names() {
        assert_eq!(TimestampGranularity::Word.as_str(), "word");
        assert_eq!(TimestampGranularity::Segment.as_str(), "segment");
    }

    #[test]
    fn test_validation_requires_model() {
        let request = TranscriptionRequest::new(FileUpload::memory("a.wav", vec![0]), "");
        assert!(request.validate().is_err());
    }

    #[tokio::test]
    async fn test_form_includes_scalar_fields() {
        let request = TranscriptionRequest::new(FileUpload::memory("a.wav", vec![0]), "whisper-base")
            .with_language("en")
            .with_diarization(true)
            .with_timestamp_granularities(vec![
                TimestampGranularity::Word,
                TimestampGranularity::Segment,
            ]);

        assert!(request.into_form().await.is_ok());
    }
}
