//! Image sources, vision input, and the multipart endpoints.

use base64::prelude::*;
use httpmock::prelude::*;
use serde_json::json;

use guardrail::{
    ChatMessage, ChatPrompt, ChatRequest, Client, ClientConfig, DocumentExtractRequest,
    EmbeddingInput, FileImage, FileUpload, ImageSource, NetworkImage, PiiMode, ReplaceMethod,
    SafetyOptions, TranscriptionRequest,
};

fn test_client(server: &MockServer) -> Client {
    Client::from_config(ClientConfig::new("test-key").with_base_url(server.base_url()))
}

fn temp_file(name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn network_image_fetches_once_and_caches_the_encoding() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/cat.jpg");
        then.status(200)
            .header("Content-Type", "image/jpeg")
            .body(vec![0xFF, 0xD8, 0xFF]);
    });

    let image = NetworkImage::new(server.url("/cat.jpg"));

    let first = image.encode_base64().await.unwrap();
    let second = image.encode_base64().await.unwrap();

    assert_eq!(first, BASE64_STANDARD.encode([0xFF, 0xD8, 0xFF]));
    assert_eq!(first, second);
    mock.assert_hits(1);
}

#[tokio::test]
async fn concurrent_first_encodes_share_one_fetch() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/cat.jpg");
        then.status(200).body(vec![1, 2, 3]);
    });

    let image = NetworkImage::new(server.url("/cat.jpg"));

    let (a, b) = tokio::join!(image.encode_base64(), image.encode_base64());
    assert_eq!(a.unwrap(), b.unwrap());
    mock.assert_hits(1);
}

#[tokio::test]
async fn network_image_fetch_failure_is_classified() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/missing.jpg");
        then.status(404).body("nope");
    });

    let image = NetworkImage::new(server.url("/missing.jpg"));
    let err = image.encode_base64().await.unwrap_err();
    assert_eq!(err.to_string(), "url not found");
}

#[tokio::test]
async fn vision_message_embeds_the_image_as_a_data_uri() {
    let server = MockServer::start();
    let path = temp_file("guardrail_vision_test.jpg", b"hello");

    let mock = server.mock(|when, then| {
        when.method(POST).path("/chat/completions").json_body(json!({
            "model": "vision-chat-8b",
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "text", "text": "What is in this picture?"},
                    {"type": "image_url", "image_url": {"url": "data:image/jpeg;base64,aGVsbG8="}}
                ]
            }]
        }));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "id": "chat-2",
                "created": 1_700_000_000,
                "model": "vision-chat-8b",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "A greeting."},
                    "finish_reason": "stop"
                }]
            }));
    });

    let message = ChatMessage::user_with_image("What is in this picture?", &FileImage::new(&path))
        .await
        .unwrap();
    let request = ChatRequest::new("vision-chat-8b", ChatPrompt::messages(vec![message]));

    test_client(&server).chat(&request).await.unwrap();
    mock.assert();

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn image_embeddings_carry_the_raw_encoding() {
    let server = MockServer::start();
    let path = temp_file("guardrail_embed_test.jpg", b"hello");

    let mock = server.mock(|when, then| {
        when.method(POST).path("/embeddings").json_body(json!({
            "model": "embed-multimodal",
            "input": [{"text": "a greeting", "image": "aGVsbG8="}]
        }));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "id": "emb-2",
                "created": 1_700_000_000,
                "model": "embed-multimodal",
                "data": [{"index": 0, "embedding": [0.5]}]
            }));
    });

    let input = EmbeddingInput::multimodal("a greeting", &FileImage::new(&path))
        .await
        .unwrap();
    test_client(&server)
        .embeddings("embed-multimodal", &[input])
        .await
        .unwrap();

    mock.assert();
    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn transcription_sends_safety_options_as_headers() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/audio/transcriptions")
            .header("Authorization", "Bearer test-key")
            .header("Toxicity", "true")
            .header("Pii", "replace")
            .header("Replace-Method", "fake")
            .header("Injection", "true");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"text": "The rain in Spain stays mainly in the plain"}));
    });

    let request = TranscriptionRequest::new(
        FileUpload::memory("clip.wav", vec![0x52, 0x49, 0x46, 0x46]),
        "whisper-base",
    )
    .with_language("en")
    .with_safety(
        SafetyOptions::default()
            .with_toxicity(true)
            .with_pii(PiiMode::Replace)
            .with_pii_replace_method(ReplaceMethod::Fake)
            .with_block_prompt_injection(true),
    );

    let response = test_client(&server).transcribe_audio(request).await.unwrap();
    assert_eq!(response.text, "The rain in Spain stays mainly in the plain");
    mock.assert();
}

#[tokio::test]
async fn transcription_from_a_file_path() {
    let server = MockServer::start();
    let path = temp_file("guardrail_clip_test.wav", &[0x52, 0x49, 0x46, 0x46]);

    let mock = server.mock(|when, then| {
        when.method(POST).path("/audio/transcriptions");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"text": "ok"}));
    });

    let request = TranscriptionRequest::new(FileUpload::path(&path), "whisper-base");
    let response = test_client(&server).transcribe_audio(request).await.unwrap();

    assert_eq!(response.text, "ok");
    mock.assert();
    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn document_extraction_sends_safety_options_as_headers() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/documents/extract")
            .header("Pii", "block");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "id": "doc-1",
                "object": "document.extract",
                "contents": "# Extracted\n\nBody text."
            }));
    });

    let request = DocumentExtractRequest::new(FileUpload::memory("report.pdf", vec![0x25, 0x50]))
        .with_output_format("markdown")
        .with_chunk_size(512)
        .with_safety(SafetyOptions::default().with_pii(PiiMode::Block));

    let response = test_client(&server).extract_document(request).await.unwrap();
    assert_eq!(response.contents, "# Extracted\n\nBody text.");
    mock.assert();
}
