//! Server-Sent Events (SSE) frame parsing.
//!
//! The streaming endpoints answer with a sequence of SSE frames whose
//! `data:` payload is one JSON chunk each. The stream is over when the
//! transport closes it; there is no sentinel data frame in the wire
//! contract, but a `[DONE]` marker from a compatible server is tolerated
//! and treated as a close.
//!
//! ```text
//! data: {"key": "value"}
//!
//! data: {"another": "event"}
//! ```

use futures::stream::{self, Stream, StreamExt};

use crate::client::ClientError;

/// Extension trait for `reqwest::Response` to enable SSE streaming.
///
/// # Example
/// ```ignore
/// use guardrail::sse::SSEResponseExt;
///
/// let response = client.post_stream("chat/completions", &body).await?;
/// let mut events = std::pin::pin!(response.sse());
/// while let Some(result) = events.next().await {
///     println!("SSE data: {}", result?);
/// }
/// ```
pub trait SSEResponseExt {
    /// Convert the response into a stream of raw SSE data payloads.
    ///
    /// Returns the content after the `data: ` prefix for each frame.
    /// Ends when the underlying byte stream closes.
    fn sse(self) -> impl Stream<Item = Result<String, ClientError>> + Send;
}

impl SSEResponseExt for reqwest::Response {
    fn sse(self) -> impl Stream<Item = Result<String, ClientError>> + Send {
        let byte_stream = self.bytes_stream();

        stream::unfold(
            (Box::pin(byte_stream), String::new(), false),
            |(mut byte_stream, mut buffer, mut stream_ended)| async move {
                loop {
                    // If the stream hasn't ended, try to read more data
                    if !stream_ended {
                        match byte_stream.next().await {
                            Some(Ok(chunk)) => {
                                if let Ok(s) = std::str::from_utf8(&chunk) {
                                    buffer.push_str(s);
                                }
                            }
                            Some(Err(e)) => {
                                // Mid-stream transport failure
                                return Some((
                                    Err(ClientError::from(e)),
                                    (byte_stream, buffer, stream_ended),
                                ));
                            }
                            None => {
                                // Byte stream closed - drain remaining complete lines
                                stream_ended = true;
                            }
                        }
                    }

                    // Process complete lines from the buffer
                    while let Some(pos) = buffer.find('\n') {
                        let line = buffer[..pos].trim().to_string();
                        buffer.drain(..=pos);

                        if line.is_empty() {
                            continue;
                        }

                        if let Some(data) = parse_sse_line(&line) {
                            if is_done_marker(data) {
                                return None;
                            }

                            return Some((
                                Ok(data.to_string()),
                                (byte_stream, buffer, stream_ended),
                            ));
                        }
                    }

                    // Stream closed with a partial final line still buffered
                    if stream_ended {
                        if !buffer.is_empty() {
                            let line = buffer.trim().to_string();
                            buffer.clear();
                            if !line.is_empty() {
                                if let Some(data) = parse_sse_line(&line) {
                                    if !is_done_marker(data) {
                                        return Some((
                                            Ok(data.to_string()),
                                            (byte_stream, buffer, stream_ended),
                                        ));
                                    }
                                }
                            }
                        }

                        return None;
                    }

                    // No complete lines yet, continue reading
                }
            },
        )
    }
}

/// Parse an SSE line to extract the data portion.
///
/// SSE lines are in the format: `data: <content>`
///
/// # Example
/// ```
/// use guardrail::sse::parse_sse_line;
///
/// let line = "data: {\"key\": \"value\"}";
/// assert_eq!(parse_sse_line(line), Some("{\"key\": \"value\"}"));
///
/// let line = "invalid";
/// assert_eq!(parse_sse_line(line), None);
/// ```
pub fn parse_sse_line(line: &str) -> Option<&str> {
    line.strip_prefix("data: ").map(|s| s.trim())
}

/// Check whether an SSE data payload is a `[DONE]` close marker.
///
/// # Example
/// ```
/// use guardrail::sse::is_done_marker;
///
/// assert!(is_done_marker("[DONE]"));
/// assert!(!is_done_marker("{\"data\": \"value\"}"));
/// ```
pub fn is_done_marker(data: &str) -> bool {
    data == "[DONE]"
}
