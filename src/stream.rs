//! Streaming dispatcher: turns an SSE response into ordered callback
//! invocations.
//!
//! Lifecycle per call: not-started, then zero or more data events, then
//! exactly one terminal signal. A clean close terminates with
//! [`ClientError::Eof`]; a mid-stream fault terminates with that fault.
//! Nothing is delivered after the terminal signal, and events arrive in
//! wire order, one at a time.

use futures::StreamExt;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::ClientError;
use crate::sse::SSEResponseExt;

/// Decode each SSE frame of `response` as JSON and feed it to `on_event`.
///
/// The callback receives `Ok(chunk)` per data frame and exactly one final
/// `Err`: [`ClientError::Eof`] on clean close, or the classified fault
/// otherwise.
pub(crate) async fn dispatch<T, F>(response: reqwest::Response, mut on_event: F)
where
    T: DeserializeOwned,
    F: FnMut(Result<T, ClientError>),
{
    let sse_stream = response.sse();
    let mut events = std::pin::pin!(sse_stream);

    while let Some(item) = events.next().await {
        match item {
            Ok(data) => match serde_json::from_str::<T>(&data) {
                Ok(event) => on_event(Ok(event)),
                Err(e) => {
                    on_event(Err(ClientError::Parse(e)));
                    return;
                }
            },
            Err(e) => {
                on_event(Err(e));
                return;
            }
        }
    }

    debug!("stream closed");
    on_event(Err(ClientError::Eof));
}
