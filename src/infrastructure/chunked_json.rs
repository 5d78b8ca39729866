// Chunked JSON streaming utilities
use crate::infrastructure::http_response::brotli_compress;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;
use serde::Serialize;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;

/// Create a chunked streaming response of length-prefixed JSON messages
pub fn chunked_json_stream<S, T>(stream: S, compress: bool) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = T> + Send + 'static,
    T: Serialize + Send + Sync + 'static,
{
    let byte_stream = stream.then(move |msg| async move { serialize_chunk(&msg, compress).await });

    let body = Body::from_stream(byte_stream);

    // Chunks are compressed one by one, so no Content-Encoding header here
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson-framed")
        .header(header::TRANSFER_ENCODING, "chunked")
        .body(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize a single message to a `u32` big-endian length + payload chunk
pub async fn serialize_chunk<T: Serialize>(msg: &T, compress: bool) -> Result<Bytes, std::io::Error> {
    let buffer = serde_json::to_vec(msg).map_err(std::io::Error::other)?;

    let payload = if compress {
        brotli_compress(buffer).await?
    } else {
        buffer
    };

    let mut chunk = BytesMut::with_capacity(4 + payload.len());
    chunk.put_u32(frame_length(payload.len())?);
    chunk.put_slice(&payload);

    Ok(chunk.freeze())
}

/// Payloads that do not fit the `u32` prefix are an error, not a wrapped length
fn frame_length(len: usize) -> Result<u32, std::io::Error> {
    u32::try_from(len).map_err(std::io::Error::other)
}

/// Stream an initial message followed by everything published on `rx`.
/// Lagging receivers skip ahead instead of ending the stream.
pub fn stream_from_broadcast<T>(
    initial: T,
    rx: broadcast::Receiver<T>,
    compress: bool,
) -> impl IntoResponse
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    let updates = BroadcastStream::new(rx).filter_map(|item| async move {
        match item {
            Ok(msg) => Some(msg),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::debug!("Stream subscriber lagged, skipped {} updates", skipped);
                None
            }
        }
    });
    let stream = async_stream::stream! {
        yield initial;
        futures::pin_mut!(updates);
        while let Some(msg) = updates.next().await {
            yield msg;
        }
    };

    match chunked_json_stream(stream, compress) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
