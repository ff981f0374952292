// Bounded response ingestion

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};

pub const DEFAULT_BODY_CAPACITY: usize = 20_000;

/// Anything that hands out a response body chunk by chunk.
#[async_trait]
pub trait BodySource: Send {
    /// Next chunk of the body, or `None` once the stream is drained.
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>>;
}

#[async_trait]
impl BodySource for reqwest::Response {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        self.chunk()
            .await
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()))
            .map_err(|e| ClientError::Read(e.to_string()))
    }
}

/// Status and exact body bytes of one API call.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Status rendered as `"200 OK"`.
    pub fn status_line(&self) -> String {
        match self.status.canonical_reason() {
            Some(reason) => format!("{} {}", self.status.as_u16(), reason),
            None => self.status.as_u16().to_string(),
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Fails with `Status` unless the API answered 2xx.
    pub fn require_success(self) -> Result<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(ClientError::Status {
                status: self.status,
                body: self.text(),
            })
        }
    }

    /// Requires a 2xx status, then decodes the body as JSON.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        let raw = self.require_success()?;
        serde_json::from_slice(&raw.body).map_err(ClientError::from)
    }
}

/// Reads `source` to the end into a buffer of at most `capacity` bytes.
///
/// Chunks are pulled until the stream ends. If any data is still pending once
/// `capacity` bytes are held, the read fails with `TruncatedResponse` carrying
/// the first `capacity` bytes. On success the returned vector holds exactly
/// the bytes received.
pub async fn read_bounded<S>(source: &mut S, capacity: usize) -> Result<Vec<u8>>
where
    S: BodySource + ?Sized,
{
    let mut buffer: Vec<u8> = Vec::with_capacity(capacity.min(64 * 1024));

    while let Some(chunk) = source.next_chunk().await? {
        if chunk.is_empty() {
            continue;
        }
        let room = capacity - buffer.len();
        if chunk.len() > room {
            buffer.extend_from_slice(&chunk[..room]);
            return Err(ClientError::TruncatedResponse {
                capacity,
                partial: buffer,
            });
        }
        buffer.extend_from_slice(&chunk);
    }

    Ok(buffer)
}

/// Captures the status, then drains the body through [`read_bounded`].
/// A non-2xx status is returned to the caller, not turned into an error.
pub async fn read_response(mut response: reqwest::Response, capacity: usize) -> Result<RawResponse> {
    let status = response.status();
    let body = read_bounded(&mut response, capacity).await?;
    Ok(RawResponse { status, body })
}
