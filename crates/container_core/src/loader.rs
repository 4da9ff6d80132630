//! Container load boundary.
//!
//! # Responsibility
//! - Define the one-shot source that delivers both container listings.
//! - Turn transport outcomes into an explicit success/failure result.
//! - Bound the load by a timeout and a cancellation signal.
//! - Drop malformed records at ingestion.
//!
//! # Invariants
//! - A failed, timed out or cancelled load is always an `Err`, never an
//!   empty payload.
//! - `ingest_payload` output contains only records passing `validate()`.

use crate::model::container::{Collection, ContainerPayload, ContainerRecord};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::watch;

const STATUS_OK: u16 = 200;

/// Explicit failure kinds of the container load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Transport could not complete the request.
    Transport(String),
    /// Listing endpoint answered with a non-success status.
    Status(u16),
    /// Response body is not a valid container payload.
    Decode(String),
    /// No response within the configured bound.
    Timeout(Duration),
    /// Load abandoned because its owner was disposed.
    Cancelled,
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "container load transport failed: {message}"),
            Self::Status(status) => write!(f, "container listing returned status {status}"),
            Self::Decode(message) => write!(f, "container payload is invalid: {message}"),
            Self::Timeout(limit) => {
                write!(f, "container load timed out after {} ms", limit.as_millis())
            }
            Self::Cancelled => write!(f, "container load was cancelled"),
        }
    }
}

impl Error for LoadError {}

impl LoadError {
    /// Stable short code for logs and UI mapping.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status(_) => "status",
            Self::Decode(_) => "decode",
            Self::Timeout(_) => "timeout",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether asking the source again can reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Decode(_) | Self::Cancelled)
    }
}

pub type LoadResult = Result<ContainerPayload, LoadError>;

/// One-shot provider of both container listings.
pub trait ContainerSource {
    fn fetch(&self) -> impl Future<Output = LoadResult> + Send;
}

/// Decodes a listing payload from a JSON body.
pub fn decode_payload(body: &str) -> LoadResult {
    serde_json::from_str(body).map_err(|err| LoadError::Decode(err.to_string()))
}

/// Interprets a listing response: only `200` bodies are decoded.
pub fn payload_from_response(status: u16, body: &str) -> LoadResult {
    if status != STATUS_OK {
        return Err(LoadError::Status(status));
    }
    decode_payload(body)
}

/// Source reading a listing payload from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContainerSource for JsonFileSource {
    async fn fetch(&self) -> LoadResult {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| LoadError::Transport(format!("{}: {err}", self.path.display())))?;
        decode_payload(body.as_str())
    }
}

/// Source answering with a fixed outcome.
#[derive(Debug, Clone)]
pub struct StaticSource {
    outcome: LoadResult,
}

impl StaticSource {
    pub fn ok(payload: ContainerPayload) -> Self {
        Self {
            outcome: Ok(payload),
        }
    }

    pub fn failing(error: LoadError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

impl ContainerSource for StaticSource {
    async fn fetch(&self) -> LoadResult {
        self.outcome.clone()
    }
}

/// Owner side of a load cancellation pair.
#[derive(Debug)]
pub struct LoadCanceller {
    sender: watch::Sender<bool>,
}

/// Load side of a cancellation pair.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    receiver: watch::Receiver<bool>,
}

/// Creates a linked canceller/signal pair.
pub fn cancel_pair() -> (LoadCanceller, CancelSignal) {
    let (sender, receiver) = watch::channel(false);
    (LoadCanceller { sender }, CancelSignal { receiver })
}

impl LoadCanceller {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl CancelSignal {
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once cancelled; never resolves if the canceller is dropped
    /// without cancelling.
    pub async fn cancelled(&mut self) {
        let observed = self.receiver.wait_for(|cancelled| *cancelled).await.is_ok();
        if !observed {
            std::future::pending::<()>().await;
        }
    }
}

/// Runs one fetch bounded by `timeout` and `cancel`.
pub async fn load_containers<S>(
    source: &S,
    timeout: Duration,
    mut cancel: CancelSignal,
) -> LoadResult
where
    S: ContainerSource,
{
    info!(
        "event=containers_load module=loader status=start timeout_ms={}",
        timeout.as_millis()
    );

    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(LoadError::Cancelled),
        fetched = tokio::time::timeout(timeout, source.fetch()) => {
            fetched.unwrap_or(Err(LoadError::Timeout(timeout)))
        }
    };

    match &outcome {
        Ok(payload) => info!(
            "event=containers_load module=loader status=ok owned={} shared={}",
            payload.owned.len(),
            payload.shared.len()
        ),
        Err(err) => warn!(
            "event=containers_load module=loader status=error code={} message={}",
            err.code(),
            err
        ),
    }
    outcome
}

/// Keeps only well-formed records of both listings.
pub fn ingest_payload(payload: ContainerPayload) -> ContainerPayload {
    ContainerPayload {
        owned: retain_valid(payload.owned, Collection::Owned),
        shared: retain_valid(payload.shared, Collection::Shared),
    }
}

fn retain_valid(records: Vec<ContainerRecord>, collection: Collection) -> Vec<ContainerRecord> {
    let received = records.len();
    let kept = records
        .into_iter()
        .filter(|record| record.validate().is_ok())
        .collect::<Vec<_>>();
    let dropped = received - kept.len();
    if dropped > 0 {
        warn!(
            "event=containers_ingest module=loader status=partial collection={} dropped={} kept={}",
            collection.as_str(),
            dropped,
            kept.len()
        );
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::{ingest_payload, payload_from_response, LoadError};
    use crate::model::container::{ContainerPayload, ContainerRecord};

    #[test]
    fn non_ok_status_is_explicit_failure() {
        let err = payload_from_response(500, "{}").expect_err("500 must fail");
        assert_eq!(err, LoadError::Status(500));
        assert!(err.is_retryable());
    }

    #[test]
    fn ok_status_decodes_missing_and_null_listings_as_empty() {
        let payload = payload_from_response(200, r#"{"ownContainers":null}"#)
            .expect("payload should decode");
        assert_eq!(payload, ContainerPayload::default());
    }

    #[test]
    fn ingest_drops_nameless_records() {
        let payload = ContainerPayload::new(
            vec![ContainerRecord::new("a"), ContainerRecord::default()],
            vec![ContainerRecord::new(""), ContainerRecord::new(" ")],
        );
        let ingested = ingest_payload(payload);
        assert_eq!(ingested.owned, vec![ContainerRecord::new("a")]);
        assert_eq!(ingested.shared, vec![ContainerRecord::new(" ")]);
    }
}
