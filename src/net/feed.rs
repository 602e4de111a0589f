// Connection feed polling
//
// A single worker thread fetches the connection list on a fixed interval and
// hands each result to the UI thread over a channel. The worker never touches
// render state.

use super::ConnectionRecord;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a poll produced no snapshot
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed unreachable: {0}")]
    Transport(String),

    #[error("feed answered with HTTP {0}")]
    Status(u16),

    #[error("feed payload is not a connection list: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can produce the current connection list
pub trait ConnectionSource {
    fn fetch(&self) -> Result<Vec<ConnectionRecord>, FeedError>;
}

/// `GET {base_url}/connections` over HTTP
pub struct HttpFeed {
    agent: ureq::Agent,
    url: String,
}

impl HttpFeed {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            url: connections_url(base_url),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ConnectionSource for HttpFeed {
    fn fetch(&self) -> Result<Vec<ConnectionRecord>, FeedError> {
        let response = match self.agent.get(&self.url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => return Err(FeedError::Status(code)),
            Err(ureq::Error::Transport(transport)) => {
                return Err(FeedError::Transport(transport.to_string()))
            }
        };

        let body = response
            .into_string()
            .map_err(|e| FeedError::Transport(e.to_string()))?;
        parse_connections(&body)
    }
}

/// Build the endpoint URL from a base URL, tolerating trailing slashes
pub fn connections_url(base_url: &str) -> String {
    format!("{}/connections", base_url.trim_end_matches('/'))
}

/// Decode a feed payload (a JSON array of records)
pub fn parse_connections(body: &str) -> Result<Vec<ConnectionRecord>, FeedError> {
    Ok(serde_json::from_str(body)?)
}

/// Result of one poll, as seen by the UI thread
#[derive(Debug)]
pub enum FeedEvent {
    Snapshot(Vec<ConnectionRecord>),
    Failed(FeedError),
}

/// Spawns the polling worker
pub struct FeedPoller;

impl FeedPoller {
    /// Start polling `source` every `interval`, beginning immediately.
    ///
    /// The returned handle is the worker's cancellation token: dropping it or
    /// calling [`FeedHandle::shutdown`] stops the worker before its next poll.
    pub fn spawn<S>(source: S, interval: Duration) -> std::io::Result<FeedHandle>
    where
        S: ConnectionSource + Send + 'static,
    {
        let (event_tx, event_rx) = mpsc::channel();
        let (cancel_tx, cancel_rx) = mpsc::channel();

        let worker = thread::Builder::new()
            .name("netbubbles-feed".to_string())
            .spawn(move || poll_loop(source, interval, event_tx, cancel_rx))?;

        info!(interval_ms = interval.as_millis() as u64, "Connection feed started");

        Ok(FeedHandle {
            events: event_rx,
            cancel: Some(cancel_tx),
            worker: Some(worker),
        })
    }
}

fn poll_loop<S: ConnectionSource>(
    source: S,
    interval: Duration,
    events: Sender<FeedEvent>,
    cancel: Receiver<()>,
) {
    loop {
        let event = match source.fetch() {
            Ok(records) => {
                debug!(records = records.len(), "Connection feed polled");
                FeedEvent::Snapshot(records)
            }
            Err(e) => FeedEvent::Failed(e),
        };

        if events.send(event).is_err() {
            // UI side is gone
            break;
        }

        match cancel.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    debug!("Connection feed worker exiting");
}

/// Owning handle to a running feed worker
pub struct FeedHandle {
    events: Receiver<FeedEvent>,
    cancel: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl FeedHandle {
    /// Drain every poll result that arrived since the last call, oldest first
    pub fn drain(&self) -> Vec<FeedEvent> {
        self.events.try_iter().collect()
    }

    /// Stop the worker and wait for it to exit.
    ///
    /// A fetch already in flight finishes first (bounded by the HTTP timeout).
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Connection feed worker panicked");
            }
            info!("Connection feed stopped");
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
