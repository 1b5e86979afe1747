use std::future::Future;

use chrono::{DateTime, Local};

/// Why an acquisition attempt produced no usable record.
#[derive(Debug)]
pub enum SourceError {
    /// Transport-level failure (connect, timeout, TLS).
    Http(String),
    /// Non-success HTTP status from the provider.
    Status(u16),
    /// Response body did not match the expected shape.
    Malformed(String),
    /// Every strategy in the chain failed.
    Exhausted,
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(m) => write!(f, "http error: {m}"),
            Self::Status(code) => write!(f, "provider returned status {code}"),
            Self::Malformed(m) => write!(f, "malformed payload: {m}"),
            Self::Exhausted => write!(f, "all acquisition strategies failed"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Capability a data-backed screen needs from its provider: fetch a
/// display-ready record, and synthesize a labeled stand-in when live data
/// has never been available. Weather and transit are the two implementors;
/// the refresh loop is generic over this.
pub trait DataSource: Send + Sync + 'static {
    type Record: Clone + Send + Sync + 'static;

    /// Attempt one acquisition, including normalization. Implementations
    /// with multiple strategies try them all before reporting failure.
    fn acquire(&self) -> impl Future<Output = Result<Self::Record, SourceError>> + Send;

    /// Deterministic record to show when no live data was ever acquired.
    fn fallback(&self) -> Self::Record;
}

/// Latest snapshot for one agent, owned by its refresh task and read by
/// renderers.
#[derive(Debug, Clone)]
pub struct AgentState<R> {
    /// Most recent successful (or fallback) record. Never cleared by a
    /// failed refresh.
    pub last_good: Option<R>,
    /// True only until the first refresh attempt settles.
    pub loading: bool,
    pub last_updated: Option<DateTime<Local>>,
}

impl<R> Default for AgentState<R> {
    fn default() -> Self {
        Self {
            last_good: None,
            loading: true,
            last_updated: None,
        }
    }
}

impl<R> AgentState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one finished refresh attempt into the snapshot.
    ///
    /// Success replaces the record wholesale. Failure keeps whatever was
    /// there; if nothing has ever been acquired, the fallback is installed
    /// so the screen never renders empty. Either way the attempt settles
    /// the loading flag, and a later failure never flips it back on.
    pub fn apply(&mut self, outcome: Result<R, SourceError>, fallback: impl FnOnce() -> R) {
        match outcome {
            Ok(record) => {
                self.last_good = Some(record);
                self.last_updated = Some(Local::now());
            },
            Err(_) => {
                if self.last_good.is_none() {
                    self.last_good = Some(fallback());
                    self.last_updated = Some(Local::now());
                }
            },
        }
        self.loading = false;
    }
}
