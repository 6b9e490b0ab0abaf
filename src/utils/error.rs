//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Two classes of analysis error exist. Structural errors ([`IngestError`])
//! mean the trace does not belong to the plan and abort the ingestion call.
//! Data-quality errors ([`StatsError`]) only drop one stream's contribution
//! to one metric; they are collected into an [`ErrorList`] while the rest of
//! the reduction carries on.

use crate::plan::{FlowId, NodeId, ProcessorId, StreamId};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while attaching trace statistics to a topology
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error(
        "trace has span for processor {0} but the processor does not exist in the physical plan"
    )]
    UnknownProcessor(ProcessorId),

    #[error("trace has span for stream {0} but the stream does not exist in the physical plan")]
    UnknownStream(StreamId),

    #[error(
        "trace has span for flow {flow_id} on node {node_id} \
         but the flow does not exist in the physical plan"
    )]
    UnknownFlow { flow_id: FlowId, node_id: NodeId },
}

/// Network metric whose send/receive sides must be mutually exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkMetric {
    Bytes,
    Messages,
}

impl NetworkMetric {
    fn noun(self) -> &'static str {
        match self {
            Self::Bytes => "network bytes",
            Self::Messages => "network messages",
        }
    }

    fn received_field(self) -> &'static str {
        match self {
            Self::Bytes => "BytesReceived",
            Self::Messages => "MessagesReceived",
        }
    }

    fn sent_field(self) -> &'static str {
        match self {
            Self::Bytes => "BytesSent",
            Self::Messages => "MessagesSent",
        }
    }
}

/// A stream bag did not carry exactly one side of a network metric
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusivityError {
    #[error(
        "could not get {}; both {} and {} are set",
        .0.noun(),
        .0.received_field(),
        .0.sent_field()
    )]
    BothSet(NetworkMetric),

    #[error(
        "could not get {}; neither {} nor {} is set",
        .0.noun(),
        .0.received_field(),
        .0.sent_field()
    )]
    NeitherSet(NetworkMetric),
}

/// Recoverable errors raised while reducing stream statistics
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("error calculating network bytes sent for stream {stream_id}: {source}")]
    NetworkBytes {
        stream_id: StreamId,
        #[source]
        source: ExclusivityError,
    },

    #[error("error calculating number of network messages for stream {stream_id}: {source}")]
    NetworkMessages {
        stream_id: StreamId,
        #[source]
        source: ExclusivityError,
    },
}

impl StatsError {
    /// Stream whose contribution was dropped
    pub fn stream_id(&self) -> StreamId {
        match self {
            Self::NetworkBytes { stream_id, .. } | Self::NetworkMessages { stream_id, .. } => {
                *stream_id
            }
        }
    }
}

/// Per-topology failure reported by the multi-topology driver
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("error analyzing trace statistics for topology {topology}: {source}")]
    Ingest {
        topology: usize,
        #[source]
        source: IngestError,
    },

    #[error("error processing statistics for topology {topology}: {source}")]
    Stats {
        topology: usize,
        #[source]
        source: ErrorList<StatsError>,
    },
}

impl AnalyzeError {
    /// Index of the topology that failed
    pub fn topology(&self) -> usize {
        match self {
            Self::Ingest { topology, .. } | Self::Stats { topology, .. } => *topology,
        }
    }
}

/// Accumulator combining independent errors
///
/// Every pushed error is kept; nothing is first-wins. An empty list means
/// success, see [`ErrorList::into_result`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorList<E> {
    errors: Vec<E>,
}

impl<E> Default for ErrorList<E> {
    fn default() -> Self {
        Self { errors: Vec::new() }
    }
}

impl<E> ErrorList<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: E) {
        self.errors.push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<E> {
        self.errors
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl<E> From<E> for ErrorList<E> {
    fn from(err: E) -> Self {
        Self { errors: vec![err] }
    }
}

impl<E> FromIterator<E> for ErrorList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl<E> IntoIterator for ErrorList<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a ErrorList<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl<E: fmt::Display> fmt::Display for ErrorList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => write!(f, "no errors"),
            [only] => write!(f, "{only}"),
            all => {
                write!(f, "{} errors: ", all.len())?;
                for (i, err) in all.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
        }
    }
}

impl<E> std::error::Error for ErrorList<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.errors
            .first()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

/// Errors that can occur while loading plans and traces
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid trace format: {0}")]
    InvalidFormat(String),

    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
