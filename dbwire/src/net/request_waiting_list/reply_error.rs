use std::error::Error;
use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::net::connect::correlation_id::CorrelationId;
use crate::net::connect::error::AnyError;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("transport i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("transport error: {0}")]
    Other(String),
}

/// Terminal failure delivered to a pending reply.
///
/// Cheap to clone: a single teardown cause is handed to every request still waiting.
#[derive(Error, Debug, Clone)]
pub enum ReplyError {
    #[error("connection closed")]
    ConnectionClosed,
    #[error("connection failed: {0}")]
    Transport(#[source] Arc<TransportError>),
    #[error("query failed: {0}")]
    QueryFailure(#[source] Arc<dyn Error + Send + Sync + 'static>),
    #[error("request {0} timed out")]
    Timeout(CorrelationId),
    #[error("request {0} was cancelled")]
    Cancelled(CorrelationId),
    #[error("correlation id {0} is already awaiting a reply")]
    DuplicateCorrelationId(CorrelationId),
}

impl ReplyError {
    pub fn query_failure<E: Into<AnyError>>(error: E) -> Self {
        return ReplyError::QueryFailure(Arc::from(error.into()));
    }

    pub fn transport(error: TransportError) -> Self {
        return ReplyError::Transport(Arc::new(error));
    }

    pub fn is_connection_closed(&self) -> bool {
        return matches!(self, ReplyError::ConnectionClosed);
    }
}
