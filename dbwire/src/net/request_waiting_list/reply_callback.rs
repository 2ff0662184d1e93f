use std::sync::Arc;

use crate::net::connect::correlation_id::CorrelationId;
use crate::net::reply::server_reply::ServerReply;
use crate::net::request_waiting_list::reply_error::ReplyError;

pub type ReplyResult = Result<ServerReply, ReplyError>;

pub type ReplyCallbackType = Arc<dyn ReplyCallback + 'static>;

pub trait ReplyCallback: Send + Sync {
    fn on_reply(&self, reply: ReplyResult);
}

/// An entry of the waiting list. Resolving or failing consumes it, so an entry reaches
/// its callback at most once.
pub(crate) struct PendingReply {
    correlation_id: CorrelationId,
    callback: ReplyCallbackType,
}

impl PendingReply {
    pub(crate) fn new(correlation_id: CorrelationId, callback: ReplyCallbackType) -> Self {
        return PendingReply { correlation_id, callback };
    }

    pub(crate) fn correlation_id(&self) -> CorrelationId {
        return self.correlation_id;
    }

    pub(crate) fn resolve(self, reply: ServerReply) {
        self.callback.on_reply(Ok(reply));
    }

    pub(crate) fn fail(self, error: ReplyError) {
        self.callback.on_reply(Err(error));
    }
}
