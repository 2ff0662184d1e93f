use std::sync::Weak;

use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::connection::connection_context::ContextState;
use crate::net::reply::server_reply::ServerReply;
use crate::net::request_waiting_list::reply_error::{ReplyError, TransportError};

pub type InboundFrame = Result<ServerReply, TransportError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    Matched,
    Unmatched,
    TornDown,
    ContextDropped,
}

impl DispatchOutcome {
    pub fn keeps_running(&self) -> bool {
        return matches!(self, DispatchOutcome::Matched | DispatchOutcome::Unmatched);
    }
}

/// Routes decoded frames from the transport into a connection's waiting list.
///
/// Holds the connection state weakly: a running dispatcher never keeps a dropped
/// connection alive.
pub struct ReplyDispatcher {
    state: Weak<ContextState>,
}

impl ReplyDispatcher {
    pub(crate) fn new(state: Weak<ContextState>) -> Self {
        return ReplyDispatcher { state };
    }

    /// Spawns the dispatch loop. It ends on a transport error, when the channel closes,
    /// or once the connection context is gone. The first two close the connection.
    pub fn start(self, mut receiver: Receiver<InboundFrame>) -> JoinHandle<()> {
        return tokio::spawn(async move {
            debug!("reply dispatcher started");
            while let Some(frame) = receiver.recv().await {
                if !self.dispatch(frame).keeps_running() {
                    debug!("reply dispatcher stopped");
                    return;
                }
            }
            self.on_inbound_closed();
            debug!("reply dispatcher stopped, inbound channel closed");
        });
    }

    pub fn dispatch(&self, frame: InboundFrame) -> DispatchOutcome {
        let state = match self.state.upgrade() {
            Some(state) => state,
            None => return DispatchOutcome::ContextDropped,
        };
        return match frame {
            Ok(reply) => {
                let response_to = reply.response_to();
                if state.waiting_list().deliver(reply) {
                    DispatchOutcome::Matched
                } else {
                    debug!(response_to, "no pending request for reply, dropping it");
                    DispatchOutcome::Unmatched
                }
            }
            Err(error) => {
                warn!(%error, "transport failed, closing connection");
                state.mark_errored();
                state.tear_down(ReplyError::transport(error));
                DispatchOutcome::TornDown
            }
        };
    }

    fn on_inbound_closed(&self) {
        if let Some(state) = self.state.upgrade() {
            state.tear_down(ReplyError::ConnectionClosed);
        }
    }
}

#[cfg(all(test, feature = "test_type_unit"))]
mod tests {
    use std::io;

    use bytes::Bytes;
    use tokio::sync::mpsc;

    use crate::connection::connection_context::ConnectionContext;
    use crate::connection::reply_dispatcher::DispatchOutcome;
    use crate::net::reply::server_reply::ServerReply;
    use crate::net::request_waiting_list::reply_error::{ReplyError, TransportError};

    #[tokio::test]
    async fn dispatch_matched_and_unmatched_replies() {
        let context = ConnectionContext::new();
        let callback = context.expect_reply(7);
        let dispatcher = context.reply_dispatcher();

        assert_eq!(DispatchOutcome::Matched, dispatcher.dispatch(Ok(ServerReply::new(1, 7, 2013, Bytes::from("ok")))));
        assert_eq!(DispatchOutcome::Unmatched, dispatcher.dispatch(Ok(ServerReply::new(2, 7, 2013, Bytes::from("again")))));

        assert_eq!(&Bytes::from("ok"), callback.handle().await.unwrap().payload());
    }

    #[tokio::test]
    async fn transport_error_tears_down_the_connection() {
        let context = ConnectionContext::new();
        let callback = context.expect_reply(3);
        let dispatcher = context.reply_dispatcher();

        let error = TransportError::from(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"));
        assert_eq!(DispatchOutcome::TornDown, dispatcher.dispatch(Err(error)));

        assert!(context.did_error());
        assert!(context.is_closed());
        assert!(matches!(callback.handle().await, Err(ReplyError::Transport(_))));
    }

    #[tokio::test]
    async fn stop_once_the_context_is_dropped() {
        let context = ConnectionContext::new();
        let dispatcher = context.reply_dispatcher();
        drop(context);

        assert_eq!(DispatchOutcome::ContextDropped, dispatcher.dispatch(Ok(ServerReply::new(1, 1, 2013, Bytes::new()))));
    }

    #[tokio::test]
    async fn closing_the_inbound_channel_closes_the_connection() {
        let context = ConnectionContext::new();
        let callback = context.expect_reply(9);
        let (sender, receiver) = mpsc::channel(4);

        let dispatcher = context.reply_dispatcher().start(receiver);
        drop(sender);
        dispatcher.await.unwrap();

        assert!(context.is_closed());
        assert!(!context.did_error());
        assert!(callback.handle().await.unwrap_err().is_connection_closed());
    }
}
