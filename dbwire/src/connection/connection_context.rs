use std::sync::{Arc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::callback::single_reply_completion_callback::SingleReplyCompletionCallback;
use crate::connection::reply_dispatcher::ReplyDispatcher;
use crate::handshake::server_handshake::ServerHandshake;
use crate::net::connect::correlation_id::{CorrelationId, CorrelationIdGenerator};
use crate::net::connect::sequential_correlation_id_generator::SequentialCorrelationIdGenerator;
use crate::net::reply::server_reply::ServerReply;
use crate::net::request_waiting_list::reply_callback::ReplyCallbackType;
use crate::net::request_waiting_list::reply_error::ReplyError;
use crate::net::request_waiting_list::request_waiting_list::RequestWaitingList;
use crate::net::request_waiting_list::request_waiting_list_config::RequestWaitingListConfig;

/// Per-connection state shared between callers and the reply dispatcher.
///
/// The context owns its waiting list. Dropping the context closes the waiting list, so every
/// request still pending is failed with `ReplyError::ConnectionClosed`, also while unwinding.
pub struct ConnectionContext {
    state: Arc<ContextState>,
}

pub(crate) struct ContextState {
    waiting_list: RequestWaitingList,
    correlation_id_generator: Box<dyn CorrelationIdGenerator>,
    server_handshake: RwLock<Option<ServerHandshake>>,
    did_error: AtomicBool,
    torn_down: AtomicBool,
}

impl ContextState {
    pub(crate) fn waiting_list(&self) -> &RequestWaitingList {
        return &self.waiting_list;
    }

    pub(crate) fn mark_errored(&self) {
        self.did_error.store(true, Ordering::SeqCst);
    }

    /// Closes the waiting list the first time it is called; later calls do nothing.
    pub(crate) fn tear_down(&self, error: ReplyError) -> usize {
        if self.torn_down.swap(true, Ordering::SeqCst) {
            return 0;
        }
        let failed = self.waiting_list.close(error);
        debug!(failed, "connection context torn down");
        return failed;
    }
}

impl ConnectionContext {
    pub fn new() -> Self {
        return Self::new_with_config(RequestWaitingListConfig::default());
    }

    pub fn new_with_config(config: RequestWaitingListConfig) -> Self {
        return Self::new_with_generator(config, Box::new(SequentialCorrelationIdGenerator::new()));
    }

    pub fn new_with_generator(
        config: RequestWaitingListConfig,
        correlation_id_generator: Box<dyn CorrelationIdGenerator>) -> Self {

        let state = ContextState {
            waiting_list: RequestWaitingList::new(config),
            correlation_id_generator,
            server_handshake: RwLock::new(None),
            did_error: AtomicBool::new(false),
            torn_down: AtomicBool::new(false),
        };
        return ConnectionContext { state: Arc::new(state) };
    }

    pub fn next_request_id(&self) -> CorrelationId {
        return self.state.correlation_id_generator.generate();
    }

    pub fn await_reply(&self, request_id: CorrelationId, callback: ReplyCallbackType) {
        self.state.waiting_list.register(request_id, callback);
    }

    /// Registers a fresh completion callback for `request_id` and returns it; await
    /// `callback.handle()` for the outcome.
    pub fn expect_reply(&self, request_id: CorrelationId) -> Arc<SingleReplyCompletionCallback> {
        let callback = SingleReplyCompletionCallback::new();
        self.await_reply(request_id, callback.clone());
        return callback;
    }

    pub fn handle_reply(&self, reply: ServerReply) -> bool {
        return self.state.waiting_list.deliver(reply);
    }

    pub fn fail_query(&self, request_id: CorrelationId, error: ReplyError) -> bool {
        return self.state.waiting_list.fail(request_id, error);
    }

    pub fn cancel_queries(&self, error: ReplyError) -> usize {
        return self.state.waiting_list.cancel_all(error);
    }

    pub fn set_server_handshake(&self, server_handshake: ServerHandshake) {
        if server_handshake.is_outdated() {
            warn!(
                max_wire_version = %server_handshake.get_max_wire_version(),
                "database server is outdated, please upgrade it"
            );
        }
        *self.state.server_handshake.write() = Some(server_handshake);
    }

    pub fn server_handshake(&self) -> Option<ServerHandshake> {
        return self.state.server_handshake.read().clone();
    }

    pub fn did_error(&self) -> bool {
        return self.state.did_error.load(Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        return self.state.torn_down.load(Ordering::SeqCst);
    }

    pub fn pending_replies(&self) -> usize {
        return self.state.waiting_list.len();
    }

    pub fn reply_dispatcher(&self) -> ReplyDispatcher {
        return ReplyDispatcher::new(self.downgrade());
    }

    /// Fails everything still pending with `ReplyError::ConnectionClosed`. Returns the
    /// number of requests failed; zero if the context was already closed.
    pub fn close(&self) -> usize {
        return self.state.tear_down(ReplyError::ConnectionClosed);
    }

    fn downgrade(&self) -> Weak<ContextState> {
        return Arc::downgrade(&self.state);
    }
}

impl Default for ConnectionContext {
    fn default() -> Self {
        return Self::new();
    }
}

impl Drop for ConnectionContext {
    fn drop(&mut self) {
        self.state.tear_down(ReplyError::ConnectionClosed);
    }
}
