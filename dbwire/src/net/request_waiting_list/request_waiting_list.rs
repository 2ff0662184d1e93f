use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use parking_lot::Mutex;
use tracing::{debug, error, trace, warn};

use crate::net::connect::correlation_id::CorrelationId;
use crate::net::reply::server_reply::ServerReply;
use crate::net::request_waiting_list::reply_callback::{PendingReply, ReplyCallbackType};
use crate::net::request_waiting_list::reply_error::ReplyError;
use crate::net::request_waiting_list::request_waiting_list_config::RequestWaitingListConfig;

/// Correlates replies with the requests waiting for them.
///
/// Every operation runs under one lock, so the history of `register`, `deliver`, `fail`,
/// `cancel_all` and `close` is totally ordered. An entry leaves the table exactly once and
/// its callback is invoked by whoever removed it, after the lock is released.
pub struct RequestWaitingList {
    state: Mutex<WaitingListState>,
}

struct WaitingListState {
    pending_requests: HashMap<CorrelationId, PendingReply>,
    closed_with: Option<ReplyError>,
}

impl RequestWaitingList {
    pub fn new(config: RequestWaitingListConfig) -> Self {
        return Self::new_with_capacity(config.get_capacity());
    }

    pub fn new_with_capacity(capacity: usize) -> Self {
        return RequestWaitingList {
            state: Mutex::new(WaitingListState {
                pending_requests: HashMap::with_capacity(capacity),
                closed_with: None,
            }),
        };
    }

    /// Registers `callback` as the receiver of the reply to `correlation_id`.
    ///
    /// A second registration for an id that is still pending is rejected: the first entry
    /// stays, and the new callback is failed with `DuplicateCorrelationId`. After `close`,
    /// the callback is failed right away with the close error.
    pub fn register(&self, correlation_id: CorrelationId, callback: ReplyCallbackType) {
        let pending_reply = PendingReply::new(correlation_id, callback);
        let rejection = {
            let mut state = self.state.lock();
            if let Some(error) = &state.closed_with {
                Some((pending_reply, error.clone()))
            } else if state.pending_requests.contains_key(&correlation_id) {
                Some((pending_reply, ReplyError::DuplicateCorrelationId(correlation_id)))
            } else {
                state.pending_requests.insert(correlation_id, pending_reply);
                None
            }
        };

        if let Some((pending_reply, error)) = rejection {
            if matches!(error, ReplyError::DuplicateCorrelationId(_)) {
                warn!(correlation_id, "rejecting registration, correlation id is already pending");
            } else {
                debug!(correlation_id, "rejecting registration on a closed waiting list");
            }
            pending_reply.fail(error);
        }
    }

    /// Resolves the request `reply` answers. Returns false if nothing was waiting for it.
    pub fn deliver(&self, reply: ServerReply) -> bool {
        let pending_reply = self.state.lock().pending_requests.remove(&reply.response_to());
        if let Some(pending_reply) = pending_reply {
            pending_reply.resolve(reply);
            return true;
        }
        return false;
    }

    pub fn fail(&self, correlation_id: CorrelationId, error: ReplyError) -> bool {
        let pending_reply = self.state.lock().pending_requests.remove(&correlation_id);
        if let Some(pending_reply) = pending_reply {
            pending_reply.fail(error);
            return true;
        }
        return false;
    }

    /// Fails every pending request with `error` and leaves the table empty.
    pub fn cancel_all(&self, error: ReplyError) -> usize {
        let drained = {
            let mut state = self.state.lock();
            Self::drain(&mut state)
        };
        return Self::fail_all(drained, error);
    }

    /// Same as `cancel_all`, and every later `register` is failed with `error`.
    /// Only the first close decides the error later registrations see.
    pub fn close(&self, error: ReplyError) -> usize {
        let drained = {
            let mut state = self.state.lock();
            if state.closed_with.is_none() {
                state.closed_with = Some(error.clone());
            }
            Self::drain(&mut state)
        };
        return Self::fail_all(drained, error);
    }

    pub fn is_closed(&self) -> bool {
        return self.state.lock().closed_with.is_some();
    }

    pub fn is_pending(&self, correlation_id: CorrelationId) -> bool {
        return self.state.lock().pending_requests.contains_key(&correlation_id);
    }

    pub fn len(&self) -> usize {
        return self.state.lock().pending_requests.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.len() == 0;
    }

    fn drain(state: &mut WaitingListState) -> Vec<PendingReply> {
        return state.pending_requests.drain().map(|(_, pending_reply)| pending_reply).collect();
    }

    /// Fails every drained entry, even when one of the callbacks panics. The first panic is
    /// raised again once all entries are failed, unless the thread is already unwinding.
    fn fail_all(drained: Vec<PendingReply>, error: ReplyError) -> usize {
        let total = drained.len();
        if total > 0 {
            debug!(total, %error, "failing pending requests");
        }

        let mut panics = 0;
        let mut first_panic = None;
        for pending_reply in drained {
            let correlation_id = pending_reply.correlation_id();
            trace!(correlation_id, "failing pending request");

            let error = error.clone();
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(move || pending_reply.fail(error))) {
                error!(correlation_id, "reply callback panicked while failing pending request");
                panics += 1;
                first_panic.get_or_insert(payload);
            }
        }

        if let Some(payload) = first_panic {
            error!(panics, total, "reply callbacks panicked while failing pending requests");
            if !thread::panicking() {
                panic::resume_unwind(payload);
            }
        }
        return total;
    }
}

impl Default for RequestWaitingList {
    fn default() -> Self {
        return Self::new(RequestWaitingListConfig::default());
    }
}
