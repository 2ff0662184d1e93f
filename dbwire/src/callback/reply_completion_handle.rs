use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

use parking_lot::Mutex;
use tracing::error;

use crate::net::request_waiting_list::reply_callback::ReplyResult;

/// Write-once slot for the outcome of one request. Awaiting `&ReplyCompletionHandle`
/// yields the outcome once it is set; it never changes afterwards.
pub struct ReplyCompletionHandle {
    state: Mutex<CompletionState>,
}

struct CompletionState {
    reply: Option<ReplyResult>,
    waker: Option<Waker>,
}

impl ReplyCompletionHandle {
    pub(crate) fn new() -> Self {
        return ReplyCompletionHandle {
            state: Mutex::new(CompletionState { reply: None, waker: None }),
        };
    }

    /// Sets the outcome. Setting it twice is a bug in the caller: debug builds panic,
    /// release builds keep the first outcome.
    pub(crate) fn on_reply(&self, reply: ReplyResult) {
        let waker = {
            let mut state = self.state.lock();
            debug_assert!(state.reply.is_none(), "reply completion handle was completed twice");
            if state.reply.is_some() {
                error!("reply completion handle was completed twice, keeping the first outcome");
                return;
            }
            state.reply = Some(reply);
            state.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    pub fn is_completed(&self) -> bool {
        return self.state.lock().reply.is_some();
    }

    pub fn try_reply(&self) -> Option<ReplyResult> {
        return self.state.lock().reply.clone();
    }
}

impl Future for &ReplyCompletionHandle {
    type Output = ReplyResult;

    fn poll(self: Pin<&mut Self>, ctx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut guard = self.state.lock();
        if let Some(reply) = guard.reply.as_ref() {
            return Poll::Ready(reply.clone());
        }
        let stale_waker = match guard.waker.as_ref() {
            Some(waker) => !waker.will_wake(ctx.waker()),
            None => true,
        };
        if stale_waker {
            guard.waker = Some(ctx.waker().clone());
        }
        return Poll::Pending;
    }
}
