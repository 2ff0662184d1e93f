use std::borrow::Borrow;
use std::sync::Arc;

use crate::callback::reply_completion_handle::ReplyCompletionHandle;
use crate::net::request_waiting_list::reply_callback::{ReplyCallback, ReplyResult};

pub struct SingleReplyCompletionCallback {
    reply_completion_handle: ReplyCompletionHandle,
}

impl ReplyCallback for SingleReplyCompletionCallback {
    fn on_reply(&self, reply: ReplyResult) {
        self.reply_completion_handle.on_reply(reply);
    }
}

impl SingleReplyCompletionCallback {
    pub fn new() -> Arc<SingleReplyCompletionCallback> {
        return Arc::new(SingleReplyCompletionCallback {
            reply_completion_handle: ReplyCompletionHandle::new(),
        });
    }

    pub fn handle(&self) -> &ReplyCompletionHandle {
        return self.reply_completion_handle.borrow();
    }
}
