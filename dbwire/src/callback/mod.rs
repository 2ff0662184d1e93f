pub mod reply_completion_handle;
pub mod single_reply_completion_callback;
