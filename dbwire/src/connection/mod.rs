pub mod connection_context;
pub mod reply_dispatcher;
