pub mod request_waiting_list;
pub mod request_waiting_list_config;
pub mod reply_callback;
pub mod reply_error;
