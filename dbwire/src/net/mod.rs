pub mod connect;
pub mod reply;
pub mod request_waiting_list;
