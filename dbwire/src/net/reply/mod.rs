pub mod server_reply;
