pub mod server_handshake;
pub mod wire_version;
