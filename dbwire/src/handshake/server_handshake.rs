use crate::handshake::wire_version::WireVersion;

const DEFAULT_MAX_MESSAGE_SIZE_BYTES: i32 = 48_000_000;

/// Capabilities read from the server's handshake reply. Decoding that reply happens elsewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerHandshake {
    min_wire_version: WireVersion,
    max_wire_version: WireVersion,
    max_message_size_bytes: i32,
}

impl ServerHandshake {
    pub fn new(min_wire_version: WireVersion, max_wire_version: WireVersion) -> Self {
        return Self::new_with_max_message_size(min_wire_version, max_wire_version, DEFAULT_MAX_MESSAGE_SIZE_BYTES);
    }

    pub fn new_with_max_message_size(
        min_wire_version: WireVersion,
        max_wire_version: WireVersion,
        max_message_size_bytes: i32) -> Self {

        return ServerHandshake {
            min_wire_version,
            max_wire_version,
            max_message_size_bytes,
        };
    }

    pub fn get_min_wire_version(&self) -> WireVersion {
        return self.min_wire_version;
    }

    pub fn get_max_wire_version(&self) -> WireVersion {
        return self.max_wire_version;
    }

    pub fn get_max_message_size_bytes(&self) -> i32 {
        return self.max_message_size_bytes;
    }

    pub fn is_outdated(&self) -> bool {
        return self.max_wire_version.is_deprecated();
    }
}
