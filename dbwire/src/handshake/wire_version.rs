use std::fmt::{Display, Formatter};

/// Protocol revision a server advertises during the handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WireVersion(pub i32);

impl WireVersion {
    pub const SERVER_3_4: WireVersion = WireVersion(5);
    pub const SERVER_3_6: WireVersion = WireVersion(6);
    pub const SERVER_4_0: WireVersion = WireVersion(7);
    pub const SERVER_4_2: WireVersion = WireVersion(8);
    pub const SERVER_4_4: WireVersion = WireVersion(9);
    pub const SERVER_5_0: WireVersion = WireVersion(13);
    pub const SERVER_6_0: WireVersion = WireVersion(17);
    pub const SERVER_7_0: WireVersion = WireVersion(21);

    pub const MINIMUM_SUPPORTED: WireVersion = WireVersion::SERVER_3_6;

    pub fn is_deprecated(&self) -> bool {
        return *self < WireVersion::MINIMUM_SUPPORTED;
    }

    pub fn supports(&self, required: WireVersion) -> bool {
        return *self >= required;
    }
}

impl Display for WireVersion {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "wire version {}", self.0)
    }
}
