use crate::{normalize, Guid};

/// Device sub-type codes reported by the virtual fixed-layout API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtualSubtype {
    Gamepad,
    Wheel,
    ArcadeStick,
    FlightStick,
    DancePad,
    Guitar,
    DrumKit,
    Unknown(u8),
}

impl From<u8> for VirtualSubtype {
    fn from(code: u8) -> Self {
        match code {
            0x01 => Self::Gamepad,
            0x02 => Self::Wheel,
            0x03 => Self::ArcadeStick,
            0x04 => Self::FlightStick,
            0x05 => Self::DancePad,
            0x06 => Self::Guitar,
            0x08 => Self::DrumKit,
            other => Self::Unknown(other),
        }
    }
}

impl VirtualSubtype {
    fn code(self) -> u8 {
        match self {
            Self::Gamepad => 0x01,
            Self::Wheel => 0x02,
            Self::ArcadeStick => 0x03,
            Self::FlightStick => 0x04,
            Self::DancePad => 0x05,
            Self::Guitar => 0x06,
            Self::DrumKit => 0x08,
            // Unknown subtypes synthesize as a standard gamepad.
            Self::Unknown(_) => 0x01,
        }
    }
}

/// Synthesize the GUID an equivalent raw-device report would use for a
/// virtual-API device of the given sub-type.
///
/// Raw-device backends encode these devices as the ASCII string `xinput`
/// followed by the sub-type byte, zero padded. One-way: used to look up
/// override tables that were authored against raw-device GUIDs.
pub fn from_virtual_subtype(subtype: VirtualSubtype) -> Guid {
    // "xinput" = 78 69 6e 70 75 74
    normalize(&format!("78696e707574{:02x}000000000000000000", subtype.code()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamepad_subtype_guid() {
        let guid = from_virtual_subtype(VirtualSubtype::Gamepad);
        assert_eq!(&*guid, "78696e70757401000000000000000000");
    }

    #[test]
    fn unknown_subtype_falls_back_to_gamepad() {
        let unknown = from_virtual_subtype(VirtualSubtype::Unknown(0x7f));
        let gamepad = from_virtual_subtype(VirtualSubtype::Gamepad);
        assert_eq!(unknown, gamepad);
    }

    #[test]
    fn synthesized_guid_is_normalized() {
        let guid = from_virtual_subtype(VirtualSubtype::ArcadeStick);
        assert_eq!(guid, crate::normalize(&guid));
        assert_eq!(guid.len(), crate::GUID_HEX_LEN);
    }
}
