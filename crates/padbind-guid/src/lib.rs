mod subtype;

pub use subtype::{from_virtual_subtype, VirtualSubtype};

/// A normalized controller hardware GUID.
pub type Guid = Box<str>;

/// Length of a full GUID in hex digits.
pub const GUID_HEX_LEN: usize = 32;

/// Number of trailing hex digits occupied by the CRC-16/version field.
/// Some enumeration backends fill them, others leave them zero, so they
/// must not take part in identity comparison.
const TRAILER_HEX_LEN: usize = 4;

/// Canonicalize a raw hardware GUID.
///
/// Lowercases, strips separators and zeroes the trailing CRC-16/version
/// bytes so that the same physical pad reports identically regardless of
/// which device-enumeration API or library version produced the GUID.
///
/// Inputs shorter than a full GUID are passed through (lowercased)
/// unchanged. Idempotent.
pub fn normalize(raw: &str) -> Guid {
    let mut hex: String = raw
        .chars()
        .filter(|c| c.is_ascii_hexdigit())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if hex.len() < GUID_HEX_LEN {
        return hex.into();
    }

    hex.truncate(GUID_HEX_LEN);
    hex.replace_range(GUID_HEX_LEN - TRAILER_HEX_LEN.., "0000");
    hex.into()
}

/// Offset a raw-device index into the target-facing index space.
///
/// When a process enumerates both the virtual fixed-layout API and the
/// raw-device API, the two number their devices independently from zero.
/// Raw-device indices are shifted past the virtual devices already claimed.
#[inline]
pub fn target_index(raw_index: u32, virtual_count: u32) -> u32 {
    raw_index + virtual_count
}
