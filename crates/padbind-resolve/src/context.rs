use ahash::AHashSet;

use padbind_guid::{
    from_virtual_subtype, normalize, target_index, Guid, VirtualSubtype,
};
use padbind_overrides::Console;

/// Which device-access model enumerated the pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessApi {
    /// Fixed-layout virtual-controller API (XInput-class).
    VirtualFixedLayout,
    /// Arbitrary per-device low-level API.
    RawDevice,
}

/// Identity of a physical pad for the session.
///
/// Created when the host enumerates devices; immutable afterwards. Never
/// owns the resolution tables.
#[derive(Debug, Clone)]
pub struct PadIdentity {
    /// Normalized at construction; lookups are GUID-exact.
    pub guid: Guid,
    pub api: AccessApi,
    /// Device subtype reported by the virtual-controller API, when known.
    /// Lets a virtual pad match tables authored against raw-device GUIDs.
    pub subtype: Option<VirtualSubtype>,
    pub raw_index: u32,
    pub buttons: u32,
    pub axes: u32,
    pub hats: u32,
    pub vendor_id: u16,
    pub product_id: u16,
}

impl PadIdentity {
    pub fn new(raw_guid: &str, api: AccessApi, raw_index: u32) -> Self {
        Self {
            guid: normalize(raw_guid),
            api,
            subtype: None,
            raw_index,
            buttons: 0,
            axes: 0,
            hats: 0,
            vendor_id: 0,
            product_id: 0,
        }
    }

    /// GUID this pad would report on the raw-device API, synthesized from
    /// the virtual subtype. Used as a secondary lookup key so tables
    /// authored for the raw form also cover virtual-API pads.
    pub fn synthesized_guid(&self) -> Option<Guid> {
        if self.api != AccessApi::VirtualFixedLayout {
            return None;
        }
        self.subtype.map(from_virtual_subtype)
    }

    /// Target-facing device index. Raw-device indices are offset past the
    /// virtual devices already claimed; virtual indices pass through.
    pub fn target_index(&self, ctx: &ResolutionContext) -> u32 {
        match self.api {
            AccessApi::VirtualFixedLayout => self.raw_index,
            AccessApi::RawDevice => {
                target_index(self.raw_index, ctx.virtual_count)
            }
        }
    }
}

/// User-facing options read at the start of a configuration run.
#[derive(Debug, Clone, Default)]
pub struct UserOptions {
    /// Per-console opt-ins for console-accurate special-pad mappings.
    pub activation_switches: AHashSet<Console>,
    /// Prefer analog-stick-as-dpad directional entries where offered.
    pub analog_dpad: bool,
    /// Arcade-stick mode: enables the arcade-stick override table.
    pub arcade_stick: bool,
    /// Overrides the backend driver name for the whole session.
    pub forced_driver: Option<Box<str>>,
}

impl UserOptions {
    pub fn activation_enabled(&self, console: Console) -> bool {
        self.activation_switches.contains(&console)
    }
}

/// Ephemeral per-run state for the resolution pipeline.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    /// Active console identifier (e.g. "n64", "snes").
    pub console_id: Box<str>,
    /// Count of virtual-API devices already enumerated.
    pub virtual_count: u32,
    pub options: UserOptions,
    active_driver: Box<str>,
    hotkeys_applied: bool,
}

impl ResolutionContext {
    pub fn new(console_id: &str, driver: &str, options: UserOptions) -> Self {
        let active_driver = options
            .forced_driver
            .clone()
            .unwrap_or_else(|| driver.into());
        Self {
            console_id: console_id.into(),
            virtual_count: 0,
            options,
            active_driver,
            hotkeys_applied: false,
        }
    }

    /// The console family with a dedicated override table, if any.
    pub fn special_console(&self) -> Option<Console> {
        Console::parse(&self.console_id)
    }

    pub fn active_driver(&self) -> &str {
        &self.active_driver
    }

    /// Switch the backend driver for the remainder of the session.
    /// Affects subsequent lookups, never prior ones.
    pub(crate) fn switch_driver(&mut self, driver: &str) {
        self.active_driver = driver.into();
    }

    /// Hotkey mappings apply once globally: the first caller wins.
    pub(crate) fn claim_hotkeys(&mut self) -> bool {
        !std::mem::replace(&mut self.hotkeys_applied, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_identity_normalizes_guid() {
        let pad = PadIdentity::new(
            "030000005E0400008E02000000007801",
            AccessApi::RawDevice,
            0,
        );
        assert_eq!(&*pad.guid, "030000005e0400008e02000000000000");
    }

    #[test]
    fn synthesized_guid_requires_the_virtual_api() {
        let mut pad = PadIdentity::new(
            "78696e70757401000000000000000000",
            AccessApi::VirtualFixedLayout,
            0,
        );
        assert_eq!(pad.synthesized_guid(), None);

        pad.subtype = Some(VirtualSubtype::ArcadeStick);
        assert_eq!(
            pad.synthesized_guid().as_deref(),
            Some("78696e70757403000000000000000000")
        );

        let mut raw = PadIdentity::new("0300", AccessApi::RawDevice, 0);
        raw.subtype = Some(VirtualSubtype::ArcadeStick);
        assert_eq!(raw.synthesized_guid(), None);
    }

    #[test]
    fn raw_device_index_is_offset() {
        let mut ctx = ResolutionContext::new("snes", "sdl2", UserOptions::default());
        ctx.virtual_count = 2;

        let raw = PadIdentity::new("0300", AccessApi::RawDevice, 1);
        assert_eq!(raw.target_index(&ctx), 3);

        let virt = PadIdentity::new("0300", AccessApi::VirtualFixedLayout, 1);
        assert_eq!(virt.target_index(&ctx), 1);
    }

    #[test]
    fn forced_driver_wins() {
        let options = UserOptions {
            forced_driver: Some("dinput".into()),
            ..Default::default()
        };
        let ctx = ResolutionContext::new("n64", "sdl2", options);
        assert_eq!(ctx.active_driver(), "dinput");
    }

    #[test]
    fn hotkeys_claimed_once() {
        let mut ctx = ResolutionContext::new("n64", "sdl2", UserOptions::default());
        assert!(ctx.claim_hotkeys());
        assert!(!ctx.claim_hotkeys());
    }
}
