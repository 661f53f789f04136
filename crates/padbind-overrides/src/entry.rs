use ahash::AHashMap;

use padbind_guid::Guid;

/// Directional keys sourced from a digital d-pad.
pub const DIGITAL_DPAD_KEYS: [&str; 4] = ["dpup", "dpdown", "dpleft", "dpright"];

/// Directional keys sourced from analog-stick-as-dpad emulation.
/// Mutually exclusive with [`DIGITAL_DPAD_KEYS`]: whichever set is unused
/// must be omitted entirely, never zero-filled.
pub const ANALOG_DPAD_KEYS: [&str; 4] =
    ["leftanalogup", "leftanalogdown", "leftanalogleft", "leftanalogright"];

/// Which of the two parallel mapping layers to read.
///
/// Entries flagged `mapping2` describe pads with a physical mode switch;
/// secondary-layer keys carry a trailing `2` in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MappingLayer {
    #[default]
    Primary,
    Secondary,
}

/// Metadata flags attached to an override entry.
///
/// All values arrive as strings in the source document; boolean flags
/// accept `true`/`1`/`yes`, case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct ControllerFlags {
    /// The entry only applies when the per-console user switch is on.
    pub need_activation_switch: bool,
    /// Directional entries come from analog-stick-as-dpad emulation.
    pub analog_dpad: bool,
    /// The mapping carries a secondary layer (physical mode switch).
    pub mapping2: bool,
    /// Switches the session's active driver for subsequent lookups.
    pub joypad_driver: Option<Box<str>>,
    pub analog_sensitivity: Option<Box<str>>,
    /// Flags this core does not interpret, passed through to serializers.
    pub extra: AHashMap<Box<str>, Box<str>>,
}

impl ControllerFlags {
    pub(crate) fn from_raw(raw: AHashMap<String, String>) -> Self {
        let mut flags = Self::default();
        for (key, value) in raw {
            match key.as_str() {
                "needActivationSwitch" => {
                    flags.need_activation_switch = parse_flag(&value);
                }
                "analogDpad" => flags.analog_dpad = parse_flag(&value),
                "mapping2" => flags.mapping2 = parse_flag(&value),
                "input_joypad_driver" => {
                    flags.joypad_driver = Some(value.into());
                }
                "input_analog_sensitivity" => {
                    flags.analog_sensitivity = Some(value.into());
                }
                _ => {
                    flags.extra.insert(key.into(), value.into());
                }
            }
        }
        flags
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

/// One override record: a pad model under a specific backend driver.
#[derive(Debug, Clone)]
pub struct OverrideEntry {
    pub name: Box<str>,
    /// Normalized at load time; lookups are GUID-exact.
    pub guid: Guid,
    /// Empty string matches any driver.
    pub driver: Box<str>,
    pub mapping: AHashMap<Box<str>, Box<str>>,
    /// Applied once globally (first controller), not per player.
    pub hotkeys: AHashMap<Box<str>, Box<str>>,
    pub info: ControllerFlags,
}

impl OverrideEntry {
    pub(crate) fn matches(&self, guid: &str, driver: &str) -> bool {
        if &*self.guid != guid {
            return false;
        }
        self.driver.is_empty() || self.driver.eq_ignore_ascii_case(driver)
    }

    /// Raw directive string for a key in the given layer.
    ///
    /// Secondary-layer reads fall back to the key's suffixed form only;
    /// a missing secondary key means the key is absent in that layer.
    pub fn directive(&self, key: &str, layer: MappingLayer) -> Option<&str> {
        match layer {
            MappingLayer::Primary => self.mapping.get(key).map(|v| &**v),
            MappingLayer::Secondary => {
                if !self.info.mapping2 {
                    return None;
                }
                self.mapping.get(&*format!("{key}2")).map(|v| &**v)
            }
        }
    }

    /// Directional entries for the chosen representation.
    ///
    /// When the entry is flagged `analogDpad` and the caller asked for the
    /// analog set, only analog keys are yielded; otherwise only digital
    /// keys. The unused set is omitted, not zero-filled.
    pub fn directional_entries(
        &self,
        use_analog: bool,
    ) -> impl Iterator<Item = (&str, &str)> {
        let keys: &[&str; 4] = if use_analog && self.info.analog_dpad {
            &ANALOG_DPAD_KEYS
        } else {
            &DIGITAL_DPAD_KEYS
        };
        keys.iter().filter_map(|key| {
            self.mapping.get(*key).map(|v| (*key, &**v))
        })
    }
}
