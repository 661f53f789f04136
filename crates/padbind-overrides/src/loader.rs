use std::path::Path;

use ahash::AHashMap;
use log::warn;
use serde::Deserialize;

use padbind_guid::normalize;

use crate::{ControllerFlags, OverrideEntry, OverrideError};

/// Console families with dedicated special-pad override tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Console {
    N64,
    Megadrive,
    GameCube,
    Saturn,
    ThreeDO,
}

impl Console {
    pub const ALL: [Self; 5] = [
        Self::N64,
        Self::Megadrive,
        Self::GameCube,
        Self::Saturn,
        Self::ThreeDO,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::N64 => "n64",
            Self::Megadrive => "megadrive",
            Self::GameCube => "gamecube",
            Self::Saturn => "saturn",
            Self::ThreeDO => "3do",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Some(match name.to_ascii_lowercase().as_str() {
            "n64" => Self::N64,
            "megadrive" | "md" | "genesis" => Self::Megadrive,
            "gamecube" | "gc" => Self::GameCube,
            "saturn" => Self::Saturn,
            "3do" => Self::ThreeDO,
            _ => return None,
        })
    }

    /// Conventional file name of the console's override table.
    pub fn file_name(self) -> String {
        format!("{}Controllers.json", self.as_str())
    }
}

/// Where an override table came from. Determines its precedence rank and
/// log context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideSource {
    /// User-authored custom table, highest precedence.
    User,
    /// Applies only when arcade-stick mode is active.
    ArcadeStick,
    /// Console-specific special-pad table.
    Console(Console),
}

impl OverrideSource {
    fn label(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::ArcadeStick => "arcade-stick",
            Self::Console(console) => console.as_str(),
        }
    }
}

/// Wire format of one override record. PascalCase keys as authored by the
/// community; all ControllerInfo values are strings.
#[derive(Debug, Deserialize)]
struct RawOverrideEntry {
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Guid", default)]
    guid: Option<String>,
    #[serde(rename = "Driver", default)]
    driver: Option<String>,
    #[serde(rename = "Mapping", default)]
    mapping: AHashMap<String, String>,
    #[serde(rename = "HotKeyMapping", default)]
    hotkeys: Option<AHashMap<String, String>>,
    #[serde(rename = "ControllerInfo", default)]
    info: Option<AHashMap<String, String>>,
}

/// One loaded override table. Immutable after load.
#[derive(Debug, Clone)]
pub struct OverrideDb {
    source: OverrideSource,
    entries: Vec<OverrideEntry>,
}

impl OverrideDb {
    pub fn empty(source: OverrideSource) -> Self {
        Self { source, entries: Vec::new() }
    }

    /// Parse a JSON override document. A record without a Guid is skipped
    /// with entry context; a malformed document is an error the caller
    /// downgrades to an empty table.
    pub fn parse(source: OverrideSource, json: &str) -> Result<Self, OverrideError> {
        let raw: Vec<RawOverrideEntry> = serde_json::from_str(json)?;
        let mut entries = Vec::with_capacity(raw.len());

        for (index, record) in raw.into_iter().enumerate() {
            let Some(guid) = record.guid.as_deref().filter(|g| !g.is_empty()) else {
                warn!(
                    "{} overrides: entry {index} has no Guid, skipping",
                    source.label()
                );
                continue;
            };
            entries.push(OverrideEntry {
                name: record.name.unwrap_or_default().into(),
                guid: normalize(guid),
                driver: record.driver.unwrap_or_default().into(),
                mapping: record
                    .mapping
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
                hotkeys: record
                    .hotkeys
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
                info: ControllerFlags::from_raw(record.info.unwrap_or_default()),
            });
        }

        Ok(Self { source, entries })
    }

    /// Load an override table from disk. Missing or malformed files
    /// degrade to an empty table with a single log entry.
    pub fn load(source: OverrideSource, path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                warn!(
                    "{} overrides: cannot read {}: {err}",
                    source.label(),
                    path.display()
                );
                return Self::empty(source);
            }
        };
        match Self::parse(source, &json) {
            Ok(db) => db,
            Err(err) => {
                warn!("{} overrides: {}: {err}", source.label(), path.display());
                Self::empty(source)
            }
        }
    }

    pub fn source(&self) -> OverrideSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry matching (normalized GUID, driver).
    ///
    /// An entry flagged `needActivationSwitch` is invisible unless
    /// `activation_enabled` is set: mapping presence never implies
    /// activation, so lookup behaves exactly as if the entry were absent.
    pub fn lookup(
        &self,
        guid: &str,
        driver: &str,
        activation_enabled: bool,
    ) -> Option<&OverrideEntry> {
        let guid = normalize(guid);
        self.entries
            .iter()
            .filter(|e| activation_enabled || !e.info.need_activation_switch)
            .find(|e| e.matches(&guid, driver))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N64_PAD: &str = "03000000d62000001197000000000000";

    fn sample_json() -> &'static str {
        r#"[
          {
            "Name": "Retrolink N64",
            "Guid": "03000000D62000001197000000000000",
            "Driver": "sdl2",
            "Mapping": { "a": "b1", "b": "b2", "start": "b8" },
            "HotKeyMapping": { "hk_exit": "b8" },
            "ControllerInfo": { "needActivationSwitch": "true" }
          },
          {
            "Name": "Retrolink N64 (dinput)",
            "Guid": "03000000d62000001197000000000000",
            "Driver": "dinput",
            "Mapping": { "a": "b2" },
            "HotKeyMapping": null,
            "ControllerInfo": null
          },
          {
            "Name": "Any Driver Pad",
            "Guid": "030000007900000006000000000000000",
            "Mapping": { "a": "b3" }
          }
        ]"#
    }

    fn db() -> OverrideDb {
        OverrideDb::parse(OverrideSource::Console(Console::N64), sample_json())
            .expect("parse overrides")
    }

    #[test]
    fn lookup_is_keyed_by_guid_and_driver() {
        let db = db();
        let entry = db.lookup(N64_PAD, "dinput", false).expect("dinput entry");
        assert_eq!(&*entry.name, "Retrolink N64 (dinput)");
        assert_eq!(entry.mapping.get("a").map(|v| &**v), Some("b2"));
    }

    #[test]
    fn gated_entry_is_invisible_without_the_switch() {
        let db = db();
        // The sdl2 entry needs the activation switch.
        assert!(db.lookup(N64_PAD, "sdl2", false).is_none());

        let entry = db.lookup(N64_PAD, "sdl2", true).expect("gated entry");
        assert!(entry.info.need_activation_switch);
        assert_eq!(entry.hotkeys.get("hk_exit").map(|v| &**v), Some("b8"));
    }

    #[test]
    fn empty_driver_matches_any() {
        let db = db();
        let guid = "03000000790000000600000000000000";
        assert!(db.lookup(guid, "sdl2", false).is_some());
        assert!(db.lookup(guid, "dinput", false).is_some());
    }

    #[test]
    fn entry_without_guid_is_skipped() {
        let json = r#"[ { "Name": "No Guid", "Mapping": { "a": "b0" } } ]"#;
        let db = OverrideDb::parse(OverrideSource::User, json).unwrap();
        assert!(db.is_empty());
    }

    #[test]
    fn malformed_document_degrades_to_empty_on_load() {
        let db = OverrideDb::load(
            OverrideSource::User,
            Path::new("/nonexistent/overrides.json"),
        );
        assert!(db.is_empty());
    }

    #[test]
    fn console_file_names() {
        assert_eq!(Console::N64.file_name(), "n64Controllers.json");
        assert_eq!(Console::Megadrive.file_name(), "megadriveControllers.json");
        assert_eq!(Console::parse("genesis"), Some(Console::Megadrive));
        assert_eq!(Console::parse("unknown"), None);
    }
}
