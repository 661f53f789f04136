use std::path::Path;

use ahash::AHashMap;
use log::{debug, warn};
use smallvec::SmallVec;

use padbind_guid::{normalize, Guid};

use crate::{RawDirective, SemanticInput};

/// Decoded mapping for one physical pad model.
#[derive(Debug, Clone)]
pub struct PadMapping {
    pub name: Box<str>,
    pub platform: Option<Box<str>>,
    pub directives: AHashMap<SemanticInput, RawDirective>,
}

impl PadMapping {
    pub fn directive(&self, input: SemanticInput) -> Option<RawDirective> {
        self.directives.get(&input).copied()
    }
}

/// Counters reported by a database parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub models: usize,
    pub skipped_lines: usize,
    pub skipped_directives: usize,
    pub duplicate_guids: usize,
}

/// The community mapping database: normalized GUID -> pad mapping.
///
/// Built once per database file at load time, read-only afterward.
#[derive(Debug, Clone, Default)]
pub struct MappingDb {
    pads: AHashMap<Guid, PadMapping>,
}

impl MappingDb {
    /// Parse a database file's contents. Malformed lines are skipped with
    /// a log entry; parsing itself never fails.
    pub fn parse(input: &str) -> Self {
        Self::parse_report(input).0
    }

    /// Like [`MappingDb::parse`], also reporting what was skipped.
    pub fn parse_report(input: &str) -> (Self, ParseReport) {
        let mut pads = AHashMap::new();
        let mut report = ParseReport::default();

        for (number, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_line(line, &mut report) {
                Some((guid, mapping)) => {
                    // Duplicate GUIDs overwrite (last wins) and are not
                    // counted twice.
                    if pads.insert(guid, mapping).is_some() {
                        report.duplicate_guids += 1;
                    } else {
                        report.models += 1;
                    }
                }
                None => {
                    warn!("mapping db: skipping malformed line {}", number + 1);
                    report.skipped_lines += 1;
                }
            }
        }

        (Self { pads }, report)
    }

    /// Load a database file. A missing or unreadable file degrades to an
    /// empty database with a single log entry.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(input) => Self::parse(&input),
            Err(err) => {
                warn!("mapping db: cannot read {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Look up a pad model by GUID. Exact match after normalization;
    /// an absent GUID is a normal negative result.
    pub fn lookup(&self, guid: &str) -> Option<&PadMapping> {
        self.pads.get(&*normalize(guid))
    }

    pub fn len(&self) -> usize {
        self.pads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pads.is_empty()
    }
}

/// Parse one `GUID,Name,key:value,...,platform:X` line.
fn parse_line(line: &str, report: &mut ParseReport) -> Option<(Guid, PadMapping)> {
    let fields: SmallVec<[&str; 24]> = line.split(',').collect();
    let (&raw_guid, &name) = (fields.first()?, fields.get(1)?);
    if raw_guid.is_empty() || !raw_guid.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let mut directives = AHashMap::new();
    let mut platform = None;

    for field in &fields[2..] {
        let Some((key, value)) = field.split_once(':') else {
            // Trailing comma or stray field; tolerated.
            continue;
        };
        if key == "platform" {
            platform = Some(value.into());
            continue;
        }
        let Some(input) = SemanticInput::parse(key) else {
            debug!("mapping db: unknown key \"{key}\" for {name}");
            continue;
        };
        match value.parse::<RawDirective>() {
            Ok(directive) => {
                directives.insert(input, directive);
            }
            Err(err) => {
                warn!("mapping db: {name}: {key}: {err}");
                report.skipped_directives += 1;
            }
        }
    }

    let mapping = PadMapping { name: name.into(), platform, directives };
    Some((normalize(raw_guid), mapping))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AxisSign, HatDirection};

    const XBOX_360: &str = "030000005e0400008e02000000007801";

    fn sample_db() -> &'static str {
        "\
# Community mapping database sample
030000005e0400008e02000000007801,Xbox 360 Controller,a:b0,b:b1,x:b2,y:b3,back:b6,start:b7,leftshoulder:b4,rightshoulder:b5,leftstick:b9,rightstick:b10,dpup:h0.1,dpdown:h0.4,dpleft:h0.8,dpright:h0.2,leftx:a0,lefty:a1,rightx:a3,righty:a4,lefttrigger:a2,righttrigger:a5,platform:Linux

03000000d62000001197000000000000,Retrolink N64,a:b1,b:b2,start:b8,leftx:a0,lefty:a1,lefttrigger:-a3,righttrigger:+a3,platform:Windows
"
    }

    #[test]
    fn parses_and_looks_up_by_normalized_guid() {
        let db = MappingDb::parse(sample_db());
        assert_eq!(db.len(), 2);

        let pad = db.lookup(XBOX_360).expect("known pad");
        assert_eq!(&*pad.name, "Xbox 360 Controller");
        assert_eq!(pad.platform.as_deref(), Some("Linux"));
        assert_eq!(
            pad.directive(SemanticInput::A),
            Some(RawDirective::Button { id: 0 })
        );
        assert_eq!(
            pad.directive(SemanticInput::DpDown),
            Some(RawDirective::Hat { id: 0, direction: HatDirection::Down })
        );

        // Same pad with the CRC field filled resolves to the same entry.
        let uppercase = "030000005E0400008E02000000007801";
        assert!(db.lookup(uppercase).is_some());
    }

    #[test]
    fn absent_guid_is_a_negative_not_an_error() {
        let db = MappingDb::parse(sample_db());
        assert!(db.lookup("03000000ffffffffffff000000000000").is_none());
    }

    #[test]
    fn forced_polarity_pair_differs_only_in_sign() {
        let db = MappingDb::parse(sample_db());
        let pad = db.lookup("03000000d62000001197000000000000").unwrap();
        assert_eq!(
            pad.directive(SemanticInput::LeftTrigger),
            Some(RawDirective::Axis { id: 3, sign: AxisSign::Negative })
        );
        assert_eq!(
            pad.directive(SemanticInput::RightTrigger),
            Some(RawDirective::Axis { id: 3, sign: AxisSign::Positive })
        );
    }

    #[test]
    fn parse_is_line_order_independent() {
        let shuffled: String =
            sample_db().lines().rev().collect::<Vec<_>>().join("\n");
        let forward = MappingDb::parse(sample_db());
        let backward = MappingDb::parse(&shuffled);
        assert_eq!(forward.len(), backward.len());
        for guid in [XBOX_360, "03000000d62000001197000000000000"] {
            let a = forward.lookup(guid).unwrap();
            let b = backward.lookup(guid).unwrap();
            assert_eq!(a.directives, b.directives);
        }
    }

    #[test]
    fn malformed_lines_and_directives_are_skipped() {
        let input = "\
not-a-guid,Broken Pad,a:b0
03000000aa00000001000000000000000,Half Good,a:b0,b:q9,dpup:h0.16
";
        let (db, report) = MappingDb::parse_report(input);
        assert_eq!(report.skipped_lines, 1);
        assert_eq!(report.skipped_directives, 2);
        assert_eq!(db.len(), 1);

        let pad = db.lookup("03000000aa0000000100000000000000").unwrap();
        assert_eq!(
            pad.directive(SemanticInput::A),
            Some(RawDirective::Button { id: 0 })
        );
        // The bad hat mask decodes to nothing, not a crash.
        assert_eq!(pad.directive(SemanticInput::DpUp), None);
    }

    #[test]
    fn multibyte_directive_is_skipped_not_fatal() {
        let input = "\
030000005e0400008e02000000007801,Accented Pad,a:é2,b:b1
03000000d62000001197000000000000,Good Pad,a:b0
";
        let (db, report) = MappingDb::parse_report(input);
        assert_eq!(db.len(), 2);
        assert_eq!(report.skipped_directives, 1);

        let pad = db.lookup(XBOX_360).unwrap();
        assert_eq!(pad.directive(SemanticInput::A), None);
        assert_eq!(
            pad.directive(SemanticInput::B),
            Some(RawDirective::Button { id: 1 })
        );
    }

    #[test]
    fn duplicate_guids_keep_last_and_count_once() {
        let input = "\
030000005e0400008e02000000007801,First,a:b0
030000005e0400008e02000000007801,Second,a:b4
";
        let (db, report) = MappingDb::parse_report(input);
        assert_eq!(db.len(), 1);
        assert_eq!(report.models, db.len());
        assert_eq!(report.duplicate_guids, 1);

        let pad = db.lookup(XBOX_360).unwrap();
        assert_eq!(&*pad.name, "Second");
        assert_eq!(
            pad.directive(SemanticInput::A),
            Some(RawDirective::Button { id: 4 })
        );
    }

    #[test]
    fn tolerates_missing_platform_and_blank_lines() {
        let input = "\n030000005e0400008e02000000007801,Pad,a:b0\n\n";
        let db = MappingDb::parse(input);
        let pad = db.lookup(XBOX_360).unwrap();
        assert!(pad.platform.is_none());
    }
}
