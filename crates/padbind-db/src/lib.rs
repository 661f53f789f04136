mod db;
mod directive;
mod semantic;

use thiserror::Error;

pub use db::{MappingDb, PadMapping, ParseReport};
pub use directive::{AxisSign, HatDirection, RawDirective};
pub use semantic::SemanticInput;

/// Error type for decoding a single mapping directive.
///
/// Directive errors are always local: the surrounding line or entry keeps
/// its remaining directives, and the affected input resolves as unmapped.
#[derive(Debug, Error)]
pub enum DirectiveError {
    #[error("empty directive")]
    Empty,
    #[error("invalid input id: {0}")]
    InvalidId(String),
    #[error("hat mask out of range: {0}")]
    InvalidHatMask(u32),
    #[error("malformed hat directive: {0}")]
    MalformedHat(String),
    #[error("sign prefix is only valid on axes: {0}")]
    SignOnNonAxis(String),
    #[error("unknown directive: {0}")]
    UnknownToken(String),
}
