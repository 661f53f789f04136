mod entry;
mod loader;

use thiserror::Error;

pub use entry::{
    ControllerFlags, MappingLayer, OverrideEntry, ANALOG_DPAD_KEYS,
    DIGITAL_DPAD_KEYS,
};
pub use loader::{Console, OverrideDb, OverrideSource};

/// Error type for loading an override database.
///
/// Callers that load eagerly at startup treat any of these as "no table":
/// the affected source degrades to the next one in the precedence chain.
#[derive(Debug, Error)]
pub enum OverrideError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
