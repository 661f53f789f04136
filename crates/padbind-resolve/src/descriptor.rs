use std::fmt;

use padbind_db::{AxisSign, HatDirection, RawDirective};

/// The resolved answer for one logical input: the only value the
/// per-emulator serializers consume.
///
/// The variant determines which fields are meaningful; a descriptor never
/// carries both an axis sign and a hat direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhysicalInputDescriptor {
    Button { id: u32 },
    Axis { id: u32, sign: AxisSign },
    Hat { id: u32, direction: HatDirection },
    #[default]
    Unmapped,
}

impl PhysicalInputDescriptor {
    pub fn is_mapped(self) -> bool {
        self != Self::Unmapped
    }
}

impl From<RawDirective> for PhysicalInputDescriptor {
    fn from(directive: RawDirective) -> Self {
        match directive {
            RawDirective::Button { id } => Self::Button { id },
            RawDirective::Axis { id, sign } => Self::Axis { id, sign },
            RawDirective::Hat { id, direction } => Self::Hat { id, direction },
        }
    }
}

impl fmt::Display for PhysicalInputDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Button { id } => write!(f, "button {id}"),
            Self::Axis { id, sign } => {
                let sign = match sign {
                    AxisSign::None => "",
                    AxisSign::Positive => "+",
                    AxisSign::Negative => "-",
                };
                write!(f, "axis {sign}{id}")
            }
            Self::Hat { id, direction } => {
                let direction = match direction {
                    HatDirection::Up => "up",
                    HatDirection::Right => "right",
                    HatDirection::Down => "down",
                    HatDirection::Left => "left",
                };
                write!(f, "hat {id} {direction}")
            }
            Self::Unmapped => write!(f, "unmapped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_conversion_is_total() {
        let cases = [
            (RawDirective::Button { id: 3 }, "button 3"),
            (
                RawDirective::Axis { id: 2, sign: AxisSign::Negative },
                "axis -2",
            ),
            (
                RawDirective::Hat { id: 0, direction: HatDirection::Down },
                "hat 0 down",
            ),
        ];
        for (directive, display) in cases {
            let descriptor = PhysicalInputDescriptor::from(directive);
            assert!(descriptor.is_mapped());
            assert_eq!(descriptor.to_string(), display);
        }
        assert_eq!(PhysicalInputDescriptor::Unmapped.to_string(), "unmapped");
    }
}
