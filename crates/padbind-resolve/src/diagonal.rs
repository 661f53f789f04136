use padbind_db::AxisSign;

use crate::PhysicalInputDescriptor;

/// Compass directions for analog-stick-as-dpad emulation.
///
/// Diagonals are never sourced from the hat format (orthogonal masks
/// only); they are synthesized here from the stick's axis pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compass {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Compass {
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::NorthEast => "north-east",
            Self::East => "east",
            Self::SouthEast => "south-east",
            Self::South => "south",
            Self::SouthWest => "south-west",
            Self::West => "west",
            Self::NorthWest => "north-west",
        }
    }

    /// Axis threshold components: (horizontal sign, vertical sign).
    /// Negative vertical is up, matching axis conventions.
    fn components(self) -> (AxisSign, AxisSign) {
        match self {
            Self::North => (AxisSign::None, AxisSign::Negative),
            Self::NorthEast => (AxisSign::Positive, AxisSign::Negative),
            Self::East => (AxisSign::Positive, AxisSign::None),
            Self::SouthEast => (AxisSign::Positive, AxisSign::Positive),
            Self::South => (AxisSign::None, AxisSign::Positive),
            Self::SouthWest => (AxisSign::Negative, AxisSign::Positive),
            Self::West => (AxisSign::Negative, AxisSign::None),
            Self::NorthWest => (AxisSign::Negative, AxisSign::Negative),
        }
    }
}

/// The axis descriptors whose combined thresholds produce one compass
/// direction. Orthogonal directions use one axis, diagonals use both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompassAxes {
    pub horizontal: Option<PhysicalInputDescriptor>,
    pub vertical: Option<PhysicalInputDescriptor>,
}

/// Synthesize the descriptors for one compass direction from a stick's
/// axis pair.
pub fn analog_dpad_axes(x_id: u32, y_id: u32, direction: Compass) -> CompassAxes {
    let (h, v) = direction.components();
    CompassAxes {
        horizontal: (h != AxisSign::None)
            .then_some(PhysicalInputDescriptor::Axis { id: x_id, sign: h }),
        vertical: (v != AxisSign::None)
            .then_some(PhysicalInputDescriptor::Axis { id: y_id, sign: v }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orthogonal_directions_use_one_axis() {
        let north = analog_dpad_axes(0, 1, Compass::North);
        assert_eq!(north.horizontal, None);
        assert_eq!(
            north.vertical,
            Some(PhysicalInputDescriptor::Axis { id: 1, sign: AxisSign::Negative })
        );

        let west = analog_dpad_axes(0, 1, Compass::West);
        assert_eq!(
            west.horizontal,
            Some(PhysicalInputDescriptor::Axis { id: 0, sign: AxisSign::Negative })
        );
        assert_eq!(west.vertical, None);
    }

    #[test]
    fn diagonals_combine_both_axes() {
        let ne = analog_dpad_axes(0, 1, Compass::NorthEast);
        assert_eq!(
            ne.horizontal,
            Some(PhysicalInputDescriptor::Axis { id: 0, sign: AxisSign::Positive })
        );
        assert_eq!(
            ne.vertical,
            Some(PhysicalInputDescriptor::Axis { id: 1, sign: AxisSign::Negative })
        );
    }

    #[test]
    fn every_direction_has_at_least_one_component() {
        for direction in Compass::ALL {
            let axes = analog_dpad_axes(2, 3, direction);
            assert!(axes.horizontal.is_some() || axes.vertical.is_some());
        }
    }
}
