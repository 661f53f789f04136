use padbind_db::{AxisSign, RawDirective, SemanticInput};

use crate::{AccessApi, PadIdentity, PhysicalInputDescriptor};

/// Button ids that report differently under the virtual fixed-layout API:
/// Start/Back and the thumbstick clicks.
const VIRTUAL_ID_SWAPS: [(u32, u32); 2] = [(6, 7), (8, 9)];

fn swap_virtual_button_id(id: u32) -> u32 {
    for (a, b) in VIRTUAL_ID_SWAPS {
        if id == a {
            return b;
        }
        if id == b {
            return a;
        }
    }
    id
}

fn is_left_trigger(input: SemanticInput) -> bool {
    matches!(
        input,
        SemanticInput::LeftTrigger | SemanticInput::LeftTriggerButton
    )
}

fn is_swap_candidate(input: SemanticInput) -> bool {
    matches!(
        input,
        SemanticInput::Back
            | SemanticInput::Start
            | SemanticInput::LeftStick
            | SemanticInput::RightStick
    )
}

/// Correct a decoded directive for the pad's access API.
///
/// Returns the corrected descriptor and, for triggers sharing one
/// bidirectional axis, a cancel descriptor for the unused polarity so
/// serializers can null the opposite direction.
pub(crate) fn reconcile(
    directive: RawDirective,
    input: SemanticInput,
    opposite_trigger: Option<RawDirective>,
    pad: &PadIdentity,
) -> (PhysicalInputDescriptor, Option<PhysicalInputDescriptor>) {
    // Start/Back and L3/R3 ids swap under the virtual fixed-layout API.
    if pad.api == AccessApi::VirtualFixedLayout && is_swap_candidate(input) {
        if let RawDirective::Button { id } = directive {
            let swapped = swap_virtual_button_id(id);
            return (PhysicalInputDescriptor::Button { id: swapped }, None);
        }
    }

    // Shared-axis triggers: both triggers decode to one axis id with
    // opposite polarities.
    if input.is_trigger() {
        if let RawDirective::Axis { id, sign } = directive {
            let shared = matches!(
                opposite_trigger,
                Some(RawDirective::Axis { id: other, .. }) if other == id
            );
            if shared {
                let sign = match sign {
                    AxisSign::None => {
                        if is_left_trigger(input) {
                            AxisSign::Positive
                        } else {
                            AxisSign::Negative
                        }
                    }
                    explicit => explicit,
                };
                let cancel_sign = match sign {
                    AxisSign::Positive => AxisSign::Negative,
                    _ => AxisSign::Positive,
                };
                return (
                    PhysicalInputDescriptor::Axis { id, sign },
                    Some(PhysicalInputDescriptor::Axis { id, sign: cancel_sign }),
                );
            }
        }
    }

    (directive.into(), None)
}
