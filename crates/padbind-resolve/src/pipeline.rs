use ahash::AHashMap;
use log::{debug, warn};

use padbind_db::{AxisSign, HatDirection, RawDirective, SemanticInput};
use padbind_overrides::{MappingLayer, OverrideDb, OverrideEntry};

use crate::diagonal::{analog_dpad_axes, Compass, CompassAxes};
use crate::reconcile::reconcile;
use crate::{
    AccessApi, MappingRegistry, PadIdentity, PhysicalInputDescriptor,
    ResolutionContext,
};

/// The answer for one (pad, logical input) query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub input: PhysicalInputDescriptor,
    /// For triggers sharing one bidirectional axis: the unused polarity,
    /// to be written as a cancel entry by the serializer.
    pub cancel: Option<PhysicalInputDescriptor>,
}

impl Resolution {
    fn unmapped() -> Self {
        Self { input: PhysicalInputDescriptor::Unmapped, cancel: None }
    }

    fn of(input: PhysicalInputDescriptor, cancel: Option<PhysicalInputDescriptor>) -> Self {
        Self { input, cancel }
    }
}

/// The resolution pipeline: a decision table over the loaded registry.
///
/// No state persists across queries except the immutable tables and the
/// session-wide active driver carried by the context.
pub struct Resolver<'a> {
    registry: &'a MappingRegistry,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a MappingRegistry) -> Self {
        Self { registry }
    }

    /// Resolve the primary mapping layer.
    pub fn resolve(
        &self,
        pad: &PadIdentity,
        input: SemanticInput,
        ctx: &mut ResolutionContext,
    ) -> Resolution {
        self.resolve_layer(pad, input, MappingLayer::Primary, ctx)
    }

    /// Resolve one logical input against the precedence chain:
    /// user overrides, arcade-stick overrides (arcade mode only), the
    /// console's special-pad table, the community database, and the
    /// builtin fixed-layout default. First non-empty source wins; every
    /// result passes through the API reconciler.
    pub fn resolve_layer(
        &self,
        pad: &PadIdentity,
        input: SemanticInput,
        layer: MappingLayer,
        ctx: &mut ResolutionContext,
    ) -> Resolution {
        for index in 0..self.override_chain_len(ctx) {
            let Some(db) = self.override_db(index, ctx) else {
                continue;
            };
            let activation = ctx
                .special_console()
                .is_some_and(|c| ctx.options.activation_enabled(c));
            let Some(entry) = lookup_entry(db, pad, activation, ctx) else {
                continue;
            };

            let directive = entry_directive(entry, input, layer, ctx);
            apply_session_flags(entry, ctx);

            let Some(raw) = directive else {
                // Matched entry does not name this input; next source.
                continue;
            };
            match raw.parse::<RawDirective>() {
                Ok(directive) => {
                    let opposite = opposite_trigger_directive(input, |opp| {
                        entry
                            .directive(opp.as_str(), layer)
                            .and_then(|v| v.parse().ok())
                    });
                    let (desc, cancel) = reconcile(directive, input, opposite, pad);
                    return Resolution::of(desc, cancel);
                }
                Err(err) => {
                    warn!(
                        "override {}: {}: {err}",
                        entry.name,
                        input.as_str()
                    );
                    return Resolution::unmapped();
                }
            }
        }

        // Generic community database.
        if let Some(mapping) = self.registry.community().lookup(&pad.guid) {
            if let Some(directive) = mapping.directive(input) {
                let opposite = opposite_trigger_directive(input, |opp| {
                    mapping.directive(opp)
                });
                let (desc, cancel) = reconcile(directive, input, opposite, pad);
                return Resolution::of(desc, cancel);
            }
        }

        // Builtin identity default: only the fixed-layout API has a known
        // layout to fall back on.
        if let Some(directive) = builtin_default(pad, input) {
            let opposite =
                opposite_trigger_directive(input, |opp| builtin_default(pad, opp));
            let (desc, cancel) = reconcile(directive, input, opposite, pad);
            return Resolution::of(desc, cancel);
        }

        debug!("no mapping for {} on {}", input.as_str(), pad.guid);
        Resolution::unmapped()
    }

    /// Descriptors for one analog-stick-as-dpad compass direction,
    /// synthesized from the pad's resolved left-stick axis pair. Returns
    /// an empty pair when either stick axis resolves to a non-axis.
    pub fn resolve_analog_dpad(
        &self,
        pad: &PadIdentity,
        direction: Compass,
        ctx: &mut ResolutionContext,
    ) -> CompassAxes {
        let x = self.resolve(pad, SemanticInput::LeftX, ctx).input;
        let y = self.resolve(pad, SemanticInput::LeftY, ctx).input;
        let (
            PhysicalInputDescriptor::Axis { id: x_id, .. },
            PhysicalInputDescriptor::Axis { id: y_id, .. },
        ) = (x, y)
        else {
            debug!("no stick axis pair for {} on {}", pad.guid, ctx.console_id);
            return CompassAxes { horizontal: None, vertical: None };
        };
        analog_dpad_axes(x_id, y_id, direction)
    }

    /// Hotkey mappings from the highest-precedence override entry that
    /// carries them. Applied once globally: the first pad that claims them
    /// wins, later calls return `None`. Hotkey names are free-form and
    /// bypass the reconciler.
    pub fn hotkeys(
        &self,
        pad: &PadIdentity,
        ctx: &mut ResolutionContext,
    ) -> Option<AHashMap<Box<str>, PhysicalInputDescriptor>> {
        let activation = ctx
            .special_console()
            .is_some_and(|c| ctx.options.activation_enabled(c));

        let mut found: Option<AHashMap<Box<str>, PhysicalInputDescriptor>> = None;
        for index in 0..self.override_chain_len(ctx) {
            let Some(db) = self.override_db(index, ctx) else {
                continue;
            };
            let Some(entry) = lookup_entry(db, pad, activation, ctx) else {
                continue;
            };
            if entry.hotkeys.is_empty() {
                continue;
            }
            let mut decoded = AHashMap::with_capacity(entry.hotkeys.len());
            for (name, value) in &entry.hotkeys {
                match value.parse::<RawDirective>() {
                    Ok(directive) => {
                        decoded.insert(name.clone(), directive.into());
                    }
                    Err(err) => warn!("hotkey {name}: {err}"),
                }
            }
            found = Some(decoded);
            break;
        }

        let decoded = found?;
        if !ctx.claim_hotkeys() {
            return None;
        }
        Some(decoded)
    }

    fn override_chain_len(&self, _ctx: &ResolutionContext) -> usize {
        3
    }

    /// Precedence rank -> override table, honoring the mode gates.
    fn override_db(&self, index: usize, ctx: &ResolutionContext) -> Option<&OverrideDb> {
        match index {
            0 => self.registry.user(),
            1 => ctx.options.arcade_stick.then(|| self.registry.arcade()).flatten(),
            2 => self
                .registry
                .console(ctx.special_console()?),
            _ => None,
        }
    }
}

/// Find the pad's entry in one override table. The pad's own GUID is
/// tried first; virtual pads with a known subtype also try the GUID
/// their raw-device form would report.
fn lookup_entry<'d>(
    db: &'d OverrideDb,
    pad: &PadIdentity,
    activation: bool,
    ctx: &ResolutionContext,
) -> Option<&'d OverrideEntry> {
    if let Some(entry) = db.lookup(&pad.guid, ctx.active_driver(), activation) {
        return Some(entry);
    }
    let alias = pad.synthesized_guid()?;
    db.lookup(&alias, ctx.active_driver(), activation)
}

/// Session-wide side effects of a matched override entry.
fn apply_session_flags(entry: &OverrideEntry, ctx: &mut ResolutionContext) {
    if let Some(driver) = entry.info.joypad_driver.clone() {
        if ctx.active_driver() != &*driver {
            debug!("override {} switches driver to {driver}", entry.name);
            ctx.switch_driver(&driver);
        }
    }
}

/// Directive string for a semantic input in an override entry, honoring
/// the analog-dpad directional set selection.
fn entry_directive<'e>(
    entry: &'e OverrideEntry,
    input: SemanticInput,
    layer: MappingLayer,
    ctx: &ResolutionContext,
) -> Option<&'e str> {
    let key = override_key(input, ctx.options.analog_dpad && entry.info.analog_dpad);
    entry.directive(key, layer)
}

fn override_key(input: SemanticInput, analog: bool) -> &'static str {
    if analog {
        match input {
            SemanticInput::DpUp => return "leftanalogup",
            SemanticInput::DpDown => return "leftanalogdown",
            SemanticInput::DpLeft => return "leftanalogleft",
            SemanticInput::DpRight => return "leftanalogright",
            _ => {}
        }
    }
    input.as_str()
}

/// The paired trigger of a trigger input, fetched from the same source,
/// for shared-axis detection.
fn opposite_trigger_directive(
    input: SemanticInput,
    fetch: impl Fn(SemanticInput) -> Option<RawDirective>,
) -> Option<RawDirective> {
    let opposite = match input {
        SemanticInput::LeftTrigger => SemanticInput::RightTrigger,
        SemanticInput::RightTrigger => SemanticInput::LeftTrigger,
        SemanticInput::LeftTriggerButton => SemanticInput::RightTriggerButton,
        SemanticInput::RightTriggerButton => SemanticInput::LeftTriggerButton,
        _ => return None,
    };
    fetch(opposite)
}

/// Fixed layout of the virtual-controller API. Raw devices have no
/// builtin default: an unknown raw pad resolves as unmapped.
fn builtin_default(pad: &PadIdentity, input: SemanticInput) -> Option<RawDirective> {
    if pad.api != AccessApi::VirtualFixedLayout {
        return None;
    }
    Some(match input {
        SemanticInput::A => RawDirective::Button { id: 0 },
        SemanticInput::B => RawDirective::Button { id: 1 },
        SemanticInput::X => RawDirective::Button { id: 2 },
        SemanticInput::Y => RawDirective::Button { id: 3 },
        SemanticInput::LeftShoulder => RawDirective::Button { id: 4 },
        SemanticInput::RightShoulder => RawDirective::Button { id: 5 },
        SemanticInput::Back => RawDirective::Button { id: 6 },
        SemanticInput::Start => RawDirective::Button { id: 7 },
        SemanticInput::LeftStick => RawDirective::Button { id: 8 },
        SemanticInput::RightStick => RawDirective::Button { id: 9 },
        SemanticInput::Guide => RawDirective::Button { id: 10 },
        SemanticInput::DpUp => {
            RawDirective::Hat { id: 0, direction: HatDirection::Up }
        }
        SemanticInput::DpRight => {
            RawDirective::Hat { id: 0, direction: HatDirection::Right }
        }
        SemanticInput::DpDown => {
            RawDirective::Hat { id: 0, direction: HatDirection::Down }
        }
        SemanticInput::DpLeft => {
            RawDirective::Hat { id: 0, direction: HatDirection::Left }
        }
        SemanticInput::LeftX => RawDirective::Axis { id: 0, sign: AxisSign::None },
        SemanticInput::LeftY => RawDirective::Axis { id: 1, sign: AxisSign::None },
        SemanticInput::LeftTrigger => {
            RawDirective::Axis { id: 2, sign: AxisSign::None }
        }
        SemanticInput::RightX => RawDirective::Axis { id: 3, sign: AxisSign::None },
        SemanticInput::RightY => RawDirective::Axis { id: 4, sign: AxisSign::None },
        SemanticInput::RightTrigger => {
            RawDirective::Axis { id: 5, sign: AxisSign::None }
        }
        SemanticInput::LeftTriggerButton | SemanticInput::RightTriggerButton => {
            return None
        }
    })
}
