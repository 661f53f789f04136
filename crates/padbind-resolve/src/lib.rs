mod context;
mod descriptor;
mod diagonal;
mod pipeline;
mod reconcile;
mod registry;

pub use context::{AccessApi, PadIdentity, ResolutionContext, UserOptions};
pub use padbind_guid::VirtualSubtype;
pub use descriptor::PhysicalInputDescriptor;
pub use diagonal::{analog_dpad_axes, Compass, CompassAxes};
pub use pipeline::{Resolution, Resolver};
pub use registry::MappingRegistry;
