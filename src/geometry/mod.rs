pub mod outline;
pub mod repair;
pub mod scaling;

pub use outline::{Side, build_outline, outline_from_mask, parse_sides};
pub use repair::repair_ring;
pub use scaling::{Bounds, Scaler};
