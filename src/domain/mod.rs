pub mod lot;
pub mod mask;
pub mod parcel;

pub use lot::Lot;
pub use mask::LandMask;
pub use parcel::ParcelOutline;
