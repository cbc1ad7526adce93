//! Cutting day cells out of rendered pages

mod region;
mod crop;

pub use region::Region;
pub use crop::{crop_region, encode_png};
