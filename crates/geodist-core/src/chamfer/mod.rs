pub mod mask;
pub mod presets;

pub use mask::{ChamferMask, WeightedOffset};
pub use presets::ChamferPreset;
