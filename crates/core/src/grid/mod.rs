//! Grid state: temperature buffers, fire mask and boundary masking

mod field;
mod fire_mask;

// Re-export main types
pub use field::{is_boundary, TemperatureField};
pub use fire_mask::{in_circle, in_ellipse, FireMask, SECONDARY_FIRE_SCALE};
