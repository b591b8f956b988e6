pub mod geomath;
pub mod path;
pub mod projection;

pub use geomath::calculate_scale_bar_end_point;
pub use path::PathGenerator;
pub use projection::{CylindricalEqualArea, Projection};
