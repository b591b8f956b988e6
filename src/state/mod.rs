pub mod animation;
pub mod throttle;
pub mod viewport;

pub use animation::TrackAnimation;
pub use throttle::{Throttle, ThrottleDecision};
pub use viewport::{Viewport, ViewportAction, container_width, reposition_footer};
