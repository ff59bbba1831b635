// Drawing units (viewBox user units)
pub const ORBIT_SPACING: f32 = 30.0; // distance between neighbouring orbits
pub const ELECTRON_RADIUS: f32 = 5.0;
pub const NUCLEUS_RADIUS: f32 = 15.0;
pub const VIEW_BOX_PADDING: f32 = 20.0;
pub const FIXED_VIEW_BOX_SIZE: f32 = 500.0;

// Animation timing (seconds)
pub const DEFAULT_MIN_DURATION: u32 = 6;
pub const DEFAULT_MAX_DURATION: u32 = 15;
pub const REVERSE_THRESHOLD: f64 = 0.4; // random() above this reverses an orbit

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const MAX_PERIODIC_NUMBER: u32 = 118;
