//! Pointer and camera interaction: orbiting, picking rays, hover/selection
//! highlighting and view modes.

mod camera;
mod highlight;
mod mode;

pub use camera::{CameraConfig, OrbitCamera};
pub use highlight::{HighlightConfig, HighlightManager};
pub use mode::ViewMode;
