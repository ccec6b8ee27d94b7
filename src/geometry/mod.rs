//! Geometry derived from view models: connector curves, scene bounds
//! and picking rays.

mod bounds;
mod curve;
mod ray;

pub use bounds::Bounds3;
pub use curve::{ArcCurve, CurveBuffer};
pub use ray::Ray;
