//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Optionen und reine Geometrie, die zwischen `app` und `render`
//! geteilt werden, um direkte Abhängigkeiten zu vermeiden.

pub mod options;
pub mod spline_geometry;

pub use options::{CreateOptions, EngineOptions};
pub use options::{ELBOW_DISTANCE, SIMPLIFY_FACTOR, SMOOTH_FACTOR};
