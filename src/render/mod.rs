//! Render-Layer: Live-Feedback des laufenden Strichs.
//!
//! Die Engine rendert nicht selbst, sondern erzeugt Polylines im Container-Raum,
//! die der Host auf sein Overlay zeichnet.

pub mod path_renderer;

pub use path_renderer::{PathRenderer, StrokeStyle};
