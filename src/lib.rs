//! Freihand-Polygon-Zeichnen für interaktive Karten.
//! Core-Funktionalität als Library exportiert für Host-Anbindungen, Tests und Benchmarks.

pub mod app;
pub mod core;
pub mod error;
pub mod host;
pub mod render;
pub mod shared;

pub use app::{ChangeEvent, ChangeReason, FreeDraw, PointerEvent, PointerKind};
pub use core::{GeoPoint, ModeSet, Polygon, PolygonId, PolygonStore, PolygonStyle};
pub use error::FreeDrawError;
pub use host::{HeadlessMap, Listener, MapHost};
pub use render::StrokeStyle;
pub use shared::{CreateOptions, EngineOptions};
