//! Core-Domänentypen: Modi, Geo-Punkte, Polygone, Store, Geometrie, Spatial-Index.

pub mod geo_point;
pub mod geometry;
pub mod mode;
pub mod polygon;
pub mod polygon_store;
pub mod spatial;

pub use geo_point::GeoPoint;
pub use geometry::{EdgeHit, Simplifier};
pub use mode::ModeSet;
pub use polygon::{Polygon, PolygonId, PolygonStyle};
pub use polygon_store::PolygonStore;
pub use spatial::{HandleIndex, HandleMatch, HandleRef};
