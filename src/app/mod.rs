//! Application-Layer: Engine-Fassade, Zustand, Gesten und Benachrichtigungen.

pub mod builder;
pub mod capture;
pub mod change_log;
pub mod edit;
pub mod engine;
pub mod events;
mod pointer;
pub mod state;

pub use builder::MergePlan;
pub use capture::{CaptureInput, CapturePhase, Stroke, StrokeCapture};
pub use change_log::{ChangeLog, ChangeLogEntry};
pub use edit::{DeleteClick, VertexDrag};
pub use engine::FreeDraw;
pub use events::{ChangeCallback, ChangeEvent, ChangeReason, PointerEvent, PointerKind};
pub use state::EngineState;
