//! Call tracing during one execution window.
//!
//! This module handles:
//! - Filtering frames to the project's own source tree
//! - Rendering return values through a pluggable strategy
//! - Building the indented call/return line buffer
//! - Injecting the recorder as the hook of one window

pub mod filter;
pub mod render;
pub mod tracer;
pub mod window;

// Re-export main types
pub use filter::ProjectFilter;
pub use render::{render_bounded, DebugRenderer, DisplayRenderer, FnRenderer, ValueRenderer};
pub use tracer::{EventKind, Frame, TraceBuffer, TraceEvent, TraceHook, TraceRecorder};
pub use window::{record_window, TraceWindow};
