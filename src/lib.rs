//! Window lifecycle and stacking engine.
//!
//! A [`WindowRegistry`] owns every managed window: it builds them from a
//! [`WindowCatalog`], keeps single-instance kinds in a reuse pool, tracks the
//! stacking order, drives the Windowed / Maximized / Minimized state machine
//! and turns raw pointer deltas into logical move and resize operations.
//! Rendering and widget plumbing stay behind the [`WidgetBackend`] trait.

pub mod backend;
pub mod config;
pub mod constants;
pub mod desktop;
pub mod drag;
pub mod drivers;
pub mod error;
pub mod events;
pub mod geometry;
pub mod global;
pub mod log_buffer;
pub mod prefs;
pub mod registry;
pub mod render;
pub mod scaler;
pub mod settings;
pub mod tracing_sub;
pub mod window;
pub mod z_order;

pub use backend::{HeadlessBackend, Layer, WidgetBackend};
pub use config::RegistryConfig;
pub use drag::{DragHandle, PointerEvent, ResizeEdge};
pub use error::{PreferenceError, Result, WindowError};
pub use events::{CommandQueue, EventRecorder, RegistryCommand, WindowEvent, WindowEventListener};
pub use geometry::{Geometry, LogicalRect, Placement, Vec2};
pub use registry::{CancelOutcome, WindowRegistry};
pub use scaler::{CoordinateScaler, DpiChange};
pub use window::{
    TypeKey, Window, WindowBehavior, WindowCatalog, WindowFlags, WindowId, WindowKind, WindowMode,
    WindowTemplate,
};
