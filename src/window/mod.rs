pub mod kind;
pub mod snapshot;
pub mod state_machine;

use std::fmt;
use std::str::FromStr;

use crate::error::WindowError;
use crate::geometry::{Geometry, Vec2};

pub use kind::{NoopBehavior, WindowBehavior, WindowCatalog, WindowKind, WindowTemplate};
pub use snapshot::WindowSnapshot;
pub use state_machine::Transition;

/// Identity of one live window instance. Never reused within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stable name of a window kind, used for catalog lookup and pooling.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeKey(String);

impl TypeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TypeKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowMode {
    #[default]
    Windowed,
    Maximized,
    Minimized,
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WindowMode::Windowed => "Windowed",
            WindowMode::Maximized => "Maximized",
            WindowMode::Minimized => "Minimized",
        };
        f.write_str(s)
    }
}

impl FromStr for WindowMode {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windowed" => Ok(WindowMode::Windowed),
            "maximized" => Ok(WindowMode::Maximized),
            "minimized" => Ok(WindowMode::Minimized),
            _ => Err(WindowError::UndefinedMode(s.to_string())),
        }
    }
}

impl TryFrom<i32> for WindowMode {
    type Error = WindowError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(WindowMode::Windowed),
            1 => Ok(WindowMode::Maximized),
            2 => Ok(WindowMode::Minimized),
            other => Err(WindowError::UndefinedMode(other.to_string())),
        }
    }
}

/// Chrome and behavior switches of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFlags {
    pub has_header: bool,
    pub has_border: bool,
    pub has_exit_button: bool,
    pub has_maximize_button: bool,
    pub is_movable: bool,
    pub is_resizable: bool,
    pub allow_multiple_instance: bool,
    pub use_object_pooling: bool,
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self {
            has_header: true,
            has_border: true,
            has_exit_button: true,
            has_maximize_button: true,
            is_movable: true,
            is_resizable: true,
            allow_multiple_instance: false,
            use_object_pooling: true,
        }
    }
}

impl WindowFlags {
    /// Pooled windows are parked on close and handed back on the next request.
    pub fn qualifies_for_pool(&self) -> bool {
        self.use_object_pooling && !self.allow_multiple_instance
    }

    pub fn shows_exit_button(&self) -> bool {
        self.has_header && self.has_exit_button
    }

    pub fn shows_maximize_button(&self) -> bool {
        self.has_header && self.has_maximize_button && self.is_resizable
    }
}

/// A live window instance: one record per widget, behavior resolved by kind.
#[derive(Debug, Clone)]
pub struct Window {
    id: WindowId,
    type_key: TypeKey,
    pub(crate) title: String,
    pub(crate) geometry: Geometry,
    pub(crate) flags: WindowFlags,
    pub(crate) minimum_size: Vec2,
    pub(crate) mode: WindowMode,
    /// Mode to return to when leaving `Minimized`.
    pub(crate) restore_mode: WindowMode,
    pub(crate) snapshot: Option<WindowSnapshot>,
    pub(crate) open: bool,
}

impl Window {
    pub(crate) fn from_template(id: WindowId, type_key: TypeKey, template: &WindowTemplate) -> Self {
        Self {
            id,
            type_key,
            title: String::new(),
            geometry: template.geometry,
            flags: template.flags,
            minimum_size: template.minimum_size,
            mode: WindowMode::Windowed,
            restore_mode: WindowMode::Windowed,
            snapshot: None,
            open: true,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn type_key(&self) -> &TypeKey {
        &self.type_key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn flags(&self) -> &WindowFlags {
        &self.flags
    }

    pub fn minimum_size(&self) -> Vec2 {
        self.minimum_size
    }

    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    pub fn snapshot(&self) -> Option<&WindowSnapshot> {
        self.snapshot.as_ref()
    }

    /// Open windows are either on screen or minimized; closed ones sit in the pool.
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_minimized(&self) -> bool {
        self.open && self.mode == WindowMode::Minimized
    }
}
