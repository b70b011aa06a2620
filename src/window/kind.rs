//! Window kinds: what a type key stands for.
//!
//! A kind pairs a [`WindowTemplate`] (the defaults a fresh instance starts
//! from) with a [`WindowBehavior`] that reacts to the lifecycle of instances of
//! that kind. Kinds are composed, not subclassed: every instance is the same
//! [`Window`] record.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::{TypeKey, Window, WindowFlags};
use crate::constants::{DEFAULT_MINIMUM_HEIGHT, DEFAULT_MINIMUM_WIDTH};
use crate::error::WindowError;
use crate::events::{CommandQueue, WindowEvent};
use crate::geometry::{Geometry, Vec2};

#[derive(Debug, Clone, PartialEq)]
pub struct WindowTemplate {
    pub flags: WindowFlags,
    pub geometry: Geometry,
    pub minimum_size: Vec2,
    /// Title used when the caller does not name the window.
    pub default_title: Option<String>,
}

impl Default for WindowTemplate {
    fn default() -> Self {
        Self {
            flags: WindowFlags::default(),
            geometry: Geometry::default(),
            minimum_size: Vec2::new(DEFAULT_MINIMUM_WIDTH, DEFAULT_MINIMUM_HEIGHT),
            default_title: None,
        }
    }
}

impl WindowTemplate {
    pub fn with_flags(mut self, flags: WindowFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_minimum_size(mut self, width: f32, height: f32) -> Self {
        self.minimum_size = Vec2::new(width, height);
        self
    }

    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = Some(title.into());
        self
    }
}

/// Per-kind reaction to lifecycle events of its own instances.
///
/// Behaviors never touch the registry directly; they enqueue commands which
/// the registry applies once the current dispatch has finished.
pub trait WindowBehavior {
    fn on_event(&self, _window: &Window, _event: &WindowEvent, _commands: &mut CommandQueue) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBehavior;

impl WindowBehavior for NoopBehavior {}

#[derive(Clone)]
pub struct WindowKind {
    pub template: WindowTemplate,
    pub behavior: Rc<dyn WindowBehavior>,
}

impl fmt::Debug for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowKind")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

impl WindowKind {
    pub fn new(template: WindowTemplate) -> Self {
        Self {
            template,
            behavior: Rc::new(NoopBehavior),
        }
    }

    pub fn with_behavior(mut self, behavior: impl WindowBehavior + 'static) -> Self {
        self.behavior = Rc::new(behavior);
        self
    }
}

/// The set of window kinds a registry knows how to build.
#[derive(Debug, Default, Clone)]
pub struct WindowCatalog {
    kinds: BTreeMap<TypeKey, WindowKind>,
}

impl WindowCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: impl Into<TypeKey>, kind: WindowKind) -> &mut Self {
        let key = key.into();
        if self.kinds.insert(key.clone(), kind).is_some() {
            tracing::debug!(key = %key, "replaced window kind");
        }
        self
    }

    pub fn with(mut self, key: impl Into<TypeKey>, kind: WindowKind) -> Self {
        self.register(key, kind);
        self
    }

    pub fn resolve(&self, key: &TypeKey) -> Result<&WindowKind, WindowError> {
        self.kinds
            .get(key)
            .ok_or_else(|| WindowError::InvalidType(key.to_string()))
    }

    pub fn get(&self, key: &TypeKey) -> Option<&WindowKind> {
        self.kinds.get(key)
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        self.kinds.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &TypeKey> {
        self.kinds.keys()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_is_invalid_type() {
        let catalog = WindowCatalog::new().with("Menu", WindowKind::new(WindowTemplate::default()));
        assert!(catalog.resolve(&TypeKey::from("Menu")).is_ok());
        match catalog.resolve(&TypeKey::from("Settings")) {
            Err(WindowError::InvalidType(key)) => assert_eq!(key, "Settings"),
            other => panic!("expected InvalidType, got {other:?}"),
        }
    }

    #[test]
    fn template_defaults_use_minimum_size_constants() {
        let t = WindowTemplate::default().with_minimum_size(50.0, 40.0);
        assert_eq!(t.minimum_size, Vec2::new(50.0, 40.0));
        assert_eq!(
            WindowTemplate::default().minimum_size,
            Vec2::new(DEFAULT_MINIMUM_WIDTH, DEFAULT_MINIMUM_HEIGHT)
        );
    }
}
