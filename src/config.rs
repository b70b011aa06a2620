use crate::constants::{DEFAULT_DPI, DEFAULT_HEADER_RESERVE};
use crate::window::TypeKey;

/// Static settings a registry is built with.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryConfig {
    /// Raw screen resolution in pixels.
    pub screen_width: u32,
    pub screen_height: u32,
    /// DPI used when no preference is stored (or the stored one is unusable).
    pub default_dpi: f32,
    /// Kind opened by the cancel action when nothing is open.
    pub fallback_kind: Option<TypeKey>,
    /// Band kept free at the top of the parent when maximizing.
    pub header_reserve: f32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            screen_width: 1920,
            screen_height: 1080,
            default_dpi: DEFAULT_DPI,
            fallback_kind: None,
            header_reserve: DEFAULT_HEADER_RESERVE,
        }
    }
}

impl RegistryConfig {
    pub fn with_screen(mut self, width: u32, height: u32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    pub fn with_default_dpi(mut self, dpi: f32) -> Self {
        self.default_dpi = dpi;
        self
    }

    pub fn with_fallback_kind(mut self, key: impl Into<TypeKey>) -> Self {
        self.fallback_kind = Some(key.into());
        self
    }

    pub fn with_header_reserve(mut self, height: f32) -> Self {
        self.header_reserve = height;
        self
    }
}
