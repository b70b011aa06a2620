//! Raw screen pixels to logical units.
//!
//! The layout is authored against a reference resolution of
//! `screen / dpi`, so every raw pointer delta has to be scaled by
//! `reference / screen` before it touches window geometry.

use crate::constants::DEFAULT_DPI;
use crate::error::WindowError;
use crate::geometry::Vec2;

/// Broadcast whenever the scaler is recomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DpiChange {
    pub screen_width: u32,
    pub screen_height: u32,
    pub dpi: f32,
}

impl DpiChange {
    /// Resolution dependents should author against.
    pub fn reference_resolution(&self) -> Vec2 {
        Vec2::new(
            self.screen_width as f32 / self.dpi,
            self.screen_height as f32 / self.dpi,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateScaler {
    screen_width: u32,
    screen_height: u32,
    dpi: f32,
    multiplier_width: f32,
    multiplier_height: f32,
}

impl Default for CoordinateScaler {
    fn default() -> Self {
        Self {
            screen_width: 0,
            screen_height: 0,
            dpi: DEFAULT_DPI,
            multiplier_width: 1.0,
            multiplier_height: 1.0,
        }
    }
}

impl CoordinateScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the multipliers. Leaves the scaler untouched on bad input.
    pub fn set_dpi(
        &mut self,
        screen_width: u32,
        screen_height: u32,
        dpi: f32,
    ) -> Result<DpiChange, WindowError> {
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(WindowError::InvalidDpi(dpi));
        }
        if screen_width == 0 || screen_height == 0 {
            return Err(WindowError::InvalidResolution {
                width: screen_width,
                height: screen_height,
            });
        }
        let reference_width = screen_width as f32 / dpi;
        let reference_height = screen_height as f32 / dpi;
        self.screen_width = screen_width;
        self.screen_height = screen_height;
        self.dpi = dpi;
        self.multiplier_width = reference_width / screen_width as f32;
        self.multiplier_height = reference_height / screen_height as f32;
        tracing::debug!(
            screen_width,
            screen_height,
            dpi,
            multiplier_width = self.multiplier_width,
            multiplier_height = self.multiplier_height,
            "recomputed coordinate scale"
        );
        Ok(self.change())
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    pub fn multiplier_width(&self) -> f32 {
        self.multiplier_width
    }

    pub fn multiplier_height(&self) -> f32 {
        self.multiplier_height
    }

    pub fn screen_resolution(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }

    /// Parent size in logical units.
    pub fn reference_resolution(&self) -> Vec2 {
        Vec2::new(
            self.screen_width as f32 * self.multiplier_width,
            self.screen_height as f32 * self.multiplier_height,
        )
    }

    pub fn change(&self) -> DpiChange {
        DpiChange {
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            dpi: self.dpi,
        }
    }

    /// Raw pointer delta to logical delta.
    pub fn scale_delta(&self, raw: Vec2) -> Vec2 {
        Vec2::new(raw.x * self.multiplier_width, raw.y * self.multiplier_height)
    }

    /// Raw screen point (bottom-left origin) to logical point.
    pub fn scale_point(&self, raw: Vec2) -> Vec2 {
        self.scale_delta(raw)
    }
}
