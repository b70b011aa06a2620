use crate::backend::WidgetBackend;
use crate::constants::{DEFAULT_DPI, MINIMUM_RESOLUTION};
use crate::error::{Result, WindowError};
use crate::registry::WindowRegistry;
use crate::scaler::DpiChange;

/// Choices offered by a settings window, and validation of what the user picked.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    pub minimum_resolution: (u32, u32),
    pub supported_dpi: Vec<f32>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            minimum_resolution: MINIMUM_RESOLUTION,
            supported_dpi: vec![1.0, 1.25, 1.5, DEFAULT_DPI, 2.5, 3.0],
        }
    }
}

impl DisplaySettings {
    /// `1.25` becomes `"125%"`.
    pub fn dpi_label(dpi: f32) -> String {
        format!("{}%", (dpi * 100.0).round() as i32)
    }

    pub fn dpi_labels(&self) -> Vec<String> {
        self.supported_dpi.iter().map(|d| Self::dpi_label(*d)).collect()
    }

    /// Landscape resolutions at or above the minimum, deduplicated, in input order.
    pub fn resolution_options(&self, available: &[(u32, u32)]) -> Vec<(u32, u32)> {
        let mut options: Vec<(u32, u32)> = Vec::new();
        for &(width, height) in available {
            if self.check_resolution(width, height).is_err() || width < height {
                continue;
            }
            if !options.contains(&(width, height)) {
                options.push((width, height));
            }
        }
        options
    }

    pub fn check_resolution(&self, width: u32, height: u32) -> Result<()> {
        let (min_width, min_height) = self.minimum_resolution;
        if width < min_width || height < min_height {
            return Err(WindowError::ResolutionTooSmall {
                width,
                height,
                min_width,
                min_height,
            });
        }
        Ok(())
    }

    /// Validate and hand the new resolution and dpi to the registry.
    pub fn apply<B: WidgetBackend>(
        &self,
        registry: &mut WindowRegistry<B>,
        width: u32,
        height: u32,
        dpi: f32,
    ) -> Result<DpiChange> {
        if let Err(err) = self.check_resolution(width, height) {
            err.report();
            return Err(err);
        }
        registry.set_dpi(width, height, dpi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::window::WindowCatalog;

    #[test]
    fn labels_are_percentages() {
        let settings = DisplaySettings {
            supported_dpi: vec![1.0, 1.25, 2.0],
            ..DisplaySettings::default()
        };
        assert_eq!(settings.dpi_labels(), vec!["100%", "125%", "200%"]);
    }

    #[test]
    fn small_and_portrait_resolutions_are_filtered() {
        let settings = DisplaySettings::default();
        let options = settings.resolution_options(&[
            (1024, 768),
            (1920, 1080),
            (1080, 1920),
            (1920, 1080),
            (2560, 1440),
        ]);
        assert_eq!(options, vec![(1920, 1080), (2560, 1440)]);
    }

    #[test]
    fn apply_rejects_small_resolution_without_touching_scaler() {
        let mut registry = WindowRegistry::new(WindowCatalog::new(), HeadlessBackend::new());
        registry.init().expect("init");
        let settings = DisplaySettings::default();
        assert!(matches!(
            settings.apply(&mut registry, 800, 600, 1.0),
            Err(WindowError::ResolutionTooSmall { .. })
        ));
        assert_eq!(registry.scaler().dpi(), DEFAULT_DPI);

        let change = settings.apply(&mut registry, 2560, 1440, 1.25).expect("apply");
        assert_eq!(change.screen_width, 2560);
        assert_eq!(registry.scaler().dpi(), 1.25);
    }
}
