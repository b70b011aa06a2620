//! Desktop icons that launch window kinds.
//!
//! A single click selects an icon, a second click on the same icon within
//! [`DOUBLE_CLICK_THRESHOLD_MS`] opens its window kind. Clicking the bare
//! desktop clears the selection.

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::backend::WidgetBackend;
use crate::constants::DOUBLE_CLICK_THRESHOLD_MS;
use crate::error::Result;
use crate::registry::WindowRegistry;
use crate::window::{TypeKey, WindowId};

/// Gap in cells between two icons on the icon row.
const ICON_GAP: u16 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopIcon {
    pub label: String,
    /// Window kind opened on double-click.
    pub target: TypeKey,
}

impl DesktopIcon {
    pub fn new(label: impl Into<String>, target: impl Into<TypeKey>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }

    /// Text drawn for the icon, padded by one space each side.
    pub fn caption(&self) -> String {
        format!(" {} ", self.label)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Desktop {
    icons: Vec<DesktopIcon>,
    selected: Option<usize>,
    last_click: Option<(usize, Instant)>,
}

impl Desktop {
    pub fn new(icons: Vec<DesktopIcon>) -> Self {
        Self {
            icons,
            selected: None,
            last_click: None,
        }
    }

    pub fn icons(&self) -> &[DesktopIcon] {
        &self.icons
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Cells of every icon that fits on the top row of `area`, left to right.
    pub fn layout(&self, area: Rect) -> Vec<(usize, Rect)> {
        let mut cells = Vec::new();
        if area.height == 0 {
            return cells;
        }
        let mut x = area.x.saturating_add(1);
        for (index, icon) in self.icons.iter().enumerate() {
            let width = u16::try_from(icon.caption().chars().count()).unwrap_or(u16::MAX);
            if x.saturating_add(width) > area.right() {
                break;
            }
            cells.push((index, Rect::new(x, area.y, width, 1)));
            x = x.saturating_add(width).saturating_add(ICON_GAP);
        }
        cells
    }

    pub fn icon_at(&self, area: Rect, column: u16, row: u16) -> Option<usize> {
        self.layout(area)
            .into_iter()
            .find(|(_, rect)| row == rect.y && column >= rect.x && column < rect.right())
            .map(|(index, _)| index)
    }

    /// Select icon `index`. Returns its target when the click completes a double-click.
    pub fn click_icon(&mut self, index: usize, now: Instant) -> Option<TypeKey> {
        let icon = self.icons.get(index)?;
        self.selected = Some(index);
        let threshold = Duration::from_millis(DOUBLE_CLICK_THRESHOLD_MS);
        let double = self.last_click.is_some_and(|(last, at)| {
            last == index && now.saturating_duration_since(at) <= threshold
        });
        if double {
            // a third click starts a new pair
            self.last_click = None;
            tracing::debug!(icon = %icon.label, target = %icon.target, "icon double-clicked");
            Some(icon.target.clone())
        } else {
            self.last_click = Some((index, now));
            None
        }
    }

    pub fn click_background(&mut self) {
        self.selected = None;
        self.last_click = None;
    }

    /// Click icon `index` and open its window kind on a double-click.
    pub fn launch<B: WidgetBackend>(
        &mut self,
        registry: &mut WindowRegistry<B>,
        index: usize,
        now: Instant,
    ) -> Result<Option<WindowId>> {
        match self.click_icon(index, now) {
            Some(target) => registry.create(target, None).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::window::{WindowCatalog, WindowKind, WindowTemplate};

    fn desktop() -> Desktop {
        Desktop::new(vec![
            DesktopIcon::new("Notes", "Notes"),
            DesktopIcon::new("Settings", "Settings"),
        ])
    }

    #[test]
    fn second_click_within_threshold_opens_target() {
        let mut desktop = desktop();
        let start = Instant::now();
        assert_eq!(desktop.click_icon(0, start), None);
        assert_eq!(desktop.selected(), Some(0));
        assert_eq!(
            desktop.click_icon(0, start + Duration::from_millis(200)),
            Some(TypeKey::from("Notes"))
        );
        // third click in quick succession is a fresh first click
        assert_eq!(desktop.click_icon(0, start + Duration::from_millis(250)), None);
    }

    #[test]
    fn slow_or_split_clicks_do_not_open() {
        let mut desktop = desktop();
        let start = Instant::now();
        desktop.click_icon(0, start);
        assert_eq!(desktop.click_icon(0, start + Duration::from_millis(400)), None);
        assert_eq!(desktop.click_icon(1, start + Duration::from_millis(450)), None);
        assert_eq!(desktop.selected(), Some(1));
        assert_eq!(desktop.click_icon(7, start), None);
    }

    #[test]
    fn background_click_clears_selection() {
        let mut desktop = desktop();
        let start = Instant::now();
        desktop.click_icon(1, start);
        desktop.click_background();
        assert_eq!(desktop.selected(), None);
        assert_eq!(desktop.click_icon(1, start + Duration::from_millis(100)), None);
    }

    #[test]
    fn icons_are_laid_out_along_the_top_row() {
        let desktop = desktop();
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(
            desktop.layout(area),
            vec![(0, Rect::new(1, 0, 7, 1)), (1, Rect::new(10, 0, 10, 1))]
        );
        assert_eq!(desktop.icon_at(area, 3, 0), Some(0));
        assert_eq!(desktop.icon_at(area, 12, 0), Some(1));
        assert_eq!(desktop.icon_at(area, 8, 0), None);
        assert_eq!(desktop.icon_at(area, 3, 1), None);
        assert_eq!(desktop.layout(Rect::new(0, 0, 12, 10)).len(), 1);
    }

    #[test]
    fn double_click_creates_the_window() {
        let catalog = WindowCatalog::new()
            .with("Notes", WindowKind::new(WindowTemplate::default()))
            .with("Settings", WindowKind::new(WindowTemplate::default()));
        let mut registry = WindowRegistry::new(catalog, HeadlessBackend::new());
        registry.init().expect("init");
        let mut desktop = desktop();
        let start = Instant::now();
        assert_eq!(desktop.launch(&mut registry, 1, start).ok(), Some(None));
        let opened = desktop
            .launch(&mut registry, 1, start + Duration::from_millis(100))
            .expect("launch")
            .expect("window");
        assert_eq!(registry.topmost(), Some(opened));
        assert_eq!(
            registry.window(opened).map(|w| w.type_key().as_str()),
            Some("Settings")
        );
    }
}
