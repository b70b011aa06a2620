//! Terminal rendering of the desktop.
//!
//! Windows are painted back to front in stacking order, each one overwriting
//! whatever lies beneath it. Minimized windows are listed on a task bar along
//! the bottom row.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::backend::WidgetBackend;
use crate::desktop::Desktop;
use crate::geometry::{LogicalRect, Vec2};
use crate::registry::WindowRegistry;
use crate::scaler::CoordinateScaler;
use crate::window::{Window, WindowFlags};

/// How a logical rectangle lands on terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGrid {
    pub area: Rect,
    /// Raw pixels covered by one terminal cell.
    pub cell_size: Vec2,
}

impl CellGrid {
    pub fn new(area: Rect, cell_size: Vec2) -> Self {
        Self { area, cell_size }
    }

    /// Cells covered by `rect`, clipped to the grid. `None` when nothing is visible.
    pub fn to_cells(&self, rect: LogicalRect, scaler: &CoordinateScaler) -> Option<Rect> {
        let mw = scaler.multiplier_width();
        let mh = scaler.multiplier_height();
        if mw <= 0.0 || mh <= 0.0 {
            return None;
        }
        let left = (rect.left() / mw / self.cell_size.x).floor();
        let right = (rect.right() / mw / self.cell_size.x).ceil();
        let rows = self.area.height as f32;
        let top_row = (rows - rect.top() / mh / self.cell_size.y).floor();
        let bottom_row = (rows - rect.bottom() / mh / self.cell_size.y).ceil();

        let x0 = left.max(0.0);
        let y0 = top_row.max(0.0);
        let x1 = right.min(self.area.width as f32);
        let y1 = bottom_row.min(rows);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(
            self.area.x + x0 as u16,
            self.area.y + y0 as u16,
            (x1 - x0) as u16,
            (y1 - y0) as u16,
        ))
    }
}

/// What the decorator needs to know about a window's chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    pub focused: bool,
    pub header: bool,
    pub border: bool,
    pub exit_button: bool,
    pub maximize_button: bool,
}

impl Chrome {
    pub fn from_flags(flags: &WindowFlags, focused: bool) -> Self {
        Self {
            focused,
            header: flags.has_header,
            border: flags.has_border,
            exit_button: flags.shows_exit_button(),
            maximize_button: flags.shows_maximize_button(),
        }
    }
}

pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(&self, buffer: &mut Buffer, rect: Rect, title: &str, chrome: Chrome);
}

#[derive(Debug, Default)]
pub struct OpenStepDecorator;

impl OpenStepDecorator {
    fn header_style(focused: bool) -> Style {
        if focused {
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        }
    }
}

impl WindowDecorator for OpenStepDecorator {
    fn render_window(&self, buffer: &mut Buffer, rect: Rect, title: &str, chrome: Chrome) {
        let rect = rect.intersection(buffer.area);
        if rect.is_empty() {
            return;
        }
        let body_style = Style::default().bg(Color::Black).fg(Color::Gray);
        let border_style = Style::default().fg(Color::DarkGray).bg(Color::Black);
        let left = rect.x;
        let top = rect.y;
        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;

        for y in top..=bottom {
            for x in left..=right {
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_style(body_style);
                }
            }
        }

        let inset = u16::from(chrome.border);
        if chrome.border && rect.width >= 2 && rect.height >= 2 {
            for x in left..=right {
                let (top_sym, bottom_sym) = if x == left {
                    ("┌", "└")
                } else if x == right {
                    ("┐", "┘")
                } else {
                    ("─", "─")
                };
                if let Some(cell) = buffer.cell_mut((x, top)) {
                    cell.set_symbol(top_sym).set_style(border_style);
                }
                if let Some(cell) = buffer.cell_mut((x, bottom)) {
                    cell.set_symbol(bottom_sym).set_style(border_style);
                }
            }
            for y in top + 1..bottom {
                for x in [left, right] {
                    if let Some(cell) = buffer.cell_mut((x, y)) {
                        cell.set_symbol("│").set_style(border_style);
                    }
                }
            }
        }

        if !chrome.header {
            return;
        }
        let header_y = top + inset;
        let header_left = left + inset;
        let header_width = rect.width.saturating_sub(inset * 2);
        if header_y > bottom || header_width == 0 {
            return;
        }
        let style = Self::header_style(chrome.focused);
        for x in header_left..header_left + header_width {
            if let Some(cell) = buffer.cell_mut((x, header_y)) {
                cell.set_symbol(" ").set_style(style);
            }
        }

        let mut buttons = String::new();
        if chrome.maximize_button {
            buttons.push_str("[□]");
        }
        if chrome.exit_button {
            buttons.push_str("[x]");
        }
        let buttons_width = buttons.chars().count() as u16;
        let title_room = header_width.saturating_sub(buttons_width + 1);
        let shown: String = title.chars().take(title_room as usize).collect();
        buffer.set_string(header_left + 1, header_y, shown, style);
        if buttons_width > 0 && buttons_width < header_width {
            buffer.set_string(
                header_left + header_width - buttons_width,
                header_y,
                buttons,
                style,
            );
        }
    }
}

fn draw_window<B: WidgetBackend>(
    buffer: &mut Buffer,
    grid: &CellGrid,
    registry: &WindowRegistry<B>,
    window: &Window,
    decorator: &dyn WindowDecorator,
) {
    let rect = window.geometry().resolve(registry.logical_bounds());
    let Some(cells) = grid.to_cells(rect, registry.scaler()) else {
        return;
    };
    let focused = registry.topmost() == Some(window.id());
    decorator.render_window(
        buffer,
        cells,
        window.title(),
        Chrome::from_flags(window.flags(), focused),
    );
}

/// Paint every open window of `registry` into `buffer` over `grid.area`.
pub fn render_desktop<B: WidgetBackend>(
    buffer: &mut Buffer,
    grid: &CellGrid,
    registry: &WindowRegistry<B>,
    decorator: &dyn WindowDecorator,
) {
    for id in registry.z_order() {
        if let Some(window) = registry.window(id) {
            draw_window(buffer, grid, registry, window, decorator);
        }
    }
    render_task_bar(buffer, grid.area, registry);
}

/// Paint the desktop icon row. Call before [`render_desktop`] so windows cover it.
pub fn render_icons(buffer: &mut Buffer, area: Rect, desktop: &Desktop) {
    let normal = Style::default().fg(Color::White);
    let selected = normal.add_modifier(Modifier::REVERSED);
    for (index, cells) in desktop.layout(area) {
        let Some(icon) = desktop.icons().get(index) else {
            continue;
        };
        let style = if desktop.selected() == Some(index) {
            selected
        } else {
            normal
        };
        buffer.set_string(cells.x, cells.y, icon.caption(), style);
    }
}

fn render_task_bar<B: WidgetBackend>(buffer: &mut Buffer, area: Rect, registry: &WindowRegistry<B>) {
    let minimized = registry.minimized_windows();
    if minimized.is_empty() || area.height == 0 {
        return;
    }
    let y = area.bottom() - 1;
    let style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let mut x = area.x;
    for id in minimized {
        let Some(window) = registry.window(id) else {
            continue;
        };
        let label = format!(" {} ", window.title());
        let width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
        if x.saturating_add(width) > area.right() {
            break;
        }
        buffer.set_string(x, y, label, style);
        x = x.saturating_add(width).saturating_add(1);
    }
}
