use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::drag::PointerEvent;
use crate::geometry::Vec2;

/// One pointer event together with where the pointer was, in raw screen
/// pixels with the origin at the bottom-left of the desktop area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPointer {
    pub event: PointerEvent,
    pub position: Vec2,
}

/// Turns terminal mouse reports into the down / drag / up pointer stream.
///
/// Terminal rows grow downward while raw screen space grows upward, so every
/// row delta is negated on the way through.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    area: Rect,
    cell_size: Vec2,
    pressed_at: Option<(u16, u16)>,
    last: Option<(u16, u16)>,
    dragging: bool,
}

impl PointerTracker {
    pub fn new(area: Rect, cell_size: Vec2) -> Self {
        Self {
            area,
            cell_size,
            pressed_at: None,
            last: None,
            dragging: false,
        }
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// Raw desktop size in pixels.
    pub fn screen_pixels(&self) -> (u32, u32) {
        (
            (self.area.width as f32 * self.cell_size.x) as u32,
            (self.area.height as f32 * self.cell_size.y) as u32,
        )
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Centre of the cell at `column`/`row`, in raw pixels.
    pub fn cell_to_raw(&self, column: u16, row: u16) -> Vec2 {
        let local_x = column.saturating_sub(self.area.x) as f32;
        let local_row = row.saturating_sub(self.area.y) as f32;
        let rows_from_bottom = self.area.height as f32 - local_row - 1.0;
        Vec2::new(
            (local_x + 0.5) * self.cell_size.x,
            (rows_from_bottom + 0.5) * self.cell_size.y,
        )
    }

    /// Feed one mouse report. Only the left button takes part.
    pub fn track(&mut self, mouse: &MouseEvent) -> Vec<TrackedPointer> {
        let here = (mouse.column, mouse.row);
        let position = self.cell_to_raw(mouse.column, mouse.row);
        let at = |event: PointerEvent| TrackedPointer { event, position };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed_at = Some(here);
                self.last = Some(here);
                self.dragging = false;
                vec![at(PointerEvent::Down)]
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(last) = self.last else {
                    return Vec::new();
                };
                let mut out = Vec::with_capacity(2);
                if !self.dragging {
                    self.dragging = true;
                    let origin = self.pressed_at.unwrap_or(last);
                    out.push(TrackedPointer {
                        event: PointerEvent::DragBegin,
                        position: self.cell_to_raw(origin.0, origin.1),
                    });
                }
                let delta = Vec2::new(
                    (here.0 as f32 - last.0 as f32) * self.cell_size.x,
                    -(here.1 as f32 - last.1 as f32) * self.cell_size.y,
                );
                self.last = Some(here);
                if delta != Vec2::ZERO {
                    out.push(at(PointerEvent::DragMove(delta)));
                }
                out
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let was_dragging = self.dragging;
                self.pressed_at = None;
                self.last = None;
                self.dragging = false;
                if was_dragging {
                    vec![at(PointerEvent::DragEnd)]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn tracker() -> PointerTracker {
        PointerTracker::new(Rect::new(0, 0, 80, 24), Vec2::new(8.0, 16.0))
    }

    #[test]
    fn bottom_row_maps_near_origin() {
        let t = tracker();
        assert_eq!(t.cell_to_raw(0, 23), Vec2::new(4.0, 8.0));
        assert_eq!(t.cell_to_raw(0, 0), Vec2::new(4.0, 23.5 * 16.0));
        assert_eq!(t.screen_pixels(), (640, 384));
    }

    #[test]
    fn drag_sequence_negates_row_delta() {
        let mut t = tracker();
        let events: Vec<PointerEvent> = [
            mouse(MouseEventKind::Down(MouseButton::Left), 10, 10),
            mouse(MouseEventKind::Drag(MouseButton::Left), 12, 9),
            mouse(MouseEventKind::Drag(MouseButton::Left), 12, 9),
            mouse(MouseEventKind::Drag(MouseButton::Left), 11, 9),
            mouse(MouseEventKind::Up(MouseButton::Left), 11, 9),
        ]
        .iter()
        .flat_map(|m| t.track(m))
        .map(|p| p.event)
        .collect();
        assert_eq!(
            events,
            vec![
                PointerEvent::Down,
                PointerEvent::DragBegin,
                PointerEvent::DragMove(Vec2::new(16.0, 16.0)),
                PointerEvent::DragMove(Vec2::new(-8.0, 0.0)),
                PointerEvent::DragEnd,
            ]
        );
        assert!(!t.is_dragging());
    }

    #[test]
    fn click_without_drag_ends_quietly() {
        let mut t = tracker();
        assert_eq!(t.track(&mouse(MouseEventKind::Down(MouseButton::Left), 1, 1)).len(), 1);
        assert!(t.track(&mouse(MouseEventKind::Up(MouseButton::Left), 1, 1)).is_empty());
        assert!(t.track(&mouse(MouseEventKind::Down(MouseButton::Right), 1, 1)).is_empty());
    }
}
