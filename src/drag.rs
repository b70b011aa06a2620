use crate::geometry::{Geometry, Vec2};
use crate::scaler::CoordinateScaler;
use crate::window::{Window, WindowId, WindowMode};

/// Window edge grabbed for a resize. Logical `y` grows upward, so North is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
}

/// Part of the window chrome a drag started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragHandle {
    Header,
    Border(ResizeEdge),
}

/// Pointer stream delivered by the host input layer. Deltas are raw screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down,
    DragBegin,
    DragMove(Vec2),
    DragEnd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub id: WindowId,
    pub handle: DragHandle,
    pub minimum_size: Vec2,
}

/// Outcome of a finished drag, for the registry to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd {
    pub id: WindowId,
    pub handle: DragHandle,
}

impl DragEnd {
    /// Header moves re-baseline the restore snapshot.
    pub fn refreshes_snapshot(&self) -> bool {
        self.handle == DragHandle::Header
    }
}

/// Apply `delta` to one axis of `size` without going below `minimum`.
///
/// Returns the change actually applied. A window already smaller than its
/// minimum may grow but never shrink further.
fn clamp_axis(size: &mut f32, change: f32, minimum: f32) -> f32 {
    let floor = minimum.min(*size);
    let next = (*size + change).max(floor);
    let applied = next - *size;
    *size = next;
    applied
}

/// Resize `geometry` by dragging `edge` by `delta`, keeping the opposite edge fixed.
///
/// Returns the size change that was committed on the edge's axis.
pub fn apply_resize(geometry: &mut Geometry, edge: ResizeEdge, delta: Vec2, minimum: Vec2) -> f32 {
    match edge {
        ResizeEdge::East => {
            let applied = clamp_axis(&mut geometry.size.x, delta.x, minimum.x);
            geometry.anchored_position.x += applied / 2.0;
            applied
        }
        ResizeEdge::West => {
            let applied = clamp_axis(&mut geometry.size.x, -delta.x, minimum.x);
            geometry.anchored_position.x -= applied / 2.0;
            applied
        }
        ResizeEdge::North => {
            let applied = clamp_axis(&mut geometry.size.y, delta.y, minimum.y);
            geometry.anchored_position.y += applied / 2.0;
            applied
        }
        ResizeEdge::South => {
            let applied = clamp_axis(&mut geometry.size.y, -delta.y, minimum.y);
            geometry.anchored_position.y -= applied / 2.0;
            applied
        }
    }
}

/// Pointer-drag state for moving a window by its header or resizing it by an edge.
#[derive(Debug, Default, Clone)]
pub struct DragResizeController {
    session: Option<DragSession>,
}

impl DragResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn begin(&mut self, window: &Window, handle: DragHandle) {
        if let Some(prev) = self.session.take() {
            tracing::debug!(window_id = %prev.id, "abandoning unfinished drag");
        }
        self.session = Some(DragSession {
            id: window.id(),
            handle,
            minimum_size: window.minimum_size(),
        });
    }

    /// Feed one raw pointer delta. Returns true when the geometry changed.
    pub fn drag(&mut self, window: &mut Window, raw_delta: Vec2, scaler: &CoordinateScaler) -> bool {
        let Some(session) = self.session else {
            return false;
        };
        if session.id != window.id() || window.mode() != WindowMode::Windowed {
            return false;
        }
        let delta = scaler.scale_delta(raw_delta);
        match session.handle {
            DragHandle::Header => {
                if !window.flags.is_movable {
                    return false;
                }
                window.geometry.anchored_position += delta;
                delta != Vec2::ZERO
            }
            DragHandle::Border(edge) => {
                if !window.flags.is_resizable {
                    return false;
                }
                apply_resize(&mut window.geometry, edge, delta, session.minimum_size) != 0.0
            }
        }
    }

    pub fn end(&mut self) -> Option<DragEnd> {
        self.session.take().map(|s| DragEnd {
            id: s.id,
            handle: s.handle,
        })
    }

    /// Drop the session if it belongs to `id` (window closed or minimized mid-drag).
    pub fn cancel_for(&mut self, id: WindowId) {
        if self.session.is_some_and(|s| s.id == id) {
            self.session = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{TypeKey, WindowFlags, WindowTemplate};

    fn window(flags: WindowFlags) -> Window {
        let template = WindowTemplate::default()
            .with_flags(flags)
            .with_geometry(Geometry::centered(Vec2::ZERO, Vec2::new(200.0, 150.0)))
            .with_minimum_size(100.0, 100.0);
        Window::from_template(WindowId::from_raw(7), TypeKey::from("Sample"), &template)
    }

    fn scaler(dpi: f32) -> CoordinateScaler {
        let mut s = CoordinateScaler::new();
        s.set_dpi(1920, 1080, dpi).expect("valid dpi");
        s
    }

    #[test]
    fn move_scales_raw_delta() {
        let mut w = window(WindowFlags::default());
        let mut c = DragResizeController::new();
        c.begin(&w, DragHandle::Header);
        assert!(c.drag(&mut w, Vec2::new(10.0, 10.0), &scaler(2.0)));
        assert_eq!(w.geometry.anchored_position, Vec2::new(5.0, 5.0));
        assert_eq!(
            c.end(),
            Some(DragEnd {
                id: w.id(),
                handle: DragHandle::Header
            })
        );
        assert!(!c.is_dragging());
    }

    #[test]
    fn ignored_without_session_or_permission() {
        let mut w = window(WindowFlags {
            is_movable: false,
            is_resizable: false,
            ..WindowFlags::default()
        });
        let mut c = DragResizeController::new();
        assert!(!c.drag(&mut w, Vec2::new(10.0, 0.0), &scaler(1.0)));
        c.begin(&w, DragHandle::Header);
        assert!(!c.drag(&mut w, Vec2::new(10.0, 0.0), &scaler(1.0)));
        c.begin(&w, DragHandle::Border(ResizeEdge::East));
        assert!(!c.drag(&mut w, Vec2::new(10.0, 0.0), &scaler(1.0)));
        assert_eq!(w.geometry.size, Vec2::new(200.0, 150.0));
    }

    #[test]
    fn east_edge_grows_and_keeps_west_edge_fixed() {
        let mut g = Geometry::centered(Vec2::ZERO, Vec2::new(200.0, 150.0));
        let parent = Vec2::new(1000.0, 1000.0);
        let left = g.resolve(parent).left();
        let applied = apply_resize(&mut g, ResizeEdge::East, Vec2::new(40.0, 0.0), Vec2::new(100.0, 100.0));
        assert_eq!(applied, 40.0);
        assert_eq!(g.size.x, 240.0);
        assert_eq!(g.resolve(parent).left(), left);
    }

    #[test]
    fn north_and_south_keep_opposite_edge_fixed() {
        let parent = Vec2::new(1000.0, 1000.0);
        let mut g = Geometry::centered(Vec2::ZERO, Vec2::new(200.0, 150.0));
        let bottom = g.resolve(parent).bottom();
        apply_resize(&mut g, ResizeEdge::North, Vec2::new(0.0, 20.0), Vec2::new(100.0, 100.0));
        assert_eq!(g.resolve(parent).bottom(), bottom);

        let top = g.resolve(parent).top();
        apply_resize(&mut g, ResizeEdge::South, Vec2::new(0.0, -30.0), Vec2::new(100.0, 100.0));
        assert_eq!(g.size.y, 200.0);
        assert_eq!(g.resolve(parent).top(), top);
    }

    #[test]
    fn west_edge_clamps_at_minimum_width() {
        let mut w = window(WindowFlags::default());
        let mut c = DragResizeController::new();
        c.begin(&w, DragHandle::Border(ResizeEdge::West));
        // 300 raw px at dpi 1 would shrink width from 200 to -100.
        assert!(c.drag(&mut w, Vec2::new(300.0, 0.0), &scaler(1.0)));
        assert_eq!(w.geometry.size.x, 100.0);
        // Only the 100 units actually removed shift the centre.
        assert_eq!(w.geometry.anchored_position.x, 50.0);
        assert!(!c.drag(&mut w, Vec2::new(10.0, 0.0), &scaler(1.0)));
        assert_eq!(w.geometry.size.x, 100.0);
    }

    #[test]
    fn undersized_window_may_grow_but_not_shrink() {
        let mut g = Geometry::centered(Vec2::ZERO, Vec2::new(50.0, 50.0));
        let min = Vec2::new(100.0, 100.0);
        assert_eq!(apply_resize(&mut g, ResizeEdge::East, Vec2::new(-5.0, 0.0), min), 0.0);
        assert_eq!(apply_resize(&mut g, ResizeEdge::East, Vec2::new(5.0, 0.0), min), 5.0);
        assert_eq!(g.size.x, 55.0);
    }

    #[test]
    fn maximized_window_does_not_drag() {
        let mut w = window(WindowFlags::default());
        w.mode = WindowMode::Maximized;
        let mut c = DragResizeController::new();
        c.begin(&w, DragHandle::Border(ResizeEdge::South));
        assert!(!c.drag(&mut w, Vec2::new(0.0, -10.0), &scaler(1.0)));
    }

    #[test]
    fn cancel_only_drops_matching_session() {
        let w = window(WindowFlags::default());
        let mut c = DragResizeController::new();
        c.begin(&w, DragHandle::Header);
        c.cancel_for(WindowId::from_raw(99));
        assert!(c.is_dragging());
        c.cancel_for(w.id());
        assert!(!c.is_dragging());
    }
}
