use super::{Window, WindowFlags};
use crate::geometry::Geometry;

/// Frozen copy of a window's placement and the flags a maximize overrides.
///
/// Taken before maximizing and after every header drag while windowed, so a
/// restore lands exactly where the user last left the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSnapshot {
    geometry: Geometry,
    has_header: bool,
    has_border: bool,
    is_movable: bool,
    is_resizable: bool,
}

impl WindowSnapshot {
    pub fn capture(window: &Window) -> Self {
        Self {
            geometry: window.geometry,
            has_header: window.flags.has_header,
            has_border: window.flags.has_border,
            is_movable: window.flags.is_movable,
            is_resizable: window.flags.is_resizable,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn apply_to(&self, window: &mut Window) {
        window.geometry = self.geometry;
        self.apply_flags(&mut window.flags);
    }

    fn apply_flags(&self, flags: &mut WindowFlags) {
        flags.has_header = self.has_header;
        flags.has_border = self.has_border;
        flags.is_movable = self.is_movable;
        flags.is_resizable = self.is_resizable;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;
    use crate::window::{TypeKey, WindowId, WindowTemplate};

    #[test]
    fn restores_geometry_and_flags_verbatim() {
        let mut window = Window::from_template(
            WindowId::from_raw(1),
            TypeKey::from("Notes"),
            &WindowTemplate::default(),
        );
        window.geometry.anchored_position = Vec2::new(12.5, -3.25);
        let snap = WindowSnapshot::capture(&window);

        window.geometry = Geometry::full_bounds(30.0);
        window.flags.has_border = false;
        window.flags.is_movable = false;
        snap.apply_to(&mut window);

        assert_eq!(window.geometry.anchored_position, Vec2::new(12.5, -3.25));
        assert!(window.flags.has_border);
        assert!(window.flags.is_movable);
    }
}
