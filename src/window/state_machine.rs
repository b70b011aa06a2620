//! Mode transitions of a single window.
//!
//! ```text
//!   Windowed --maximize--> Maximized --restore--> Windowed
//!   Windowed|Maximized --minimize--> Minimized --unminimize--> (previous mode)
//!   any --close--> closed (parked or destroyed by the registry)
//! ```
//!
//! The functions here only mutate the window record. Reordering, reparenting
//! and event fan-out are the registry's job, driven by the returned
//! [`Transition`].

use super::{Window, WindowMode, WindowSnapshot};
use crate::error::WindowError;
use crate::geometry::Geometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Maximized { from: WindowMode },
    Restored { from: WindowMode },
    Minimized { from: WindowMode },
    Unminimized { to: WindowMode },
    Closed,
    Reopened,
    Unchanged,
}

fn require_resizable(window: &Window) -> Result<(), WindowError> {
    if window.flags.is_resizable {
        Ok(())
    } else {
        Err(WindowError::NotResizable(window.id))
    }
}

fn illegal(window: &Window, to: WindowMode) -> WindowError {
    WindowError::IllegalTransition {
        id: window.id,
        from: window.mode,
        to,
    }
}

fn enter_maximized(window: &mut Window, header_reserve: f32) {
    window.geometry = Geometry::full_bounds(header_reserve);
    window.flags.has_border = false;
    window.flags.is_movable = false;
    window.mode = WindowMode::Maximized;
}

/// Re-take the restore baseline. Only meaningful while windowed.
pub fn refresh_snapshot(window: &mut Window) -> bool {
    if window.mode != WindowMode::Windowed {
        return false;
    }
    window.snapshot = Some(WindowSnapshot::capture(window));
    true
}

pub fn maximize(window: &mut Window, header_reserve: f32) -> Result<Transition, WindowError> {
    require_resizable(window)?;
    let from = window.mode;
    match from {
        WindowMode::Windowed => {
            window.snapshot = Some(WindowSnapshot::capture(window));
            enter_maximized(window, header_reserve);
        }
        WindowMode::Minimized if window.restore_mode == WindowMode::Maximized => {
            // Geometry is still the maximized one; the snapshot from before stays valid.
            window.mode = WindowMode::Maximized;
        }
        WindowMode::Minimized => {
            window.snapshot = Some(WindowSnapshot::capture(window));
            enter_maximized(window, header_reserve);
        }
        WindowMode::Maximized => return Err(illegal(window, WindowMode::Maximized)),
    }
    window.restore_mode = WindowMode::Maximized;
    Ok(Transition::Maximized { from })
}

pub fn restore(window: &mut Window) -> Result<Transition, WindowError> {
    let from = window.mode;
    let was_maximized = match from {
        WindowMode::Maximized => true,
        WindowMode::Minimized => window.restore_mode == WindowMode::Maximized,
        WindowMode::Windowed => return Err(illegal(window, WindowMode::Windowed)),
    };
    if was_maximized {
        require_resizable(window)?;
        match window.snapshot {
            Some(snapshot) => snapshot.apply_to(window),
            None => tracing::warn!(window_id = %window.id, "no snapshot to restore from"),
        }
    }
    window.mode = WindowMode::Windowed;
    window.restore_mode = WindowMode::Windowed;
    Ok(Transition::Restored { from })
}

/// Header maximize button: maximize unless already maximized.
pub fn toggle_maximize(window: &mut Window, header_reserve: f32) -> Result<Transition, WindowError> {
    match window.mode {
        WindowMode::Windowed | WindowMode::Minimized => maximize(window, header_reserve),
        WindowMode::Maximized => restore(window),
    }
}

pub fn minimize(window: &mut Window) -> Result<Transition, WindowError> {
    let from = window.mode;
    if from == WindowMode::Minimized {
        return Ok(Transition::Unchanged);
    }
    window.restore_mode = from;
    window.mode = WindowMode::Minimized;
    Ok(Transition::Minimized { from })
}

/// Leave `Minimized` for whatever mode the window was in before.
pub fn unminimize(window: &mut Window) -> Transition {
    if window.mode != WindowMode::Minimized {
        return Transition::Unchanged;
    }
    window.mode = window.restore_mode;
    Transition::Unminimized {
        to: window.restore_mode,
    }
}

/// Drive the machine toward a named target mode.
pub fn request(
    window: &mut Window,
    target: WindowMode,
    header_reserve: f32,
) -> Result<Transition, WindowError> {
    match target {
        WindowMode::Maximized => maximize(window, header_reserve),
        WindowMode::Minimized => minimize(window),
        WindowMode::Windowed if window.mode == WindowMode::Minimized => {
            if window.restore_mode == WindowMode::Maximized {
                restore(window)
            } else {
                Ok(unminimize(window))
            }
        }
        WindowMode::Windowed => restore(window),
    }
}

pub fn close(window: &mut Window) -> Transition {
    if !window.open {
        return Transition::Unchanged;
    }
    if window.mode == WindowMode::Minimized {
        window.mode = window.restore_mode;
    }
    window.open = false;
    Transition::Closed
}

pub fn reopen(window: &mut Window) -> Transition {
    if window.open {
        return Transition::Unchanged;
    }
    window.open = true;
    Transition::Reopened
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;
    use crate::window::{TypeKey, WindowFlags, WindowId, WindowTemplate};

    fn window() -> Window {
        let template = WindowTemplate::default().with_geometry(Geometry::centered(
            Vec2::new(-150.0, 50.0),
            Vec2::new(250.0, 250.0),
        ));
        Window::from_template(WindowId::from_raw(1), TypeKey::from("Sample"), &template)
    }

    #[test]
    fn maximize_then_restore_round_trips_exactly() {
        let mut w = window();
        let geometry = w.geometry;
        let flags = w.flags;

        assert_eq!(
            maximize(&mut w, 30.0).ok(),
            Some(Transition::Maximized {
                from: WindowMode::Windowed
            })
        );
        assert_eq!(w.mode, WindowMode::Maximized);
        assert!(!w.flags.is_movable);
        assert!(!w.flags.has_border);
        assert_eq!(w.geometry, Geometry::full_bounds(30.0));

        restore(&mut w).expect("restore");
        assert_eq!(w.mode, WindowMode::Windowed);
        assert_eq!(w.geometry, geometry);
        assert_eq!(w.flags, flags);
    }

    #[test]
    fn maximize_rejected_when_not_resizable() {
        let mut w = window();
        w.flags = WindowFlags {
            is_resizable: false,
            ..w.flags
        };
        let before = w.geometry;
        assert!(matches!(
            maximize(&mut w, 30.0),
            Err(WindowError::NotResizable(_))
        ));
        assert_eq!(w.mode, WindowMode::Windowed);
        assert_eq!(w.geometry, before);
        assert!(w.snapshot.is_none());
    }

    #[test]
    fn restore_from_windowed_is_illegal() {
        let mut w = window();
        assert!(matches!(
            restore(&mut w),
            Err(WindowError::IllegalTransition {
                from: WindowMode::Windowed,
                to: WindowMode::Windowed,
                ..
            })
        ));
    }

    #[test]
    fn minimize_remembers_maximized_and_reuses_snapshot() {
        let mut w = window();
        let original = w.geometry;
        maximize(&mut w, 30.0).expect("maximize");
        assert_eq!(
            minimize(&mut w).ok(),
            Some(Transition::Minimized {
                from: WindowMode::Maximized
            })
        );
        assert_eq!(minimize(&mut w).ok(), Some(Transition::Unchanged));

        maximize(&mut w, 30.0).expect("re-maximize from minimized");
        assert_eq!(w.mode, WindowMode::Maximized);
        assert_eq!(w.snapshot.map(|s| *s.geometry()), Some(original));

        restore(&mut w).expect("restore");
        assert_eq!(w.geometry, original);
    }

    #[test]
    fn unminimize_returns_to_previous_mode() {
        let mut w = window();
        minimize(&mut w).expect("minimize");
        assert_eq!(
            unminimize(&mut w),
            Transition::Unminimized {
                to: WindowMode::Windowed
            }
        );
        assert_eq!(unminimize(&mut w), Transition::Unchanged);
    }

    #[test]
    fn request_by_mode_routes_to_transitions() {
        let mut w = window();
        request(&mut w, WindowMode::Maximized, 10.0).expect("max");
        request(&mut w, WindowMode::Minimized, 10.0).expect("min");
        request(&mut w, WindowMode::Windowed, 10.0).expect("windowed");
        assert_eq!(w.mode, WindowMode::Windowed);
        assert_eq!(w.flags, WindowFlags::default());
    }

    #[test]
    fn snapshot_refresh_only_while_windowed() {
        let mut w = window();
        assert!(refresh_snapshot(&mut w));
        maximize(&mut w, 30.0).expect("maximize");
        assert!(!refresh_snapshot(&mut w));
    }

    #[test]
    fn close_leaves_minimized_and_reopen_is_idempotent() {
        let mut w = window();
        minimize(&mut w).expect("minimize");
        assert_eq!(close(&mut w), Transition::Closed);
        assert_eq!(w.mode, WindowMode::Windowed);
        assert!(!w.open);
        assert_eq!(close(&mut w), Transition::Unchanged);
        assert_eq!(reopen(&mut w), Transition::Reopened);
        assert_eq!(reopen(&mut w), Transition::Unchanged);
    }
}
