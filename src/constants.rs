//! Shared crate-wide constants.

/// DPI applied when no preference has been stored yet (`2.0` = 200%).
pub const DEFAULT_DPI: f32 = 2.0;

/// Preference key under which the chosen DPI is persisted.
pub const DPI_PREFERENCE_KEY: &str = "dpi_setting";

/// Smallest size a window may be resized to unless its template says otherwise.
///
/// Units: logical (reference-resolution) units.
pub const DEFAULT_MINIMUM_WIDTH: f32 = 100.0;
pub const DEFAULT_MINIMUM_HEIGHT: f32 = 100.0;

/// Height of the band kept free at the top of the parent when a window is
/// maximized, so the desktop menu bar stays reachable.
pub const DEFAULT_HEADER_RESERVE: f32 = 30.0;

/// Thickness of the grab area along each window edge, and of the header strip.
pub const BORDER_THICKNESS: f32 = 4.0;
pub const HEADER_HEIGHT: f32 = 24.0;

/// Maximum gap between two header clicks that still counts as a double click.
pub const DOUBLE_CLICK_THRESHOLD_MS: u64 = 300;

/// Upper bound on listener -> command -> event cascades within one call.
///
/// A listener that keeps answering events with commands that raise the same
/// events would otherwise loop forever.
pub const MAX_DISPATCH_ROUNDS: usize = 32;

/// Lowest screen resolution the display settings accept.
pub const MINIMUM_RESOLUTION: (u32, u32) = (1280, 720);
