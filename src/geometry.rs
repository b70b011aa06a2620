use std::ops::{Add, AddAssign, Mul, Sub};

/// Two-component vector in logical units. `y` grows upward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };
    pub const HALF: Vec2 = Vec2 { x: 0.5, y: 0.5 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle in logical units, origin at the bottom-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogicalRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LogicalRect {
    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.bottom()
            && point.y < self.top()
    }
}

/// Parent-relative placement of a window.
///
/// `anchor_min`/`anchor_max` are normalized (0..=1) points in the parent;
/// `size` is added on top of the span between them and `anchored_position`
/// offsets the window centre from the anchor centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub anchor_min: Vec2,
    pub anchor_max: Vec2,
    pub anchored_position: Vec2,
    pub size: Vec2,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::centered(Vec2::ZERO, Vec2::new(400.0, 300.0))
    }
}

impl Geometry {
    /// Geometry anchored to the parent centre.
    pub fn centered(position: Vec2, size: Vec2) -> Self {
        Self {
            anchor_min: Vec2::HALF,
            anchor_max: Vec2::HALF,
            anchored_position: position,
            size,
        }
    }

    /// Stretch to the full parent, keeping a band of `header_reserve` free at the top.
    pub fn full_bounds(header_reserve: f32) -> Self {
        Self {
            anchor_min: Vec2::ZERO,
            anchor_max: Vec2::ONE,
            anchored_position: Vec2::new(0.0, -header_reserve / 2.0),
            size: Vec2::new(0.0, -header_reserve),
        }
    }

    pub fn resolve(&self, parent: Vec2) -> LogicalRect {
        let ref_min = Vec2::new(parent.x * self.anchor_min.x, parent.y * self.anchor_min.y);
        let ref_max = Vec2::new(parent.x * self.anchor_max.x, parent.y * self.anchor_max.y);
        let span = ref_max - ref_min;
        let width = (span.x + self.size.x).max(0.0);
        let height = (span.y + self.size.y).max(0.0);
        let center = (ref_min + ref_max) * 0.5 + self.anchored_position;
        LogicalRect {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }
}

/// Caller-supplied position and size for a freshly created window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec2,
    pub size: Vec2,
    pub anchors: Option<(Vec2, Vec2)>,
}

impl Placement {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
            anchors: None,
        }
    }

    pub fn with_anchors(mut self, anchor_min: Vec2, anchor_max: Vec2) -> Self {
        self.anchors = Some((anchor_min, anchor_max));
        self
    }

    pub fn apply(&self, geometry: &mut Geometry) {
        if let Some((min, max)) = self.anchors {
            geometry.anchor_min = min;
            geometry.anchor_max = max;
        }
        geometry.anchored_position = self.position;
        geometry.size = self.size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_geometry_resolves_around_parent_center() {
        let g = Geometry::centered(Vec2::new(10.0, -20.0), Vec2::new(100.0, 50.0));
        let rect = g.resolve(Vec2::new(400.0, 300.0));
        assert_eq!(rect.width, 100.0);
        assert_eq!(rect.height, 50.0);
        assert_eq!(rect.x, 200.0 + 10.0 - 50.0);
        assert_eq!(rect.y, 150.0 - 20.0 - 25.0);
    }

    #[test]
    fn full_bounds_leaves_header_band_at_top() {
        let rect = Geometry::full_bounds(30.0).resolve(Vec2::new(960.0, 540.0));
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 0.0);
        assert_eq!(rect.width, 960.0);
        assert_eq!(rect.top(), 510.0);
    }

    #[test]
    fn placement_keeps_anchors_unless_given() {
        let mut g = Geometry::default();
        Placement::new(-200.0, 0.0, 250.0, 250.0).apply(&mut g);
        assert_eq!(g.anchor_min, Vec2::HALF);
        assert_eq!(g.size, Vec2::new(250.0, 250.0));

        Placement::new(0.0, 0.0, 10.0, 10.0)
            .with_anchors(Vec2::ZERO, Vec2::ZERO)
            .apply(&mut g);
        assert_eq!(g.anchor_max, Vec2::ZERO);
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = LogicalRect {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(!r.contains(Vec2::new(10.0, 5.0)));
    }
}
