//! Rectangle and affine-transform value types.
//!
//! These are the primitives the viewport engine builds on: a float rectangle
//! in display units and a 2x3 affine transform restricted to translation,
//! uniform scale and rotation.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downward
//! - Positive rotation angles are clockwise on screen
//!
//! # Transform Convention
//!
//! `Transform { a, b, c, d, tx, ty }` maps a point as:
//!
//! ```text
//! x' = a * x + c * y + tx
//! y' = b * x + d * y + ty
//! ```
//!
//! `post_*` operations apply the new operation *after* the existing one,
//! matching the "B on top of A" composition used throughout the engine.

use serde::{Deserialize, Serialize};

/// A rectangle in floating-point display units.
///
/// Invariant: `right >= left` and `bottom >= top` for non-degenerate
/// rectangles. Degenerate (zero-area) rectangles are reported by
/// [`Rect::is_empty`] and treated as failure conditions by callers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Create a rectangle from its four edges.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle anchored at the origin with the given size.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    /// True when the rectangle has zero or negative area.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Shrink the rectangle by `dx` on the left/right and `dy` on the
    /// top/bottom edges. Negative values grow it.
    pub fn inset(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(
            self.left + dx,
            self.top + dy,
            self.right - dx,
            self.bottom - dy,
        )
    }
}

/// A 2x3 affine transform limited to translation, uniform scale and rotation.
///
/// Immutable value semantics: every operation returns a new transform. The
/// viewport engine owns named slots (base / modifier / draw) and assigns the
/// results back; callers only ever receive copies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// The identity transform.
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Compose with `other` so that `other` is applied after `self`.
    ///
    /// `t.post_concat(m).map_point(p) == m.map_point(t.map_point(p))`
    pub fn post_concat(self, other: Transform) -> Transform {
        Transform {
            a: other.a * self.a + other.c * self.b,
            b: other.b * self.a + other.d * self.b,
            c: other.a * self.c + other.c * self.d,
            d: other.b * self.c + other.d * self.d,
            tx: other.a * self.tx + other.c * self.ty + other.tx,
            ty: other.b * self.tx + other.d * self.ty + other.ty,
        }
    }

    /// Translate by `(dx, dy)` after the existing transform.
    pub fn post_translate(self, dx: f32, dy: f32) -> Transform {
        Transform {
            tx: self.tx + dx,
            ty: self.ty + dy,
            ..self
        }
    }

    /// Scale uniformly by `s` about the pivot `(px, py)` after the existing
    /// transform. The pivot is a fixed point of the applied scale.
    pub fn post_scale(self, s: f32, px: f32, py: f32) -> Transform {
        self.post_concat(Transform {
            a: s,
            b: 0.0,
            c: 0.0,
            d: s,
            tx: (1.0 - s) * px,
            ty: (1.0 - s) * py,
        })
    }

    /// Rotate by `degrees` (clockwise on screen) about the pivot `(px, py)`
    /// after the existing transform.
    pub fn post_rotate(self, degrees: f32, px: f32, py: f32) -> Transform {
        let radians = degrees.to_radians();
        let cos = radians.cos();
        let sin = radians.sin();
        self.post_concat(Transform {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: px - cos * px + sin * py,
            ty: py - sin * px - cos * py,
        })
    }

    /// Map a point through the transform.
    pub fn map_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.tx,
            self.b * x + self.d * y + self.ty,
        )
    }

    /// Map a rectangle through the transform.
    ///
    /// All four corners are transformed and the axis-aligned bounding box of
    /// the result is returned. For rotations that are multiples of 90 degrees
    /// the bounding box is the rotated rectangle itself.
    pub fn map_rect(&self, rect: Rect) -> Rect {
        let corners = [
            self.map_point(rect.left, rect.top),
            self.map_point(rect.right, rect.top),
            self.map_point(rect.right, rect.bottom),
            self.map_point(rect.left, rect.bottom),
        ];

        let mut out = Rect::new(corners[0].0, corners[0].1, corners[0].0, corners[0].1);
        for (x, y) in &corners[1..] {
            out.left = out.left.min(*x);
            out.top = out.top.min(*y);
            out.right = out.right.max(*x);
            out.bottom = out.bottom.max(*y);
        }
        out
    }

    /// Recover the uniform scale factor from the linear part.
    ///
    /// Computed as `sqrt(a^2 + b^2)`, which is exact because shear never
    /// occurs in this system: the linear block is always a rotation times a
    /// uniform scale.
    pub fn scale(&self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_rect_accessors() {
        let r = Rect::new(10.0, 20.0, 110.0, 220.0);
        assert_close(r.width(), 100.0);
        assert_close(r.height(), 200.0);
        assert_close(r.center_x(), 60.0);
        assert_close(r.center_y(), 120.0);
        assert!(!r.is_empty());
    }

    #[test]
    fn test_rect_degenerate() {
        assert!(Rect::new(5.0, 5.0, 5.0, 10.0).is_empty());
        assert!(Rect::new(5.0, 5.0, 10.0, 5.0).is_empty());
        assert!(Rect::new(10.0, 0.0, 5.0, 10.0).is_empty());
        assert!(Rect::default().is_empty());
    }

    #[test]
    fn test_rect_inset() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0).inset(10.0, 5.0);
        assert_eq!(r, Rect::new(10.0, 5.0, 90.0, 95.0));
    }

    #[test]
    fn test_identity_maps_points_unchanged() {
        let t = Transform::identity();
        assert_eq!(t.map_point(3.0, 7.0), (3.0, 7.0));
        assert_close(t.scale(), 1.0);
    }

    #[test]
    fn test_post_translate() {
        let t = Transform::identity().post_translate(5.0, -2.0);
        assert_eq!(t.map_point(1.0, 1.0), (6.0, -1.0));
    }

    #[test]
    fn test_post_scale_about_origin() {
        let t = Transform::identity().post_scale(2.0, 0.0, 0.0);
        assert_eq!(t.map_point(3.0, 4.0), (6.0, 8.0));
        assert_close(t.scale(), 2.0);
    }

    #[test]
    fn test_post_scale_pivot_is_fixed_point() {
        let t = Transform::identity().post_scale(3.0, 10.0, 20.0);
        let (x, y) = t.map_point(10.0, 20.0);
        assert_close(x, 10.0);
        assert_close(y, 20.0);
        // A point 1 unit right of the pivot moves 3 units right of it
        let (x, y) = t.map_point(11.0, 20.0);
        assert_close(x, 13.0);
        assert_close(y, 20.0);
    }

    #[test]
    fn test_post_rotate_quarter_turn() {
        // Clockwise on screen: the point right of the pivot moves below it
        let t = Transform::identity().post_rotate(90.0, 0.0, 0.0);
        let (x, y) = t.map_point(1.0, 0.0);
        assert_close(x, 0.0);
        assert_close(y, 1.0);
    }

    #[test]
    fn test_post_rotate_pivot_is_fixed_point() {
        let t = Transform::identity().post_rotate(37.0, 50.0, 60.0);
        let (x, y) = t.map_point(50.0, 60.0);
        assert_close(x, 50.0);
        assert_close(y, 60.0);
    }

    #[test]
    fn test_post_concat_order() {
        // Scale 2x then translate by (10, 0): (1, 0) -> (2, 0) -> (12, 0)
        let scale = Transform::identity().post_scale(2.0, 0.0, 0.0);
        let t = scale.post_concat(Transform::identity().post_translate(10.0, 0.0));
        let (x, y) = t.map_point(1.0, 0.0);
        assert_close(x, 12.0);
        assert_close(y, 0.0);

        // The other order gives (1, 0) -> (11, 0) -> (22, 0)
        let translate = Transform::identity().post_translate(10.0, 0.0);
        let t = translate.post_concat(Transform::identity().post_scale(2.0, 0.0, 0.0));
        let (x, y) = t.map_point(1.0, 0.0);
        assert_close(x, 22.0);
        assert_close(y, 0.0);
    }

    #[test]
    fn test_map_rect_axis_aligned() {
        let t = Transform::identity()
            .post_scale(2.0, 0.0, 0.0)
            .post_translate(10.0, 20.0);
        let r = t.map_rect(Rect::from_size(50.0, 30.0));
        assert_eq!(r, Rect::new(10.0, 20.0, 110.0, 80.0));
    }

    #[test]
    fn test_map_rect_quarter_turn_swaps_extents() {
        let t = Transform::identity().post_rotate(90.0, 0.0, 0.0);
        let r = t.map_rect(Rect::from_size(100.0, 50.0));
        assert_close(r.width(), 50.0);
        assert_close(r.height(), 100.0);
    }

    #[test]
    fn test_map_rect_diagonal_rotation_bounding_box() {
        // A unit square rotated 45 degrees has a bounding box of sqrt(2)
        let t = Transform::identity().post_rotate(45.0, 0.5, 0.5);
        let r = t.map_rect(Rect::from_size(1.0, 1.0));
        assert_close(r.width(), std::f32::consts::SQRT_2);
        assert_close(r.height(), std::f32::consts::SQRT_2);
    }

    #[test]
    fn test_scale_recovery_under_rotation() {
        let t = Transform::identity()
            .post_scale(1.5, 30.0, 40.0)
            .post_rotate(123.0, 7.0, 9.0);
        assert_close(t.scale(), 1.5);
    }

    #[test]
    fn test_scale_recovery_composed() {
        let t = Transform::identity()
            .post_scale(2.0, 0.0, 0.0)
            .post_rotate(90.0, 10.0, 10.0)
            .post_scale(0.5, 5.0, 5.0);
        assert_close(t.scale(), 1.0);
    }
}
