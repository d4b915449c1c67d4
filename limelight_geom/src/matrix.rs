// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas-style 2D affine matrix.

use kurbo::{Affine, Point};

use crate::floats::FloatExt;

const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;

/// A 2D affine transform as six parameters `(a, b, c, d, tx, ty)`.
///
/// Represents the 3×3 matrix
///
/// ```text
/// [ a  c  tx ]
/// [ b  d  ty ]
/// [ 0  0  1  ]
/// ```
///
/// so a point maps as `x' = a·x + c·y + tx`, `y' = b·x + d·y + ty`.
///
/// All mutating operations work in place and return `&mut Self` so hot
/// per-frame paths can chain calls without allocating:
///
/// ```
/// use limelight_geom::Matrix2D;
/// let mut m = Matrix2D::IDENTITY;
/// m.translate(10.0, 20.0).scale(2.0, 2.0).rotate(45.0);
/// ```
///
/// ## Composition order
///
/// [`append`](Self::append) composes so the appended transform applies
/// *first*, in local space — appending is how a parent folds a child's
/// transform in. [`prepend`](Self::prepend) composes the other way, closest
/// to world space — prepending each ancestor in turn while walking towards
/// the root yields the local→world concatenated matrix. Swapping the two
/// silently renders everything wrong, which is why both directions are
/// covered by associativity tests rather than left to inspection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix2D {
    /// Horizontal scale/rotation component (row 0, column 0).
    pub a: f64,
    /// Vertical shear/rotation component (row 1, column 0).
    pub b: f64,
    /// Horizontal shear/rotation component (row 0, column 1).
    pub c: f64,
    /// Vertical scale/rotation component (row 1, column 1).
    pub d: f64,
    /// Horizontal translation.
    pub tx: f64,
    /// Vertical translation.
    pub ty: f64,
}

/// The transform properties recovered by [`Matrix2D::decompose`].
///
/// Decomposition is not unique: the recovered rotation/skew pair reproduces
/// the same visual transform but may differ numerically from whatever values
/// originally built the matrix. This is accepted and documented, not a bug.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Decomposition {
    /// Horizontal translation.
    pub x: f64,
    /// Vertical translation.
    pub y: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Horizontal skew in degrees.
    pub skew_x: f64,
    /// Vertical skew in degrees.
    pub skew_y: f64,
}

impl Default for Matrix2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix2D {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Create a matrix from its six parameters.
    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// Reset to identity.
    pub fn set_identity(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    /// True if this is exactly the identity matrix.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Append the given parameters: `self = self * M`.
    ///
    /// The appended transform applies before the existing content of `self`
    /// (that is, in local space).
    pub fn append(&mut self, a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> &mut Self {
        let (a1, b1, c1, d1) = (self.a, self.b, self.c, self.d);
        if a != 1.0 || b != 0.0 || c != 0.0 || d != 1.0 {
            self.a = a1 * a + c1 * b;
            self.b = b1 * a + d1 * b;
            self.c = a1 * c + c1 * d;
            self.d = b1 * c + d1 * d;
        }
        self.tx = a1 * tx + c1 * ty + self.tx;
        self.ty = b1 * tx + d1 * ty + self.ty;
        self
    }

    /// Append another matrix: `self = self * m`.
    pub fn append_matrix(&mut self, m: &Self) -> &mut Self {
        self.append(m.a, m.b, m.c, m.d, m.tx, m.ty)
    }

    /// Prepend the given parameters: `self = M * self`.
    ///
    /// The prepended transform applies after the existing content of `self`
    /// (that is, closer to world space).
    pub fn prepend(&mut self, a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> &mut Self {
        let (a1, c1, tx1) = (self.a, self.c, self.tx);
        self.a = a * a1 + c * self.b;
        self.b = b * a1 + d * self.b;
        self.c = a * c1 + c * self.d;
        self.d = b * c1 + d * self.d;
        self.tx = a * tx1 + c * self.ty + tx;
        self.ty = b * tx1 + d * self.ty + ty;
        self
    }

    /// Prepend another matrix: `self = m * self`.
    pub fn prepend_matrix(&mut self, m: &Self) -> &mut Self {
        self.prepend(m.a, m.b, m.c, m.d, m.tx, m.ty)
    }

    /// Append the transform described by canvas-style display properties.
    ///
    /// Equivalent to translate ∘ rotate ∘ skew ∘ scale ∘ (−registration
    /// offset). Angles are degrees. A rotation that is a multiple of 360
    /// sets `cos = 1, sin = 0` directly rather than going through the trig
    /// functions, so the common unrotated case accumulates no drift.
    pub fn append_transform(
        &mut self,
        x: f64,
        y: f64,
        scale_x: f64,
        scale_y: f64,
        rotation: f64,
        skew_x: f64,
        skew_y: f64,
        reg_x: f64,
        reg_y: f64,
    ) -> &mut Self {
        let (cos, sin) = if rotation % 360.0 != 0.0 {
            let r = rotation * DEG_TO_RAD;
            (r.cos_(), r.sin_())
        } else {
            (1.0, 0.0)
        };

        if skew_x != 0.0 || skew_y != 0.0 {
            let sx = skew_x * DEG_TO_RAD;
            let sy = skew_y * DEG_TO_RAD;
            self.append(sy.cos_(), sy.sin_(), -sx.sin_(), sx.cos_(), x, y);
            self.append(cos * scale_x, sin * scale_x, -sin * scale_y, cos * scale_y, 0.0, 0.0);
        } else {
            self.append(cos * scale_x, sin * scale_x, -sin * scale_y, cos * scale_y, x, y);
        }

        if reg_x != 0.0 || reg_y != 0.0 {
            // Fold the registration offset into translation.
            self.tx -= reg_x * self.a + reg_y * self.c;
            self.ty -= reg_x * self.b + reg_y * self.d;
        }
        self
    }

    /// Append a rotation in degrees.
    pub fn rotate(&mut self, degrees: f64) -> &mut Self {
        let r = degrees * DEG_TO_RAD;
        let (cos, sin) = (r.cos_(), r.sin_());
        self.append(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Append a skew in degrees.
    pub fn skew(&mut self, skew_x: f64, skew_y: f64) -> &mut Self {
        let sx = skew_x * DEG_TO_RAD;
        let sy = skew_y * DEG_TO_RAD;
        self.append(sy.cos_(), sy.sin_(), -sx.sin_(), sx.cos_(), 0.0, 0.0)
    }

    /// Append a scale.
    pub fn scale(&mut self, x: f64, y: f64) -> &mut Self {
        self.append(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    /// Append a translation.
    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.tx += self.a * x + self.c * y;
        self.ty += self.b * x + self.d * y;
        self
    }

    /// Invert in place.
    ///
    /// Uses the 2×2 determinant `a·d − b·c`. A singular matrix silently
    /// produces `NaN`/`Infinity` components; this matches the documented
    /// behavior of the canvas model and is not treated as an error.
    pub fn invert(&mut self) -> &mut Self {
        let (a1, b1, c1, d1, tx1) = (self.a, self.b, self.c, self.d, self.tx);
        let n = a1 * d1 - b1 * c1;
        self.a = d1 / n;
        self.b = -b1 / n;
        self.c = -c1 / n;
        self.d = a1 / n;
        self.tx = (c1 * self.ty - d1 * tx1) / n;
        self.ty = -(a1 * self.ty - b1 * tx1) / n;
        self
    }

    /// Apply the matrix to a point.
    pub fn transform_point(&self, x: f64, y: f64) -> Point {
        Point::new(x * self.a + y * self.c + self.tx, x * self.b + y * self.d + self.ty)
    }

    /// Recover display properties from the matrix.
    ///
    /// Lossy: see [`Decomposition`]. A matrix that combines rotation and
    /// skew decomposes into skew-only form.
    pub fn decompose(&self) -> Decomposition {
        let mut out = Decomposition {
            x: self.tx,
            y: self.ty,
            scale_x: (self.a * self.a + self.b * self.b).sqrt_(),
            scale_y: (self.c * self.c + self.d * self.d).sqrt_(),
            ..Decomposition::default()
        };

        let skew_x = (-self.c).atan2_(self.d);
        let skew_y = self.b.atan2_(self.a);
        // A pure rotation shows up as equal skew angles.
        let delta = (skew_x - skew_y).abs();

        if delta < 1e-5 || (core::f64::consts::TAU - delta).abs() < 1e-5 {
            out.rotation = skew_y / DEG_TO_RAD;
            if self.a < 0.0 && self.d >= 0.0 {
                out.rotation += if out.rotation <= 0.0 { 180.0 } else { -180.0 };
            }
        } else {
            out.skew_x = skew_x / DEG_TO_RAD;
            out.skew_y = skew_y / DEG_TO_RAD;
        }
        out
    }
}

impl From<Matrix2D> for Affine {
    fn from(m: Matrix2D) -> Self {
        // Kurbo uses the same (a, b, c, d, tx, ty) coefficient order.
        Self::new([m.a, m.b, m.c, m.d, m.tx, m.ty])
    }
}

impl From<Affine> for Matrix2D {
    fn from(a: Affine) -> Self {
        let c = a.as_coeffs();
        Self::new(c[0], c[1], c[2], c[3], c[4], c[5])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_pt(p: Point, x: f64, y: f64) {
        assert!((p.x - x).abs() < 1e-9, "x: {} vs {x}", p.x);
        assert!((p.y - y).abs() < 1e-9, "y: {} vs {y}", p.y);
    }

    #[test]
    fn append_composes_right_to_left() {
        // ((A·B)·C)·p must equal A(B(C(p))).
        let mut a = Matrix2D::IDENTITY;
        a.rotate(90.0);
        let mut b = Matrix2D::IDENTITY;
        b.scale(2.0, 3.0);
        let mut c = Matrix2D::IDENTITY;
        c.translate(5.0, 7.0);

        let mut abc = a;
        abc.append_matrix(&b).append_matrix(&c);

        let p = (4.0, -2.0);
        let step1 = c.transform_point(p.0, p.1);
        let step2 = b.transform_point(step1.x, step1.y);
        let expect = a.transform_point(step2.x, step2.y);
        let got = abc.transform_point(p.0, p.1);
        assert_pt(got, expect.x, expect.y);
    }

    #[test]
    fn prepend_is_append_reversed() {
        let mut a = Matrix2D::IDENTITY;
        a.rotate(30.0).translate(3.0, 1.0);
        let mut b = Matrix2D::IDENTITY;
        b.scale(0.5, 4.0);

        let mut ab = a;
        ab.append_matrix(&b);
        let mut ba = b;
        ba.prepend_matrix(&a);

        let p = ab.transform_point(1.0, 2.0);
        let q = ba.transform_point(1.0, 2.0);
        assert_pt(p, q.x, q.y);
    }

    #[test]
    fn invert_round_trips() {
        let mut m = Matrix2D::IDENTITY;
        m.translate(12.0, -8.0).rotate(37.0).scale(1.5, 0.75).skew(10.0, 5.0);
        let p = m.transform_point(3.0, 4.0);
        let mut inv = m;
        inv.invert();
        let back = inv.transform_point(p.x, p.y);
        assert_pt(back, 3.0, 4.0);
    }

    #[test]
    fn invert_singular_produces_non_finite() {
        let mut m = Matrix2D::new(1.0, 2.0, 2.0, 4.0, 5.0, 6.0); // det = 0
        m.invert();
        assert!(!m.a.is_finite(), "singular inverse must not be finite");
    }

    #[test]
    fn append_transform_matches_manual_chain() {
        let mut via_props = Matrix2D::IDENTITY;
        via_props.append_transform(50.0, 60.0, 2.0, 3.0, 45.0, 0.0, 0.0, 0.0, 0.0);

        let mut manual = Matrix2D::IDENTITY;
        manual.translate(50.0, 60.0).rotate(45.0).scale(2.0, 3.0);

        let p = via_props.transform_point(7.0, -7.0);
        let q = manual.transform_point(7.0, -7.0);
        assert_pt(p, q.x, q.y);
    }

    #[test]
    fn registration_point_offsets_translation() {
        let mut m = Matrix2D::IDENTITY;
        m.append_transform(100.0, 100.0, 1.0, 1.0, 0.0, 0.0, 0.0, 25.0, 10.0);
        // The registration point lands on (x, y).
        assert_pt(m.transform_point(25.0, 10.0), 100.0, 100.0);
    }

    #[test]
    fn zero_rotation_is_exact() {
        let mut m = Matrix2D::IDENTITY;
        m.append_transform(0.0, 0.0, 1.0, 1.0, 360.0, 0.0, 0.0, 0.0, 0.0);
        assert!(m.is_identity(), "full-turn rotation must stay exactly identity");
    }

    #[test]
    fn decompose_recovers_simple_transform() {
        let mut m = Matrix2D::IDENTITY;
        m.append_transform(10.0, 20.0, 2.0, 0.5, 30.0, 0.0, 0.0, 0.0, 0.0);
        let d = m.decompose();
        assert!((d.x - 10.0).abs() < 1e-9);
        assert!((d.y - 20.0).abs() < 1e-9);
        assert!((d.scale_x - 2.0).abs() < 1e-9);
        assert!((d.scale_y - 0.5).abs() < 1e-9);
        assert!((d.rotation - 30.0).abs() < 1e-6);
        assert_eq!(d.skew_x, 0.0);
        assert_eq!(d.skew_y, 0.0);
    }

    #[test]
    fn decompose_is_visually_faithful_not_unique() {
        let mut m = Matrix2D::IDENTITY;
        m.append_transform(0.0, 0.0, 1.0, 1.0, 20.0, 15.0, 0.0, 0.0, 0.0);
        let d = m.decompose();
        // Rebuild from the decomposition and compare a transformed point.
        let mut rebuilt = Matrix2D::IDENTITY;
        rebuilt.append_transform(
            d.x, d.y, d.scale_x, d.scale_y, d.rotation, d.skew_x, d.skew_y, 0.0, 0.0,
        );
        let p = m.transform_point(13.0, -4.0);
        let q = rebuilt.transform_point(13.0, -4.0);
        assert!((p - q).hypot() < 1e-6, "decompose/recompose must agree visually");
    }

    #[test]
    fn affine_round_trip() {
        let mut m = Matrix2D::IDENTITY;
        m.translate(4.0, 5.0).rotate(12.0);
        let affine: Affine = m.into();
        let back: Matrix2D = affine.into();
        let p = m.transform_point(9.0, 9.0);
        let q = affine * Point::new(9.0, 9.0);
        assert_pt(p, q.x, q.y);
        assert!((back.a - m.a).abs() < 1e-12);
        assert!((back.tx - m.tx).abs() < 1e-12);
    }

    #[test]
    fn translate_respects_existing_transform() {
        let mut m = Matrix2D::IDENTITY;
        m.scale(2.0, 2.0).translate(5.0, 0.0);
        // Local translation is scaled by the existing transform.
        assert_pt(m.transform_point(0.0, 0.0), 10.0, 0.0);
    }
}
