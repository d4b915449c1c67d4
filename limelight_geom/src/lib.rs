// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Limelight Geom: the affine transform layer of the Limelight display list.
//!
//! - [`Matrix2D`] is a canvas-style 6-parameter affine matrix with in-place,
//!   chainable [`append`](Matrix2D::append) / [`prepend`](Matrix2D::prepend)
//!   composition, registration-point aware
//!   [`append_transform`](Matrix2D::append_transform), inversion, and a
//!   documented-lossy [`decompose`](Matrix2D::decompose).
//! - [`transform_rect_bbox`] fits an axis-aligned box around a transformed
//!   rectangle (conservative under rotation and shear).
//!
//! Points and rectangles are [`kurbo`] types; [`Matrix2D`] converts to and
//! from [`kurbo::Affine`] losslessly, so callers can drop into Kurbo for path
//! math at any time.
//!
//! # Example
//!
//! ```
//! use limelight_geom::Matrix2D;
//! use kurbo::Point;
//!
//! let mut m = Matrix2D::IDENTITY;
//! m.translate(100.0, 0.0).rotate(90.0);
//! let p = m.transform_point(10.0, 0.0);
//! assert!((p.x - 100.0).abs() < 1e-9);
//! assert!((p.y - 10.0).abs() < 1e-9);
//!
//! let mut inv = m;
//! inv.invert();
//! let back = inv.transform_point(p.x, p.y);
//! assert!((back - Point::new(10.0, 0.0)).hypot() < 1e-9);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod floats;
mod matrix;

pub use matrix::{Decomposition, Matrix2D};

use kurbo::{Point, Rect};

/// Transform an axis-aligned `Rect` by `m` and return a conservative
/// axis-aligned bounding box of the result.
///
/// Rotated or sheared content reports looser bounds than its visual
/// footprint; this is the documented bounds model of the display list.
pub fn transform_rect_bbox(m: &Matrix2D, rect: Rect) -> Rect {
    let p0 = m.transform_point(rect.x0, rect.y0);
    let p1 = m.transform_point(rect.x1, rect.y0);
    let p2 = m.transform_point(rect.x0, rect.y1);
    let p3 = m.transform_point(rect.x1, rect.y1);
    let min_x = p0.x.min(p1.x).min(p2.x).min(p3.x);
    let min_y = p0.y.min(p1.y).min(p2.y).min(p3.y);
    let max_x = p0.x.max(p1.x).max(p2.x).max(p3.x);
    let max_y = p0.y.max(p1.y).max(p2.y).max(p3.y);
    Rect::new(min_x, min_y, max_x, max_y)
}

/// Union two optional rectangles, treating `None` as "no content".
///
/// Containers with zero bounded children report `None`, never a zero-size
/// rectangle, so bounds aggregation cannot use `Rect::union` directly.
pub fn union_opt(a: Option<Rect>, b: Option<Rect>) -> Option<Rect> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.union(b)),
        (r @ Some(_), None) | (None, r @ Some(_)) => r,
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_4;
    use kurbo::Affine;

    #[test]
    fn bbox_of_rotated_rect_expands() {
        let mut m = Matrix2D::IDENTITY;
        m.rotate(45.0);
        let r = transform_rect_bbox(&m, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(r.width() > 10.0, "bbox should expand when rotated");
        let expected = Affine::rotate(FRAC_PI_4)
            .transform_rect_bbox(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!((r.width() - expected.width()).abs() < 1e-9);
        assert!((r.height() - expected.height()).abs() < 1e-9);
    }

    #[test]
    fn union_opt_treats_none_as_empty() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 30.0, 30.0);
        assert_eq!(union_opt(Some(a), Some(b)), Some(a.union(b)));
        assert_eq!(union_opt(Some(a), None), Some(a));
        assert_eq!(union_opt(None, Some(b)), Some(b));
        assert_eq!(union_opt(None, None), None);
    }

    #[test]
    fn bbox_of_translated_rect_is_exact() {
        let mut m = Matrix2D::IDENTITY;
        m.translate(5.0, -3.0);
        let r = transform_rect_bbox(&m, Rect::new(0.0, 0.0, 4.0, 4.0));
        assert_eq!(r, Rect::new(5.0, -3.0, 9.0, 1.0));
    }
}
