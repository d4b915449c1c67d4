// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float functions routed through std or libm depending on features.
//!
//! Mirrors Kurbo's approach: `std` uses the intrinsics, `libm` provides the
//! `no_std` fallback. One of the two features must be enabled.

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("limelight_geom requires either the `std` or `libm` feature");

/// Extra float methods available in both std and `libm` builds.
pub(crate) trait FloatExt {
    fn sin_(self) -> Self;
    fn cos_(self) -> Self;
    fn atan2_(self, other: Self) -> Self;
    fn sqrt_(self) -> Self;
}

#[cfg(feature = "std")]
impl FloatExt for f64 {
    #[inline]
    fn sin_(self) -> Self {
        self.sin()
    }
    #[inline]
    fn cos_(self) -> Self {
        self.cos()
    }
    #[inline]
    fn atan2_(self, other: Self) -> Self {
        self.atan2(other)
    }
    #[inline]
    fn sqrt_(self) -> Self {
        self.sqrt()
    }
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
impl FloatExt for f64 {
    #[inline]
    fn sin_(self) -> Self {
        libm::sin(self)
    }
    #[inline]
    fn cos_(self) -> Self {
        libm::cos(self)
    }
    #[inline]
    fn atan2_(self, other: Self) -> Self {
        libm::atan2(self, other)
    }
    #[inline]
    fn sqrt_(self) -> Self {
        libm::sqrt(self)
    }
}
