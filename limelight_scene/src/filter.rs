// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filter metadata.
//!
//! Pixel kernels run in the embedding backend; the tree only needs to
//! know how much a filter inflates a node's cache region.

use kurbo::Insets;

/// Cache-region metadata for a backend filter.
pub trait Filter: core::fmt::Debug {
    /// Extra margin the filter needs around the content, per side.
    fn padding(&self) -> Insets;
}

/// A gaussian-style blur described by per-axis radii.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlurFilter {
    /// Horizontal blur radius.
    pub blur_x: f64,
    /// Vertical blur radius.
    pub blur_y: f64,
    /// Number of blur passes the backend should run.
    pub quality: u32,
}

impl BlurFilter {
    /// A blur with the given radii and pass count.
    pub fn new(blur_x: f64, blur_y: f64, quality: u32) -> Self {
        Self {
            blur_x,
            blur_y,
            quality,
        }
    }
}

impl Filter for BlurFilter {
    fn padding(&self) -> Insets {
        let q = f64::from(self.quality.max(1));
        let x = self.blur_x.max(0.0) * q;
        let y = self.blur_y.max(0.0) * q;
        Insets::uniform_xy(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_padding_scales_with_quality() {
        let f = BlurFilter::new(4.0, 2.0, 2);
        let pad = f.padding();
        assert_eq!(pad.x0, 8.0);
        assert_eq!(pad.y0, 4.0);
    }
}
