// Copyright 2026 the Camproj Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport sizes and raster pixel coordinates.
//!
//! The raster convention throughout is top-left origin with y increasing
//! downward, matching image buffers rather than the upward y of clip space.

use kurbo::{Point, Size};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::error::InvalidInputError;

/// Viewport extent in pixels, queried from the toolkit each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ViewportSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ViewportSize {
    /// Creates a viewport size.
    ///
    /// Zero extents are representable here and rejected at projection time.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Creates a viewport size from the signed sizes many toolkits report.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::EmptyViewport`] if either extent is ≤ 0.
    pub fn from_signed(width: i32, height: i32) -> Result<Self, InvalidInputError> {
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok(Self::new(w, h)),
            _ => Err(InvalidInputError::EmptyViewport {
                width: width.into(),
                height: height.into(),
            }),
        }
    }

    /// Checks that both extents are nonzero.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::EmptyViewport`] otherwise.
    pub fn validate(self) -> Result<Self, InvalidInputError> {
        if self.width == 0 || self.height == 0 {
            return Err(InvalidInputError::EmptyViewport {
                width: self.width.into(),
                height: self.height.into(),
            });
        }
        Ok(self)
    }

    /// Returns the extent as a [`kurbo::Size`].
    #[inline]
    #[must_use]
    pub fn size(self) -> Size {
        Size::new(self.width.into(), self.height.into())
    }

    /// Returns the raster-space centre `(width / 2, height / 2)`.
    #[inline]
    #[must_use]
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) * 0.5, f64::from(self.height) / 2.0)
    }

    /// Returns `width / height`, the aspect ratio a projection matrix for
    /// this viewport should be built with.
    #[inline]
    #[must_use]
    pub fn aspect_ratio(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Integer pixel coordinates in a top-left-origin raster.
///
/// Coordinates outside `[0, width) × [0, height)` mean the point is off
/// screen; they are valid and never clamped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ProjectedPixel {
    /// Column, increasing to the right.
    pub x: i64,
    /// Row, increasing downward.
    pub y: i64,
}

impl ProjectedPixel {
    /// Creates a pixel coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Is this pixel inside a raster of the given size?
    #[inline]
    #[must_use]
    pub fn is_within(self, viewport: ViewportSize) -> bool {
        (0..i64::from(viewport.width)).contains(&self.x)
            && (0..i64::from(viewport.height)).contains(&self.y)
    }

    /// Returns the pixel as a [`kurbo::Point`].
    #[inline]
    #[must_use]
    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

/// How sub-pixel positions become integer pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PixelRounding {
    /// Nearest pixel, halfway cases away from zero.
    #[default]
    Round,
    /// Toward zero, as a plain float-to-int conversion does.
    Truncate,
}

impl PixelRounding {
    /// Is `p` inside the range [`apply`](Self::apply) can convert?
    #[inline]
    #[must_use]
    pub fn can_represent(p: Point) -> bool {
        // 2^63; every f64 below it rounds to a value that still fits.
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;
        (-LIMIT..LIMIT).contains(&p.x) && (-LIMIT..LIMIT).contains(&p.y)
    }

    /// Converts one finite coordinate.
    ///
    /// `v` must lie in the range accepted by
    /// [`can_represent`](Self::can_represent); the projector rejects
    /// positions outside it before rounding.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "rounding to whole pixels is the point; range is checked by callers"
    )]
    #[inline]
    #[must_use]
    pub fn apply(self, v: f64) -> i64 {
        match self {
            Self::Round => v.round() as i64,
            Self::Truncate => v as i64,
        }
    }

    /// Converts a sub-pixel position.
    #[inline]
    #[must_use]
    pub fn pixel(self, p: Point) -> ProjectedPixel {
        ProjectedPixel::new(self.apply(p.x), self.apply(p.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_sizes_must_be_positive() {
        assert_eq!(
            ViewportSize::from_signed(640, 480),
            Ok(ViewportSize::new(640, 480))
        );
        assert_eq!(
            ViewportSize::from_signed(0, 480),
            Err(InvalidInputError::EmptyViewport {
                width: 0,
                height: 480
            })
        );
        assert_eq!(
            ViewportSize::from_signed(640, -1),
            Err(InvalidInputError::EmptyViewport {
                width: 640,
                height: -1
            })
        );
    }

    #[test]
    fn zero_extent_fails_validation() {
        assert!(ViewportSize::new(0, 10).validate().is_err());
        assert!(ViewportSize::new(10, 0).validate().is_err());
        assert!(ViewportSize::new(1, 1).validate().is_ok());
    }

    #[test]
    fn center_and_aspect() {
        let v = ViewportSize::new(601, 400);
        assert_eq!(v.center(), Point::new(300.5, 200.0));
        assert_eq!(v.aspect_ratio(), 601.0 / 400.0);
        assert_eq!(v.size(), Size::new(601.0, 400.0));
    }

    #[test]
    fn within_is_half_open() {
        let v = ViewportSize::new(600, 400);
        assert!(ProjectedPixel::new(0, 0).is_within(v));
        assert!(ProjectedPixel::new(599, 399).is_within(v));
        assert!(!ProjectedPixel::new(600, 10).is_within(v));
        assert!(!ProjectedPixel::new(10, -1).is_within(v));
    }

    #[test]
    fn rounding_modes() {
        assert_eq!(PixelRounding::Round.apply(2.5), 3);
        assert_eq!(PixelRounding::Round.apply(-2.5), -3);
        assert_eq!(PixelRounding::Round.apply(2.49), 2);
        assert_eq!(PixelRounding::Truncate.apply(2.99), 2);
        assert_eq!(PixelRounding::Truncate.apply(-2.99), -2);
    }

    #[test]
    fn representable_range_is_i64() {
        assert!(PixelRounding::can_represent(Point::new(-9.2e18, 9.2e18)));
        assert!(!PixelRounding::can_represent(Point::new(5e24, 300.0)));
        assert!(!PixelRounding::can_represent(Point::new(300.0, -1e19)));
        assert!(!PixelRounding::can_represent(Point::new(f64::NAN, 0.0)));
    }
}
