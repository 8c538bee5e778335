// Copyright 2026 the Camproj Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Homogeneous 4-component points.

use core::ops::Mul;

/// A point `(x, y, z, w)` in homogeneous coordinates.
///
/// Finite world positions have `w == 1.0`. After a projection transform, `w`
/// carries the perspective depth that the perspective divide removes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HomogeneousPoint {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
    /// Homogeneous component.
    pub w: f64,
}

impl HomogeneousPoint {
    /// Creates a point from all four components.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Lifts a 3-D world position to homogeneous coordinates with `w = 1.0`.
    #[inline]
    #[must_use]
    pub const fn from_world([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    /// Returns `[x, y, z, w]`.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Are all four components finite?
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    /// Divides every component by `w`.
    ///
    /// Returns `None` when `w` is exactly zero (a point at infinity or on the
    /// camera's eye plane). The result always has `w == 1.0` otherwise.
    #[inline]
    #[must_use]
    pub fn perspective_divide(self) -> Option<Self> {
        if self.w == 0.0 {
            return None;
        }
        Some(Self {
            x: self.x / self.w,
            y: self.y / self.w,
            z: self.z / self.w,
            w: 1.0,
        })
    }
}

impl Mul<f64> for HomogeneousPoint {
    type Output = Self;

    #[inline]
    fn mul(self, k: f64) -> Self {
        Self {
            x: self.x * k,
            y: self.y * k,
            z: self.z * k,
            w: self.w * k,
        }
    }
}
