// Copyright 2026 the Camproj Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dense row-major 4×4 transform.
//!
//! This type covers what camera projection needs (identity, products with
//! matrices and homogeneous points, element access, finiteness checks) without
//! pulling in a full linear-algebra crate.

use core::ops::Mul;

use crate::point::HomogeneousPoint;

/// A row-major 4×4 transform stored as `[[f64; 4]; 4]`.
///
/// Each inner array is one *row* of the matrix. Points are column vectors
/// multiplied on the right (`M · p`), so row 3 carries the homogeneous
/// (perspective) terms and column 3 the translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform4x4 {
    /// Four rows, each a 4-element array indexed by column.
    pub rows: [[f64; 4]; 4],
}

impl Transform4x4 {
    /// The 4×4 identity matrix.
    pub const IDENTITY: Self = Self {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Creates a transform from four row arrays.
    #[inline]
    #[must_use]
    pub const fn from_rows(row0: [f64; 4], row1: [f64; 4], row2: [f64; 4], row3: [f64; 4]) -> Self {
        Self {
            rows: [row0, row1, row2, row3],
        }
    }

    /// Creates a transform from a row-major 2-D array.
    #[inline]
    #[must_use]
    pub const fn from_rows_array_2d(rows: [[f64; 4]; 4]) -> Self {
        Self { rows }
    }

    /// Returns the rows as a 2-D array.
    #[inline]
    #[must_use]
    pub const fn to_rows_array_2d(self) -> [[f64; 4]; 4] {
        self.rows
    }

    /// Returns the element at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if `row >= 4` or `col >= 4`.
    #[inline]
    #[must_use]
    pub const fn element(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    /// Returns row `i` (0-based).
    ///
    /// # Panics
    ///
    /// Panics if `i >= 4`.
    #[inline]
    #[must_use]
    pub const fn row(&self, i: usize) -> [f64; 4] {
        self.rows[i]
    }

    /// Returns column `j` (0-based).
    ///
    /// # Panics
    ///
    /// Panics if `j >= 4`.
    #[inline]
    #[must_use]
    pub const fn col(&self, j: usize) -> [f64; 4] {
        let r = &self.rows;
        [r[0][j], r[1][j], r[2][j], r[3][j]]
    }

    /// Creates a pure translation transform.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            rows: [
                [1.0, 0.0, 0.0, x],
                [0.0, 1.0, 0.0, y],
                [0.0, 0.0, 1.0, z],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Creates a non-uniform scale transform.
    #[inline]
    #[must_use]
    pub const fn from_scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self::from_diagonal(sx, sy, sz, 1.0)
    }

    /// Creates a diagonal matrix, including the homogeneous entry.
    #[inline]
    #[must_use]
    pub const fn from_diagonal(d0: f64, d1: f64, d2: f64, d3: f64) -> Self {
        Self {
            rows: [
                [d0, 0.0, 0.0, 0.0],
                [0.0, d1, 0.0, 0.0],
                [0.0, 0.0, d2, 0.0],
                [0.0, 0.0, 0.0, d3],
            ],
        }
    }

    /// Returns the transpose.
    #[inline]
    #[must_use]
    pub const fn transpose(self) -> Self {
        Self {
            rows: [self.col(0), self.col(1), self.col(2), self.col(3)],
        }
    }

    /// Multiplies every element by `k`.
    ///
    /// As a homogeneous transform this is the same mapping for any nonzero
    /// `k`; only the `w` of transformed points changes.
    #[inline]
    #[must_use]
    pub fn scaled(self, k: f64) -> Self {
        let mut rows = self.rows;
        for row in &mut rows {
            for v in row.iter_mut() {
                *v *= k;
            }
        }
        Self { rows }
    }

    /// Is this transform [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.rows.iter().flatten().all(|v| v.is_finite())
    }

    /// Is any element of this transform [NaN]?
    ///
    /// [NaN]: f64::is_nan
    #[inline]
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.rows.iter().flatten().any(|v| v.is_nan())
    }
}

impl Default for Transform4x4 {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform4x4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.rows;
        let b = &rhs.rows;
        let mut out = [[0.0_f64; 4]; 4];
        let mut i = 0;
        while i < 4 {
            let mut j = 0;
            while j < 4 {
                out[i][j] =
                    a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j] + a[i][3] * b[3][j];
                j += 1;
            }
            i += 1;
        }
        Self { rows: out }
    }
}

impl Mul<HomogeneousPoint> for Transform4x4 {
    type Output = HomogeneousPoint;

    /// Standard matrix-vector product: component `i` is row `i` dotted with `p`.
    #[inline]
    fn mul(self, p: HomogeneousPoint) -> HomogeneousPoint {
        let v = p.to_array();
        let dot = |r: [f64; 4]| r[0] * v[0] + r[1] * v[1] + r[2] * v[2] + r[3] * v[3];
        HomogeneousPoint::new(
            dot(self.rows[0]),
            dot(self.rows[1]),
            dot(self.rows[2]),
            dot(self.rows[3]),
        )
    }
}
