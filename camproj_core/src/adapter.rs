// Copyright 2026 the Camproj Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Extraction of dense matrices from opaque transform sources.
//!
//! Rendering toolkits tend to expose camera transforms as objects with an
//! element accessor rather than a plain array. [`ElementSource`] is that
//! accessor as a capability trait, and [`to_array`] copies a source into a
//! [`Transform4x4`] so the projector only ever deals with plain matrices.
//!
//! Implementations are provided for the layouts callers actually hand us:
//! row-major arrays, column-major arrays ([`ColumnMajor`]), accessor closures
//! ([`ElementFn`]), and 2-D [`kurbo::Affine`] transforms.

use kurbo::Affine;

use crate::error::ExtractionError;
use crate::transform::Transform4x4;

/// Something that can hand out the elements of a 4×4 transform.
///
/// `row` and `col` are always in `0..4` when called from [`to_array`].
pub trait ElementSource {
    /// Reads the element at (`row`, `col`).
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError`] if the element cannot be read.
    fn element(&self, row: usize, col: usize) -> Result<f64, ExtractionError>;
}

/// Copies all 16 elements of `source` into a new [`Transform4x4`].
///
/// Cells are read in row-major order. Values are copied as-is; finiteness is
/// checked later by the projector.
///
/// # Errors
///
/// Returns the [`ExtractionError`] of the first element the source fails to
/// supply.
pub fn to_array<S: ElementSource + ?Sized>(source: &S) -> Result<Transform4x4, ExtractionError> {
    let mut rows = [[0.0_f64; 4]; 4];
    for (r, row) in rows.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = source.element(r, c)?;
        }
    }
    Ok(Transform4x4::from_rows_array_2d(rows))
}

fn checked(row: usize, col: usize) -> Result<(), ExtractionError> {
    if row < 4 && col < 4 {
        Ok(())
    } else {
        Err(ExtractionError { row, col })
    }
}

impl ElementSource for Transform4x4 {
    fn element(&self, row: usize, col: usize) -> Result<f64, ExtractionError> {
        checked(row, col)?;
        Ok(self.rows[row][col])
    }
}

/// Row-major: `m[row][col]`.
impl ElementSource for [[f64; 4]; 4] {
    fn element(&self, row: usize, col: usize) -> Result<f64, ExtractionError> {
        checked(row, col)?;
        Ok(self[row][col])
    }
}

/// Row-major flat: `m[row * 4 + col]`.
impl ElementSource for [f64; 16] {
    fn element(&self, row: usize, col: usize) -> Result<f64, ExtractionError> {
        checked(row, col)?;
        Ok(self[row * 4 + col])
    }
}

impl<S: ElementSource + ?Sized> ElementSource for &S {
    fn element(&self, row: usize, col: usize) -> Result<f64, ExtractionError> {
        (**self).element(row, col)
    }
}

/// A column-major `[[f64; 4]; 4]`, as laid out by GPU APIs.
///
/// Each inner array is one *column*.
#[derive(Clone, Copy, Debug)]
pub struct ColumnMajor<'a>(pub &'a [[f64; 4]; 4]);

impl ElementSource for ColumnMajor<'_> {
    fn element(&self, row: usize, col: usize) -> Result<f64, ExtractionError> {
        checked(row, col)?;
        Ok(self.0[col][row])
    }
}

/// Adapts an accessor closure, e.g. a wrapper around a toolkit matrix
/// object's `GetElement(row, col)`.
///
/// The closure returns `None` for elements it cannot supply.
pub struct ElementFn<F>(pub F);

impl<F> core::fmt::Debug for ElementFn<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ElementFn").finish_non_exhaustive()
    }
}

impl<F: Fn(usize, usize) -> Option<f64>> ElementSource for ElementFn<F> {
    fn element(&self, row: usize, col: usize) -> Result<f64, ExtractionError> {
        (self.0)(row, col).ok_or(ExtractionError { row, col })
    }
}

/// Embeds a 2-D affine transform: x and y are mapped by the affine, z and w
/// pass through unchanged.
impl ElementSource for Affine {
    fn element(&self, row: usize, col: usize) -> Result<f64, ExtractionError> {
        checked(row, col)?;
        let [a, b, c, d, e, f] = self.as_coeffs();
        let v = match (row, col) {
            (0, 0) => a,
            (0, 1) => c,
            (0, 3) => e,
            (1, 0) => b,
            (1, 1) => d,
            (1, 3) => f,
            (2, 2) | (3, 3) => 1.0,
            _ => 0.0,
        };
        Ok(v)
    }
}
