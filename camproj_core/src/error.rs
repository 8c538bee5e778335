// Copyright 2026 the Camproj Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for matrix extraction and projection.
//!
//! Three failure kinds are distinguished:
//!
//! - [`ExtractionError`] — a transform source could not supply an element.
//!   Usually a malformed or disconnected camera object.
//! - [`InvalidInputError`] — non-finite matrix entries, a non-finite point,
//!   an empty viewport, or a bad configuration value. A caller bug.
//! - [`DegenerateProjectionError`] — the perspective divide hit `w == 0` or
//!   produced a non-finite result.
//!
//! [`ProjectionError`] wraps all three. None of them are retried inside this
//! crate; callers skip the overlay for that frame or re-read camera state.

use core::fmt;

/// A transform source could not supply the element at (`row`, `col`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtractionError {
    /// Row of the first unreadable element.
    pub row: usize,
    /// Column of the first unreadable element.
    pub col: usize,
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transform element ({}, {}) could not be read",
            self.row, self.col
        )
    }
}

impl core::error::Error for ExtractionError {}

/// Which matrix a validation failure refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatrixRole {
    /// World space → camera space.
    ModelView,
    /// Camera space → clip space.
    Projection,
}

impl MatrixRole {
    /// Returns a short label for messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ModelView => "model-view",
            Self::Projection => "projection",
        }
    }
}

/// Inputs that can never produce a meaningful projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InvalidInputError {
    /// The named matrix has a NaN or infinite entry.
    NonFiniteMatrix(MatrixRole),
    /// The world point has a NaN or infinite coordinate.
    NonFinitePoint,
    /// The viewport has a zero (or, from signed sources, negative) extent.
    EmptyViewport {
        /// Width as supplied.
        width: i64,
        /// Height as supplied.
        height: i64,
    },
    /// The window-size scale is not a positive finite number.
    InvalidWindowSize(f64),
    /// The camera aspect ratio is not a positive finite number.
    InvalidAspectRatio(f64),
}

impl fmt::Display for InvalidInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteMatrix(role) => {
                write!(f, "{} matrix has a non-finite entry", role.as_str())
            }
            Self::NonFinitePoint => f.write_str("world point has a non-finite coordinate"),
            Self::EmptyViewport { width, height } => {
                write!(f, "viewport {width}x{height} has no area")
            }
            Self::InvalidWindowSize(size) => {
                write!(f, "window size {size} is not a positive finite number")
            }
            Self::InvalidAspectRatio(aspect) => {
                write!(f, "aspect ratio {aspect} is not a positive finite number")
            }
        }
    }
}

impl core::error::Error for InvalidInputError {}

/// The perspective divide cannot produce a finite position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DegenerateProjectionError {
    /// Clip-space `w` of the offending point.
    pub w: f64,
}

impl fmt::Display for DegenerateProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.w == 0.0 {
            f.write_str("point lies on the camera eye plane (clip w is zero)")
        } else {
            write!(f, "perspective divide by w={} is not finite", self.w)
        }
    }
}

impl core::error::Error for DegenerateProjectionError {}

/// Any failure of the extraction → projection pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProjectionError {
    /// See [`ExtractionError`].
    Extraction(ExtractionError),
    /// See [`InvalidInputError`].
    InvalidInput(InvalidInputError),
    /// See [`DegenerateProjectionError`].
    Degenerate(DegenerateProjectionError),
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extraction(e) => write!(f, "extraction failed: {e}"),
            Self::InvalidInput(e) => write!(f, "invalid input: {e}"),
            Self::Degenerate(e) => write!(f, "degenerate projection: {e}"),
        }
    }
}

impl core::error::Error for ProjectionError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Extraction(e) => Some(e),
            Self::InvalidInput(e) => Some(e),
            Self::Degenerate(e) => Some(e),
        }
    }
}

impl From<ExtractionError> for ProjectionError {
    fn from(e: ExtractionError) -> Self {
        Self::Extraction(e)
    }
}

impl From<InvalidInputError> for ProjectionError {
    fn from(e: InvalidInputError) -> Self {
        Self::InvalidInput(e)
    }
}

impl From<DegenerateProjectionError> for ProjectionError {
    fn from(e: DegenerateProjectionError) -> Self {
        Self::Degenerate(e)
    }
}
