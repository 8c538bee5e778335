// Copyright 2026 the Camproj Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! RGB8 raster frames.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

/// An RGB color, 8 bits per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Pure red.
    pub const RED: Self = Self([255, 0, 0]);

    /// Converts from floating-point channels in `0.0..=1.0`.
    ///
    /// Out-of-range values are clamped.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is clamped to 0..=255 before the cast"
    )]
    #[must_use]
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        Self([q(r), q(g), q(b)])
    }
}

/// Errors from [`Raster`] construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RasterError {
    /// The byte buffer does not hold `width × height × 3` bytes.
    SizeMismatch {
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "raster needs {expected} bytes, got {actual}")
            }
        }
    }
}

impl core::error::Error for RasterError {}

/// A rendered frame: row-major RGB8, top-left origin.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Raster {
    /// Creates a frame filled with one color.
    #[must_use]
    pub fn new(width: u32, height: u32, fill: Rgb) -> Self {
        let pixels = width as usize * height as usize;
        let mut data = vec![0; pixels * 3];
        for px in data.chunks_exact_mut(3) {
            px.copy_from_slice(&fill.0);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wraps an existing RGB8 buffer, row-major with the first row on top.
    ///
    /// Toolkit framebuffers are usually bottom-up; call
    /// [`flip_vertical`](Self::flip_vertical) after wrapping one.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::SizeMismatch`] if `data` is not exactly
    /// `width × height × 3` bytes.
    pub fn from_rgb_bytes(width: u32, height: u32, data: Vec<u8>) -> Result<Self, RasterError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(RasterError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGB8 bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the frame and returns its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        let x = u32::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u32::try_from(y).ok().filter(|&y| y < self.height)?;
        Some((y as usize * self.width as usize + x as usize) * 3)
    }

    /// Returns the pixel at (`x`, `y`), or `None` outside the frame.
    #[must_use]
    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgb> {
        let i = self.offset(x, y)?;
        Some(Rgb([self.data[i], self.data[i + 1], self.data[i + 2]]))
    }

    /// Sets the pixel at (`x`, `y`). Returns `false` outside the frame.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgb) -> bool {
        match self.offset(x, y) {
            Some(i) => {
                self.data[i..i + 3].copy_from_slice(&color.0);
                true
            }
            None => false,
        }
    }

    /// Reverses the row order, converting between bottom-up and top-down
    /// layouts.
    pub fn flip_vertical(&mut self) {
        let stride = self.width as usize * 3;
        if stride == 0 {
            return;
        }
        let rows = self.height as usize;
        for top in 0..rows / 2 {
            let bottom = rows - 1 - top;
            let (upper, lower) = self.data.split_at_mut(bottom * stride);
            upper[top * stride..(top + 1) * stride].swap_with_slice(&mut lower[..stride]);
        }
    }
}
