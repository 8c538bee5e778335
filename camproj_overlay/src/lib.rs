// Copyright 2026 the Camproj Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raster frames and projected-point markers for camproj.
//!
//! This crate is the consumer side of [`camproj_core`]: it takes the
//! [`ProjectedPixel`](camproj_core::viewport::ProjectedPixel) computed for a
//! frame and draws a marker on the rendered image. It defines:
//!
//! - [`Raster`] — an RGB8 frame with top-left origin
//! - [`Marker`] — ring radius, stroke width, and color
//! - [`draw_marker`] — draws one ring, clipped to the frame
//! - [`overlay`] — applies a projection result, skipping failures

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod marker;
mod raster;

pub use marker::{Marker, OverlayOutcome, draw_marker, overlay, overlay_traced};
pub use raster::{Raster, RasterError, Rgb};
