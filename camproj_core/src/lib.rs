// Copyright 2026 the Camproj Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera projection of world-space points onto raster pixel coordinates.
//!
//! `camproj_core` takes the camera transforms a rendering toolkit produces
//! for a frame and works out where a world-space point lands in the rendered
//! image. It is `no_std` compatible, allocation-free, and holds no state
//! between calls.
//!
//! # Architecture
//!
//! ```text
//!   toolkit camera ──► ElementSource ──► adapter::to_array() ──► Transform4x4
//!                                                                     │
//!          ┌──────────────────────────────────────────────────────────┘
//!          ▼
//!   Projector::project(world, model_view, projection, viewport)
//!          │
//!          ▼
//!   ProjectedPixel (top-left origin, unclamped) ──► overlay
//! ```
//!
//! **[`adapter`]** — [`ElementSource`](adapter::ElementSource) capability
//! trait over opaque transform objects, and [`to_array`](adapter::to_array)
//! to copy one into a dense matrix.
//!
//! **[`project`]** — The [`Projector`](project::Projector): model-view,
//! projection, perspective divide, window scaling, and conversion to raster
//! pixels.
//!
//! **[`camera`]** — A perspective [`Camera`](camera::Camera) that derives
//! both matrices from position, focal point, view angle, and clipping range.
//!
//! **[`transform`]**, **[`point`]**, **[`viewport`]** — The plain data the
//! pipeline runs on.
//!
//! **[`error`]** — Extraction, invalid-input, and degenerate-projection
//! errors.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! instrumentation, with zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[cfg(test)]
extern crate alloc;

pub mod adapter;
pub mod camera;
pub mod error;
pub mod point;
pub mod project;
pub mod trace;
pub mod transform;
pub mod viewport;
