// Copyright 2026 the Camproj Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for projection and overlay.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! projector and overlay call as they run. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use kurbo::Point;

use crate::error::ProjectionError;
use crate::point::HomogeneousPoint;
use crate::viewport::{ProjectedPixel, ViewportSize};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a point projects successfully.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectEvent {
    /// Input point in world space.
    pub point: HomogeneousPoint,
    /// Clip-space point before the perspective divide.
    pub clip: HomogeneousPoint,
    /// Unrounded raster position.
    pub screen: Point,
    /// Final pixel.
    pub pixel: ProjectedPixel,
    /// Viewport the pixel refers to.
    pub viewport: ViewportSize,
}

impl ProjectEvent {
    /// Does the pixel fall inside the viewport?
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.pixel.is_within(self.viewport)
    }
}

/// Emitted when projection fails.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectFailedEvent {
    /// Input point in world space.
    pub point: HomogeneousPoint,
    /// Why it failed.
    pub error: ProjectionError,
}

/// What the overlay did with a projection result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayAction {
    /// A marker was drawn (possibly clipped at the frame edge).
    Drawn,
    /// The marker lies entirely outside the frame.
    OffScreen,
    /// Projection failed; the frame was left untouched.
    Skipped,
}

/// Emitted after the overlay step for one marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayEvent {
    /// What happened.
    pub action: OverlayAction,
    /// Marker centre, when projection succeeded.
    pub pixel: Option<ProjectedPixel>,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from projection and overlay.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a point projects successfully.
    fn on_project(&mut self, e: &ProjectEvent) {
        _ = e;
    }

    /// Called when projection fails.
    fn on_project_failed(&mut self, e: &ProjectFailedEvent) {
        _ = e;
    }

    /// Called after the overlay step.
    fn on_overlay(&mut self, e: &OverlayEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`ProjectEvent`].
    #[inline]
    pub fn project(&mut self, e: &ProjectEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_project(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ProjectFailedEvent`].
    #[inline]
    pub fn project_failed(&mut self, e: &ProjectFailedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_project_failed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`OverlayEvent`].
    #[inline]
    pub fn overlay(&mut self, e: &OverlayEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_overlay(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DegenerateProjectionError;

    fn sample_project() -> ProjectEvent {
        ProjectEvent {
            point: HomogeneousPoint::from_world([10.0, 10.0, 10.0]),
            clip: HomogeneousPoint::new(0.0, 0.0, 0.5, 13.0),
            screen: Point::new(300.0, 300.0),
            pixel: ProjectedPixel::new(300, 300),
            viewport: ViewportSize::new(600, 600),
        }
    }

    fn sample_failure() -> ProjectFailedEvent {
        ProjectFailedEvent {
            point: HomogeneousPoint::from_world([0.0, 0.0, 1.0]),
            error: DegenerateProjectionError { w: 0.0 }.into(),
        }
    }

    #[test]
    fn visibility_follows_viewport() {
        let mut e = sample_project();
        assert!(e.is_visible());
        e.pixel = ProjectedPixel::new(3300, -2700);
        assert!(!e.is_visible());
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_project(&sample_project());
        sink.on_project_failed(&sample_failure());
        sink.on_overlay(&OverlayEvent {
            action: OverlayAction::Skipped,
            pixel: None,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.project(&sample_project());
        tracer.project_failed(&sample_failure());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            pixels: Vec<ProjectedPixel>,
            failures: usize,
        }
        impl TraceSink for RecordingSink {
            fn on_project(&mut self, e: &ProjectEvent) {
                self.pixels.push(e.pixel);
            }
            fn on_project_failed(&mut self, _: &ProjectFailedEvent) {
                self.failures += 1;
            }
        }

        let mut sink = RecordingSink {
            pixels: Vec::new(),
            failures: 0,
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.project(&sample_project());
        tracer.project_failed(&sample_failure());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.pixels, &[ProjectedPixel::new(300, 300)]);
        assert_eq!(sink.failures, 1);
    }
}
