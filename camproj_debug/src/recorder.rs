// Copyright 2026 the Camproj Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event it
//! receives, in order, as a [`RecordedEvent`]. [`replay`] feeds a log back
//! into another sink, and [`json::export`](crate::json::export) writes it out
//! for offline inspection.

use camproj_core::trace::{OverlayEvent, ProjectEvent, ProjectFailedEvent, TraceSink};

/// A recorded trace event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A successful projection.
    Project(ProjectEvent),
    /// A failed projection.
    ProjectFailed(ProjectFailedEvent),
    /// An overlay step.
    Overlay(OverlayEvent),
}

/// A [`TraceSink`] that appends every event to a log.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Number of recorded projections that landed inside their viewport.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RecordedEvent::Project(p) if p.is_visible()))
            .count()
    }

    /// Number of recorded projection failures.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RecordedEvent::ProjectFailed(_)))
            .count()
    }
}

impl TraceSink for RecorderSink {
    fn on_project(&mut self, e: &ProjectEvent) {
        self.events.push(RecordedEvent::Project(*e));
    }

    fn on_project_failed(&mut self, e: &ProjectFailedEvent) {
        self.events.push(RecordedEvent::ProjectFailed(*e));
    }

    fn on_overlay(&mut self, e: &OverlayEvent) {
        self.events.push(RecordedEvent::Overlay(*e));
    }
}

/// Replays recorded events into another sink, in order.
pub fn replay(events: &[RecordedEvent], sink: &mut dyn TraceSink) {
    for event in events {
        match event {
            RecordedEvent::Project(e) => sink.on_project(e),
            RecordedEvent::ProjectFailed(e) => sink.on_project_failed(e),
            RecordedEvent::Overlay(e) => sink.on_overlay(e),
        }
    }
}
