// Copyright 2026 the Camproj Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter for recorded events.
//!
//! [`export`] writes the events collected by a
//! [`RecorderSink`](super::recorder::RecorderSink) as a JSON array, one object
//! per event, each tagged with a `"kind"` field.

use std::io::{self, Write};

use serde_json::{Value, json};

use camproj_core::trace::OverlayAction;

use crate::recorder::RecordedEvent;

/// Exports recorded events as a pretty-printed JSON array.
///
/// Each object carries `"seq"` (its index in the log) and `"kind"`
/// (`"project"`, `"project_failed"`, or `"overlay"`), followed by the event's
/// fields.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let mut out: Vec<Value> = Vec::with_capacity(events.len());

    for (seq, recorded) in events.iter().enumerate() {
        match recorded {
            RecordedEvent::Project(e) => {
                out.push(json!({
                    "seq": seq,
                    "kind": "project",
                    "world": [e.point.x, e.point.y, e.point.z],
                    "clip": e.clip.to_array(),
                    "screen": [e.screen.x, e.screen.y],
                    "pixel": [e.pixel.x, e.pixel.y],
                    "viewport": [e.viewport.width, e.viewport.height],
                    "visible": e.is_visible(),
                }));
            }
            RecordedEvent::ProjectFailed(e) => {
                out.push(json!({
                    "seq": seq,
                    "kind": "project_failed",
                    "world": [e.point.x, e.point.y, e.point.z],
                    "error": e.error.to_string(),
                }));
            }
            RecordedEvent::Overlay(e) => {
                out.push(json!({
                    "seq": seq,
                    "kind": "overlay",
                    "action": action_name(e.action),
                    "pixel": e.pixel.map(|p| [p.x, p.y]),
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &out)?;
    Ok(())
}

fn action_name(action: OverlayAction) -> &'static str {
    match action {
        OverlayAction::Drawn => "drawn",
        OverlayAction::OffScreen => "off_screen",
        OverlayAction::Skipped => "skipped",
    }
}
