// Copyright 2026 the Camproj Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use camproj_core::trace::{
    OverlayAction, OverlayEvent, ProjectEvent, ProjectFailedEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn action_name(action: OverlayAction) -> &'static str {
    match action {
        OverlayAction::Drawn => "drawn",
        OverlayAction::OffScreen => "off-screen",
        OverlayAction::Skipped => "skipped",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_project(&mut self, e: &ProjectEvent) {
        let visible = if e.is_visible() { "visible" } else { "off-screen" };
        let _ = writeln!(
            self.writer,
            "[project] world=({:.3}, {:.3}, {:.3}) w={:.4} screen=({:.2}, {:.2}) \
             pixel=({}, {}) in {}x{} {visible}",
            e.point.x,
            e.point.y,
            e.point.z,
            e.clip.w,
            e.screen.x,
            e.screen.y,
            e.pixel.x,
            e.pixel.y,
            e.viewport.width,
            e.viewport.height,
        );
    }

    fn on_project_failed(&mut self, e: &ProjectFailedEvent) {
        let _ = writeln!(
            self.writer,
            "[project:failed] world=({:.3}, {:.3}, {:.3}) error={}",
            e.point.x, e.point.y, e.point.z, e.error,
        );
    }

    fn on_overlay(&mut self, e: &OverlayEvent) {
        match e.pixel {
            Some(p) => {
                let _ = writeln!(
                    self.writer,
                    "[overlay] {} at ({}, {})",
                    action_name(e.action),
                    p.x,
                    p.y,
                );
            }
            None => {
                let _ = writeln!(self.writer, "[overlay] {}", action_name(e.action));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camproj_core::error::DegenerateProjectionError;
    use camproj_core::point::HomogeneousPoint;
    use camproj_core::viewport::{ProjectedPixel, ViewportSize};
    use kurbo::Point;

    #[test]
    fn pretty_print_project() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_project(&ProjectEvent {
            point: HomogeneousPoint::from_world([10.0, 10.0, 10.0]),
            clip: HomogeneousPoint::new(0.0, 0.0, 0.5, 13.0),
            screen: Point::new(300.0, 300.0),
            pixel: ProjectedPixel::new(300, 300),
            viewport: ViewportSize::new(600, 600),
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.starts_with("[project]"), "got: {output}");
        assert!(output.contains("pixel=(300, 300)"), "got: {output}");
        assert!(output.contains(" visible"), "got: {output}");
    }

    #[test]
    fn pretty_print_failure_and_overlay() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_project_failed(&ProjectFailedEvent {
            point: HomogeneousPoint::from_world([0.0, 0.0, 1.0]),
            error: DegenerateProjectionError { w: 0.0 }.into(),
        });
        sink.on_overlay(&OverlayEvent {
            action: OverlayAction::Skipped,
            pixel: None,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2, "got: {output}");
        assert!(lines[0].starts_with("[project:failed]"), "got: {output}");
        assert_eq!(lines[1], "[overlay] skipped");
    }
}
