// Copyright 2026 the Camproj Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring markers at projected positions.

use camproj_core::error::ProjectionError;
use camproj_core::trace::{OverlayAction, OverlayEvent, Tracer};
use camproj_core::viewport::ProjectedPixel;
use kurbo::{Point, Rect};

use crate::raster::{Raster, Rgb};

/// Appearance of an overlay marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    /// Ring radius in pixels, measured to the middle of the stroke.
    pub radius: f64,
    /// Stroke width in pixels.
    pub thickness: f64,
    /// Stroke color.
    pub color: Rgb,
}

impl Default for Marker {
    fn default() -> Self {
        Self {
            radius: 10.0,
            thickness: 3.0,
            color: Rgb::RED,
        }
    }
}

impl Marker {
    /// Pixel-aligned box that can contain the ring around `center`.
    #[must_use]
    pub fn bounds(&self, center: Point) -> Rect {
        let outer = self.radius + self.thickness / 2.0;
        Rect::from_center_size(center, (2.0 * outer, 2.0 * outer)).expand()
    }

    fn covers(&self, center: Point, p: Point) -> bool {
        let half = self.thickness / 2.0;
        let d = center.distance(p);
        d >= self.radius - half && d <= self.radius + half
    }
}

/// Outcome of [`overlay`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OverlayOutcome {
    /// A marker was drawn; the rect covers every pixel that changed.
    Drawn(Rect),
    /// Projection succeeded but the marker misses the frame entirely.
    OffScreen,
    /// Projection failed; the frame is untouched.
    Skipped,
}

impl OverlayOutcome {
    /// The matching trace action.
    #[must_use]
    pub const fn action(&self) -> OverlayAction {
        match self {
            Self::Drawn(_) => OverlayAction::Drawn,
            Self::OffScreen => OverlayAction::OffScreen,
            Self::Skipped => OverlayAction::Skipped,
        }
    }
}

/// Draws a ring marker centred on `pixel`, clipped to the frame.
///
/// Returns the region of pixels that were written, or `None` if the ring
/// lies entirely outside the frame. A ring too thin to cover any pixel
/// centre yields an empty rect at `pixel`.
pub fn draw_marker(raster: &mut Raster, pixel: ProjectedPixel, marker: &Marker) -> Option<Rect> {
    let center = pixel.to_point();
    let frame = Rect::new(0.0, 0.0, raster.width().into(), raster.height().into());
    let area = marker.bounds(center).intersect(frame);
    if area.is_zero_area() {
        return None;
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "area is pixel-aligned and clipped to the frame"
    )]
    let (x0, y0, x1, y1) = (area.x0 as i64, area.y0 as i64, area.x1 as i64, area.y1 as i64);

    let mut touched: Option<Rect> = None;
    for y in y0..y1 {
        for x in x0..x1 {
            let p = ProjectedPixel::new(x, y).to_point();
            if marker.covers(center, p) && raster.set_pixel(x, y, marker.color) {
                let cell = Rect::from_origin_size(p, (1.0, 1.0));
                touched = Some(touched.map_or(cell, |r| r.union(cell)));
            }
        }
    }
    Some(touched.unwrap_or_else(|| Rect::from_origin_size(center, (0.0, 0.0))))
}

/// Applies one frame's projection result to the frame.
///
/// Failed projections leave the frame untouched rather than drawing at a
/// meaningless position; the render loop carries on with the next frame.
pub fn overlay(
    raster: &mut Raster,
    result: &Result<ProjectedPixel, ProjectionError>,
    marker: &Marker,
) -> OverlayOutcome {
    match result {
        Ok(pixel) => match draw_marker(raster, *pixel, marker) {
            Some(rect) => OverlayOutcome::Drawn(rect),
            None => OverlayOutcome::OffScreen,
        },
        Err(_) => OverlayOutcome::Skipped,
    }
}

/// Like [`overlay`], reporting the outcome to `tracer`.
pub fn overlay_traced(
    raster: &mut Raster,
    result: &Result<ProjectedPixel, ProjectionError>,
    marker: &Marker,
    tracer: &mut Tracer<'_>,
) -> OverlayOutcome {
    let outcome = overlay(raster, result, marker);
    tracer.overlay(&OverlayEvent {
        action: outcome.action(),
        pixel: result.as_ref().ok().copied(),
    });
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use camproj_core::error::DegenerateProjectionError;

    const BG: Rgb = Rgb([25, 51, 102]);

    fn frame() -> Raster {
        Raster::new(64, 48, BG)
    }

    #[test]
    fn ring_has_a_hole() {
        let mut r = frame();
        let rect = draw_marker(&mut r, ProjectedPixel::new(32, 24), &Marker::default());
        assert!(rect.is_some());
        assert_eq!(r.pixel(32, 24), Some(BG));
        assert_eq!(r.pixel(42, 24), Some(Rgb::RED));
        assert_eq!(r.pixel(22, 24), Some(Rgb::RED));
        assert_eq!(r.pixel(32, 14), Some(Rgb::RED));
        assert_eq!(r.pixel(32, 34), Some(Rgb::RED));
        assert_eq!(r.pixel(45, 24), Some(BG));
    }

    #[test]
    fn touched_rect_bounds_the_ring() {
        let mut r = frame();
        let rect = draw_marker(&mut r, ProjectedPixel::new(32, 24), &Marker::default()).unwrap();
        assert_eq!(rect, Rect::new(21.0, 13.0, 44.0, 36.0));
    }

    #[test]
    fn marker_at_edge_is_clipped() {
        let mut r = frame();
        let rect = draw_marker(&mut r, ProjectedPixel::new(0, 0), &Marker::default()).unwrap();
        assert_eq!(rect.x0, 0.0);
        assert_eq!(rect.y0, 0.0);
        assert_eq!(r.pixel(10, 0), Some(Rgb::RED));
    }

    #[test]
    fn hairline_ring_on_frame_is_still_drawn() {
        let mut r = frame();
        let before = r.clone();
        let marker = Marker {
            radius: 10.5,
            thickness: 0.0,
            ..Marker::default()
        };
        let outcome = overlay(&mut r, &Ok(ProjectedPixel::new(32, 24)), &marker);
        assert_eq!(
            outcome,
            OverlayOutcome::Drawn(Rect::new(32.0, 24.0, 32.0, 24.0))
        );
        assert_eq!(r, before);
    }

    #[test]
    fn far_off_screen_draws_nothing() {
        let mut r = frame();
        let before = r.clone();
        let outcome = overlay(
            &mut r,
            &Ok(ProjectedPixel::new(3300, -2700)),
            &Marker::default(),
        );
        assert_eq!(outcome, OverlayOutcome::OffScreen);
        assert_eq!(r, before);
    }

    #[test]
    fn failure_skips_the_marker() {
        let mut r = frame();
        let before = r.clone();
        let outcome = overlay(
            &mut r,
            &Err(DegenerateProjectionError { w: 0.0 }.into()),
            &Marker::default(),
        );
        assert_eq!(outcome, OverlayOutcome::Skipped);
        assert_eq!(r, before);
    }

    #[test]
    fn traced_overlay_reports_action() {
        let mut r = frame();
        let mut tracer = Tracer::none();
        let outcome = overlay_traced(
            &mut r,
            &Ok(ProjectedPixel::new(10, 10)),
            &Marker::default(),
            &mut tracer,
        );
        assert_eq!(outcome.action(), OverlayAction::Drawn);
    }
}
