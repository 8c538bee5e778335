// Copyright 2026 the Camproj Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! World point → raster pixel projection.
//!
//! The pipeline for a world point `(x, y, z)`:
//!
//! ```text
//!   p = (x, y, z, 1)
//!   c = model_view · p                  camera space
//!   v = projection · c                  clip space
//!   v' = v / v.w · (window_size / 2)    perspective divide + window scale
//!   px = width / 2 + v'.x
//!   py = height / 2 - v'.y              y flipped for a top-left raster
//! ```
//!
//! The `window_size / 2` factor maps the toolkit's normalized device range
//! onto the half-extent of its square render window, so
//! [`ProjectorConfig::window_size`] must equal the window size the toolkit
//! actually rendered with.

use kurbo::Point;

use crate::adapter::{ElementSource, to_array};
use crate::error::{DegenerateProjectionError, InvalidInputError, MatrixRole, ProjectionError};
use crate::point::HomogeneousPoint;
use crate::trace::{ProjectEvent, ProjectFailedEvent, Tracer};
use crate::transform::Transform4x4;
use crate::viewport::{PixelRounding, ProjectedPixel, ViewportSize};

/// Window size used when none is configured, in pixels.
pub const DEFAULT_WINDOW_SIZE: f64 = 600.0;

/// Configuration for a [`Projector`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectorConfig {
    /// Side length of the toolkit's square render window, in pixels.
    ///
    /// Must be positive and finite.
    pub window_size: f64,
    /// Sub-pixel to pixel conversion.
    pub rounding: PixelRounding,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl ProjectorConfig {
    /// Creates a configuration with the given window size and rounding to
    /// the nearest pixel.
    #[must_use]
    pub const fn new(window_size: f64) -> Self {
        Self {
            window_size,
            rounding: PixelRounding::Round,
        }
    }

    /// Returns a copy with a different rounding mode.
    #[must_use]
    pub const fn with_rounding(mut self, rounding: PixelRounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Checks the window size.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::InvalidWindowSize`] unless the window
    /// size is positive and finite.
    pub fn validate(self) -> Result<Self, InvalidInputError> {
        if self.window_size.is_finite() && self.window_size > 0.0 {
            Ok(self)
        } else {
            Err(InvalidInputError::InvalidWindowSize(self.window_size))
        }
    }
}

/// Intermediate values of one projection, for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionStages {
    /// Camera-space point, `model_view · p`.
    pub camera: HomogeneousPoint,
    /// Clip-space point, `projection · camera`.
    pub clip: HomogeneousPoint,
    /// Divided and window-scaled point. Its `w` is `window_size / 2`.
    pub scaled: HomogeneousPoint,
    /// Unrounded raster position.
    pub screen: Point,
}

/// Projects world points to raster pixels.
///
/// A projector holds only its validated configuration; every call is a pure
/// function of its arguments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    config: ProjectorConfig,
}

impl Default for Projector {
    fn default() -> Self {
        Self {
            config: ProjectorConfig::default(),
        }
    }
}

impl Projector {
    /// Creates a projector.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::InvalidWindowSize`] if the configured
    /// window size is not positive and finite.
    pub fn new(config: ProjectorConfig) -> Result<Self, InvalidInputError> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> ProjectorConfig {
        self.config
    }

    /// Projects a world point to a raster pixel.
    ///
    /// Off-screen results are returned as-is, including points behind the
    /// camera (negative clip `w`).
    ///
    /// # Errors
    ///
    /// - [`ProjectionError::InvalidInput`] for non-finite matrices or point,
    ///   or an empty viewport.
    /// - [`ProjectionError::Degenerate`] if clip `w` is zero, the divide
    ///   overflows, or the position lies beyond the pixel coordinate range.
    pub fn project(
        &self,
        world: [f64; 3],
        model_view: &Transform4x4,
        projection: &Transform4x4,
        viewport: ViewportSize,
    ) -> Result<ProjectedPixel, ProjectionError> {
        self.project_point(
            HomogeneousPoint::from_world(world),
            model_view,
            projection,
            viewport,
        )
    }

    /// Like [`project`](Self::project), starting from a homogeneous point
    /// whose `w` need not be 1.
    ///
    /// # Errors
    ///
    /// As for [`project`](Self::project).
    pub fn project_point(
        &self,
        point: HomogeneousPoint,
        model_view: &Transform4x4,
        projection: &Transform4x4,
        viewport: ViewportSize,
    ) -> Result<ProjectedPixel, ProjectionError> {
        let stages = self.stages(point, model_view, projection, viewport)?;
        Ok(self.config.rounding.pixel(stages.screen))
    }

    /// Returns the unrounded raster position of a world point.
    ///
    /// # Errors
    ///
    /// As for [`project`](Self::project).
    pub fn screen_position(
        &self,
        world: [f64; 3],
        model_view: &Transform4x4,
        projection: &Transform4x4,
        viewport: ViewportSize,
    ) -> Result<Point, ProjectionError> {
        let point = HomogeneousPoint::from_world(world);
        Ok(self.stages(point, model_view, projection, viewport)?.screen)
    }

    /// Extracts both matrices from their sources, then projects.
    ///
    /// # Errors
    ///
    /// [`ProjectionError::Extraction`] if a source cannot supply an element,
    /// otherwise as for [`project`](Self::project).
    pub fn project_sources<M, P>(
        &self,
        world: [f64; 3],
        model_view: &M,
        projection: &P,
        viewport: ViewportSize,
    ) -> Result<ProjectedPixel, ProjectionError>
    where
        M: ElementSource + ?Sized,
        P: ElementSource + ?Sized,
    {
        let model_view = to_array(model_view)?;
        let projection = to_array(projection)?;
        self.project(world, &model_view, &projection, viewport)
    }

    /// Like [`project`](Self::project), reporting the outcome to `tracer`.
    ///
    /// # Errors
    ///
    /// As for [`project`](Self::project).
    pub fn project_traced(
        &self,
        world: [f64; 3],
        model_view: &Transform4x4,
        projection: &Transform4x4,
        viewport: ViewportSize,
        tracer: &mut Tracer<'_>,
    ) -> Result<ProjectedPixel, ProjectionError> {
        let point = HomogeneousPoint::from_world(world);
        match self.stages(point, model_view, projection, viewport) {
            Ok(stages) => {
                let pixel = self.config.rounding.pixel(stages.screen);
                tracer.project(&ProjectEvent {
                    point,
                    clip: stages.clip,
                    screen: stages.screen,
                    pixel,
                    viewport,
                });
                Ok(pixel)
            }
            Err(error) => {
                tracer.project_failed(&ProjectFailedEvent { point, error });
                Err(error)
            }
        }
    }

    /// Runs the pipeline and returns every intermediate value.
    ///
    /// # Errors
    ///
    /// As for [`project`](Self::project).
    pub fn stages(
        &self,
        point: HomogeneousPoint,
        model_view: &Transform4x4,
        projection: &Transform4x4,
        viewport: ViewportSize,
    ) -> Result<ProjectionStages, ProjectionError> {
        let viewport = viewport.validate()?;
        if !model_view.is_finite() {
            return Err(InvalidInputError::NonFiniteMatrix(MatrixRole::ModelView).into());
        }
        if !projection.is_finite() {
            return Err(InvalidInputError::NonFiniteMatrix(MatrixRole::Projection).into());
        }
        if !point.is_finite() {
            return Err(InvalidInputError::NonFinitePoint.into());
        }

        let camera = *model_view * point;
        let clip = *projection * camera;
        let degenerate = DegenerateProjectionError { w: clip.w };
        let ndc = clip.perspective_divide().ok_or(degenerate)?;
        let scaled = ndc * (self.config.window_size / 2.0);
        if !scaled.is_finite() {
            return Err(degenerate.into());
        }

        let center = viewport.center();
        let screen = Point::new(center.x + scaled.x, center.y - scaled.y);
        if !PixelRounding::can_represent(screen) {
            return Err(degenerate.into());
        }
        Ok(ProjectionStages {
            camera,
            clip,
            scaled,
            screen,
        })
    }
}

/// Projects `world` with a default-rounding [`Projector`] for `window_size`.
///
/// # Errors
///
/// [`ProjectionError::InvalidInput`] if `window_size` is not positive and
/// finite, otherwise as for [`Projector::project`].
pub fn project(
    world: [f64; 3],
    model_view: &Transform4x4,
    projection: &Transform4x4,
    viewport: ViewportSize,
    window_size: f64,
) -> Result<ProjectedPixel, ProjectionError> {
    Projector::new(ProjectorConfig::new(window_size))?.project(
        world,
        model_view,
        projection,
        viewport,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::ElementFn;
    use crate::camera::{Bounds3, Camera};
    use crate::error::ExtractionError;

    const I: Transform4x4 = Transform4x4::IDENTITY;

    fn sphere_camera() -> (Camera, Transform4x4, Transform4x4) {
        let mut camera = Camera::default();
        camera.reset_to_bounds(Bounds3::around_sphere([10.0, 10.0, 10.0], 2.0));
        let viewport = ViewportSize::new(600, 600);
        let [near, far] = camera.clipping_range;
        let projection = camera
            .projection_transform(viewport.aspect_ratio(), near, far)
            .unwrap();
        (camera, camera.model_view_transform(), projection)
    }

    #[test]
    fn end_to_end_identity_scenario() {
        let px = project(
            [10.0, 10.0, 10.0],
            &I,
            &Transform4x4::from_diagonal(1.0, 1.0, 1.0, 1.0),
            ViewportSize::new(600, 600),
            600.0,
        );
        // Off screen, and not clamped.
        assert_eq!(px, Ok(ProjectedPixel::new(3300, -2700)));
    }

    #[test]
    fn end_to_end_stages() {
        let stages = Projector::default()
            .stages(
                HomogeneousPoint::from_world([10.0, 10.0, 10.0]),
                &I,
                &I,
                ViewportSize::new(600, 600),
            )
            .unwrap();
        assert_eq!(stages.clip, HomogeneousPoint::new(10.0, 10.0, 10.0, 1.0));
        assert_eq!(
            stages.scaled,
            HomogeneousPoint::new(3000.0, 3000.0, 3000.0, 300.0)
        );
        assert_eq!(stages.screen, Point::new(3300.0, -2700.0));
    }

    #[test]
    fn identity_matrices_follow_closed_form() {
        let cases = [
            ([0.1, -0.2, 0.3], 640, 480, 200.0),
            ([-0.75, 0.5, 0.0], 800, 600, 600.0),
            ([0.013, 0.027, 5.0], 101, 99, 333.0),
        ];
        for (world, w, h, s) in cases {
            let got = project(world, &I, &I, ViewportSize::new(w, h), s).unwrap();
            let ex = PixelRounding::Round.apply(f64::from(w) / 2.0 + world[0] * s / 2.0);
            let ey = PixelRounding::Round.apply(f64::from(h) / 2.0 - world[1] * s / 2.0);
            assert_eq!(got, ProjectedPixel::new(ex, ey), "world={world:?}");
        }
    }

    #[test]
    fn focal_point_lands_at_viewport_center() {
        let (_, mv, proj) = sphere_camera();
        let px = Projector::default()
            .project([10.0, 10.0, 10.0], &mv, &proj, ViewportSize::new(600, 600))
            .unwrap();
        assert_eq!(px, ProjectedPixel::new(300, 300));
    }

    #[test]
    fn up_is_up_on_the_raster() {
        let (_, mv, proj) = sphere_camera();
        let viewport = ViewportSize::new(600, 600);
        let p = Projector::default();
        let above = p.project([10.0, 11.0, 10.0], &mv, &proj, viewport).unwrap();
        let right = p.project([11.0, 10.0, 10.0], &mv, &proj, viewport).unwrap();
        assert_eq!(above.x, 300);
        assert!(above.y < 300, "got {above:?}");
        assert_eq!(right.y, 300);
        assert!(right.x > 300, "got {right:?}");
    }

    #[test]
    fn divide_is_invariant_to_homogeneous_scale() {
        let (_, mv, proj) = sphere_camera();
        let viewport = ViewportSize::new(640, 480);
        let p = Projector::default();
        let world = [11.5, 9.25, 10.75];
        let base = p.project(world, &mv, &proj, viewport).unwrap();
        for k in [2.0, 0.5, -4.0, 0.125] {
            let scaled_mv = p.project(world, &mv.scaled(k), &proj, viewport).unwrap();
            assert_eq!(scaled_mv, base, "model-view scaled by {k}");
            let point = HomogeneousPoint::from_world(world) * k;
            let scaled_w = p.project_point(point, &mv, &proj, viewport).unwrap();
            assert_eq!(scaled_w, base, "point scaled by {k}");
        }
    }

    #[test]
    fn zero_w_is_degenerate() {
        let mut proj = I;
        proj.rows[3] = [0.0, 0.0, 0.0, 0.0];
        let err = Projector::default()
            .project([1.0, 2.0, 3.0], &I, &proj, ViewportSize::new(600, 600))
            .unwrap_err();
        assert_eq!(
            err,
            ProjectionError::Degenerate(DegenerateProjectionError { w: 0.0 })
        );
    }

    #[test]
    fn point_on_eye_plane_is_degenerate() {
        let camera = Camera::default();
        let proj = camera.projection_transform(1.0, -1.0, 1.0).unwrap();
        // Default camera sits at z = 1; any point with z = 1 is on its eye plane.
        let err = Projector::default()
            .project(
                [5.0, 3.0, 1.0],
                &camera.model_view_transform(),
                &proj,
                ViewportSize::new(600, 600),
            )
            .unwrap_err();
        assert!(matches!(err, ProjectionError::Degenerate(_)), "got {err:?}");
    }

    #[test]
    fn overflowing_divide_is_degenerate() {
        let mut proj = I;
        proj.rows[3] = [0.0, 0.0, 0.0, 1e-320];
        let err = Projector::default()
            .project([1e10, 0.0, 0.0], &I, &proj, ViewportSize::new(600, 600))
            .unwrap_err();
        assert!(matches!(err, ProjectionError::Degenerate(_)), "got {err:?}");
    }

    #[test]
    fn position_beyond_pixel_range_is_degenerate() {
        let viewport = ViewportSize::new(600, 600);
        let err = project([1e5, 0.0, 0.0], &I, &I, viewport, 1e20).unwrap_err();
        assert_eq!(
            err,
            ProjectionError::Degenerate(DegenerateProjectionError { w: 1.0 })
        );

        // Nearly on the eye plane: clip w is tiny but nonzero.
        let mut proj = I;
        proj.rows[3] = [0.0, 0.0, 0.0, 1e-17];
        let err = Projector::default()
            .project([1.0, 0.0, 0.0], &I, &proj, viewport)
            .unwrap_err();
        assert!(matches!(err, ProjectionError::Degenerate(_)), "got {err:?}");
    }

    #[test]
    fn behind_camera_is_valid_output() {
        let camera = Camera::default();
        let proj = camera.projection_transform(1.0, -1.0, 1.0).unwrap();
        let mv = camera.model_view_transform();
        let viewport = ViewportSize::new(600, 600);
        // Camera-space z = +1, i.e. behind the eye; the image mirrors.
        let px = Projector::default()
            .project([0.5, 0.0, 2.0], &mv, &proj, viewport)
            .unwrap();
        assert!(px.x < 300, "got {px:?}");
    }

    #[test]
    fn viewport_resize_shifts_by_half_extent_difference() {
        let (_, mv, proj) = sphere_camera();
        let p = Projector::default();
        let world = [11.0, 8.5, 9.0];
        let a = p
            .screen_position(world, &mv, &proj, ViewportSize::new(600, 600))
            .unwrap();
        let b = p
            .screen_position(world, &mv, &proj, ViewportSize::new(800, 500))
            .unwrap();
        assert!((b.x - a.x - 100.0).abs() < 1e-9, "dx = {}", b.x - a.x);
        assert!((b.y - a.y + 50.0).abs() < 1e-9, "dy = {}", b.y - a.y);

        let pa = p.project(world, &mv, &proj, ViewportSize::new(600, 600)).unwrap();
        let pb = p.project(world, &mv, &proj, ViewportSize::new(800, 500)).unwrap();
        assert_eq!((pb.x - pa.x, pb.y - pa.y), (100, -50));
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        let viewport = ViewportSize::new(600, 600);
        let p = Projector::default();
        let mut bad = I;
        bad.rows[1][1] = f64::NAN;

        assert_eq!(
            p.project([0.0; 3], &bad, &I, viewport),
            Err(InvalidInputError::NonFiniteMatrix(MatrixRole::ModelView).into())
        );
        assert_eq!(
            p.project([0.0; 3], &I, &bad, viewport),
            Err(InvalidInputError::NonFiniteMatrix(MatrixRole::Projection).into())
        );
        assert_eq!(
            p.project([f64::INFINITY, 0.0, 0.0], &I, &I, viewport),
            Err(InvalidInputError::NonFinitePoint.into())
        );
    }

    #[test]
    fn empty_viewport_is_rejected() {
        let err = Projector::default()
            .project([0.0; 3], &I, &I, ViewportSize::new(0, 600))
            .unwrap_err();
        assert_eq!(
            err,
            ProjectionError::InvalidInput(InvalidInputError::EmptyViewport {
                width: 0,
                height: 600
            })
        );
    }

    #[test]
    fn window_size_must_be_positive() {
        for s in [0.0, -600.0, f64::NAN, f64::INFINITY] {
            assert!(Projector::new(ProjectorConfig::new(s)).is_err(), "{s}");
        }
        assert!(matches!(
            project([0.0; 3], &I, &I, ViewportSize::new(10, 10), 0.0),
            Err(ProjectionError::InvalidInput(
                InvalidInputError::InvalidWindowSize(_)
            ))
        ));
    }

    #[test]
    fn truncation_is_consistent() {
        let p = Projector::new(ProjectorConfig::new(2.0).with_rounding(PixelRounding::Truncate))
            .unwrap();
        // screen = (10 + 0.7, 10 - 0.7)
        let px = p
            .project([0.7, 0.7, 0.0], &I, &I, ViewportSize::new(20, 20))
            .unwrap();
        assert_eq!(px, ProjectedPixel::new(10, 9));
        let rounded = Projector::new(ProjectorConfig::new(2.0)).unwrap();
        let px = rounded
            .project([0.7, 0.7, 0.0], &I, &I, ViewportSize::new(20, 20))
            .unwrap();
        assert_eq!(px, ProjectedPixel::new(11, 9));
    }

    #[test]
    fn sources_are_extracted_first() {
        let (_, mv, proj) = sphere_camera();
        let viewport = ViewportSize::new(600, 600);
        let p = Projector::default();
        let direct = p.project([10.0, 12.0, 10.0], &mv, &proj, viewport);
        let via_arrays = p.project_sources(
            [10.0, 12.0, 10.0],
            &mv.to_rows_array_2d(),
            &proj.to_rows_array_2d(),
            viewport,
        );
        assert_eq!(direct, via_arrays);

        let broken = ElementFn(|r: usize, c: usize| (r != 3 || c != 3).then_some(1.0));
        assert_eq!(
            p.project_sources([0.0; 3], &mv, &broken, viewport),
            Err(ProjectionError::Extraction(ExtractionError { row: 3, col: 3 }))
        );
    }

    #[test]
    fn traced_projection_matches_untraced() {
        let (_, mv, proj) = sphere_camera();
        let viewport = ViewportSize::new(600, 600);
        let p = Projector::default();
        let mut tracer = Tracer::none();
        assert_eq!(
            p.project_traced([10.0, 10.0, 10.0], &mv, &proj, viewport, &mut tracer),
            p.project([10.0, 10.0, 10.0], &mv, &proj, viewport)
        );
    }
}
