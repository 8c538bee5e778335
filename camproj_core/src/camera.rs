// Copyright 2026 the Camproj Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A perspective camera that derives model-view and projection matrices.
//!
//! Rendering toolkits usually own the camera and hand out its matrices each
//! frame. [`Camera`] reproduces that derivation so the same matrices can be
//! built without a toolkit: a look-at view transform, and a symmetric
//! perspective frustum from a vertical view angle, aspect ratio, and clipping
//! range, with a final remap of the depth range.
//!
//! [`Camera::reset_to_bounds`], [`Camera::azimuth`], and
//! [`Camera::elevation`] cover the framing and orbiting a render loop would
//! otherwise do through toolkit calls.

use core::f64::consts::PI;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::error::InvalidInputError;
use crate::transform::Transform4x4;

/// Vertical view angle of a fresh camera, in degrees.
pub const DEFAULT_VIEW_ANGLE: f64 = 30.0;

/// Clipping range of a fresh camera, `[near, far]`.
pub const DEFAULT_CLIPPING_RANGE: [f64; 2] = [0.01, 1000.01];

/// Fraction of the depth spread added on each side by
/// [`Camera::reset_clipping_range`].
const CLIPPING_RANGE_EXPANSION: f64 = 0.5;

/// Smallest allowed `near / far` ratio.
const NEAR_CLIPPING_PLANE_TOLERANCE: f64 = 0.001;

/// Axis-aligned bounding box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds3 {
    /// Minimum corner.
    pub min: [f64; 3],
    /// Maximum corner.
    pub max: [f64; 3],
}

impl Bounds3 {
    /// Creates a box from two corners.
    #[must_use]
    pub const fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// The box enclosing a sphere.
    #[must_use]
    pub fn around_sphere(center: [f64; 3], radius: f64) -> Self {
        Self {
            min: center.map(|c| c - radius),
            max: center.map(|c| c + radius),
        }
    }

    /// Centre of the box.
    #[must_use]
    pub fn center(&self) -> [f64; 3] {
        scale(add(self.min, self.max), 0.5)
    }

    /// Half the diagonal, i.e. the radius of the enclosing sphere.
    #[must_use]
    pub fn radius(&self) -> f64 {
        length(sub(self.max, self.min)) * 0.5
    }

    /// The eight corners.
    #[must_use]
    pub fn corners(&self) -> [[f64; 3]; 8] {
        let (lo, hi) = (self.min, self.max);
        let mut out = [[0.0; 3]; 8];
        for (i, corner) in out.iter_mut().enumerate() {
            *corner = [
                if i & 1 == 0 { lo[0] } else { hi[0] },
                if i & 2 == 0 { lo[1] } else { hi[1] },
                if i & 4 == 0 { lo[2] } else { hi[2] },
            ];
        }
        out
    }
}

/// A perspective camera looking from `position` at `focal_point`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub position: [f64; 3],
    /// Point the camera looks at.
    pub focal_point: [f64; 3],
    /// Approximate up direction; orthogonalized when building the view.
    pub view_up: [f64; 3],
    /// Vertical view angle in degrees.
    pub view_angle: f64,
    /// Near and far clipping distances along the view direction.
    pub clipping_range: [f64; 2],
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 1.0],
            focal_point: [0.0, 0.0, 0.0],
            view_up: [0.0, 1.0, 0.0],
            view_angle: DEFAULT_VIEW_ANGLE,
            clipping_range: DEFAULT_CLIPPING_RANGE,
        }
    }
}

impl Camera {
    /// Distance from the eye to the focal point.
    #[must_use]
    pub fn distance(&self) -> f64 {
        length(sub(self.focal_point, self.position))
    }

    /// Unit vector from the eye toward the focal point.
    #[must_use]
    pub fn direction_of_projection(&self) -> [f64; 3] {
        normalize(sub(self.focal_point, self.position))
    }

    /// World space → camera space.
    ///
    /// The camera looks down its negative z axis with y up. If the eye sits
    /// on the focal point, or `view_up` is parallel to the view direction,
    /// the result is not finite and the projector will reject it.
    #[must_use]
    pub fn model_view_transform(&self) -> Transform4x4 {
        let normal = normalize(sub(self.position, self.focal_point));
        let sideways = normalize(cross(self.view_up, normal));
        let up = cross(normal, sideways);
        let p = self.position;
        Transform4x4::from_rows(
            [sideways[0], sideways[1], sideways[2], -dot(sideways, p)],
            [up[0], up[1], up[2], -dot(up, p)],
            [normal[0], normal[1], normal[2], -dot(normal, p)],
            [0.0, 0.0, 0.0, 1.0],
        )
    }

    /// Camera space → clip space for a viewport of the given `aspect`.
    ///
    /// Builds the perspective frustum for [`view_angle`](Self::view_angle)
    /// and [`clipping_range`](Self::clipping_range), then remaps clip depth
    /// from `[-1, 1]` to `[near_z, far_z]`. The x and y rows do not depend on
    /// the depth remap.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::InvalidAspectRatio`] unless `aspect` is
    /// positive and finite.
    pub fn projection_transform(
        &self,
        aspect: f64,
        near_z: f64,
        far_z: f64,
    ) -> Result<Transform4x4, InvalidInputError> {
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(InvalidInputError::InvalidAspectRatio(aspect));
        }
        let [near, far] = self.clipping_range;
        let half_angle = self.view_angle * PI / 360.0;
        let top = half_angle.sin() / half_angle.cos() * near;
        let right = top * aspect;

        let frustum = Transform4x4::from_rows(
            [near / right, 0.0, 0.0, 0.0],
            [0.0, near / top, 0.0, 0.0],
            [
                0.0,
                0.0,
                -(far + near) / (far - near),
                -2.0 * far * near / (far - near),
            ],
            [0.0, 0.0, -1.0, 0.0],
        );

        // z' = s·z + t·w maps -1 → near_z and 1 → far_z.
        let s = (far_z - near_z) / 2.0;
        let depth = Transform4x4::from_rows(
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, s, near_z + s],
            [0.0, 0.0, 0.0, 1.0],
        );
        Ok(depth * frustum)
    }

    /// Frames `bounds`: looks at its centre from the current direction, far
    /// enough that its enclosing sphere fills the view angle, then resets
    /// the clipping range.
    pub fn reset_to_bounds(&mut self, bounds: Bounds3) {
        let center = bounds.center();
        let mut radius = bounds.radius();
        if radius == 0.0 {
            radius = 0.5;
        }
        let distance = radius / (self.view_angle * PI / 360.0).sin();
        let normal = normalize(sub(self.position, self.focal_point));

        // Keep view-up usable when it is nearly parallel to the view.
        if dot(normalize(self.view_up), normal).abs() > 0.999 {
            let [x, y, z] = self.view_up;
            self.view_up = [-z, x, y];
        }

        self.focal_point = center;
        self.position = add(center, scale(normal, distance));
        self.reset_clipping_range(bounds);
    }

    /// Sets the clipping range to contain `bounds` with some slack.
    ///
    /// Falls back to [`DEFAULT_CLIPPING_RANGE`] when the whole box is behind
    /// the eye.
    pub fn reset_clipping_range(&mut self, bounds: Bounds3) {
        let dir = self.direction_of_projection();
        let (mut near, mut far) = (f64::INFINITY, f64::NEG_INFINITY);
        for corner in bounds.corners() {
            let depth = dot(sub(corner, self.position), dir);
            near = near.min(depth);
            far = far.max(depth);
        }
        if far.is_nan() || far <= 0.0 {
            self.clipping_range = DEFAULT_CLIPPING_RANGE;
            return;
        }

        let spread = far - near;
        near = 0.99 * near - spread * CLIPPING_RANGE_EXPANSION;
        far = 1.01 * far + spread * CLIPPING_RANGE_EXPANSION;
        if near >= far {
            near = 0.01 * far;
        }
        if near < NEAR_CLIPPING_PLANE_TOLERANCE * far {
            near = NEAR_CLIPPING_PLANE_TOLERANCE * far;
        }
        self.clipping_range = [near, far];
    }

    /// Orbits the eye about the view-up axis through the focal point.
    pub fn azimuth(&mut self, degrees: f64) {
        let axis = normalize(self.view_up);
        self.orbit(axis, degrees);
    }

    /// Orbits the eye about the sideways axis through the focal point.
    ///
    /// Positive angles move the eye toward `view_up`. `view_up` itself is
    /// left unchanged.
    pub fn elevation(&mut self, degrees: f64) {
        let normal = normalize(sub(self.position, self.focal_point));
        let sideways = normalize(cross(self.view_up, normal));
        self.orbit(scale(sideways, -1.0), degrees);
    }

    fn orbit(&mut self, axis: [f64; 3], degrees: f64) {
        let offset = rotate(sub(self.position, self.focal_point), axis, degrees * PI / 180.0);
        self.position = add(self.focal_point, offset);
    }
}

// Rodrigues' rotation of `v` about unit `axis`.
fn rotate(v: [f64; 3], axis: [f64; 3], radians: f64) -> [f64; 3] {
    let (s, c) = (radians.sin(), radians.cos());
    add(
        add(scale(v, c), scale(cross(axis, v), s)),
        scale(axis, dot(axis, v) * (1.0 - c)),
    )
}

fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn scale(a: [f64; 3], k: f64) -> [f64; 3] {
    a.map(|v| v * k)
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn length(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

fn normalize(a: [f64; 3]) -> [f64; 3] {
    scale(a, 1.0 / length(a))
}
