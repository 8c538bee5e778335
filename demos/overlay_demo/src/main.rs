// Copyright 2026 the Camproj Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated render loop that projects a sphere's centre onto each frame.
//!
//! A camera framing a sphere orbits for a fixed number of frames. Each frame
//! gets a synthetic bottom-up framebuffer, which is flipped to top-left
//! origin before the sphere centre and its north pole are projected and
//! marked. Events are recorded to a
//! [`RecorderSink`](camproj_debug::recorder::RecorderSink) and echoed
//! through a [`PrettyPrintSink`](camproj_debug::pretty::PrettyPrintSink).
//! The last frame is written as a PPM image, the event log as JSON.

use std::fs::File;
use std::io::{BufWriter, Write};

use camproj_core::camera::{Bounds3, Camera};
use camproj_core::project::{DEFAULT_WINDOW_SIZE, Projector, ProjectorConfig};
use camproj_core::trace::Tracer;
use camproj_core::viewport::ViewportSize;
use camproj_overlay::{Marker, Raster, Rgb, overlay_traced};

use camproj_debug::pretty::PrettyPrintSink;
use camproj_debug::recorder::{RecorderSink, replay};

const FRAME_COUNT: u32 = 36;
const SPHERE_CENTER: [f64; 3] = [10.0, 10.0, 10.0];
const SPHERE_RADIUS: f64 = 2.0;
const VIEWPORT: ViewportSize = ViewportSize::new(600, 600);
/// Degrees of orbit per frame.
const AZIMUTH_STEP: f64 = 10.0;

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    // -- camera ------------------------------------------------------------
    let mut camera = Camera::default();
    let bounds = Bounds3::around_sphere(SPHERE_CENTER, SPHERE_RADIUS);
    camera.reset_to_bounds(bounds);
    camera.elevation(20.0);
    camera.reset_clipping_range(bounds);

    let projector = Projector::new(ProjectorConfig::new(DEFAULT_WINDOW_SIZE))
        .expect("default window size is valid");
    let pole = [
        SPHERE_CENTER[0],
        SPHERE_CENTER[1] + SPHERE_RADIUS,
        SPHERE_CENTER[2],
    ];
    let center_marker = Marker::default();
    let pole_marker = Marker {
        radius: 4.0,
        thickness: 2.0,
        color: Rgb([255, 255, 0]),
    };

    // -- simulated loop ----------------------------------------------------
    let mut last_frame = None;
    for frame_index in 0..FRAME_COUNT {
        let logged = recorder.events().len();

        // 1. Render (simulated): bottom-up framebuffer, flipped for overlay.
        let mut raster = Raster::from_rgb_bytes(VIEWPORT.width, VIEWPORT.height, background())
            .expect("background matches viewport");
        raster.flip_vertical();

        // 2. Matrices for this frame.
        let model_view = camera.model_view_transform();
        let [near, far] = camera.clipping_range;
        let projection = camera
            .projection_transform(VIEWPORT.aspect_ratio(), near, far)
            .expect("viewport aspect is positive");

        // 3. Project and mark.
        {
            let mut tracer = Tracer::new(&mut recorder);
            for (point, marker) in [(SPHERE_CENTER, &center_marker), (pole, &pole_marker)] {
                let result =
                    projector.project_traced(point, &model_view, &projection, VIEWPORT, &mut tracer);
                overlay_traced(&mut raster, &result, marker, &mut tracer);
            }

            // The eye itself has no projection; show that the frame survives it.
            if frame_index == 0 {
                let result = projector.project_traced(
                    camera.position,
                    &model_view,
                    &projection,
                    VIEWPORT,
                    &mut tracer,
                );
                overlay_traced(&mut raster, &result, &center_marker, &mut tracer);
            }
        }
        replay(&recorder.events()[logged..], &mut pretty);

        // 4. Advance the camera.
        camera.azimuth(AZIMUTH_STEP);
        last_frame = Some(raster);
    }

    println!(
        "{} projections visible, {} failed",
        recorder.visible_count(),
        recorder.failure_count(),
    );

    // -- write last frame --------------------------------------------------
    if let Some(raster) = last_frame {
        let path = "overlay.ppm";
        let file = File::create(path).expect("failed to create overlay.ppm");
        let mut writer = BufWriter::new(file);
        write_ppm(&raster, &mut writer).expect("failed to write overlay.ppm");
        println!("Wrote {path}");
    }

    // -- export trace ------------------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    camproj_debug::json::export(recorder.events(), &mut writer).expect("failed to write trace");

    println!("Wrote {path} ({FRAME_COUNT} frames)");
}

/// A vertical gradient in bottom-up row order, as a toolkit would read back.
fn background() -> Vec<u8> {
    let mut bytes = Vec::with_capacity(VIEWPORT.width as usize * VIEWPORT.height as usize * 3);
    for row in 0..VIEWPORT.height {
        let t = f64::from(row) / f64::from(VIEWPORT.height);
        let Rgb(px) = Rgb::from_unit(0.1, 0.2, 0.2 + 0.4 * t);
        for _ in 0..VIEWPORT.width {
            bytes.extend_from_slice(&px);
        }
    }
    bytes
}

fn write_ppm(raster: &Raster, writer: &mut impl Write) -> std::io::Result<()> {
    write!(writer, "P6\n{} {}\n255\n", raster.width(), raster.height())?;
    writer.write_all(raster.as_bytes())?;
    writer.flush()
}
