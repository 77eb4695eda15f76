//! The groove sweep: one spiral channel of decreasing radius, its floor
//! height modulated per audio sample.
//!
//! Each angular step emits four ring vertices — two on the land at the
//! record surface, two on the groove floor — and each completed revolution
//! is stitched into walls with tristrips. Adjacent turns meet exactly: one
//! revolution of radial shrink equals one groove pitch, so the previous
//! turn's inner land edge lands on the next turn's outer land edge and the
//! seam faces degenerate away in cleanup.

// Sample cursors convert between usize and f64 exactly in the ranges used.
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use nalgebra::Point3;
use record_mesh::TriMesh;
use tracing::{debug, info};

use crate::error::GrooveResult;
use crate::params::{truncate, RecordParams};
use crate::shapes::{circle_points, close_ring, with_height};

/// What a groove sweep produced.
#[derive(Debug, Clone, Default)]
pub struct EngraveSummary {
    /// Whole revolutions stitched.
    pub revolutions: usize,
    /// Angular steps consumed (one sample cursor advance each).
    pub samples_consumed: usize,
    /// Distinct vertices added to the mesh.
    pub vertices_added: usize,
    /// Faces added to the mesh (before cleanup).
    pub faces_added: usize,
}

impl std::fmt::Display for EngraveSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Engrave: {} revolutions, {} steps, +{} vertices, +{} faces",
            self.revolutions, self.samples_consumed, self.vertices_added, self.faces_added
        )
    }
}

/// Sample value driving the groove floor at cursor position `cursor`.
///
/// The index is `floor(rate_divisor * cursor)`, clamped to the final sample
/// so cap geometry past the consumed range reuses the last value. An empty
/// sequence reads as silence.
fn sample_at(samples: &[f64], rate_divisor: f64, cursor: usize) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let index = (rate_divisor * cursor as f64) as usize;
    samples[index.min(samples.len() - 1)]
}

/// Groove floor height at cursor position `cursor`.
///
/// The neutral floor sits `depth + amplitude` below the record surface and
/// the sample value offsets it by up to one amplitude in either direction.
fn groove_height(params: &RecordParams, samples: &[f64], cursor: usize) -> f64 {
    truncate(
        params.baseline() + params.amplitude * sample_at(samples, params.rate_divisor, cursor),
        params.precision,
    )
}

/// A point on a groove ring, truncated to the configured precision.
fn ring_vertex(params: &RecordParams, radius: f64, theta: f64, z: f64) -> Point3<f64> {
    Point3::new(
        truncate(radius * theta.cos(), params.precision),
        truncate(radius * theta.sin(), params.precision),
        truncate(z, params.precision),
    )
}

/// The four channel vertices at one angular position:
/// `[outer land, inner land, outer floor, inner floor]`.
///
/// The land pair sits at the record surface, flared outward by
/// `amplitude * bevel`; the floor pair spans the groove width at `floor_z`.
fn channel_points(
    params: &RecordParams,
    radius: f64,
    theta: f64,
    floor_z: f64,
) -> [Point3<f64>; 4] {
    let flare = params.amplitude * params.bevel;
    [
        ring_vertex(params, radius + flare, theta, params.record_height),
        ring_vertex(
            params,
            radius - params.groove_width - flare,
            theta,
            params.record_height,
        ),
        ring_vertex(params, radius, theta, floor_z),
        ring_vertex(params, radius - params.groove_width, theta, floor_z),
    ]
}

/// Sweep the spiral groove into `mesh`.
///
/// Consumes whole revolutions while enough samples remain, then closes the
/// channel with an end cap and fills the residual area between the final
/// groove radius and the center hole. A sequence shorter than one revolution
/// produces no revolutions but still emits cap and fill, so the result is a
/// valid (if trivial) mesh.
///
/// Two runs over identical samples and parameters produce byte-identical
/// vertex and face arrays: the sweep has no randomness and every coordinate
/// passes through the fixed truncation policy.
///
/// # Errors
///
/// Returns a [`crate::GrooveError`] when `params` fail validation.
pub fn engrave_into(
    mesh: &mut TriMesh,
    samples: &[f64],
    params: &RecordParams,
) -> GrooveResult<EngraveSummary> {
    params.validate()?;

    let steps = params.steps_per_revolution();
    let angular_step = params.angular_step();
    let radial_step = params.radial_step();
    let rate = params.rate_divisor;

    let vertices_before = mesh.vertex_count();
    let faces_before = mesh.face_count();

    let mut radius = params.outer_groove_radius;
    let mut cursor = 0usize;
    let mut revolutions = 0usize;

    // The inner land ring of the previous turn, awaiting its outer wall.
    let mut last_edge: Option<Vec<u32>> = None;
    // Trailing cross-section of the most recent turn: [ou, ol, il, iu].
    let mut tail: Option<[u32; 4]> = None;

    // Starting end cap: seal the channel mouth where the spiral begins.
    let mouth = channel_points(params, radius, 0.0, groove_height(params, samples, 0));
    let mouth_upper = [mesh.insert(mouth[0]), mesh.insert(mouth[1])];
    let mouth_lower = [mesh.insert(mouth[2]), mesh.insert(mouth[3])];
    mesh.tristrip(&mouth_upper, &mouth_lower);

    while rate * cursor as f64 <= samples.len() as f64 - rate * steps as f64 + 1.0 {
        let mut land_outer = Vec::with_capacity(steps);
        let mut land_inner = Vec::with_capacity(steps);
        let mut floor_outer = Vec::with_capacity(steps);
        let mut floor_inner = Vec::with_capacity(steps);

        for step in 0..steps {
            let theta = step as f64 * angular_step;
            let floor_z = groove_height(params, samples, cursor);
            let [ou, iu, ol, il] = channel_points(params, radius, theta, floor_z);

            land_outer.push(mesh.insert(ou));
            land_inner.push(mesh.insert(iu));
            floor_outer.push(mesh.insert(ol));
            floor_inner.push(mesh.insert(il));

            radius -= radial_step;
            cursor += 1;
        }

        if let Some(previous) = &last_edge {
            // Outer wall: the previous turn's inner land edge meets this
            // turn's outer land edge.
            mesh.tristrip(previous, &land_outer);
        }
        mesh.tristrip(&land_outer, &floor_outer); // land down to floor
        mesh.tristrip(&floor_outer, &floor_inner); // groove floor
        mesh.tristrip(&floor_inner, &land_inner); // floor back up to land

        tail = Some([
            land_outer[steps - 1],
            floor_outer[steps - 1],
            floor_inner[steps - 1],
            land_inner[steps - 1],
        ]);
        last_edge = Some(land_inner);
        revolutions += 1;
        debug!(revolution = revolutions, radius, "groove revolution stitched");
    }

    // Closing end cap at the final radius.
    let closing = channel_points(params, radius, 0.0, groove_height(params, samples, cursor));
    let end_upper = [mesh.insert(closing[0]), mesh.insert(closing[1])];
    let end_lower = [mesh.insert(closing[2]), mesh.insert(closing[3])];
    if let Some([tail_ou, tail_ol, tail_il, tail_iu]) = tail {
        // Join the spiral's trailing cross-section to the cap vertices.
        mesh.add_quad([tail_ou, end_upper[0], end_lower[0], tail_ol]);
        mesh.add_quad([tail_ol, end_lower[0], end_lower[1], tail_il]);
        mesh.add_quad([tail_il, end_lower[1], end_upper[1], tail_iu]);
    }
    mesh.tristrip(&end_upper, &end_lower);

    // Fill the residual area between the final groove radius and the
    // center hole.
    let surface_z = truncate(params.record_height, params.precision);
    let hole = circle_points(params.hole_radius(), params.ring_edge_count, params.precision);
    let edge = circle_points(radius, params.ring_edge_count, params.precision);
    let mut hole_ring = mesh.insert_all(with_height(&hole, surface_z));
    let mut edge_ring = mesh.insert_all(with_height(&edge, surface_z));
    close_ring(&mut hole_ring);
    close_ring(&mut edge_ring);
    mesh.tristrip(&hole_ring, &edge_ring);

    let summary = EngraveSummary {
        revolutions,
        samples_consumed: cursor,
        vertices_added: mesh.vertex_count() - vertices_before,
        faces_added: mesh.face_count() - faces_before,
    };
    info!(
        revolutions = summary.revolutions,
        steps = summary.samples_consumed,
        faces = summary.faces_added,
        "groove sweep complete"
    );
    Ok(summary)
}
