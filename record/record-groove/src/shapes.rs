//! Ring sampling and disc-body assembly.
//!
//! Pure composition of the mesh engine: rings are sampled, lifted to a
//! height, closed by the caller and stitched with tristrips.

#![allow(clippy::cast_precision_loss)] // ring step counts are small

use nalgebra::{Point2, Point3};
use record_mesh::TriMesh;

use crate::error::{GrooveError, GrooveResult};
use crate::params::{truncate, RecordParams};

/// Sample `steps` points evenly around a full turn of radius `radius`.
///
/// Coordinates are truncated to `decimals` places so ring points dedup
/// against groove points computed elsewhere. The ring is **not** closed:
/// the first point is not repeated at the end. Callers stitching a ring
/// that must wrap append the first point themselves (see [`close_ring`]).
///
/// # Example
///
/// ```
/// use record_groove::circle_points;
///
/// let ring = circle_points(2.0, 4, 5);
/// assert_eq!(ring.len(), 4);
/// assert_eq!(ring[0].x, 2.0);
/// assert_ne!(ring.first(), ring.last());
/// ```
#[must_use]
pub fn circle_points(radius: f64, steps: usize, decimals: u32) -> Vec<Point2<f64>> {
    let step = std::f64::consts::TAU / steps as f64;
    (0..steps)
        .map(|i| {
            let theta = i as f64 * step;
            Point2::new(
                truncate(radius * theta.cos(), decimals),
                truncate(radius * theta.sin(), decimals),
            )
        })
        .collect()
}

/// Lift a 2D ring onto the horizontal plane at height `z`.
#[must_use]
pub fn with_height(points: &[Point2<f64>], z: f64) -> Vec<Point3<f64>> {
    points.iter().map(|p| Point3::new(p.x, p.y, z)).collect()
}

/// Close a ring rail by repeating its first element at the end.
///
/// Strip builders do not wrap around; every ring must be closed this way
/// before stitching.
pub fn close_ring<T: Copy>(ring: &mut Vec<T>) {
    if let Some(&first) = ring.first() {
        ring.push(first);
    }
}

/// Parameters for [`disc_body`].
#[derive(Debug, Clone)]
pub struct DiscBodyParams {
    /// Disc rim radius.
    pub rim_radius: f64,
    /// Radius of the spacer ring where the groove band begins.
    pub spacer_radius: f64,
    /// Center hole radius.
    pub hole_radius: f64,
    /// Height of the top surface.
    pub top_z: f64,
    /// Height of the bottom surface.
    pub bottom_z: f64,
    /// Number of edges per ring.
    pub edge_count: usize,
    /// Decimal places for coordinate truncation.
    pub decimals: u32,
    /// Whether to cap the top between spacer and hole. An engraved disc
    /// leaves that band open for the groove surface and center fill; a blank
    /// disc closes it.
    pub closed_top: bool,
}

impl DiscBodyParams {
    /// Disc-body parameters for an engraved record: spacer at the outermost
    /// groove, top band left open for the groove surface.
    #[must_use]
    pub fn from_record(params: &RecordParams) -> Self {
        Self {
            rim_radius: params.rim_radius(),
            spacer_radius: params.outer_groove_radius,
            hole_radius: params.hole_radius(),
            top_z: params.record_height,
            bottom_z: 0.0,
            edge_count: params.ring_edge_count,
            decimals: params.precision,
            closed_top: false,
        }
    }

    /// Close the top fully (a blank, ungrooved disc).
    #[must_use]
    pub fn closed(mut self) -> Self {
        self.closed_top = true;
        self
    }
}

/// Assemble the disc body: concentric rings at top and bottom heights,
/// stitched into walls and caps.
///
/// Builds three rings (rim, spacer, center hole) at `top_z` and `bottom_z`
/// and stitches the center-hole wall, the bottom cap (hole to spacer,
/// spacer to rim), the outer rim wall and the top margin (rim to spacer).
/// With [`DiscBodyParams::closed_top`] the spacer-to-hole band on top is
/// capped as well.
///
/// # Errors
///
/// Returns [`GrooveError::TooFewRingEdges`] for fewer than 3 edges and
/// [`GrooveError::RadiiOutOfOrder`] when the radii are not strictly nested.
pub fn disc_body(params: &DiscBodyParams) -> GrooveResult<TriMesh> {
    if params.edge_count < 3 {
        return Err(GrooveError::TooFewRingEdges {
            min: 3,
            actual: params.edge_count,
        });
    }
    if !(params.hole_radius < params.spacer_radius && params.spacer_radius < params.rim_radius)
    {
        return Err(GrooveError::RadiiOutOfOrder {
            hole: params.hole_radius,
            spacer: params.spacer_radius,
            outer_groove: params.spacer_radius,
            rim: params.rim_radius,
        });
    }

    let n = params.edge_count;
    let top_z = truncate(params.top_z, params.decimals);
    let bottom_z = truncate(params.bottom_z, params.decimals);

    let rim = circle_points(params.rim_radius, n, params.decimals);
    let spacer = circle_points(params.spacer_radius, n, params.decimals);
    let hole = circle_points(params.hole_radius, n, params.decimals);

    let mut mesh = TriMesh::with_capacity(6 * n, 12 * n);

    let mut rim_top = mesh.insert_all(with_height(&rim, top_z));
    let mut rim_bottom = mesh.insert_all(with_height(&rim, bottom_z));
    let mut spacer_top = mesh.insert_all(with_height(&spacer, top_z));
    let mut spacer_bottom = mesh.insert_all(with_height(&spacer, bottom_z));
    let mut hole_top = mesh.insert_all(with_height(&hole, top_z));
    let mut hole_bottom = mesh.insert_all(with_height(&hole, bottom_z));

    // Every ring is closed before stitching.
    close_ring(&mut rim_top);
    close_ring(&mut rim_bottom);
    close_ring(&mut spacer_top);
    close_ring(&mut spacer_bottom);
    close_ring(&mut hole_top);
    close_ring(&mut hole_bottom);

    mesh.tristrip(&hole_top, &hole_bottom); // center-hole wall
    mesh.tristrip(&hole_bottom, &spacer_bottom); // bottom cap, hole to spacer
    mesh.tristrip(&spacer_bottom, &rim_bottom); // bottom cap, spacer to rim
    mesh.tristrip(&rim_bottom, &rim_top); // outer rim wall
    mesh.tristrip(&rim_top, &spacer_top); // top margin, rim to groove start
    if params.closed_top {
        mesh.tristrip(&spacer_top, &hole_top);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn body_params() -> DiscBodyParams {
        DiscBodyParams {
            rim_radius: 3.5,
            spacer_radius: 2.875,
            hole_radius: 0.5,
            top_z: 0.125,
            bottom_z: 0.0,
            edge_count: 16,
            decimals: 5,
            closed_top: false,
        }
    }

    #[test]
    fn circle_points_samples_requested_count() {
        let ring = circle_points(1.0, 32, 5);

        assert_eq!(ring.len(), 32);
    }

    #[test]
    fn circle_points_starts_on_positive_x_axis() {
        let ring = circle_points(2.5, 8, 5);

        assert_relative_eq!(ring[0].x, 2.5);
        assert_relative_eq!(ring[0].y, 0.0);
    }

    #[test]
    fn circle_points_not_closed() {
        let ring = circle_points(1.0, 12, 5);

        assert_ne!(ring.first(), ring.last());
    }

    #[test]
    fn circle_points_lie_on_the_quantization_grid() {
        for p in circle_points(1.0, 7, 3) {
            for v in [p.x, p.y] {
                let scaled = v * 1e3;
                assert!((scaled - scaled.round()).abs() < 1e-6, "off-grid: {v}");
            }
        }
    }

    #[test]
    fn with_height_lifts_every_point() {
        let ring = circle_points(1.0, 6, 5);
        let lifted = with_height(&ring, 0.125);

        assert_eq!(lifted.len(), 6);
        assert!(lifted.iter().all(|p| p.z == 0.125));
    }

    #[test]
    fn close_ring_repeats_first() {
        let mut ring = vec![7u32, 8, 9];
        close_ring(&mut ring);

        assert_eq!(ring, vec![7, 8, 9, 7]);

        let mut empty: Vec<u32> = Vec::new();
        close_ring(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn disc_body_vertex_and_face_counts() {
        let n = 16;
        let mesh = disc_body(&body_params()).unwrap();

        // Closing rings reuses existing vertices; 3 rings at 2 heights.
        assert_eq!(mesh.vertex_count(), 6 * n);
        // Five strips of 2n faces each (open top band).
        assert_eq!(mesh.face_count(), 5 * 2 * n);
    }

    #[test]
    fn disc_body_closed_top_adds_one_strip() {
        let n = 16;
        let open = disc_body(&body_params()).unwrap();
        let closed = disc_body(&body_params().closed()).unwrap();

        assert_eq!(closed.face_count() - open.face_count(), 2 * n);
    }

    #[test]
    fn disc_body_indices_in_range() {
        let mesh = disc_body(&body_params()).unwrap();
        let count = mesh.vertex_count() as u32;

        for face in &mesh.faces {
            assert!(face.iter().all(|&i| i < count));
        }
    }

    #[test]
    fn disc_body_rejects_few_edges() {
        let mut params = body_params();
        params.edge_count = 2;

        assert!(matches!(
            disc_body(&params),
            Err(GrooveError::TooFewRingEdges { .. })
        ));
    }

    #[test]
    fn disc_body_rejects_unordered_radii() {
        let mut params = body_params();
        params.hole_radius = 3.0;

        assert!(matches!(
            disc_body(&params),
            Err(GrooveError::RadiiOutOfOrder { .. })
        ));
    }

    #[test]
    fn disc_body_from_record_matches_dimensions() {
        let record = RecordParams::seven_inch();
        let params = DiscBodyParams::from_record(&record);

        assert_relative_eq!(params.rim_radius, 3.5);
        assert_relative_eq!(params.spacer_radius, record.outer_groove_radius);
        assert!(!params.closed_top);
    }
}
