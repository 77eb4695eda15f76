//! Mesh assembly: checked merging, export finalization and the full
//! disc-pressing pipeline.

use record_mesh::TriMesh;
use tracing::{info, warn};

use crate::error::GrooveResult;
use crate::params::RecordParams;
use crate::shapes::{disc_body, DiscBodyParams};
use crate::sweep::{engrave_into, EngraveSummary};

/// Diagnostic from a checked merge.
///
/// For meshes sharing no boundary, the Euler characteristic of the merged
/// result equals the sum of the parts. A mismatch is surfaced here (and
/// logged), never thrown: procedurally generated geometry is allowed minor
/// topological defects, and downstream tooling tolerates them.
#[derive(Debug, Clone, Copy)]
pub struct MergeReport {
    /// Euler characteristic of the receiving mesh before the merge.
    pub euler_left: i64,
    /// Euler characteristic of the merged-in mesh.
    pub euler_right: i64,
    /// Euler characteristic of the combined mesh.
    pub euler_merged: i64,
}

impl MergeReport {
    /// Whether the merged characteristic equals the sum of the parts
    /// (expected for disjoint inputs).
    #[must_use]
    pub fn is_additive(&self) -> bool {
        self.euler_merged == self.euler_left + self.euler_right
    }
}

impl std::fmt::Display for MergeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Merge: χ {} + {} -> {} ({})",
            self.euler_left,
            self.euler_right,
            self.euler_merged,
            if self.is_additive() {
                "additive"
            } else {
                "shared boundary or defect"
            }
        )
    }
}

/// Merge `addition` into `base` and verify Euler additivity.
///
/// The merge itself re-indexes `addition`'s vertices through `base`'s
/// registry and appends its faces — no faces are dropped. The report
/// carries the before/after characteristics; a non-additive result is
/// logged as a warning.
#[must_use]
pub fn merge_checked(mut base: TriMesh, addition: &TriMesh) -> (TriMesh, MergeReport) {
    let euler_left = base.euler_characteristic();
    let euler_right = addition.euler_characteristic();

    base.merge(addition);

    let report = MergeReport {
        euler_left,
        euler_right,
        euler_merged: base.euler_characteristic(),
    };
    if report.is_additive() {
        info!(%report, "meshes merged");
    } else {
        warn!(%report, "Euler characteristic not additive after merge");
    }
    (base, report)
}

/// Cleanup counts from [`finalize`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FinalizeSummary {
    /// Exact repeated faces removed.
    pub duplicate_faces_removed: usize,
    /// Degenerate faces removed.
    pub degenerate_faces_removed: usize,
    /// Vertices in the exported arrays.
    pub vertex_count: usize,
    /// Faces in the exported arrays.
    pub face_count: usize,
}

impl std::fmt::Display for FinalizeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Finalize: {} vertices, {} faces ({} duplicate, {} degenerate removed)",
            self.vertex_count,
            self.face_count,
            self.duplicate_faces_removed,
            self.degenerate_faces_removed
        )
    }
}

/// Run the cleanup passes and flatten the mesh for export.
///
/// Removes exact duplicate faces, then degenerate faces, and returns the
/// vertex coordinate array (index order) and face index array — the sole
/// contract with an external mesh-file exporter.
#[must_use]
pub fn finalize(mut mesh: TriMesh) -> (Vec<[f64; 3]>, Vec<[u32; 3]>, FinalizeSummary) {
    let duplicate_faces_removed = mesh.remove_duplicate_faces();
    let degenerate_faces_removed = mesh.remove_degenerate_faces();

    let vertices: Vec<[f64; 3]> = mesh.positions().iter().map(|p| [p.x, p.y, p.z]).collect();
    let faces = mesh.faces;

    let summary = FinalizeSummary {
        duplicate_faces_removed,
        degenerate_faces_removed,
        vertex_count: vertices.len(),
        face_count: faces.len(),
    };
    info!(%summary, "mesh finalized for export");
    (vertices, faces, summary)
}

/// Summary of a full pressing run.
#[derive(Debug, Clone)]
pub struct PressSummary {
    /// What the groove sweep produced.
    pub engrave: EngraveSummary,
    /// Topology diagnostic from merging body and groove surface.
    pub merge: MergeReport,
}

impl std::fmt::Display for PressSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}; {}", self.engrave, self.merge)
    }
}

/// Press a record: disc body plus engraved groove surface, merged into one
/// mesh.
///
/// The groove surface is generated into its own mesh and merged into the
/// body through the checked merge, so the summary carries the topology
/// diagnostic. Run [`finalize`] on the result to obtain the export arrays.
///
/// # Errors
///
/// Returns a [`crate::GrooveError`] when `params` fail validation.
///
/// # Example
///
/// ```
/// use record_groove::{finalize, press_record, RecordParams};
///
/// // Keep the revolution small for the example.
/// let params = RecordParams::seven_inch().with_sampling_rate(300.0);
/// let samples: Vec<f64> = (0..500).map(|i| (f64::from(i) * 0.1).sin()).collect();
///
/// let (mesh, summary) = press_record(&samples, &params).unwrap();
/// assert!(summary.engrave.revolutions >= 1);
///
/// let (vertices, faces, _) = finalize(mesh);
/// assert!(!vertices.is_empty());
/// assert!(!faces.is_empty());
/// ```
pub fn press_record(
    samples: &[f64],
    params: &RecordParams,
) -> GrooveResult<(TriMesh, PressSummary)> {
    params.validate()?;

    let body = disc_body(&DiscBodyParams::from_record(params))?;
    let mut groove = TriMesh::new();
    let engrave = engrave_into(&mut groove, samples, params)?;

    let (mesh, merge) = merge_checked(body, &groove);
    Ok((mesh, PressSummary { engrave, merge }))
}
