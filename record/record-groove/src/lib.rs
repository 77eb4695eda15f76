//! Procedural spiral groove and disc geometry for audio record engraving.
//!
//! This crate turns a normalized audio sample sequence into the triangle
//! mesh of a playable disc:
//!
//! - [`RecordParams`] - Physical disc constants and derived sweep increments
//! - [`circle_points`] / [`with_height`] / [`disc_body`] - Ring sampling and
//!   the disc body (rim, spacer, center hole, caps)
//! - [`engrave_into`] - The groove sweep: a spiral channel of decreasing
//!   radius whose floor height encodes one sample per angular step
//! - [`merge_checked`] / [`finalize`] / [`press_record`] - Assembly of body
//!   and groove surface into the export arrays
//!
//! Audio decoding and normalization happen upstream; mesh-file export
//! happens downstream. This crate consumes a finite `&[f64]` in a bounded
//! range and produces flat vertex/face arrays.
//!
//! # Determinism
//!
//! Every generated coordinate is truncated to a fixed number of decimal
//! places (see [`truncate`]) before it reaches the mesh, so coincident
//! points computed through different code paths deduplicate exactly and two
//! runs over the same input produce byte-identical output.
//!
//! # Example
//!
//! ```
//! use record_groove::{finalize, press_record, RecordParams};
//!
//! // A short burst of samples on a reduced step count.
//! let params = RecordParams::seven_inch().with_sampling_rate(300.0);
//! let samples: Vec<f64> = (0..1000).map(|i| (f64::from(i) * 0.02).sin()).collect();
//!
//! let (mesh, summary) = press_record(&samples, &params).unwrap();
//! println!("{summary}");
//!
//! let (vertices, faces, _) = finalize(mesh);
//! assert!(faces.iter().flatten().all(|&i| (i as usize) < vertices.len()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod assemble;
mod error;
mod params;
mod shapes;
mod sweep;

pub use assemble::{finalize, merge_checked, press_record, FinalizeSummary, MergeReport, PressSummary};
pub use error::{GrooveError, GrooveResult};
pub use params::{truncate, RecordParams};
pub use shapes::{circle_points, close_ring, disc_body, with_height, DiscBodyParams};
pub use sweep::{engrave_into, EngraveSummary};

// Re-export the mesh type and math types for convenience
pub use nalgebra::{Point2, Point3};
pub use record_mesh::TriMesh;
