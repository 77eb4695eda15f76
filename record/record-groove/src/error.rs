//! Error types for groove generation.

use thiserror::Error;

/// Result type for groove generation operations.
pub type GrooveResult<T> = Result<T, GrooveError>;

/// Errors that can occur while configuring or running the generators.
///
/// Only configuration problems surface as errors: a sample sequence that is
/// too short for a single revolution is *not* an error (the generator
/// degrades to a zero-groove disc), and topological defects after a merge
/// are diagnostics, not failures.
#[derive(Debug, Error)]
pub enum GrooveError {
    /// A physical dimension is zero, negative, NaN or infinite.
    #[error("dimension `{name}` must be a positive, finite number, got {value}")]
    InvalidDimension {
        /// Name of the offending parameter field.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The concentric radii are not strictly nested.
    #[error(
        "radii out of order: need hole {hole} < spacer {spacer} \
         < outer groove {outer_groove} < rim {rim}"
    )]
    RadiiOutOfOrder {
        /// Center hole radius.
        hole: f64,
        /// Inner spacer radius (innermost groove).
        spacer: f64,
        /// Radius of the outermost groove.
        outer_groove: f64,
        /// Disc rim radius.
        rim: f64,
    },

    /// The groove would be carved deeper than the disc is thick.
    #[error("groove excursion {excursion} does not fit within record height {record_height}")]
    GrooveTooDeep {
        /// Maximum vertical excursion of the groove floor (`depth + amplitude`).
        excursion: f64,
        /// Total disc thickness.
        record_height: f64,
    },

    /// The derived number of angular steps per revolution came out as zero.
    #[error(
        "zero angular steps per revolution \
         ({sampling_rate} Hz, {rpm} rpm, downsampling {downsampling})"
    )]
    ZeroStepsPerRevolution {
        /// Audio sampling rate in Hz.
        sampling_rate: f64,
        /// Disc rotation speed in revolutions per minute.
        rpm: f64,
        /// Downsampling factor applied to the sample stream.
        downsampling: f64,
    },

    /// Too few edges to approximate a ring.
    #[error("ring edge count must be at least {min}, got {actual}")]
    TooFewRingEdges {
        /// Minimum edge count for a non-degenerate ring.
        min: usize,
        /// The rejected value.
        actual: usize,
    },
}
