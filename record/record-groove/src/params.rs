//! Physical disc constants and derived sweep increments.
//!
//! Everything the generators need is carried in one immutable
//! [`RecordParams`] value threaded through the calls — there is no ambient
//! configuration state.

// Step counts derive from sampling rates; the values involved stay far below
// the precision limits of f64 and usize.
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::error::{GrooveError, GrooveResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Truncate a value to a fixed number of decimal places (toward zero).
///
/// This is the quantization step applied to every generated coordinate.
/// The vertex registry deduplicates by exact value, so two geometrically
/// coincident points computed through different code paths must truncate to
/// the same representation — otherwise they become distinct vertices, the
/// mesh bloats and closure checks break.
///
/// # Example
///
/// ```
/// use record_groove::truncate;
///
/// assert_eq!(truncate(0.0154321, 3), 0.015);
/// assert_eq!(truncate(-1.23456, 2), -1.23);
/// ```
#[must_use]
pub fn truncate(value: f64, decimals: u32) -> f64 {
    let multiplier = 10f64.powi(decimals as i32);
    (value * multiplier).trunc() / multiplier
}

/// Physical constants describing a disc and its groove.
///
/// All lengths share one unit (the presets use inches or millimeters); the
/// mesh inherits whatever unit the parameters use.
///
/// # Example
///
/// ```
/// use record_groove::RecordParams;
///
/// let params = RecordParams::seven_inch();
/// assert_eq!(params.steps_per_revolution(), 14700);
/// params.validate().unwrap();
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecordParams {
    /// Audio sampling rate in Hz.
    pub sampling_rate: f64,

    /// Disc rotation speed in revolutions per minute.
    pub rpm: f64,

    /// Downsampling factor applied to the sample stream.
    pub downsampling: f64,

    /// Samples consumed per angular step — lets the groove spiral faster or
    /// slower than the raw sample rate.
    pub rate_divisor: f64,

    /// Disc diameter.
    pub diameter: f64,

    /// Total disc thickness.
    pub record_height: f64,

    /// Radius of the outermost groove (where the spiral starts).
    pub outer_groove_radius: f64,

    /// Radius of the innermost groove band (the spacer toward the label area).
    pub inner_spacer_radius: f64,

    /// Diameter of the center hole.
    pub center_hole_diameter: f64,

    /// Vertical excursion of the groove floor per unit sample amplitude.
    pub amplitude: f64,

    /// Depth of the groove's neutral floor below the record surface.
    pub depth: f64,

    /// Widening factor applied to the land/groove transition so the edges
    /// are not razor sharp.
    pub bevel: f64,

    /// Width of the groove channel.
    pub groove_width: f64,

    /// Edge count used when sampling plain rings (disc body, center fill).
    pub ring_edge_count: usize,

    /// Decimal places kept by the coordinate truncation policy.
    pub precision: u32,
}

impl Default for RecordParams {
    fn default() -> Self {
        Self::seven_inch()
    }
}

impl RecordParams {
    /// A 7-inch 45 rpm disc, dimensioned in inches.
    ///
    /// Amplitude and depth derive from a 16 µm print layer: 24 layers of
    /// signal excursion and 6 layers of neutral-floor depth.
    #[must_use]
    pub fn seven_inch() -> Self {
        Self {
            sampling_rate: 44100.0,
            rpm: 45.0,
            downsampling: 4.0,
            rate_divisor: 4.0,
            diameter: 7.0,
            record_height: 0.125,
            outer_groove_radius: 2.875,
            inner_spacer_radius: 2.35,
            center_hole_diameter: 1.0,
            amplitude: 0.01511,
            depth: 0.00377,
            bevel: 0.5,
            groove_width: 0.00333,
            ring_edge_count: 32,
            precision: 5,
        }
    }

    /// A 90 mm 45 rpm disc, dimensioned in millimeters.
    ///
    /// The lighter downsampling (1.5×) packs more angular steps into each
    /// revolution than [`RecordParams::seven_inch`].
    #[must_use]
    pub fn ninety_mm() -> Self {
        Self {
            sampling_rate: 44100.0,
            rpm: 45.0,
            downsampling: 1.5,
            rate_divisor: 4.0,
            diameter: 90.0,
            record_height: 8.0,
            outer_groove_radius: 44.75,
            inner_spacer_radius: 22.5,
            center_hole_diameter: 38.2524,
            amplitude: 0.384,
            depth: 0.096,
            bevel: 0.5,
            groove_width: 0.05588,
            ring_edge_count: 32,
            precision: 5,
        }
    }

    /// Set the audio sampling rate in Hz.
    #[must_use]
    pub fn with_sampling_rate(mut self, sampling_rate: f64) -> Self {
        self.sampling_rate = sampling_rate;
        self
    }

    /// Set the rotation speed in revolutions per minute.
    #[must_use]
    pub fn with_rpm(mut self, rpm: f64) -> Self {
        self.rpm = rpm;
        self
    }

    /// Set the downsampling factor.
    #[must_use]
    pub fn with_downsampling(mut self, downsampling: f64) -> Self {
        self.downsampling = downsampling;
        self
    }

    /// Set the number of samples consumed per angular step.
    #[must_use]
    pub fn with_rate_divisor(mut self, rate_divisor: f64) -> Self {
        self.rate_divisor = rate_divisor;
        self
    }

    /// Set the groove floor excursion per unit sample amplitude.
    #[must_use]
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Set the neutral-floor depth below the record surface.
    #[must_use]
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = depth;
        self
    }

    /// Set the edge count for plain rings.
    #[must_use]
    pub fn with_ring_edge_count(mut self, ring_edge_count: usize) -> Self {
        self.ring_edge_count = ring_edge_count;
        self
    }

    /// Set the coordinate truncation precision in decimal places.
    #[must_use]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Disc rim radius (`diameter / 2`).
    #[inline]
    #[must_use]
    pub fn rim_radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Center hole radius (`center_hole_diameter / 2`).
    #[inline]
    #[must_use]
    pub fn hole_radius(&self) -> f64 {
        self.center_hole_diameter / 2.0
    }

    /// Number of angular steps in one revolution.
    ///
    /// One step per (downsampled) audio sample at the configured rotation
    /// speed: `(60 * sampling_rate) / (downsampling * rpm)`, floored.
    #[must_use]
    pub fn steps_per_revolution(&self) -> usize {
        ((60.0 * self.sampling_rate) / (self.downsampling * self.rpm)) as usize
    }

    /// Angular increment per step, in radians.
    #[must_use]
    pub fn angular_step(&self) -> f64 {
        std::f64::consts::TAU / self.steps_per_revolution() as f64
    }

    /// Radial shrink per angular step.
    ///
    /// One full revolution moves the spiral inward by exactly one groove
    /// pitch: the channel width plus the bevel flare on both sides
    /// (`groove_width + 2 * bevel * amplitude`).
    #[must_use]
    pub fn radial_step(&self) -> f64 {
        (self.groove_width + 2.0 * self.bevel * self.amplitude)
            / self.steps_per_revolution() as f64
    }

    /// Height of the groove's neutral floor (zero-amplitude input).
    #[inline]
    #[must_use]
    pub fn baseline(&self) -> f64 {
        self.record_height - self.depth - self.amplitude
    }

    /// Number of whole revolutions a sample sequence of `sample_len` values
    /// can drive.
    #[must_use]
    pub fn revolutions_for(&self, sample_len: usize) -> usize {
        let per_revolution = self.rate_divisor * self.steps_per_revolution() as f64;
        if per_revolution <= 0.0 {
            return 0;
        }
        (sample_len as f64 / per_revolution) as usize
    }

    /// Check the parameters for physical consistency.
    ///
    /// # Errors
    ///
    /// Returns a [`GrooveError`] when any dimension is non-positive or
    /// non-finite, the concentric radii are not strictly nested, the groove
    /// excursion exceeds the disc thickness, the derived step count is zero,
    /// or the ring edge count is below 3.
    pub fn validate(&self) -> GrooveResult<()> {
        let positive = [
            ("sampling_rate", self.sampling_rate),
            ("rpm", self.rpm),
            ("downsampling", self.downsampling),
            ("rate_divisor", self.rate_divisor),
            ("diameter", self.diameter),
            ("record_height", self.record_height),
            ("groove_width", self.groove_width),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GrooveError::InvalidDimension { name, value });
            }
        }

        let non_negative = [
            ("amplitude", self.amplitude),
            ("depth", self.depth),
            ("bevel", self.bevel),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(GrooveError::InvalidDimension { name, value });
            }
        }

        if self.steps_per_revolution() == 0 {
            return Err(GrooveError::ZeroStepsPerRevolution {
                sampling_rate: self.sampling_rate,
                rpm: self.rpm,
                downsampling: self.downsampling,
            });
        }

        if self.ring_edge_count < 3 {
            return Err(GrooveError::TooFewRingEdges {
                min: 3,
                actual: self.ring_edge_count,
            });
        }

        let hole = self.hole_radius();
        let spacer = self.inner_spacer_radius;
        let outer_groove = self.outer_groove_radius;
        let rim = self.rim_radius();
        if !(hole < spacer && spacer < outer_groove && outer_groove < rim) {
            return Err(GrooveError::RadiiOutOfOrder {
                hole,
                spacer,
                outer_groove,
                rim,
            });
        }

        let excursion = self.depth + self.amplitude;
        if excursion >= self.record_height {
            return Err(GrooveError::GrooveTooDeep {
                excursion,
                record_height: self.record_height,
            });
        }

        Ok(())
    }
}

impl std::fmt::Display for RecordParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Record constants:")?;
        writeln!(f, "  sampling_rate: {}", self.sampling_rate)?;
        writeln!(f, "  rpm: {}", self.rpm)?;
        writeln!(f, "  downsampling: {}", self.downsampling)?;
        writeln!(f, "  rate_divisor: {}", self.rate_divisor)?;
        writeln!(f, "  diameter: {}", self.diameter)?;
        writeln!(f, "  record_height: {}", self.record_height)?;
        writeln!(f, "  outer_groove_radius: {}", self.outer_groove_radius)?;
        writeln!(f, "  inner_spacer_radius: {}", self.inner_spacer_radius)?;
        writeln!(f, "  center_hole_diameter: {}", self.center_hole_diameter)?;
        writeln!(f, "  amplitude: {}", self.amplitude)?;
        writeln!(f, "  depth: {}", self.depth)?;
        writeln!(f, "  bevel: {}", self.bevel)?;
        writeln!(f, "  groove_width: {}", self.groove_width)?;
        writeln!(f, "  ring_edge_count: {}", self.ring_edge_count)?;
        writeln!(f, "  precision: {}", self.precision)?;
        writeln!(f, "  steps_per_revolution: {}", self.steps_per_revolution())?;
        writeln!(f, "  angular_step: {}", self.angular_step())?;
        write!(f, "  radial_step: {}", self.radial_step())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn truncate_drops_digits_toward_zero() {
        assert_eq!(truncate(0.0154321, 3), 0.015);
        assert_eq!(truncate(0.999_999, 5), 0.99999);
        assert_eq!(truncate(-1.23456, 2), -1.23);
        assert_eq!(truncate(5.0, 5), 5.0);
    }

    #[test]
    fn truncate_coarser_precision_drops_more_digits() {
        let fine = truncate(std::f64::consts::PI, 5);
        assert_eq!(fine, 3.14159);
        assert_eq!(truncate(fine, 2), 3.14);
    }

    #[test]
    fn seven_inch_derived_values() {
        let params = RecordParams::seven_inch();

        assert_eq!(params.steps_per_revolution(), 14700);
        assert_relative_eq!(params.rim_radius(), 3.5);
        assert_relative_eq!(params.hole_radius(), 0.5);
        assert_relative_eq!(params.baseline(), 0.125 - 0.00377 - 0.01511);
        assert_relative_eq!(
            params.angular_step() * params.steps_per_revolution() as f64,
            std::f64::consts::TAU
        );
    }

    #[test]
    fn ninety_mm_derived_values() {
        let params = RecordParams::ninety_mm();

        assert_eq!(params.steps_per_revolution(), 39200);
        assert_relative_eq!(params.rim_radius(), 45.0);
    }

    #[test]
    fn radial_step_covers_one_pitch_per_revolution() {
        let params = RecordParams::seven_inch();
        let pitch = params.radial_step() * params.steps_per_revolution() as f64;

        assert_relative_eq!(
            pitch,
            params.groove_width + 2.0 * params.bevel * params.amplitude,
            epsilon = 1e-12
        );
    }

    #[test]
    fn presets_validate() {
        RecordParams::seven_inch().validate().unwrap();
        RecordParams::ninety_mm().validate().unwrap();
    }

    #[test]
    fn revolutions_for_sample_lengths() {
        let params = RecordParams::seven_inch();
        let per_revolution = 4 * 14700;

        assert_eq!(params.revolutions_for(0), 0);
        assert_eq!(params.revolutions_for(per_revolution - 1), 0);
        assert_eq!(params.revolutions_for(per_revolution), 1);
        assert_eq!(params.revolutions_for(3 * per_revolution + 17), 3);
    }

    #[test]
    fn validate_rejects_nonpositive_dimension() {
        let params = RecordParams::seven_inch().with_rpm(0.0);

        assert!(matches!(
            params.validate(),
            Err(GrooveError::InvalidDimension { name: "rpm", .. })
        ));
    }

    #[test]
    fn validate_rejects_nan_dimension() {
        let mut params = RecordParams::seven_inch();
        params.diameter = f64::NAN;

        assert!(matches!(
            params.validate(),
            Err(GrooveError::InvalidDimension { name: "diameter", .. })
        ));
    }

    #[test]
    fn validate_rejects_unordered_radii() {
        let mut params = RecordParams::seven_inch();
        params.inner_spacer_radius = 3.0;
        params.outer_groove_radius = 2.0;

        assert!(matches!(
            params.validate(),
            Err(GrooveError::RadiiOutOfOrder { .. })
        ));
    }

    #[test]
    fn validate_rejects_groove_deeper_than_disc() {
        let params = RecordParams::seven_inch().with_depth(0.2);

        assert!(matches!(
            params.validate(),
            Err(GrooveError::GrooveTooDeep { .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_steps() {
        let params = RecordParams::seven_inch().with_downsampling(1e9);

        assert!(matches!(
            params.validate(),
            Err(GrooveError::ZeroStepsPerRevolution { .. })
        ));
    }

    #[test]
    fn validate_rejects_tiny_ring_edge_count() {
        let params = RecordParams::seven_inch().with_ring_edge_count(2);

        assert!(matches!(
            params.validate(),
            Err(GrooveError::TooFewRingEdges { min: 3, actual: 2 })
        ));
    }

    #[test]
    fn display_lists_constants() {
        let text = RecordParams::seven_inch().to_string();

        assert!(text.contains("rpm: 45"));
        assert!(text.contains("steps_per_revolution: 14700"));
    }
}
