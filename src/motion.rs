//! Motion record preparation.
//!
//! Builds a complete [`MotionData`] (acceleration in g, velocity in cm/s,
//! displacement in cm, plus a uniform time axis) from whichever of the
//! three histories was recorded, converting units and integrating or
//! differentiating for the other two.
//!
//! Units are closed enums with fixed conversion factors; there are no
//! process-wide conversion tables.
//!
//! ## Example
//!
//! ```rust
//! use strong_motion::motion::{AccelerationUnit, MotionData};
//!
//! let raw = vec![0.0, 98.1, 196.2, 98.1, 0.0]; // cm/s²
//! let motion =
//!     MotionData::from_acceleration(&raw, AccelerationUnit::CentimetersPerSecondSquared, 0.01)
//!         .unwrap();
//! assert_eq!(motion.accelerations.len(), 5);
//! assert!((motion.accelerations[1] - 0.1).abs() < 1e-12); // g
//! ```

use crate::error::{MotionError, MotionResult};
use crate::series::{cumtrapz, diff, time_axis};
use serde::{Deserialize, Serialize};

/// Unit of a raw acceleration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccelerationUnit {
    G,
    MetersPerSecondSquared,
    CentimetersPerSecondSquared,
    MillimetersPerSecondSquared,
    InchesPerSecondSquared,
    FeetPerSecondSquared,
}

impl AccelerationUnit {
    /// Factor converting one of this unit into g.
    pub fn to_g_factor(self) -> f64 {
        match self {
            AccelerationUnit::G => 1.0,
            AccelerationUnit::MetersPerSecondSquared => 1.0 / 9.81,
            AccelerationUnit::CentimetersPerSecondSquared => 1.0 / 981.0,
            AccelerationUnit::MillimetersPerSecondSquared => 1.0 / 9810.0,
            AccelerationUnit::InchesPerSecondSquared => 0.0025900792,
            AccelerationUnit::FeetPerSecondSquared => 1.0 / 32.17404855643,
        }
    }
}

/// Unit of a raw velocity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VelocityUnit {
    MetersPerSecond,
    CentimetersPerSecond,
    MillimetersPerSecond,
    InchesPerSecond,
    FeetPerSecond,
}

impl VelocityUnit {
    /// Factor converting one of this unit into cm/s.
    pub fn to_cm_factor(self) -> f64 {
        match self {
            VelocityUnit::MetersPerSecond => 100.0,
            VelocityUnit::CentimetersPerSecond => 1.0,
            VelocityUnit::MillimetersPerSecond => 0.1,
            VelocityUnit::InchesPerSecond => 2.54,
            VelocityUnit::FeetPerSecond => 30.48,
        }
    }
}

/// Unit of a raw displacement record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplacementUnit {
    Meters,
    Centimeters,
    Millimeters,
    Inches,
    Feet,
}

impl DisplacementUnit {
    /// Factor converting one of this unit into cm.
    pub fn to_cm_factor(self) -> f64 {
        match self {
            DisplacementUnit::Meters => 100.0,
            DisplacementUnit::Centimeters => 1.0,
            DisplacementUnit::Millimeters => 0.1,
            DisplacementUnit::Inches => 2.54,
            DisplacementUnit::Feet => 30.48,
        }
    }
}

/// A fully-prepared ground-motion record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionData {
    /// Acceleration history, in g.
    pub accelerations: Vec<f64>,
    /// Velocity history, in cm/s.
    pub velocities: Vec<f64>,
    /// Displacement history, in cm.
    pub displacements: Vec<f64>,
    /// Uniform time axis starting at 0, in s.
    pub times: Vec<f64>,
    /// Sample spacing, in s.
    pub time_step: f64,
}

impl MotionData {
    /// Build a record from an acceleration history.
    ///
    /// Velocity and displacement come from trapezoidal integration, each
    /// seeded with the first sample of the series it integrates.
    pub fn from_acceleration(
        raw: &[f64],
        unit: AccelerationUnit,
        time_step: f64,
    ) -> MotionResult<Self> {
        validate_record(raw, time_step)?;

        let factor = unit.to_g_factor();
        let accelerations: Vec<f64> = raw.iter().map(|&a| a * factor).collect();

        let velocities: Vec<f64> = cumtrapz(&accelerations, time_step, accelerations[0])
            .iter()
            .map(|&v| v * 981.0)
            .collect();
        let displacements = cumtrapz(&velocities, time_step, velocities[0]);
        let times = time_axis(raw.len(), time_step);

        Ok(Self {
            accelerations,
            velocities,
            displacements,
            times,
            time_step,
        })
    }

    /// Build a record from a velocity history.
    ///
    /// Acceleration comes from finite differences over the time axis (the
    /// first sample reuses the initial velocity), displacement from
    /// trapezoidal integration.
    pub fn from_velocity(raw: &[f64], unit: VelocityUnit, time_step: f64) -> MotionResult<Self> {
        validate_record(raw, time_step)?;

        let factor = unit.to_cm_factor();
        let velocities: Vec<f64> = raw.iter().map(|&v| v * factor).collect();
        let times = time_axis(raw.len(), time_step);

        let accelerations = differentiate_with_seed(&velocities, &times, velocities[0])
            .iter()
            .map(|&a| a / 981.0)
            .collect();
        let displacements = cumtrapz(&velocities, time_step, velocities[0]);

        Ok(Self {
            accelerations,
            velocities,
            displacements,
            times,
            time_step,
        })
    }

    /// Build a record from a displacement history.
    ///
    /// Velocity and acceleration come from successive finite differences.
    pub fn from_displacement(
        raw: &[f64],
        unit: DisplacementUnit,
        time_step: f64,
    ) -> MotionResult<Self> {
        validate_record(raw, time_step)?;

        let factor = unit.to_cm_factor();
        let displacements: Vec<f64> = raw.iter().map(|&d| d * factor).collect();
        let times = time_axis(raw.len(), time_step);

        let velocities = differentiate_with_seed(&displacements, &times, displacements[0]);
        let accelerations = differentiate_with_seed(&velocities, &times, velocities[0])
            .iter()
            .map(|&a| a / 981.0)
            .collect();

        Ok(Self {
            accelerations,
            velocities,
            displacements,
            times,
            time_step,
        })
    }

    /// Total record duration, in s.
    pub fn duration(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.accelerations.len()
    }

    /// Whether the record is empty. Construction forbids this, but the
    /// standard pair is provided for completeness.
    pub fn is_empty(&self) -> bool {
        self.accelerations.is_empty()
    }
}

/// Finite-difference derivative with the seed value prepended, keeping the
/// output as long as the input.
fn differentiate_with_seed(values: &[f64], times: &[f64], seed: f64) -> Vec<f64> {
    let dv = diff(values);
    let dts = diff(times);
    let mut out = Vec::with_capacity(values.len());
    out.push(seed);
    for (v, t) in dv.iter().zip(dts.iter()) {
        out.push(v / t);
    }
    out
}

fn validate_record(raw: &[f64], time_step: f64) -> MotionResult<()> {
    if raw.is_empty() {
        return Err(MotionError::invalid("record", "record is empty"));
    }
    if time_step <= 0.0 || !time_step.is_finite() {
        return Err(MotionError::invalid("time_step", "time step must be a positive number"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceleration_unit_factors() {
        assert_eq!(AccelerationUnit::G.to_g_factor(), 1.0);
        assert!((AccelerationUnit::MetersPerSecondSquared.to_g_factor() * 9.81 - 1.0).abs() < 1e-12);
        assert!(
            (AccelerationUnit::CentimetersPerSecondSquared.to_g_factor() * 981.0 - 1.0).abs()
                < 1e-12
        );
    }

    #[test]
    fn test_from_acceleration_converts_and_integrates() {
        let raw = vec![981.0; 11]; // constant 1 g in cm/s²
        let motion =
            MotionData::from_acceleration(&raw, AccelerationUnit::CentimetersPerSecondSquared, 0.1)
                .unwrap();
        assert!(motion.accelerations.iter().all(|&a| (a - 1.0).abs() < 1e-12));

        // Velocity grows by 981 cm/s per second of 1 g.
        for i in 1..motion.velocities.len() {
            let dv = motion.velocities[i] - motion.velocities[i - 1];
            assert!((dv - 98.1).abs() < 1e-9, "dv = {}", dv);
        }

        assert_eq!(motion.times.len(), 11);
        assert!((motion.duration() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_velocity_differentiates_back() {
        // Linearly growing velocity: 10 cm/s per second.
        let raw: Vec<f64> = (0..21).map(|i| i as f64 * 0.1).collect(); // cm/s at dt=0.01
        let motion = MotionData::from_velocity(&raw, VelocityUnit::CentimetersPerSecond, 0.01).unwrap();
        // Past the seeded first sample, acceleration is constant 10 cm/s² = 10/981 g.
        for &a in &motion.accelerations[1..] {
            assert!((a - 10.0 / 981.0).abs() < 1e-9, "a = {}", a);
        }
        assert_eq!(motion.velocities, raw);
    }

    #[test]
    fn test_from_displacement_chains_derivatives() {
        let raw: Vec<f64> = (0..11).map(|i| i as f64 * 2.0).collect(); // cm
        let motion =
            MotionData::from_displacement(&raw, DisplacementUnit::Centimeters, 0.5).unwrap();
        // Constant slope of 4 cm/s after the seeded first sample.
        for &v in &motion.velocities[1..] {
            assert!((v - 4.0).abs() < 1e-9, "v = {}", v);
        }
        assert_eq!(motion.len(), 11);
        assert!(!motion.is_empty());
    }

    #[test]
    fn test_unit_scaling_applied_before_derivation() {
        let raw = vec![1.0, 2.0, 3.0]; // m
        let motion = MotionData::from_displacement(&raw, DisplacementUnit::Meters, 1.0).unwrap();
        assert_eq!(motion.displacements, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn test_empty_and_bad_dt_rejected() {
        assert!(MotionData::from_acceleration(&[], AccelerationUnit::G, 0.01).is_err());
        assert!(MotionData::from_acceleration(&[1.0], AccelerationUnit::G, 0.0).is_err());
        assert!(MotionData::from_velocity(&[], VelocityUnit::CentimetersPerSecond, 0.01).is_err());
        assert!(MotionData::from_displacement(&[], DisplacementUnit::Centimeters, 0.01).is_err());
    }
}
