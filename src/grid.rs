//! Temperature grids for sweep calculations.
//!
//! Every sweep evaluates the registry over a fixed grid of Kelvin samples,
//! either a linear range with a point count (the pyCALPHAD-style scripts) or
//! a fixed step (the Thermo-Calc extraction scripts). The grid is immutable
//! once built and guaranteed strictly increasing with all samples above 0 K.

use crate::units::kelvin_to_celsius;

/// Errors from temperature grid construction.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The lower bound is not strictly below the upper bound.
    #[error("empty temperature range: {t_min} K >= {t_max} K")]
    EmptyRange {
        /// Requested lower bound in Kelvin.
        t_min: f64,
        /// Requested upper bound in Kelvin.
        t_max: f64,
    },

    /// A bound at or below absolute zero.
    #[error("temperatures must be positive, got {0} K")]
    NonPositiveTemperature(f64),

    /// A non-positive step size.
    #[error("step must be positive, got {0} K")]
    NonPositiveStep(f64),

    /// Fewer than two points requested for a linear range.
    #[error("a linear grid needs at least 2 points, got {0}")]
    TooFewPoints(usize),
}

/// An immutable, strictly increasing list of Kelvin samples.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureGrid {
    points: Vec<f64>,
}

impl TemperatureGrid {
    /// Build a linear grid of `n` evenly spaced points over `[t_min, t_max]`,
    /// endpoints included.
    pub fn linspace(t_min: f64, t_max: f64, n: usize) -> Result<Self, GridError> {
        Self::validate_bounds(t_min, t_max)?;
        if n < 2 {
            return Err(GridError::TooFewPoints(n));
        }

        let span = t_max - t_min;
        let points = (0..n)
            .map(|i| t_min + span * (i as f64) / ((n - 1) as f64))
            .collect();
        Ok(Self { points })
    }

    /// Build a fixed-step grid starting at `t_min` and not exceeding `t_max`.
    ///
    /// `t_max` itself is included when it falls exactly on a step, matching
    /// the inclusive ranges used by the extraction scripts (500-2000 K in
    /// 50 K steps yields 31 points).
    pub fn with_step(t_min: f64, t_max: f64, step: f64) -> Result<Self, GridError> {
        Self::validate_bounds(t_min, t_max)?;
        if step <= 0.0 {
            return Err(GridError::NonPositiveStep(step));
        }

        let mut points = Vec::new();
        let mut i = 0usize;
        loop {
            let t = t_min + step * (i as f64);
            // Absorb accumulated float error at the top of the range.
            if t > t_max + step * 1e-9 {
                break;
            }
            points.push(t.min(t_max));
            i += 1;
        }
        Ok(Self { points })
    }

    fn validate_bounds(t_min: f64, t_max: f64) -> Result<(), GridError> {
        if t_min <= 0.0 {
            return Err(GridError::NonPositiveTemperature(t_min));
        }
        if t_min >= t_max {
            return Err(GridError::EmptyRange { t_min, t_max });
        }
        Ok(())
    }

    /// The Kelvin samples, strictly increasing.
    pub fn kelvin(&self) -> &[f64] {
        &self.points
    }

    /// Number of samples in the grid.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the grid holds no samples. Construction guarantees this is
    /// false for any grid obtained through the public constructors.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over `(T_K, T_C)` pairs.
    pub fn iter_kc(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().map(|&t| (t, kelvin_to_celsius(t)))
    }

    /// First sample in Kelvin.
    pub fn t_min(&self) -> f64 {
        self.points[0]
    }

    /// Last sample in Kelvin.
    pub fn t_max(&self) -> f64 {
        self.points[self.points.len() - 1]
    }
}
