//! Empirical Gibbs free-energy expressions.
//!
//! Two functional forms cover everything the screening study needs:
//!
//! 1. [`LinearGibbs`], the linearized tabulation `dGf ~ A + B*T` (kJ/mol)
//!    with `A` close to the standard enthalpy of formation and `B` close to
//!    the negative entropy of formation. Adequate for comparing relative
//!    oxide stability over a limited temperature window.
//!
//! 2. [`GibbsPolynomial`], the piecewise SGTE/CALPHAD form
//!    `a + b*T + c*T*ln(T) + d*T^2 + e*T^3 + f/T` (J/mol) as assessed
//!    databases store it. The `T*ln(T)` term carries the heat-capacity
//!    dependence the linear form misses. Each piece is valid over a finite
//!    temperature range; evaluation outside every piece is either rejected
//!    or explicitly flagged as extrapolated, never silent. Crossing a range
//!    boundary usually means crossing a phase transition, so the flag is
//!    part of the result contract.

use serde::{Deserialize, Serialize};

/// Errors from Gibbs-expression evaluation.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Temperature at or below absolute zero.
    #[error("temperature must be positive, got {0} K")]
    NonPositiveTemperature(f64),

    /// Temperature outside every assessed segment under the strict policy.
    #[error("temperature {t_k} K outside assessed range {t_min}-{t_max} K")]
    OutOfRange {
        /// Requested temperature in Kelvin.
        t_k: f64,
        /// Lower bound of the assessed range.
        t_min: f64,
        /// Upper bound of the assessed range.
        t_max: f64,
    },

    /// A piecewise expression with no segments.
    #[error("expression has no segments")]
    EmptySegments,

    /// Segments that overlap or are out of order.
    #[error("segments must be sorted and non-overlapping at {0} K")]
    MalformedSegments(f64),
}

/// Linearized formation-energy fit `dGf ~ a + b*T`, in kJ/mol of compound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearGibbs {
    /// Intercept, close to the standard enthalpy of formation at 298 K.
    pub a: f64,
    /// Slope, close to the negative standard entropy of formation.
    pub b: f64,
}

impl LinearGibbs {
    /// Build a linear fit from intercept and slope.
    pub const fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Evaluate at `t_k` Kelvin, in kJ/mol.
    pub fn eval(&self, t_k: f64) -> Result<f64, ModelError> {
        if t_k <= 0.0 {
            return Err(ModelError::NonPositiveTemperature(t_k));
        }
        Ok(self.a + self.b * t_k)
    }
}

/// One piece of a piecewise CALPHAD expression, valid over `[t_min, t_max)`.
///
/// Evaluates `a + b*T + c*T*ln(T) + d*T^2 + e*T^3 + f/T` in J/mol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolySegment {
    /// Lower bound of validity in Kelvin, inclusive.
    pub t_min: f64,
    /// Upper bound of validity in Kelvin, exclusive (the last segment of an
    /// expression treats it as inclusive).
    pub t_max: f64,
    /// Constant term, J/mol.
    pub a: f64,
    /// Linear coefficient, J/(mol K).
    pub b: f64,
    /// `T*ln(T)` coefficient, J/(mol K).
    pub c: f64,
    /// Quadratic coefficient, J/(mol K^2).
    pub d: f64,
    /// Cubic coefficient, J/(mol K^3).
    pub e: f64,
    /// Reciprocal coefficient, J K/mol.
    pub f: f64,
}

impl PolySegment {
    /// Evaluate the segment expression at `t_k`, without range checking.
    pub fn eval(&self, t_k: f64) -> f64 {
        self.a
            + self.b * t_k
            + self.c * t_k * t_k.ln()
            + self.d * t_k * t_k
            + self.e * t_k * t_k * t_k
            + self.f / t_k
    }

    fn contains(&self, t_k: f64) -> bool {
        t_k >= self.t_min && t_k < self.t_max
    }
}

/// How to treat temperatures outside the assessed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangePolicy {
    /// Reject with [`ModelError::OutOfRange`].
    #[default]
    Strict,
    /// Evaluate the nearest segment and flag the result as extrapolated.
    Extrapolate,
}

/// The outcome of a range-checked evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// The temperature fell inside an assessed segment.
    InRange(f64),
    /// The temperature fell outside every segment; the value comes from the
    /// nearest segment's expression and must not be used unflagged.
    Extrapolated(f64),
}

impl Evaluation {
    /// The numeric value, regardless of flagging.
    pub fn value(self) -> f64 {
        match self {
            Evaluation::InRange(v) | Evaluation::Extrapolated(v) => v,
        }
    }

    /// Whether the value came from outside the assessed range.
    pub fn is_extrapolated(self) -> bool {
        matches!(self, Evaluation::Extrapolated(_))
    }
}

/// A piecewise CALPHAD Gibbs-energy expression in J/mol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GibbsPolynomial {
    segments: Vec<PolySegment>,
}

impl GibbsPolynomial {
    /// Build from segments. Segments must be non-empty, sorted by `t_min`,
    /// and non-overlapping.
    pub fn new(segments: Vec<PolySegment>) -> Result<Self, ModelError> {
        if segments.is_empty() {
            return Err(ModelError::EmptySegments);
        }
        for pair in segments.windows(2) {
            if pair[1].t_min < pair[0].t_max {
                return Err(ModelError::MalformedSegments(pair[1].t_min));
            }
        }
        Ok(Self { segments })
    }

    /// The overall assessed range `(t_min, t_max)` in Kelvin.
    pub fn valid_range(&self) -> (f64, f64) {
        (
            self.segments[0].t_min,
            self.segments[self.segments.len() - 1].t_max,
        )
    }

    /// Evaluate at `t_k` under the given range policy.
    pub fn eval(&self, t_k: f64, policy: RangePolicy) -> Result<Evaluation, ModelError> {
        if t_k <= 0.0 {
            return Err(ModelError::NonPositiveTemperature(t_k));
        }

        let last = self.segments.len() - 1;
        if let Some(seg) = self.segments.iter().find(|s| s.contains(t_k)) {
            return Ok(Evaluation::InRange(seg.eval(t_k)));
        }
        // The top of the last segment is part of the assessed range.
        if t_k == self.segments[last].t_max {
            return Ok(Evaluation::InRange(self.segments[last].eval(t_k)));
        }

        let (t_min, t_max) = self.valid_range();
        match policy {
            RangePolicy::Strict => Err(ModelError::OutOfRange { t_k, t_min, t_max }),
            RangePolicy::Extrapolate => {
                let seg = if t_k < t_min {
                    &self.segments[0]
                } else {
                    &self.segments[last]
                };
                Ok(Evaluation::Extrapolated(seg.eval(t_k)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The linearized Cu2O fit used throughout the study.
    const CU2O_LINEAR: LinearGibbs = LinearGibbs::new(-170.0, 0.075);

    fn ghsercu() -> GibbsPolynomial {
        GibbsPolynomial::new(vec![
            PolySegment {
                t_min: 298.15,
                t_max: 1358.0,
                a: -7770.458,
                b: 130.485_235,
                c: -24.112_392,
                d: -0.002_656_84,
                e: 1.292_23e-7,
                f: 52478.0,
            },
            PolySegment {
                t_min: 1358.0,
                t_max: 3200.0,
                a: -13542.026,
                b: 183.803_828,
                c: -31.38,
                d: 0.0,
                e: 0.0,
                f: 0.0,
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_linear_documented_example() {
        // dGf(Cu2O, 1873 K) = -170 + 0.075 * 1873 = -29.525 kJ/mol
        let v = CU2O_LINEAR.eval(1873.0).unwrap();
        assert!((v - (-29.525)).abs() < 1e-9);
    }

    #[test]
    fn test_linear_rejects_nonpositive() {
        assert!(matches!(
            CU2O_LINEAR.eval(0.0),
            Err(ModelError::NonPositiveTemperature(_))
        ));
    }

    #[test]
    fn test_segment_selection_across_melting() {
        let g = ghsercu();
        let below = g.eval(1300.0, RangePolicy::Strict).unwrap();
        let above = g.eval(1400.0, RangePolicy::Strict).unwrap();
        assert!(!below.is_extrapolated());
        assert!(!above.is_extrapolated());
        // Gibbs energy decreases with temperature for a stable element.
        assert!(above.value() < below.value());
    }

    #[test]
    fn test_strict_out_of_range() {
        let g = ghsercu();
        assert!(matches!(
            g.eval(100.0, RangePolicy::Strict),
            Err(ModelError::OutOfRange { .. })
        ));
        assert!(matches!(
            g.eval(5000.0, RangePolicy::Strict),
            Err(ModelError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_extrapolation_is_flagged() {
        let g = ghsercu();
        let low = g.eval(100.0, RangePolicy::Extrapolate).unwrap();
        assert!(low.is_extrapolated());
        let high = g.eval(5000.0, RangePolicy::Extrapolate).unwrap();
        assert!(high.is_extrapolated());
        // Extrapolation uses the nearest segment's expression.
        let first = PolySegment {
            t_min: 298.15,
            t_max: 1358.0,
            a: -7770.458,
            b: 130.485_235,
            c: -24.112_392,
            d: -0.002_656_84,
            e: 1.292_23e-7,
            f: 52478.0,
        };
        assert_eq!(low.value(), first.eval(100.0));
    }

    #[test]
    fn test_range_top_inclusive() {
        let g = ghsercu();
        let v = g.eval(3200.0, RangePolicy::Strict).unwrap();
        assert!(!v.is_extrapolated());
    }

    #[test]
    fn test_malformed_segments_rejected() {
        let seg = PolySegment {
            t_min: 298.15,
            t_max: 1358.0,
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            e: 0.0,
            f: 0.0,
        };
        let overlapping = PolySegment {
            t_min: 1000.0,
            ..seg
        };
        assert!(matches!(
            GibbsPolynomial::new(vec![seg, overlapping]),
            Err(ModelError::MalformedSegments(_))
        ));
        assert!(matches!(
            GibbsPolynomial::new(vec![]),
            Err(ModelError::EmptySegments)
        ));
    }
}
