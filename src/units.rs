//! Unit conversions and physical reference values shared across the crate.
//!
//! Every output table carries temperature in both Kelvin and Celsius and
//! energies in both J and kJ, so the conversions live in one place.

/// Offset between the Kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Joules per kilojoule.
pub const J_PER_KJ: f64 = 1000.0;

/// Standard pressure in pascal (1 atm). All evaluations are isobaric at this value.
pub const STANDARD_PRESSURE_PA: f64 = 101_325.0;

/// Steelmaking reference temperature, 1600 degrees C in Kelvin.
///
/// Ladle temperatures for liquid steel sit near this point; stability
/// rankings default to it.
pub const STEELMAKING_T_K: f64 = 1873.15;

/// Convert a temperature from Kelvin to Celsius.
pub fn kelvin_to_celsius(t_k: f64) -> f64 {
    t_k - KELVIN_OFFSET
}

/// Convert a temperature from Celsius to Kelvin.
pub fn celsius_to_kelvin(t_c: f64) -> f64 {
    t_c + KELVIN_OFFSET
}

/// Convert an energy from joules to kilojoules.
pub fn j_to_kj(j: f64) -> f64 {
    j / J_PER_KJ
}

/// Convert an energy from kilojoules to joules.
pub fn kj_to_j(kj: f64) -> f64 {
    kj * J_PER_KJ
}
