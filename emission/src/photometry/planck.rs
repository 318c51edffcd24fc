//! Planck's law with Bose–Einstein photon occupation
//!
//! Spectral radiance of a blackbody per unit wavelength:
//!
//! ```text
//! B(λ, T) = (2hc² / λ⁵) · n(x),   n(x) = 1 / (exp(x) − 1),   x = hc / (λ k_B T)
//! ```
//!
//! `n(x)` is the mean occupation number of a photon mode at temperature T.
//! Radiance is returned in W·sr⁻¹·m⁻³ (per meter of wavelength) while
//! wavelengths are taken in nanometers, matching the rest of the crate.
//!
//! # Numerical policy
//!
//! For large `x` (short wavelengths, cold sources) `exp(x)` overflows. Above
//! [`OCCUPATION_EXP_LIMIT`] the occupation factor is replaced by its
//! asymptotic form `exp(−x)`, and the whole product is evaluated in log
//! space so the radiance smoothly underflows to 0 instead of becoming NaN.
//! For tiny `x` the Rayleigh–Jeans form `1/x` is used, which keeps very long
//! wavelengths finite as well.

use crate::constants::{METERS_PER_NM, SI};
use crate::params::InvalidParameterError;

/// Exponent above which `exp(x) − 1` is replaced by `exp(x)`
///
/// `f64::exp` overflows just above 709.78.
pub const OCCUPATION_EXP_LIMIT: f64 = 700.0;

/// Exponent below which `1 / (exp(x) − 1)` is replaced by `1 / x`
const RAYLEIGH_JEANS_LIMIT: f64 = 1e-8;

/// First radiation constant for spectral radiance, 2hc² in W⋅m²⋅sr⁻¹
const TWO_HC2: f64 = 2.0 * SI::PLANCK_CONSTANT * SI::SPEED_OF_LIGHT * SI::SPEED_OF_LIGHT;

/// Bose–Einstein mean occupation number `1 / (exp(x) − 1)` for `x = hν / k_B T`
///
/// Uses the asymptotic `exp(−x)` above [`OCCUPATION_EXP_LIMIT`], so the
/// result is always finite for positive `x`.
pub fn occupation_number(x: f64) -> f64 {
    if x > OCCUPATION_EXP_LIMIT {
        (-x).exp()
    } else {
        1.0 / x.exp_m1()
    }
}

/// Natural log of the occupation number, stable across the full range of `x`
fn ln_occupation(x: f64, ln_x: f64) -> f64 {
    if x > OCCUPATION_EXP_LIMIT {
        -x
    } else if x < RAYLEIGH_JEANS_LIMIT {
        -ln_x
    } else {
        -x.exp_m1().ln()
    }
}

/// Planck radiance for inputs that are already known to be valid
///
/// Callers guarantee `wavelength_nm > 0` and `temperature_k > 0`, both finite.
/// Radiance beyond `f64::MAX` (only reachable for absurd temperatures) is
/// clamped to `f64::MAX`.
pub(crate) fn radiance_unchecked(wavelength_nm: f64, temperature_k: f64) -> f64 {
    let wavelength_m = wavelength_nm * METERS_PER_NM;
    let ln_wavelength = wavelength_m.ln();

    let x = SI::SECOND_RADIATION / (wavelength_m * temperature_k);
    let ln_x = SI::SECOND_RADIATION.ln() - ln_wavelength - temperature_k.ln();

    (TWO_HC2.ln() - 5.0 * ln_wavelength + ln_occupation(x, ln_x))
        .exp()
        .min(f64::MAX)
}

/// Spectral radiance of a blackbody at one wavelength
///
/// # Arguments
///
/// * `wavelength_nm` - Wavelength in nanometers
/// * `temperature_k` - Temperature in Kelvin
///
/// # Returns
///
/// Spectral radiance in W·sr⁻¹·m⁻³, always finite and never negative.
///
/// # Examples
///
/// ```rust
/// use emission::photometry::planck_radiance;
///
/// let visible = planck_radiance(500.0, 5778.0).unwrap();
/// let infrared = planck_radiance(5000.0, 5778.0).unwrap();
/// assert!(visible > infrared);
/// assert!(planck_radiance(500.0, 0.0).is_err());
/// ```
pub fn planck_radiance(
    wavelength_nm: f64,
    temperature_k: f64,
) -> Result<f64, InvalidParameterError> {
    if !(temperature_k.is_finite() && temperature_k > 0.0) {
        return Err(InvalidParameterError::Temperature(temperature_k));
    }
    if !(wavelength_nm.is_finite() && wavelength_nm > 0.0) {
        return Err(InvalidParameterError::Wavelength {
            index: 0,
            value: wavelength_nm,
        });
    }
    Ok(radiance_unchecked(wavelength_nm, temperature_k))
}

/// Peak emission wavelength from Wien's displacement law, in nanometers
pub fn wien_peak_nm(temperature_k: f64) -> f64 {
    SI::WIEN_DISPLACEMENT / temperature_k / METERS_PER_NM
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Textbook evaluation without any of the stabilising rewrites
    fn naive_radiance(wavelength_nm: f64, temperature_k: f64) -> f64 {
        let wl = wavelength_nm * 1e-9;
        let numerator = TWO_HC2 / wl.powi(5);
        let denominator = (SI::SECOND_RADIATION / (wl * temperature_k)).exp() - 1.0;
        numerator / denominator
    }

    #[test]
    fn test_matches_textbook_form() {
        for &(wl, t) in &[(400.0, 6000.0), (550.0, 4500.0), (800.0, 3000.0), (3000.0, 338.4)] {
            assert_relative_eq!(
                radiance_unchecked(wl, t),
                naive_radiance(wl, t),
                max_relative = 1e-10
            );
        }
    }

    #[test]
    fn test_solar_radiance_magnitude() {
        // B(500 nm, 5778 K) ≈ 2.63e13 W·sr⁻¹·m⁻³
        let b = planck_radiance(500.0, 5778.0).unwrap();
        assert_relative_eq!(b, 2.63e13, max_relative = 0.01);
    }

    #[test]
    fn test_overflow_region_is_zero_not_nan() {
        // x = hc/(λ k T) ≈ 1439 here, past exp overflow
        let b = planck_radiance(100.0, 100.0).unwrap();
        assert_eq!(b, 0.0);

        let b = planck_radiance(1e-6, 6000.0).unwrap();
        assert!(b.is_finite() && b >= 0.0);
    }

    #[test]
    fn test_asymptotic_branch_is_continuous() {
        // λ chosen so x sits just either side of the switch-over
        let t: f64 = 300.0;
        let wl_at_limit = SI::SECOND_RADIATION / (OCCUPATION_EXP_LIMIT * t) / METERS_PER_NM;
        let below = radiance_unchecked(wl_at_limit * 1.0000001, t);
        let above = radiance_unchecked(wl_at_limit * 0.9999999, t);
        assert!(below > 0.0 && above > 0.0);
        assert_relative_eq!(below, above, max_relative = 1e-3);
    }

    #[test]
    fn test_extreme_temperature_is_clamped() {
        // ln B ≈ 823 here, past the largest finite f64
        let b = planck_radiance(1e-9, 1e300).unwrap();
        assert!(b.is_finite());
        assert_eq!(b, f64::MAX);
    }

    #[test]
    fn test_long_wavelength_tail() {
        // Rayleigh–Jeans: B ≈ 2 c k T / λ⁴
        let t: f64 = 6000.0;
        let wl_nm: f64 = 1e12;
        let wl_m = wl_nm * 1e-9;
        let rj = 2.0 * SI::SPEED_OF_LIGHT * SI::BOLTZMANN_CONSTANT * t / wl_m.powi(4);
        assert_relative_eq!(radiance_unchecked(wl_nm, t), rj, max_relative = 1e-6);
        assert!(radiance_unchecked(wl_nm, t) < 1e-20);
    }

    #[test]
    fn test_occupation_number() {
        assert_relative_eq!(occupation_number(1.0), 1.0 / (1f64.exp() - 1.0), max_relative = 1e-12);
        assert_eq!(occupation_number(800.0), (-800.0f64).exp());
        assert!(occupation_number(1e-12) > 1e11);
    }

    #[test]
    fn test_wien_peak() {
        assert_relative_eq!(wien_peak_nm(6000.0), 482.96, max_relative = 1e-3);
        assert_relative_eq!(wien_peak_nm(338.4), 8563.1, max_relative = 1e-3);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            planck_radiance(500.0, -5.0),
            Err(InvalidParameterError::Temperature(-5.0))
        );
        assert!(matches!(
            planck_radiance(0.0, 5000.0),
            Err(InvalidParameterError::Wavelength { .. })
        ));
    }
}
