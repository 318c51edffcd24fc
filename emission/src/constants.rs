//! Physical constants used by the radiance model

/// Constants in SI units
pub struct SI {}

impl SI {
    /// Planck's constant
    /// Units: 6.62607015e-34 J⋅s
    pub const PLANCK_CONSTANT: f64 = 6.62607015e-34;

    /// Speed of light in vacuum
    /// Units: 2.99792458e8 m/s
    pub const SPEED_OF_LIGHT: f64 = 2.99792458e8;

    /// Boltzmann constant
    /// Units: 1.380649e-23 J/K
    pub const BOLTZMANN_CONSTANT: f64 = 1.380649e-23;

    /// Wien's displacement constant
    /// Units: 2.897771955e-3 m⋅K
    pub const WIEN_DISPLACEMENT: f64 = 2.897771955e-3;

    /// Second radiation constant hc/k_B
    /// Units: m⋅K
    pub const SECOND_RADIATION: f64 =
        Self::PLANCK_CONSTANT * Self::SPEED_OF_LIGHT / Self::BOLTZMANN_CONSTANT;
}

/// Meters per nanometer
pub const METERS_PER_NM: f64 = 1e-9;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_second_radiation_constant() {
        // c2 = 1.438776877e-2 m⋅K (CODATA 2018)
        assert_relative_eq!(SI::SECOND_RADIATION, 1.438776877e-2, max_relative = 1e-9);
    }
}
