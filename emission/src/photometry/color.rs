//! Temperature-to-color mapping for rendering spectra.
//!
//! Animation frames and heat maps are colored with a plasma-style ramp
//! running from deep blue (cold) through magenta and orange to yellow (hot).
//! Colors are returned as `(r, g, b)` tuples with each component in
//! [0.0, 1.0], leaving conversion to a concrete pixel type to the renderer.

use crate::algo::interp;

/// Positions of the ramp anchors along [0, 1]
const RAMP_POSITIONS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Anchor colors sampled from the plasma colormap
const RAMP_RED: [f64; 5] = [0.050, 0.494, 0.798, 0.973, 0.940];
const RAMP_GREEN: [f64; 5] = [0.030, 0.012, 0.280, 0.585, 0.975];
const RAMP_BLUE: [f64; 5] = [0.528, 0.658, 0.470, 0.251, 0.131];

/// Plasma ramp color at a normalized position
///
/// Positions outside [0, 1] are clamped; NaN maps to the cold end.
///
/// # Examples
/// ```rust
/// use emission::photometry::plasma;
///
/// let (r, g, b) = plasma(1.0);
/// assert!(r > 0.9 && g > 0.9 && b < 0.2); // yellow
/// assert_eq!(plasma(-3.0), plasma(0.0));
/// ```
pub fn plasma(position: f64) -> (f64, f64, f64) {
    let position = if position.is_nan() {
        0.0
    } else {
        position.clamp(0.0, 1.0)
    };

    // Anchors are sorted and the position is clamped, so lookups cannot fail
    let channel = |values: &[f64; 5]| interp(position, &RAMP_POSITIONS, values).unwrap_or(0.0);

    (channel(&RAMP_RED), channel(&RAMP_GREEN), channel(&RAMP_BLUE))
}

/// Color of a source at `temperature_k` relative to a temperature span
///
/// `min_k` maps to the cold end of the ramp and `max_k` to the hot end. A
/// degenerate span (constant temperature) maps everything to the hot end.
pub fn temperature_color(temperature_k: f64, min_k: f64, max_k: f64) -> (f64, f64, f64) {
    let span = max_k - min_k;
    if span.abs() <= f64::EPSILON * max_k.abs().max(1.0) {
        return plasma(1.0);
    }
    plasma((temperature_k - min_k) / span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_anchor_colors() {
        let (r, g, b) = plasma(0.0);
        assert_eq!((r, g, b), (0.050, 0.030, 0.528));

        let (r, g, b) = plasma(0.5);
        assert_eq!((r, g, b), (0.798, 0.280, 0.470));
    }

    #[test]
    fn test_midpoint_interpolates() {
        let (r, _, _) = plasma(0.125);
        assert_relative_eq!(r, (0.050 + 0.494) / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_clamping_and_nan() {
        assert_eq!(plasma(2.0), plasma(1.0));
        assert_eq!(plasma(f64::NAN), plasma(0.0));
    }

    #[test]
    fn test_temperature_color_span() {
        assert_eq!(temperature_color(300.0, 300.0, 6000.0), plasma(0.0));
        assert_eq!(temperature_color(6000.0, 300.0, 6000.0), plasma(1.0));
        assert_eq!(temperature_color(3150.0, 300.0, 6000.0), plasma(0.5));
    }

    #[test]
    fn test_constant_temperature_is_hot_end() {
        assert_eq!(temperature_color(1000.0, 1000.0, 1000.0), plasma(1.0));
    }

    #[test]
    fn test_components_in_unit_range() {
        for i in 0..=100 {
            let (r, g, b) = plasma(i as f64 / 100.0);
            for c in [r, g, b] {
                assert!((0.0..=1.0).contains(&c));
            }
        }
    }
}
