//! Even sampling and linear interpolation over 1D data.

use thiserror::Error;

/// Errors that can occur during interpolation operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpError {
    #[error("Value {0} is out of bounds for interpolation range [{1}, {2}]")]
    OutOfBounds(f64, f64, f64),
    #[error("Input vectors must have at least 2 points")]
    InsufficientData,
    #[error("Input vectors must have the same length")]
    MismatchedLengths,
    #[error("X values must be sorted in ascending order")]
    UnsortedData,
}

/// Evenly spaced samples over a closed interval.
///
/// Matches the usual `linspace` convention: both endpoints are included,
/// a single sample returns `[start]` and zero samples return an empty vector.
/// The last sample is pinned to `end` exactly so it does not pick up
/// accumulated rounding.
///
/// # Examples
///
/// ```rust
/// use emission::algo::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
/// ```
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        end
                    } else {
                        start + i as f64 * step
                    }
                })
                .collect()
        }
    }
}

/// Samples spaced evenly on a logarithmic scale between two positive values.
///
/// Used for scanning quantities such as temperature that span orders of
/// magnitude. A single sample returns `[start]`.
pub fn logspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n <= 1 {
        return linspace(start, end, n);
    }

    linspace(start.ln(), end.ln(), n)
        .into_iter()
        .map(f64::exp)
        .collect()
}

/// Performs linear interpolation on 1D data using binary search.
///
/// # Arguments
///
/// * `x` - The x-coordinate at which to interpolate
/// * `xs` - Array of x-coordinates (must be sorted in ascending order)
/// * `ys` - Array of corresponding y-values (must match length of xs)
///
/// # Errors
///
/// * `InterpError::OutOfBounds` - x is outside the range \\[xs\\[0\\], xs\\[n-1\\]\\]
/// * `InterpError::InsufficientData` - Less than 2 data points provided
/// * `InterpError::MismatchedLengths` - xs and ys have different lengths
/// * `InterpError::UnsortedData` - xs array is not strictly ascending
pub fn interp(x: f64, xs: &[f64], ys: &[f64]) -> Result<f64, InterpError> {
    if xs.len() != ys.len() {
        return Err(InterpError::MismatchedLengths);
    }

    if xs.len() < 2 {
        return Err(InterpError::InsufficientData);
    }

    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(InterpError::UnsortedData);
    }

    let min_x = xs[0];
    let max_x = xs[xs.len() - 1];

    if !(min_x..=max_x).contains(&x) {
        return Err(InterpError::OutOfBounds(x, min_x, max_x));
    }

    let idx = match xs.binary_search_by(|probe| probe.total_cmp(&x)) {
        Ok(exact_idx) => return Ok(ys[exact_idx]),
        Err(insert_idx) => insert_idx,
    };

    let (x1, x2) = (xs[idx - 1], xs[idx]);
    let (y1, y2) = (ys[idx - 1], ys[idx]);

    let t = (x - x1) / (x2 - x1);
    Ok(y1 + t * (y2 - y1))
}
