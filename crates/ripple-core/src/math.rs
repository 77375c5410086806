//! Numeric helpers shared by the pipeline stages.
//!
//! - [`linspace`] - Evenly spaced samples over a closed interval
//! - [`mean`] / [`rms`] - Signal level statistics
//! - [`least_squares`] - Small dense linear least-squares solve

/// `n` evenly spaced values from `start` to `end`, both inclusive.
///
/// Returns `[start]` for `n == 1` and an empty vector for `n == 0`.
///
/// # Example
/// ```rust
/// use ripple_core::math::linspace;
///
/// assert_eq!(linspace(-1.0, 1.0, 5), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
/// ```
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = end;
            out
        }
    }
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Root mean square; 0 for an empty slice.
pub fn rms(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
}

/// Solve the least-squares problem `min ‖A·x − y‖²` for an `N`-column design
/// matrix given row by row.
///
/// Uses the normal equations with Gaussian elimination. Columns that are
/// linearly dependent on earlier ones (zero pivot) get a zero coefficient,
/// so a rank-deficient design still yields a best-fit solution.
pub fn least_squares<const N: usize>(
    rows: impl IntoIterator<Item = [f64; N]>,
    targets: &[f64],
) -> [f64; N] {
    let mut normal = [[0.0; N]; N];
    let mut rhs = [0.0; N];

    for (row, &y) in rows.into_iter().zip(targets) {
        for i in 0..N {
            rhs[i] += row[i] * y;
            for j in 0..N {
                normal[i][j] += row[i] * row[j];
            }
        }
    }

    solve_normal(normal, rhs)
}

/// Gaussian elimination on a symmetric positive semi-definite system.
///
/// No row exchanges are needed for SPD matrices; a pivot at or below the
/// tolerance marks a dependent column whose row and column are already ~0.
fn solve_normal<const N: usize>(mut m: [[f64; N]; N], mut rhs: [f64; N]) -> [f64; N] {
    let scale = (0..N).map(|i| m[i][i].abs()).fold(0.0_f64, f64::max);
    let mut x = [0.0; N];
    if scale <= 0.0 || !scale.is_finite() {
        return x;
    }
    let tol = scale * 1e-12;
    let mut dependent = [false; N];

    for k in 0..N {
        if m[k][k].abs() <= tol {
            dependent[k] = true;
            continue;
        }
        for i in k + 1..N {
            let factor = m[i][k] / m[k][k];
            for j in k..N {
                m[i][j] -= factor * m[k][j];
            }
            rhs[i] -= factor * rhs[k];
        }
    }

    for k in (0..N).rev() {
        if dependent[k] {
            continue;
        }
        let mut acc = rhs[k];
        for j in k + 1..N {
            acc -= m[k][j] * x[j];
        }
        x[k] = acc / m[k][k];
    }

    x
}
