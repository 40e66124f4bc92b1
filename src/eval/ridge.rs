//! Closed-form ridge regression on an intercept-augmented design.
//!
//! Coefficients solve the normal equations
//!
//! ```text
//! (XᵀX + αI) β = Xᵀy
//! ```
//!
//! where X carries a leading column of ones and α regularizes the full
//! diagonal, intercept included. The system is solved by Gaussian
//! elimination with partial pivoting; a singular system yields `None`
//! and the caller falls back to predicting the train mean.

const PIVOT_EPS: f64 = 1e-12;

/// Fit ridge coefficients. Index 0 is the intercept.
///
/// Returns `None` when the regularized normal matrix is singular.
pub fn fit(rows: &[Vec<f64>], targets: &[f64], alpha: f64) -> Option<Vec<f64>> {
    if rows.is_empty() {
        return None;
    }
    let d = rows[0].len() + 1;

    // Normal matrix XᵀX + αI and right-hand side Xᵀy, with X augmented
    // by a leading ones column.
    let mut gram = vec![vec![0.0; d]; d];
    let mut rhs = vec![0.0; d];

    for (row, &y) in rows.iter().zip(targets) {
        let augmented = |k: usize| if k == 0 { 1.0 } else { row[k - 1] };
        for i in 0..d {
            let xi = augmented(i);
            rhs[i] += xi * y;
            for j in i..d {
                gram[i][j] += xi * augmented(j);
            }
        }
    }
    for i in 0..d {
        for j in 0..i {
            gram[i][j] = gram[j][i];
        }
        gram[i][i] += alpha;
    }

    solve(gram, rhs)
}

/// Predict with fitted coefficients (intercept at index 0).
pub fn predict(coeffs: &[f64], row: &[f64]) -> f64 {
    coeffs[0]
        + coeffs[1..]
            .iter()
            .zip(row)
            .map(|(c, x)| c * x)
            .sum::<f64>()
}

/// Gaussian elimination with partial pivoting.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        // Pivot: largest absolute value in this column at or below the diagonal
        let pivot_row = (col..n).max_by(|&i, &j| {
            a[i][col]
                .abs()
                .partial_cmp(&a[j][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if a[pivot_row][col].abs() < PIVOT_EPS {
            return None;
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    // Back substitution
    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut sum = b[row];
        for k in (row + 1)..n {
            sum -= a[row][k] * x[k];
        }
        x[row] = sum / a[row][row];
    }
    Some(x)
}
