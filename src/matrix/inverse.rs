use itertools::iproduct;

use crate::error::MatrixError;
use crate::matrix::matrix::Matrix;

impl Matrix {
    /// Replaces the matrix with its inverse.
    ///
    /// Gauss-Jordan elimination on `[A | I]` with partial pivoting: each
    /// column pivots on its largest remaining entry. A pivot no larger than
    /// `n * f64::EPSILON` times the largest entry of its original row counts
    /// as zero and the matrix as singular. Elimination runs on a copy, so a
    /// failure leaves the matrix as it was.
    pub fn inverse(&mut self) -> Result<&mut Self, MatrixError> {
        let result = self
            .gauss_jordan()
            .map(|inverse| self.replace_cells(inverse));
        self.guarded(result)
    }

    pub fn is_invertible(&self) -> bool {
        self.gauss_jordan().is_ok()
    }

    fn gauss_jordan(&self) -> Result<Matrix, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::dimension(
                "inverse",
                (self.rows, self.rows),
                self.shape(),
            ));
        }

        let n = self.rows;
        let width = 2 * n;
        let mut aug: Vec<f64> = iproduct!(0..n, 0..width)
            .map(|(r, c)| match c {
                c if c < n => self.at(r, c),
                c if c - n == r => 1.0,
                _ => 0.0,
            })
            .collect();

        // largest entry of each input row, following the row through swaps
        let mut row_scale: Vec<f64> = (0..n)
            .map(|r| self.row(r).iter().fold(0.0_f64, |acc, x| acc.max(x.abs())))
            .collect();

        for col in 0..n {
            let pivot_row = (col..n)
                .max_by(|&a, &b| {
                    aug[a * width + col]
                        .abs()
                        .total_cmp(&aug[b * width + col].abs())
                })
                .ok_or(MatrixError::SingularMatrix)?;

            let pivot = aug[pivot_row * width + col];
            let tolerance = n as f64 * f64::EPSILON * row_scale[pivot_row];
            if pivot.abs() <= tolerance {
                log::debug!(
                    "no usable pivot in column {} (|{}| <= {})",
                    col,
                    pivot,
                    tolerance
                );
                return Err(MatrixError::SingularMatrix);
            }

            if pivot_row != col {
                log::debug!("swapping rows {} and {}", col, pivot_row);
                for k in 0..width {
                    aug.swap(col * width + k, pivot_row * width + k);
                }
                row_scale.swap(col, pivot_row);
            }

            for k in 0..width {
                aug[col * width + k] /= pivot;
            }

            let pivot_slice = aug[col * width..(col + 1) * width].to_vec();

            for row in 0..n {
                let factor = aug[row * width + col];
                if row == col || factor == 0.0 {
                    continue;
                }
                for k in 0..width {
                    aug[row * width + k] -= factor * pivot_slice[k];
                }
            }
        }

        Ok(Matrix {
            rows: n,
            cols: n,
            cells: (0..n)
                .flat_map(|r| aug[r * width + n..(r + 1) * width].iter().copied())
                .collect(),
            policy: self.policy,
        })
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
