use itertools::iproduct;

use crate::error::MatrixError;
use crate::matrix::matrix::Matrix;

impl Matrix {
    /// Copy of the matrix without `exclude_row` and `exclude_col`.
    pub fn submatrix(&self, exclude_row: usize, exclude_col: usize) -> Matrix {
        let rows = self.rows - usize::from(exclude_row < self.rows);
        let cols = self.cols - usize::from(exclude_col < self.cols);

        Matrix {
            rows,
            cols,
            cells: iproduct!(0..self.rows, 0..self.cols)
                .filter(|&(r, c)| r != exclude_row && c != exclude_col)
                .map(|(r, c)| self.at(r, c))
                .collect(),
            policy: self.policy,
        }
    }

    /// Laplace expansion along the first row.
    ///
    /// The cost grows with `n!`, which keeps this usable for small matrices
    /// only. Errors are always reported, whatever the policy.
    pub fn determinant(&self) -> Result<f64, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::dimension(
                "determinant",
                (self.rows, self.rows),
                self.shape(),
            ));
        }
        Ok(self.cofactor_expansion())
    }

    fn cofactor_expansion(&self) -> f64 {
        match self.rows {
            0 => 1.0,
            1 => self.cells[0],
            2 => self.cells[0] * self.cells[3] - self.cells[1] * self.cells[2],
            n => {
                log::trace!("cofactor expansion of a {}x{} matrix", n, n);
                (0..n)
                    .map(|j| {
                        let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                        sign * self.at(0, j) * self.submatrix(0, j).cofactor_expansion()
                    })
                    .sum()
            }
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn m1() -> Matrix {
        Matrix::from([[-2.0, 2.0, 3.0], [-1.0, 1.0, 3.0], [2.0, 0.0, -1.0]])
    }

    #[test]
    fn test_submatrix() {
        assert_eq!(
            m1().submatrix(1, 1).to_list(),
            vec![vec![-2.0, 3.0], vec![2.0, -1.0]]
        );
        assert_eq!(
            m1().submatrix(0, 2).to_list(),
            vec![vec![-1.0, 1.0], vec![2.0, 0.0]]
        );

        let m2 = Matrix::from([[2.0, 1.0], [1.0, 1.0], [3.0, 1.0]]);
        assert_eq!(m2.submatrix(2, 0).to_list(), vec![vec![1.0], vec![1.0]]);
    }

    #[test]
    fn test_determinant() {
        assert_eq!(m1().determinant().unwrap(), 6.0);
        assert_eq!(Matrix::from([[4.0]]).determinant().unwrap(), 4.0);
        assert_eq!(
            Matrix::from([[3.0, 8.0], [4.0, 6.0]]).determinant().unwrap(),
            -14.0
        );
        assert_eq!(Matrix::identity(5).determinant().unwrap(), 1.0);
        assert_eq!(Matrix::new(0, 0).determinant().unwrap(), 1.0);

        let m = Matrix::from([
            [1.0, 0.0, 2.0, -1.0],
            [3.0, 0.0, 0.0, 5.0],
            [2.0, 1.0, 4.0, -3.0],
            [1.0, 0.0, 5.0, 0.0],
        ]);
        assert_eq!(m.determinant().unwrap(), 30.0);

        let singular = Matrix::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(singular.determinant().unwrap(), 0.0);
    }

    #[test]
    fn test_determinant_not_square() {
        let m2 = Matrix::from([[2.0, 1.0], [1.0, 1.0], [3.0, 1.0]]);
        assert_eq!(
            m2.determinant(),
            Err(MatrixError::dimension("determinant", (3, 3), (3, 2)))
        );
    }
}
