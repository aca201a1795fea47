use num_traits::ToPrimitive;

use crate::error::MatrixError;
use crate::matrix::matrix::Matrix;

impl Matrix {
    /// Replaces the matrix with `self^power`, `power` being an integer >= 2.
    pub fn raise<P: ToPrimitive>(&mut self, power: P) -> Result<&mut Self, MatrixError> {
        let result = self
            .power(power)
            .map(|raised| self.replace_cells(raised));
        self.guarded(result)
    }

    pub fn square(&mut self) -> Result<&mut Self, MatrixError> {
        self.raise(2)
    }

    pub fn cube(&mut self) -> Result<&mut Self, MatrixError> {
        self.raise(3)
    }

    fn power<P: ToPrimitive>(&self, power: P) -> Result<Matrix, MatrixError> {
        let exponent = match power.to_f64() {
            Some(p) if p.fract() == 0.0 && p >= 2.0 => p as u64,
            _ => {
                return Err(MatrixError::invalid(
                    "power must be an integer greater than or equal to 2",
                ))
            }
        };

        if !self.is_square() {
            return Err(MatrixError::dimension(
                "raise",
                (self.rows, self.rows),
                self.shape(),
            ));
        }

        let mut raised = self.clone();
        for _ in 1..exponent {
            raised = raised.product(self)?;
        }
        Ok(raised)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorPolicy;

    fn m1() -> Matrix {
        Matrix::from([[-2.0, 2.0, 3.0], [-1.0, 1.0, 3.0], [2.0, 0.0, -1.0]])
    }

    fn m2() -> Matrix {
        Matrix::from([[2.0, 1.0], [1.0, 1.0], [3.0, 1.0]])
    }

    #[test]
    fn test_raise() {
        assert_eq!(
            m1().raise(2).unwrap().to_list(),
            vec![
                vec![8.0, -2.0, -3.0],
                vec![7.0, -1.0, -3.0],
                vec![-6.0, 4.0, 7.0]
            ]
        );
        assert_eq!(
            m1().raise(3).unwrap().to_list(),
            vec![
                vec![-20.0, 14.0, 21.0],
                vec![-19.0, 13.0, 21.0],
                vec![22.0, -8.0, -13.0]
            ]
        );
        assert_eq!(m1().raise(4.0).unwrap(), m1().raise(4u32).unwrap());
    }

    #[test]
    fn test_raise_matches_repeated_multiply() {
        for p in 2..6 {
            let mut expected = m1();
            for _ in 1..p {
                expected.multiply(&m1()).unwrap();
            }
            assert!(m1().raise(p).unwrap().equals(&expected));
        }
    }

    #[test]
    fn test_square_cube() {
        assert_eq!(m1().raise(2).unwrap().clone(), m1().square().unwrap().clone());
        assert_eq!(m1().raise(3).unwrap().clone(), m1().cube().unwrap().clone());
    }

    #[test]
    fn test_raise_invalid_power() {
        for power in [1.5, 1.0, 0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                m1().raise(power),
                Err(MatrixError::InvalidArgument(_))
            ));
        }
        assert!(m1().raise(1).is_err());
        // the power is checked before the shape
        assert!(matches!(
            m2().raise(1),
            Err(MatrixError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_raise_not_square() {
        assert_eq!(
            m2().raise(2),
            Err(MatrixError::dimension("raise", (3, 3), (3, 2)))
        );
    }

    #[test]
    fn test_raise_silent() {
        let mut m = m2().with_policy(ErrorPolicy::Silent);
        assert!(m.raise(2).is_ok());
        assert!(m.square().is_ok());
        assert_eq!(m, m2());

        let mut m = m2().with_policy(ErrorPolicy::Raise);
        assert!(m.raise(2).is_err());
    }
}
