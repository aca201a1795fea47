use std::borrow::Cow;
use std::ops;

use itertools::iproduct;
use num_traits::ToPrimitive;

use crate::error::MatrixError;
use crate::matrix::matrix::{IntoOperand, Matrix};

impl Matrix {
    pub fn add<'a>(&mut self, other: impl IntoOperand<'a>) -> Result<&mut Self, MatrixError> {
        self.add_many([other])
    }

    /// Adds every operand in turn. Operands are converted and shape-checked
    /// in order before the first cell is written; the error is the one of the
    /// first operand that does not fit.
    pub fn add_many<'a, I>(&mut self, others: I) -> Result<&mut Self, MatrixError>
    where
        I: IntoIterator,
        I::Item: IntoOperand<'a>,
    {
        let result = self.combine("add", others, |a, b| a + b);
        self.guarded(result)
    }

    pub fn subtract<'a>(&mut self, other: impl IntoOperand<'a>) -> Result<&mut Self, MatrixError> {
        self.subtract_many([other])
    }

    pub fn subtract_many<'a, I>(&mut self, others: I) -> Result<&mut Self, MatrixError>
    where
        I: IntoIterator,
        I::Item: IntoOperand<'a>,
    {
        let result = self.combine("subtract", others, |a, b| a - b);
        self.guarded(result)
    }

    pub fn scalar<K: ToPrimitive>(&mut self, k: K) -> Result<&mut Self, MatrixError> {
        let result = match k.to_f64() {
            Some(k) if k.is_finite() => {
                self.cells.iter_mut().for_each(|x| *x *= k);
                Ok(())
            }
            _ => Err(MatrixError::invalid("scalar must be a finite real number")),
        };
        self.guarded(result)
    }

    /// Replaces the matrix with the product `self * other`.
    pub fn multiply<'a>(&mut self, other: impl IntoOperand<'a>) -> Result<&mut Self, MatrixError> {
        let result = other
            .into_operand()
            .and_then(|rhs| self.product(&rhs))
            .map(|product| self.replace_cells(product));
        self.guarded(result)
    }

    pub(crate) fn product(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols != rhs.rows {
            return Err(MatrixError::dimension(
                "multiply",
                (self.cols, rhs.cols),
                rhs.shape(),
            ));
        }

        Ok(Matrix {
            rows: self.rows,
            cols: rhs.cols,
            cells: iproduct!(0..self.rows, 0..rhs.cols)
                .map(|(i, j)| (0..self.cols).map(|k| self.at(i, k) * rhs.at(k, j)).sum())
                .collect(),
            policy: self.policy,
        })
    }

    fn combine<'a, I, F>(&mut self, op: &'static str, others: I, f: F) -> Result<(), MatrixError>
    where
        I: IntoIterator,
        I::Item: IntoOperand<'a>,
        F: Fn(f64, f64) -> f64,
    {
        let mut operands: Vec<Cow<'a, Matrix>> = Vec::new();
        for operand in others {
            let operand = operand.into_operand()?;
            if operand.shape() != self.shape() {
                return Err(MatrixError::dimension(op, self.shape(), operand.shape()));
            }
            operands.push(operand);
        }

        for operand in &operands {
            self.cells
                .iter_mut()
                .zip(operand.cells.iter())
                .for_each(|(a, b)| *a = f(*a, *b));
        }
        Ok(())
    }
}

// Non-mutating forms: the left side is cloned, then the in-place operation runs
// on the copy.

impl ops::Add<&Matrix> for &Matrix {
    type Output = Result<Matrix, MatrixError>;

    fn add(self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        let mut sum = self.clone();
        Matrix::add(&mut sum, rhs)?;
        Ok(sum)
    }
}

impl ops::Sub<&Matrix> for &Matrix {
    type Output = Result<Matrix, MatrixError>;

    fn sub(self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        let mut difference = self.clone();
        Matrix::subtract(&mut difference, rhs)?;
        Ok(difference)
    }
}

impl ops::Mul<&Matrix> for &Matrix {
    type Output = Result<Matrix, MatrixError>;

    fn mul(self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        let mut product = self.clone();
        Matrix::multiply(&mut product, rhs)?;
        Ok(product)
    }
}

impl ops::Mul<f64> for &Matrix {
    type Output = Result<Matrix, MatrixError>;

    fn mul(self, k: f64) -> Result<Matrix, MatrixError> {
        let mut scaled = self.clone();
        Matrix::scalar(&mut scaled, k)?;
        Ok(scaled)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
