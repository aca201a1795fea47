use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::ops::{Index, IndexMut};

use itertools::{iproduct, Itertools};
use num_traits::{One, Zero};

use crate::error::{ErrorPolicy, MatrixError};

/// Dense row-major matrix of `f64`.
///
/// Mutating operations (`add`, `multiply`, `inverse`, ...) work in place and
/// return `&mut Self` so they can be chained with `?`. Whether a failing
/// operation reports its error or quietly does nothing is decided by the
/// matrix's [`ErrorPolicy`].
#[derive(Debug, Clone)]
pub struct Matrix {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) cells: Vec<f64>,
    pub(crate) policy: ErrorPolicy,
}

/// Anything an operation accepts in place of a `Matrix`: a matrix (owned or
/// borrowed) or a raw two-dimensional array.
pub trait IntoOperand<'a> {
    fn into_operand(self) -> Result<Cow<'a, Matrix>, MatrixError>;
}

impl Matrix {
    /// All-zero `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            cells: vec![f64::zero(); rows * cols],
            policy: ErrorPolicy::default(),
        }
    }

    pub fn from_list(lines: Vec<Vec<f64>>) -> Result<Matrix, MatrixError> {
        if !lines.iter().map(Vec::len).all_equal() {
            return Err(MatrixError::invalid("all rows must have the same length"));
        }

        let rows = lines.len();
        let cols = lines.first().map_or(0, Vec::len);

        Ok(Matrix {
            rows,
            cols,
            cells: lines.into_iter().flatten().collect(),
            policy: ErrorPolicy::default(),
        })
    }

    pub fn from_fn<F>(rows: usize, cols: usize, mut generator: F) -> Matrix
    where
        F: FnMut(usize, usize) -> f64,
    {
        match Matrix::try_from_fn(rows, cols, |r, c| Ok::<f64, Infallible>(generator(r, c))) {
            Ok(matrix) => matrix,
            Err(never) => match never {},
        }
    }

    /// Like [`Matrix::from_fn`], stopping at the first cell the generator
    /// fails on.
    pub fn try_from_fn<E, F>(rows: usize, cols: usize, mut generator: F) -> Result<Matrix, E>
    where
        F: FnMut(usize, usize) -> Result<f64, E>,
    {
        let cells = iproduct!(0..rows, 0..cols)
            .map(|(r, c)| generator(r, c))
            .collect::<Result<Vec<f64>, E>>()?;

        Ok(Matrix {
            rows,
            cols,
            cells,
            policy: ErrorPolicy::default(),
        })
    }

    pub fn identity(n: usize) -> Matrix {
        Matrix::from_fn(n, n, |i, j| if i == j { f64::one() } else { f64::zero() })
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Matrix {
        self.policy = policy;
        self
    }

    pub fn set_policy(&mut self, policy: ErrorPolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline(always)]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn to_list(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }

    /// Exact comparison against a matrix or a raw array. Shape mismatches and
    /// ragged arrays compare unequal.
    pub fn equals<'a>(&self, other: impl IntoOperand<'a>) -> bool {
        match other.into_operand() {
            Ok(other) => *self == *other,
            Err(_) => false,
        }
    }

    /// Replaces the whole grid, shape included.
    pub fn set_data<'a>(&mut self, source: impl IntoOperand<'a>) -> Result<&mut Self, MatrixError> {
        let result = source
            .into_operand()
            .map(|source| self.replace_cells(source.into_owned()));
        self.guarded(result)
    }

    /// Regenerates every cell of the current shape from `generator`.
    pub fn fill_with<F>(&mut self, generator: F) -> &mut Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let filled = Matrix::from_fn(self.rows, self.cols, generator);
        self.replace_cells(filled);
        self
    }

    /// Takes over the shape and cells of `other`, keeping this matrix's policy.
    pub(crate) fn replace_cells(&mut self, other: Matrix) {
        self.rows = other.rows;
        self.cols = other.cols;
        self.cells = other.cells;
    }

    /// Final step of every mutating operation: the policy decides whether a
    /// failure reaches the caller.
    pub(crate) fn guarded(&mut self, result: Result<(), MatrixError>) -> Result<&mut Self, MatrixError> {
        self.policy.apply(result)?;
        Ok(self)
    }
}

impl PartialEq for Matrix {
    fn eq(&self, rhs: &Matrix) -> bool {
        self.rows == rhs.rows && self.cols == rhs.cols && self.cells == rhs.cells
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.cells[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.cells[row * self.cols + col]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = (0..self.rows).map(|r| format!("[{}]", self.row(r).iter().join(", ")));
        write!(f, "{}", lines.format("\n"))
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = MatrixError;

    fn try_from(lines: Vec<Vec<f64>>) -> Result<Matrix, MatrixError> {
        Matrix::from_list(lines)
    }
}

impl<const R: usize, const C: usize> From<[[f64; C]; R]> for Matrix {
    fn from(lines: [[f64; C]; R]) -> Matrix {
        Matrix::from_fn(R, C, |r, c| lines[r][c])
    }
}

impl<'a> IntoOperand<'a> for &'a Matrix {
    fn into_operand(self) -> Result<Cow<'a, Matrix>, MatrixError> {
        Ok(Cow::Borrowed(self))
    }
}

impl<'a> IntoOperand<'a> for Matrix {
    fn into_operand(self) -> Result<Cow<'a, Matrix>, MatrixError> {
        Ok(Cow::Owned(self))
    }
}

impl<'a> IntoOperand<'a> for Vec<Vec<f64>> {
    fn into_operand(self) -> Result<Cow<'a, Matrix>, MatrixError> {
        Matrix::from_list(self).map(Cow::Owned)
    }
}

impl<'a> IntoOperand<'a> for &'a Vec<Vec<f64>> {
    fn into_operand(self) -> Result<Cow<'a, Matrix>, MatrixError> {
        self.as_slice().into_operand()
    }
}

impl<'a> IntoOperand<'a> for &'a [Vec<f64>] {
    fn into_operand(self) -> Result<Cow<'a, Matrix>, MatrixError> {
        Matrix::from_list(self.to_vec()).map(Cow::Owned)
    }
}

impl<'a, const R: usize, const C: usize> IntoOperand<'a> for [[f64; C]; R] {
    fn into_operand(self) -> Result<Cow<'a, Matrix>, MatrixError> {
        Ok(Cow::Owned(Matrix::from(self)))
    }
}

impl<'a, const R: usize, const C: usize> IntoOperand<'a> for &'a [[f64; C]; R] {
    fn into_operand(self) -> Result<Cow<'a, Matrix>, MatrixError> {
        Ok(Cow::Owned(Matrix::from(*self)))
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
