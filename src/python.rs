use pyo3::create_exception;
use pyo3::exceptions::{PyArithmeticError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyTuple;

use crate::error::{ErrorPolicy, MatrixError};
use crate::matrix::matrix::Matrix;

create_exception!(dense_matrix, InvalidArgumentError, PyValueError);
create_exception!(dense_matrix, DimensionError, PyValueError);
create_exception!(dense_matrix, SingularMatrixError, PyArithmeticError);

impl From<MatrixError> for PyErr {
    fn from(err: MatrixError) -> PyErr {
        match &err {
            MatrixError::InvalidArgument(_) => InvalidArgumentError::new_err(err.to_string()),
            MatrixError::Dimension { .. } => DimensionError::new_err(err.to_string()),
            MatrixError::SingularMatrix => SingularMatrixError::new_err(err.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
#[pyclass(name = "Matrix", module = "dense_matrix")]
pub struct PyMatrix {
    pub inner: Matrix,
}

// Python Matrix objects are cloned, lists are converted.
fn extract_matrix(obj: &Bound<'_, PyAny>) -> PyResult<Matrix> {
    if let Ok(matrix) = obj.downcast::<PyMatrix>() {
        return Ok(matrix.try_borrow()?.inner.clone());
    }
    let lines: Vec<Vec<f64>> = obj
        .extract()
        .map_err(|_| MatrixError::invalid("expected a Matrix or a list of lists of numbers"))?;
    Ok(Matrix::from_list(lines)?)
}

// Converts and shape-checks the operands in argument order, stopping at the
// first one that fails either step.
fn extract_operands(
    slf: &Bound<'_, PyMatrix>,
    others: &Bound<'_, PyTuple>,
    op: &'static str,
) -> PyResult<Vec<Matrix>> {
    let shape = slf.try_borrow()?.inner.shape();
    others
        .iter()
        .map(|other| -> PyResult<Matrix> {
            let operand = extract_matrix(&other)?;
            if operand.shape() != shape {
                return Err(MatrixError::dimension(op, shape, operand.shape()).into());
            }
            Ok(operand)
        })
        .collect()
}

fn extract_generated(generator: &Bound<'_, PyAny>, rows: usize, cols: usize) -> PyResult<Matrix> {
    Matrix::try_from_fn(rows, cols, |r, c| generator.call1((r, c))?.extract::<f64>())
}

impl PyMatrix {
    // Errors raised while reading Python arguments go through the same policy
    // as the ones raised by the engine.
    fn tolerate(slf: &Bound<'_, Self>, result: PyResult<()>) -> PyResult<()> {
        match result {
            Err(err) if slf.try_borrow()?.inner.policy().is_silent() => {
                log::warn!("suppressed matrix error: {}", err);
                Ok(())
            }
            other => other,
        }
    }
}

#[pymethods]
impl PyMatrix {
    #[new]
    #[pyo3(signature = (rows, cols = None, generator = None))]
    pub fn new(
        rows: &Bound<'_, PyAny>,
        cols: Option<usize>,
        generator: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<Self> {
        let inner = match cols {
            None => extract_matrix(rows)?,
            Some(cols) => {
                let rows = rows
                    .extract::<usize>()
                    .map_err(|_| MatrixError::invalid("row count must be a non-negative integer"))?;
                match generator {
                    Some(generator) => extract_generated(generator, rows, cols)?,
                    None => Matrix::new(rows, cols),
                }
            }
        };
        Ok(PyMatrix { inner })
    }

    #[staticmethod]
    pub fn identity(n: usize) -> Self {
        PyMatrix {
            inner: Matrix::identity(n),
        }
    }

    #[getter]
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    #[getter]
    pub fn cols(&self) -> usize {
        self.inner.cols()
    }

    #[getter]
    pub fn silent(&self) -> bool {
        self.inner.policy().is_silent()
    }

    #[setter]
    pub fn set_silent(&mut self, silent: bool) {
        self.inner.set_policy(ErrorPolicy::from_silent(silent));
    }

    pub fn to_list(&self) -> Vec<Vec<f64>> {
        self.inner.to_list()
    }

    #[pyo3(name = "clone")]
    pub fn py_clone(&self) -> Self {
        Clone::clone(self)
    }

    pub fn equals(&self, other: &Bound<'_, PyAny>) -> bool {
        extract_matrix(other).is_ok_and(|other| self.inner == other)
    }

    pub fn __eq__(&self, other: &Bound<'_, PyAny>) -> bool {
        self.equals(other)
    }

    pub fn __repr__(&self) -> String {
        format!("Matrix({:?})", self.inner.to_list())
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    pub fn submatrix(&self, exclude_row: usize, exclude_col: usize) -> Self {
        PyMatrix {
            inner: self.inner.submatrix(exclude_row, exclude_col),
        }
    }

    pub fn determinant(&self) -> PyResult<f64> {
        Ok(self.inner.determinant()?)
    }

    pub fn set_data<'py>(
        slf: &Bound<'py, Self>,
        source: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, Self>> {
        let data = if source.is_callable() {
            let (rows, cols) = slf.try_borrow()?.inner.shape();
            extract_generated(source, rows, cols)
        } else {
            extract_matrix(source)
        };
        let result = data.and_then(|data| {
            slf.try_borrow_mut()?.inner.set_data(data)?;
            Ok(())
        });
        Self::tolerate(slf, result)?;
        Ok(slf.clone())
    }

    #[pyo3(signature = (*others))]
    pub fn add<'py>(
        slf: &Bound<'py, Self>,
        others: &Bound<'py, PyTuple>,
    ) -> PyResult<Bound<'py, Self>> {
        let result = extract_operands(slf, others, "add").and_then(|operands| {
            slf.try_borrow_mut()?.inner.add_many(&operands)?;
            Ok(())
        });
        Self::tolerate(slf, result)?;
        Ok(slf.clone())
    }

    #[pyo3(signature = (*others))]
    pub fn subtract<'py>(
        slf: &Bound<'py, Self>,
        others: &Bound<'py, PyTuple>,
    ) -> PyResult<Bound<'py, Self>> {
        let result = extract_operands(slf, others, "subtract").and_then(|operands| {
            slf.try_borrow_mut()?.inner.subtract_many(&operands)?;
            Ok(())
        });
        Self::tolerate(slf, result)?;
        Ok(slf.clone())
    }

    pub fn scalar<'py>(
        slf: &Bound<'py, Self>,
        k: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, Self>> {
        let result = k
            .extract::<f64>()
            .map_err(|_| PyErr::from(MatrixError::invalid("scalar must be a number")))
            .and_then(|k| {
                slf.try_borrow_mut()?.inner.scalar(k)?;
                Ok(())
            });
        Self::tolerate(slf, result)?;
        Ok(slf.clone())
    }

    pub fn multiply<'py>(
        slf: &Bound<'py, Self>,
        other: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, Self>> {
        let result = extract_matrix(other).and_then(|other| {
            slf.try_borrow_mut()?.inner.multiply(other)?;
            Ok(())
        });
        Self::tolerate(slf, result)?;
        Ok(slf.clone())
    }

    pub fn raise_<'py>(
        slf: &Bound<'py, Self>,
        power: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, Self>> {
        let result = power
            .extract::<f64>()
            .map_err(|_| PyErr::from(MatrixError::invalid("power must be a number")))
            .and_then(|power| {
                slf.try_borrow_mut()?.inner.raise(power)?;
                Ok(())
            });
        Self::tolerate(slf, result)?;
        Ok(slf.clone())
    }

    pub fn square<'py>(slf: &Bound<'py, Self>) -> PyResult<Bound<'py, Self>> {
        slf.try_borrow_mut()?.inner.square()?;
        Ok(slf.clone())
    }

    pub fn cube<'py>(slf: &Bound<'py, Self>) -> PyResult<Bound<'py, Self>> {
        slf.try_borrow_mut()?.inner.cube()?;
        Ok(slf.clone())
    }

    pub fn inverse<'py>(slf: &Bound<'py, Self>) -> PyResult<Bound<'py, Self>> {
        slf.try_borrow_mut()?.inner.inverse()?;
        Ok(slf.clone())
    }
}
