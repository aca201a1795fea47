pub mod error;
pub mod matrix {
    pub mod combination;
    pub mod determinant;
    pub mod inverse;
    pub mod matrix;
    pub mod power;
}

#[cfg(feature = "python")]
pub mod python;

pub use error::{ErrorPolicy, MatrixError};
pub use matrix::matrix::{IntoOperand, Matrix};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn dense_matrix(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    m.add_class::<python::PyMatrix>()?;
    m.add(
        "InvalidArgumentError",
        py.get_type::<python::InvalidArgumentError>(),
    )?;
    m.add("DimensionError", py.get_type::<python::DimensionError>())?;
    m.add(
        "SingularMatrixError",
        py.get_type::<python::SingularMatrixError>(),
    )?;
    Ok(())
}
