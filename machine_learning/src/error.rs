use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

use safetensors::{Dtype, SafeTensorError};

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    /// A vector's length doesn't match the dimension a layer expects.
    DimensionMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// A parameter tensor has the wrong shape.
    ShapeMismatch {
        what: &'static str,
        got: Vec<usize>,
        expected: Vec<usize>,
    },
    MissingTensor(&'static str),
    UnsupportedDtype {
        tensor: &'static str,
        dtype: Dtype,
    },
    SafeTensors(SafeTensorError),
    Io(io::Error),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::DimensionMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a dimension mismatch for {what}, got {got} and expected {expected}"
            ),
            MlErr::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "The tensor {what} has shape {got:?}, expected {expected:?}"
            ),
            MlErr::MissingTensor(name) => write!(f, "The model file has no tensor named {name}"),
            MlErr::UnsupportedDtype { tensor, dtype } => {
                write!(f, "The tensor {tensor} has an unsupported dtype {dtype:?}")
            }
            MlErr::SafeTensors(e) => write!(f, "malformed model file: {e}"),
            MlErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::SafeTensors(e) => Some(e),
            MlErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MlErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SafeTensorError> for MlErr {
    fn from(value: SafeTensorError) -> Self {
        Self::SafeTensors(value)
    }
}
