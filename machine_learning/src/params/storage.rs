//! Model files are safetensors archives holding the tensors `W1`, `b1`, `W2` and `b2`.
//!
//! Data is little endian, written as `F64`. Biases are stored as column vectors (`[n, 1]`), flat
//! biases (`[n]`) and `F32` tensors are accepted when loading.

use std::{collections::HashMap, fs, path::Path};

use log::debug;
use ndarray::{Array1, Array2};
use safetensors::{Dtype, SafeTensors, tensor::TensorView};

use super::NetworkParameters;
use crate::{
    MlErr, Result,
    arch::{HIDDEN_SIZE, INPUT_SIZE, OUTPUT_SIZE},
};

impl NetworkParameters {
    /// Reads the parameters from a model file.
    ///
    /// # Arguments
    /// * `path` - The path of the safetensors file.
    ///
    /// # Returns
    /// The parameters or an error if the file can't be read or doesn't hold a valid model.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let buf = fs::read(path)?;
        debug!("read {} bytes of parameters from {}", buf.len(), path.display());

        Self::from_bytes(&buf)
    }

    /// Writes the parameters to a model file, truncating it if it exists.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let buf = self.to_bytes()?;
        fs::write(path, &buf)?;
        debug!("wrote {} bytes of parameters to {}", buf.len(), path.display());

        Ok(())
    }

    /// Decodes the parameters from an in-memory safetensors buffer.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        let tensors = SafeTensors::deserialize(buf)?;

        let w1 = read_tensor(&tensors, "W1", &[HIDDEN_SIZE, INPUT_SIZE])?;
        let b1 = read_tensor(&tensors, "b1", &[HIDDEN_SIZE, 1])?;
        let w2 = read_tensor(&tensors, "W2", &[OUTPUT_SIZE, HIDDEN_SIZE])?;
        let b2 = read_tensor(&tensors, "b2", &[OUTPUT_SIZE, 1])?;

        let w1 = matrix("W1", (HIDDEN_SIZE, INPUT_SIZE), w1)?;
        let w2 = matrix("W2", (OUTPUT_SIZE, HIDDEN_SIZE), w2)?;

        Self::new(w1, Array1::from(b1), w2, Array1::from(b2))
    }

    /// Encodes the parameters as a safetensors buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let w1 = le_bytes(self.w1().iter());
        let b1 = le_bytes(self.b1().iter());
        let w2 = le_bytes(self.w2().iter());
        let b2 = le_bytes(self.b2().iter());

        let tensors = [
            ("W1", TensorView::new(Dtype::F64, vec![HIDDEN_SIZE, INPUT_SIZE], &w1)?),
            ("b1", TensorView::new(Dtype::F64, vec![HIDDEN_SIZE, 1], &b1)?),
            ("W2", TensorView::new(Dtype::F64, vec![OUTPUT_SIZE, HIDDEN_SIZE], &w2)?),
            ("b2", TensorView::new(Dtype::F64, vec![OUTPUT_SIZE, 1], &b2)?),
        ];

        let metadata = HashMap::from([(
            "topology".to_string(),
            format!("{INPUT_SIZE}-{HIDDEN_SIZE}-{OUTPUT_SIZE}"),
        )]);

        Ok(safetensors::serialize(tensors, &Some(metadata))?)
    }
}

/// Lays `values` out row by row as a `rows`x`cols` matrix.
fn matrix(
    what: &'static str,
    (rows, cols): (usize, usize),
    values: Vec<f64>,
) -> Result<Array2<f64>> {
    let len = values.len();

    Array2::from_shape_vec((rows, cols), values).map_err(|_| MlErr::ShapeMismatch {
        what,
        got: vec![len],
        expected: vec![rows, cols],
    })
}

fn le_bytes<'a, I>(values: I) -> Vec<u8>
where
    I: Iterator<Item = &'a f64>,
{
    values.flat_map(|v| v.to_le_bytes()).collect()
}

/// A column vector shape `[n, 1]` also matches a flat `[n]`.
fn shape_matches(got: &[usize], expected: &[usize]) -> bool {
    got == expected || (expected.last() == Some(&1) && got == &expected[..expected.len() - 1])
}

/// Reads a tensor's values in row major order as `f64`s.
fn read_tensor(
    tensors: &SafeTensors<'_>,
    name: &'static str,
    shape: &[usize],
) -> Result<Vec<f64>> {
    let view = tensors
        .tensor(name)
        .map_err(|_| MlErr::MissingTensor(name))?;

    if !shape_matches(view.shape(), shape) {
        return Err(MlErr::ShapeMismatch {
            what: name,
            got: view.shape().to_vec(),
            expected: shape.to_vec(),
        });
    }

    let data = view.data();
    let values = match view.dtype() {
        Dtype::F64 => data
            .chunks_exact(size_of::<f64>())
            .map(|chunk| {
                let mut bytes = [0; size_of::<f64>()];
                bytes.copy_from_slice(chunk);
                f64::from_le_bytes(bytes)
            })
            .collect(),
        Dtype::F32 => data
            .chunks_exact(size_of::<f32>())
            .map(|chunk| {
                let mut bytes = [0; size_of::<f32>()];
                bytes.copy_from_slice(chunk);
                f32::from_le_bytes(bytes) as f64
            })
            .collect(),
        dtype => return Err(MlErr::UnsupportedDtype { tensor: name, dtype }),
    };

    Ok(values)
}
