use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::{MlErr, Result, arch::activations::ActFn};

/// The weighted sums and activations produced by a single `Dense::forward` call.
#[derive(Clone, Debug)]
pub struct DenseOutput {
    pub z: Array1<f64>,
    pub a: Array1<f64>,
}

/// A fully connected layer. It owns no parameters, they are lent to it on every forward pass.
#[derive(Clone, Copy, Debug)]
pub struct Dense {
    dim: (usize, usize),
    act_fn: ActFn,
}

impl Dense {
    /// Creates a new `Dense` layer.
    ///
    /// # Arguments
    /// * `dim` - The input and output dimensions, in that order.
    /// * `act_fn` - The activation applied to the weighted sums.
    pub fn new(dim: (usize, usize), act_fn: ActFn) -> Self {
        Self { dim, act_fn }
    }

    /// Computes `z = w · x + b` and `a = act_fn(z)`.
    ///
    /// # Arguments
    /// * `w` - The weights, shaped `(output, input)`.
    /// * `b` - The biases, one per output.
    /// * `x` - The layer's input.
    ///
    /// # Returns
    /// Both the weighted sums and the activations, or an error if any of the given arrays
    /// doesn't fit this layer's dimensions.
    pub fn forward(
        &self,
        w: ArrayView2<f64>,
        b: ArrayView1<f64>,
        x: ArrayView1<f64>,
    ) -> Result<DenseOutput> {
        let (input, output) = self.dim;

        check("input", x.len(), input)?;
        check("weight rows", w.nrows(), output)?;
        check("weight columns", w.ncols(), input)?;
        check("biases", b.len(), output)?;

        let z = w.dot(&x) + b;
        let a = self.act_fn.apply(z.view());

        Ok(DenseOutput { z, a })
    }
}

fn check(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(MlErr::DimensionMismatch {
            what,
            got,
            expected,
        });
    }

    Ok(())
}
