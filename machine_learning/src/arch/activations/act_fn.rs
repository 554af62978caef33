use ndarray::{Array1, ArrayView1};

use super::{Sigmoid, Softmax};

/// The activation applied to a layer's weighted sums.
#[derive(Clone, Copy, Debug)]
pub enum ActFn {
    Sigmoid(Sigmoid),
    Softmax(Softmax),
}

impl ActFn {
    pub fn sigmoid() -> Self {
        Self::Sigmoid(Sigmoid::new())
    }

    pub fn softmax() -> Self {
        Self::Softmax(Softmax::new())
    }

    pub fn apply(&self, z: ArrayView1<f64>) -> Array1<f64> {
        match self {
            Self::Sigmoid(a) => a.apply(z),
            Self::Softmax(a) => a.apply(z),
        }
    }
}
