use ndarray::{Array1, ArrayView1};

/// Inputs are saturated to this magnitude before exponentiating so `exp` never overflows.
pub const CLIP: f64 = 500.;

/// The logistic activation, applied elementwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sigmoid;

impl Sigmoid {
    pub fn new() -> Self {
        Self
    }

    /// Computes `1 / (1 + e^-z)` with `z` clamped to `[-CLIP, CLIP]`.
    pub fn f(&self, z: f64) -> f64 {
        1. / (1. + (-z.clamp(-CLIP, CLIP)).exp())
    }

    pub fn apply(&self, z: ArrayView1<f64>) -> Array1<f64> {
        z.mapv(|z| self.f(z))
    }
}
