use ndarray::{Array1, Array2};
use rand::Rng;
use rand_distr::StandardNormal;

use super::NetworkParameters;
use crate::arch::{HIDDEN_SIZE, INPUT_SIZE, OUTPUT_SIZE};

/// Standard deviation of the freshly initialized weights.
const WEIGHT_SCALE: f64 = 0.01;

impl NetworkParameters {
    /// Creates an untrained set of parameters: weights sampled from `N(0, 1)` scaled by
    /// `WEIGHT_SCALE` and zeroed biases.
    ///
    /// # Arguments
    /// * `rng` - The random number generator to sample the weights with.
    pub fn init<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut sample = || rng.sample::<f64, _>(StandardNormal) * WEIGHT_SCALE;

        let w1 = Array2::from_shape_simple_fn((HIDDEN_SIZE, INPUT_SIZE), &mut sample);
        let w2 = Array2::from_shape_simple_fn((OUTPUT_SIZE, HIDDEN_SIZE), &mut sample);

        Self {
            w1,
            b1: Array1::zeros(HIDDEN_SIZE),
            w2,
            b2: Array1::zeros(OUTPUT_SIZE),
        }
    }
}
