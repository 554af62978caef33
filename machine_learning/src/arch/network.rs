use std::sync::Arc;

use ndarray::{Array1, ArrayView1};

use super::{
    HIDDEN_SIZE, INPUT_SIZE, OUTPUT_SIZE, Prediction,
    activations::ActFn,
    layers::{Dense, DenseOutput},
};
use crate::{MlErr, Result, params::NetworkParameters};

/// Every intermediate value of a single forward pass.
#[derive(Clone, Debug)]
pub struct ForwardPass {
    pub z1: Array1<f64>,
    pub a1: Array1<f64>,
    pub z2: Array1<f64>,
    pub a2: Array1<f64>,
}

/// The digit classifier: a sigmoid hidden layer followed by a softmax output layer.
///
/// A `Network` holds no mutable state, every method takes `&self` so it can be shared between
/// threads freely.
#[derive(Clone, Debug)]
pub struct Network {
    params: Arc<NetworkParameters>,
    hidden: Dense,
    output: Dense,
}

impl Network {
    /// Creates a new `Network`.
    ///
    /// # Arguments
    /// * `params` - The trained parameters, anything convertible into an `Arc` so that several
    ///   networks may share the same ones.
    pub fn new<P: Into<Arc<NetworkParameters>>>(params: P) -> Self {
        Self {
            params: params.into(),
            hidden: Dense::new((INPUT_SIZE, HIDDEN_SIZE), ActFn::sigmoid()),
            output: Dense::new((HIDDEN_SIZE, OUTPUT_SIZE), ActFn::softmax()),
        }
    }

    pub fn params(&self) -> &NetworkParameters {
        &self.params
    }

    /// Makes a forward pass through the network, keeping every intermediate value.
    ///
    /// # Arguments
    /// * `x` - The normalized input image, `INPUT_SIZE` long.
    ///
    /// # Returns
    /// The weighted sums and activations of both layers, or a `DimensionMismatch` error if
    /// `x` has the wrong length.
    pub fn forward_pass(&self, x: ArrayView1<f64>) -> Result<ForwardPass> {
        if x.len() != INPUT_SIZE {
            return Err(MlErr::DimensionMismatch {
                what: "input",
                got: x.len(),
                expected: INPUT_SIZE,
            });
        }

        let params = &self.params;
        let DenseOutput { z: z1, a: a1 } = self.hidden.forward(params.w1(), params.b1(), x)?;
        let DenseOutput { z: z2, a: a2 } =
            self.output.forward(params.w2(), params.b2(), a1.view())?;

        Ok(ForwardPass { z1, a1, z2, a2 })
    }

    /// Computes the probability of each digit for the input `x`.
    pub fn forward(&self, x: ArrayView1<f64>) -> Result<Array1<f64>> {
        Ok(self.forward_pass(x)?.a2)
    }

    /// Returns the most probable digit for `x`.
    pub fn predict(&self, x: ArrayView1<f64>) -> Result<usize> {
        Ok(self.predict_with_probability(x)?.class)
    }

    pub fn predict_with_probability(&self, x: ArrayView1<f64>) -> Result<Prediction> {
        let probabilities = self.forward(x)?;
        Ok(Prediction::from_probabilities(probabilities))
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};

    use super::*;

    /// A network whose output scores are the given biases, regardless of the input.
    fn biased(b2: Array1<f64>) -> Network {
        let params = NetworkParameters::new(
            Array2::zeros((HIDDEN_SIZE, INPUT_SIZE)),
            Array1::zeros(HIDDEN_SIZE),
            Array2::zeros((OUTPUT_SIZE, HIDDEN_SIZE)),
            b2,
        )
        .unwrap();

        Network::new(params)
    }

    #[test]
    fn forward_pass_follows_the_layer_order() {
        let net = biased(Array1::zeros(OUTPUT_SIZE));
        let pass = net.forward_pass(Array1::ones(INPUT_SIZE).view()).unwrap();

        assert!(pass.z1.iter().all(|&z| z == 0.));
        assert!(pass.a1.iter().all(|&a| a == 0.5));
        assert!(pass.z2.iter().all(|&z| z == 0.));
        assert!(pass.a2.iter().all(|&a| (a - 0.1).abs() < 1e-12));
    }

    #[test]
    fn predict_follows_the_output_biases() {
        let net = biased(array![0., 0., 0., 0., 0., 0., 0., 3., 0., 0.]);
        let x = Array1::zeros(INPUT_SIZE);

        let prediction = net.predict_with_probability(x.view()).unwrap();

        assert_eq!(prediction.class, 7);
        assert_eq!(net.predict(x.view()).unwrap(), 7);
        assert!((prediction.probabilities.sum() - 1.).abs() < 1e-12);
    }

    #[test]
    fn predict_breaks_ties_with_the_lowest_digit() {
        let net = biased(array![0., 0., 2., 0., 0., 2., 0., 0., 0., 0.]);

        assert_eq!(net.predict(Array1::zeros(INPUT_SIZE).view()).unwrap(), 2);
    }

    #[test]
    fn forward_rejects_wrong_input_lengths() {
        let net = biased(Array1::zeros(OUTPUT_SIZE));

        for len in [0, 783, 785] {
            let err = net.forward(Array1::zeros(len).view()).unwrap_err();

            assert!(matches!(
                err,
                MlErr::DimensionMismatch { got, expected: INPUT_SIZE, .. } if got == len
            ));
        }
    }
}
