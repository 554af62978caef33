use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::{
    MlErr, Result,
    arch::{HIDDEN_SIZE, INPUT_SIZE, OUTPUT_SIZE},
};

/// The trained weights and biases of the network.
///
/// `w1`/`b1` map the input to the hidden layer and `w2`/`b2` map the hidden layer to the
/// output. Shapes are checked once on construction, after that the parameters are read only.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkParameters {
    pub(super) w1: Array2<f64>,
    pub(super) b1: Array1<f64>,
    pub(super) w2: Array2<f64>,
    pub(super) b2: Array1<f64>,
}

impl NetworkParameters {
    /// Creates a new `NetworkParameters`.
    ///
    /// # Arguments
    /// * `w1` - The hidden layer weights, shaped `(HIDDEN_SIZE, INPUT_SIZE)`.
    /// * `b1` - The hidden layer biases, `HIDDEN_SIZE` long.
    /// * `w2` - The output layer weights, shaped `(OUTPUT_SIZE, HIDDEN_SIZE)`.
    /// * `b2` - The output layer biases, `OUTPUT_SIZE` long.
    ///
    /// # Returns
    /// The parameters, or a `ShapeMismatch` naming the first tensor with the wrong shape.
    pub fn new(w1: Array2<f64>, b1: Array1<f64>, w2: Array2<f64>, b2: Array1<f64>) -> Result<Self> {
        check_shape("W1", w1.shape(), &[HIDDEN_SIZE, INPUT_SIZE])?;
        check_shape("b1", b1.shape(), &[HIDDEN_SIZE])?;
        check_shape("W2", w2.shape(), &[OUTPUT_SIZE, HIDDEN_SIZE])?;
        check_shape("b2", b2.shape(), &[OUTPUT_SIZE])?;

        Ok(Self { w1, b1, w2, b2 })
    }

    pub fn w1(&self) -> ArrayView2<'_, f64> {
        self.w1.view()
    }

    pub fn b1(&self) -> ArrayView1<'_, f64> {
        self.b1.view()
    }

    pub fn w2(&self) -> ArrayView2<'_, f64> {
        self.w2.view()
    }

    pub fn b2(&self) -> ArrayView1<'_, f64> {
        self.b2.view()
    }
}

fn check_shape(what: &'static str, got: &[usize], expected: &[usize]) -> Result<()> {
    if got != expected {
        return Err(MlErr::ShapeMismatch {
            what,
            got: got.to_vec(),
            expected: expected.to_vec(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zeros() -> (Array2<f64>, Array1<f64>, Array2<f64>, Array1<f64>) {
        (
            Array2::zeros((HIDDEN_SIZE, INPUT_SIZE)),
            Array1::zeros(HIDDEN_SIZE),
            Array2::zeros((OUTPUT_SIZE, HIDDEN_SIZE)),
            Array1::zeros(OUTPUT_SIZE),
        )
    }

    #[test]
    fn parameters_accept_the_fixed_topology() {
        let (w1, b1, w2, b2) = zeros();
        let params = NetworkParameters::new(w1, b1, w2, b2).unwrap();

        assert_eq!(params.w1().dim(), (128, 784));
        assert_eq!(params.b1().len(), 128);
        assert_eq!(params.w2().dim(), (10, 128));
        assert_eq!(params.b2().len(), 10);
    }

    #[test]
    fn parameters_reject_transposed_weights() {
        let (w1, b1, w2, b2) = zeros();
        let err = NetworkParameters::new(w1, b1, w2.reversed_axes(), b2).unwrap_err();

        assert!(matches!(err, MlErr::ShapeMismatch { what: "W2", .. }));
    }

    #[test]
    fn parameters_reject_short_biases() {
        let (w1, _, w2, b2) = zeros();
        let err = NetworkParameters::new(w1, Array1::zeros(127), w2, b2).unwrap_err();

        assert!(matches!(err, MlErr::ShapeMismatch { what: "b1", .. }));
    }
}
