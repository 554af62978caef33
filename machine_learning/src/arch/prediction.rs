use ndarray::{Array1, ArrayView1};

/// The network's answer for a single input.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    /// The most probable digit.
    pub class: usize,
    /// The probability of each digit, indexed by the digit itself.
    pub probabilities: Array1<f64>,
}

impl Prediction {
    /// Creates a `Prediction` choosing the most probable class.
    pub fn from_probabilities(probabilities: Array1<f64>) -> Self {
        Self {
            class: argmax(probabilities.view()),
            probabilities,
        }
    }

    /// Returns the probability assigned to the predicted class.
    pub fn confidence(&self) -> f64 {
        self.probabilities[self.class]
    }
}

/// Returns the index of the maximum value, the lowest one when several elements tie.
///
/// An empty vector yields `0`.
pub fn argmax(v: ArrayView1<f64>) -> usize {
    v.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best, max), (i, &x)| {
            if x > max { (i, x) } else { (best, max) }
        })
        .0
}
