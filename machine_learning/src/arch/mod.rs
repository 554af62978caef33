pub mod activations;
pub mod layers;
mod network;
mod prediction;

pub use network::{ForwardPass, Network};
pub use prediction::{Prediction, argmax};

/// Length of the flattened 28x28 input image.
pub const INPUT_SIZE: usize = 784;
pub const HIDDEN_SIZE: usize = 128;
/// One output per digit.
pub const OUTPUT_SIZE: usize = 10;
