pub mod arch;
pub mod error;
pub mod params;

pub use arch::{ForwardPass, HIDDEN_SIZE, INPUT_SIZE, Network, OUTPUT_SIZE, Prediction};
pub use error::{MlErr, Result};
pub use params::NetworkParameters;
