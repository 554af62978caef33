mod dense;

pub use dense::{Dense, DenseOutput};
