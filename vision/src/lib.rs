mod error;
mod feature;
mod normalize;
mod sample;

pub use error::{Result, VisionErr};
pub use feature::{FeatureVector, LEN, SIDE};
pub use normalize::{THRESHOLD, decode, grayscale, normalize, normalize_bytes, open};
pub use sample::{CANVAS, sample_image};
