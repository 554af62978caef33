use image::GrayImage;
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};

/// Side of the square image the network was trained on.
pub const SIDE: u32 = 28;
/// Amount of values in a `FeatureVector`.
pub const LEN: usize = (SIDE * SIDE) as usize;

/// A normalized 28x28 image, flattened row by row. Every value lies in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector(Array1<f64>);

impl FeatureVector {
    /// Scales the pixels of a `SIDE`x`SIDE` image into `[0, 1]`.
    ///
    /// The division happens in single precision before widening, so binary pixels map to
    /// exactly `0.0` and `1.0`.
    pub(crate) fn from_gray(image: &GrayImage) -> Self {
        debug_assert_eq!(image.dimensions(), (SIDE, SIDE));

        let values = image
            .as_raw()
            .iter()
            .map(|&v| f64::from(f32::from(v) / 255.));

        Self(Array1::from_iter(values))
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.0.view()
    }

    /// Returns the vector as a `(LEN, 1)` column.
    pub fn column(&self) -> ArrayView2<'_, f64> {
        self.0.view().insert_axis(Axis(1))
    }

    pub fn into_inner(self) -> Array1<f64> {
        self.0
    }
}
