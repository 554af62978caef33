use ndarray::{Array1, ArrayView1};

/// The normalized exponential over a whole vector.
///
/// The maximum element is subtracted before exponentiating, so the largest exponent is always
/// `e^0` and the sum is at least one.
#[derive(Clone, Copy, Debug, Default)]
pub struct Softmax;

impl Softmax {
    pub fn new() -> Self {
        Self
    }

    /// Turns the scores `z` into a probability distribution.
    ///
    /// # Arguments
    /// * `z` - The raw scores, one per class.
    ///
    /// # Returns
    /// A vector of the same length as `z` whose entries are non-negative and sum to one.
    pub fn apply(&self, z: ArrayView1<f64>) -> Array1<f64> {
        let max = z.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
        let exp = z.mapv(|v| (v - max).exp());
        let sum = exp.sum();

        exp / sum
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn assert_close(a: ArrayView1<f64>, b: ArrayView1<f64>) {
        assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b)
            .for_each(|(x, y)| assert!((x - y).abs() < 1e-9, "{a} != {b}"));
    }

    #[test]
    fn softmax_sums_to_one() {
        let p = Softmax.apply(array![1., 2., 3., -4., 0.5].view());

        assert!((p.sum() - 1.).abs() < 1e-12);
        assert!(p.iter().all(|&x| x >= 0.));
    }

    #[test]
    fn softmax_is_shift_invariant() {
        let z = array![0.3, -1.2, 2.7, 0., 5.];

        for c in [-100., -1., 0.25, 42., 1e4] {
            let shifted = z.mapv(|v| v + c);
            assert_close(Softmax.apply(z.view()).view(), Softmax.apply(shifted.view()).view());
        }
    }

    #[test]
    fn softmax_handles_huge_scores() {
        let p = Softmax.apply(array![1e300, 1e300, -1e300].view());

        assert_close(p.view(), array![0.5, 0.5, 0.].view());
    }

    #[test]
    fn softmax_of_equal_scores_is_uniform() {
        let p = Softmax::new().apply(Array1::from_elem(10, 7.).view());

        assert_close(p.view(), Array1::from_elem(10, 0.1).view());
    }
}
