use ndarray::{Array2, Axis};
use num_traits::Float;

/// Determine the N x N similarity matrix for a collection of data.
pub trait Similarity<F>
where
    F: Float + Send + Sync,
{
    /// Generate an N x N matrix in which each (i,j) index represents the
    /// similarity between row i and row j of `x`
    fn similarity(&self, x: &Array2<F>) -> Array2<F>;
}

/// Perform similarity calculation as `exp(-sum((row_i - row_j)**2) / 2)`,
/// with self-similarity fixed at zero
///
///     use ndarray::{arr2, Zip};
///     use symnmf::{GaussianKernel, Similarity};
///
///     let x = arr2(&[[0., 0.], [0., 1.], [5., 5.]]);
///     let a = GaussianKernel::default().similarity(&x);
///     let actual = arr2(&[[0., 0.6065, 0.], [0.6065, 0., 0.], [0., 0., 0.]]);
///     Zip::from(&a)
///         .and(&actual)
///         .for_each(|v: &f64, e: &f64| assert!((v - e).abs() < 1e-4));
#[derive(Debug, Default, Clone)]
pub struct GaussianKernel;

impl<F> Similarity<F> for GaussianKernel
where
    F: Float + Send + Sync,
{
    fn similarity(&self, x: &Array2<F>) -> Array2<F> {
        let x_dim = x.dim();
        let mut out = Array2::<F>::zeros((x_dim.0, x_dim.0));
        let neg_half = F::from(-0.5).unwrap();
        x.axis_iter(Axis(0)).enumerate().for_each(|(idx1, row1)| {
            x.axis_iter(Axis(0)).enumerate().for_each(|(idx2, row2)| {
                // Calculate values for half of matrix, copy over for remaining.
                // The diagonal stays zero.
                if idx2 > idx1 {
                    let mut row_diff = &row1 - &row2;
                    row_diff.map_inplace(|a| *a = (*a).powi(2));
                    out[[idx1, idx2]] = (neg_half * row_diff.sum()).exp();
                } else {
                    out[[idx1, idx2]] = out[[idx2, idx1]];
                }
            });
        });
        out
    }
}
