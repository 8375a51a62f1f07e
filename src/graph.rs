use ndarray::{Array2, Axis, Zip};
use num_traits::Float;

use crate::error::{Error, Result};

/// Smallest degree that can be normalized against. A point whose similarity
/// row sums to this value or less is treated as disconnected from the rest
/// of the data, since `1/sqrt(degree)` would amplify it past any useful
/// precision and the printed output could not distinguish it from zero.
pub const MIN_DEGREE: f64 = 1e-8;

pub(crate) fn degree_matrix<F>(a: &Array2<F>) -> Array2<F>
where
    F: Float + Send + Sync,
{
    let degrees = a.sum_axis(Axis(1));
    let mut d = Array2::zeros(a.dim());
    Zip::from(d.diag_mut())
        .and(&degrees)
        .par_for_each(|t, &s| *t = s);
    d
}

pub(crate) fn normalize<F>(a: &Array2<F>) -> Result<Array2<F>>
where
    F: Float + Send + Sync,
{
    let min_degree = F::from(MIN_DEGREE).unwrap();
    let one = F::from(1.).unwrap();
    let degrees = a.sum_axis(Axis(1));
    for (point, degree) in degrees.iter().enumerate() {
        if *degree <= min_degree {
            return Err(Error::DegenerateInput { point });
        }
    }
    let inv_sqrt = degrees.map(|d| one / d.sqrt());
    let a_dim = a.dim();
    let row_factor = inv_sqrt.clone().insert_axis(Axis(1));
    let col_factor = inv_sqrt.insert_axis(Axis(0));
    Ok(Zip::from(a)
        .and(&row_factor.broadcast(a_dim).unwrap())
        .and(&col_factor.broadcast(a_dim).unwrap())
        .par_map_collect(|&v, &r, &c| v * r * c))
}

#[cfg(test)]
mod test {
    use ndarray::{arr2, Array2};

    use crate::error::Error;
    use crate::graph::{degree_matrix, normalize};

    #[test]
    fn degrees_are_row_sums() {
        let a = arr2(&[[0., 0.6, 0.1], [0.6, 0., 0.2], [0.1, 0.2, 0.]]);
        let d = degree_matrix(&a);
        let actual = arr2(&[[0.7, 0., 0.], [0., 0.8, 0.], [0., 0., 0.3]]);
        d.iter()
            .zip(actual.iter())
            .for_each(|(v, e): (&f64, &f64)| assert!((v - e).abs() < 1e-12));
    }

    #[test]
    fn normalization_formula() {
        let a = arr2(&[[0., 2.], [2., 0.]]);
        let w = normalize(&a).unwrap();
        // degree 2 for both points, so w = 2 / sqrt(2 * 2)
        let actual = arr2(&[[0., 0.5], [0.5, 0.]]);
        w.iter()
            .zip(actual.iter())
            .for_each(|(v, e): (&f64, &f64)| assert!((v - e).abs() < 1e-12));
    }

    #[test]
    fn isolated_point_is_rejected() {
        let a = arr2(&[[0., 1e-9], [1e-9, 0.]]);
        assert_eq!(normalize(&a), Err(Error::DegenerateInput { point: 0 }));
    }

    #[test]
    fn small_but_usable_degree_is_kept() {
        let a: Array2<f64> = arr2(&[[0., 2e-8], [2e-8, 0.]]);
        let w = normalize(&a).unwrap();
        assert!((w[[0, 1]] - 1.).abs() < 1e-9);
        assert!((w[[1, 0]] - 1.).abs() < 1e-9);
    }

    #[test]
    fn single_point_cannot_be_normalized() {
        let a = arr2(&[[0.]]);
        assert_eq!(normalize(&a), Err(Error::DegenerateInput { point: 0 }));
    }
}
