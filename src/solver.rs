use ndarray::{Array2, Zip};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use num_traits::Float;
use rand::distributions::uniform::SampleUniform;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Error, Result};

/// Seed used for every factorization, so repeated runs over the same input
/// produce the same decomposition.
pub const INIT_SEED: u64 = 0;

/// Convergence threshold on the squared Frobenius norm of successive
/// iterate differences.
pub const CONVERGENCE_EPS: f64 = 1e-4;

/// Update iterations attempted before returning the current iterate.
pub const MAX_ITERATIONS: usize = 300;

/// Damping weight applied to the multiplicative update.
pub const BETA: f64 = 0.5;

/// Smallest value a update-rule denominator is allowed to take. Entries of
/// `H` that reach exact zero keep the ratio defined instead of producing
/// `0/0`; a zero numerator is always paired with a zero `H` entry, so the
/// floored ratio never perturbs a live entry.
pub const DENOMINATOR_FLOOR: f64 = 1e-16;

pub(crate) struct Solver<F> {
    pub(crate) w: Array2<F>,
    pub(crate) h: Array2<F>,
    pub(crate) beta: F,
    pub(crate) floor: F,
}

impl<F> Solver<F>
where
    F: Float + Send + Sync + SampleUniform + 'static,
{
    /// Initialize `H` as an `n x rank` matrix drawn uniformly from
    /// `[0, 2 * sqrt(mean(w) / rank))` using the fixed seed.
    pub(crate) fn seeded(w: Array2<F>, rank: usize) -> Result<Self> {
        let n = w.dim().0;
        let zero = F::from(0.).unwrap();
        let mean = w.sum() / F::from(n * n).unwrap();
        let ceiling = F::from(2.).unwrap() * (mean / F::from(rank).unwrap()).sqrt();
        if !ceiling.is_finite() || ceiling <= zero {
            return Err(Error::NumericalFailure { iteration: 0 });
        }
        let mut rng = StdRng::seed_from_u64(INIT_SEED);
        let h = Array2::random_using((n, rank), Uniform::new(zero, ceiling), &mut rng);
        Ok(Self {
            w,
            h,
            beta: F::from(BETA).unwrap(),
            floor: F::from(DENOMINATOR_FLOOR).unwrap(),
        })
    }

    /// Advance `H` by one damped multiplicative update and report the
    /// squared Frobenius norm of the change.
    pub(crate) fn step(&mut self, iteration: usize) -> Result<F> {
        let wh = self.w.dot(&self.h);
        let gram = self.h.t().dot(&self.h);
        let hg = self.h.dot(&gram);
        // Non-finite products must fail loudly; flooring afterwards would
        // silently replace a NaN denominator.
        if wh.iter().any(|v| !v.is_finite()) || hg.iter().any(|v| !v.is_finite()) {
            return Err(Error::NumericalFailure { iteration });
        }
        let beta = self.beta;
        let inv_beta = F::from(1.).unwrap() - beta;
        let floor = self.floor;
        let next = Zip::from(&self.h)
            .and(&wh)
            .and(&hg)
            .par_map_collect(|&h, &num, &den| h * (inv_beta + beta * num / den.max(floor)));
        let mut delta = F::from(0.).unwrap();
        Zip::from(&next).and(&self.h).for_each(|&a, &b| {
            let diff = a - b;
            delta = delta + diff * diff;
        });
        self.h = next;
        if !delta.is_finite() {
            return Err(Error::NumericalFailure { iteration });
        }
        Ok(delta)
    }

    pub(crate) fn solve(mut self) -> Result<Array2<F>> {
        let eps = F::from(CONVERGENCE_EPS).unwrap();
        for iteration in 0..MAX_ITERATIONS {
            let delta = self.step(iteration)?;
            if delta < eps {
                break;
            }
        }
        Ok(self.h)
    }
}
