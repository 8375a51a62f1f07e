use std::str::FromStr;

use ndarray::Array2;
use num_traits::Float;
use rand::distributions::uniform::SampleUniform;

use crate::error::{Error, Result};
use crate::graph;
use crate::similarity::{GaussianKernel, Similarity};
use crate::solver::Solver;

/// Pipeline stage whose output is requested from [`SymNmf::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    /// Factorize the normalized similarity matrix.
    FullPipeline,
    /// Stop after the similarity matrix.
    SimilarityOnly,
    /// Stop after the diagonal degree matrix.
    DegreeOnly,
    /// Stop after the normalized similarity matrix.
    NormalizedOnly,
}

impl FromStr for Goal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "symnmf" => Ok(Goal::FullPipeline),
            "sym" => Ok(Goal::SimilarityOnly),
            "ddg" => Ok(Goal::DegreeOnly),
            "norm" => Ok(Goal::NormalizedOnly),
            _ => Err(Error::InvalidInput {
                reason: format!("unknown goal '{}'", s),
            }),
        }
    }
}

/// Implementation derived from the symmetric NMF graph clustering algorithm
/// of Kuang, Ding, and Park
/// https://doi.org/10.1137/1.9781611972825.10
///
///     use ndarray::arr2;
///     use symnmf::SymNmf;
///
///     let x = arr2(&[[0., 0.], [0., 1.]]);
///     let h = SymNmf::new(1).factorize(&x).unwrap();
///     assert_eq!(h.dim(), (2, 1));
///     h.iter().for_each(|v: &f64| assert!((v - 0.7071).abs() < 0.05));
pub struct SymNmf {
    rank: usize,
    threads: usize,
}

impl SymNmf {
    /// Create a model that factorizes into `rank` cluster columns using a
    /// single worker thread.
    pub fn new(rank: usize) -> Self {
        Self { rank, threads: 1 }
    }

    /// Set the number of worker threads. Results do not depend on the
    /// thread count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Generate the pairwise similarity matrix for the rows of `x`.
    pub fn similarity<F>(&self, x: &Array2<F>) -> Result<Array2<F>>
    where
        F: Float + Send + Sync,
    {
        validate_points(x)?;
        Ok(GaussianKernel::default().similarity(x))
    }

    /// Generate the diagonal degree matrix for the rows of `x`.
    pub fn degrees<F>(&self, x: &Array2<F>) -> Result<Array2<F>>
    where
        F: Float + Send + Sync,
    {
        validate_points(x)?;
        let a = GaussianKernel::default().similarity(x);
        Ok(self.install(|| graph::degree_matrix(&a)))
    }

    /// Generate the degree-normalized similarity matrix for the rows of `x`.
    pub fn normalized<F>(&self, x: &Array2<F>) -> Result<Array2<F>>
    where
        F: Float + Send + Sync,
    {
        validate_points(x)?;
        let a = GaussianKernel::default().similarity(x);
        self.install(|| graph::normalize(&a))
    }

    /// Run the full pipeline and factorize the normalized similarity matrix
    /// into an `n x rank` association matrix `H` with `W ~ H * H^T`.
    pub fn factorize<F>(&self, x: &Array2<F>) -> Result<Array2<F>>
    where
        F: Float + Send + Sync + SampleUniform + 'static,
    {
        validate_points(x)?;
        self.validate_rank(x.dim().0)?;
        let a = GaussianKernel::default().similarity(x);
        self.install(|| {
            let w = graph::normalize(&a)?;
            Solver::seeded(w, self.rank)?.solve()
        })
    }

    /// Run the pipeline up to the stage selected by `goal`.
    pub fn run<F>(&self, goal: Goal, x: &Array2<F>) -> Result<Array2<F>>
    where
        F: Float + Send + Sync + SampleUniform + 'static,
    {
        match goal {
            Goal::FullPipeline => self.factorize(x),
            Goal::SimilarityOnly => self.similarity(x),
            Goal::DegreeOnly => self.degrees(x),
            Goal::NormalizedOnly => self.normalized(x),
        }
    }

    fn validate_rank(&self, n: usize) -> Result<()> {
        if self.rank < 1 || self.rank >= n {
            return Err(Error::InvalidInput {
                reason: format!("rank must be in 1..{}, got {}", n, self.rank),
            });
        }
        Ok(())
    }

    fn install<T, OP>(&self, op: OP) -> T
    where
        T: Send,
        OP: FnOnce() -> T + Send,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
            .unwrap();
        pool.install(op)
    }
}

fn validate_points<F>(x: &Array2<F>) -> Result<()>
where
    F: Float,
{
    let (n, d) = x.dim();
    if n == 0 || d == 0 {
        return Err(Error::InvalidInput {
            reason: "data matrix is empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use crate::sym_nmf::Goal;

    #[test]
    fn goal_tokens() {
        assert_eq!("symnmf".parse::<Goal>().unwrap(), Goal::FullPipeline);
        assert_eq!("sym".parse::<Goal>().unwrap(), Goal::SimilarityOnly);
        assert_eq!("ddg".parse::<Goal>().unwrap(), Goal::DegreeOnly);
        assert_eq!("norm".parse::<Goal>().unwrap(), Goal::NormalizedOnly);
        assert!("dgg".parse::<Goal>().is_err());
        assert!("SYM".parse::<Goal>().is_err());
    }
}
