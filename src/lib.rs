pub use error::{Error, Result};
pub use graph::MIN_DEGREE;
pub use similarity::{GaussianKernel, Similarity};
pub use solver::{BETA, CONVERGENCE_EPS, DENOMINATOR_FLOOR, INIT_SEED, MAX_ITERATIONS};

pub use sym_nmf::{Goal, SymNmf};

mod error;
mod graph;
mod similarity;
mod solver;
mod sym_nmf;
