#[macro_use]
extern crate clap;

use std::fmt::{Debug, Display};
use std::io::{stdout, BufWriter};
use std::path::Path;
use std::process::exit;
use std::str::FromStr;

use num_traits::Float;
use rand::distributions::uniform::SampleUniform;

use symnmf::{Goal, SymNmf};

use crate::ops::{from_file, write_matrix};

mod ops;

fn main() {
    let matches = clap_app!(symnmf =>
        (version: "0.1.0")
        (about: "Vectorized and Parallelized Symmetric Non-negative Matrix Factorization")
        (@arg INPUT: -i --input +takes_value +required "Path to comma-separated input file")
        (@arg GOAL: -g --goal +takes_value "Stage to report: symnmf, sym, ddg, norm, default=symnmf")
        (@arg RANK: -k --rank +takes_value "Number of clusters, required for the symnmf goal")
        (@arg THREADS: -t --threads +takes_value "Number of worker threads, default=1")
        (@arg PRECISION: -r --precision +takes_value "Set f32 or f64 precision, default=f64")
    )
    .get_matches();

    let input_file = matches.value_of("INPUT").unwrap().to_string();
    if !Path::new(&input_file).exists() {
        eprintln!("Unable to locate input file {}", input_file);
        exit(1);
    }
    let goal = matches
        .value_of("GOAL")
        .unwrap_or("symnmf")
        .parse::<Goal>()
        .unwrap_or_else(|e| {
            eprintln!("{}", e);
            exit(2);
        });
    let rank = match matches.value_of("RANK") {
        Some(k) => {
            let k = k.parse::<usize>().unwrap_or_else(|_| {
                eprintln!("Unable to parse rank");
                exit(1);
            });
            if k < 1 {
                eprintln!("Improper parameter set!");
                exit(2);
            }
            k
        }
        None => {
            if goal == Goal::FullPipeline {
                eprintln!("Rank is required for the symnmf goal");
                exit(2);
            }
            1
        }
    };
    let threads = matches
        .value_of("THREADS")
        .unwrap_or("1")
        .parse::<usize>()
        .unwrap_or_else(|_| {
            eprintln!("Unable to parse threads");
            exit(1);
        });
    if threads < 1 {
        eprintln!("Improper parameter set!");
        exit(2);
    }
    // Run pipeline
    match matches.value_of("PRECISION").unwrap_or("f64") {
        "f32" => execute::<f32>(&input_file, goal, rank, threads),
        _ => execute::<f64>(&input_file, goal, rank, threads),
    };
}

fn execute<F>(input_file: &str, goal: Goal, rank: usize, threads: usize)
where
    F: Float + Send + Sync + SampleUniform + FromStr + Default + Display + 'static,
    <F as FromStr>::Err: Debug,
{
    let data = from_file::<F>(Path::new(input_file).to_path_buf()).unwrap_or_else(|e| {
        eprintln!("{}", e.message);
        exit(1);
    });
    let model = SymNmf::new(rank).with_threads(threads);
    match model.run(goal, &data) {
        Ok(result) => {
            let mut writer = BufWriter::new(stdout());
            write_matrix(&result, &mut writer);
        }
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    }
}
