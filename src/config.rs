/**
 * File: /src/config.rs
 * Created Date: Friday, January 26th 2024
 * Author: Zihan
 * -----
 * Last Modified: Saturday, 17th October 2026 4:40:17 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-17		Zihan	Command line for topic discovery runs
 */
use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::error::NmfError;
use crate::factor::FactorizationConfig;
use crate::report::ReportConfig;

pub const DEFAULT_TERMS: &str = "bbcnews.terms";
pub const DEFAULT_MATRIX: &str = "bbcnews.mtx";

/// Topic discovery with nonnegative matrix factorization
#[derive(Parser, Debug)]
#[command(name = "nmf_topics", version)]
struct Cli {
    /// Number of clusters (topics) to discover
    #[arg(value_name = "K", default_value_t = 5, value_parser = parse_positive)]
    k: usize,

    /// Term list, one term per line
    #[arg(long, default_value = DEFAULT_TERMS)]
    terms: PathBuf,

    /// Sparse term-document matrix in triple format
    #[arg(long, default_value = DEFAULT_MATRIX)]
    matrix: PathBuf,

    /// Maximum number of update iterations
    #[arg(long, default_value_t = 100)]
    max_iter: usize,

    /// Stop once the Euclidean distance drops to this value
    #[arg(long, default_value_t = 0.02)]
    min_error: f64,

    /// Terms listed per cluster
    #[arg(long, default_value_t = 10, value_parser = parse_positive)]
    num_terms: usize,

    /// Random initializations to try
    #[arg(long, default_value_t = 1, value_parser = parse_positive)]
    restarts: usize,

    /// Seed for the random initialization
    #[arg(long)]
    seed: Option<u64>,
}

fn parse_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(format!("'{}' is not a positive integer", s)),
    }
}

fn with_usage(mut msg: String) -> String {
    if !msg.contains("Usage:") {
        msg.push_str(&format!("\n{}\n", Cli::command().render_usage()));
    }
    msg
}

#[derive(Debug, Clone)]
pub struct Config {
    terms_path: PathBuf,
    matrix_path: PathBuf,
    pub factorization: FactorizationConfig,
    pub report: ReportConfig,
}

impl Config {
    /// constructor
    ///
    /// # Examples
    /// ```bash
    /// $ cargo run -- 8 --terms data/bbcnews.terms --matrix data/bbcnews.mtx
    /// ```
    pub fn new(args: impl Iterator<Item = String>) -> Result<Config, NmfError> {
        let cli = Cli::try_parse_from(args).map_err(|e| match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                NmfError::Info(e.render().to_string())
            }
            _ => NmfError::InvalidArgument(with_usage(e.render().to_string())),
        })?;
        if !(cli.min_error.is_finite() && cli.min_error >= 0.0) {
            return Err(NmfError::InvalidArgument(with_usage(format!(
                "error: --min-error must be a non-negative number, got {}\n",
                cli.min_error
            ))));
        }

        Ok(Config {
            terms_path: cli.terms,
            matrix_path: cli.matrix,
            factorization: FactorizationConfig {
                n_clusters: cli.k,
                max_iter: cli.max_iter,
                min_error: cli.min_error,
                n_init: cli.restarts,
                seed: cli.seed,
                ..Default::default()
            },
            report: ReportConfig {
                num_terms: cli.num_terms,
            },
        })
    }

    /// Configuration for explicit paths with default tuning
    pub fn with_paths(terms_path: impl Into<PathBuf>, matrix_path: impl Into<PathBuf>) -> Config {
        Config {
            terms_path: terms_path.into(),
            matrix_path: matrix_path.into(),
            factorization: FactorizationConfig::default(),
            report: ReportConfig::default(),
        }
    }

    pub fn get_k(&self) -> usize {
        self.factorization.n_clusters
    }

    pub fn get_terms_path(&self) -> &Path {
        &self.terms_path
    }

    pub fn get_matrix_path(&self) -> &Path {
        &self.matrix_path
    }
}
