//! Topic discovery over a sparse term-document matrix.
//!
//! Pipeline: [`loader`] → [`tfidf`] → [`factor`] → [`report`]. Each stage
//! takes the previous stage's output whole; the matrix lives in memory.

/*
 * File: /src/lib.rs
 * Created Date: Monday, January 22nd 2024
 * Author: Zihan
 * -----
 * Last Modified: Saturday, 17th October 2026 5:21:33 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-17		Zihan	Topic discovery pipeline: load, tf-idf, NMF, report
 */

pub mod config;
pub mod error;
pub mod factor;
pub mod loader;
pub mod matrix;
pub mod progress;
pub mod report;
pub mod tfidf;
pub mod util;

#[cfg(test)]
pub(crate) mod test_utils;

use std::time::Instant;

use log::info;

pub use config::Config;
pub use error::{MalformedMatrixError, NmfError};
pub use factor::{factorize, FactorizationConfig, FactorizationResult};
pub use loader::{load_corpus, Corpus, TermDictionary};
pub use matrix::TermDocumentMatrix;
pub use progress::{LogProgress, NullProgress, ProgressSink};
pub use report::{ReportConfig, TopicReport};
pub use tfidf::tfidf_normalize;

/// Run the whole pipeline on the files named by `config`.
pub fn run<S>(config: &Config, sink: &mut S) -> Result<TopicReport, NmfError>
where
    S: ProgressSink + ?Sized,
{
    let start = Instant::now();
    let mut corpus = load_corpus(config.get_terms_path(), config.get_matrix_path(), sink)?;
    info!("data loaded in {}ms", start.elapsed().as_millis());

    run_corpus(&mut corpus, config, sink)
}

/// Weight, factorize and report on an already loaded corpus.
pub fn run_corpus<S>(corpus: &mut Corpus, config: &Config, sink: &mut S) -> Result<TopicReport, NmfError>
where
    S: ProgressSink + ?Sized,
{
    tfidf_normalize(&mut corpus.matrix, sink);

    let start = Instant::now();
    let result = factorize(&corpus.matrix.data, &config.factorization, sink)?;
    info!(
        "factorization done in {:.1}s (converged: {}, distance {:.6})",
        start.elapsed().as_secs_f32(),
        result.converged,
        result.final_distance
    );

    TopicReport::from_result(&result, &corpus.terms, &config.report)
}
