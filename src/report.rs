//! Ranking terms per cluster from the term factor W.

use std::fmt;

use ndarray::{Array2, ArrayView1, Axis};
use rayon::prelude::*;

use crate::error::NmfError;
use crate::factor::FactorizationResult;
use crate::loader::TermDictionary;
use crate::util::argmax_axis0;

#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Terms listed per cluster
    pub num_terms: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { num_terms: 10 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicTerm {
    pub term: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    /// 0-based cluster index (column of W)
    pub cluster: usize,
    pub terms: Vec<TopicTerm>,
    /// Documents whose largest H weight falls in this cluster
    pub documents: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicReport {
    pub topics: Vec<Topic>,
}

/// Term indices sorted by weight, descending. The sort is stable so equal
/// weights keep term order.
pub fn rank_terms(weights: ArrayView1<f64>, limit: usize) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = weights.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

/// Top terms of every column of `w`, plus document counts from `h`.
pub fn top_terms(
    w: &Array2<f64>,
    h: &Array2<f64>,
    terms: &TermDictionary,
    config: &ReportConfig,
) -> Result<TopicReport, NmfError> {
    if w.nrows() != terms.len() {
        return Err(NmfError::InvalidArgument(format!(
            "term factor has {} rows but the dictionary holds {} terms",
            w.nrows(),
            terms.len()
        )));
    }
    if w.ncols() != h.nrows() {
        return Err(NmfError::InvalidArgument(format!(
            "factor shapes {:?} and {:?} do not share a cluster dimension",
            w.dim(),
            h.dim()
        )));
    }

    let mut documents = vec![0usize; w.ncols()];
    for c in argmax_axis0(h) {
        documents[c] += 1;
    }

    let topics = w
        .axis_iter(Axis(1))
        .into_par_iter()
        .enumerate()
        .map(|(cluster, column)| Topic {
            cluster,
            terms: rank_terms(column, config.num_terms)
                .into_iter()
                .map(|(t, weight)| TopicTerm {
                    term: terms.get(t).unwrap_or_default().to_string(),
                    weight,
                })
                .collect(),
            documents: documents[cluster],
        })
        .collect();

    Ok(TopicReport { topics })
}

impl TopicReport {
    pub fn from_result(
        result: &FactorizationResult,
        terms: &TermDictionary,
        config: &ReportConfig,
    ) -> Result<Self, NmfError> {
        top_terms(&result.w, &result.h, terms, config)
    }
}

impl fmt::Display for TopicReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for topic in &self.topics {
            writeln!(f, "Cluster {} ({} documents):", topic.cluster + 1, topic.documents)?;
            for (rank, t) in topic.terms.iter().enumerate() {
                writeln!(f, "  {:>3}. {:<24} {:.6}", rank + 1, t.term, t.weight)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn dictionary(words: &[&str]) -> TermDictionary {
        TermDictionary::new(words.iter().map(|w| w.to_string()).collect())
    }

    #[test]
    fn test_ranks_descending_with_first_encountered_ties() {
        let col = array![0.5, 0.9, 0.5, 0.1, 0.9];
        assert_eq!(
            rank_terms(col.view(), 4),
            vec![(1, 0.9), (4, 0.9), (0, 0.5), (2, 0.5)]
        );
    }

    #[test]
    fn test_top_terms_per_cluster() {
        let w = array![[0.1, 2.0], [3.0, 0.0], [1.0, 1.5], [0.0, 0.2]];
        let h = array![[1.0, 0.0, 0.3], [0.0, 1.0, 0.9]];
        let terms = dictionary(&["goal ", "bank", " rate", "match"]);
        let report = top_terms(&w, &h, &terms, &ReportConfig { num_terms: 2 }).unwrap();

        assert_eq!(report.topics.len(), 2);
        let names = |c: usize| -> Vec<&str> {
            report.topics[c].terms.iter().map(|t| t.term.as_str()).collect()
        };
        assert_eq!(names(0), vec!["bank", "rate"]);
        assert_eq!(names(1), vec!["goal", "rate"]);
        assert_eq!(report.topics[0].documents, 1);
        assert_eq!(report.topics[1].documents, 2);
    }

    #[test]
    fn test_num_terms_clipped_to_dictionary() {
        let w = array![[1.0], [2.0]];
        let h = array![[1.0]];
        let report = top_terms(&w, &h, &dictionary(&["a", "b"]), &ReportConfig::default()).unwrap();
        assert_eq!(report.topics[0].terms.len(), 2);
    }

    #[test]
    fn test_display_labels_clusters_from_one() {
        let w = array![[1.0, 0.0], [0.0, 2.0]];
        let h = array![[1.0], [0.0]];
        let report = top_terms(&w, &h, &dictionary(&["alpha", "beta"]), &ReportConfig { num_terms: 1 }).unwrap();
        let text = report.to_string();
        assert!(text.contains("Cluster 1 (1 documents):"));
        assert!(text.contains("Cluster 2 (0 documents):"));
        assert!(text.lines().nth(1).unwrap().contains("alpha"));
        assert!(text.lines().nth(3).unwrap().contains("beta"));
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let w = array![[1.0, 0.0]];
        let h = array![[1.0]];
        assert!(top_terms(&w, &h, &dictionary(&["a", "b"]), &ReportConfig::default()).is_err());
        assert!(top_terms(&w, &h, &dictionary(&["a"]), &ReportConfig::default()).is_err());
    }
}
