/// Shared fixtures for loader, tf-idf and factorization tests
use ndarray::{array, Array2};

pub const THREE_TERMS: &str = "sport\nfootball\neconomy\n";

/// 3 terms x 2 documents: (sport, d1, 2.0), (football, d1, 1.0), (sport, d2, 1.0)
pub fn three_term_matrix() -> String {
    "%%MatrixMarket matrix coordinate real general\n3 2 3\n1 1 2.0\n2 1 1.0\n1 2 1.0\n".to_string()
}

/// Planted rank-2 factors: terms 0-2 load on topic 0, terms 3-5 on topic 1.
pub fn planted_factors() -> (Array2<f64>, Array2<f64>) {
    let w0 = array![
        [3.0, 0.0],
        [2.0, 0.0],
        [1.0, 0.0],
        [0.0, 3.0],
        [0.0, 2.0],
        [0.0, 1.0],
    ];
    let h0 = array![
        [1.0, 1.0, 1.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
    ];
    (w0, h0)
}

/// A = W0 * H0, an exact nonnegative rank-2 matrix (6 terms x 6 documents)
pub fn make_rank_two() -> Array2<f64> {
    let (w0, h0) = planted_factors();
    w0.dot(&h0)
}
