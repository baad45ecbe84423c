use crate::matrix::TermDocumentMatrix;
use crate::progress::ProgressSink;

/// Rescale every nonzero cell by `log10(n_docs / df[term])`, in place.
///
/// Zero cells are never touched, so a term with `df == 0` (all-zero row)
/// never reaches the division. A term present in every document ends up
/// with an all-zero row.
pub fn tfidf_normalize<S>(matrix: &mut TermDocumentMatrix, sink: &mut S)
where
    S: ProgressSink + ?Sized,
{
    let n_docs = matrix.n_docs() as f64;
    let rows = matrix.n_terms();
    let step = (rows / 10).max(1);
    let mut last_reported = 0;

    sink.message("applying tf-idf weighting");
    for (t, mut row) in matrix.data.rows_mut().into_iter().enumerate() {
        let df = matrix.doc_freq[t];
        if df > 0 {
            let idf = (n_docs / df as f64).log10();
            row.mapv_inplace(|v| if v != 0.0 { v * idf } else { v });
        }

        let done = t + 1;
        if done % step == 0 || done == rows {
            let pct = done * 100 / rows;
            if pct >= last_reported + 10 || done == rows {
                sink.message(&format!("tf-idf {}%", pct));
                last_reported = pct;
            }
        }
    }
}
