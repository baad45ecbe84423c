//! Reading the term list and the sparse triple-format matrix.
//!
//! Matrix file layout:
//! ```text
//! %%MatrixMarket matrix coordinate real general     <- opaque header, skipped
//! 3 2 3                                              <- rows(terms) cols(docs) numEntries
//! 1 1 2.0                                            <- termId docId frequency, 1-based
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::{MalformedMatrixError, NmfError};
use crate::matrix::TermDocumentMatrix;
use crate::progress::ProgressSink;

/// Ordered term list; index `i` is term id `i + 1` in the matrix file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermDictionary {
    terms: Vec<String>,
}

impl TermDictionary {
    pub fn new(terms: Vec<String>) -> Self {
        Self { terms }
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, NmfError> {
        let terms = reader.lines().collect::<Result<Vec<_>, _>>()?;
        Ok(Self { terms })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Term text with surrounding whitespace removed
    pub fn get(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(|t| t.trim())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.trim())
    }
}

/// Everything the load phase produces
#[derive(Debug, Clone)]
pub struct Corpus {
    pub terms: TermDictionary,
    pub matrix: TermDocumentMatrix,
}

impl Corpus {
    /// Parse a term list and a sparse matrix from already-open sources.
    pub fn from_readers<T, M, S>(terms: T, matrix: M, sink: &mut S) -> Result<Corpus, NmfError>
    where
        T: BufRead,
        M: BufRead,
        S: ProgressSink + ?Sized,
    {
        sink.message("reading term list");
        let terms = TermDictionary::from_reader(terms)?;
        debug!("read {} terms", terms.len());

        sink.message("reading matrix");
        let matrix = read_sparse_matrix(matrix, &terms)?;
        sink.message(&format!(
            "loaded {} terms x {} documents, {} entries",
            matrix.n_terms(),
            matrix.n_docs(),
            matrix.nnz()
        ));

        Ok(Corpus { terms, matrix })
    }
}

/// Load a corpus from disk. Both paths are checked before either is read.
pub fn load_corpus<S>(
    terms_path: impl AsRef<Path>,
    matrix_path: impl AsRef<Path>,
    sink: &mut S,
) -> Result<Corpus, NmfError>
where
    S: ProgressSink + ?Sized,
{
    let terms_path = terms_path.as_ref();
    let matrix_path = matrix_path.as_ref();

    let missing: Vec<_> = [terms_path, matrix_path]
        .iter()
        .filter(|p| !p.is_file())
        .map(|p| p.to_path_buf())
        .collect();
    if !missing.is_empty() {
        return Err(NmfError::MissingInput(missing));
    }

    let terms = BufReader::new(File::open(terms_path)?);
    let matrix = BufReader::new(File::open(matrix_path)?);
    Corpus::from_readers(terms, matrix, sink)
}

fn syntax(line: usize, content: &str) -> MalformedMatrixError {
    MalformedMatrixError::Syntax {
        line,
        content: content.trim().to_string(),
    }
}

fn parse_header(line_no: usize, line: &str) -> Result<(usize, usize, usize), MalformedMatrixError> {
    let fields: Vec<usize> = line
        .split_whitespace()
        .map(|tok| tok.parse::<usize>())
        .collect::<Result<_, _>>()
        .map_err(|_| syntax(line_no, line))?;
    match fields[..] {
        [rows, cols, entries] => Ok((rows, cols, entries)),
        _ => Err(syntax(line_no, line)),
    }
}

fn parse_entry(line_no: usize, line: &str) -> Result<(usize, usize, f64), MalformedMatrixError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [term, doc, freq] = tokens.as_slice() else {
        return Err(syntax(line_no, line));
    };
    let term = term.parse::<usize>().map_err(|_| syntax(line_no, line))?;
    let doc = doc.parse::<usize>().map_err(|_| syntax(line_no, line))?;
    let freq = freq.parse::<f64>().map_err(|_| syntax(line_no, line))?;
    Ok((term, doc, freq))
}

fn read_sparse_matrix<R: BufRead>(
    reader: R,
    terms: &TermDictionary,
) -> Result<TermDocumentMatrix, NmfError> {
    let mut lines = reader.lines();

    // line 1: header, not validated
    if lines.next().transpose()?.is_none() {
        return Err(syntax(1, "").into());
    }
    let dims = lines.next().transpose()?.ok_or_else(|| syntax(2, ""))?;
    let (rows, cols, declared) = parse_header(2, &dims)?;
    if rows != terms.len() {
        return Err(MalformedMatrixError::DimensionMismatch {
            rows,
            terms: terms.len(),
        }
        .into());
    }

    let too_large = MalformedMatrixError::ShapeTooLarge { rows, cols };
    let cells = rows.checked_mul(cols).ok_or_else(|| too_large.clone())?;
    if declared > cells {
        return Err(MalformedMatrixError::TooManyEntries { declared, cells }.into());
    }
    let mut matrix = TermDocumentMatrix::try_zeros(rows, cols).ok_or(too_large)?;
    let mut count = 0usize;

    for (idx, line) in lines.enumerate() {
        let line = line?;
        let line_no = idx + 3;
        if line.trim().is_empty() {
            continue;
        }

        let (term_id, doc_id, freq) = parse_entry(line_no, &line)?;
        if term_id == 0 || doc_id == 0 || term_id > rows || doc_id > cols {
            return Err(MalformedMatrixError::IndexOutOfRange {
                line: line_no,
                term_id,
                doc_id,
                rows,
                cols,
            }
            .into());
        }
        if !(freq.is_finite() && freq > 0.0) {
            return Err(MalformedMatrixError::InvalidFrequency {
                line: line_no,
                value: freq,
            }
            .into());
        }

        let (t, d) = (term_id - 1, doc_id - 1);
        let existing = matrix[(t, d)];
        if existing != 0.0 {
            return Err(MalformedMatrixError::DuplicateEntry {
                entry: count + 1,
                term: terms.get(t).unwrap_or_default().to_string(),
                doc: doc_id,
                existing,
            }
            .into());
        }
        matrix[(t, d)] = freq;
        matrix.doc_freq[t] += 1;
        count += 1;
    }

    if count != declared {
        return Err(MalformedMatrixError::EntryCountMismatch {
            expected: declared,
            found: count,
        }
        .into());
    }

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullProgress;
    use crate::test_utils::{three_term_matrix, THREE_TERMS};

    fn load(terms: &str, matrix: &str) -> Result<Corpus, NmfError> {
        Corpus::from_readers(terms.as_bytes(), matrix.as_bytes(), &mut NullProgress)
    }

    fn malformed(result: Result<Corpus, NmfError>) -> MalformedMatrixError {
        match result {
            Err(NmfError::MalformedMatrix(e)) => e,
            other => panic!("expected malformed matrix error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_three_term_two_doc_matrix() {
        let corpus = load(THREE_TERMS, &three_term_matrix()).unwrap();
        let m = &corpus.matrix;
        assert_eq!((m.n_terms(), m.n_docs()), (3, 2));
        assert_eq!(m[(0, 0)], 2.0);
        assert_eq!(m[(1, 0)], 1.0);
        assert_eq!(m[(0, 1)], 1.0);
        assert_eq!(m.nnz(), 3);
        assert_eq!(m.doc_freq, vec![2, 1, 0]);
        assert_eq!(corpus.terms.get(2), Some("economy"));
    }

    #[test]
    fn test_progress_lines_are_reported() {
        let mut sink: Vec<String> = Vec::new();
        Corpus::from_readers(THREE_TERMS.as_bytes(), three_term_matrix().as_bytes(), &mut sink)
            .unwrap();
        assert_eq!(sink[0], "reading term list");
        assert_eq!(sink[1], "reading matrix");
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let text = "header\n3 2 3\n\n1 1 2.0\n   \n2 1 1\n1 2 1.0\n\n";
        let corpus = load(THREE_TERMS, text).unwrap();
        assert_eq!(corpus.matrix.nnz(), 3);
    }

    #[test]
    fn test_entry_count_mismatch() {
        for (declared, body) in [(4, "1 1 2\n2 1 1\n1 2 1\n"), (2, "1 1 2\n2 1 1\n1 2 1\n"), (1, "")] {
            let text = format!("h\n3 2 {}\n{}", declared, body);
            let found = body.lines().count();
            assert_eq!(
                malformed(load(THREE_TERMS, &text)),
                MalformedMatrixError::EntryCountMismatch {
                    expected: declared,
                    found
                }
            );
        }
    }

    #[test]
    fn test_duplicate_entry_anywhere_in_file() {
        let first = "h\n3 2 3\n2 2 4.0\n2 2 5.0\n1 1 1\n";
        assert_eq!(
            malformed(load(THREE_TERMS, first)),
            MalformedMatrixError::DuplicateEntry {
                entry: 2,
                term: "football".to_string(),
                doc: 2,
                existing: 4.0
            }
        );

        let last = "h\n3 2 4\n1 1 1\n3 1 1\n2 2 4.0\n3 1 6\n";
        match malformed(load(THREE_TERMS, last)) {
            MalformedMatrixError::DuplicateEntry { entry, term, doc, .. } => {
                assert_eq!((entry, term.as_str(), doc), (4, "economy", 1));
            }
            e => panic!("unexpected {:?}", e),
        }
    }

    #[test]
    fn test_term_text_is_trimmed_in_duplicate_error() {
        let terms = "  padded  \nb\n";
        let text = "h\n2 1 2\n1 1 1\n1 1 1\n";
        match malformed(load(terms, text)) {
            MalformedMatrixError::DuplicateEntry { term, .. } => assert_eq!(term, "padded"),
            e => panic!("unexpected {:?}", e),
        }
    }

    #[test]
    fn test_dimension_checks() {
        assert_eq!(
            malformed(load(THREE_TERMS, "h\n4 2 0\n")),
            MalformedMatrixError::DimensionMismatch { rows: 4, terms: 3 }
        );
        assert!(matches!(
            malformed(load(THREE_TERMS, "h\n3 2 1\n4 1 1\n")),
            MalformedMatrixError::IndexOutOfRange { line: 3, term_id: 4, .. }
        ));
        assert!(matches!(
            malformed(load(THREE_TERMS, "h\n3 2 1\n1 0 1\n")),
            MalformedMatrixError::IndexOutOfRange { doc_id: 0, .. }
        ));
    }

    #[test]
    fn test_oversized_header_is_rejected() {
        let huge = format!("h\n1 {} 0\n", usize::MAX / 2);
        assert_eq!(
            malformed(load("a\n", &huge)),
            MalformedMatrixError::ShapeTooLarge {
                rows: 1,
                cols: usize::MAX / 2
            }
        );
        let overflow = format!("h\n3 {} 0\n", usize::MAX / 2);
        assert!(matches!(
            malformed(load(THREE_TERMS, &overflow)),
            MalformedMatrixError::ShapeTooLarge { rows: 3, .. }
        ));
    }

    #[test]
    fn test_more_entries_than_cells() {
        assert_eq!(
            malformed(load(THREE_TERMS, "h\n3 2 7\n1 1 1\n")),
            MalformedMatrixError::TooManyEntries {
                declared: 7,
                cells: 6
            }
        );
    }

    #[test]
    fn test_syntax_and_frequency_errors() {
        assert!(matches!(
            malformed(load(THREE_TERMS, "")),
            MalformedMatrixError::Syntax { line: 1, .. }
        ));
        assert!(matches!(
            malformed(load(THREE_TERMS, "h\n3 two 1\n")),
            MalformedMatrixError::Syntax { line: 2, .. }
        ));
        assert!(matches!(
            malformed(load(THREE_TERMS, "h\n3 2 1\n1 1\n")),
            MalformedMatrixError::Syntax { line: 3, .. }
        ));
        assert!(matches!(
            malformed(load(THREE_TERMS, "h\n3 2 1\n1 1 -2\n")),
            MalformedMatrixError::InvalidFrequency { line: 3, .. }
        ));
        assert!(matches!(
            malformed(load(THREE_TERMS, "h\n3 2 1\n1 1 0\n")),
            MalformedMatrixError::InvalidFrequency { .. }
        ));
    }

    #[test]
    fn test_missing_files_reported_together() {
        let err = load_corpus("no/such.terms", "no/such.mtx", &mut NullProgress).unwrap_err();
        match err {
            NmfError::MissingInput(paths) => assert_eq!(paths.len(), 2),
            e => panic!("unexpected {:?}", e),
        }
    }
}
