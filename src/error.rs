//! Error taxonomy for the topic discovery pipeline.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Structural problems found while reading the sparse matrix file.
#[derive(Debug, Clone, PartialEq)]
pub enum MalformedMatrixError {
    /// The same (term, document) cell was assigned by two entries.
    DuplicateEntry {
        /// 1-based ordinal of the offending entry among the data lines
        entry: usize,
        term: String,
        /// 1-based document number as written in the file
        doc: usize,
        existing: f64,
    },
    /// Declared `numEntries` on line 2 disagrees with the entries read.
    EntryCountMismatch { expected: usize, found: usize },
    /// Declared row count disagrees with the term list length.
    DimensionMismatch { rows: usize, terms: usize },
    /// Declared shape cannot be addressed or allocated as a dense matrix.
    ShapeTooLarge { rows: usize, cols: usize },
    /// Declared `numEntries` exceeds the number of cells.
    TooManyEntries { declared: usize, cells: usize },
    /// A term or document id falls outside the declared shape.
    IndexOutOfRange {
        line: usize,
        term_id: usize,
        doc_id: usize,
        rows: usize,
        cols: usize,
    },
    /// Frequency is zero, negative or not finite.
    InvalidFrequency { line: usize, value: f64 },
    /// Line could not be parsed at all.
    Syntax { line: usize, content: String },
}

impl fmt::Display for MalformedMatrixError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MalformedMatrixError::DuplicateEntry {
                entry,
                term,
                doc,
                existing,
            } => write!(
                f,
                "entry {}: term '{}' in document {} already holds {}; entries cannot be assigned twice",
                entry, term, doc, existing
            ),
            MalformedMatrixError::EntryCountMismatch { expected, found } => {
                write!(f, "expecting {} entries but found {}", expected, found)
            }
            MalformedMatrixError::DimensionMismatch { rows, terms } => write!(
                f,
                "matrix declares {} term rows but the term list holds {} terms",
                rows, terms
            ),
            MalformedMatrixError::ShapeTooLarge { rows, cols } => {
                write!(f, "declared {}x{} matrix is too large to hold in memory", rows, cols)
            }
            MalformedMatrixError::TooManyEntries { declared, cells } => write!(
                f,
                "header declares {} entries but the matrix only has {} cells",
                declared, cells
            ),
            MalformedMatrixError::IndexOutOfRange {
                line,
                term_id,
                doc_id,
                rows,
                cols,
            } => write!(
                f,
                "line {}: cell ({}, {}) lies outside the declared {}x{} matrix",
                line, term_id, doc_id, rows, cols
            ),
            MalformedMatrixError::InvalidFrequency { line, value } => {
                write!(f, "line {}: frequency {} must be positive", line, value)
            }
            MalformedMatrixError::Syntax { line, content } => {
                write!(f, "line {}: cannot parse '{}'", line, content)
            }
        }
    }
}

impl Error for MalformedMatrixError {}

/// Errors from the overall pipeline
#[derive(Debug)]
pub enum NmfError {
    /// One or more input files do not exist; nothing was read.
    MissingInput(Vec<PathBuf>),
    MalformedMatrix(MalformedMatrixError),
    /// Bad command line or configuration; carries the usage text.
    InvalidArgument(String),
    Io(io::Error),
    /// Help or version text was requested; not a failure.
    Info(String),
}

impl NmfError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            NmfError::Io(_) => 1,
            NmfError::InvalidArgument(_) => 2,
            NmfError::MissingInput(_) => 3,
            NmfError::MalformedMatrix(_) => 4,
            NmfError::Info(_) => 0,
        }
    }
}

impl fmt::Display for NmfError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NmfError::MissingInput(paths) => {
                let names: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
                write!(f, "Missing input file(s): {}", names.join(", "))
            }
            NmfError::MalformedMatrix(e) => write!(f, "Malformed term-document matrix: {}", e),
            NmfError::InvalidArgument(msg) | NmfError::Info(msg) => write!(f, "{}", msg),
            NmfError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for NmfError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NmfError::MalformedMatrix(e) => Some(e),
            NmfError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MalformedMatrixError> for NmfError {
    fn from(e: MalformedMatrixError) -> Self {
        NmfError::MalformedMatrix(e)
    }
}

impl From<io::Error> for NmfError {
    fn from(e: io::Error) -> Self {
        NmfError::Io(e)
    }
}
