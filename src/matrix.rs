/*
 * File: /matrix.rs
 * Created Date: Thursday November 23rd 2023
 * Author: Zihan
 * -----
 * Last Modified: Saturday, 17th October 2026 3:12:08 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-17		Zihan	Term-major term/document matrix with document frequencies
 */

use std::mem;
use std::ops::{Index, IndexMut};

use ndarray::Array2;

/// Dense term x document matrix. Rows are terms, columns are documents.
///
/// `doc_freq[t]` counts the documents in which term `t` has a nonzero cell.
/// It is filled by the loader and read-only afterwards.
#[derive(Debug, Clone)]
pub struct TermDocumentMatrix {
    pub data: Array2<f64>,
    pub doc_freq: Vec<usize>,
}

impl TermDocumentMatrix {
    /// Zero-filled matrix, or `None` when `rows * cols` cells cannot be
    /// addressed or allocated.
    pub fn try_zeros(rows: usize, cols: usize) -> Option<Self> {
        let cells = rows.checked_mul(cols)?;
        if cells.checked_mul(mem::size_of::<f64>())? > isize::MAX as usize {
            return None;
        }
        let mut buf: Vec<f64> = Vec::new();
        buf.try_reserve_exact(cells).ok()?;
        buf.resize(cells, 0.0);
        let data = Array2::from_shape_vec((rows, cols), buf).ok()?;
        Some(Self {
            data,
            doc_freq: vec![0; rows],
        })
    }

    // constructor with Array2<f64>, deriving doc_freq from the nonzero cells
    pub fn new(data: Array2<f64>) -> Self {
        let doc_freq = data
            .rows()
            .into_iter()
            .map(|row| row.iter().filter(|&&v| v != 0.0).count())
            .collect();
        Self { data, doc_freq }
    }

    pub fn n_terms(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_docs(&self) -> usize {
        self.data.ncols()
    }

    pub fn nnz(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0.0).count()
    }
}

impl Index<(usize, usize)> for TermDocumentMatrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let (term, doc) = index;
        &self.data[(term, doc)]
    }
}

impl IndexMut<(usize, usize)> for TermDocumentMatrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let (term, doc) = index;
        &mut self.data[(term, doc)]
    }
}
