/**
 * File: /src/util.rs
 * Created Date: Tuesday, June 18th 2024
 * Author: Zihan
 * -----
 * Last Modified: Saturday, 17th October 2026 4:02:51 pm
 * Modified By: the developer formerly known as Zihan at <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-10-17		Zihan	Dominant cluster labels for documents
**/
use ndarray::{Array2, Axis};

/// Index of the largest value in each column; the first wins on ties.
pub fn argmax_axis0(a: &Array2<f64>) -> Vec<usize> {
    a.axis_iter(Axis(1))
        .map(|col| {
            col.iter()
                .enumerate()
                .fold(None, |best: Option<(usize, f64)>, (idx, &v)| match best {
                    Some((_, bv)) if bv >= v => best,
                    _ => Some((idx, v)),
                })
                .map(|(idx, _)| idx)
                .unwrap_or(0)
        })
        .collect()
}
