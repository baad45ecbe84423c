use ndarray::{Array2, Zip};

/// Elementwise multiplicative update in place: base *= numer / denom
///
/// Cells whose denominator is not strictly positive, or whose ratio is not
/// finite, keep their current value. Returns the number of such cells.
pub fn multiplicative_update(base: &mut Array2<f64>, numer: &Array2<f64>, denom: &Array2<f64>) -> usize {
    let skipped = Zip::from(numer)
        .and(denom)
        .fold(0usize, |acc, &n, &d| if is_usable(n, d) { acc } else { acc + 1 });

    Zip::from(base)
        .and(numer)
        .and(denom)
        .par_for_each(|r, &n, &d| {
            if is_usable(n, d) {
                *r *= n / d;
            }
        });
    skipped
}

fn is_usable(n: f64, d: f64) -> bool {
    d > 0.0 && (n / d).is_finite()
}

/// H <- H * (W^T A) / (W^T W H)
///
/// The denominator is formed as (W^T W) H so no terms x documents
/// intermediate is built.
pub fn update_h(a: &Array2<f64>, w: &Array2<f64>, h: &mut Array2<f64>) -> usize {
    let wtw = w.t().dot(w); // k×k
    let numer = w.t().dot(a); // k×n
    let denom = wtw.dot(&*h); // k×n
    multiplicative_update(h, &numer, &denom)
}

/// W <- W * (A H^T) / (W H H^T)
pub fn update_w(a: &Array2<f64>, w: &mut Array2<f64>, h: &Array2<f64>) -> usize {
    let hht = h.dot(&h.t()); // k×k
    let numer = a.dot(&h.t()); // m×k
    let denom = w.dot(&hht); // m×k
    multiplicative_update(w, &numer, &denom)
}

/// Euclidean distance ||A - W H||, not squared
pub fn euclidean_distance(a: &Array2<f64>, w: &Array2<f64>, h: &Array2<f64>) -> f64 {
    let approx = w.dot(h);
    let diff = a - &approx;
    diff.mapv(|v| v * v).sum().sqrt()
}
