use log::{debug, info, warn};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::NmfError;
use crate::progress::ProgressSink;

use super::update_rules::{euclidean_distance, update_h, update_w};

/// Parameters of the multiplicative-update loop
#[derive(Debug, Clone)]
pub struct FactorizationConfig {
    /// Number of clusters K, the inner dimension of W and H
    pub n_clusters: usize,
    pub max_iter: usize,
    /// Stop as soon as ||A - WH|| <= min_error
    pub min_error: f64,
    /// Independent random initializations; the closest fit is kept
    pub n_init: usize,
    pub seed: Option<u64>,
    /// Emit iteration progress every this many iterations (0 = never)
    pub report_every: usize,
}

impl Default for FactorizationConfig {
    fn default() -> Self {
        Self {
            n_clusters: 5,
            max_iter: 100,
            min_error: 0.02,
            n_init: 1,
            seed: None,
            report_every: 10,
        }
    }
}

/// A ≈ W * H with W terms x K and H K x documents
#[derive(Debug, Clone)]
pub struct FactorizationResult {
    pub w: Array2<f64>,
    pub h: Array2<f64>,
    /// Distance reached MINERROR at the top of some iteration
    pub converged: bool,
    /// Update rounds performed
    pub iterations: usize,
    pub initial_distance: f64,
    pub final_distance: f64,
}

impl FactorizationResult {
    /// Net distance reduction from the random start
    pub fn improvement(&self) -> f64 {
        self.initial_distance - self.final_distance
    }
}

fn validate(a: &Array2<f64>, config: &FactorizationConfig) -> Result<(), NmfError> {
    if config.n_clusters == 0 {
        return Err(NmfError::InvalidArgument(
            "cluster count must be a positive integer".to_string(),
        ));
    }
    if config.n_init == 0 {
        return Err(NmfError::InvalidArgument(
            "at least one initialization is required".to_string(),
        ));
    }
    if !(config.min_error.is_finite() && config.min_error >= 0.0) {
        return Err(NmfError::InvalidArgument(format!(
            "minimum error must be a non-negative number, got {}",
            config.min_error
        )));
    }
    if a.is_empty() {
        return Err(NmfError::InvalidArgument(format!(
            "cannot factorize an empty {}x{} matrix",
            a.nrows(),
            a.ncols()
        )));
    }
    if a.iter().any(|&v| !(v >= 0.0 && v.is_finite())) {
        return Err(NmfError::InvalidArgument(
            "matrix entries must be finite and non-negative".to_string(),
        ));
    }
    Ok(())
}

/// W (m x k) and H (k x n) drawn from the open interval (0, 1).
///
/// A zero cell could never move under multiplicative updates, so the lower
/// bound is the smallest positive f64.
fn random_factors(shape: (usize, usize), k: usize, seed: u64) -> (Array2<f64>, Array2<f64>) {
    let (m, n) = shape;
    let mut rng = StdRng::seed_from_u64(seed);
    let w = Array2::random_using((m, k), Uniform::new(f64::MIN_POSITIVE, 1.0), &mut rng);
    let h = Array2::random_using((k, n), Uniform::new(f64::MIN_POSITIVE, 1.0), &mut rng);
    (w, h)
}

/// A converged run always beats one that ran out of iterations; otherwise
/// the lower final distance wins.
fn is_better(candidate: &FactorizationResult, incumbent: &FactorizationResult) -> bool {
    match (candidate.converged, incumbent.converged) {
        (true, false) => true,
        (false, true) => false,
        _ => candidate.final_distance < incumbent.final_distance,
    }
}

/// Run the factorization with `n_init` random restarts.
///
/// Each restart draws W and H from (0, 1). A converged restart ends the
/// search and is returned; otherwise the lowest final distance wins.
pub fn factorize<S>(
    a: &Array2<f64>,
    config: &FactorizationConfig,
    sink: &mut S,
) -> Result<FactorizationResult, NmfError>
where
    S: ProgressSink + ?Sized,
{
    validate(a, config)?;

    let (m, n) = a.dim();
    let k = config.n_clusters;
    let base_seed = config.seed.unwrap_or_else(rand::random);
    info!("factorizing {}x{} matrix with k={}, seed={}", m, n, k, base_seed);

    let mut best: Option<FactorizationResult> = None;
    for init_idx in 0..config.n_init {
        let seed = base_seed.wrapping_add(init_idx as u64);
        let (w, h) = random_factors((m, n), k, seed);

        if config.n_init > 1 {
            sink.message(&format!("initialization {} of {}", init_idx + 1, config.n_init));
        }
        let result = factorize_from(a, w, h, config, sink);
        debug!(
            "init {}: distance {:.6} after {} iterations",
            init_idx, result.final_distance, result.iterations
        );

        let converged = result.converged;
        if best.as_ref().map_or(true, |b| is_better(&result, b)) {
            best = Some(result);
        }
        if converged {
            break;
        }
    }

    best.ok_or_else(|| NmfError::InvalidArgument("no initialization was run".to_string()))
}

/// Run the loop from the given starting factors. Never fails.
///
/// Per iteration: measure the distance, stop if it is within `min_error`,
/// otherwise update H from the current W and then W from the new H.
pub fn factorize_from<S>(
    a: &Array2<f64>,
    mut w: Array2<f64>,
    mut h: Array2<f64>,
    config: &FactorizationConfig,
    sink: &mut S,
) -> FactorizationResult
where
    S: ProgressSink + ?Sized,
{
    let initial_distance = euclidean_distance(a, &w, &h);
    let mut distance = initial_distance;
    let mut iterations = 0;
    let mut converged = false;
    let mut degenerate = 0usize;

    for iter in 0..config.max_iter {
        if iter > 0 {
            distance = euclidean_distance(a, &w, &h);
        }
        if config.report_every > 0 && iter % config.report_every == 0 {
            sink.iteration(iter, distance);
        }
        if distance <= config.min_error {
            converged = true;
            break;
        }

        degenerate += update_h(a, &w, &mut h);
        degenerate += update_w(a, &mut w, &h);
        iterations = iter + 1;
    }

    if !converged && iterations > 0 {
        distance = euclidean_distance(a, &w, &h);
    }
    if degenerate > 0 {
        warn!("{} factor cells kept their value on a zero denominator", degenerate);
    }

    if converged {
        sink.message(&format!(
            "converged after {} iterations, distance {:.6}",
            iterations, distance
        ));
    } else {
        sink.message(&format!(
            "stopped after {} iterations, distance {:.6}, improvement {:.6}",
            iterations,
            distance,
            initial_distance - distance
        ));
    }

    FactorizationResult {
        w,
        h,
        converged,
        iterations,
        initial_distance,
        final_distance: distance,
    }
}
