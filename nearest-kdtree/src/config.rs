use crate::errors::{KdTreeError, KdTreeResult};

/// Fallback worker count when the available parallelism cannot be queried.
const DEFAULT_WORKERS: usize = 4;

/// Tuning parameters shared by tree construction and batch searches.
///
/// - `tolerance`: snap distance for insertion. Points strictly closer than
///   this to a node on the insertion path are absorbed by that node.
///   Defaults to 0.0, which never snaps.
/// - `workers`: number of threads used by
///   [`min_cluster_distance_with`](crate::minimum_distances::min_cluster_distance_with).
///   Defaults to the available CPU parallelism.
#[derive(Debug, Clone, PartialEq)]
pub struct KdTreeConfig {
    tolerance: f64,
    workers: usize,
}

impl Default for KdTreeConfig {
    fn default() -> Self {
        KdTreeConfig {
            tolerance: 0.0,
            workers: default_workers(),
        }
    }
}

impl KdTreeConfig {
    /// Creates a configuration with default values.
    pub fn new() -> KdTreeConfig {
        KdTreeConfig::default()
    }

    /// Returns the snap tolerance.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the worker count.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Sets the snap tolerance. Rejects negative and NaN values.
    pub fn set_tolerance(&mut self, tolerance: f64) -> KdTreeResult<()> {
        validate_tolerance(tolerance)?;
        self.tolerance = tolerance;
        Ok(())
    }

    /// Sets the worker count. Rejects zero.
    pub fn set_workers(&mut self, workers: usize) -> KdTreeResult<()> {
        validate_workers(workers)?;
        self.workers = workers;
        Ok(())
    }

    /// Builder form of [`set_tolerance`](Self::set_tolerance).
    pub fn with_tolerance(mut self, tolerance: f64) -> KdTreeResult<Self> {
        self.set_tolerance(tolerance)?;
        Ok(self)
    }

    /// Builder form of [`set_workers`](Self::set_workers).
    pub fn with_workers(mut self, workers: usize) -> KdTreeResult<Self> {
        self.set_workers(workers)?;
        Ok(self)
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(DEFAULT_WORKERS)
}

pub(crate) fn validate_tolerance(tolerance: f64) -> KdTreeResult<()> {
    if tolerance.is_nan() || tolerance < 0.0 {
        return Err(KdTreeError::InvalidOperation(format!(
            "Snap tolerance must be a non-negative number, got: {}",
            tolerance
        )));
    }
    Ok(())
}

pub(crate) fn validate_workers(workers: usize) -> KdTreeResult<()> {
    if workers == 0 {
        return Err(KdTreeError::InvalidOperation(
            "Worker count must be at least 1".to_string(),
        ));
    }
    Ok(())
}
