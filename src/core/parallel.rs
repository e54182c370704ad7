//! Bounded parallel processing utilities

use crate::error::{ReqwalkerError, Result};
use dashmap::DashMap;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Progress update information for parallel operations
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

impl ProgressUpdate {
    /// Create a new progress update
    pub fn new(current: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }

    /// Calculate progress percentage
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64) * 100.0
        }
    }
}

/// Run `f` over `keys` on a dedicated pool of `jobs` worker threads.
///
/// Results are keyed by their input and returned in key order, so the
/// output does not depend on scheduling. `jobs == 0` is treated as 1.
pub fn process_keyed<K, R, F, P>(keys: Vec<K>, jobs: usize, f: F, progress_callback: P) -> Result<BTreeMap<K, R>>
where
    K: Ord + Hash + Clone + Send + Sync,
    R: Send + Sync,
    F: Fn(&K) -> R + Send + Sync,
    P: Fn(ProgressUpdate) + Send + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.max(1))
        .build()
        .map_err(|e| ReqwalkerError::ParallelExecution {
            message: format!("Failed to build worker pool: {}", e),
        })?;

    let total = keys.len();
    let counter = AtomicUsize::new(0);
    let results: DashMap<K, R> = DashMap::with_capacity(total);

    pool.install(|| {
        keys.par_iter().for_each(|key| {
            let value = f(key);
            results.insert(key.clone(), value);

            let done = counter.fetch_add(1, Ordering::SeqCst) + 1;
            progress_callback(ProgressUpdate::new(
                done,
                total,
                format!("Processing item {}/{}", done, total),
            ));
        });
    });

    Ok(results.into_iter().collect())
}
