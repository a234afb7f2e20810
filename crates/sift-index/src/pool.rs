//! Order-preserving parallel map.

use rayon::prelude::*;

use crate::error::IndexError;

/// Apply `f` to every item and collect the results in input order, stopping
/// at the first error.
///
/// `threads == 0` uses one worker per core. `threads == 1` runs on the
/// calling thread without building a pool.
///
/// # Errors
/// Returns the error of a failing item, or [`IndexError::Pool`] if the pool
/// cannot be built. Which failing item is reported is unspecified when
/// several fail concurrently.
pub fn map_in_order<T, R, F>(items: &[T], threads: usize, f: F) -> Result<Vec<R>, IndexError>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R, IndexError> + Sync + Send,
{
    if threads == 1 {
        return items.iter().map(f).collect();
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("sift-worker-{i}"))
        .build()?;
    pool.install(|| items.par_iter().map(f).collect())
}
