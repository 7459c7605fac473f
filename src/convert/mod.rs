//! Chart-level conversion between the flat and layered schemas.

pub(crate) mod options;
pub(crate) mod report;
pub(crate) mod to_flat;
pub(crate) mod to_layered;

use rayon::prelude::*;

use crate::foundation::error::{ConvertError, ConvertResult};

use self::options::ConvertOptions;

/// Run `f` for every line index, on a rayon pool when `opts.parallel` is set.
///
/// Output order always follows line order.
pub(crate) fn map_lines<T, F>(opts: &ConvertOptions, count: usize, f: F) -> ConvertResult<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> ConvertResult<T> + Sync + Send,
{
    if !opts.parallel || count < 2 {
        return (0..count).map(f).collect();
    }
    let pool = build_thread_pool(opts.threads)?;
    pool.install(|| (0..count).into_par_iter().map(&f).collect())
}

fn build_thread_pool(threads: Option<usize>) -> ConvertResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ConvertError::validation(
            "conversion 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ConvertError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/convert/mod.rs"]
mod tests;
