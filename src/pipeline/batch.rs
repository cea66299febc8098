use rayon::prelude::*;

use crate::{
    foundation::error::{ConvertError, ConvertResult},
    pipeline::{
        convert::{EncodedAsset, convert_image},
        options::ConvertOptions,
    },
};

/// How a batch is scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchMode {
    /// One image at a time on the calling thread; stops at the first failure.
    #[default]
    Sequential,
    /// One task per image on the orchestrator's worker pool.
    Parallel,
}

/// Runs the single-image pipeline over many inputs, returning outputs in input order.
///
/// The worker pool is built once in [`BatchOrchestrator::new`] and reused for every batch; it
/// shuts down when the orchestrator is dropped. Per-image results never depend on scheduling:
/// output `i` is byte-identical to converting input `i` alone.
pub struct BatchOrchestrator {
    pool: rayon::ThreadPool,
}

impl BatchOrchestrator {
    /// Build an orchestrator with `threads` workers (`None` = available parallelism).
    pub fn new(threads: Option<usize>) -> ConvertResult<Self> {
        Ok(Self {
            pool: build_thread_pool(threads)?,
        })
    }

    /// Number of worker threads in the pool.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Convert every input, failing the whole batch on the first failing index.
    ///
    /// Errors are [`ConvertError::BatchTask`] carrying the failing input index. In parallel mode
    /// all tasks run to completion and the lowest failing index is reported; no partial results
    /// are returned.
    #[tracing::instrument(skip_all, fields(images = inputs.len(), ?mode, format = %opts.format))]
    pub fn convert_batch<B>(
        &self,
        inputs: &[B],
        opts: &ConvertOptions,
        mode: BatchMode,
    ) -> ConvertResult<Vec<EncodedAsset>>
    where
        B: AsRef<[u8]> + Sync,
    {
        opts.validate()?;
        let out = match mode {
            BatchMode::Sequential => convert_sequential(inputs, opts),
            BatchMode::Parallel => self.run_parallel(inputs, opts).into_iter().collect(),
        };
        if let Err(err) = &out {
            tracing::warn!(index = ?err.failed_index(), error = %err, "batch failed");
        }
        out
    }

    /// Opt-in partial-results variant: one result per input, in input order.
    ///
    /// Runs on the worker pool like [`BatchMode::Parallel`]; failures carry their index and do
    /// not discard the successful outputs of other inputs.
    #[tracing::instrument(skip_all, fields(images = inputs.len(), format = %opts.format))]
    pub fn convert_batch_partial<B>(
        &self,
        inputs: &[B],
        opts: &ConvertOptions,
    ) -> ConvertResult<Vec<ConvertResult<EncodedAsset>>>
    where
        B: AsRef<[u8]> + Sync,
    {
        opts.validate()?;
        Ok(self.run_parallel(inputs, opts))
    }

    fn run_parallel<B>(
        &self,
        inputs: &[B],
        opts: &ConvertOptions,
    ) -> Vec<ConvertResult<EncodedAsset>>
    where
        B: AsRef<[u8]> + Sync,
    {
        // indexed collect keeps input order regardless of completion order
        self.pool.install(|| {
            inputs
                .par_iter()
                .enumerate()
                .map(|(i, bytes)| convert_image(bytes.as_ref(), opts).map_err(|e| e.at_index(i)))
                .collect()
        })
    }
}

fn convert_sequential<B: AsRef<[u8]>>(
    inputs: &[B],
    opts: &ConvertOptions,
) -> ConvertResult<Vec<EncodedAsset>> {
    let mut out = Vec::with_capacity(inputs.len());
    for (i, bytes) in inputs.iter().enumerate() {
        out.push(convert_image(bytes.as_ref(), opts).map_err(|e| e.at_index(i))?);
    }
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> ConvertResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ConvertError::validation(
            "batch 'threads' must be >= 1 when set",
        ));
    }

    let n = threads.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    });
    rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .thread_name(|i| format!("bgconvert-worker-{i}"))
        .build()
        .map_err(|e| ConvertError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/batch.rs"]
mod tests;
