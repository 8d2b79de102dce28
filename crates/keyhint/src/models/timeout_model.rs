//! # Deadline-Bounded Scoring

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
        mpsc,
    },
    thread,
    time::Duration,
};

use crate::{
    encoding::EncodedSequence,
    errors::ModelInferenceError,
    models::{Distribution, NextWordModel},
};

/// Bounds each [`NextWordModel::score`] call of a shared model by a deadline.
///
/// The call runs on a worker thread; past the deadline the caller gets
/// [`ModelInferenceError::Timeout`] and the late result is dropped.
///
/// A timed-out worker keeps running until the backend returns. At most
/// `max_workers` calls may be running at once (shared between clones);
/// past that, calls fail fast with [`ModelInferenceError::Backend`]
/// instead of spawning another thread.
#[derive(Clone)]
pub struct TimeoutModel {
    inner: Arc<dyn NextWordModel>,
    timeout: Duration,
    max_workers: usize,
    workers: Arc<AtomicUsize>,
}

/// The default bound on concurrently running scoring workers.
pub const DEFAULT_MAX_SCORING_WORKERS: usize = 1;

/// Holds one worker slot; released on drop, including on unwind.
struct WorkerSlot(Arc<AtomicUsize>);

impl Drop for WorkerSlot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl core::fmt::Debug for TimeoutModel {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("TimeoutModel")
            .field("input_len", &self.inner.input_len())
            .field("output_width", &self.inner.output_width())
            .field("timeout", &self.timeout)
            .field("max_workers", &self.max_workers)
            .finish()
    }
}

impl TimeoutModel {
    /// Wrap `inner` with a per-call deadline.
    pub fn new(
        inner: Arc<dyn NextWordModel>,
        timeout: Duration,
    ) -> Self {
        Self {
            inner,
            timeout,
            max_workers: DEFAULT_MAX_SCORING_WORKERS,
            workers: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Set the bound on concurrently running scoring workers.
    ///
    /// Clamped to at least 1.
    pub fn with_max_workers(
        mut self,
        max_workers: usize,
    ) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    /// The per-call deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The bound on concurrently running scoring workers.
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// The number of scoring workers still running.
    pub fn running_workers(&self) -> usize {
        self.workers.load(Ordering::Acquire)
    }

    fn acquire_slot(&self) -> Option<WorkerSlot> {
        let running = self.workers.fetch_add(1, Ordering::AcqRel);
        let slot = WorkerSlot(self.workers.clone());
        (running < self.max_workers).then_some(slot)
    }
}

impl NextWordModel for TimeoutModel {
    fn input_len(&self) -> usize {
        self.inner.input_len()
    }

    fn output_width(&self) -> usize {
        self.inner.output_width()
    }

    fn fingerprint(&self) -> Option<&str> {
        self.inner.fingerprint()
    }

    fn score(
        &self,
        input: &EncodedSequence,
    ) -> Result<Distribution, ModelInferenceError> {
        let Some(slot) = self.acquire_slot() else {
            log::warn!("model scoring refused; a timed-out call is still running");
            return Err(ModelInferenceError::Backend(format!(
                "{} scoring calls still running",
                self.max_workers
            )));
        };

        let (tx, rx) = mpsc::sync_channel(1);
        let inner = self.inner.clone();
        let input = input.clone();

        thread::Builder::new()
            .name("keyhint-score".to_string())
            .spawn(move || {
                let result = inner.score(&input);
                // Free the slot before the caller can observe the result.
                drop(slot);
                // The receiver is gone if the deadline already passed.
                let _ = tx.send(result);
            })
            .map_err(|e| ModelInferenceError::Backend(format!("failed to spawn scorer: {e}")))?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                log::warn!("model scoring exceeded {:?}", self.timeout);
                Err(ModelInferenceError::Timeout(self.timeout))
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(ModelInferenceError::Backend(
                "scoring thread exited without a result".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FnModel;

    #[test]
    fn test_fast_model_passes_through() {
        let inner = Arc::new(FnModel::new(2, 2, |_| Ok(vec![0.25, 0.75])));
        let model = TimeoutModel::new(inner, Duration::from_secs(5));

        assert_eq!(model.input_len(), 2);
        assert_eq!(model.output_width(), 2);
        assert_eq!(
            model
                .score(&EncodedSequence::pad_pre(&[1], 2, 0))
                .unwrap()
                .as_slice(),
            &[0.25, 0.75]
        );
    }

    #[test]
    fn test_stalled_model_times_out() {
        let inner = Arc::new(FnModel::new(1, 1, |_| {
            thread::sleep(Duration::from_millis(500));
            Ok(vec![1.0])
        }));
        let model = TimeoutModel::new(inner, Duration::from_millis(20));

        assert_eq!(
            model.score(&EncodedSequence::pad_pre(&[], 1, 0)),
            Err(ModelInferenceError::Timeout(Duration::from_millis(20)))
        );
    }

    #[test]
    fn test_stalled_worker_blocks_new_workers() {
        let stalled = Arc::new(std::sync::atomic::AtomicBool::new(true));
        let inner = {
            let stalled = stalled.clone();
            Arc::new(FnModel::new(1, 1, move |_| {
                if stalled.swap(false, Ordering::AcqRel) {
                    thread::sleep(Duration::from_millis(200));
                }
                Ok(vec![1.0])
            }))
        };
        let model = TimeoutModel::new(inner, Duration::from_millis(20));
        let input = EncodedSequence::pad_pre(&[], 1, 0);

        assert_eq!(
            model.score(&input),
            Err(ModelInferenceError::Timeout(Duration::from_millis(20)))
        );
        assert_eq!(model.running_workers(), 1);

        // No second thread while the first is still stuck.
        assert!(matches!(
            model.clone().score(&input),
            Err(ModelInferenceError::Backend(_))
        ));
        assert_eq!(model.running_workers(), 1);

        thread::sleep(Duration::from_millis(400));
        assert_eq!(model.running_workers(), 0);
        assert_eq!(model.score(&input).unwrap().as_slice(), &[1.0]);
    }

    #[test]
    fn test_max_workers() {
        let inner = Arc::new(FnModel::new(1, 1, |_| Ok(vec![1.0])));
        let model = TimeoutModel::new(inner, Duration::from_secs(5));
        assert_eq!(model.max_workers(), DEFAULT_MAX_SCORING_WORKERS);
        assert_eq!(model.clone().with_max_workers(0).max_workers(), 1);

        let input = EncodedSequence::pad_pre(&[], 1, 0);
        for _ in 0..10 {
            assert!(model.score(&input).is_ok());
        }
        assert_eq!(model.running_workers(), 0);
    }

    #[test]
    fn test_panicking_model() {
        let inner = Arc::new(FnModel::new(1, 1, |_| -> Result<Vec<f32>, _> {
            panic!("backend crashed")
        }));
        let model = TimeoutModel::new(inner, Duration::from_secs(5));

        assert!(matches!(
            model.score(&EncodedSequence::pad_pre(&[], 1, 0)),
            Err(ModelInferenceError::Backend(_))
        ));
    }
}
