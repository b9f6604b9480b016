//! A single algorithm run.
//!
//! [`Run`] is a pull-based iterator of [`StepSnapshot`]s. Nothing happens
//! between pulls, so the caller owns pacing. The run works on its own copy
//! of the graph; the live model is never touched.

use std::iter::FusedIterator;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use graphstep_adapters::plugins::algorithms::{
    AlgorithmKind, Control, RunStatus, StepAlgorithm, StepSnapshot,
};
use parking_lot::Mutex;

use crate::config::Config;

/// State shared between a run, its cancel handles, and the engine.
#[derive(Debug)]
pub(crate) struct RunShared {
    id: u64,
    /// Terminal status requested from outside the run.
    stop: Mutex<Option<RunStatus>>,
    finished: AtomicBool,
    /// Latest published snapshot.
    display: Mutex<Option<StepSnapshot>>,
}

impl RunShared {
    pub(crate) fn new(id: u64) -> Self {
        Self {
            id,
            stop: Mutex::new(None),
            finished: AtomicBool::new(false),
            display: Mutex::new(None),
        }
    }

    /// Requests a stop. Returns false if the run had already ended or been
    /// stopped.
    pub(crate) fn request_stop(&self, status: RunStatus) -> bool {
        let mut stop = self.stop.lock();
        if stop.is_some() || self.finished.load(Ordering::Acquire) {
            return false;
        }
        *stop = Some(status);
        self.discard();
        true
    }

    /// Whether the run can still make progress.
    pub(crate) fn is_live(&self) -> bool {
        !self.finished.load(Ordering::Acquire) && self.stop.lock().is_none()
    }

    pub(crate) fn display(&self) -> Option<StepSnapshot> {
        self.display.lock().clone()
    }

    fn pending_stop(&self) -> Option<RunStatus> {
        self.stop.lock().clone()
    }

    /// Publishes a step, marking the run finished when `last` is set.
    ///
    /// Holds the stop lock throughout, so a stop requested concurrently
    /// either lands before (and is returned instead) or is refused.
    fn publish(&self, snapshot: &StepSnapshot, last: bool) -> Option<RunStatus> {
        let stop = self.stop.lock();
        if let Some(status) = stop.as_ref() {
            return Some(status.clone());
        }
        *self.display.lock() = Some(snapshot.clone());
        if last {
            self.finished.store(true, Ordering::Release);
        }
        None
    }

    fn discard(&self) {
        *self.display.lock() = None;
    }

    fn finish(&self) {
        self.finished.store(true, Ordering::Release);
    }
}

/// Cancels a run from anywhere, e.g. a render callback or another thread.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    shared: Arc<RunShared>,
}

impl CancelHandle {
    /// Requests cancellation. The run yields a `Cancelled` snapshot on its
    /// next pull. Returns false if the run had already ended.
    pub fn cancel(&self) -> bool {
        let cancelled = self.shared.request_stop(RunStatus::Cancelled);
        if cancelled {
            tracing::debug!(run = self.shared.id, "cancel requested");
        }
        cancelled
    }

    /// Whether the run can still make progress.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.shared.is_live()
    }
}

/// A lazy sequence of snapshots from one algorithm run.
///
/// The last item always carries a terminal [`RunStatus`]; after it the
/// iterator is exhausted. Dropping an unfinished run cancels it.
pub struct Run {
    algorithm: Box<dyn StepAlgorithm + Send>,
    shared: Arc<RunShared>,
    kind: AlgorithmKind,
    step: usize,
    step_limit: Option<usize>,
    trace_steps: bool,
    terminal: Option<RunStatus>,
}

impl Run {
    pub(crate) fn new(
        algorithm: Box<dyn StepAlgorithm + Send>,
        shared: Arc<RunShared>,
        config: &Config,
    ) -> Self {
        Self {
            kind: algorithm.kind(),
            algorithm,
            shared,
            step: 0,
            step_limit: config.step_limit,
            trace_steps: config.trace_steps,
            terminal: None,
        }
    }

    /// Algorithm being run.
    #[must_use]
    pub fn kind(&self) -> AlgorithmKind {
        self.kind
    }

    /// Number of algorithm steps executed so far.
    #[must_use]
    pub fn steps_taken(&self) -> usize {
        self.step
    }

    /// Terminal status, once the last snapshot has been yielded.
    #[must_use]
    pub fn status(&self) -> Option<&RunStatus> {
        self.terminal.as_ref()
    }

    /// Returns a handle that can cancel this run.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Requests cancellation; see [`CancelHandle::cancel`].
    pub fn cancel(&self) -> bool {
        self.cancel_handle().cancel()
    }

    /// Pulls every remaining snapshot and returns the terminal status.
    pub fn finish(mut self) -> RunStatus {
        for _ in self.by_ref() {}
        self.terminal.clone().unwrap_or(RunStatus::Cancelled)
    }

    fn terminate(&mut self, status: RunStatus) -> StepSnapshot {
        let mut snapshot = self.algorithm.snapshot();
        snapshot.step = self.step;
        snapshot.status = status.clone();
        tracing::debug!(
            run = self.shared.id,
            algorithm = %self.kind,
            steps = self.step,
            status = ?status,
            "run stopped"
        );
        self.terminal = Some(status);
        self.shared.discard();
        self.shared.finish();
        snapshot
    }
}

impl Iterator for Run {
    type Item = StepSnapshot;

    fn next(&mut self) -> Option<StepSnapshot> {
        if self.terminal.is_some() {
            return None;
        }
        if let Some(status) = self.shared.pending_stop() {
            return Some(self.terminate(status));
        }
        if let Some(limit) = self.step_limit.filter(|&limit| self.step >= limit) {
            let reason = format!("step limit of {limit} reached");
            return Some(self.terminate(RunStatus::Aborted { reason }));
        }

        let control = self.algorithm.step();
        self.step += 1;
        let mut snapshot = self.algorithm.snapshot();
        snapshot.step = self.step;
        if self.trace_steps {
            tracing::trace!(
                run = self.shared.id,
                step = self.step,
                active = ?snapshot.active,
                visited = snapshot.visited.len(),
                "step"
            );
        }
        let finished = match control {
            Control::Done(outcome) => {
                let label = outcome.label();
                snapshot.status = RunStatus::Finished(outcome);
                Some(label)
            }
            Control::Continue => None,
        };
        if let Some(status) = self.shared.publish(&snapshot, finished.is_some()) {
            return Some(self.terminate(status));
        }
        if let Some(label) = finished {
            tracing::debug!(
                run = self.shared.id,
                algorithm = %self.kind,
                steps = self.step,
                outcome = label,
                "run finished"
            );
            self.terminal = Some(snapshot.status.clone());
        }
        Some(snapshot)
    }
}

impl FusedIterator for Run {}

impl Drop for Run {
    fn drop(&mut self) {
        if self.terminal.is_none() {
            self.shared.request_stop(RunStatus::Cancelled);
            self.shared.finish();
        }
    }
}

impl std::fmt::Debug for Run {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Run")
            .field("id", &self.shared.id)
            .field("kind", &self.kind)
            .field("step", &self.step)
            .field("terminal", &self.terminal)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> StepSnapshot {
        StepSnapshot::new(AlgorithmKind::Bfs)
    }

    #[test]
    fn test_publish_refused_after_stop() {
        let shared = RunShared::new(1);
        assert!(shared.request_stop(RunStatus::Cancelled));
        assert_eq!(shared.publish(&snapshot(), true), Some(RunStatus::Cancelled));
        assert!(shared.display().is_none());
        assert!(!shared.finished.load(Ordering::Acquire));
    }

    #[test]
    fn test_stop_refused_after_last_publish() {
        let shared = RunShared::new(1);
        assert_eq!(shared.publish(&snapshot(), true), None);
        assert!(!shared.request_stop(RunStatus::Cancelled));
        assert!(shared.display().is_some());
        assert!(!shared.is_live());
    }

    #[test]
    fn test_stop_accepted_between_steps() {
        let shared = RunShared::new(1);
        assert_eq!(shared.publish(&snapshot(), false), None);
        assert!(shared.request_stop(RunStatus::Cancelled));
        assert!(shared.display().is_none());
        assert!(!shared.request_stop(RunStatus::Cancelled));
    }
}
