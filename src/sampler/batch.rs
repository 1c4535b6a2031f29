// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Single-slot batch handoff between a host and a sampling worker.
//!
//! The host owns the transform/colour buffer pair. Submitting a batch
//! transfers buffer ownership to the worker for the duration of that batch;
//! collecting transfers it back. Exactly one batch can be in flight: a
//! submit while one is pending is refused and the batch handed back, never
//! queued. No timeouts, no cancellation; a stalled batch stalls the caller.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use crossbeam_utils::atomic::AtomicCell;
use scopeguard::defer_on_unwind;

use super::{sample_grid, FieldBuffers, FieldScene, GridSpec};

/// One unit of work: what to sample and the buffers to sample into.
#[derive(Debug)]
pub struct FieldBatch {
    pub scene: FieldScene,
    pub spec: GridSpec,
    pub clock: f64,
    pub buffers: FieldBuffers,
}

/// A dedicated sampling thread with single-in-flight semantics.
pub struct BatchRunner {
    jobs: Option<Sender<FieldBatch>>,
    done: Receiver<FieldBuffers>,
    worker: Option<JoinHandle<()>>,
    failed: Arc<AtomicCell<bool>>,
}

impl BatchRunner {
    pub fn new() -> BatchRunner {
        // A rendezvous channel: a submit succeeds only while the worker is
        // idle and waiting, which is exactly the single-slot contract.
        let (job_tx, job_rx) = bounded::<FieldBatch>(0);
        let (done_tx, done_rx) = bounded(1);
        let failed = Arc::new(AtomicCell::new(false));

        let failed_in_worker = Arc::clone(&failed);
        let worker = thread::Builder::new()
            .name("field-batch".to_string())
            .spawn(move || {
                defer_on_unwind! { failed_in_worker.store(true); }
                for batch in job_rx.iter() {
                    let FieldBatch {
                        scene,
                        spec,
                        clock,
                        mut buffers,
                    } = batch;
                    sample_grid(&scene, &spec, clock, &mut buffers);
                    if done_tx.send(buffers).is_err() {
                        break;
                    }
                }
            })
            .expect("OS can create threads");

        BatchRunner {
            jobs: Some(job_tx),
            done: done_rx,
            worker: Some(worker),
            failed,
        }
    }

    /// Hand a batch (and its buffers) to the worker. If a batch is already
    /// in flight the submission is refused and the batch returned to the
    /// caller untouched.
    pub fn submit(&self, batch: FieldBatch) -> Result<(), FieldBatch> {
        let jobs = self.jobs.as_ref().expect("sender lives until drop");
        match jobs.try_send(batch) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(batch)) | Err(TrySendError::Disconnected(batch)) => Err(batch),
        }
    }

    /// Reclaim finished buffers without blocking.
    pub fn try_collect(&self) -> Option<FieldBuffers> {
        self.done.try_recv().ok()
    }

    /// Block until the in-flight batch finishes and reclaim its buffers.
    /// Only meaningful after a successful [`submit`](Self::submit).
    pub fn collect(&self) -> Option<FieldBuffers> {
        self.done.recv().ok()
    }

    /// Whether the worker died on a panic.
    pub fn has_failed(&self) -> bool {
        self.failed.load()
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BatchRunner {
    fn drop(&mut self) {
        // Closing the job channel lets the worker drain out of its loop.
        drop(self.jobs.take());
        if let Some(worker) = self.worker.take() {
            worker.join().ok();
        }
    }
}
