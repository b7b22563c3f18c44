//! # FIFO queue behind `emit_async`.
//!
//! [`DispatchQueue`] is an unbounded [`tokio::sync::mpsc`] channel drained by
//! a single worker task. Each job is a deferred synchronous `emit`; the caller
//! gets the result back through a oneshot.
//!
//! ## Architecture
//! ```text
//! emit_async(a) ──┐
//! emit_async(b) ──┼──► [unbounded queue] ─► worker ──► Shared::emit_checked ──► done.send(result)
//! emit_async(c) ──┘        (FIFO)          (one task)
//! ```
//!
//! ## Rules
//! - Jobs are enqueued synchronously at call time, so dispatch order is issue order.
//! - One worker means one dispatch at a time; no two queued emits overlap.
//! - The worker holds a `Weak` to the bus and stops when the bus is dropped.
//! - Enqueueing never blocks and never rejects; once scheduled, a job runs.

use std::sync::Weak;

use tokio::sync::{mpsc, oneshot};

use super::bus::Shared;
use crate::error::BusError;
use crate::events::Args;

/// One deferred emission.
pub(crate) struct Job {
    pub(crate) event: String,
    pub(crate) args: Args,
    pub(crate) done: oneshot::Sender<Result<(), BusError>>,
}

pub(crate) struct DispatchQueue {
    tx: mpsc::UnboundedSender<Job>,
}

impl DispatchQueue {
    /// Spawns the worker on the current tokio runtime.
    pub(crate) fn spawn(shared: Weak<Shared>) -> Result<Self, BusError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| BusError::NoRuntime)?;
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();

        handle.spawn(async move {
            while let Some(job) = rx.recv().await {
                let Some(bus) = shared.upgrade() else {
                    let _ = job.done.send(Err(BusError::DispatcherClosed));
                    break;
                };
                let result = bus.emit_checked(&job.event, &job.args);
                drop(bus);
                let _ = job.done.send(result);
            }
            tracing::debug!("async dispatcher stopped");
        });

        Ok(Self { tx })
    }

    /// Enqueues without waiting.
    pub(crate) fn enqueue(&self, job: Job) -> Result<(), BusError> {
        self.tx.send(job).map_err(|mpsc::error::SendError(job)| {
            tracing::warn!(event = %job.event, "async dispatcher closed; emission dropped");
            BusError::DispatcherClosed
        })
    }

    /// True once the worker has gone away (runtime shut down or worker panicked).
    #[inline]
    pub(crate) fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
