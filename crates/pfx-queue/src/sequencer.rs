//! Per-target FIFO sequencing.
//!
//! Each registered target owns a lane: its current source plus a worker task
//! fed by an unbounded channel. A job decodes the current source, runs one
//! resolved operation on a blocking thread, encodes the result and stores it
//! as the new source before the worker takes the next job. Jobs on one
//! target therefore never overlap and always see the output of the job
//! before them. Lanes of different targets run independently.
//!
//! Enqueueing is synchronous, so the order of [`Sequencer::submit`] calls is
//! the execution order even if the returned [`Pending`] handles are awaited
//! in a different order, or never.
//!
//! # Example
//!
//! ```rust
//! use pfx_queue::{RawCodec, RawImage, Sequencer};
//! use pfx_ops::Request;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> pfx_queue::QueueResult<()> {
//! let seq = Sequencer::new(RawCodec);
//! seq.register("logo", RawImage::new(1, 1, vec![30, 60, 90, 255]));
//!
//! let first = seq.submit(&"logo", Request::grayscale("average"))?;
//! let second = seq.submit(&"logo", Request::inverse())?;
//! second.await?;
//! first.await?;
//!
//! assert_eq!(seq.source(&"logo").map(|img| img.data), Some(vec![195, 195, 195, 255]));
//! # Ok(())
//! # }
//! ```

use crate::codec::Codec;
use crate::{QueueError, QueueResult};
use parking_lot::{Mutex, RwLock};
use pfx_ops::{execute, Operation, Outcome, Request};
use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Job sent to a lane worker.
struct Job {
    request: Request,
    reply: oneshot::Sender<QueueResult<Outcome>>,
}

/// Current source of a target and how many times it was replaced.
struct Slot<S> {
    source: S,
    /// Bumped by [`Sequencer::register`]; a job whose read predates the
    /// bump drops its result.
    generation: u64,
}

/// State of one target.
struct Lane<S> {
    slot: Arc<RwLock<Slot<S>>>,
    /// Spawned on first submit.
    tx: Option<mpsc::UnboundedSender<Job>>,
}

/// Orders transforms per target.
///
/// `K` identifies targets, `C` converts their sources to pixels and back.
pub struct Sequencer<K, C: Codec> {
    codec: Arc<C>,
    lanes: Mutex<HashMap<K, Lane<C::Source>>>,
}

impl<K, C> Sequencer<K, C>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    C: Codec,
{
    /// Creates an empty sequencer.
    pub fn new(codec: C) -> Self {
        Self {
            codec: Arc::new(codec),
            lanes: Mutex::new(HashMap::new()),
        }
    }

    /// Registers `key` with `source`, or replaces the source of a known key.
    ///
    /// Jobs still waiting in the queue run on the replacement. A job already
    /// running when the source is replaced discards its result and resolves
    /// to [`QueueError::Superseded`].
    pub fn register(&self, key: K, source: C::Source) {
        let mut lanes = self.lanes.lock();
        match lanes.get(&key) {
            Some(lane) => {
                let mut slot = lane.slot.write();
                slot.source = source;
                slot.generation += 1;
                debug!(target_key = ?key, generation = slot.generation, "replace source");
            }
            None => {
                debug!(target_key = ?key, "register target");
                lanes.insert(
                    key,
                    Lane {
                        slot: Arc::new(RwLock::new(Slot { source, generation: 0 })),
                        tx: None,
                    },
                );
            }
        }
    }

    /// Unregisters `key`, returning its current source.
    ///
    /// The lane's worker still finishes and answers every job queued before
    /// the call, then exits. Their results are not reachable through the
    /// sequencer anymore.
    pub fn remove(&self, key: &K) -> Option<C::Source> {
        let lane = self.lanes.lock().remove(key)?;
        debug!(target_key = ?key, "remove target");
        let source = lane.slot.read().source.clone();
        Some(source)
    }

    /// Current source of `key`: the registered one, or the output of the
    /// last completed job.
    pub fn source(&self, key: &K) -> Option<C::Source> {
        self.lanes.lock().get(key).map(|lane| lane.slot.read().source.clone())
    }

    /// `true` if `key` is registered.
    pub fn contains(&self, key: &K) -> bool {
        self.lanes.lock().contains_key(key)
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.lanes.lock().len()
    }

    /// `true` if no target is registered.
    pub fn is_empty(&self) -> bool {
        self.lanes.lock().is_empty()
    }

    /// Queues `request` behind every job already queued for `key`.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// [`QueueError::UnknownTarget`] for an unregistered key,
    /// [`QueueError::NoRuntime`] outside a runtime.
    pub fn submit(&self, key: &K, request: Request) -> QueueResult<Pending> {
        let mut pending = self.submit_all(key, [request])?;
        pending.pop().ok_or(QueueError::Closed)
    }

    /// Queues `requests` for `key` as one contiguous run, in order.
    ///
    /// # Errors
    ///
    /// As [`submit`](Self::submit). Nothing is queued on error.
    pub fn submit_all(
        &self,
        key: &K,
        requests: impl IntoIterator<Item = Request>,
    ) -> QueueResult<Vec<Pending>> {
        let mut lanes = self.lanes.lock();
        let lane = lanes
            .get_mut(key)
            .ok_or_else(|| QueueError::UnknownTarget(format!("{key:?}")))?;

        let live = lane.tx.as_ref().filter(|tx| !tx.is_closed()).cloned();
        let tx = match live {
            Some(tx) => tx,
            None => {
                let tx = spawn_lane(key.clone(), self.codec.clone(), lane.slot.clone())?;
                lane.tx = Some(tx.clone());
                tx
            }
        };

        // the lanes lock is held, so no other submitter can interleave
        let mut pending = Vec::new();
        for request in requests {
            let (reply, rx) = oneshot::channel();
            tx.send(Job { request, reply }).map_err(|_| QueueError::Closed)?;
            pending.push(Pending { rx });
        }
        Ok(pending)
    }

    /// Queues `request` and waits for it.
    pub async fn apply(&self, key: &K, request: Request) -> QueueResult<Outcome> {
        self.submit(key, request)?.await
    }

    /// Queues `requests` and waits for all of them.
    ///
    /// Every job runs even if an earlier one fails; the first failure is
    /// returned.
    pub async fn apply_all(
        &self,
        key: &K,
        requests: impl IntoIterator<Item = Request>,
    ) -> QueueResult<Vec<Outcome>> {
        let pending = self.submit_all(key, requests)?;
        let mut outcomes = Vec::with_capacity(pending.len());
        let mut first_err = None;
        for p in pending {
            match p.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    first_err.get_or_insert(err);
                }
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(outcomes),
        }
    }
}

impl<K, C: Codec> Debug for Sequencer<K, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequencer")
            .field("targets", &self.lanes.lock().len())
            .finish_non_exhaustive()
    }
}

/// Handle to a queued job. Resolves once the job's result is stored as the
/// target's new source.
///
/// Dropping it does not cancel the job.
#[derive(Debug)]
pub struct Pending {
    rx: oneshot::Receiver<QueueResult<Outcome>>,
}

impl Future for Pending {
    type Output = QueueResult<Outcome>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|reply| reply.map_err(|_| QueueError::Closed).and_then(|result| result))
    }
}

fn spawn_lane<K, C>(
    key: K,
    codec: Arc<C>,
    slot: Arc<RwLock<Slot<C::Source>>>,
) -> QueueResult<mpsc::UnboundedSender<Job>>
where
    K: Debug + Send + 'static,
    C: Codec,
{
    let handle = Handle::try_current().map_err(|e| QueueError::NoRuntime(e.to_string()))?;
    let (tx, mut rx) = mpsc::unbounded_channel::<Job>();

    handle.spawn(async move {
        debug!(target_key = ?key, "lane started");
        // drains queued jobs after the sequencer drops its sender
        while let Some(Job { request, reply }) = rx.recv().await {
            debug!(target_key = ?key, operation = %request.operation, "job start");
            let result = run_job(&*codec, &slot, &request).await;
            match &result {
                Ok(outcome) => debug!(target_key = ?key, applied = outcome.is_applied(), "job done"),
                Err(err) => warn!(target_key = ?key, operation = %request.operation, error = %err, "job failed"),
            }
            let _ = reply.send(result);
        }
        debug!(target_key = ?key, "lane closed");
    });
    Ok(tx)
}

/// One decode → pass → encode round-trip.
async fn run_job<C: Codec>(
    codec: &C,
    slot: &RwLock<Slot<C::Source>>,
    request: &Request,
) -> QueueResult<Outcome> {
    let op = match Operation::resolve(request) {
        Ok(op) => op,
        Err(err) => {
            warn!(operation = %request.operation, error = %err, "request not resolved, source left unchanged");
            return Ok(Outcome::Skipped(err));
        }
    };
    let kind = op.kind();

    let (current, generation) = {
        let slot = slot.read();
        (slot.source.clone(), slot.generation)
    };
    let mut buffer = codec.decode(&current).await?;
    let buffer = tokio::task::spawn_blocking(move || {
        execute(&mut buffer, &op);
        buffer
    })
    .await
    .map_err(|e| QueueError::Join(e.to_string()))?;

    let encoded = codec.encode(buffer).await?;
    let mut slot = slot.write();
    if slot.generation != generation {
        return Err(QueueError::Superseded);
    }
    slot.source = encoded;
    Ok(Outcome::Applied(kind))
}
