//! Async id-list fetches.
//!
//! - Every request runs `MediaSource::list_media` on a tokio blocking task
//! - Results come back over a flume channel that the event loop polls
//! - Each pane has its own generation counter: a newer request supersedes
//!   older ones for the same pane only, stale results are dropped on poll

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use flume::{Receiver, Sender};
use parking_lot::RwLock;
use tokio::runtime::Handle;
use tracing::{debug, trace, warn};

use super::{FetchRequest, MediaSource};
use crate::error::FetchError;
use crate::models::{MediaId, Pane, PerPane};

/// A completed fetch, tagged with the generation it was issued under.
#[derive(Debug)]
pub struct FetchResult {
    pub request: FetchRequest,
    pub generation: u64,
    pub outcome: Result<Vec<MediaId>, FetchError>,
    pub elapsed: Duration,
}

impl FetchResult {
    pub fn pane(&self) -> Pane {
        self.request.pane
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Generations {
    issued: u64,
    delivered: u64,
}

pub struct FetchQueue {
    source: Arc<dyn MediaSource>,
    runtime: Handle,
    result_tx: Sender<FetchResult>,
    result_rx: Receiver<FetchResult>,
    generations: Arc<RwLock<PerPane<Generations>>>,
    in_flight: Arc<AtomicUsize>,
}

impl FetchQueue {
    pub fn new(source: Arc<dyn MediaSource>, runtime: Handle) -> Self {
        let (result_tx, result_rx) = flume::unbounded();
        Self {
            source,
            runtime,
            result_tx,
            result_rx,
            generations: Arc::new(RwLock::new(PerPane::default())),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Starts a fetch and returns its generation. Any earlier fetch for the
    /// same pane becomes stale; the other pane is untouched.
    pub fn request(&self, request: FetchRequest) -> u64 {
        let generation = {
            let mut generations = self.generations.write();
            let slot = generations.get_mut(request.pane);
            slot.issued += 1;
            slot.issued
        };

        debug!(
            pane = %request.pane,
            generation,
            directory = ?request.directory,
            filter = request.filter.as_str(),
            "Fetching media ids"
        );

        let source = Arc::clone(&self.source);
        let tx = self.result_tx.clone();
        let in_flight = Arc::clone(&self.in_flight);
        in_flight.fetch_add(1, Ordering::Relaxed);

        let runtime = self.runtime.clone();
        self.runtime.spawn(async move {
            let pane = request.pane;
            let started = Instant::now();
            let blocking_request = request.clone();
            let outcome = match runtime
                .spawn_blocking(move || source.list_media(&blocking_request))
                .await
            {
                Ok(outcome) => outcome,
                Err(e) => Err(FetchError::Join(e.to_string())),
            };

            let result = FetchResult {
                request,
                generation,
                outcome,
                elapsed: started.elapsed(),
            };
            if tx.send(result).is_err() {
                warn!(%pane, generation, "Fetch result receiver dropped");
            }
            in_flight.fetch_sub(1, Ordering::Relaxed);
        });

        generation
    }

    /// Current results, non-blocking. Stale generations are discarded.
    pub fn poll_results(&self) -> Vec<FetchResult> {
        let mut results = Vec::new();
        while let Ok(result) = self.result_rx.try_recv() {
            if self.accept(&result) {
                results.push(result);
            }
        }
        results
    }

    /// Waits up to `timeout` for the next current result.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchResult> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.result_rx.recv_deadline(deadline) {
                Ok(result) if self.accept(&result) => return Some(result),
                Ok(_) => continue,
                Err(_) => return None,
            }
        }
    }

    /// True while the latest fetch for `pane` has not been delivered.
    pub fn is_pending(&self, pane: Pane) -> bool {
        let generations = self.generations.read();
        let slot = generations.get(pane);
        slot.delivered < slot.issued
    }

    /// Number of fetch tasks still running, stale ones included.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    fn accept(&self, result: &FetchResult) -> bool {
        let mut generations = self.generations.write();
        let slot = generations.get_mut(result.pane());
        if result.generation != slot.issued {
            trace!(
                pane = %result.pane(),
                generation = result.generation,
                latest = slot.issued,
                "Dropping stale fetch result"
            );
            return false;
        }
        slot.delivered = result.generation;
        true
    }
}
