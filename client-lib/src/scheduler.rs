//! Debounced, per-board save scheduling.
//!
//! Rapid edits re-arm a single timer; when it expires the most recent
//! snapshot is sent. At most one save per board is on the wire at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use anyhow::Result;
use log::*;

use board_protocol::model::snapshot::SyncRequest;

use crate::extractor::{extract_snapshot, EditorEdge, EditorNode};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

/// Sends a snapshot to the synchronization endpoint.
#[async_trait::async_trait]
pub trait SyncTransport: Send + Sync {
    async fn sync_board(
        &self,
        board_id: &str,
        snapshot: &SyncRequest,
    ) -> Result<()>;
}

/// What happens to a save requested while another one is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Discard the request.
    Drop,
    /// Keep the newest request and send it once the in-flight save ends.
    #[default]
    Requeue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub debounce: Duration,
    pub overlap_policy: OverlapPolicy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            debounce: DEFAULT_DEBOUNCE,
            overlap_policy: OverlapPolicy::default(),
        }
    }
}

#[derive(Default)]
struct SchedulerState {
    timer: Option<tokio::task::JoinHandle<()>>,
    pending: Option<SyncRequest>,
    queued: Option<SyncRequest>,
}

/// Clears the in-flight flag when dropped, whether the save finished,
/// failed or was cancelled.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<InFlightGuard<'a>> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

struct Inner<T: SyncTransport> {
    transport: T,
    board_id: Option<String>,
    config: SchedulerConfig,
    in_flight: AtomicBool,
    state: tokio::sync::Mutex<SchedulerState>,
    idle: tokio::sync::Notify,
}

impl<T: SyncTransport> Inner<T> {
    /// Takes the in-flight slot for `snapshot` or applies the overlap
    /// policy. Called with the state lock held: `in_flight` only changes
    /// under that lock, so a request queued here is always seen by the save
    /// that is finishing, and `flush` never observes a taken snapshot
    /// without a save in flight.
    fn claim(
        &self,
        state: &mut SchedulerState,
        board_id: &str,
        snapshot: SyncRequest,
    ) -> Option<(InFlightGuard<'_>, SyncRequest)> {
        if let Some(guard) = InFlightGuard::acquire(&self.in_flight) {
            return Some((guard, snapshot));
        }

        match self.config.overlap_policy {
            OverlapPolicy::Drop => {
                warn!(
                    "board {} save dropped, another save is in flight",
                    board_id
                );
            }
            OverlapPolicy::Requeue => {
                debug!("board {} save queued", board_id);
                state.queued = Some(snapshot);
            }
        }

        None
    }

    async fn run(
        &self,
        board_id: &str,
        guard: InFlightGuard<'_>,
        snapshot: SyncRequest,
    ) {
        let mut snapshot = snapshot;

        loop {
            debug!(
                "saving board {} with {} nodes and {} edges",
                board_id,
                snapshot.nodes.len(),
                snapshot.edges.len()
            );

            if let Err(err) = self.transport.sync_board(board_id, &snapshot).await
            {
                error!("board {} sync failed: {:?}", board_id, err);
            }

            let mut state = self.state.lock().await;

            match state.queued.take() {
                Some(next) => snapshot = next,
                None => {
                    drop(guard);
                    drop(state);
                    self.idle.notify_waiters();
                    return;
                }
            }
        }
    }

    async fn is_idle(&self) -> bool {
        let state = self.state.lock().await;

        !self.in_flight.load(Ordering::Acquire) && state.queued.is_none()
    }
}

impl<T: SyncTransport> Drop for Inner<T> {
    fn drop(&mut self) {
        if let Some(timer) = self.state.get_mut().timer.take() {
            timer.abort();
        }
    }
}

/// Save scheduler bound to one board. Dropping it cancels a pending timer;
/// a save already on the wire runs to completion.
pub struct SyncScheduler<T: SyncTransport + 'static> {
    inner: Arc<Inner<T>>,
}

impl<T: SyncTransport + 'static> SyncScheduler<T> {
    pub fn new(
        transport: T,
        board_id: Option<String>,
        config: SchedulerConfig,
    ) -> Self {
        SyncScheduler {
            inner: Arc::new(Inner {
                transport,
                board_id,
                config,
                in_flight: AtomicBool::new(false),
                state: tokio::sync::Mutex::new(SchedulerState::default()),
                idle: tokio::sync::Notify::new(),
            }),
        }
    }

    pub fn board_id(&self) -> Option<&str> {
        self.inner.board_id.as_deref()
    }

    /// Re-arms the debounce timer with the current graph. Only the graph
    /// passed to the last call before the timer expires is saved.
    pub async fn schedule_save(&self, nodes: &[EditorNode], edges: &[EditorEdge]) {
        let Some(board_id) = self.inner.board_id.clone() else {
            return;
        };

        let snapshot = extract_snapshot(nodes, edges);

        let mut state = self.inner.state.lock().await;

        if let Some(timer) = state.timer.take() {
            timer.abort();
        }

        state.pending = Some(snapshot);

        let weak: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        let debounce = self.inner.config.debounce;

        debug!("board {} save scheduled in {:?}", board_id, debounce);

        state.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            let Some(inner) = weak.upgrade() else {
                return;
            };

            let claimed = {
                let mut state = inner.state.lock().await;
                state.timer = None;

                match state.pending.take() {
                    Some(snapshot) => inner.claim(&mut state, &board_id, snapshot),
                    None => None,
                }
            };

            if let Some((guard, snapshot)) = claimed {
                inner.run(&board_id, guard, snapshot).await;
            }
        }));
    }

    /// Saves immediately unless a save is already in flight, in which case
    /// the overlap policy decides. A debounced snapshot that is still
    /// waiting is older than this one and is discarded.
    pub async fn save_now(&self, nodes: &[EditorNode], edges: &[EditorEdge]) {
        let Some(board_id) = self.inner.board_id.as_deref() else {
            return;
        };

        let snapshot = extract_snapshot(nodes, edges);

        let claimed = {
            let mut state = self.inner.state.lock().await;

            if let Some(timer) = state.timer.take() {
                timer.abort();
            }

            state.pending = None;

            self.inner.claim(&mut state, board_id, snapshot)
        };

        if let Some((guard, snapshot)) = claimed {
            self.inner.run(board_id, guard, snapshot).await;
        }
    }

    /// Fires a pending timer right away and waits until no save is in
    /// flight or queued.
    pub async fn flush(&self) {
        let Some(board_id) = self.inner.board_id.as_deref() else {
            return;
        };

        let claimed = {
            let mut state = self.inner.state.lock().await;

            if let Some(timer) = state.timer.take() {
                timer.abort();
            }

            match state.pending.take() {
                Some(snapshot) => self.inner.claim(&mut state, board_id, snapshot),
                None => None,
            }
        };

        if let Some((guard, snapshot)) = claimed {
            self.inner.run(board_id, guard, snapshot).await;
        }

        loop {
            let notified = self.inner.idle.notified();

            if self.inner.is_idle().await {
                return;
            }

            notified.await;
        }
    }

    pub fn is_saving(&self) -> bool {
        self.inner.in_flight.load(Ordering::Acquire)
    }

    pub async fn has_pending(&self) -> bool {
        let state = self.inner.state.lock().await;

        state.pending.is_some() || state.queued.is_some()
    }
}
