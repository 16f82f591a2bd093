//! Per-document check scheduling.
//!
//! Each document has at most one [`Debouncer`]. Scheduling a check for a document that is
//! already waiting restarts its window and replaces its work item, so bursts of edits and saves
//! collapse into a single check. Once a check has run the document's entry is removed, so idle
//! documents hold no scheduler state.

use crate::debounce::{DebounceHandle, Debouncer};
use crate::host::DocumentId;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::{Duration, Instant};

/// Default quiet period before a scheduled check runs.
pub const DEFAULT_CHECK_DELAY: Duration = Duration::from_millis(150);

/// Maps each document to its pending check.
pub struct CheckScheduler<T, C = ()> {
    delay: Duration,
    pending: HashMap<DocumentId, Debouncer<T, C>>,
}

impl<T, C> Default for CheckScheduler<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> std::fmt::Debug for CheckScheduler<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckScheduler")
            .field("delay", &self.delay)
            .field("pending", &self.pending)
            .finish()
    }
}

impl<T, C> CheckScheduler<T, C> {
    /// Create a scheduler using [`DEFAULT_CHECK_DELAY`].
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_CHECK_DELAY)
    }

    /// Create a scheduler with a custom quiet period.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
        }
    }

    /// The quiet period applied to every scheduled check.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the quiet period for checks scheduled from now on.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Schedule `run_check` for `document`, starting the window now.
    pub fn schedule_check(
        &mut self,
        document: DocumentId,
        run_check: impl FnOnce(&mut C) -> T + 'static,
    ) -> DebounceHandle<T> {
        self.schedule_check_at(Instant::now(), document, run_check)
    }

    /// Schedule `run_check` for `document`, starting the window at `now`.
    pub fn schedule_check_at(
        &mut self,
        now: Instant,
        document: DocumentId,
        run_check: impl FnOnce(&mut C) -> T + 'static,
    ) -> DebounceHandle<T> {
        let delay = self.delay;
        let debouncer = match self.pending.entry(document) {
            Entry::Occupied(entry) => {
                log::debug!("restarting check window for {}", entry.key());
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                log::debug!("scheduling check for {}", entry.key());
                entry.insert(Debouncer::new(delay))
            }
        };
        debouncer.trigger_at(now, delay, run_check)
    }

    /// Returns `true` if a check for `document` is waiting.
    pub fn is_scheduled(&self, document: &DocumentId) -> bool {
        self.pending
            .get(document)
            .is_some_and(|debouncer| debouncer.is_armed())
    }

    /// Number of documents with a waiting check.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if no check is waiting.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// The earliest deadline among waiting checks.
    ///
    /// Hosts can sleep until then before calling [`CheckScheduler::tick`].
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().filter_map(Debouncer::deadline).min()
    }

    /// Run every check whose window has elapsed.
    pub fn tick(&mut self, context: &mut C) -> Vec<(DocumentId, DebounceHandle<T>)> {
        self.tick_at(Instant::now(), context)
    }

    /// Run every check whose deadline is at or before `now`, earliest first.
    ///
    /// Returns the resolved handle of each check that ran; their entries are removed.
    pub fn tick_at(
        &mut self,
        now: Instant,
        context: &mut C,
    ) -> Vec<(DocumentId, DebounceHandle<T>)> {
        let mut due: Vec<(Instant, DocumentId)> = self
            .pending
            .iter()
            .filter_map(|(document, debouncer)| {
                debouncer
                    .deadline()
                    .filter(|deadline| *deadline <= now)
                    .map(|deadline| (deadline, document.clone()))
            })
            .collect();
        due.sort();

        let mut completed = Vec::with_capacity(due.len());
        for (_, document) in due {
            let Some(mut debouncer) = self.pending.remove(&document) else {
                continue;
            };
            if let Some(handle) = debouncer.poll_at(now, context) {
                log::debug!("ran scheduled check for {document}");
                completed.push((document, handle));
            }
        }
        completed
    }

    /// Run every waiting check immediately, in document id order.
    pub fn flush(&mut self, context: &mut C) -> Vec<(DocumentId, DebounceHandle<T>)> {
        let mut documents: Vec<DocumentId> = self.pending.keys().cloned().collect();
        documents.sort();

        let mut completed = Vec::with_capacity(documents.len());
        for document in documents {
            let Some(mut debouncer) = self.pending.remove(&document) else {
                continue;
            };
            if let Some(handle) = debouncer.force_deliver(context) {
                completed.push((document, handle));
            }
        }
        completed
    }

    /// Cancel the waiting check for `document`.
    ///
    /// Returns `false` if none was waiting.
    pub fn cancel(&mut self, document: &DocumentId) -> bool {
        let Some(mut debouncer) = self.pending.remove(document) else {
            return false;
        };
        log::debug!("cancelled scheduled check for {document}");
        debouncer.cancel();
        true
    }

    /// Cancel every waiting check.
    pub fn cancel_all(&mut self) {
        for (_, mut debouncer) in self.pending.drain() {
            debouncer.cancel();
        }
    }
}
