//! Trailing-edge debouncing with a single pending unit of work.
//!
//! A [`Debouncer`] is runtime-agnostic: its timer is a deadline that the owner checks by polling
//! ([`Debouncer::poll`] / [`Debouncer::poll_at`]) from its event loop. Work items receive a
//! mutable context `C` supplied at delivery time, so they can act on state owned by the caller
//! without shared ownership.
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use typo_core::Debouncer;
//!
//! let mut debouncer: Debouncer<usize, Vec<&str>> = Debouncer::new(Duration::from_millis(150));
//! let start = Instant::now();
//!
//! let first = debouncer.trigger_at(start, Duration::from_millis(150), |log| { log.push("a"); 1 });
//! let second = debouncer.trigger_at(start, Duration::from_millis(150), |log| { log.push("b"); 2 });
//!
//! let mut log = Vec::new();
//! assert!(debouncer.poll_at(start + Duration::from_millis(100), &mut log).is_none());
//! assert!(debouncer.poll_at(start + Duration::from_millis(150), &mut log).is_some());
//!
//! assert_eq!(log, vec!["b"]);
//! assert_eq!(second.take(), Some(2));
//! assert!(first.is_resolved());
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A deferred unit of work run against a caller-provided context.
pub type WorkItem<T, C> = Box<dyn FnOnce(&mut C) -> T>;

/// Debouncer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// No pending work.
    Idle,
    /// A deadline is set; the most recently triggered work item runs when it passes.
    Armed,
    /// The work item is executing.
    ///
    /// Delivery runs the work item synchronously inside [`Debouncer::poll_at`] or
    /// [`Debouncer::force_deliver`], so this state is transient: it is never observed through
    /// [`Debouncer::state`] once those calls return.
    Running,
}

enum Outcome<T> {
    Pending,
    Resolved(Option<T>),
    Cancelled,
}

/// Shared result slot for one debounce window.
///
/// Every trigger during the same window returns a clone of the same handle. It resolves with the
/// result of the last triggered work item, or is marked cancelled by [`Debouncer::cancel`].
pub struct DebounceHandle<T> {
    slot: Rc<RefCell<Outcome<T>>>,
}

impl<T> Clone for DebounceHandle<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T> fmt::Debug for DebounceHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.slot.borrow() {
            Outcome::Pending => "pending",
            Outcome::Resolved(Some(_)) => "resolved",
            Outcome::Resolved(None) => "resolved (taken)",
            Outcome::Cancelled => "cancelled",
        };
        f.debug_struct("DebounceHandle")
            .field("state", &state)
            .finish()
    }
}

impl<T> DebounceHandle<T> {
    fn new() -> Self {
        Self {
            slot: Rc::new(RefCell::new(Outcome::Pending)),
        }
    }

    /// Returns `true` while the work item has not run yet.
    pub fn is_pending(&self) -> bool {
        matches!(&*self.slot.borrow(), Outcome::Pending)
    }

    /// Returns `true` once the work item has run.
    pub fn is_resolved(&self) -> bool {
        matches!(&*self.slot.borrow(), Outcome::Resolved(_))
    }

    /// Returns `true` if the window was cancelled before the work item ran.
    pub fn is_cancelled(&self) -> bool {
        matches!(&*self.slot.borrow(), Outcome::Cancelled)
    }

    /// Take the work item's result.
    ///
    /// The result is shared by all clones of the handle; only the first call returns it.
    pub fn take(&self) -> Option<T> {
        match &mut *self.slot.borrow_mut() {
            Outcome::Resolved(value) => value.take(),
            _ => None,
        }
    }

    fn resolve(&self, value: T) {
        *self.slot.borrow_mut() = Outcome::Resolved(Some(value));
    }

    fn cancel(&self) {
        *self.slot.borrow_mut() = Outcome::Cancelled;
    }
}

/// Coalesces repeated triggers into one delayed execution of the most recent work item.
pub struct Debouncer<T, C = ()> {
    default_delay: Duration,
    state: DebounceState,
    deadline: Option<Instant>,
    task: Option<WorkItem<T, C>>,
    pending: Option<DebounceHandle<T>>,
}

impl<T, C> fmt::Debug for Debouncer<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("default_delay", &self.default_delay)
            .field("state", &self.state)
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl<T, C> Debouncer<T, C> {
    /// Create an idle debouncer.
    pub fn new(default_delay: Duration) -> Self {
        Self {
            default_delay,
            state: DebounceState::Idle,
            deadline: None,
            task: None,
            pending: None,
        }
    }

    /// Delay used by [`Debouncer::trigger`].
    pub fn default_delay(&self) -> Duration {
        self.default_delay
    }

    /// Current state.
    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Returns `true` iff a deadline is currently counting down.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending work item becomes due, if armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Schedule `task` to run [`Debouncer::default_delay`] from now.
    pub fn trigger(&mut self, task: impl FnOnce(&mut C) -> T + 'static) -> DebounceHandle<T> {
        self.trigger_at(Instant::now(), self.default_delay, task)
    }

    /// Schedule `task` to run `delay` from now.
    pub fn trigger_with_delay(
        &mut self,
        delay: Duration,
        task: impl FnOnce(&mut C) -> T + 'static,
    ) -> DebounceHandle<T> {
        self.trigger_at(Instant::now(), delay, task)
    }

    /// Schedule `task` to run `delay` after `now`.
    ///
    /// If a window is already pending, `task` replaces its work item, the deadline restarts, and
    /// the existing handle is returned.
    pub fn trigger_at(
        &mut self,
        now: Instant,
        delay: Duration,
        task: impl FnOnce(&mut C) -> T + 'static,
    ) -> DebounceHandle<T> {
        self.task = Some(Box::new(task));
        self.deadline = Some(now + delay);
        self.state = DebounceState::Armed;
        self.pending.get_or_insert_with(DebounceHandle::new).clone()
    }

    /// Run the pending work item if its deadline has passed.
    pub fn poll(&mut self, context: &mut C) -> Option<DebounceHandle<T>> {
        self.poll_at(Instant::now(), context)
    }

    /// Run the pending work item if its deadline is at or before `now`.
    ///
    /// Returns the resolved handle when the work item ran.
    pub fn poll_at(&mut self, now: Instant, context: &mut C) -> Option<DebounceHandle<T>> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deliver(context)
    }

    /// Run the pending work item immediately, ignoring its deadline.
    ///
    /// Returns `None` when idle.
    pub fn force_deliver(&mut self, context: &mut C) -> Option<DebounceHandle<T>> {
        self.pending.as_ref()?;
        self.deliver(context)
    }

    /// Discard the pending work item without running it.
    ///
    /// Outstanding handles are marked cancelled.
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.task = None;
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
        self.state = DebounceState::Idle;
    }

    fn deliver(&mut self, context: &mut C) -> Option<DebounceHandle<T>> {
        self.deadline = None;
        let (Some(handle), Some(task)) = (self.pending.take(), self.task.take()) else {
            self.state = DebounceState::Idle;
            return None;
        };

        self.state = DebounceState::Running;
        let value = task(context);
        self.state = DebounceState::Idle;

        handle.resolve(value);
        Some(handle)
    }
}
