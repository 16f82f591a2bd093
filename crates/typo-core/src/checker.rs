//! Document checker: ties the rule engine, the check scheduler, and a host together.
//!
//! The host forwards editor events as method calls:
//!
//! - [`DocumentChecker::on_active_editor_changed`]: records the active document and checks it
//! - [`DocumentChecker::on_document_saved`]: re-checks the active document
//! - [`DocumentChecker::on_document_closed`]: drops the document's diagnostics and pending check
//!
//! Checks are debounced per document and run from [`DocumentChecker::tick`], which the host calls
//! from its event loop (see [`DocumentChecker::next_deadline`]).

use crate::debounce::DebounceHandle;
use crate::diagnostics::{Diagnostic, DiagnosticStore, FixSuggestion};
use crate::engine;
use crate::error::{CheckError, FixError, StateError};
use crate::grammar::GrammarRule;
use crate::host::{DocumentId, Host};
use crate::scheduler::{CheckScheduler, DEFAULT_CHECK_DELAY};
use std::time::{Duration, Instant};

/// Number of diagnostics published by a check, or why it failed.
pub type CheckOutcome = Result<usize, CheckError>;

/// Result of one scheduled check.
#[derive(Debug)]
pub struct CheckReport {
    /// The checked document.
    pub document: DocumentId,
    /// Diagnostic count, or the error that aborted the check.
    pub outcome: CheckOutcome,
}

struct CheckerState<H> {
    host: H,
    rules: Vec<GrammarRule>,
    store: DiagnosticStore,
}

impl<H: Host> CheckerState<H> {
    fn run_check(&mut self, document: &DocumentId) -> CheckOutcome {
        let Some(text) = self.host.text(document) else {
            return Err(StateError::DocumentNotOpen(document.clone()).into());
        };

        let diagnostics = engine::check(&text, &self.rules)?;
        let count = diagnostics.len();

        self.host.publish(document, &diagnostics);
        self.store.replace(document.clone(), diagnostics);
        log::info!("checked {document}: {count} diagnostic(s)");
        Ok(count)
    }
}

/// Runs grammar checks for the documents of one host.
pub struct DocumentChecker<H> {
    state: CheckerState<H>,
    scheduler: CheckScheduler<CheckOutcome, CheckerState<H>>,
    active: bool,
    active_document: Option<DocumentId>,
}

impl<H: Host + 'static> DocumentChecker<H> {
    /// Create an inactive checker with the default debounce delay.
    pub fn new(host: H) -> Self {
        Self::with_delay(host, DEFAULT_CHECK_DELAY)
    }

    /// Create an inactive checker with a custom debounce delay.
    pub fn with_delay(host: H, delay: Duration) -> Self {
        Self {
            state: CheckerState {
                host,
                rules: Vec::new(),
                store: DiagnosticStore::new(),
            },
            scheduler: CheckScheduler::with_delay(delay),
            active: false,
            active_document: None,
        }
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.state.host
    }

    /// The host, mutably (e.g. to edit document text).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.state.host
    }

    /// Consume the checker and return its host.
    pub fn into_host(self) -> H {
        self.state.host
    }

    /// Change the debounce delay for checks scheduled from now on.
    pub fn set_delay(&mut self, delay: Duration) {
        self.scheduler.set_delay(delay);
    }

    /// Start checking with `rules`.
    pub fn activate(&mut self, rules: Vec<GrammarRule>) {
        log::info!("typo checker activated with {} rule(s)", rules.len());
        self.state.rules = rules;
        self.active = true;
    }

    /// Stop checking: cancel pending checks and clear every published diagnostic.
    pub fn deactivate(&mut self) {
        self.scheduler.cancel_all();
        let documents: Vec<DocumentId> = self.state.store.documents().cloned().collect();
        for document in &documents {
            self.state.host.clear(document);
        }
        self.state.store.clear();
        self.state.rules.clear();
        self.active = false;
        log::info!("typo checker deactivated");
    }

    /// Returns `true` between [`DocumentChecker::activate`] and [`DocumentChecker::deactivate`].
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Rules in use.
    pub fn rules(&self) -> &[GrammarRule] {
        &self.state.rules
    }

    /// The document last reported as active by the host.
    pub fn active_document(&self) -> Option<&DocumentId> {
        self.active_document.as_ref()
    }

    /// Diagnostics recorded for `document`.
    pub fn diagnostics(&self, document: &DocumentId) -> &[Diagnostic] {
        self.state.store.get(document)
    }

    /// The active editor switched to `document`.
    pub fn on_active_editor_changed(&mut self, document: DocumentId) {
        self.active_document = Some(document.clone());
        if self.active {
            self.schedule(Instant::now(), document);
        }
    }

    /// `document` was saved; only the active document is re-checked.
    pub fn on_document_saved(&mut self, document: &DocumentId) {
        if !self.active || self.active_document.as_ref() != Some(document) {
            return;
        }
        self.schedule(Instant::now(), document.clone());
    }

    /// `document` was closed: cancel its check and drop its diagnostics.
    pub fn on_document_closed(&mut self, document: &DocumentId) {
        self.scheduler.cancel(document);
        self.state.store.remove(document);
        self.state.host.clear(document);
        if self.active_document.as_ref() == Some(document) {
            self.active_document = None;
        }
    }

    /// Schedule a debounced check of `document`.
    pub fn check_document(&mut self, document: DocumentId) -> Result<(), StateError> {
        self.check_document_at(Instant::now(), document)
    }

    /// Schedule a debounced check of `document`, starting the window at `now`.
    pub fn check_document_at(
        &mut self,
        now: Instant,
        document: DocumentId,
    ) -> Result<(), StateError> {
        if !self.active {
            return Err(StateError::NotEnabled);
        }
        self.schedule(now, document);
        Ok(())
    }

    /// Schedule a debounced check of the active document.
    pub fn check_active_document(&mut self) -> Result<(), StateError> {
        let document = self
            .active_document
            .clone()
            .ok_or(StateError::NoActiveDocument)?;
        self.check_document(document)
    }

    fn schedule(&mut self, now: Instant, document: DocumentId) {
        let target = document.clone();
        self.scheduler
            .schedule_check_at(now, document, move |state: &mut CheckerState<H>| {
                state.run_check(&target)
            });
    }

    /// Returns `true` if a check of `document` is waiting.
    pub fn is_scheduled(&self, document: &DocumentId) -> bool {
        self.scheduler.is_scheduled(document)
    }

    /// When the next waiting check becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Run the checks whose debounce window has elapsed.
    pub fn tick(&mut self) -> Vec<CheckReport> {
        self.tick_at(Instant::now())
    }

    /// Run the checks whose deadline is at or before `now`.
    pub fn tick_at(&mut self, now: Instant) -> Vec<CheckReport> {
        let completed = self.scheduler.tick_at(now, &mut self.state);
        Self::reports(completed)
    }

    /// Run every waiting check immediately.
    pub fn flush(&mut self) -> Vec<CheckReport> {
        let completed = self.scheduler.flush(&mut self.state);
        Self::reports(completed)
    }

    fn reports(completed: Vec<(DocumentId, DebounceHandle<CheckOutcome>)>) -> Vec<CheckReport> {
        completed
            .into_iter()
            .filter_map(|(document, handle)| {
                let outcome = handle.take()?;
                if let Err(err) = &outcome {
                    log::warn!("check failed for {document}: {err}");
                }
                Some(CheckReport { document, outcome })
            })
            .collect()
    }

    /// Build the one-click fix for `diagnostic`, if it carries a suggestion.
    pub fn fix_suggestion(
        &self,
        document: &DocumentId,
        diagnostic: &Diagnostic,
    ) -> Option<FixSuggestion> {
        let suggestion_text = diagnostic.suggestion()?.to_string();
        let original_text = self.state.host.text_in_range(document, diagnostic.range)?;
        Some(FixSuggestion {
            range: diagnostic.range,
            original_text,
            suggestion_text,
        })
    }

    /// Replace the text of `diagnostic` with its suggestion.
    ///
    /// The diagnostic is removed from the record (and the remaining list re-published) only if
    /// the host accepts the edit.
    pub fn apply_fix(
        &mut self,
        document: &DocumentId,
        diagnostic: &Diagnostic,
    ) -> Result<(), FixError> {
        if !self.active {
            return Err(StateError::NotEnabled.into());
        }
        let suggestion = diagnostic.suggestion().ok_or(FixError::NoSuggestion)?;
        if !self.state.store.get(document).contains(diagnostic) {
            return Err(StateError::DiagnosticNotFound.into());
        }

        self.state
            .host
            .replace_range(document, diagnostic.range, suggestion)
            .map_err(|reason| {
                log::warn!("fix rejected for {document}: {reason}");
                FixError::EditRejected {
                    document: document.clone(),
                    reason,
                }
            })?;

        self.state.store.remove_diagnostic(document, diagnostic);
        self.state
            .host
            .publish(document, self.state.store.get(document));
        Ok(())
    }
}
