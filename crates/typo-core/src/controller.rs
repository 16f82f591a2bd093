//! User-facing commands: enable, disable, and check the active document.
//!
//! Each command returns a short notice on success; failures carry their message in `Display`.

use crate::checker::DocumentChecker;
use crate::config::{CheckerSettings, load_grammar};
use crate::error::{ConfigError, StateError};
use crate::host::{DocumentId, Host};
use thiserror::Error;

/// Status bar text shown while checking is enabled.
pub const STATUS_ENABLED: &str = "STC Enabled";

/// Notice returned by a successful [`Controller::enable`].
pub const NOTICE_ENABLED: &str = "Typo checker has started.";

/// Notice returned by a successful [`Controller::disable`].
pub const NOTICE_DISABLED: &str = "Typo checker has stopped.";

/// Notice returned by a successful [`Controller::check_active_document`].
pub const NOTICE_CHECKED: &str = "Typo checker has checked the active document.";

/// Errors returned by [`Controller`] commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    /// The grammar could not be loaded.
    Config(#[from] ConfigError),

    #[error(transparent)]
    /// The command is not valid in the current state.
    State(#[from] StateError),
}

/// Owns a [`DocumentChecker`] and exposes the enable / disable / check commands.
pub struct Controller<H> {
    checker: DocumentChecker<H>,
    settings: CheckerSettings,
}

impl<H: Host + 'static> Controller<H> {
    /// Create a disabled controller.
    pub fn new(host: H, settings: CheckerSettings) -> Self {
        Self {
            checker: DocumentChecker::with_delay(host, settings.delay()),
            settings,
        }
    }

    /// The underlying checker (for event forwarding, ticks and fixes).
    pub fn checker(&self) -> &DocumentChecker<H> {
        &self.checker
    }

    /// The underlying checker, mutably.
    pub fn checker_mut(&mut self) -> &mut DocumentChecker<H> {
        &mut self.checker
    }

    /// Current settings.
    pub fn settings(&self) -> &CheckerSettings {
        &self.settings
    }

    /// Replace the settings; takes effect on the next [`Controller::enable`].
    pub fn set_settings(&mut self, settings: CheckerSettings) {
        self.settings = settings;
    }

    /// Returns `true` while checking is enabled.
    pub fn is_enabled(&self) -> bool {
        self.checker.is_active()
    }

    /// Status bar text, or `None` when disabled.
    pub fn status_text(&self) -> Option<&'static str> {
        self.is_enabled().then_some(STATUS_ENABLED)
    }

    /// Load the grammar, start checking, and check the active document (if any).
    pub fn enable(&mut self) -> Result<&'static str, CommandError> {
        if self.is_enabled() {
            return Err(StateError::AlreadyEnabled.into());
        }

        let rules = load_grammar(&self.settings)?;
        self.checker.set_delay(self.settings.delay());
        self.checker.activate(rules);
        match self.checker.check_active_document() {
            Ok(()) | Err(StateError::NoActiveDocument) => Ok(NOTICE_ENABLED),
            Err(err) => Err(err.into()),
        }
    }

    /// Stop checking and clear all diagnostics.
    pub fn disable(&mut self) -> Result<&'static str, CommandError> {
        if !self.is_enabled() {
            return Err(StateError::NotEnabled.into());
        }
        self.checker.deactivate();
        Ok(NOTICE_DISABLED)
    }

    /// Schedule a check of the active document.
    pub fn check_active_document(&mut self) -> Result<&'static str, CommandError> {
        if !self.is_enabled() {
            return Err(StateError::NotEnabled.into());
        }
        self.checker.check_active_document()?;
        Ok(NOTICE_CHECKED)
    }

    /// Forward "active editor changed".
    pub fn on_active_editor_changed(&mut self, document: DocumentId) {
        self.checker.on_active_editor_changed(document);
    }

    /// Forward "document saved".
    pub fn on_document_saved(&mut self, document: &DocumentId) {
        self.checker.on_document_saved(document);
    }

    /// Forward "document closed".
    pub fn on_document_closed(&mut self, document: &DocumentId) {
        self.checker.on_document_closed(document);
    }
}
