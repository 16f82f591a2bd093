#![warn(missing_docs)]
//! Typo Core - rule-driven typo detection for editor documents
//!
//! # Overview
//!
//! `typo-core` checks document text against user-authored grammar rules and reports matches as
//! diagnostics with optional fix suggestions. It is headless: a host editor supplies text,
//! receives diagnostics, and applies edits through the traits in [`host`].
//!
//! A rule either flags every match of a regular expression ([`CheckMode::CompleteMatch`]), or
//! flags matches that are missing a companion pattern on one side
//! ([`CheckMode::LeftIncomplete`], [`CheckMode::RightIncomplete`]).
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Controller (enable / disable / check)      │  ← Commands
//! ├─────────────────────────────────────────────┤
//! │  DocumentChecker (events, fixes, records)   │  ← Host integration
//! ├─────────────────────────────────────────────┤
//! │  CheckScheduler + Debouncer                 │  ← Per-document debounce
//! ├─────────────────────────────────────────────┤
//! │  Rule engine                                │  ← Diagnostics
//! ├─────────────────────────────────────────────┤
//! │  Search (find_all / find_incomplete)        │  ← Match positions
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use typo_core::{GrammarRule, RuleSeverity, check};
//!
//! let rules = vec![GrammarRule::complete("teh", RuleSeverity::Warn, "Typo", "the")];
//! let diagnostics = check("I saw teh dog", &rules).unwrap();
//!
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!((diagnostics[0].range.start, diagnostics[0].range.end), (6, 9));
//! assert_eq!(diagnostics[0].suggestion(), Some("the"));
//! ```
//!
//! ## Driving checks from a host
//!
//! ```rust
//! use typo_core::{DocumentChecker, DocumentId, GrammarRule, MemoryHost, RuleSeverity};
//!
//! let mut host = MemoryHost::new();
//! host.open("file:///notes.md", "teh cat");
//!
//! let mut checker = DocumentChecker::new(host);
//! checker.activate(vec![GrammarRule::complete("teh", RuleSeverity::Warn, "Typo", "the")]);
//!
//! let doc = DocumentId::new("file:///notes.md");
//! checker.on_active_editor_changed(doc.clone());
//! checker.flush();
//!
//! let diagnostic = checker.diagnostics(&doc)[0].clone();
//! checker.apply_fix(&doc, &diagnostic).unwrap();
//! assert_eq!(checker.host().published(&doc).map(<[_]>::len), Some(0));
//! ```
//!
//! # Offsets
//!
//! All spans are half-open character offsets (Unicode scalar values), not byte offsets.

pub mod checker;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod host;
pub mod line_index;
pub mod memory;
pub mod scheduler;
pub mod search;

pub use checker::{CheckOutcome, CheckReport, DocumentChecker};
pub use config::{CheckerSettings, load_grammar, load_grammar_file, load_settings};
pub use controller::{
    CommandError, Controller, NOTICE_CHECKED, NOTICE_DISABLED, NOTICE_ENABLED, STATUS_ENABLED,
};
pub use debounce::{DebounceHandle, DebounceState, Debouncer, WorkItem};
pub use diagnostics::{
    Diagnostic, DiagnosticRange, DiagnosticSeverity, DiagnosticStore, FixSuggestion,
};
pub use engine::{check, strip_comments};
pub use error::{CheckError, ConfigError, FixError, PatternError, StateError};
pub use grammar::{CheckMode, GrammarRule, RuleSeverity, parse_grammar};
pub use host::{DiagnosticSink, DocumentId, DocumentProvider, EditApplier, Host, TextPosition};
pub use line_index::LineIndex;
pub use memory::MemoryHost;
pub use scheduler::{CheckScheduler, DEFAULT_CHECK_DELAY};
pub use search::{MatchSpan, Side, find_all, find_incomplete};
