use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use typo_core::{
    CheckError, CheckerSettings, Controller, Diagnostic, DocumentId, DocumentProvider, MemoryHost,
    load_settings, strip_comments,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Check files against typo grammar rules", long_about = None)]
struct Args {
    /// Files to check
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// JSON settings file ({"grammar": "...", "delay_ms": 150})
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Grammar file (overrides the settings file)
    #[arg(short, long, value_name = "FILE")]
    grammar: Option<PathBuf>,

    /// Debounce delay in milliseconds (overrides the settings file)
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Apply every suggestion and write the files back
    #[arg(long, default_value_t = false)]
    fix: bool,
}

fn settings_from(args: &Args) -> Result<CheckerSettings> {
    let mut settings = match &args.settings {
        Some(path) => load_settings(path)?,
        None => CheckerSettings::default(),
    };
    if let Some(grammar) = &args.grammar {
        settings.grammar = Some(grammar.clone());
    }
    if let Some(delay_ms) = args.delay_ms {
        settings.delay_ms = delay_ms;
    }
    Ok(settings)
}

fn print_diagnostics(
    path: &str,
    host: &MemoryHost,
    document: &DocumentId,
    diagnostics: &[Diagnostic],
) {
    for diagnostic in diagnostics {
        let position = host
            .position_at(document, diagnostic.range.start)
            .unwrap_or_default();
        let message = diagnostic.message.lines().next().unwrap_or_default();
        match diagnostic.suggestion() {
            Some(suggestion) => println!(
                "{path}:{}:{}: {}: {message} (suggestion: {suggestion})",
                position.line + 1,
                position.column + 1,
                diagnostic.severity
            ),
            None => println!(
                "{path}:{}:{}: {}: {message}",
                position.line + 1,
                position.column + 1,
                diagnostic.severity
            ),
        }
    }
}

/// Apply suggestions from the end of the document backwards, skipping overlapping ranges.
fn apply_fixes(controller: &mut Controller<MemoryHost>, document: &DocumentId) -> usize {
    let checker = controller.checker_mut();
    let mut candidates: Vec<Diagnostic> = checker
        .diagnostics(document)
        .iter()
        .filter(|diagnostic| diagnostic.suggestion().is_some())
        .cloned()
        .collect();
    candidates.sort_by(|a, b| b.range.start.cmp(&a.range.start));

    let mut applied = 0;
    let mut limit = usize::MAX;
    for diagnostic in candidates {
        if diagnostic.range.end > limit {
            log::debug!("skipping overlapping fix at {}", diagnostic.range.start);
            continue;
        }
        match checker.apply_fix(document, &diagnostic) {
            Ok(()) => {
                limit = diagnostic.range.start;
                applied += 1;
            }
            Err(err) => log::warn!("{err}"),
        }
    }
    applied
}

/// Run every waiting check, failing on the first check that could not complete.
fn run_checks(controller: &mut Controller<MemoryHost>) -> Result<()> {
    for report in controller.checker_mut().flush() {
        match report.outcome {
            Ok(_) => {}
            Err(CheckError::Pattern(err)) => bail!("grammar error: {err}"),
            Err(err) => bail!("failed to check {}: {err}", report.document),
        }
    }
    Ok(())
}

/// Apply suggestions to `document` and re-check it, so remaining diagnostics refer to the
/// fixed text.
fn fix_document(
    controller: &mut Controller<MemoryHost>,
    document: &DocumentId,
) -> Result<usize> {
    let applied = apply_fixes(controller, document);
    if applied > 0 {
        controller.checker_mut().check_document(document.clone())?;
        run_checks(controller)?;
    }
    Ok(applied)
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default())
        .format_timestamp(None)
        .try_init()
        .ok();

    let args = Args::parse();
    let settings = settings_from(&args)?;

    let mut host = MemoryHost::new();
    let mut documents = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let document = DocumentId::new(path.display().to_string());
        host.open(document.clone(), &text);
        documents.push((path.clone(), document));
    }

    let mut controller = Controller::new(host, settings);
    let notice = controller.enable().context("failed to start the typo checker")?;
    log::info!("{notice}");

    for (_, document) in &documents {
        controller.on_active_editor_changed(document.clone());
    }
    run_checks(&mut controller)?;

    let mut found = 0;
    for (path, document) in &documents {
        if args.fix {
            let text = controller.checker().host().text(document).unwrap_or_default();
            if matches!(strip_comments(&text), Cow::Owned(_)) {
                log::warn!(
                    "{}: contains comments, offsets may be shifted; not fixing",
                    path.display()
                );
            } else if fix_document(&mut controller, document)? > 0 {
                let fixed = controller.checker().host().text(document).unwrap_or_default();
                fs::write(path, fixed)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                log::info!("fixed {}", path.display());
            }
        }

        let checker = controller.checker();
        let diagnostics = checker.diagnostics(document);
        found += diagnostics.len();
        print_diagnostics(
            &path.display().to_string(),
            checker.host(),
            document,
            diagnostics,
        );
    }

    Ok(if found == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_settings_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings_path = dir.path().join("settings.json");
        fs::write(&settings_path, r#"{"grammar": "from-settings.json", "delay_ms": 10}"#).unwrap();

        let args = Args::parse_from([
            "typo-check",
            "--settings",
            settings_path.to_str().unwrap(),
            "--grammar",
            "override.json",
            "notes.md",
        ]);
        let settings = settings_from(&args).unwrap();
        assert_eq!(settings.grammar, Some(PathBuf::from("override.json")));
        assert_eq!(settings.delay_ms, 10);
        assert_eq!(args.files, vec![PathBuf::from("notes.md")]);
        assert!(!args.fix);
    }

    #[test]
    fn test_apply_fixes_skips_overlaps() {
        let dir = tempfile::TempDir::new().unwrap();
        let grammar = dir.path().join("grammar.json");
        fs::write(
            &grammar,
            r#"[
              {"mode": 0, "severity": 2, "pattern": "teh", "message": "Typo", "suggestion": "the"},
              {"mode": 0, "severity": 1, "pattern": "eh c", "message": "Shout", "suggestion": "EH C"}
            ]"#,
        )
        .unwrap();

        let mut host = MemoryHost::new();
        host.open("a.md", "teh cat teh");
        let mut controller = Controller::new(host, CheckerSettings::with_grammar(&grammar));
        controller.enable().unwrap();

        let document = DocumentId::new("a.md");
        controller.on_active_editor_changed(document.clone());
        controller.checker_mut().flush();

        // Fixes run back to front: 8..11, then 1..5; 0..3 overlaps 1..5 and is skipped.
        assert_eq!(apply_fixes(&mut controller, &document), 2);
        assert_eq!(
            controller.checker().host().text(&document).as_deref(),
            Some("tEH Cat the")
        );
        assert_eq!(controller.checker().diagnostics(&document).len(), 1);
    }

    #[test]
    fn test_fixed_document_is_rechecked_before_reporting() {
        let dir = tempfile::TempDir::new().unwrap();
        let grammar = dir.path().join("grammar.json");
        fs::write(
            &grammar,
            r#"[
              {"mode": 0, "severity": 2, "pattern": "a", "message": "Expand", "suggestion": "xyz"},
              {"mode": 0, "severity": 3, "pattern": "b", "message": "No b"}
            ]"#,
        )
        .unwrap();

        let mut host = MemoryHost::new();
        host.open("a.md", "a b");
        let mut controller = Controller::new(host, CheckerSettings::with_grammar(&grammar));
        controller.enable().unwrap();

        let document = DocumentId::new("a.md");
        controller.on_active_editor_changed(document.clone());
        run_checks(&mut controller).unwrap();

        assert_eq!(fix_document(&mut controller, &document).unwrap(), 1);

        let checker = controller.checker();
        let host = checker.host();
        assert_eq!(host.text(&document).as_deref(), Some("xyz b"));

        let remaining = checker.diagnostics(&document);
        assert_eq!(remaining.len(), 1);
        assert_eq!(
            host.text_in_range(&document, remaining[0].range).as_deref(),
            Some("b")
        );
        assert_eq!(
            host.position_at(&document, remaining[0].range.start),
            Some(typo_core::TextPosition::new(0, 4))
        );
        assert_eq!(host.published(&document), Some(remaining));
    }

    #[test]
    fn test_document_without_suggestions_is_not_rechecked() {
        let dir = tempfile::TempDir::new().unwrap();
        let grammar = dir.path().join("grammar.json");
        fs::write(
            &grammar,
            r#"[{"mode": 0, "severity": 3, "pattern": "b", "message": "No b"}]"#,
        )
        .unwrap();

        let mut host = MemoryHost::new();
        host.open("a.md", "a b");
        let mut controller = Controller::new(host, CheckerSettings::with_grammar(&grammar));
        controller.enable().unwrap();

        let document = DocumentId::new("a.md");
        controller.on_active_editor_changed(document.clone());
        run_checks(&mut controller).unwrap();

        assert_eq!(fix_document(&mut controller, &document).unwrap(), 0);
        assert!(!controller.checker().is_scheduled(&document));
        assert_eq!(controller.checker().diagnostics(&document).len(), 1);
    }
}
