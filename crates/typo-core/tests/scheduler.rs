use std::time::{Duration, Instant};
use typo_core::{CheckScheduler, DEFAULT_CHECK_DELAY, DocumentId};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_burst_of_schedules_coalesces_per_document() {
    let mut scheduler: CheckScheduler<&'static str, Vec<String>> = CheckScheduler::new();
    assert_eq!(scheduler.delay(), DEFAULT_CHECK_DELAY);

    let doc = DocumentId::new("file:///a.md");
    let start = Instant::now();

    for (i, label) in ["edit-1", "edit-2", "save"].into_iter().enumerate() {
        scheduler.schedule_check_at(start + ms(40 * i as u64), doc.clone(), move |log| {
            log.push(label.to_string());
            label
        });
    }
    assert_eq!(scheduler.len(), 1);
    assert!(scheduler.is_scheduled(&doc));
    assert_eq!(scheduler.next_deadline(), Some(start + ms(80) + DEFAULT_CHECK_DELAY));

    let mut log = Vec::new();
    assert!(scheduler.tick_at(start + ms(200), &mut log).is_empty());

    let completed = scheduler.tick_at(start + ms(230), &mut log);
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].0, doc);
    assert_eq!(completed[0].1.take(), Some("save"));
    assert_eq!(log, vec!["save".to_string()]);

    // Completed documents hold no scheduler state.
    assert!(scheduler.is_empty());
    assert!(!scheduler.is_scheduled(&doc));
    assert_eq!(scheduler.next_deadline(), None);
}

#[test]
fn test_documents_are_independent() {
    let mut scheduler: CheckScheduler<u32, Vec<u32>> = CheckScheduler::with_delay(ms(100));
    let a = DocumentId::new("a");
    let b = DocumentId::new("b");
    let start = Instant::now();

    scheduler.schedule_check_at(start, a.clone(), |log| {
        log.push(1);
        1
    });
    scheduler.schedule_check_at(start + ms(50), b.clone(), |log| {
        log.push(2);
        2
    });

    let mut log = Vec::new();
    let first = scheduler.tick_at(start + ms(100), &mut log);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].0, a);
    assert!(scheduler.is_scheduled(&b));

    let second = scheduler.tick_at(start + ms(150), &mut log);
    assert_eq!(second[0].0, b);
    assert_eq!(log, vec![1, 2]);
}

#[test]
fn test_due_checks_run_earliest_first() {
    let mut scheduler: CheckScheduler<(), Vec<&'static str>> = CheckScheduler::with_delay(ms(10));
    let start = Instant::now();

    scheduler.schedule_check_at(start + ms(5), DocumentId::new("late"), |log| log.push("late"));
    scheduler.schedule_check_at(start, DocumentId::new("early"), |log| log.push("early"));

    let mut log = Vec::new();
    scheduler.tick_at(start + ms(100), &mut log);
    assert_eq!(log, vec!["early", "late"]);
}

#[test]
fn test_cancel_and_flush() {
    let mut scheduler: CheckScheduler<(), Vec<&'static str>> = CheckScheduler::new();
    let a = DocumentId::new("a");
    let b = DocumentId::new("b");

    let handle = scheduler.schedule_check(a.clone(), |log| log.push("a"));
    scheduler.schedule_check(b.clone(), |log| log.push("b"));

    assert!(scheduler.cancel(&a));
    assert!(!scheduler.cancel(&a));
    assert!(handle.is_cancelled());

    let mut log = Vec::new();
    let completed = scheduler.flush(&mut log);
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].0, b);
    assert_eq!(log, vec!["b"]);
    assert!(scheduler.is_empty());

    scheduler.schedule_check(a.clone(), |log| log.push("a"));
    scheduler.cancel_all();
    assert!(scheduler.flush(&mut log).is_empty());
    assert_eq!(log, vec!["b"]);
}
