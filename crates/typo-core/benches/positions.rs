use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use typo_core::{
    CheckMode, DocumentChecker, DocumentId, GrammarRule, MemoryHost, RuleSeverity, Side, check,
    find_all, find_incomplete,
};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        let word = if i % 7 == 0 { "recieve" } else { "receive" };
        out.push_str(&format!(
            "{i:06} teh quick brown fox will {word} the lazy dog <!-- note -->\n"
        ));
    }
    out.pop();
    out
}

fn rules() -> Vec<GrammarRule> {
    vec![
        GrammarRule::complete("teh", RuleSeverity::Warn, "Misspelled word", "the"),
        GrammarRule::incomplete(
            CheckMode::RightIncomplete,
            "rec",
            "ei",
            RuleSeverity::Error,
            "e before i after c",
            "",
        ),
        GrammarRule::complete(r"\bfox\b", RuleSeverity::Hint, "Animal", ""),
    ]
}

fn bench_find_all(c: &mut Criterion) {
    let text = large_text(10_000);
    c.bench_function("find_all/10k_lines", |b| {
        b.iter(|| black_box(find_all(black_box(&text), "teh").unwrap().len()))
    });
}

fn bench_find_incomplete(c: &mut Criterion) {
    let text = large_text(10_000);
    c.bench_function("find_incomplete/10k_lines", |b| {
        b.iter(|| {
            black_box(
                find_incomplete(black_box(&text), "rec", "ei", Side::Right)
                    .unwrap()
                    .len(),
            )
        })
    });
}

fn bench_check(c: &mut Criterion) {
    let text = large_text(10_000);
    let rules = rules();
    c.bench_function("check/10k_lines_3_rules", |b| {
        b.iter(|| black_box(check(black_box(&text), &rules).unwrap().len()))
    });
}

fn bench_debounced_burst(c: &mut Criterion) {
    let text = large_text(1_000);
    let doc = DocumentId::new("bench.md");
    c.bench_function("checker/100_triggers_one_check", |b| {
        b.iter_batched(
            || {
                let mut host = MemoryHost::new();
                host.open(doc.clone(), &text);
                let mut checker = DocumentChecker::new(host);
                checker.activate(rules());
                checker
            },
            |mut checker| {
                for _ in 0..100 {
                    checker.check_document(doc.clone()).unwrap();
                }
                black_box(checker.flush().len());
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_find_all,
    bench_find_incomplete,
    bench_check,
    bench_debounced_burst
);
criterion_main!(benches);
