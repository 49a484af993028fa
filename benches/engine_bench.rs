//! Filter/sort/paginate engine benchmarks.
//!
//! The filter runs over the full dataset on every keystroke-equivalent
//! interaction, so it is the engine's hot path; raw search additionally
//! serializes every record.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `filter` | Conjunction matching: category, level, field search, raw search |
//! | `sort` | Resort plus renumbering for each sort key |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench engine_bench
//! open target/criterion/report/index.html
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use eventlens_core::engine::{load_sorted, FilterSpec, Session, SortDir, SortKey, SortSpec};
use eventlens_core::{normalize_applog, CapturedRecord, Category};
use serde_json::json;
use std::hint::black_box;

fn dataset(n: usize) -> Session {
    let records: Vec<_> = (0..n)
        .map(|i| {
            let line = json!({
                "operation": "/api.x.Book/GetChapterContent",
                "time": format!("2024-01-15T10:{:02}:{:02}.000Z", (i / 60) % 60, i % 60),
                "level": if i % 20 == 0 { "error" } else { "info" },
                "user": {"id": format!("u{}", i % 11)},
                "userAttributes": {"bookId": format!("b{}", i % 31), "chapterId": format!("c{i}")},
            });
            CapturedRecord::new(line)
        })
        .collect();
    let mut session = Session::new();
    load_sorted(&mut session, normalize_applog(&records));
    session
}

// ---------------------------------------------------------------------------
// filter
// ---------------------------------------------------------------------------

fn filter_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let session = dataset(10_000);
    group.throughput(Throughput::Elements(10_000));

    let specs = [
        ("category", FilterSpec { category: Some(Category::Read), ..Default::default() }),
        ("level", FilterSpec { level: Some("ERROR".to_string()), ..Default::default() }),
        ("search", FilterSpec { search: Some("b17".to_string()), ..Default::default() }),
        (
            "raw_search",
            FilterSpec {
                search: Some("\"userid\":\"u3\"".to_string()),
                raw_search: true,
                ..Default::default()
            },
        ),
    ];
    for (name, spec) in specs {
        group.bench_with_input(BenchmarkId::from_parameter(name), &spec, |b, spec| {
            b.iter(|| {
                let hits: Vec<_> =
                    session.events().iter().filter(|e| spec.matches(black_box(e))).collect();
                black_box(hits)
            })
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// sort
// ---------------------------------------------------------------------------

fn sort_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    for key in [SortKey::Index, SortKey::Timestamp, SortKey::Calibrated] {
        let name = match key {
            SortKey::Index => "index",
            SortKey::Timestamp => "timestamp",
            SortKey::Calibrated => "calibrated",
        };
        group.bench_function(name, |b| {
            b.iter_batched(
                || dataset(10_000),
                |mut session| {
                    session.set_sort(SortSpec { key, dir: SortDir::Desc });
                    black_box(session)
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, filter_bench, sort_bench);
criterion_main!(benches);
