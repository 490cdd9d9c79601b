use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use vgram_engine::{DEFAULT_ESCAPE, GramTable, extract_query, extract_value};

const SAMPLE: &str = "the quick brown fox jumps over the lazy dog while \
                      indexing thousands of catalog titles in the archive";

fn frequent_table() -> GramTable {
    // A plausible frequent set for short English text.
    let grams = [
        "$t", "$th", "th", "the", "he", "he$", "$o", "of", "$i", "in", "ing", "$a", "an", "nd",
        "er", "re", "es", "$s", "st", "en", "ed", "on", "at", "or", "ar", "te",
    ];
    GramTable::fill(&grams, 2, 3).expect("valid table")
}

fn bench_extract(c: &mut Criterion) {
    let table = frequent_table();

    c.bench_function("extract_value", |b| {
        b.iter(|| extract_value(black_box(&table), black_box(SAMPLE)))
    });

    c.bench_function("extract_query", |b| {
        b.iter(|| {
            extract_query(
                black_box(&table),
                black_box(b"%catalog titles%"),
                DEFAULT_ESCAPE,
            )
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
