use super::*;

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn small_streams_are_counted_exactly() {
    let rows = [Some("ab"), Some("ab"), Some("cd"), Some("ab")];
    let stats = analyze_rows(rows, 100);
    let mc = &stats.mcelem;

    // No bucket boundary was crossed and no truncation applied.
    approx(mc.lookup(b"$").unwrap(), 1.0);
    approx(mc.lookup(b"ab").unwrap(), 0.75);
    approx(mc.lookup(b"cd").unwrap(), 0.25);
    approx(mc.min_freq(), 0.25);
    approx(mc.max_freq(), 1.0);
}

#[test]
fn kept_grams_are_byte_sorted_for_lookup() {
    let stats = analyze_rows([Some("ba ab")], 100);
    let grams: Vec<&[u8]> = stats.mcelem.iter().map(|(g, _)| g).collect();

    for pair in grams.windows(2) {
        assert!(pair[0] < pair[1], "not sorted: {pair:?}");
    }
}

#[test]
fn truncation_keeps_the_highest_counts() {
    let rows = [Some("ab"), Some("ab"), Some("cd"), Some("ab")];
    let stats = analyze_rows(rows, 2);
    let mc = &stats.mcelem;

    assert_eq!(mc.len(), 2);
    // "$" is in every row; ties at the next count break bytewise.
    approx(mc.lookup(b"$").unwrap(), 1.0);
    approx(mc.lookup(b"$a").unwrap(), 0.75);
    assert!(mc.lookup(b"cd").is_none());
}

#[test]
fn repeats_within_a_row_are_counted_once() {
    let mut collector = TopKCollector::new(100);
    collector.add_row(Some("aa aa"));

    // Distinct grams of the two identical words: $, a, $a, aa, a$, $aa, aa$.
    assert_eq!(collector.tokens_seen(), 7);

    let stats = collector.finish();
    approx(stats.mcelem.lookup(b"a").unwrap(), 1.0);
}

#[test]
fn null_rows_feed_the_null_fraction_not_the_frequencies() {
    let stats = analyze_rows([Some("ab"), None], 100);

    approx(stats.null_frac, 0.5);
    // Frequencies are per non-NULL row.
    approx(stats.mcelem.lookup(b"ab").unwrap(), 1.0);
}

#[test]
fn an_empty_sample_produces_empty_statistics() {
    let stats = analyze_rows(std::iter::empty::<Option<&str>>(), 16);

    assert!(stats.mcelem.is_empty());
    approx(stats.mcelem.min_freq(), 0.0);
    approx(stats.null_frac, 0.0);
}

#[test]
fn long_streams_prune_without_losing_the_common_grams() {
    // 500 two-character rows: every letter/digit combination, five times.
    let mut rows = Vec::new();
    for _ in 0..5 {
        for letter in b'a'..=b'j' {
            for digit in b'0'..=b'9' {
                rows.push(String::from_utf8(vec![letter, digit]).unwrap());
            }
        }
    }

    let mut collector = TopKCollector::new(10);
    for row in &rows {
        collector.add_row(Some(row));
    }
    // Eight deduplicated grams per row crosses at least one bucket.
    assert_eq!(collector.tokens_seen(), 4000);

    let stats = collector.finish();
    let mc = &stats.mcelem;

    assert_eq!(mc.len(), 10);
    // The sentinel gram is in every row and survives pruning undamaged.
    approx(mc.lookup(b"$").unwrap(), 1.0);
    approx(mc.max_freq(), 1.0);
    // Everything else kept sits at one-in-ten rows.
    approx(mc.min_freq(), 0.1);
}

#[test]
fn from_parts_sorts_and_tracks_extremes() {
    let mc = Mcelem::from_parts(vec![
        (Gram::from_slice(b"th"), 0.4),
        (Gram::from_slice(b"ab"), 0.2),
        (Gram::from_slice(b"zz"), 0.9),
    ]);

    assert_eq!(mc.len(), 3);
    approx(mc.lookup(b"ab").unwrap(), 0.2);
    approx(mc.lookup(b"th").unwrap(), 0.4);
    assert!(mc.lookup(b"qq").is_none());
    approx(mc.min_freq(), 0.2);
    approx(mc.max_freq(), 0.9);

    let grams: Vec<&[u8]> = mc.iter().map(|(g, _)| g).collect();
    assert_eq!(grams, vec![&b"ab"[..], b"th", b"zz"]);
}
