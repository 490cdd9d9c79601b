use super::*;

use vgram_engine::{DEFAULT_ESCAPE, Gram};

use crate::lossy::analyze_rows;

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

fn mcelem(items: &[(&str, f64)]) -> Mcelem {
    Mcelem::from_parts(
        items
            .iter()
            .map(|&(g, f)| (Gram::from_slice(g.as_bytes()), f))
            .collect(),
    )
}

fn english() -> Mcelem {
    mcelem(&[
        ("$t", 0.10),
        ("th", 0.12),
        ("the", 0.08),
        ("he", 0.11),
        ("he$", 0.07),
        ("e$", 0.15),
        ("em", 0.02),
        ("m$", 0.03),
    ])
}

#[test]
fn short_fragments_are_looked_up_directly() {
    let mc = english();
    approx(fragment_selectivity(&mc, b"the"), 0.08);
    approx(fragment_selectivity(&mc, b"he"), 0.11);
}

#[test]
fn a_missing_short_fragment_scores_below_anything_kept() {
    let mc = english();
    // min_freq is 0.02.
    approx(fragment_selectivity(&mc, b"zz"), 0.01);
}

#[test]
fn an_empty_fragment_is_neutral() {
    approx(fragment_selectivity(&english(), b""), 1.0);
}

#[test]
fn long_fragments_chain_trigrams_over_bigram_overlaps() {
    let mc = english();

    // "them": freq(the), then a slide to the missing "hem" over the
    // present overlap "he".
    let rare = 0.02 * 0.5;
    let expected = 0.08 * (rare / 0.11);
    approx(fragment_selectivity(&mc, b"them"), expected);
}

#[test]
fn a_missing_denominator_widens_to_a_shorter_gram() {
    let mc = mcelem(&[("x", 0.5), ("ab", 0.2)]);
    let rare = 0.2 * 0.5;

    // "thxa": both trigrams miss; the overlap "hx" misses too and widens
    // to the single character "x".
    let expected = rare * (rare / 0.5);
    approx(fragment_selectivity(&mc, b"thxa"), expected);
}

#[test]
fn an_exhausted_denominator_falls_back_to_one() {
    let mc = mcelem(&[("zz", 0.2)]);
    let rare = 0.2 * 0.5;

    let expected = rare * rare;
    approx(fragment_selectivity(&mc, b"thxa"), expected);
}

#[test]
fn fragment_estimates_multiply_and_scale_by_the_null_fraction() {
    let stats = ColumnStats {
        mcelem: mcelem(&[("th", 0.4), ("ab", 0.2)]),
        null_frac: 0.5,
    };

    approx(
        pattern_selectivity(&stats, b"%th%ab%", DEFAULT_ESCAPE),
        0.4 * 0.2 * 0.5,
    );
}

#[test]
fn estimates_stay_inside_the_unit_interval() {
    let stats = ColumnStats {
        mcelem: mcelem(&[("ab", 1.0)]),
        null_frac: 0.0,
    };

    let sel = pattern_selectivity(&stats, b"%ab%", DEFAULT_ESCAPE);
    assert!((0.0..=1.0).contains(&sel));
    approx(sel, 1.0);
}

#[test]
fn missing_statistics_fall_back_to_a_default_instead_of_zero() {
    let stats = ColumnStats {
        mcelem: Mcelem::from_parts(Vec::new()),
        null_frac: 0.0,
    };

    let sel = pattern_selectivity(&stats, b"%zz%", DEFAULT_ESCAPE);
    assert!(sel > 0.0);
}

#[test]
fn common_patterns_estimate_materially_higher_than_rare_ones() {
    let titles = [
        "the history of the world",
        "the origin of species",
        "a study in scarlet",
        "the lord of the rings",
        "notes in the margin",
        "of mice and men",
        "in the heart of the sea",
        "the art of war",
        "a room of ones own",
        "fires in the dark",
    ];
    let stats = analyze_rows(titles.iter().copied().map(Some), 100);

    let common = pattern_selectivity(&stats, b"%the%", DEFAULT_ESCAPE);
    let rare = pattern_selectivity(&stats, b"%zz%", DEFAULT_ESCAPE);

    assert!(
        common > 5.0 * rare,
        "common {common} not materially above rare {rare}"
    );
}
