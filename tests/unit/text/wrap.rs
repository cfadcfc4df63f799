use super::*;
use crate::text::measure::{ApproxGlyphs, FontFamily, FontSpec};

const GNOME: &str = "A tinkering gnome inventor with perpetually soot-stained fingers";

const SAMPLES: &[&str] = &[
    "Bob",
    GNOME,
    "The Duke of Westmarch, a calculating politician whose warm smile conceals ruthless ambition.",
    "   leading   and trailing\twhitespace\n\nis collapsed   ",
    "Supercalifragilisticexpialidocious is far too long for a narrow column",
    "",
];

#[test]
fn short_text_fits_on_one_line() {
    assert_eq!(wrap_chars("Bob", 46), vec!["Bob".to_string()]);
}

#[test]
fn gnome_description_wraps_greedily_at_twenty_chars() {
    let lines = wrap_chars(GNOME, 20);
    assert_eq!(
        lines,
        vec![
            "A tinkering gnome",
            "inventor with",
            "perpetually",
            "soot-stained fingers",
        ]
    );
}

#[test]
fn empty_and_blank_input_yield_no_lines() {
    assert!(wrap_chars("", 10).is_empty());
    assert!(wrap_chars(" \t\n ", 10).is_empty());
}

#[test]
fn oversized_word_sits_alone_unmodified() {
    let lines = wrap_chars("a Supercalifragilisticexpialidocious b", 10);
    assert_eq!(
        lines,
        vec!["a", "Supercalifragilisticexpialidocious", "b"]
    );
}

#[test]
fn every_line_respects_budget_unless_single_word() {
    let measure = ApproxGlyphs::new(FontSpec::regular(FontFamily::Serif));
    for text in SAMPLES {
        for budget in [60.0f32, 150.0, 400.0, 747.0] {
            for line in wrap_text(text, budget, 28.0, &measure) {
                let single_word = !line.contains(' ');
                assert!(
                    single_word || measure.measure(&line, 28.0) <= budget,
                    "line {line:?} exceeds {budget}"
                );
            }
        }
    }
}

#[test]
fn rejoined_lines_reconstruct_normalized_input() {
    for text in SAMPLES {
        for budget in [5usize, 12, 20, 46] {
            let lines = wrap_chars(text, budget);
            assert_eq!(lines.join(" "), normalize_whitespace(text));
        }
    }
}

#[test]
fn rewrapping_is_idempotent() {
    let measure = ApproxGlyphs::new(FontSpec::regular(FontFamily::Serif));
    for text in SAMPLES {
        for budget in [80.0f32, 300.0, 700.0] {
            let first = wrap_text(text, budget, 24.0, &measure);
            let again = wrap_text(&first.join(" "), budget, 24.0, &measure);
            assert_eq!(first, again);
        }
    }
}

#[test]
fn normalize_collapses_runs() {
    assert_eq!(normalize_whitespace("  a \n\t b  c "), "a b c");
}
