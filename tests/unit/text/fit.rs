use super::*;

fn half_em(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

fn header_opts(sizes: &[f32], max_width: f32) -> TitleFitOpts {
    TitleFitOpts {
        sizes: sizes.to_vec(),
        max_width,
        max_height: 90.0,
        line_height: 1.1,
    }
}

#[test]
fn picks_largest_single_line_size() {
    let opts = header_opts(&[52.0, 42.0, 34.0, 28.0], 357.0);
    let fitted = fit_title("Grimble Thornwick", &opts, &half_em);
    assert_eq!(fitted.font_size, 42.0);
    assert_eq!(fitted.lines, vec!["Grimble Thornwick".to_string()]);
    assert!(!fitted.truncated);
}

#[test]
fn ladder_order_does_not_matter() {
    let opts = header_opts(&[28.0, 52.0, 34.0, 42.0], 357.0);
    assert_eq!(fit_title("Grimble Thornwick", &opts, &half_em).font_size, 42.0);
}

#[test]
fn long_title_splits_into_balanced_lines() {
    let opts = header_opts(&[52.0, 42.0, 34.0, 28.0], 357.0);
    let fitted = fit_title("Archmagister Valdris of the Obsidian Spire", &opts, &half_em);
    assert_eq!(fitted.font_size, 34.0);
    assert_eq!(
        fitted.lines,
        vec!["Archmagister Valdris", "of the Obsidian Spire"]
    );
    assert!(!fitted.truncated);
}

#[test]
fn split_ties_keep_the_first_split_point() {
    let opts = TitleFitOpts {
        sizes: vec![10.0],
        max_width: 30.0,
        max_height: 100.0,
        line_height: 1.2,
    };
    let fitted = fit_title("ab cd ef", &opts, &half_em);
    assert_eq!(fitted.lines, vec!["ab", "cd ef"]);
}

#[test]
fn two_lines_only_at_sizes_that_fit_the_height() {
    let opts = TitleFitOpts {
        sizes: vec![40.0, 20.0],
        max_width: 200.0,
        max_height: 60.0,
        line_height: 1.2,
    };
    // 40px splits would fit the width but not the height.
    let fitted = fit_title("abcdefghij abcdefghij", &opts, &half_em);
    assert_eq!(fitted.font_size, 20.0);
    assert_eq!(fitted.lines, vec!["abcdefghij", "abcdefghij"]);
}

#[test]
fn single_long_word_is_truncated_with_ellipsis() {
    let opts = header_opts(&[28.0], 200.0);
    let fitted = fit_title("Supercalifragilisticexpialidocious", &opts, &half_em);
    assert!(fitted.truncated);
    assert_eq!(fitted.font_size, 28.0);
    assert_eq!(fitted.lines, vec!["Supercalifrag\u{2026}".to_string()]);
}

#[test]
fn truncation_trims_trailing_space_before_ellipsis() {
    let out = truncate_to_width("Lord Aldric Vance", 6.0, 1.0, &|t: &str, _s: f32| {
        t.chars().count() as f32
    });
    assert_eq!(out, "Lord\u{2026}");
}

#[test]
fn hopeless_width_yields_lone_ellipsis() {
    let opts = header_opts(&[28.0], 1.0);
    let fitted = fit_title("Brix", &opts, &half_em);
    assert_eq!(fitted.lines, vec![ELLIPSIS.to_string()]);
    assert!(fitted.truncated);
}

#[test]
fn empty_ladder_uses_fallback_size() {
    let opts = header_opts(&[], 1000.0);
    let fitted = fit_title("Brix", &opts, &half_em);
    assert_eq!(fitted.font_size, 28.0);
}

#[test]
fn results_respect_ladder_line_count_and_width() {
    let ladder = [52.0, 42.0, 34.0, 28.0];
    let titles = [
        "Brix",
        "Grimble Thornwick",
        "Lord Aldric Vance",
        "The Whispering Archives of Saint Meridian",
        "Bartholomew Fitzgerald III",
        "Blade of the Fallen Star",
        "Supercalifragilisticexpialidocious",
    ];
    for width in [120.0f32, 357.0, 600.0, 747.0] {
        let opts = header_opts(&ladder, width);
        for title in titles {
            let fitted = fit_title(title, &opts, &half_em);
            assert!(ladder.contains(&fitted.font_size));
            assert!((1..=2).contains(&fitted.lines.len()));
            if fitted.lines.len() == 2 {
                assert!(opts.allows_two_lines(fitted.font_size));
                assert!(!fitted.truncated);
            }
            for line in &fitted.lines {
                assert!(
                    line == &ELLIPSIS.to_string() || half_em(line, fitted.font_size) <= width,
                    "{title:?} -> {line:?} at {}",
                    fitted.font_size
                );
            }
        }
    }
}
