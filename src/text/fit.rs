use serde::{Deserialize, Serialize};

use crate::text::{measure::TextMeasure, wrap::normalize_whitespace};

/// Appended to titles that had to be truncated.
pub const ELLIPSIS: char = '\u{2026}';

/// Size used when a ladder is empty.
const FALLBACK_TITLE_SIZE: f32 = 28.0;

/// Constraints for fitting a title into a header box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TitleFitOpts {
    /// Candidate font sizes, largest first.
    pub sizes: Vec<f32>,
    /// Maximum width of one title line.
    pub max_width: f32,
    /// Height available for title lines.
    pub max_height: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
}

impl TitleFitOpts {
    /// Whether two lines at `size` fit in the available height.
    pub fn allows_two_lines(&self, size: f32) -> bool {
        2.0 * size * self.line_height <= self.max_height
    }
}

/// A title laid out for a header.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FittedTitle {
    /// Chosen font size.
    pub font_size: f32,
    /// One or two lines.
    pub lines: Vec<String>,
    /// Whether the single line was shortened and ends with [`ELLIPSIS`].
    pub truncated: bool,
}

/// Pick the largest font size (and 1 or 2 lines) at which `title` fits.
///
/// Order of preference: one line at any size, then a balanced two-line split at sizes whose
/// two lines fit the height, then the smallest size truncated with an ellipsis.
pub fn fit_title<M>(title: &str, opts: &TitleFitOpts, measure: &M) -> FittedTitle
where
    M: TextMeasure + ?Sized,
{
    let mut sizes = opts.sizes.clone();
    sizes.retain(|s| s.is_finite() && *s > 0.0);
    sizes.sort_by(|a, b| b.total_cmp(a));
    sizes.dedup();
    if sizes.is_empty() {
        sizes.push(FALLBACK_TITLE_SIZE);
    }

    let title = normalize_whitespace(title);

    for &size in &sizes {
        if measure.measure(&title, size) <= opts.max_width {
            return FittedTitle {
                font_size: size,
                lines: vec![title],
                truncated: false,
            };
        }
    }

    let words: Vec<&str> = title.split(' ').collect();
    if words.len() >= 2 {
        for &size in sizes.iter().filter(|s| opts.allows_two_lines(**s)) {
            let (first, second, widest) = best_split(&words, size, measure);
            if widest <= opts.max_width {
                return FittedTitle {
                    font_size: size,
                    lines: vec![first, second],
                    truncated: false,
                };
            }
        }
    }

    let smallest = sizes[sizes.len() - 1];
    FittedTitle {
        font_size: smallest,
        lines: vec![truncate_to_width(&title, opts.max_width, smallest, measure)],
        truncated: true,
    }
}

/// Two-way split minimizing the wider half. Ties keep the leftmost split point.
fn best_split<M>(words: &[&str], size: f32, measure: &M) -> (String, String, f32)
where
    M: TextMeasure + ?Sized,
{
    let mut best: Option<(String, String, f32)> = None;
    for i in 1..words.len() {
        let first = words[..i].join(" ");
        let second = words[i..].join(" ");
        let widest = measure
            .measure(&first, size)
            .max(measure.measure(&second, size));
        if best.as_ref().is_none_or(|(_, _, w)| widest < *w) {
            best = Some((first, second, widest));
        }
    }
    best.unwrap_or_else(|| (words.join(" "), String::new(), f32::INFINITY))
}

/// Drop trailing characters until `text…` fits. Returns a lone ellipsis at worst.
pub fn truncate_to_width<M>(text: &str, max_width: f32, size: f32, measure: &M) -> String
where
    M: TextMeasure + ?Sized,
{
    let chars: Vec<char> = text.chars().collect();
    for keep in (0..chars.len()).rev() {
        let mut candidate: String = chars[..keep].iter().collect();
        candidate.truncate(candidate.trim_end().len());
        candidate.push(ELLIPSIS);
        if measure.measure(&candidate, size) <= max_width {
            return candidate;
        }
    }
    ELLIPSIS.to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/text/fit.rs"]
mod tests;
