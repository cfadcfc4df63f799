use crate::text::measure::{CharCount, TextMeasure};

/// Greedy word wrap.
///
/// Words are packed left to right while the joined line measures at most `max_width`.
/// A word wider than `max_width` on its own still gets a line to itself; words are never
/// split. Runs of whitespace collapse to one space, and text without words yields no lines.
pub fn wrap_text<M>(text: &str, max_width: f32, font_size: f32, measure: &M) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let mut candidate = String::with_capacity(current.len() + 1 + word.len());
        candidate.push_str(&current);
        candidate.push(' ');
        candidate.push_str(word);

        if measure.measure(&candidate, font_size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Greedy word wrap against a character budget.
pub fn wrap_chars(text: &str, max_chars: usize) -> Vec<String> {
    wrap_text(text, max_chars as f32, 0.0, &CharCount)
}

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
