use std::fmt::Write as _;

use crate::{
    imagegen::{fallback::ImageOrigin, prompts::ArtStyle},
    layout::{config::LayoutConfig, regions::CropStats},
    variants::{
        catalog::SizeSet,
        spec::{SizeStudy, VariantSpec},
    },
};

const GRID_COLUMNS: usize = 4;
const GRID_THUMB_WIDTH: u32 = 180;

/// `VARIANTS.md`: thumbnail grid, then one section per variant.
pub fn variants_page(variants: &[VariantSpec]) -> String {
    let mut md = String::from("# Layout Variant Comparison\n\n");
    let _ = writeln!(
        md,
        "Generated {} design variants. Please review and provide feedback.\n",
        variants.len()
    );
    md.push_str(
        "**What I want feedback on:** Which layout elements work best? Any combinations you'd like to see?\n\n",
    );

    md.push_str("<table>\n");
    for row in variants.chunks(GRID_COLUMNS) {
        md.push_str("<tr>\n");
        for v in row {
            let _ = writeln!(
                md,
                "<td align=\"center\"><a href=\"#{anchor}\"><img src=\"{file}\" width=\"{GRID_THUMB_WIDTH}\" alt=\"{id}\"></a><br><sub>{id}</sub></td>",
                anchor = heading_anchor(&v.title()),
                file = v.file_name(),
                id = v.id,
            );
        }
        md.push_str("</tr>\n");
    }
    md.push_str("</table>\n\n---\n\n");

    for v in variants {
        let _ = write!(
            md,
            "## {}\n\n**{}**\n\n![{}]({})\n\n---\n\n",
            v.title(),
            v.description,
            v.id,
            v.file_name()
        );
    }
    md
}

/// One rendered art-style portrait.
#[derive(Clone, Copy, Debug)]
pub struct StyleRow<'a> {
    /// Style drawn.
    pub style: &'a ArtStyle,
    /// Whether the portrait is real or a placeholder; `None` when it was read from disk.
    pub origin: Option<ImageOrigin>,
}

/// `STYLE-COMPARISON.md`: quick reference table, then each portrait beside its complete card
/// with the prompt.
pub fn style_page(subject: &str, rows: &[StyleRow<'_>]) -> String {
    let mut md = String::from("# Art Style Comparison\n\n");
    let _ = write!(
        md,
        "Same subject ({subject}), different artistic styles. Each row shows the portrait and how it looks on the final card.\n\n## Quick Reference\n\n| Style | Portrait | Complete Card |\n|-------|----------|---------------|\n"
    );
    for r in rows {
        let _ = writeln!(
            md,
            "| {} | ![]({}) | ![]({}) |",
            r.style.name,
            r.style.file_name(),
            r.style.card_file_name()
        );
    }
    md.push_str("\n---\n\n");

    for r in rows {
        let _ = write!(
            md,
            "## {}\n\n| Portrait | Complete Card |\n|----------|---------------|\n| ![portrait]({}) | ![card]({}) |\n\n",
            r.style.name,
            r.style.file_name(),
            r.style.card_file_name()
        );
        if r.origin == Some(ImageOrigin::Placeholder) {
            md.push_str("_Placeholder image: generation was unavailable._\n\n");
        }
        let _ = write!(md, "**Prompt:** {}\n\n---\n\n", r.style.prompt());
    }
    md.push_str(
        "## Feedback\n\nPreferred style(s):\n\nNotes (consistency, printing concerns, etc.):\n",
    );
    md
}

/// One layout-test case result.
#[derive(Clone, Debug)]
pub struct LayoutRow {
    /// Case id.
    pub id: String,
    /// Card title.
    pub name: String,
    /// Category name.
    pub category: String,
    /// Description length in characters.
    pub chars: usize,
    /// Body lines needed.
    pub lines_used: usize,
    /// Body lines available.
    pub lines_available: usize,
    /// PNG file name.
    pub file: String,
}

impl LayoutRow {
    /// Whether the text needed more lines than the body holds.
    pub fn overflows(&self) -> bool {
        self.lines_used > self.lines_available
    }
}

/// `LAYOUT-TEST.md`: layout numbers, a lines-used table with overflow status, sample cards.
pub fn layout_test_page(layout: &LayoutConfig, rows: &[LayoutRow]) -> String {
    let mut md = String::from("# Layout Test Results\n\n");
    let _ = write!(
        md,
        "Testing layout ({}×{}px) with varied content.\n\n**Layout specs:**\n- Header: {}px\n- Portrait: {}px\n- Body: {}px ({} lines max)\n- Footer: {}px\n\n",
        layout.size.width,
        layout.size.height,
        layout.header_height,
        layout.portrait_height,
        layout.body_height(),
        layout.lines_available(),
        layout.footer_height,
    );
    md.push_str("## Test Results\n\n| Test | Category | Chars | Lines Used | Status |\n|------|----------|-------|------------|--------|\n");
    for r in rows {
        let status = if r.overflows() { "⚠️ OVERFLOW" } else { "✓" };
        let _ = writeln!(
            md,
            "| {} | {} | {} | {}/{} | {status} |",
            r.id, r.category, r.chars, r.lines_used, r.lines_available
        );
    }
    md.push_str("\n## Sample Cards\n\n");
    for r in rows {
        let _ = writeln!(md, "### {} ({})\n![{}]({})\n", r.name, r.id, r.id, r.file);
    }
    md
}

/// One rendered size study.
#[derive(Clone, Copy, Debug)]
pub struct SizeRow<'a> {
    /// Study configuration.
    pub study: &'a SizeStudy,
    /// Crop and text capacity.
    pub stats: CropStats,
}

/// Size comparison page (`SIZE-COMPARISON.md` and its siblings): a summary table and one
/// section per study.
pub fn size_page(set: SizeSet, rows: &[SizeRow<'_>]) -> String {
    let mut md = String::new();
    let _ = write!(md, "# {}\n\n{}\n\n", set.heading(), set.intro());
    md.push_str("| Option | Card | Image | Crop | Text Lines | Text Size |\n|--------|------|-------|------|------------|-----------|\n");
    for r in rows {
        let l = &r.study.layout;
        let _ = writeln!(
            md,
            "| {} | {}×{} | {} | {:.1}% | {} | {}px |",
            r.study.label,
            l.size.width,
            l.size.height,
            r.study.portrait.display(),
            r.stats.crop_percent,
            r.stats.lines_available,
            l.body.font_size,
        );
    }
    md.push_str("\n---\n\n");

    for r in rows {
        let l = &r.study.layout;
        let _ = write!(
            md,
            "## {label}\n\n- **Card:** {w}×{h}px\n- **Portrait area:** {p}px (image scales to {scaled}px)\n- **Crop:** {pct:.1}% ({crop}px removed, {gravity:?} gravity)\n- **Text space:** {body}px = {lines} lines\n- **Font:** {fs}px / {lh}px line height\n\n![{label}]({file})\n\n---\n\n",
            label = r.study.label,
            w = l.size.width,
            h = l.size.height,
            p = l.portrait_height,
            scaled = r.stats.scaled_height,
            pct = r.stats.crop_percent,
            crop = r.stats.crop_px,
            gravity = r.study.crop,
            body = r.stats.body_height,
            lines = r.stats.lines_available,
            fs = l.body.font_size,
            lh = l.body.line_height,
            file = r.study.file_name(),
        );
    }
    md.push_str("## Feedback\n\nPreferred option: \nNotes: \n");
    md
}

/// `SAMPLE.md`: one card with its numbers and the prompt used for the portrait.
pub fn sample_page(
    layout: &LayoutConfig,
    card_file: &str,
    prompt: &str,
    origin: ImageOrigin,
) -> String {
    let portrait = match origin {
        ImageOrigin::Generated => "generated",
        ImageOrigin::Placeholder => "placeholder",
    };
    format!(
        "# Tarot Size Sample\n\n**Card:** {w}×{h}px (70×120mm at 300dpi)\n**Portrait:** {p}px ({portrait})\n**Body:** {body}px ({lines} lines @ {fs}px)\n**Style:** Ink wash\n\n![Card]({card_file})\n\n## Prompt Used\n```\n{prompt}\n```\n",
        w = layout.size.width,
        h = layout.size.height,
        p = layout.portrait_height,
        body = layout.body_height(),
        lines = layout.lines_available(),
        fs = layout.body.font_size,
    )
}

/// GitHub-style heading anchor.
fn heading_anchor(heading: &str) -> String {
    heading
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c.to_ascii_lowercase()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/report/markdown.rs"]
mod tests;
