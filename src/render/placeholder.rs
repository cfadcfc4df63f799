use std::sync::Arc;

use crate::{
    assets::svg_raster::rasterize_svg,
    foundation::{
        core::{Rect, Rgba8, Size},
        error::CardResult,
    },
    model::category::Category,
    render::surface::Surface,
    svg::doc::{Anchor, Paint, SvgDoc, TextStyle},
    text::measure::FontFamily,
};

/// Default placeholder portrait size (5:7).
pub const PORTRAIT_SIZE: Size = Size::new(512, 716);

/// Gray used when neither a color nor a category is given.
pub const NEUTRAL: Rgba8 = Rgba8::rgb(0x66, 0x66, 0x66);

/// Caption drawn on placeholder textures.
pub const TEXTURE_CAPTION: &str = "[Texture Placeholder]";

/// Color for a placeholder portrait: explicit color, else the category accent, else gray.
pub fn portrait_color(color: Option<Rgba8>, category: Option<Category>) -> Rgba8 {
    color
        .or_else(|| category.map(|c| c.style().accent))
        .unwrap_or(NEUTRAL)
}

/// Solid, opaque placeholder portrait.
pub fn placeholder_portrait(size: Size, color: Rgba8) -> CardResult<Surface> {
    Surface::solid(size, Rgba8 { a: 255, ..color })
}

/// Category gradient with a faint caption, sized like a card background.
pub fn placeholder_texture(
    category: Category,
    size: Size,
    fontdb: Arc<usvg::fontdb::Database>,
) -> CardResult<Surface> {
    let style = category.style();
    let mut doc = SvgDoc::new(size);
    let full = Rect::new(0.0, 0.0, f64::from(size.width), f64::from(size.height));
    let caption = TextStyle::new(
        FontFamily::Serif,
        32.0,
        Rgba8 {
            r: 255,
            g: 255,
            b: 255,
            a: 51,
        },
    )
    .anchor(Anchor::Middle);
    doc.linear_gradient("bg", style.accent, style.light)
        .rect(full, Paint::gradient("bg"), 1.0)
        .text(full.center().x, full.center().y, &caption, TEXTURE_CAPTION);
    rasterize_svg(&doc.finish(), fontdb)
}

#[cfg(test)]
#[path = "../../tests/unit/render/placeholder.rs"]
mod tests;
