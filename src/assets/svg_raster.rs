use std::sync::Arc;

use anyhow::Context;

use crate::{
    foundation::{
        core::Size,
        error::{CardError, CardResult},
    },
    render::surface::Surface,
};

/// Largest raster edge accepted from an SVG document.
const MAX_DIM: u32 = 16_384;

/// Parse SVG markup with the given fonts.
pub fn parse_svg(svg: &str, fontdb: Arc<usvg::fontdb::Database>) -> CardResult<usvg::Tree> {
    let opts = usvg::Options {
        fontdb,
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts).context("parse svg tree")?;
    Ok(tree)
}

/// Rasterize SVG markup at its intrinsic size into a premultiplied surface.
pub fn rasterize_svg(svg: &str, fontdb: Arc<usvg::fontdb::Database>) -> CardResult<Surface> {
    let tree = parse_svg(svg, fontdb)?;
    let size = tree.size();
    let width = to_px(size.width())?;
    let height = to_px(size.height())?;
    rasterize_tree(&tree, Size::new(width, height))
}

/// Rasterize a parsed tree scaled to `size`.
pub fn rasterize_tree(tree: &usvg::Tree, size: Size) -> CardResult<Surface> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width, size.height)
        .ok_or_else(|| CardError::render("failed to allocate svg pixmap"))?;

    let sx = (size.width as f32) / tree.size().width();
    let sy = (size.height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Surface::from_premul(size, pixmap.take())
}

fn to_px(v: f32) -> CardResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(CardError::render("svg has invalid width/height"));
    }
    let px = (v.ceil() as u32).max(1);
    if px > MAX_DIM {
        return Err(CardError::render(format!(
            "svg raster size too large: {px} (max {MAX_DIM})"
        )));
    }
    Ok(px)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
