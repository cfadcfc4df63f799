//! cardgen renders tabletop RPG cards (NPCs, locations, items, factions, quests, mysteries)
//! as print-ready PNG images.
//!
//! A card is built from two SVG layers (rasterized with resvg) and a portrait image
//! composited between them. The crate exists for design exploration: the same card can be
//! drawn under many [`VariantSpec`]s so a human can compare layouts side by side.
//!
//! # Pipeline overview
//!
//! 1. **Layout**: [`LayoutConfig`] + [`TitlePosition`] -> [`Regions`] (validated, non-overlapping)
//! 2. **Text**: title fitted with [`fit_title`], body wrapped with [`wrap_text`] / [`wrap_chars`]
//! 3. **Draw**: [`CardRenderer::render_card`] builds the SVG layers, rasterizes them and
//!    composites the cover-resized portrait
//! 4. **Write**: [`Surface::save_png`] plus the markdown pages in [`markdown`]
//!
//! Text measurement goes through the [`TextMeasure`] trait, so wrapping and title fitting
//! work with a character budget, an approximate glyph table or shaped system fonts.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Premultiplied RGBA8** end-to-end: surfaces hold premultiplied pixels until encoding.
//! - **Sequential**: every command renders and writes one card at a time.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod imagegen;
mod layout;
mod model;
mod render;
mod report;
mod svg;
mod text;
mod variants;

pub use assets::decode::{cover_resize, decode_image, image_size, image_to_surface, load_image};
pub use assets::fonts::{fontdb_with_dirs, load_fonts_from_dir, system_fontdb};
pub use assets::svg_raster::{parse_svg, rasterize_svg, rasterize_tree};
pub use foundation::core::{CropGravity, Rect, Rgba8, Size, rect_px};
pub use foundation::error::{CardError, CardResult};
pub use imagegen::client::{
    ApiError, FAL_ENDPOINT, FalClient, ImageGenerator, ImageSize, parse_image_url,
};
pub use imagegen::fallback::{
    FAL_KEY_VAR, ImageOrigin, ProducedImage, fal_client_from_env, generate_or_placeholder,
};
pub use imagegen::prompts::{
    ART_STYLES, ArtStyle, PORTRAIT_FRAMING, PORTRAIT_SUBJECT, QUALITY_SUFFIX, TILEABLE_SUFFIX,
    art_style, texture_prompt,
};
pub use layout::config::{BodyText, LayoutConfig, TitleText, lines_that_fit};
pub use layout::regions::{Arrangement, CropStats, Regions, TitlePosition};
pub use model::card::Card;
pub use model::category::{Category, CategoryStyle, TextureStyle};
pub use render::card::{CardRenderer, RenderReport, RenderedCard};
pub use render::composite::{PremulRgba8, mask, over};
pub use render::placeholder::{
    NEUTRAL, PORTRAIT_SIZE, TEXTURE_CAPTION, placeholder_portrait, placeholder_texture,
    portrait_color,
};
pub use render::surface::Surface;
pub use report::markdown;
pub use report::write_page;
pub use svg::doc::{Anchor, Paint, Span, SvgDoc, TextStyle, escape_xml};
pub use text::fit::{ELLIPSIS, FittedTitle, TitleFitOpts, fit_title, truncate_to_width};
pub use text::measure::{
    ApproxGlyphs, CharCount, FontFamily, FontMeasure, FontSpec, MeasureMode, Measurer,
    TextMeasure,
};
pub use text::wrap::{normalize_whitespace, wrap_chars, wrap_text};
pub use variants::catalog::{
    DEFAULT_OUT_DIR, LayoutCase, PORTRAIT_4X3_FILE, PORTRAIT_FILE, SAMPLE_PROMPT, SizeSet,
    TEXTURE_FILE, experimental_layouts, exploration_card, exploration_variants, layout_cases,
    sample_card, study_card,
};
pub use variants::spec::{
    FooterMode, IconPlacement, RenderOptions, SizeStudy, TextAlign, TextBox, Theme, VariantFile,
    VariantSpec, validate_variants,
};
