use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cardgen::{
    Card, CardRenderer, Category, CropStats, FalClient, ImageOrigin, ImageSize, LayoutConfig,
    MeasureMode, RenderOptions, Rgba8, Size, SizeSet, Surface, TextureStyle, Theme, VariantFile,
    VariantSpec, markdown,
};

#[derive(Parser, Debug)]
#[command(name = "cardgen", version, about = "Render tabletop RPG cards and layout explorations")]
struct Cli {
    /// Measure text with the built-in width table instead of system fonts.
    #[arg(long, global = true)]
    approx: bool,

    /// Extra directory of .ttf/.otf fonts (repeatable).
    #[arg(long = "font-dir", global = true)]
    font_dirs: Vec<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the exploration variants (or a JSON variant file) plus VARIANTS.md.
    Variants(VariantsArgs),
    /// Render one card from a JSON definition.
    Card(CardArgs),
    /// Write a placeholder or generated portrait.
    Portrait(PortraitArgs),
    /// Write a placeholder or generated background texture.
    Texture(TextureArgs),
    /// One portrait per art style plus STYLE-COMPARISON.md.
    Styles(StylesArgs),
    /// Render the layout test cases plus LAYOUT-TEST.md.
    LayoutTest(LayoutTestArgs),
    /// Render card size and crop studies plus a comparison page.
    Sizes(SizesArgs),
    /// Render the tarot sample card plus SAMPLE.md.
    Sample(SampleArgs),
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Layout preset.
    #[arg(long, default_value = "tarot")]
    layout: String,

    /// Layout JSON file (overrides --layout).
    #[arg(long)]
    layout_file: Option<PathBuf>,
}

impl LayoutArgs {
    fn resolve(&self) -> anyhow::Result<LayoutConfig> {
        Ok(match &self.layout_file {
            Some(path) => LayoutConfig::load(path)?,
            None => LayoutConfig::preset(&self.layout)?,
        })
    }
}

#[derive(Parser, Debug)]
struct VariantsArgs {
    /// Output directory; portrait.png (and texture.png for texture variants) are read from it.
    #[arg(default_value = cardgen::DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// JSON variant file to render instead of the built-in catalog.
    #[arg(long, conflicts_with = "layouts")]
    spec: Option<PathBuf>,

    /// Render the six experimental arrangements (layout-A to layout-F) instead.
    #[arg(long)]
    layouts: bool,

    /// Portrait image (default: <OUT_DIR>/portrait.png).
    #[arg(long)]
    portrait: Option<PathBuf>,

    /// Texture image for texture-theme variants (default: <OUT_DIR>/texture.png).
    #[arg(long)]
    texture: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CardArgs {
    /// Card definition JSON.
    card: PathBuf,

    /// Output PNG.
    out: PathBuf,

    #[command(flatten)]
    layout: LayoutArgs,
}

#[derive(Parser, Debug)]
struct PortraitArgs {
    /// Output PNG.
    out: PathBuf,

    /// Solid placeholder color (#RRGGBB).
    #[arg(long, value_parser = parse_color)]
    color: Option<Rgba8>,

    /// Category whose accent colors the placeholder.
    #[arg(long)]
    category: Option<String>,

    /// Placeholder width in pixels.
    #[arg(long, default_value_t = cardgen::PORTRAIT_SIZE.width)]
    width: u32,

    /// Placeholder height in pixels.
    #[arg(long, default_value_t = cardgen::PORTRAIT_SIZE.height)]
    height: u32,

    /// Generation prompt (used with --api).
    #[arg(long)]
    prompt: Option<String>,

    /// Generated image aspect.
    #[arg(long, default_value = "square")]
    image_size: ImageSize,

    /// Generate with fal.ai (needs FAL_KEY).
    #[arg(long)]
    api: bool,
}

#[derive(Parser, Debug)]
struct TextureArgs {
    /// Output PNG.
    out: PathBuf,

    /// Card category.
    #[arg(long, default_value = "npc")]
    category: String,

    /// Texture style (defaults to the category's style).
    #[arg(long)]
    style: Option<String>,

    /// Custom prompt (replaces category and style).
    #[arg(long)]
    prompt: Option<String>,

    /// Generate with fal.ai (needs FAL_KEY).
    #[arg(long)]
    api: bool,

    #[command(flatten)]
    layout: LayoutArgs,
}

#[derive(Parser, Debug)]
struct StylesArgs {
    /// Output directory.
    #[arg(default_value = cardgen::DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Generate with fal.ai (needs FAL_KEY).
    #[arg(long, conflicts_with = "cards_only")]
    api: bool,

    /// Only render cards from style portraits already in OUT_DIR, skipping missing ones.
    #[arg(long)]
    cards_only: bool,
}

#[derive(Parser, Debug)]
struct LayoutTestArgs {
    /// Output directory.
    #[arg(default_value = cardgen::DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Portrait shared by every case; missing means a placeholder area.
    #[arg(long)]
    portrait: Option<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,
}

#[derive(Parser, Debug)]
struct SizesArgs {
    /// Output directory; portrait.png and portrait-4x3.png are read from it.
    #[arg(default_value = cardgen::DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Which studies to render.
    #[arg(long, default_value = "explore")]
    set: SizeSet,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Output directory.
    #[arg(default_value = cardgen::DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Generate the portrait with fal.ai (needs FAL_KEY).
    #[arg(long)]
    api: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = Ctx::new(&cli);
    match cli.cmd {
        Command::Variants(args) => cmd_variants(&ctx, args),
        Command::Card(args) => cmd_card(&ctx, args),
        Command::Portrait(args) => cmd_portrait(args),
        Command::Texture(args) => cmd_texture(&ctx, args),
        Command::Styles(args) => cmd_styles(&ctx, args),
        Command::LayoutTest(args) => cmd_layout_test(&ctx, args),
        Command::Sizes(args) => cmd_sizes(&ctx, args),
        Command::Sample(args) => cmd_sample(&ctx, args),
    }
}

/// Shared per-process state.
struct Ctx {
    renderer: CardRenderer,
}

impl Ctx {
    fn new(cli: &Cli) -> Self {
        let fontdb = if cli.font_dirs.is_empty() {
            cardgen::system_fontdb()
        } else {
            let dirs: Vec<&Path> = cli.font_dirs.iter().map(PathBuf::as_path).collect();
            cardgen::fontdb_with_dirs(&dirs)
        };
        let mode = if cli.approx {
            MeasureMode::Approx
        } else {
            MeasureMode::Font
        };
        Self {
            renderer: CardRenderer::new(fontdb, mode),
        }
    }

    fn fontdb(&self) -> Arc<usvg::fontdb::Database> {
        self.renderer.fontdb().clone()
    }
}

fn parse_color(s: &str) -> Result<Rgba8, String> {
    Rgba8::parse_hex(s).map_err(|e| e.to_string())
}

fn api_client(api: bool) -> Option<FalClient> {
    if api {
        cardgen::fal_client_from_env()
    } else {
        None
    }
}

fn save(surface: &Surface, path: &Path) -> anyhow::Result<()> {
    surface
        .save_png(path)
        .with_context(|| format!("write png '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "wrote");
    Ok(())
}

fn load_optional_image(path: &Path) -> anyhow::Result<Option<image::DynamicImage>> {
    if path.is_file() {
        Ok(Some(cardgen::load_image(path)?))
    } else {
        tracing::warn!(path = %path.display(), "portrait not found, drawing placeholder");
        Ok(None)
    }
}

fn cmd_variants(ctx: &Ctx, args: VariantsArgs) -> anyhow::Result<()> {
    let variants: Vec<VariantSpec> = match &args.spec {
        Some(path) => VariantFile::load(path)?,
        None if args.layouts => cardgen::experimental_layouts(),
        None => cardgen::exploration_variants(),
    };

    let portrait_path = args
        .portrait
        .unwrap_or_else(|| args.out_dir.join(cardgen::PORTRAIT_FILE));
    let portrait = cardgen::load_image(&portrait_path)
        .with_context(|| "variants need a portrait; create one with `cardgen portrait`")?;

    let texture = if variants.iter().any(|v| v.options.theme == Theme::Texture) {
        let path = args
            .texture
            .unwrap_or_else(|| args.out_dir.join(cardgen::TEXTURE_FILE));
        Some(cardgen::load_image(&path)?)
    } else {
        None
    };

    let card = cardgen::exploration_card();
    tracing::info!(count = variants.len(), "rendering variants");
    for v in &variants {
        let out = ctx
            .renderer
            .render_card(&card, &v.options, Some(&portrait), texture.as_ref())
            .with_context(|| format!("render variant '{}'", v.id))?;
        save(&out.surface, &args.out_dir.join(v.file_name()))?;
        tracing::info!(id = %v.id, "{}", v.description);
    }

    cardgen::write_page(&args.out_dir, "VARIANTS.md", &markdown::variants_page(&variants))?;
    Ok(())
}

fn cmd_card(ctx: &Ctx, args: CardArgs) -> anyhow::Result<()> {
    let card = Card::load(&args.card)?;
    let options = RenderOptions::with_layout(args.layout.resolve()?);

    let card_dir = args.card.parent().unwrap_or_else(|| Path::new("."));
    let portrait = match card.resolved_portrait(card_dir) {
        Some(path) => load_optional_image(&path)?,
        None => None,
    };

    let out = ctx
        .renderer
        .render_card(&card, &options, portrait.as_ref(), None)?;
    save(&out.surface, &args.out)?;
    tracing::info!(
        title_size = out.report.title.font_size,
        lines = out.report.lines_used,
        available = out.report.lines_available,
        "card rendered"
    );
    Ok(())
}

fn cmd_portrait(args: PortraitArgs) -> anyhow::Result<()> {
    let category = args.category.as_deref().map(Category::from_name_lossy);
    let color = cardgen::portrait_color(args.color, category);
    let size = Size::new(args.width, args.height);

    let client = api_client(args.api);
    let prompt = args.prompt.unwrap_or_else(|| {
        format!("{}, {}", cardgen::PORTRAIT_FRAMING, cardgen::PORTRAIT_SUBJECT)
    });
    let produced = cardgen::generate_or_placeholder(
        client.as_ref(),
        &prompt,
        args.image_size,
        None,
        || cardgen::placeholder_portrait(size, color),
    )?;
    save(&produced.surface, &args.out)
}

fn cmd_texture(ctx: &Ctx, args: TextureArgs) -> anyhow::Result<()> {
    let category = Category::from_name_lossy(&args.category);
    let style = args.style.as_deref().map(TextureStyle::from_name_lossy);
    let size = args.layout.resolve()?.size;

    let client = api_client(args.api);
    let prompt = cardgen::texture_prompt(category, style, args.prompt.as_deref());
    tracing::debug!(%prompt, "texture prompt");
    let produced = cardgen::generate_or_placeholder(
        client.as_ref(),
        &prompt,
        ImageSize::Portrait4x3,
        Some(size),
        || cardgen::placeholder_texture(category, size, ctx.fontdb()),
    )?;
    save(&produced.surface, &args.out)
}

fn cmd_styles(ctx: &Ctx, args: StylesArgs) -> anyhow::Result<()> {
    let client = api_client(args.api);
    let placeholder_size = Size::new(512, 512);
    let card = cardgen::exploration_card();
    let options = RenderOptions::with_layout(LayoutConfig::poker());

    let mut rows = Vec::with_capacity(cardgen::ART_STYLES.len());
    for style in &cardgen::ART_STYLES {
        let portrait_path = args.out_dir.join(style.file_name());
        let origin = if args.cards_only {
            if !portrait_path.is_file() {
                tracing::warn!(style = style.id, "portrait not found, skipping");
                continue;
            }
            None
        } else {
            tracing::info!(style = style.id, "{}", style.name);
            let produced = cardgen::generate_or_placeholder(
                client.as_ref(),
                &style.prompt(),
                ImageSize::Square,
                None,
                || cardgen::placeholder_portrait(placeholder_size, Category::Npc.style().accent),
            )?;
            save(&produced.surface, &portrait_path)?;
            Some(produced.origin)
        };

        let portrait = cardgen::load_image(&portrait_path)?;
        let out = ctx
            .renderer
            .render_card(&card, &options, Some(&portrait), None)
            .with_context(|| format!("render style card '{}'", style.id))?;
        save(&out.surface, &args.out_dir.join(style.card_file_name()))?;
        rows.push(markdown::StyleRow { style, origin });
    }

    cardgen::write_page(
        &args.out_dir,
        "STYLE-COMPARISON.md",
        &markdown::style_page(cardgen::PORTRAIT_SUBJECT, &rows),
    )?;
    Ok(())
}

fn cmd_layout_test(ctx: &Ctx, args: LayoutTestArgs) -> anyhow::Result<()> {
    let layout = args.layout.resolve()?;
    let options = RenderOptions::with_layout(layout.clone());
    let portrait = match &args.portrait {
        Some(path) => load_optional_image(path)?,
        None => None,
    };

    let mut rows = Vec::new();
    for case in cardgen::layout_cases() {
        let out = ctx
            .renderer
            .render_card(&case.card, &options, portrait.as_ref(), None)
            .with_context(|| format!("render layout case '{}'", case.id))?;
        let file = case.file_name();
        save(&out.surface, &args.out_dir.join(&file))?;
        tracing::info!(
            case = case.id,
            used = out.report.lines_used,
            available = out.report.lines_available,
            "layout case"
        );
        rows.push(markdown::LayoutRow {
            id: case.id.to_owned(),
            name: case.card.name.clone(),
            category: case.card.category().name().to_owned(),
            chars: case.card.description.chars().count(),
            lines_used: out.report.lines_used,
            lines_available: out.report.lines_available,
            file,
        });
    }

    let overflowing: Vec<&str> = rows
        .iter()
        .filter(|r| r.overflows())
        .map(|r| r.id.as_str())
        .collect();
    if overflowing.is_empty() {
        tracing::info!("all test cases fit within available space");
    } else {
        tracing::warn!(cases = ?overflowing, "text overflow");
    }

    cardgen::write_page(
        &args.out_dir,
        "LAYOUT-TEST.md",
        &markdown::layout_test_page(&layout, &rows),
    )?;
    Ok(())
}

fn cmd_sizes(ctx: &Ctx, args: SizesArgs) -> anyhow::Result<()> {
    let studies = args.set.studies();
    let card = cardgen::study_card();

    let mut rendered = Vec::new();
    for study in &studies {
        let path = args.out_dir.join(&study.portrait);
        if !path.is_file() {
            tracing::warn!(id = %study.id, path = %path.display(), "skipping: portrait not found");
            continue;
        }
        let portrait = cardgen::load_image(&path)?;
        let stats = CropStats::compute(cardgen::image_size(&portrait), &study.layout)?;
        let out = ctx
            .renderer
            .render_card(&card, &study.options(), Some(&portrait), None)
            .with_context(|| format!("render size study '{}'", study.id))?;
        save(&out.surface, &args.out_dir.join(study.file_name()))?;
        tracing::info!(
            id = %study.id,
            crop_percent = stats.crop_percent,
            lines = stats.lines_available,
            "size study"
        );
        rendered.push((study, stats));
    }

    let rows: Vec<markdown::SizeRow<'_>> = rendered
        .iter()
        .map(|(study, stats)| markdown::SizeRow {
            study: *study,
            stats: *stats,
        })
        .collect();
    cardgen::write_page(
        &args.out_dir,
        args.set.report_file(),
        &markdown::size_page(args.set, &rows),
    )?;
    Ok(())
}

fn cmd_sample(ctx: &Ctx, args: SampleArgs) -> anyhow::Result<()> {
    const CARD_FILE: &str = "card-tarot-inkwash.png";

    let client = api_client(args.api);
    let produced = cardgen::generate_or_placeholder(
        client.as_ref(),
        cardgen::SAMPLE_PROMPT,
        ImageSize::Square,
        None,
        || cardgen::placeholder_portrait(Size::new(1024, 1024), Category::Npc.style().accent),
    )?;
    let portrait_path = args.out_dir.join(cardgen::PORTRAIT_FILE);
    save(&produced.surface, &portrait_path)?;

    let portrait = cardgen::load_image(&portrait_path)?;
    let layout = LayoutConfig::tarot();
    let out = ctx.renderer.render_card(
        &cardgen::sample_card(),
        &RenderOptions::with_layout(layout.clone()),
        Some(&portrait),
        None,
    )?;
    save(&out.surface, &args.out_dir.join(CARD_FILE))?;

    cardgen::write_page(
        &args.out_dir,
        "SAMPLE.md",
        &markdown::sample_page(&layout, CARD_FILE, cardgen::SAMPLE_PROMPT, produced.origin),
    )?;
    if produced.origin == ImageOrigin::Placeholder {
        tracing::info!(
            "sample uses a placeholder portrait; pass --api with FAL_KEY set for a real one"
        );
    }
    Ok(())
}
