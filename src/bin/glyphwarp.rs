use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng as _;

#[derive(Parser, Debug)]
#[command(name = "glyphwarp", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single challenge image as a PNG.
    Render(RenderArgs),
    /// Render many codes in parallel into a directory.
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// TrueType/OpenType font used for the glyphs.
    #[arg(long)]
    font: PathBuf,

    /// JSON generation config; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Glyph size in points.
    #[arg(long)]
    point_size: Option<f32>,

    /// Background color (#rrggbb or #rrggbbaa).
    #[arg(long)]
    background: Option<glyphwarp::Rgba8>,

    /// Text color (#rrggbb or #rrggbbaa).
    #[arg(long)]
    text_color: Option<glyphwarp::Rgba8>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    style: StyleArgs,

    /// Code to draw; a random one is generated when omitted.
    #[arg(long)]
    code: Option<String>,

    /// Length of the random code.
    #[arg(long, default_value_t = 6)]
    length: usize,

    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    #[command(flatten)]
    style: StyleArgs,

    /// Comma-separated codes.
    #[arg(long, value_delimiter = ',', required = true)]
    codes: Vec<String>,

    /// Images per code.
    #[arg(long, default_value_t = 1)]
    repeat: usize,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Base seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Batch(args) => cmd_batch(args),
    }
}

fn load_config(style: &StyleArgs) -> anyhow::Result<glyphwarp::GenerationConfig> {
    let mut cfg = match &style.config {
        Some(path) => glyphwarp::GenerationConfig::from_path(path)?,
        None => glyphwarp::GenerationConfig::default(),
    };
    if let Some(w) = style.width {
        cfg.width = w;
    }
    if let Some(h) = style.height {
        cfg.height = h;
    }
    if let Some(p) = style.point_size {
        cfg.point_size = p;
    }
    if let Some(c) = style.background {
        cfg.background = c;
    }
    if let Some(c) = style.text_color {
        cfg.text_color = c;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn make_generator(
    style: &StyleArgs,
) -> anyhow::Result<glyphwarp::CaptchaGenerator<glyphwarp::FontGlyphSource>> {
    let cfg = load_config(style)?;
    let font = glyphwarp::FontGlyphSource::from_path(&style.font)
        .with_context(|| format!("load font '{}'", style.font.display()))?;
    Ok(glyphwarp::CaptchaGenerator::with_png(cfg, font)?)
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let generator = make_generator(&args.style)?;

    let mut rng = match args.seed {
        Some(seed) => rand_chacha::ChaCha8Rng::seed_from_u64(seed),
        None => rand_chacha::ChaCha8Rng::from_os_rng(),
    };
    let code = match args.code {
        Some(code) => code,
        None => glyphwarp::random_code(&mut rng, args.length),
    };

    let png = generator.generate(&code, &mut rng)?;

    ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    let cfg = generator.config();
    eprintln!(
        "wrote {} ({code}, {}x{})",
        args.out.display(),
        cfg.width,
        cfg.height
    );
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let generator = make_generator(&args.style)?;

    let codes: Vec<&str> = args
        .codes
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .flat_map(|c| std::iter::repeat_n(c, args.repeat))
        .collect();
    if codes.is_empty() {
        anyhow::bail!("no codes to render");
    }

    let opts = glyphwarp::BatchOpts {
        threads: args.threads,
        seed: args.seed,
    };
    let images = generator.generate_batch(&codes, &opts)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for (idx, (code, png)) in codes.iter().zip(images).enumerate() {
        let path = args.out_dir.join(format!("captcha_{idx}_{}.png", file_safe(code)));
        std::fs::write(&path, png).with_context(|| format!("write png '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn file_safe(code: &str) -> String {
    code.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
