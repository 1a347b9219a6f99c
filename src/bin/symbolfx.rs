use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "symbolfx", version)]
struct Cli {
    /// Log engine decisions at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the classification of an SVG asset as JSON.
    Classify(ClassifyArgs),
    /// Style and animate an asset, then export the resulting SVG (and optionally a PNG).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct ClassifyArgs {
    /// Input SVG.
    file: PathBuf,

    /// Name hint used by the classifier (defaults to the file name).
    #[arg(long)]
    name: Option<String>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input SVG. Its directory is the asset root.
    file: PathBuf,

    /// Render options as inline JSON, e.g. '{"animation":"liquid-fill","targetValue":60}'.
    #[arg(long, conflicts_with = "options_file")]
    options: Option<String>,

    /// Render options read from a JSON file.
    #[arg(long)]
    options_file: Option<PathBuf>,

    /// Frames of virtual time to run before exporting.
    #[arg(long, default_value_t = 0)]
    frames: u32,

    /// Frame rate of the virtual clock.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    /// Optional PNG preview path.
    #[arg(long)]
    png: Option<PathBuf>,

    /// PNG width in pixels.
    #[arg(long, default_value_t = 256)]
    width: u32,

    /// PNG height in pixels.
    #[arg(long, default_value_t = 256)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    match cli.cmd {
        Command::Classify(args) => cmd_classify(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn file_name(path: &Path) -> anyhow::Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("'{}' has no file name", path.display()))
}

fn cmd_classify(args: ClassifyArgs) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("read svg '{}'", args.file.display()))?;
    let hint = match args.name {
        Some(n) => n,
        None => file_name(&args.file)?,
    };
    let verdict = symbolfx::classify(&content, Some(&hint));
    println!(
        "{}",
        serde_json::to_string_pretty(&verdict).context("serialize classification")?
    );
    Ok(())
}

fn read_options(args: &RenderArgs) -> anyhow::Result<symbolfx::RenderOptions> {
    let text = match (&args.options, &args.options_file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("read options '{}'", path.display()))?,
        (None, None) => return Ok(symbolfx::RenderOptions::default()),
    };
    Ok(symbolfx::RenderOptions::from_json(&text)?)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be > 0");
    }
    let options = read_options(&args)?;

    let root = args
        .file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let key = file_name(&args.file)?;

    let mut engine = symbolfx::Engine::new(symbolfx::DirSource::new(root));
    let element = engine.render("cli", &key, options);

    let frame_ms = 1000.0 / args.fps;
    for i in 0..=args.frames {
        engine.tick(f64::from(i) * frame_ms);
    }
    let stats = engine.stats();
    tracing::debug!(?stats, "virtual time finished");

    let svg = engine
        .to_svg_string(element)
        .context("rendered element disappeared")?;
    write_output(&args.out, svg.as_bytes())?;
    eprintln!("wrote {}", args.out.display());

    if let Some(png) = &args.png {
        let preview = engine.rasterize(element, args.width, args.height)?;
        if let Some(parent) = png.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            png,
            &preview.to_straight_rgba8(),
            preview.width,
            preview.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", png.display()))?;
        eprintln!("wrote {}", png.display());
    }
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write svg '{}'", path.display()))
}
