use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "panelkit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,

    /// Log per-frame diagnostics (layout passes, regenerated nodes).
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scene for some frames and write the last one as a PNG.
    Frame(FrameArgs),
    /// Parse, validate and build a scene without rendering it.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Number of frames to run.
    #[arg(long, default_value_t = 1)]
    frames: u64,

    /// Seconds elapsed per frame.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Override the scene's canvas width.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Override the scene's canvas height.
    #[arg(long, requires = "width")]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_scene_json(path: &Path) -> anyhow::Result<panelkit::SceneDesc> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("open scene '{}'", path.display()))?;
    let desc = panelkit::SceneDesc::from_json(&json).with_context(|| "parse scene JSON")?;
    Ok(desc)
}

fn load_scene(path: &Path) -> anyhow::Result<panelkit::Scene> {
    let desc = read_scene_json(path)?;
    let assets_root = path.parent().unwrap_or_else(|| Path::new("."));
    let scene = panelkit::Scene::from_desc(
        &desc,
        assets_root.to_path_buf(),
        Box::new(panelkit::ParleyTextRenderer::new()),
    )?;
    Ok(scene)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if args.frames == 0 {
        anyhow::bail!("--frames must be >= 1");
    }

    let mut scene = load_scene(&args.in_path)?;
    if let (Some(width), Some(height)) = (args.width, args.height) {
        scene.set_canvas(panelkit::Canvas::new(width, height)?)?;
    }

    let mut frame = scene.frame(args.dt)?;
    for _ in 1..args.frames {
        frame = scene.frame(args.dt)?;
    }

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    let mut nodes = 0usize;
    for root in scene.roots() {
        root.visit(&mut |_| nodes += 1);
    }
    eprintln!("ok: {} ({nodes} nodes)", args.in_path.display());
    Ok(())
}
