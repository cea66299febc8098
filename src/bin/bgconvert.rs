use std::path::{Path, PathBuf};

use anyhow::Context as _;
use bgconvert::{
    BackgroundMode, BatchMode, BatchOrchestrator, ConvertOptions, OutputFormat, VectorStrategy,
};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "bgconvert", version)]
struct Cli {
    /// Log pipeline details at debug level.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a single image.
    Convert(ConvertArgs),
    /// Convert many images into `image<N>.<format>` files.
    Batch(BatchArgs),
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input image (PNG, JPEG, ...).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output file.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    opts: OptionArgs,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Input images, in output order.
    #[arg(long = "in", required = true, num_args = 1..)]
    in_paths: Vec<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Convert images concurrently on a worker pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    #[command(flatten)]
    opts: OptionArgs,
}

#[derive(Args, Debug)]
struct OptionArgs {
    /// JSON options file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: png, svg, jpeg/jpg (case-insensitive).
    #[arg(long)]
    format: Option<String>,

    /// JPEG quality in [0, 1].
    #[arg(long)]
    quality: Option<f32>,

    /// Vectorizer strategy for SVG output.
    #[arg(long, value_enum)]
    strategy: Option<StrategyChoice>,

    /// Treat the two most frequent corner colors as background.
    #[arg(long, default_value_t = false)]
    dual_background: bool,

    /// Per-channel background tolerance.
    #[arg(long)]
    tolerance: Option<u8>,

    /// Skip SVG canonicalization and write the raw document.
    #[arg(long, default_value_t = false)]
    raw_svg: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyChoice {
    Pixel,
    Run,
    Block,
}

impl From<StrategyChoice> for VectorStrategy {
    fn from(c: StrategyChoice) -> Self {
        match c {
            StrategyChoice::Pixel => VectorStrategy::PixelRects,
            StrategyChoice::Run => VectorStrategy::RunMerge,
            StrategyChoice::Block => VectorStrategy::BlockMerge,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Batch(args) => cmd_batch(args),
    }
}

fn resolve_options(args: &OptionArgs) -> anyhow::Result<ConvertOptions> {
    let mut opts = match &args.config {
        Some(path) => ConvertOptions::from_path(path)?,
        None => ConvertOptions::default(),
    };
    if let Some(format) = &args.format {
        opts.format = format.parse::<OutputFormat>()?;
    }
    if let Some(quality) = args.quality {
        opts.quality = quality;
    }
    if let Some(strategy) = args.strategy {
        opts.strategy = strategy.into();
    }
    if args.dual_background {
        opts.background = BackgroundMode::Dual;
    }
    if let Some(tolerance) = args.tolerance {
        opts.tolerance = tolerance;
    }
    if args.raw_svg {
        opts.canonicalize_svg = false;
    }
    opts.validate()?;
    Ok(opts)
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let opts = resolve_options(&args.opts)?;
    let input = std::fs::read(&args.in_path)
        .with_context(|| format!("read input '{}'", args.in_path.display()))?;

    let asset = bgconvert::convert_image(&input, &opts)?;
    write_output(&args.out, &asset.bytes)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let opts = resolve_options(&args.opts)?;
    let inputs = args
        .in_paths
        .iter()
        .map(|p| std::fs::read(p).with_context(|| format!("read input '{}'", p.display())))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mode = if args.parallel {
        BatchMode::Parallel
    } else {
        BatchMode::Sequential
    };
    let orch = BatchOrchestrator::new(args.threads)?;
    let outputs = orch.convert_batch(&inputs, &opts, mode).map_err(|e| {
        let name = e
            .failed_index()
            .and_then(|i| args.in_paths.get(i))
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        anyhow::Error::new(e).context(format!("batch conversion failed {name}"))
    })?;

    for (i, asset) in outputs.iter().enumerate() {
        write_output(&args.out_dir.join(asset.entry_name(i)), &asset.bytes)?;
    }

    eprintln!(
        "wrote {} file(s) to {}",
        outputs.len(),
        args.out_dir.display()
    );
    Ok(())
}
