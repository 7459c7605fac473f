use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use phichart::{Chart, ConversionReport, ConvertOptions, FlatChart, LayeredChart};

#[derive(Parser, Debug)]
#[command(name = "phichart", version, about = "Convert judge-line charts between flat and layered schemas")]
struct Cli {
    /// Log per-line conversion details.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Flatten a layered (RePhiEdit) chart into a flat (PhiFans) chart.
    ToFlat(ConvertArgs),
    /// Expand a flat (PhiFans) chart into a layered (RePhiEdit) chart.
    ToLayered(ConvertArgs),
    /// Detect the input schema and convert to the other one.
    Convert(AutoArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Input chart JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output chart JSON.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    tuning: TuningArgs,
}

#[derive(Args, Debug)]
struct AutoArgs {
    /// Input chart JSON of either schema.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output chart JSON (defaults to phifans.json / rpe.json next to the input).
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    tuning: TuningArgs,
}

#[derive(Args, Debug)]
struct TuningArgs {
    /// Resampling steps per beat.
    #[arg(long, default_value_t = 8)]
    precision_denominator: u32,

    /// Layered speed per flat speed unit.
    #[arg(long, default_value_t = phichart::DEFAULT_SPEED_RATIO)]
    speed_ratio: f32,

    /// Largest denominator tried when reconstructing sampled beats.
    #[arg(long, default_value_t = phichart::DEFAULT_MAX_DENOMINATOR)]
    max_denominator: usize,

    /// Convert lines one after another instead of on a thread pool.
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

impl TuningArgs {
    fn options(&self) -> anyhow::Result<ConvertOptions> {
        anyhow::ensure!(
            self.precision_denominator > 0,
            "--precision-denominator must be >= 1"
        );
        let opts = ConvertOptions {
            precision: 1.0 / f64::from(self.precision_denominator),
            speed_ratio: self.speed_ratio,
            max_denominator: self.max_denominator,
            parallel: !self.sequential,
            threads: self.threads,
            ..ConvertOptions::default()
        };
        opts.validate()?;
        Ok(opts)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match cli.cmd {
        Command::ToFlat(args) => cmd_to_flat(args),
        Command::ToLayered(args) => cmd_to_layered(args),
        Command::Convert(args) => cmd_convert(args),
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let level = if quiet {
        tracing::Level::ERROR
    } else if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn cmd_to_flat(args: ConvertArgs) -> anyhow::Result<()> {
    let opts = args.tuning.options()?;
    let chart = LayeredChart::from_path(&args.in_path)?;
    write_flat(&chart, &opts, &args.out)
}

fn cmd_to_layered(args: ConvertArgs) -> anyhow::Result<()> {
    let opts = args.tuning.options()?;
    let chart = FlatChart::from_path(&args.in_path)?;
    write_layered(&chart, &opts, &args.out)
}

fn cmd_convert(args: AutoArgs) -> anyhow::Result<()> {
    let opts = args.tuning.options()?;
    let dir = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    match Chart::from_path(&args.in_path)? {
        Chart::Layered(chart) => {
            let out = args.out.unwrap_or_else(|| dir.join("phifans.json"));
            write_flat(&chart, &opts, &out)
        }
        Chart::Flat(chart) => {
            let out = args.out.unwrap_or_else(|| dir.join("rpe.json"));
            write_layered(&chart, &opts, &out)
        }
    }
}

fn write_flat(chart: &LayeredChart, opts: &ConvertOptions, out: &Path) -> anyhow::Result<()> {
    let (flat, report) = phichart::to_flat(chart, opts)?;
    write_json(out, &flat.to_json_string()?, &report)
}

fn write_layered(chart: &FlatChart, opts: &ConvertOptions, out: &Path) -> anyhow::Result<()> {
    let (layered, report) = phichart::to_layered(chart, opts)?;
    write_json(out, &layered.to_json_string()?, &report)
}

fn write_json(out: &Path, json: &str, report: &ConversionReport) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, json).with_context(|| format!("write chart '{}'", out.display()))?;

    tracing::info!(
        warnings = report.warnings.len(),
        resampled = report.resampled_lines,
        direct = report.direct_lines,
        "conversion finished"
    );
    eprintln!("wrote {}", out.display());
    Ok(())
}
