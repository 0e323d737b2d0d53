use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "assetforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the fixture set into a directory.
    Generate(GenerateArgs),
    /// Print a JSON structure report for existing files.
    Probe(ProbeArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Output directory (created if missing).
    #[arg(long)]
    out_dir: PathBuf,

    /// JSON file overriding fixture parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only write these fixtures (repeatable). Order on disk is always png, jpg, wav, mp3, glb.
    #[arg(long, value_enum)]
    only: Vec<KindChoice>,

    /// Skip the MP3 step.
    #[arg(long)]
    no_mp3: bool,

    /// Log warnings and errors only.
    #[arg(long)]
    quiet: bool,
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Files to probe.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Measure peak and RMS level of WAV files.
    #[arg(long)]
    volume: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum KindChoice {
    Png,
    Jpg,
    Wav,
    Mp3,
    Glb,
}

impl From<KindChoice> for assetforge::FixtureKind {
    fn from(choice: KindChoice) -> Self {
        match choice {
            KindChoice::Png => assetforge::FixtureKind::Png,
            KindChoice::Jpg => assetforge::FixtureKind::Jpeg,
            KindChoice::Wav => assetforge::FixtureKind::Wav,
            KindChoice::Mp3 => assetforge::FixtureKind::Mp3,
            KindChoice::Glb => assetforge::FixtureKind::Glb,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let quiet = matches!(&cli.cmd, Command::Generate(args) if args.quiet);
    init_tracing(if quiet { "warn" } else { "info" });

    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Probe(args) => cmd_probe(args),
    }
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut opts = match &args.config {
        Some(path) => assetforge::FixtureOpts::from_path(path)?,
        None => assetforge::FixtureOpts::default(),
    };
    if args.no_mp3 {
        opts.mp3.enabled = false;
    }

    let kinds: Vec<assetforge::FixtureKind> = if args.only.is_empty() {
        assetforge::FixtureKind::ALL.to_vec()
    } else {
        args.only.iter().map(|&k| k.into()).collect()
    };

    let report = assetforge::generate(&args.out_dir, &opts, &kinds)
        .with_context(|| format!("generate fixtures in '{}'", args.out_dir.display()))?;

    for path in &report.written {
        eprintln!("wrote {}", path.display());
    }
    if let Some(assetforge::Mp3Outcome::Skipped { .. }) = &report.mp3 {
        eprintln!("skipped test.mp3 (no usable transcoder)");
    }
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    for path in &args.paths {
        let report = assetforge::probe_path(path, args.volume)?;
        let json = serde_json::to_string_pretty(&report).context("serialize probe report")?;
        println!("{json}");
    }
    Ok(())
}
