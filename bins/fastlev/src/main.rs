//! fastlev: Levenshtein edit distance between strings and files.

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use fastlev_cli::output::{format_size, DistanceReport, Status};
use fastlev_cli::progress;
use fastlev_core::config::Config;
use fastlev_core::error::{exit_codes, Error, ErrorCode, ErrorReport, ResultExt};
use fastlev_distance::{
    distance, distance_async, distance_exact, AsyncOptions, DistanceOptions, Strength,
};
use fastlev_telemetry::{metrics, TelemetryConfig, Timer};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "fastlev")]
#[command(about = "Levenshtein edit distance between strings and files")]
#[command(version)]
struct Cli {
    /// Path to a configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
struct PolicyArgs {
    /// Compare characters through a collator (ignores accents and case)
    #[arg(long)]
    collator: bool,

    /// Collation strength: base, accent or case (implies --collator)
    #[arg(long)]
    strength: Option<Strength>,

    /// Ignore substitution costs from the configuration file
    #[arg(long)]
    no_costs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Distance between two strings
    Distance {
        /// First string
        a: String,
        /// Second string
        b: String,
        #[command(flatten)]
        policy: PolicyArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Distance between the contents of two text files
    Files {
        /// First file
        file_a: PathBuf,
        /// Second file
        file_b: PathBuf,
        /// Use the time-sliced async driver
        #[arg(long = "async")]
        run_async: bool,
        /// Show a progress bar (implies --async)
        #[arg(long)]
        progress: bool,
        /// Slice budget in milliseconds for the async driver
        #[arg(long)]
        slice_ms: Option<u64>,
        #[command(flatten)]
        policy: PolicyArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Time distances between consecutive words of a word list
    Bench {
        /// Passes over the word list
        #[arg(long, default_value = "10")]
        rounds: usize,
        /// Newline-separated word list (defaults to a built-in list)
        #[arg(long)]
        words: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    fn json(&self) -> bool {
        match self {
            Commands::Distance { json, .. }
            | Commands::Files { json, .. }
            | Commands::Bench { json, .. } => *json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let json = cli.command.json();

    if let Err(err) = run(cli) {
        let code = err
            .downcast_ref::<Error>()
            .map_or(exit_codes::FAILURE, |e| e.code.exit_code());
        if json {
            print_error_report(&err);
        } else {
            Status::error(&format!("{:#}", err));
        }
        std::process::exit(code);
    }
}

/// Structured failure for `--json` callers, on stdout like successful output
fn print_error_report(err: &anyhow::Error) {
    let report: ErrorReport = match err.downcast_ref::<Error>() {
        Some(e) => e.to_report(),
        None => Error::new(ErrorCode::Unknown, format!("{:#}", err)).to_report(),
    };
    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{}", text),
        Err(_) => Status::error(&format!("{:#}", err)),
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    fastlev_telemetry::init_with_config(TelemetryConfig::from_verbosity(
        &config.schema.logging.level,
        cli.verbose,
        cli.quiet,
    ))?;
    tracing::debug!(path = ?config.path, "configuration loaded");

    match cli.command {
        Commands::Distance { a, b, policy, json } => run_distance(&a, &b, &policy, json, &config),
        Commands::Files {
            file_a,
            file_b,
            run_async,
            progress: show_progress,
            slice_ms,
            policy,
            json,
        } => {
            let budget = slice_ms.map_or_else(|| config.slice_budget(), Duration::from_millis);
            let mode = FilesMode {
                run_async: run_async || show_progress,
                progress: show_progress,
                budget,
            };
            run_files(&file_a, &file_b, &mode, &policy, json, &config)
        }
        Commands::Bench { rounds, words, json } => run_bench(rounds, words.as_deref(), json),
    }
}

/// Merge command-line policy flags over the configuration file
fn resolve_options(args: &PolicyArgs, config: &Config) -> (DistanceOptions, String) {
    let mut options = config.distance_options();
    if args.collator || args.strength.is_some() {
        options.use_collator = true;
    }
    if let Some(strength) = args.strength {
        options.collation_strength = strength;
    }
    if args.no_costs {
        options.substitution_cost = None;
    }

    let mut label = if options.use_collator {
        format!("collator({})", strength_name(options.collation_strength))
    } else {
        "exact".to_string()
    };
    if options.substitution_cost.is_some() {
        label.push_str(" + cost table");
    }
    (options, label)
}

fn strength_name(strength: Strength) -> &'static str {
    match strength {
        Strength::Base => "base",
        Strength::Accent => "accent",
        Strength::Case => "case",
    }
}

fn print_report(report: &DistanceReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report.render());
    }
    Ok(())
}

fn run_distance(a: &str, b: &str, args: &PolicyArgs, json: bool, config: &Config) -> Result<()> {
    let (options, policy) = resolve_options(args, config);

    let timer = Timer::start("distance");
    let d = distance(a, b, &options).map_err(Error::from)?;
    let elapsed = timer.stop();

    print_report(
        &DistanceReport {
            distance: d,
            len_a: a.chars().count(),
            len_b: b.chars().count(),
            policy,
            mode: "sync",
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        },
        json,
    )
}

struct FilesMode {
    run_async: bool,
    progress: bool,
    budget: Duration,
}

fn read_text(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("While reading {}", path.display()))?;
    tracing::info!(path = %path.display(), size = %format_size(text.len() as u64), "input loaded");
    Ok(text)
}

fn run_files(
    file_a: &Path,
    file_b: &Path,
    mode: &FilesMode,
    args: &PolicyArgs,
    json: bool,
    config: &Config,
) -> Result<()> {
    let a = read_text(file_a)?;
    let b = read_text(file_b)?;
    let (options, policy) = resolve_options(args, config);

    fastlev_telemetry::timed_span!("files", async_mode = mode.run_async);
    let started = Instant::now();

    let d = if mode.run_async {
        let runtime = tokio::runtime::Builder::new_current_thread().build()?;

        let mut async_options = AsyncOptions::new()
            .with_distance_options(options)
            .with_slice_budget(mode.budget);

        let bar = (mode.progress && !json).then(|| progress::percent_bar("Comparing"));
        if let Some(bar) = bar.clone() {
            async_options = async_options.on_progress(move |percent| {
                progress::set_percent(&bar, percent);
            });
        }

        let outcome = runtime.block_on(distance_async(&a, &b, async_options));
        if let Some(bar) = &bar {
            match &outcome {
                Ok(_) => progress::finish_success(bar, "Compared"),
                Err(err) => progress::finish_error(bar, &err.to_string()),
            }
        }
        outcome.map_err(Error::from)?
    } else {
        distance(&a, &b, &options).map_err(Error::from)?
    };

    print_report(
        &DistanceReport {
            distance: d,
            len_a: a.chars().count(),
            len_b: b.chars().count(),
            policy,
            mode: if mode.run_async { "async" } else { "sync" },
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        },
        json,
    )
}

/// Leading words of a Scrabble dictionary.
const BUILTIN_WORDS: &[&str] = &[
    "aa", "aah", "aahed", "aahing", "aahs", "aal", "aalii", "aaliis", "aals", "aardvark",
    "aardvarks", "aardwolf", "aardwolves", "aargh", "aarrgh", "aarrghh", "aarti", "aartis", "aas",
    "aasvogel", "aasvogels", "ab", "aba", "abac", "abaca", "abacas", "abaci", "aback", "abacs",
    "abacterial", "abactinal", "abactinally", "abactor", "abactors", "abacus", "abacuses", "abaft",
    "abaka", "abakas", "abalone", "abalones", "abamp", "abampere", "abamperes", "abamps", "aband",
    "abanded", "abanding", "abandon", "abandoned",
];

fn run_bench(rounds: usize, words: Option<&Path>, json: bool) -> Result<()> {
    let loaded;
    let words: Vec<&str> = match words {
        Some(path) => {
            loaded = read_text(path)?;
            loaded.lines().map(str::trim).filter(|w| !w.is_empty()).collect()
        }
        None => BUILTIN_WORDS.to_vec(),
    };
    if words.is_empty() {
        anyhow::bail!("word list is empty");
    }

    let mut checksum = 0usize;
    for _ in 0..rounds {
        let timer = Timer::start("bench.round");
        let mut previous = "";
        for &word in &words {
            checksum += distance_exact(previous, word);
            previous = word;
        }
        timer.stop();
        metrics().increment_by("bench.comparisons", words.len() as u64);
    }

    let stats = metrics()
        .histogram_stats("bench.round")
        .ok_or_else(|| anyhow::anyhow!("no rounds were run"))?;

    if json {
        let report = serde_json::json!({
            "rounds": rounds,
            "words": words.len(),
            "comparisons": metrics().counter("bench.comparisons"),
            "checksum": checksum,
            "round_ms": stats,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        Status::header("Consecutive-word benchmark");
        Status::info(&format!(
            "{} rounds x {} words ({} comparisons, checksum {})",
            rounds,
            words.len(),
            metrics().counter("bench.comparisons"),
            checksum
        ));
        Status::success(&format!(
            "round time: mean {:.3}ms, p50 {:.3}ms, p95 {:.3}ms, max {:.3}ms",
            stats.mean, stats.p50, stats.p95, stats.max
        ));
    }

    Ok(())
}
