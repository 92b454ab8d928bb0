mod config;
mod inference;
mod logging;
mod model;
mod report;
mod session;
mod synth;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::config::SessionConfig;
use crate::inference::InferenceProvider;
use crate::model::activity::ActivityLabel;
use crate::report::{OutputFormat, Reporter, text};
use crate::session::Session;
use crate::session::runner::{RunnerOptions, failure_notice, run_session};

#[derive(Debug, Parser)]
#[command(
    name = "mmwave-har-demo",
    version,
    about = "Millimeter-wave radar human-activity classifier demo"
)]
struct Cli {
    /// Debug-level logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the mock classification loop for a fixed number of ticks.
    Simulate(SimulateArgs),
    /// Interactive session driven by operator commands on stdin.
    Session(SessionArgs),
    /// Classify the recorded sample once with the pretrained model.
    Classify(ClassifyArgs),
    /// List the activity labels.
    Labels,
}

#[derive(Debug, Clone, Args)]
struct CommonArgs {
    /// JSON session config; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    interval_ms: Option<u64>,

    #[arg(long)]
    history_capacity: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Args)]
struct SimulateArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[arg(long, default_value_t = 25)]
    ticks: usize,

    /// Activity to treat as ground truth (key or name, e.g. `fall`).
    #[arg(long)]
    force: Option<ActivityLabel>,

    /// Tick back to back instead of waiting for the interval.
    #[arg(long)]
    no_wait: bool,

    /// Print the history after the last tick.
    #[arg(long)]
    show_history: bool,
}

#[derive(Debug, Clone, Args)]
struct SessionArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[arg(long)]
    model: Option<PathBuf>,

    #[arg(long)]
    sample: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct ClassifyArgs {
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    model: Option<PathBuf>,

    #[arg(long)]
    sample: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| e.to_string())?;

    match cli.command {
        Command::Simulate(args) => runtime.block_on(run_simulate(args)),
        Command::Session(args) => runtime.block_on(run_interactive(args)),
        Command::Classify(args) => runtime.block_on(run_classify(args)),
        Command::Labels => {
            println!("{}", text::render_labels());
            Ok(())
        }
    }
}

fn resolve_config(
    path: Option<&PathBuf>,
    common: Option<&CommonArgs>,
    model: Option<&PathBuf>,
    sample: Option<&PathBuf>,
) -> Result<SessionConfig, String> {
    let mut config = match path {
        Some(path) => SessionConfig::load(path).map_err(|e| e.to_string())?,
        None => SessionConfig::default(),
    };
    if let Some(common) = common {
        if let Some(seed) = common.seed {
            config.seed = Some(seed);
        }
        if let Some(ms) = common.interval_ms {
            config.tick_interval_ms = ms;
        }
        if let Some(cap) = common.history_capacity {
            config.history_capacity = cap;
        }
    }
    if let Some(model) = model {
        config.model_path = model.clone();
    }
    if let Some(sample) = sample {
        config.sample_path = sample.clone();
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

async fn run_simulate(args: SimulateArgs) -> Result<(), String> {
    let config = resolve_config(args.common.config.as_ref(), Some(&args.common), None, None)?;
    let mut session = Session::new(config.history_capacity, make_rng(config.seed));
    session.set_forced(args.force);
    session.start();

    let stdout = std::io::stdout();
    let mut reporter = Reporter::new(stdout.lock(), args.common.format);
    let mut ticker = tokio::time::interval(config.tick_interval());
    for _ in 0..args.ticks {
        if !args.no_wait {
            ticker.tick().await;
        }
        if let Some(outcome) = session.tick() {
            reporter.tick(&outcome).map_err(|e| e.to_string())?;
        }
    }
    session.stop();
    if args.show_history {
        reporter
            .history(session.history())
            .map_err(|e| e.to_string())?;
    }
    reporter.flush().map_err(|e| e.to_string())?;
    Ok(())
}

async fn run_interactive(args: SessionArgs) -> Result<(), String> {
    let config = resolve_config(
        args.common.config.as_ref(),
        Some(&args.common),
        args.model.as_ref(),
        args.sample.as_ref(),
    )?;
    let provider = Arc::new(InferenceProvider::new(config.model_path.clone()));
    info!(
        "session: model={}, sample={}, interval={}ms",
        provider.model_path().display(),
        config.sample_path.display(),
        config.tick_interval_ms
    );
    let mut session = Session::new(config.history_capacity, make_rng(config.seed));
    let options = RunnerOptions {
        tick_interval: config.tick_interval(),
        sample_path: config.sample_path.clone(),
    };

    let stdout = std::io::stdout();
    let mut reporter = Reporter::new(stdout.lock(), args.common.format);
    reporter
        .raw("type `help` for commands")
        .map_err(|e| e.to_string())?;
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let reason = run_session(&mut session, provider, &options, input, &mut reporter)
        .await
        .map_err(|e| e.to_string())?;
    info!("session ended: {:?}", reason);
    Ok(())
}

async fn run_classify(args: ClassifyArgs) -> Result<(), String> {
    let config = resolve_config(
        args.config.as_ref(),
        None,
        args.model.as_ref(),
        args.sample.as_ref(),
    )?;
    let provider = InferenceProvider::new(config.model_path.clone());
    let mut session = Session::new(config.history_capacity, make_rng(config.seed));
    let stdout = std::io::stdout();
    let mut reporter = Reporter::new(stdout.lock(), args.format);

    let loaded = provider.load().await;
    let result = match loaded {
        Ok(_) => provider.classify_sample(&config.sample_path).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(real) => {
            let outcome = session.apply_real(&real);
            reporter
                .real_result(&real, &outcome)
                .map_err(|e| e.to_string())?;
            reporter.flush().map_err(|e| e.to_string())?;
            Ok(())
        }
        Err(err) => Err(failure_notice(&err)),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
