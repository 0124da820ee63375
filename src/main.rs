use std::fs;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use ising_sim::simulation::total_sweeps;
use ising_sim::{run_scan, Animation, AnimationConfig, Dynamics, InitialState, SimConfig};

mod render;

#[derive(Parser, Debug)]
#[command(name = "ising")]
#[command(about = "Monte Carlo simulation of the 2D Ising model")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan a temperature range and write one record per temperature
    Scan {
        /// Parameter file: `min_temp, max_temp, temp_step, sweeps, eqm_sweeps, n, bootstrap_samples, dynamics, side`
        params: PathBuf,

        /// Output file for the records
        #[arg(long, short)]
        output: PathBuf,

        #[arg(long, default_value_t = SimConfig::DEFAULT_SEED)]
        seed: u64,

        /// Run temperature points one after another on this thread
        #[arg(long)]
        sequential: bool,

        /// Estimate the energy autocorrelation time up to this lag
        #[arg(long)]
        autocorrelation_max_lag: Option<usize>,
    },

    /// Show the lattice evolving in the terminal
    Animate {
        #[arg(long, default_value_t = 50)]
        size: usize,

        #[arg(long, default_value_t = 1.0)]
        temperature: f64,

        /// up, random or split
        #[arg(long, default_value = "random")]
        initial: String,

        /// Fraction of columns set up by the split start
        #[arg(long, default_value_t = 0.5)]
        split_fraction: f64,

        /// glauber or kawasaki
        #[arg(long, default_value = "kawasaki")]
        dynamics: String,

        #[arg(long, default_value_t = 10_000)]
        frames: usize,

        #[arg(long, default_value_t = 2500)]
        steps_per_frame: usize,

        #[arg(long, default_value_t = 50)]
        interval_ms: u64,

        #[arg(long, default_value_t = SimConfig::DEFAULT_SEED)]
        seed: u64,
    },
}

/// Default filter is `info`; `RUST_LOG` overrides it.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn scan(
    params: PathBuf,
    output: PathBuf,
    seed: u64,
    sequential: bool,
    autocorrelation_max_lag: Option<usize>,
) -> Result<()> {
    let text = fs::read_to_string(&params)
        .with_context(|| format!("failed to read {}", params.display()))?;
    let line = text
        .lines()
        .find(|l| !l.trim().is_empty())
        .with_context(|| format!("{} is empty", params.display()))?;

    let mut config = SimConfig::from_param_line(line)
        .with_context(|| format!("bad parameter line in {}", params.display()))?;
    config.seed = seed;
    config.sequential = sequential;
    config.autocorrelation_max_lag = autocorrelation_max_lag;
    config.checked()?;

    let pb = ProgressBar::new(total_sweeps(&config) as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{msg} [{bar:40}] {pos}/{len} [{elapsed_precise} < {eta_precise}, {per_sec}]",
        )?
        .progress_chars("=> "),
    );
    pb.set_message("sweeps");

    let points = run_scan(&config, &|| pb.inc(1))?;
    pb.finish();

    let file = fs::File::create(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    for point in &points {
        writeln!(writer, "{}", point.to_record())?;
    }
    writer.flush()?;

    info!(
        records = points.len(),
        path = %output.display(),
        "wrote output"
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn animate(
    size: usize,
    temperature: f64,
    initial: &str,
    split_fraction: f64,
    dynamics: &str,
    frames: usize,
    steps_per_frame: usize,
    interval_ms: u64,
    seed: u64,
) -> Result<()> {
    let initial = match InitialState::try_from(initial)? {
        InitialState::Split { .. } => InitialState::Split {
            fraction: split_fraction,
        },
        other => other,
    };
    anyhow::ensure!(size > 0, "size must be positive");
    anyhow::ensure!(temperature > 0.0, "temperature must be positive");

    let config = AnimationConfig {
        rows: size,
        cols: size,
        temperature,
        initial,
        dynamics: Dynamics::try_from(dynamics)?,
        steps_per_frame,
        seed,
    };

    let mut animation = Animation::new(&config);
    let stdout = std::io::stdout();
    let interval = Duration::from_millis(interval_ms);
    for _ in 0..frames {
        animation.advance_frame();
        let mut out = stdout.lock();
        render::draw_frame(&mut out, animation.lattice(), &animation_status(&animation))?;
        out.flush()?;
        drop(out);
        thread::sleep(interval);
    }
    Ok(())
}

fn animation_status(animation: &Animation) -> String {
    let lattice = animation.lattice();
    format!(
        "{} T={:.3} frame {} E={:.0} |M|={:.0}",
        animation.dynamics().name(),
        lattice.temperature(),
        animation.frames(),
        lattice.total_energy(),
        lattice.magnetisation(),
    )
}

fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    match args.command {
        Command::Scan {
            params,
            output,
            seed,
            sequential,
            autocorrelation_max_lag,
        } => scan(params, output, seed, sequential, autocorrelation_max_lag),
        Command::Animate {
            size,
            temperature,
            initial,
            split_fraction,
            dynamics,
            frames,
            steps_per_frame,
            interval_ms,
            seed,
        } => animate(
            size,
            temperature,
            &initial,
            split_fraction,
            &dynamics,
            frames,
            steps_per_frame,
            interval_ms,
            seed,
        ),
    }
}
