mod viewer;

use clap::{Parser, Subcommand};
use particlefall_core::{
    run_headless, FixedTimestep, Simulation, SimulationConfig, SimulationSummary,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use viewer::ViewerApp;

#[derive(Parser)]
#[command(name = "particlefall")]
#[command(about = "particlefall - a small 2D particle fountain", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a window and render the live simulation
    Run {
        /// TOML config file, reloaded whenever it changes
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Simulate without a window and print a summary
    Headless {
        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of fixed ticks to simulate
        #[arg(short, long, default_value_t = 600)]
        ticks: u64,
        /// Pace ticks at the configured rate instead of running flat out
        #[arg(long)]
        realtime: bool,
    },
    /// Print the default configuration as TOML
    Config,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config } => run_viewer(config),
        Commands::Headless {
            config,
            ticks,
            realtime,
        } => run_without_window(config.as_deref(), ticks, realtime),
        Commands::Config => print_default_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            Ok(SimulationConfig::from_toml_file(path)?)
        }
        None => Ok(SimulationConfig::default()),
    }
}

fn run_viewer(config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path.as_deref())?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([512.0, 560.0])
            .with_title("particlefall"),
        ..Default::default()
    };

    eframe::run_native(
        "particlefall",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(config, config_path, cc)))),
    )?;

    Ok(())
}

fn run_without_window(
    config_path: Option<&Path>,
    ticks: u64,
    realtime: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;

    let summary = if realtime {
        run_paced(config, ticks)
    } else {
        run_headless(config, ticks)
    };

    print_summary(&summary);
    Ok(())
}

/// Tick at the configured rate, sleeping between ticks
fn run_paced(config: SimulationConfig, ticks: u64) -> SimulationSummary {
    let mut clock = FixedTimestep::new(config.tick_rate_hz);
    let mut simulation = Simulation::new(config);
    let mut last_frame = Instant::now();

    while simulation.ticks() < ticks {
        let now = Instant::now();
        let due = clock.consume_steps(now.duration_since(last_frame).as_secs_f64());
        last_frame = now;

        for _ in 0..due {
            if simulation.ticks() >= ticks {
                break;
            }
            simulation.tick();
        }

        std::thread::sleep(clock.time_until_next_step());
    }

    simulation.summary()
}

fn print_summary(summary: &SimulationSummary) {
    println!("ticks = {}", summary.ticks);
    println!("elapsed = {:.3}", summary.elapsed_seconds);
    println!("live = {}", summary.live);
    println!("spawned = {}", summary.stats.spawned);
    println!("timed_out = {}", summary.stats.timed_out);
    println!("settled = {}", summary.stats.settled);
}

fn print_default_config() -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", SimulationConfig::default().to_toml_string()?);
    Ok(())
}
