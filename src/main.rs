use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wave_lab::app::{Tab, WaveLabApp};
use wave_lab::{AudioParams, SimulationController, SimulationParams, WavePair};

#[derive(Parser, Debug)]
#[command(name = "wave-lab", version, about = "Wave interference simulator")]
struct Args {
    /// Tab to open instead of the start menu
    #[arg(long, value_enum)]
    tab: Option<Tab>,

    /// Milliseconds between simulation frames
    #[arg(long, default_value_t = 30)]
    frame_ms: u64,

    /// Simulation time added per frame
    #[arg(long, default_value_t = 0.1)]
    time_step: f64,

    /// Number of x samples over [0, 4π]
    #[arg(long, default_value_t = 500)]
    samples: usize,

    /// Audio sample rate in Hz
    #[arg(long, default_value_t = 44_100)]
    sample_rate: u32,

    /// Audio block size in samples
    #[arg(long, default_value_t = 1024)]
    block_size: u32,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn simulation_params(&self) -> SimulationParams {
        SimulationParams {
            sample_count: self.samples,
            time_step: self.time_step,
            frame_interval: Duration::from_millis(self.frame_ms),
            ..SimulationParams::default()
        }
    }

    fn audio_params(&self) -> AudioParams {
        AudioParams {
            sample_rate: self.sample_rate,
            block_size: self.block_size,
            ..AudioParams::default()
        }
    }
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose, args.quiet);

    let controller = SimulationController::new(args.simulation_params(), WavePair::default());
    let audio_params = args.audio_params();
    let tab = args.tab;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Wave Interference Lab",
        options,
        Box::new(move |cc| Ok(Box::new(WaveLabApp::new(cc, controller, audio_params, tab)))),
    )
}
