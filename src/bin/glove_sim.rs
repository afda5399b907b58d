//! glove-sim: deterministic pipeline harness over a loopback transport.
//!
//! Synthesizes per-finger flexion waveforms, drives the sensor-to-wire
//! pipeline for a number of ticks, and prints either the encoded frames or
//! the JSON tick reports. Useful for eyeballing the frame grammar and for
//! reproducing calibration behavior without glove hardware.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use glove_core::error::log_pipeline_error;
use glove_core::transport::LoopbackTransport;
use glove_core::{GloveConfig, GlovePipeline};

#[derive(Parser, Debug)]
#[command(
    name = "glove-sim",
    about = "Deterministic sensor-to-wire pipeline harness for Glove Core"
)]
struct Cli {
    /// Path to a JSON glove configuration (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log verbosity (-v info, -vv debug incl. telemetry)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Drive the pipeline with synthetic waveforms and print tick output
    Run {
        /// Number of sampling ticks to simulate
        #[arg(long, default_value_t = 50)]
        ticks: u64,
        /// Seed for the sensor jitter generator
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Print encoded frames (ASCII-escaped) instead of JSON reports
        #[arg(long)]
        frames: bool,
        /// Simulate a transport outage for this many ticks mid-run
        #[arg(long, default_value_t = 0)]
        outage_ticks: u64,
    },
    /// Print the effective configuration as JSON
    DumpConfig,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = match &cli.config {
        Some(path) => GloveConfig::load_from_file(path),
        None => GloveConfig::default(),
    };

    match cli.command {
        Commands::Run {
            ticks,
            seed,
            frames,
            outage_ticks,
        } => run_simulation(&config, ticks, seed, frames, outage_ticks),
        Commands::DumpConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(ExitCode::from(0))
        }
    }
}

fn run_simulation(
    config: &GloveConfig,
    ticks: u64,
    seed: u64,
    print_frames: bool,
    outage_ticks: u64,
) -> Result<ExitCode> {
    let mut pipeline =
        GlovePipeline::from_config(config).context("assembling pipeline from config")?;
    let mut transport = LoopbackTransport::new();
    let mut rng = StdRng::seed_from_u64(seed);

    let sensor_max = config.calibration.sensor_max;
    let outage_start = ticks / 2;

    for t in 0..ticks {
        // Each finger sweeps a sine at its own phase; jitter stands in for
        // ADC noise.
        let mut flexion = [0.0f32; 5];
        for (i, sample) in flexion.iter_mut().enumerate() {
            let phase = t as f32 / 25.0 + i as f32 * 0.7;
            let wave = (phase * std::f32::consts::TAU).sin() * 0.5 + 0.5;
            let jitter = rng.gen_range(-0.01..0.01);
            *sample = ((wave + jitter) * sensor_max).clamp(0.0, sensor_max);
        }

        // Joystick rests near center with noise only.
        let joystick: Vec<f32> = if config.inputs.joystick {
            (0..2)
                .map(|_| sensor_max / 2.0 + rng.gen_range(-20.0..20.0))
                .collect()
        } else {
            Vec::new()
        };

        // Tap the first button every 16 ticks.
        if !config.inputs.button_symbols.is_empty() {
            pipeline.set_button(0, t % 16 < 4);
        }

        if outage_ticks > 0 {
            let in_outage = t >= outage_start && t < outage_start + outage_ticks;
            transport.set_open(!in_outage);
        }

        let report = match pipeline.tick(&flexion, &joystick, &mut transport) {
            Ok(report) => report,
            Err(err) => {
                log_pipeline_error(&err, "simulation tick");
                return Err(err).with_context(|| format!("tick {}", t));
            }
        };

        if print_frames {
            match transport.sent_frames().last() {
                Some(frame) if report.sent => {
                    println!("{:>4}  {}", report.tick, frame.escape_ascii())
                }
                _ => println!("{:>4}  (skipped: transport closed)", report.tick),
            }
        } else {
            println!("{}", serde_json::to_string(&report)?);
        }
    }

    log::info!(
        "Simulated {} ticks, {} frames delivered",
        ticks,
        transport.sent_frames().len()
    );
    Ok(ExitCode::from(0))
}
