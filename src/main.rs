use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn, LevelFilter};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tsunami_sim::logging::init_logging;
use tsunami_sim::prelude::*;

/// Columns and rows kept when turning the extruded surface into a GLB mesh
const MESH_COLUMNS: usize = 250;
const MESH_ROWS: usize = 100;

/// Command-line tool to compute tsunami wave profiles with optional physical corrections
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (error, warn, info, debug, trace); defaults to RUST_LOG or warn
    #[arg(long, global = true)]
    log_level: Option<LevelFilter>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate the profile once and print the analysis and risk assessment
    Profile(ProfileArgs),
    /// Step the simulation clock and export one file per frame
    Animate(AnimateArgs),
}

#[derive(Args, Debug)]
struct WaveArgs {
    /// Wave amplitude (m)
    #[arg(short, long, default_value_t = 1.0)]
    amplitude: f64,

    /// Wavelength (m)
    #[arg(short, long, default_value_t = 100.0)]
    wavelength: f64,

    /// Water depth (m)
    #[arg(short, long, default_value_t = 1000.0)]
    depth: f64,

    /// Bottom friction decay coefficient (1/s)
    #[arg(long, default_value_t = 0.001)]
    bottom_friction: f64,

    /// Coriolis parameter (rad/s)
    #[arg(long, default_value_t = 0.0001)]
    coriolis: f64,

    /// Wind speed (m/s)
    #[arg(long, default_value_t = 0.0)]
    wind_speed: f64,

    /// Wind direction (radians)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    wind_direction: f64,

    /// Comma separated corrections: nonlinear, dispersion, bottom_friction, coriolis, wind (or all/none)
    #[arg(short, long, default_value = "none")]
    effects: EffectToggles,

    /// Length of the simulated domain (m)
    #[arg(long, default_value_t = 1000.0)]
    domain_size: f64,

    /// Number of grid samples
    #[arg(long, default_value_t = 1000)]
    nx: usize,

    /// Reject out-of-domain parameters instead of evaluating them as-is
    #[arg(long)]
    strict: bool,
}

impl WaveArgs {
    fn parameters(&self) -> Result<WaveParameters> {
        let params = WaveParameters::new(self.amplitude, self.wavelength, self.depth)
            .with_bottom_friction(self.bottom_friction)
            .with_coriolis(self.coriolis)
            .with_wind(self.wind_speed, self.wind_direction);

        if let Err(reason) = params.validate() {
            if self.strict {
                bail!("Invalid wave parameters: {}", reason);
            }
            warn!("{}; results may contain NaN or infinite values", reason);
        }

        Ok(params)
    }

    fn calculator(&self) -> WaveProfileCalculator {
        WaveProfileCalculator::new(self.domain_size, self.nx)
    }
}

#[derive(Args, Debug)]
struct ProfileArgs {
    #[command(flatten)]
    wave: WaveArgs,

    /// Simulation time (s)
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    time: f64,

    /// Optional output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (csv, json, glb); inferred from the output extension when omitted
    #[arg(short, long)]
    format: Option<ExportFormat>,
}

#[derive(Args, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    wave: WaveArgs,

    /// Number of frames to generate
    #[arg(long, default_value_t = 100)]
    frames: usize,

    /// Clock step between frames (s)
    #[arg(long, default_value_t = 0.1)]
    step: f64,

    /// Clock wraps to zero after this time (s)
    #[arg(long, default_value_t = 10.0)]
    period: f64,

    /// Directory for the frame files
    #[arg(short, long, default_value = "tsunami_frames")]
    output_dir: PathBuf,

    /// Frame file format (csv, json, glb)
    #[arg(short, long, default_value = "csv")]
    format: ExportFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match cli.command {
        Command::Profile(args) => run_profile(args),
        Command::Animate(args) => run_animate(args),
    }
}

fn run_profile(args: ProfileArgs) -> Result<()> {
    let params = args.wave.parameters()?;
    let calculator = args.wave.calculator();
    let toggles = args.wave.effects;

    println!("Computing tsunami wave profile...");
    println!(
        "Wave parameters: amplitude={} m, wavelength={} m, depth={} m, t={} s",
        params.amplitude, params.wavelength, params.depth, args.time
    );
    println!("Effects: {}", toggles);
    for effect in toggles.enabled() {
        println!("  {} - {}", effect, effect.description());
    }

    let (eta, analysis) = calculator.evaluate(&params, args.time, &toggles);
    let risk = assess_risk(&eta, &params);

    println!();
    print!("{}", analysis);
    if let Some((frequency, power)) = analysis.energy_spectrum.peak() {
        println!("spectrum_peak: {} 1/m (power {})", frequency, power);
    }
    println!();
    print!("{}", risk);

    if let Some(output) = &args.output {
        let format = match args.format {
            Some(format) => format,
            None => format_from_extension(output)?,
        };
        write_frame(format, output, &calculator, &params, &toggles, args.time, &eta, &analysis, &risk)?;
        println!("\nSaved {} to {}", format, output.display());
    }

    Ok(())
}

fn run_animate(args: AnimateArgs) -> Result<()> {
    if args.step <= 0.0 || args.period <= 0.0 {
        bail!("Clock step and period must be positive (got step={}, period={})", args.step, args.period);
    }

    let params = args.wave.parameters()?;
    let calculator = args.wave.calculator();
    let toggles = args.wave.effects;
    let clock = SimulationClock::new(args.step, args.period);

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create output directory {}", args.output_dir.display()))?;

    println!(
        "Generating {} frames of tsunami animation (step {} s, wrapping after {} s)...",
        args.frames,
        clock.step(),
        clock.period()
    );
    let start_time = Instant::now();

    let times = clock.schedule(args.frames);
    let frames = calculator.evaluate_frames(&params, &toggles, &times);
    info!("Evaluated {} frames in {:.2?}", frames.len(), start_time.elapsed());

    let mut peak_risk = RiskLevel::Low;
    for (index, frame) in frames.iter().enumerate() {
        let risk = assess_risk(&frame.profile, &params);
        peak_risk = peak_risk.max(risk.risk_level);

        let filename = format!("tsunami_frame_{:03}.{}", index, args.format.extension());
        let file_path = args.output_dir.join(filename);
        write_frame(
            args.format,
            &file_path,
            &calculator,
            &params,
            &toggles,
            frame.time,
            &frame.profile,
            &frame.analysis,
            &risk,
        )?;

        if index % 10 == 0 {
            println!("Generated frame {}/{} (t={:.2} s)", index + 1, frames.len(), frame.time);
        }
    }

    println!("Animation generation complete in {:.2?}", start_time.elapsed());
    println!("Highest risk level across frames: {}", peak_risk);
    println!("Output files saved to: {}", args.output_dir.display());
    Ok(())
}

fn format_from_extension(path: &Path) -> Result<ExportFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .with_context(|| format!("Cannot infer export format from {}; pass --format", path.display()))?;

    extension.parse::<ExportFormat>().map_err(anyhow::Error::msg)
}

#[allow(clippy::too_many_arguments)]
fn write_frame(
    format: ExportFormat,
    path: &Path,
    calculator: &WaveProfileCalculator,
    params: &WaveParameters,
    toggles: &EffectToggles,
    time: f64,
    eta: &[f64],
    analysis: &WaveAnalysis,
    risk: &RiskAssessment,
) -> Result<()> {
    match format {
        ExportFormat::Csv => {
            save_with(path, |writer| write_profile_csv(calculator.grid().coordinates(), eta, writer))?;
        }
        ExportFormat::Json => {
            let snapshot = Snapshot {
                time,
                parameters: params,
                effects: toggles,
                analysis,
                risk,
            };
            save_with(path, |writer| write_snapshot_json(&snapshot, writer))?;
        }
        ExportFormat::Glb => {
            let surface = WaveSurface::extrude_default(calculator.grid(), eta);
            info!(
                "Surface height range: min = {:.4} m, max = {:.4} m",
                surface.min_height(),
                surface.max_height()
            );
            surface.to_mesh(MESH_COLUMNS, MESH_ROWS).save_glb(path)?;
        }
    }

    Ok(())
}
