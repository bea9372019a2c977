use std::path::PathBuf;
use std::time::Instant;

use tsunami_sim::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Generating animated tsunami profile...");

    // A long, shallow-water wave with every correction switched on
    let calculator = WaveProfileCalculator::new(2000.0, 2000);
    let params = WaveParameters::new(3.0, 400.0, 50.0)
        .with_bottom_friction(0.01)
        .with_coriolis(0.0001)
        .with_wind(15.0, 0.3);
    let toggles = EffectToggles::all();

    // One full clock cycle: 0.1 s steps, wrapping after 10 s
    let clock = SimulationClock::default();
    let times = clock.schedule(100);

    let output_dir = PathBuf::from("./animation_output");
    std::fs::create_dir_all(&output_dir)?;

    let start_time = Instant::now();
    let frames = calculator.evaluate_frames(&params, &toggles, &times);
    println!("Evaluated {} frames in {:.2?}", frames.len(), start_time.elapsed());

    for (index, frame) in frames.iter().enumerate() {
        let risk = assess_risk(&frame.profile, &params);

        let file_path = output_dir.join(format!("tsunami_frame_{:03}.csv", index));
        save_with(&file_path, |writer| {
            write_profile_csv(calculator.grid().coordinates(), &frame.profile, writer)
        })?;

        if index % 10 == 0 {
            println!(
                "t={:5.2} s  max={:.3} m  energy={:.1} J/m²  risk={}",
                frame.time, risk.max_height, frame.analysis.energy, risk.risk_level
            );
        }
    }

    // Surface of the last frame as a 3D mesh
    if let Some(last) = frames.last() {
        let surface = WaveSurface::extrude_default(calculator.grid(), &last.profile);
        surface.to_mesh(400, 100).save_glb(output_dir.join("tsunami_surface.glb"))?;
    }

    println!("Output files saved to: {}", output_dir.display());
    Ok(())
}
