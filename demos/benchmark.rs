use std::time::Instant;
use tsunami_sim::prelude::*;

fn main() {
    println!("Running Tsunami Simulator Benchmarks");
    println!("====================================");

    let resolutions = [1_000, 10_000, 100_000];
    let params = WaveParameters::new(2.0, 200.0, 500.0).with_wind(10.0, 0.0);

    for &nx in &resolutions {
        println!("\nGrid size: {} samples", nx);
        let calculator = WaveProfileCalculator::new(10_000.0, nx);

        // Single evaluation, no corrections
        let start = Instant::now();
        let (eta, _) = calculator.evaluate(&params, 1.0, &EffectToggles::none());
        println!("  Plain evaluation: {:.2?}", start.elapsed());

        // Single evaluation, every correction
        let start = Instant::now();
        let _ = calculator.evaluate(&params, 1.0, &EffectToggles::all());
        println!("  Full evaluation: {:.2?}", start.elapsed());

        // Batch of frames evaluated in parallel
        let times = SimulationClock::default().schedule(100);
        let start = Instant::now();
        let frames = calculator.evaluate_frames(&params, &EffectToggles::all(), &times);
        println!("  {} frames: {:.2?}", frames.len(), start.elapsed());

        // Only export on smaller grids to avoid excessive memory usage
        if nx <= 10_000 {
            let start = Instant::now();
            let mut buffer = Vec::new();
            write_profile_csv(calculator.grid().coordinates(), &eta, &mut buffer).unwrap();
            println!("  CSV export: {:.2?} ({}KB)", start.elapsed(), buffer.len() / 1024);
        }
    }
}
