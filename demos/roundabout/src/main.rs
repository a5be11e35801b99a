//! roundabout — reference scenario for the rust_rb simulator.
//!
//! One simulated day of traffic through a two-lane roundabout with four
//! exits: a 16-slot inner and 24-slot outer circle, twelve car sources
//! firing at the measured arrival rates of the reference intersection.
//! Run with `RUST_LOG=debug` to watch individual cars.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use rb_core::{SimConfig, SimTime};
use rb_output::{CompletionSummary, CsvWriter};
use rb_sim::{SimBuilder, SimObserver, SourceReport};
use rb_traffic::TraceSink;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:              u64 = 42;
const SIM_HOURS:         f64 = 24.0;
const PROGRESS_INTERVAL: f64 = 3_600.0; // report once per simulated hour
const OUTPUT_DIR:        &str = "output/roundabout";

// ── Progress reporting ────────────────────────────────────────────────────────

struct ProgressPrinter;

impl SimObserver for ProgressPrinter {
    fn on_progress(&mut self, now: SimTime, spawned: usize, finished: usize) {
        println!(
            "  {:>5.1} h: {spawned:>6} cars spawned, {finished:>6} through",
            now.0 / 3_600.0
        );
    }

    fn on_run_end(&mut self, now: SimTime, _reports: &[SourceReport]) {
        println!("  horizon reached at {now}");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== roundabout — rust_rb traffic simulator ===");
    println!("Hours: {SIM_HOURS}  |  Seed: {SEED}");
    println!();

    // 1. Configure: the default layout is the reference intersection.
    let config = SimConfig {
        horizon: SIM_HOURS * 3_600.0,
        seed: SEED,
        ..SimConfig::default()
    };
    println!(
        "Layout: {}-slot inner / {}-slot outer circle, {} s per slot",
        config.inner_len, config.outer_len, config.slot_passing_time
    );
    println!();

    // 2. Build with all twelve direction pairs and the measured arrivals.
    let mut sim = SimBuilder::new(config)
        .trace(TraceSink::disabled())
        .build()?;

    // 3. Run.
    let t0 = Instant::now();
    sim.run_observed(PROGRESS_INTERVAL, &mut ProgressPrinter)?;
    let elapsed = t0.elapsed();
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!();

    // 4. Per-pair completion statistics.
    let reports = sim.reports();
    let summary = CompletionSummary::from_reports(&reports);
    println!("{summary}");
    println!();

    // 5. Export.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    writer.write_cars(&reports)?;
    writer.write_sources(&reports)?;
    writer.finish()?;
    println!("Wrote {OUTPUT_DIR}/cars.csv and {OUTPUT_DIR}/sources.csv");

    Ok(())
}
