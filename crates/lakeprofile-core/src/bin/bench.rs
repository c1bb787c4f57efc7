/// Pure Rust core benchmarks for lake initialization.
///
/// Uses std::time::Instant for timing, a deterministic LCG PRNG for data generation,
/// and std::hint::black_box to prevent dead-code elimination.
use std::hint::black_box;
use std::time::{Duration, Instant};

use lakeprofile_core::geodesy::estimate_cell_area;
use lakeprofile_core::lake::constants::MAX_LAKE_NODES;
use lakeprofile_core::lake::geometry::build_lake_geometry;
use lakeprofile_core::lake::params::{LakeParameterRecord, ProfileKind, ProfileSpec};
use lakeprofile_core::lake::reader::LakeParamReader;

const REPEATS: usize = 7;

/// Simple LCG PRNG for deterministic data generation.
fn make_rng(seed: u64) -> impl FnMut() -> f64 {
    let mut state = seed;
    move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64
    }
}

/// Cell-centre coordinates of `n` random 1/8 degree cells.
fn make_cells(n: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut next_f64 = make_rng(seed);
    (0..n)
        .map(|_| (-60.0 + next_f64() * 130.0, -180.0 + next_f64() * 360.0))
        .collect()
}

/// Records with non-increasing area fractions and varying node counts.
fn make_records(n: usize, seed: u64) -> Vec<LakeParameterRecord> {
    let mut next_f64 = make_rng(seed);
    (0..n)
        .map(|i| {
            let node_count = 2 + (next_f64() * (MAX_LAKE_NODES - 1) as f64) as usize;
            let max_depth = 2.0 + next_f64() * 40.0;
            let footprint = next_f64() * 0.3;
            let area_fractions = (0..node_count)
                .map(|k| footprint * (1.0 - k as f64 / node_count as f64))
                .collect();
            LakeParameterRecord {
                cell_id: i as i64,
                max_depth,
                node_count,
                min_depth: 0.1 * max_depth,
                max_drawdown_rate: 0.02,
                initial_depth: 0.5 * max_depth,
                runoff_fraction: next_f64(),
                profile: ProfileSpec::Tabulated { area_fractions },
            }
        })
        .collect()
}

/// Parameter file text for the given records.
fn render_records(records: &[LakeParameterRecord]) -> String {
    let mut text = String::new();
    for r in records {
        text.push_str(&format!(
            "{} {} {} {} {} {} {}",
            r.cell_id,
            r.max_depth,
            r.node_count,
            r.min_depth,
            r.max_drawdown_rate,
            r.initial_depth,
            r.runoff_fraction
        ));
        if let ProfileSpec::Tabulated { area_fractions } = &r.profile {
            for f in area_fractions {
                text.push_str(&format!(" {f}"));
            }
        }
        text.push('\n');
    }
    text
}

/// Run a closure `REPEATS` times, return the median duration.
fn median_time<F: FnMut()>(mut f: F) -> Duration {
    let mut times: Vec<Duration> = (0..REPEATS)
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .collect();
    times.sort();
    times[REPEATS / 2]
}

fn bench_cell_area(sizes: &[usize]) -> Vec<(&'static str, usize, Duration)> {
    let mut results = Vec::new();

    for &n in sizes {
        let cells = make_cells(n, 42);

        let run = || {
            for &(lat, lon) in &cells {
                black_box(estimate_cell_area(lat, lon, 0.125));
            }
        };

        // Warmup
        run();

        let dur = median_time(run);
        results.push(("cell_area", n, dur));
    }
    results
}

fn bench_geometry(sizes: &[usize]) -> Vec<(&'static str, usize, Duration)> {
    let mut results = Vec::new();

    for &n in sizes {
        let records = make_records(n, 42);

        let run = || {
            for r in &records {
                black_box(build_lake_geometry(r, 1.9e8, 0.4).ok());
            }
        };

        // Warmup
        run();

        let dur = median_time(run);
        results.push(("geometry", n, dur));
    }
    results
}

fn bench_reader(sizes: &[usize]) -> Vec<(&'static str, usize, Duration)> {
    let mut results = Vec::new();

    for &n in sizes {
        let text = render_records(&make_records(n, 42));

        let run = || {
            let mut reader = LakeParamReader::from_text(&text);
            for id in 0..n as i64 {
                black_box(reader.find_record(id, ProfileKind::Tabulated).ok());
            }
        };

        // Warmup
        run();

        let dur = median_time(run);
        results.push(("reader_scan", n, dur));
    }
    results
}

fn main() {
    println!("Pure Rust Core Benchmarks");
    println!("============================================================");
    println!("{:<18} {:>6}   {:>12}", "Stage", "N", "Median (ms)");
    println!("--------------------------------------------");

    let mut all_results: Vec<(&str, usize, Duration)> = Vec::new();

    all_results.extend(bench_cell_area(&[1_000, 100_000]));
    all_results.extend(bench_geometry(&[1_000, 100_000]));
    all_results.extend(bench_reader(&[1_000, 10_000]));

    for (stage, n, dur) in &all_results {
        let ms = dur.as_secs_f64() * 1000.0;
        println!("{:<18} {:>6}      {:>8.2}", stage, n, ms);
    }

    println!("============================================================");
}
