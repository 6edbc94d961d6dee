//! Writes a small time-resolved data set for trying the viewer:
//!
//! * `a_30_1024_counter.csv` – full-spectrum reference counter
//! * `b_30_250_counter.csv`  – counter with every other channel halved
//! * `spectra_1500.csv`      – 1500 frames, the default window fits
//! * `spectra_500.csv`       – 500 frames, the viewer falls back
//!
//! Usage: `generate_sample [OUTPUT_DIR]` (default `TimeSpectral`).

use std::fs;
use std::path::Path;

use csv::WriterBuilder;

const FRAME_LENGTH: usize = 1024;
const COUNTER_LENGTH: usize = 2048;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// One frame: a zero-loss-like peak plus a core-loss edge whose centre
/// drifts with `t` in `[0, 1]`.
fn generate_frame(t: f64, noise_level: f64, rng: &mut SimpleRng) -> Vec<f64> {
    let edge = 600.0 + 80.0 * t;
    (0..FRAME_LENGTH)
        .map(|ch| {
            let x = ch as f64;
            let signal = gaussian(x, 100.0, 8.0, 1000.0)
                + gaussian(x, edge, 25.0, 120.0 * (1.0 - 0.5 * t))
                + 10.0;
            (signal + rng.gauss(0.0, noise_level)).max(0.0)
        })
        .collect()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Write `rows` as comma-separated records, one row per line.
fn write_rows(path: &Path, rows: &[Vec<f64>]) {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("Failed to create output file");
    for row in rows {
        writer
            .write_record(row.iter().map(|v| format!("{v:.4}")))
            .expect("Failed to write record");
    }
    writer.flush().expect("Failed to flush output file");
    let total: usize = rows.iter().map(Vec::len).sum();
    println!("Wrote {total} values to {}", path.display());
}

fn write_frames(path: &Path, count: usize, rng: &mut SimpleRng) {
    let frames: Vec<Vec<f64>> = (0..count)
        .map(|i| generate_frame(i as f64 / count as f64, 3.0, rng))
        .collect();
    write_rows(path, &frames);
}

fn main() {
    let output_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "TimeSpectral".to_string());
    let output_dir = Path::new(&output_dir);
    fs::create_dir_all(output_dir)
        .expect("Failed to create output directory");

    let mut rng = SimpleRng::new(42);

    // Counters: the reference, and a copy with every other channel halved.
    let reference: Vec<f64> = (0..COUNTER_LENGTH)
        .map(|i| {
            let peak = gaussian(i as f64, 1024.0, 300.0, 2000.0);
            500.0 + peak + rng.gauss(0.0, 5.0).abs()
        })
        .collect();
    let halved: Vec<f64> = reference
        .iter()
        .enumerate()
        .map(|(i, &v)| if i % 2 == 0 { v } else { v * 0.5 })
        .collect();
    write_rows(&output_dir.join("a_30_1024_counter.csv"), &[reference]);
    write_rows(&output_dir.join("b_30_250_counter.csv"), &[halved]);

    write_frames(&output_dir.join("spectra_1500.csv"), 1500, &mut rng);
    write_frames(&output_dir.join("spectra_500.csv"), 500, &mut rng);
}
