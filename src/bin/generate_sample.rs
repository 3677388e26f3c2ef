use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

/// One output row, with column names as the operations scripts refer to them.
#[derive(Debug, Serialize)]
struct CountyRow {
    #[serde(rename = "County")]
    county: String,
    #[serde(rename = "State")]
    state: &'static str,
    #[serde(rename = "Age.Percent 65 and Older")]
    age_65_plus: f64,
    #[serde(rename = "Education.Bachelor's Degree or Higher")]
    bachelors: f64,
    #[serde(rename = "Ethnicities.Hispanic or Latino")]
    hispanic: f64,
    #[serde(rename = "Income.Persons Below Poverty Level")]
    below_poverty: f64,
    #[serde(rename = "Population")]
    population: i64,
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

    /// Uniform value in `[lo, hi)` rounded to one decimal, like census percentages.
    fn percent(&mut self, lo: f64, hi: f64) -> f64 {
        ((lo + (hi - lo) * self.next_f64()) * 10.0).round() / 10.0
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("demographics.csv"));

    let mut rng = SimpleRng::new(42);

    // (state, number of counties, typical county size)
    let states: [(&str, usize, f64); 5] = [
        ("CA", 12, 400_000.0),
        ("TX", 15, 120_000.0),
        ("NV", 6, 60_000.0),
        ("IA", 10, 25_000.0),
        ("WY", 5, 12_000.0),
    ];

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    let mut rows = 0usize;
    for &(state, counties, typical) in &states {
        for i in 0..counties {
            // Log-uniform spread around the typical size.
            let scale = (rng.next_f64() * 4.0 - 2.0).exp();
            let row = CountyRow {
                county: format!("{state} County {}", i + 1),
                state,
                age_65_plus: rng.percent(8.0, 28.0),
                bachelors: rng.percent(10.0, 55.0),
                hispanic: rng.percent(1.0, 60.0),
                below_poverty: rng.percent(5.0, 30.0),
                population: (typical * scale).round() as i64,
            };
            writer.serialize(&row).context("writing county row")?;
            rows += 1;
        }
    }
    writer.flush().context("flushing CSV")?;

    println!(
        "Wrote {rows} counties across {} states to {}",
        states.len(),
        output_path.display()
    );
    Ok(())
}
