use serde::Serialize;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
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

#[derive(Serialize)]
struct Row<'a> {
    #[serde(rename = "Type")]
    group: &'a str,
    #[serde(rename = "Run ID")]
    run: &'a str,
    #[serde(rename = "Angle")]
    angle: f64,
    #[serde(rename = "Intensity")]
    intensity: String,
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);

    // Angles: -90 → 90, step 2
    let angles: Vec<f64> = (0..=90).map(|i| -90.0 + i as f64 * 2.0).collect();

    // (group, run, centre, sigma, peak counts); "FoV1" is a deliberate typo.
    let beams: [(&str, &str, f64, f64, f64); 10] = [
        ("FoV1", "Run 1", 0.0, 12.0, 1200.0),
        ("FoV1", "Run 2", 2.0, 14.0, 950.0),
        ("FoV1", "Run 3", -1.5, 11.0, 1400.0),
        ("FoV 2", "Run 2", 0.5, 22.0, 800.0),
        ("FoV 2", "Run 1", -3.0, 20.0, 870.0),
        ("FoV 2", "Run 3", 1.0, 25.0, 760.0),
        ("FoV 3", "Run 1", 0.0, 35.0, 400.0),
        ("FoV 3", "Run 3", 4.0, 30.0, 420.0),
        ("FoV 3", "Run 4", -2.0, 33.0, 390.0),
        ("FoV 3", "Run 2", 0.0, 0.5, 0.0),
    ];

    let output_path = "FoV.csv";
    let mut writer = csv::Writer::from_path(output_path)?;
    let mut rows = 0usize;

    for &(group, run, mu, sigma, amplitude) in &beams {
        // One run is recorded sweeping from +90 down to -90.
        let sweep: Vec<f64> = if group == "FoV 2" && run == "Run 3" {
            angles.iter().rev().copied().collect()
        } else {
            angles.clone()
        };

        for (i, &angle) in sweep.iter().enumerate() {
            let counts = (gaussian(angle, mu, sigma, amplitude) + rng.gauss(10.0, 3.0)).max(0.0);
            // A single dropped reading, as exported by the acquisition software.
            let intensity = if group == "FoV 3" && run == "Run 1" && i == 45 {
                "n/a".to_string()
            } else {
                format!("{counts:.1}")
            };
            writer.serialize(Row {
                group,
                run,
                angle,
                intensity,
            })?;
            rows += 1;
        }
    }
    writer.flush()?;

    println!(
        "Wrote {rows} samples ({} runs, {} angles each) to {output_path}",
        beams.len(),
        angles.len()
    );
    Ok(())
}
