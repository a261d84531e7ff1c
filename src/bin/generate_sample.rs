use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

/// One output row, in the column order of the open pubs export.
#[derive(Debug, Serialize)]
struct PubRow {
    fsa_id: u64,
    name: String,
    address: String,
    postcode: String,
    easting: String,
    northing: String,
    latitude: String,
    longitude: String,
    local_authority: String,
}

/// Local authorities with an approximate centre (lat, lon) and relative weight.
const AUTHORITIES: [(&str, f64, f64, u32); 12] = [
    ("Birmingham", 52.486, -1.890, 9),
    ("Leeds", 53.800, -1.549, 8),
    ("Bristol", 51.454, -2.588, 6),
    ("Manchester", 53.481, -2.242, 7),
    ("Cornwall", 50.266, -5.052, 8),
    ("Wiltshire", 51.349, -1.993, 6),
    ("Stratford-on-Avon", 52.192, -1.707, 4),
    ("York", 53.960, -1.082, 4),
    ("Norwich", 52.630, 1.297, 3),
    ("Northumberland", 55.208, -2.078, 5),
    ("Westminster", 51.497, -0.137, 7),
    ("Cumbria", 54.577, -2.797, 5),
];

const PUB_NAMES: [&str; 16] = [
    "Red Lion",
    "Royal Oak",
    "Crown",
    "White Hart",
    "Plough",
    "Swan",
    "New Inn",
    "Kings Arms",
    "Bell",
    "Queens Head",
    "White Horse",
    "Ship",
    "Wheatsheaf",
    "George",
    "Rose and Crown",
    "Fox and Hounds",
];

const STREETS: [&str; 8] = [
    "High Street",
    "Church Lane",
    "Market Place",
    "Station Road",
    "Mill Lane",
    "The Green",
    "Bridge Street",
    "London Road",
];

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Pick an index with probability proportional to its weight.
    fn weighted(&mut self, weights: &[u32]) -> usize {
        let total: u32 = weights.iter().sum();
        let mut ticket = (self.next_f64() * total as f64) as u32;
        for (i, &w) in weights.iter().enumerate() {
            if ticket < w {
                return i;
            }
            ticket -= w;
        }
        weights.len() - 1
    }
}

/// Names follow a rough popularity curve: earlier entries are far more common.
fn pub_name(rng: &mut SimpleRng) -> &'static str {
    let weights: Vec<u32> = (0..PUB_NAMES.len() as u32).map(|i| 40 / (i + 1) + 1).collect();
    PUB_NAMES[rng.weighted(&weights)]
}

fn main() -> Result<()> {
    let output_path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("open_pubs_8000_sample.csv"));
    let rows: u64 = 8000;

    let mut rng = SimpleRng::new(42);
    let weights: Vec<u32> = AUTHORITIES.iter().map(|a| a.3).collect();

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    for i in 0..rows {
        let (authority, lat, lon, _) = AUTHORITIES[rng.weighted(&weights)];
        // About one pub in fifty has no known position, like the real export.
        let unknown_position = rng.next_f64() < 0.02;

        let (latitude, longitude, easting, northing) = if unknown_position {
            (r"\N".to_string(), r"\N".to_string(), String::new(), String::new())
        } else {
            let lat = rng.gauss(lat, 0.08);
            let lon = rng.gauss(lon, 0.12);
            (
                format!("{lat:.6}"),
                format!("{lon:.6}"),
                format!("{}", 400_000 + rng.below(200_000)),
                format!("{}", 100_000 + rng.below(500_000)),
            )
        };

        let row = PubRow {
            fsa_id: 1000 + i * 7,
            name: pub_name(&mut rng).to_string(),
            address: format!("{} {}", 1 + rng.below(150), STREETS[rng.below(STREETS.len())]),
            postcode: format!(
                "{}{} {}{}{}",
                (b'A' + rng.below(26) as u8) as char,
                (b'A' + rng.below(26) as u8) as char,
                1 + rng.below(9),
                (b'A' + rng.below(26) as u8) as char,
                (b'A' + rng.below(26) as u8) as char,
            ),
            easting,
            northing,
            latitude,
            longitude,
            local_authority: authority.to_string(),
        };
        writer
            .serialize(&row)
            .with_context(|| format!("writing row {i}"))?;
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {rows} pubs to {}", output_path.display());
    Ok(())
}
