//! Writes a synthetic passport index (CSV and Parquet) plus a background
//! image into the working directory, so the dashboard can be run without the
//! published dataset.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const FIRST_YEAR: i64 = 2006;
const LAST_YEAR: i64 = 2024;
const TOTAL_DESTINATIONS: f64 = 199.0;

/// (country, rank in the first year, visa-free access in the first year,
/// yearly access growth)
const COUNTRIES: [(&str, f64, f64, f64); 8] = [
    ("Afghanistan", 93.0, 22.0, 0.3),
    ("Brazil", 20.0, 140.0, 1.6),
    ("Germany", 2.0, 165.0, 1.5),
    ("India", 72.0, 44.0, 0.7),
    ("Japan", 6.0, 160.0, 1.8),
    ("Kenya", 67.0, 55.0, 0.9),
    ("Singapore", 9.0, 155.0, 2.2),
    ("United States", 1.0, 175.0, 0.8),
];

/// India rows left out so the dashboard backfills them.
const GAPS: [(&str, i64); 2] = [("India", 2007), ("India", 2009)];

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

    /// Uniform in `[-half, half)`.
    fn jitter(&mut self, half: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * half
    }
}

struct Row {
    country: &'static str,
    year: i64,
    rank: Option<f64>,
    access: Option<f64>,
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();
    for &(country, rank0, access0, growth) in &COUNTRIES {
        for year in FIRST_YEAR..=LAST_YEAR {
            if GAPS.contains(&(country, year)) {
                continue;
            }
            let t = (year - FIRST_YEAR) as f64;
            let rank = (rank0 + rng.jitter(3.0)).round().max(1.0);
            let access = (access0 + growth * t + rng.jitter(2.0))
                .round()
                .clamp(0.0, TOTAL_DESTINATIONS);

            // A few cells are unpublished, as in the real index.
            let missing = rng.next_f64() < 0.03;
            rows.push(Row {
                country,
                year,
                rank: (!missing).then_some(rank),
                access: Some(access),
            });
        }
    }
    rows
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(["COUNTRY", "YEAR", "RANK", "ACCESS TO COUNTRIES"])?;
    let cell = |v: Option<f64>| v.map(|v| format!("{v:.0}")).unwrap_or_else(|| "-".to_string());
    for row in rows {
        writer.write_record([
            row.country.to_string(),
            row.year.to_string(),
            cell(row.rank),
            cell(row.access),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("COUNTRY", DataType::Utf8, false),
        Field::new("YEAR", DataType::Int64, false),
        Field::new("RANK", DataType::Float64, true),
        Field::new("ACCESS TO COUNTRIES", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(rows.iter().map(|r| r.country).collect::<Vec<_>>())),
            Arc::new(Int64Array::from(rows.iter().map(|r| r.year).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.rank).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.access).collect::<Vec<_>>())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

/// Soft diagonal gradient, pale blue to pale sand.
fn write_background(path: &str) -> Result<()> {
    let (w, h) = (1300u32, 1100u32);
    let img = image::RgbImage::from_fn(w, h, |x, y| {
        let t = (x as f32 / w as f32 + y as f32 / h as f32) / 2.0;
        let mix = |a: f32, b: f32| (a + (b - a) * t) as u8;
        image::Rgb([mix(200.0, 240.0), mix(220.0, 228.0), mix(245.0, 200.0)])
    });
    img.save(path).with_context(|| format!("writing {path}"))?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    write_csv("henleypassportindex1.csv", &rows)?;
    write_parquet("henleypassportindex1.parquet", &rows)?;
    write_background("background.jpg")?;

    println!(
        "Wrote {} rows for {} countries ({FIRST_YEAR}–{LAST_YEAR}) and background.jpg",
        rows.len(),
        COUNTRIES.len()
    );
    Ok(())
}
