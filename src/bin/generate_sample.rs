use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray, UInt16Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const FIRST_YEAR: u16 = 1880;
const LAST_YEAR: u16 = 2020;

/// (name, gender, peak year, spread in years, births at peak)
const NAMES: &[(&str, &str, f64, f64, f64)] = &[
    ("Mary", "F", 1920.0, 45.0, 70000.0),
    ("Anna", "F", 1890.0, 30.0, 12000.0),
    ("Emma", "F", 2010.0, 25.0, 22000.0),
    ("Linda", "F", 1950.0, 10.0, 99000.0),
    ("Jennifer", "F", 1975.0, 9.0, 63000.0),
    ("Ashley", "F", 1988.0, 8.0, 54000.0),
    ("Olivia", "F", 2015.0, 15.0, 19000.0),
    ("Ava", "F", 2008.0, 12.0, 21000.0),
    ("Helen", "F", 1915.0, 20.0, 30000.0),
    ("Betty", "F", 1932.0, 12.0, 38000.0),
    ("John", "M", 1925.0, 40.0, 80000.0),
    ("William", "M", 1915.0, 60.0, 60000.0),
    ("James", "M", 1945.0, 30.0, 94000.0),
    ("Michael", "M", 1965.0, 18.0, 92000.0),
    ("David", "M", 1958.0, 20.0, 86000.0),
    ("Jacob", "M", 2000.0, 12.0, 35000.0),
    ("Noah", "M", 2015.0, 10.0, 19000.0),
    ("Liam", "M", 2018.0, 12.0, 20000.0),
    ("George", "M", 1895.0, 35.0, 14000.0),
    ("Jordan", "M", 1995.0, 10.0, 15000.0),
    ("Jordan", "F", 1994.0, 8.0, 4000.0),
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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

struct Row {
    name: &'static str,
    gender: &'static str,
    year: u16,
    births: i64,
    rank: i64,
}

fn popularity(year: u16, peak: f64, spread: f64, height: f64) -> f64 {
    height * (-(f64::from(year) - peak).powi(2) / (2.0 * spread.powi(2))).exp()
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();
    for year in FIRST_YEAR..=LAST_YEAR {
        for gender in ["F", "M"] {
            let mut year_rows: Vec<Row> = NAMES
                .iter()
                .filter(|n| n.1 == gender)
                .map(|&(name, gender, peak, spread, height)| {
                    // +-10% jitter, never below the 5-birth reporting floor
                    let jitter = 0.9 + 0.2 * rng.next_f64();
                    let births = (popularity(year, peak, spread, height) * jitter).max(5.0);
                    Row {
                        name,
                        gender,
                        year,
                        births: births.round() as i64,
                        rank: 0,
                    }
                })
                .collect();
            year_rows.sort_by(|a, b| b.births.cmp(&a.births));
            for (i, row) in year_rows.iter_mut().enumerate() {
                row.rank = i as i64 + 1;
            }
            rows.extend(year_rows);
        }
    }
    rows
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Name", DataType::Utf8, false),
        Field::new("Gender", DataType::Utf8, false),
        Field::new("Year", DataType::UInt16, false),
        Field::new("Births", DataType::Int64, false),
        Field::new("Rank", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.name))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.gender))),
            Arc::new(UInt16Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.births))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.rank))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(["Name", "Gender", "Year", "Births", "Rank"])?;
    for r in rows {
        writer.write_record([
            r.name.to_string(),
            r.gender.to_string(),
            r.year.to_string(),
            r.births.to_string(),
            r.rank.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_parquet(&rows, "sample_names.parquet")?;
    write_csv(&rows, "sample_names.csv")?;

    println!(
        "Wrote {} records ({FIRST_YEAR}-{LAST_YEAR}) to sample_names.parquet and sample_names.csv",
        rows.len()
    );
    Ok(())
}
