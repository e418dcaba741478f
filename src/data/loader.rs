use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Int64Type, Schema};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{Gender, NameDataset, NameRecord, RecordError};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a name dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row `Name,Gender,Year,Births[,Rank]` (the usual export)
/// * `.json`    – `[{ "Name": "Mary", "Gender": "F", "Year": 1880, ... }, ...]`
/// * `.parquet` – same columns, any integer width for the numeric ones
///
/// When no row carries a rank, ranks are derived per (year, gender) from
/// births.
pub fn load_file(path: &Path) -> Result<NameDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            read_json(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} records from {} (years {:?}, max rank {})",
        dataset.len(),
        path.display(),
        dataset.year_span,
        dataset.max_rank
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Raw rows and validation
// ---------------------------------------------------------------------------

/// One row as it appears in the file, before validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Name", alias = "name")]
    name: String,
    #[serde(rename = "Gender", alias = "gender", alias = "Sex", alias = "sex")]
    gender: String,
    #[serde(rename = "Year", alias = "year")]
    year: i64,
    #[serde(rename = "Births", alias = "births", alias = "Count", alias = "count")]
    births: i64,
    #[serde(rename = "Rank", alias = "rank", default)]
    rank: Option<i64>,
}

fn validate(raw: RawRecord) -> Result<NameRecord> {
    let name = raw.name.trim();
    if name.is_empty() {
        return Err(RecordError::EmptyName.into());
    }
    let gender: Gender = raw.gender.parse()?;
    let year = u16::try_from(raw.year).map_err(|_| RecordError::YearOutOfRange(raw.year))?;
    let births = u64::try_from(raw.births).map_err(|_| RecordError::NegativeBirths(raw.births))?;
    let rank = match raw.rank {
        None => 0,
        Some(0) => return Err(RecordError::ZeroRank.into()),
        Some(r) => u32::try_from(r).map_err(|_| RecordError::RankOutOfRange(r))?,
    };
    Ok(NameRecord {
        name: name.to_string(),
        gender,
        year,
        rank,
        births,
    })
}

/// Validate every row and fill in ranks if the file has none.
fn build_dataset(raw: Vec<RawRecord>) -> Result<NameDataset> {
    let total = raw.len();
    let missing_rank = raw.iter().filter(|r| r.rank.is_none()).count();
    if missing_rank > 0 && missing_rank < total {
        bail!("Rank is missing for {missing_rank} of {total} rows; provide it for all rows or none");
    }

    let mut records = raw
        .into_iter()
        .enumerate()
        .map(|(i, r)| validate(r).with_context(|| format!("row {i}")))
        .collect::<Result<Vec<_>>>()?;

    if total > 0 && missing_rank == total {
        log::info!("No Rank column, deriving ranks from births");
        assign_ranks(&mut records);
    }

    Ok(NameDataset::from_records(records))
}

/// Rank records within each (year, gender) by births, most births first.
/// Ties keep file order, so ranks are always 1, 2, 3, ...
fn assign_ranks(records: &mut [NameRecord]) {
    let mut buckets: BTreeMap<(u16, Gender), Vec<usize>> = BTreeMap::new();
    for (i, rec) in records.iter().enumerate() {
        buckets.entry((rec.year, rec.gender)).or_default().push(i);
    }
    for mut idx in buckets.into_values() {
        idx.sort_by(|&a, &b| records[b].births.cmp(&records[a].births));
        for (pos, i) in idx.into_iter().enumerate() {
            records[i].rank = pos as u32 + 1;
        }
    }
}

// ---------------------------------------------------------------------------
// CSV / JSON
// ---------------------------------------------------------------------------

fn read_csv<R: Read>(input: R) -> Result<NameDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let mut raw = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        raw.push(result.with_context(|| format!("CSV row {row_no}"))?);
    }
    build_dataset(raw)
}

/// Records-oriented JSON, i.e. `df.to_json(orient='records')`.
fn read_json(text: &str) -> Result<NameDataset> {
    let raw: Vec<RawRecord> = serde_json::from_str(text).context("parsing JSON records")?;
    build_dataset(raw)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas or Polars.
///
/// `Name` and `Gender` must be string columns; `Year`, `Births` and `Rank`
/// may be any type Arrow can cast to Int64. `Rank` is optional.
fn load_parquet(path: &Path) -> Result<NameDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut raw = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let name_col = string_column(batch.column(column_index(&schema, "Name")?))?;
        let gender_col = string_column(batch.column(column_index(&schema, "Gender")?))?;
        let year_col = int_column(batch.column(column_index(&schema, "Year")?))?;
        let births_col = int_column(batch.column(column_index(&schema, "Births")?))?;
        let rank_col = match column_index(&schema, "Rank") {
            Ok(i) => Some(int_column(batch.column(i))?),
            Err(_) => None,
        };

        let names = name_col.as_string::<i32>();
        let genders = gender_col.as_string::<i32>();
        let years = year_col.as_primitive::<Int64Type>();
        let births = births_col.as_primitive::<Int64Type>();
        let ranks = rank_col.as_ref().map(|c| c.as_primitive::<Int64Type>());

        for row in 0..batch.num_rows() {
            if names.is_null(row)
                || genders.is_null(row)
                || years.is_null(row)
                || births.is_null(row)
            {
                bail!("Row {}: null Name, Gender, Year or Births", raw.len());
            }
            raw.push(RawRecord {
                name: names.value(row).to_string(),
                gender: genders.value(row).to_string(),
                year: years.value(row),
                births: births.value(row),
                rank: ranks.and_then(|r| (!r.is_null(row)).then(|| r.value(row))),
            });
        }
    }

    build_dataset(raw)
}

// -- Parquet / Arrow helpers --

/// Find a column by name, accepting an all-lowercase spelling too.
fn column_index(schema: &Schema, name: &str) -> Result<usize> {
    schema
        .index_of(name)
        .or_else(|_| schema.index_of(&name.to_ascii_lowercase()))
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
}

/// Normalise Utf8 / LargeUtf8 / dictionary columns to plain Utf8.
fn string_column(col: &ArrayRef) -> Result<ArrayRef> {
    cast(col, &DataType::Utf8)
        .with_context(|| format!("expected a string column, got {:?}", col.data_type()))
}

/// Normalise any integer column to Int64.
fn int_column(col: &ArrayRef) -> Result<ArrayRef> {
    cast(col, &DataType::Int64)
        .with_context(|| format!("expected an integer column, got {:?}", col.data_type()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Int32Array, Int64Array, StringArray};
    use arrow::datatypes::Field;
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    const SAMPLE_CSV: &str = "\
Name,Gender,Year,Births,Rank
Mary,F,1880,100,1
Mary,F,1881,90,2
Anna,F,1880,80,3
";

    #[test]
    fn reads_csv_with_rank() {
        let ds = read_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[1].name, "Mary");
        assert_eq!(ds.records[1].gender, Gender::Female);
        assert_eq!(ds.records[1].year, 1881);
        assert_eq!(ds.records[1].births, 90);
        assert_eq!(ds.records[1].rank, 2);
        assert_eq!(ds.year_span, Some((1880, 1881)));
    }

    #[test]
    fn csv_without_rank_derives_it() {
        let csv = "\
Id,Name,Year,Gender,Count
1,Anna,1880,F,80
2,Mary,1880,F,100
3,John,1880,M,50
4,Emma,1880,F,80
5,Anna,1881,F,95
";
        let ds = read_csv(csv.as_bytes()).unwrap();
        let ranks: Vec<(&str, u16, u32)> = ds
            .records
            .iter()
            .map(|r| (r.name.as_str(), r.year, r.rank))
            .collect();
        assert_eq!(
            ranks,
            vec![
                ("Anna", 1880, 2),
                ("Mary", 1880, 1),
                ("John", 1880, 1),
                ("Emma", 1880, 3),
                ("Anna", 1881, 1),
            ]
        );
    }

    #[test]
    fn partial_rank_is_rejected() {
        let csv = "Name,Gender,Year,Births,Rank\nMary,F,1880,100,1\nAnna,F,1880,80,\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("missing for 1 of 2 rows"));
    }

    #[test]
    fn bad_gender_reports_row() {
        let csv = "Name,Gender,Year,Births,Rank\nMary,F,1880,100,1\nAnna,X,1880,80,2\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("row 1"), "{msg}");
        assert!(msg.contains("unknown gender 'X'"), "{msg}");
    }

    #[test]
    fn zero_rank_is_rejected() {
        let csv = "Name,Gender,Year,Births,Rank\nMary,F,1880,100,0\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("rank must be at least 1"));
    }

    #[test]
    fn negative_births_are_rejected() {
        let csv = "Name,Gender,Year,Births,Rank\nMary,F,1880,-4,1\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("non-negative"));
    }

    #[test]
    fn reads_json_records() {
        let json = r#"[
            {"Name": "Mary", "Gender": "F", "Year": 1880, "Births": 100, "Rank": 1},
            {"name": "John", "gender": "M", "year": 1880, "births": 90, "rank": 1}
        ]"#;
        let ds = read_json(json).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].gender, Gender::Male);
        assert_eq!(ds.initials.iter().collect::<String>(), "JM");
    }

    #[test]
    fn empty_json_is_an_empty_dataset() {
        let ds = read_json("[]").unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn unsupported_extension() {
        let err = load_file(Path::new("names.xlsx")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    #[test]
    fn reads_parquet_with_narrow_ints() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Name", DataType::Utf8, false),
            Field::new("Gender", DataType::Utf8, false),
            Field::new("Year", DataType::Int32, false),
            Field::new("Births", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["Mary", "Anna", "John"])),
                Arc::new(StringArray::from(vec!["F", "F", "M"])),
                Arc::new(Int32Array::from(vec![1880, 1880, 1880])),
                Arc::new(Int64Array::from(vec![100, 180, 75])),
            ],
        )
        .unwrap();

        let ds = load_batch("narrow_ints", batch).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[0].rank, 2);
        assert_eq!(ds.records[1].rank, 1);
        assert_eq!(ds.records[2].rank, 1);
        assert_eq!(ds.records[1].births, 180);
    }

    /// Write `batch` to a temporary parquet file and load it back.
    fn load_batch(tag: &str, batch: RecordBatch) -> Result<NameDataset> {
        let path = std::env::temp_dir().join(format!(
            "name_trends_{tag}_{}.parquet",
            std::process::id()
        ));
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let result = load_file(&path);
        std::fs::remove_file(&path).ok();
        result
    }

    #[test]
    fn parquet_null_births_is_a_row_error() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Name", DataType::Utf8, false),
            Field::new("Gender", DataType::Utf8, false),
            Field::new("Year", DataType::Int64, false),
            Field::new("Births", DataType::Int64, true),
            Field::new("Rank", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["Mary", "Anna"])),
                Arc::new(StringArray::from(vec!["F", "F"])),
                Arc::new(Int64Array::from(vec![1880, 1880])),
                Arc::new(Int64Array::from(vec![Some(100), None])),
                Arc::new(Int64Array::from(vec![1, 2])),
            ],
        )
        .unwrap();

        let err = load_batch("null_births", batch).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Row 1"), "{msg}");
        assert!(msg.contains("Births"), "{msg}");
    }
}
