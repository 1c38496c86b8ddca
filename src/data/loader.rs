use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{
    COL_ACCESS, COL_COUNTRY, COL_RANK, COL_YEAR, Dataset, DatasetError, Record,
};

// ---------------------------------------------------------------------------
// Backfill rows
// ---------------------------------------------------------------------------

/// Entries the published index is missing. Each is appended after the file's
/// own rows when no record for that country and year exists.
pub const BACKFILL: [(&str, i32, f64, f64); 2] = [
    ("India", 2007, 70.0, 45.0),
    ("India", 2009, 65.0, 48.0),
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the passport index from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `COUNTRY`, `YEAR`, `RANK`, `ACCESS TO COUNTRIES`
/// * `.json`    – `[{ "COUNTRY": ..., "YEAR": ..., ... }, ...]`
/// * `.parquet` – the same four columns, any numeric or string types
///
/// The backfill rows are applied before returning.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DatasetError::UnsupportedFormat(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    let mut dataset = Dataset::from_records(records);
    let added = apply_backfill(&mut dataset);
    log::info!(
        "Loaded {} records from {} ({added} backfilled)",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

/// Append every [`BACKFILL`] entry that has no matching record.
/// Returns how many rows were added.
pub fn apply_backfill(dataset: &mut Dataset) -> usize {
    let mut added = 0;
    for &(country, year, rank, access) in &BACKFILL {
        if dataset.insert_if_absent(Record::new(country, year, Some(rank), Some(access))) {
            added += 1;
        }
    }
    added
}

// ---------------------------------------------------------------------------
// Cell parsing shared by all formats
// ---------------------------------------------------------------------------

/// YEAR is strict: integer text, or a float with no fractional part.
fn parse_year(row: usize, text: &str) -> Result<i32, DatasetError> {
    let t = text.trim();
    if let Ok(y) = t.parse::<i32>() {
        return Ok(y);
    }
    match t.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() <= i32::MAX as f64 => Ok(f as i32),
        _ => Err(DatasetError::InvalidYear {
            row,
            value: text.to_string(),
        }),
    }
}

/// RANK and ACCESS are lenient: anything that is not a finite number is `None`.
fn parse_lenient(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn build_record(
    row: usize,
    country: &str,
    year: &str,
    rank: &str,
    access: &str,
) -> Result<Record, DatasetError> {
    Ok(Record::new(
        country.trim(),
        parse_year(row, year)?,
        parse_lenient(rank),
        parse_lenient(access),
    ))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "COUNTRY")]
    country: String,
    #[serde(rename = "YEAR")]
    year: String,
    // Short rows leave trailing cells out; they read as empty.
    #[serde(rename = "RANK", default)]
    rank: String,
    #[serde(rename = "ACCESS TO COUNTRIES", default)]
    access: String,
}

fn load_csv(path: &Path) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in [COL_COUNTRY, COL_YEAR, COL_RANK, COL_ACCESS] {
        if !headers.iter().any(|h| h == required) {
            return Err(DatasetError::MissingColumn(required.to_string()).into());
        }
    }

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row_no = idx + 1;
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(build_record(row_no, &row.country, &row.year, &row.rank, &row.access)?);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "COUNTRY": "Japan", "YEAR": 2018, "RANK": 1, "ACCESS TO COUNTRIES": 190 },
///   ...
/// ]
/// ```
///
/// Non-object rows are skipped with a warning.
fn load_json(path: &Path) -> Result<Vec<Record>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let row_no = idx + 1;
        let Some(obj) = row.as_object() else {
            log::warn!("JSON row {row_no} is not an object, skipping");
            continue;
        };

        let cell = |col: &str| -> Result<String, DatasetError> {
            obj.get(col)
                .map(json_to_text)
                .ok_or_else(|| DatasetError::MissingColumn(col.to_string()))
        };
        let rank = obj.get(COL_RANK).map(json_to_text).unwrap_or_default();
        let access = obj.get(COL_ACCESS).map(json_to_text).unwrap_or_default();

        records.push(build_record(
            row_no,
            &cell(COL_COUNTRY)?,
            &cell(COL_YEAR)?,
            &rank,
            &access,
        )?);
    }
    Ok(records)
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Every column is cast to UTF-8 first so that the same cell rules apply
/// regardless of how the file was written.
fn load_parquet(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut columns = Vec::with_capacity(4);
        for name in [COL_COUNTRY, COL_YEAR, COL_RANK, COL_ACCESS] {
            let idx = schema
                .index_of(name)
                .map_err(|_| DatasetError::MissingColumn(name.to_string()))?;
            let as_text = cast(batch.column(idx), &DataType::Utf8)
                .with_context(|| format!("casting column '{name}' to text"))?;
            columns.push(as_text);
        }

        let text: Vec<&StringArray> = columns.iter().map(|c| c.as_string::<i32>()).collect();

        for row in 0..batch.num_rows() {
            records.push(build_record(
                row_offset + row + 1,
                cell_text(text[0], row),
                cell_text(text[1], row),
                cell_text(text[2], row),
                cell_text(text[3], row),
            )?);
        }
        row_offset += batch.num_rows();
    }

    Ok(records)
}

fn cell_text(arr: &StringArray, row: usize) -> &str {
    if arr.is_null(row) {
        ""
    } else {
        arr.value(row)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(ext: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn csv_numeric_columns_parse_leniently() {
        let file = write_temp(
            "csv",
            "COUNTRY,YEAR,RANK,ACCESS TO COUNTRIES\n\
             Japan,2015,1,186\n\
             Japan,2016,-,\n\
             Chad, 2017 ,n/a,51.0\n",
        );
        let ds = load_file(file.path()).unwrap();

        let japan = ds.find("Japan", 2016).unwrap();
        assert_eq!(japan.rank, None);
        assert_eq!(japan.access, None);

        let chad = ds.find("Chad", 2017).unwrap();
        assert_eq!(chad.rank, None);
        assert_eq!(chad.access, Some(51.0));
    }

    #[test]
    fn csv_invalid_year_is_fatal() {
        let file = write_temp(
            "csv",
            "COUNTRY,YEAR,RANK,ACCESS TO COUNTRIES\nJapan,twenty,1,186\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::InvalidYear {
                row: 1,
                value: "twenty".to_string()
            })
        );
    }

    #[test]
    fn csv_short_rows_leave_numbers_empty() {
        let file = write_temp(
            "csv",
            "COUNTRY,YEAR,RANK,ACCESS TO COUNTRIES\n\
             Japan,2015,1,186\n\
             Japan,2016,2\n\
             Japan,2017\n",
        );
        let ds = load_file(file.path()).unwrap();

        let short = ds.find("Japan", 2016).unwrap();
        assert_eq!((short.rank, short.access), (Some(2.0), None));
        let shorter = ds.find("Japan", 2017).unwrap();
        assert_eq!((shorter.rank, shorter.access), (None, None));
    }

    #[test]
    fn csv_row_without_year_is_fatal() {
        let file = write_temp(
            "csv",
            "COUNTRY,YEAR,RANK,ACCESS TO COUNTRIES\nJapan,2015,1,186\nJapan\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 2"));
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let file = write_temp("csv", "COUNTRY,YEAR,RANK\nJapan,2015,1\n");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::MissingColumn(COL_ACCESS.to_string()))
        );
    }

    #[test]
    fn backfill_appends_missing_rows_in_order() {
        let file = write_temp(
            "csv",
            "COUNTRY,YEAR,RANK,ACCESS TO COUNTRIES\nJapan,2015,1,186\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 3);

        let tail: Vec<_> = ds.records()[1..]
            .iter()
            .map(|r| (r.country.as_str(), r.year, r.rank, r.access))
            .collect();
        assert_eq!(
            tail,
            vec![
                ("India", 2007, Some(70.0), Some(45.0)),
                ("India", 2009, Some(65.0), Some(48.0)),
            ]
        );
        assert_eq!(ds.first_country(), Some("Japan"));
    }

    #[test]
    fn backfill_leaves_existing_rows_untouched() {
        let mut ds = Dataset::from_records(vec![Record::new("India", 2007, Some(74.0), None)]);
        assert_eq!(apply_backfill(&mut ds), 1);

        let existing = ds.find("India", 2007).unwrap();
        assert_eq!(existing.rank, Some(74.0));
        assert_eq!(existing.access, None);
        assert!(ds.find("India", 2009).is_some());

        // A second pass adds nothing.
        assert_eq!(apply_backfill(&mut ds), 0);
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn json_records_load() {
        let file = write_temp(
            "json",
            r#"[
                {"COUNTRY": "Japan", "YEAR": 2018, "RANK": 1, "ACCESS TO COUNTRIES": 190},
                {"COUNTRY": "Japan", "YEAR": "2015", "RANK": "-", "ACCESS TO COUNTRIES": null},
                "not a row"
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.find("Japan", 2018).and_then(|r| r.access), Some(190.0));
        let older = ds.find("Japan", 2015).unwrap();
        assert_eq!(older.rank, None);
        assert_eq!(older.access, None);
        // two JSON rows plus two backfill rows
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn parquet_columns_of_any_type_load() {
        use std::sync::Arc;

        use arrow::array::{Float64Array, Int64Array, StringArray};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_COUNTRY, DataType::Utf8, false),
            Field::new(COL_YEAR, DataType::Int64, false),
            Field::new(COL_RANK, DataType::Utf8, true),
            Field::new(COL_ACCESS, DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Japan", "Japan"])),
                Arc::new(Int64Array::from(vec![2015, 2018])),
                Arc::new(StringArray::from(vec![Some("1"), Some("-")])),
                Arc::new(Float64Array::from(vec![Some(186.0), None])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        let first = ds.find("Japan", 2015).unwrap();
        assert_eq!((first.rank, first.access), (Some(1.0), Some(186.0)));
        let second = ds.find("Japan", 2018).unwrap();
        assert_eq!((second.rank, second.access), (None, None));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = write_temp("xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DatasetError>(),
            Some(&DatasetError::UnsupportedFormat("xlsx".to_string()))
        );
    }

    #[test]
    fn year_accepts_integral_floats() {
        assert_eq!(parse_year(1, "2015.0"), Ok(2015));
        assert!(parse_year(1, "2015.5").is_err());
        assert_eq!(parse_lenient(" 12 "), Some(12.0));
        assert_eq!(parse_lenient("NaN"), None);
    }
}
