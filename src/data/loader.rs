use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, Value};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tabular dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – flat scalar columns (recommended)
/// * `.json`    – records orientation: `[{ "col": value, ... }, ...]`
/// * `.csv`     – header row with column names, cells type-guessed
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    log::debug!(
        "Loaded {} rows x {} columns from {}",
        dataset.n_rows(),
        dataset.n_columns(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per data row.
/// Cell types are guessed per value; empty cells become `Null`.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut columns: Vec<Vec<Value>> = (0..headers.len()).map(|_| Vec::new()).collect();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        for (col_idx, column) in columns.iter_mut().enumerate() {
            column.push(guess_value_type(record.get(col_idx).unwrap_or("")));
        }
    }

    Dataset::new(headers, columns).context("assembling CSV dataset")
}

fn guess_value_type(s: &str) -> Value {
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    if s == "true" || s == "false" {
        return Value::Bool(s == "true");
    }
    Value::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "method": "rrt", "runtime_s": 1.52, "trial": 0 },
///   { "method": "prm", "runtime_s": 0.97, "trial": 1 }
/// ]
/// ```
///
/// The column set is the union of record keys; keys absent from a record
/// become `Null`.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut names: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !names.iter().any(|n| n == key) {
                names.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let mut columns: Vec<Vec<Value>> = (0..names.len())
        .map(|_| Vec::with_capacity(objects.len()))
        .collect();
    for obj in &objects {
        for (column, name) in columns.iter_mut().zip(&names) {
            column.push(obj.get(name).map(json_to_value).unwrap_or(Value::Null));
        }
    }

    Dataset::new(names, columns).context("assembling JSON dataset")
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Null => Value::Null,
        other => Value::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of flat scalar columns.
///
/// Supported column types: Utf8/LargeUtf8, Int32/Int64, Float32/Float64,
/// Boolean. Null entries become `Null`. Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let mut columns: Vec<Vec<Value>> = (0..names.len()).map(|_| Vec::new()).collect();

    let reader = builder.build().context("building parquet reader")?;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for (col_idx, column) in columns.iter_mut().enumerate() {
            let array = batch.column(col_idx);
            for row in 0..batch.num_rows() {
                column.push(value_at(array, row));
            }
        }
    }

    Dataset::new(names, columns).context("assembling parquet dataset")
}

/// Extract a single scalar value from an Arrow column at a given row.
fn value_at(col: &Arc<dyn Array>, row: usize) -> Value {
    if col.is_null(row) {
        return Value::Null;
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            if let Some(s) = col.as_any().downcast_ref::<StringArray>() {
                Value::String(s.value(row).to_string())
            } else {
                // LargeStringArray
                let s = col.as_string::<i64>();
                Value::String(s.value(row).to_string())
            }
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            Value::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            Value::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            Value::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            Value::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>().unwrap();
            Value::Bool(arr.value(row))
        }
        _ => Value::String(format!("{:?}", col.data_type())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use std::io::Write;

    #[test]
    fn csv_round_trip_with_type_guessing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "method,trial,runtime_s,converged").unwrap();
        writeln!(file, "rrt,0,1.5,true").unwrap();
        writeln!(file, "prm,1,,false").unwrap();
        drop(file);

        let ds = load_file(&path).unwrap();
        assert_eq!(
            ds.column_names(),
            ["method", "trial", "runtime_s", "converged"]
        );
        assert_eq!(
            ds.column("method").unwrap(),
            &[Value::String("rrt".into()), Value::String("prm".into())]
        );
        assert_eq!(
            ds.column("trial").unwrap(),
            &[Value::Integer(0), Value::Integer(1)]
        );
        assert_eq!(
            ds.column("runtime_s").unwrap(),
            &[Value::Float(1.5), Value::Null]
        );
        assert_eq!(
            ds.column("converged").unwrap(),
            &[Value::Bool(true), Value::Bool(false)]
        );
    }

    #[test]
    fn json_records_union_of_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(
            &path,
            r#"[{"a": 1, "b": "x"}, {"a": 2.5}, {"a": null, "b": "y"}]"#,
        )
        .unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.column_names(), ["a", "b"]);
        assert_eq!(
            ds.column("a").unwrap(),
            &[Value::Integer(1), Value::Float(2.5), Value::Null]
        );
        assert_eq!(
            ds.column("b").unwrap(),
            &[
                Value::String("x".into()),
                Value::Null,
                Value::String("y".into())
            ]
        );
    }

    #[test]
    fn parquet_round_trip_with_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("method", DataType::Utf8, false),
            Field::new("runtime_s", DataType::Float64, true),
            Field::new("trial", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["rrt", "prm"])),
                Arc::new(Float64Array::from(vec![Some(1.5), None])),
                Arc::new(Int64Array::from(vec![0_i64, 1])),
            ],
        )
        .unwrap();

        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.column_names(), ["method", "runtime_s", "trial"]);
        assert_eq!(
            ds.column("runtime_s").unwrap(),
            &[Value::Float(1.5), Value::Null]
        );
        assert_eq!(
            ds.column("trial").unwrap(),
            &[Value::Integer(0), Value::Integer(1)]
        );
    }

    #[test]
    fn unsupported_extension_fails() {
        assert!(load_file(Path::new("results.xlsx")).is_err());
    }
}
