use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// File types offered in the open dialog.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["csv", "tsv", "txt", "json", "parquet", "pq"];

/// Load a feature table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`            – comma-separated, header row with column names
/// * `.tsv` / `.txt`   – tab-separated, same layout
/// * `.json`           – `[{ "pH": 6.8, "Turbidity": 1.2, ... }, ...]`
/// * `.parquet`        – any numeric (or numeric-text) columns
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_delimited(file, b',')
        }
        "tsv" | "txt" => {
            let file = std::fs::File::open(path).context("opening TSV")?;
            read_delimited(file, b'\t')
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row gives the column names verbatim (repeats are suffixed, see
/// [`unique_headers`]); every other cell must be a number or blank
/// (blank → `NaN`).
pub fn read_delimited<R: Read>(input: R, delimiter: u8) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::Fields)
        .from_reader(input);

    let headers = unique_headers(
        reader
            .headers()
            .context("reading CSV headers")?
            .iter()
            .map(|h| h.to_string()),
    );

    let mut dataset = Dataset::with_columns(headers.iter().cloned());

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let mut values = Vec::with_capacity(headers.len());
        for (col_idx, cell) in record.iter().enumerate() {
            values.push(parse_cell(cell, row_no, &headers[col_idx])?);
        }
        dataset.append_record(headers.iter().map(String::as_str).zip(values));
    }

    Ok(dataset)
}

/// Keep header names as given, but rename repeats `name.1`, `name.2`, …
/// the way Pandas does, so every cell keeps its own column.
pub fn unique_headers<I: IntoIterator<Item = String>>(names: I) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let mut candidate = name.clone();
        let mut n = 1;
        while out.contains(&candidate) {
            candidate = format!("{name}.{n}");
            n += 1;
        }
        out.push(candidate);
    }
    out
}

fn parse_cell(s: &str, row: usize, col: &str) -> Result<f64> {
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    s.parse::<f64>()
        .with_context(|| format!("Row {row}, column '{col}': '{s}' is not a number"))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "pH": 6.8, "Turbidity": 1.2, "Density": 1.03, "SugarContent": 4.7 },
///   ...
/// ]
/// ```
///
/// Column order follows first appearance; `null` becomes `NaN`.
pub fn parse_json(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut dataset = Dataset::default();

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut record = Vec::with_capacity(obj.len());
        for (key, val) in obj {
            let value = match val {
                JsonValue::Null => f64::NAN,
                JsonValue::Number(n) => n
                    .as_f64()
                    .with_context(|| format!("Row {i}, column '{key}': number out of range"))?,
                other => bail!("Row {i}, column '{key}': {other} is not a number"),
            };
            record.push((key.as_str(), value));
        }
        dataset.append_record(record);
    }

    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas or Polars.  Each column is cast to
/// Float64; nulls and blank strings become `NaN`, any other value that does
/// not parse as a number is an error naming its row and column.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;

    let columns = unique_headers(
        builder
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone()),
    );
    let reader = builder.build().context("building parquet reader")?;

    let mut dataset = Dataset::with_columns(columns.iter().cloned());

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let first_row = dataset.len();

        let mut float_columns = Vec::with_capacity(batch.num_columns());
        for (idx, name) in columns.iter().enumerate() {
            let source = batch.column(idx);
            let casted = cast(source, &DataType::Float64)
                .with_context(|| format!("column '{name}' is not numeric"))?;
            let floats = casted
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array after cast")?
                .clone();

            // The cast maps unparseable values to null; only real nulls may be.
            for row in 0..source.len() {
                if source.is_null(row) || !floats.is_null(row) {
                    continue;
                }
                let text = array_value_to_string(source.as_ref(), row).unwrap_or_default();
                if !text.trim().is_empty() {
                    bail!(
                        "Row {}, column '{name}': '{text}' is not a number",
                        first_row + row
                    );
                }
            }
            float_columns.push(floats);
        }

        for row in 0..batch.num_rows() {
            let record = columns.iter().zip(&float_columns).map(|(name, arr)| {
                let v = if arr.is_null(row) { f64::NAN } else { arr.value(row) };
                (name.as_str(), v)
            });
            dataset.append_record(record);
        }
    }

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use arrow::array::ArrayRef;

    use super::*;

    const FIVE_BY_FOUR: &str = "\
pH,Turbidity,Density,SugarContent
6.8,1.2,1.030,4.7
7.1,0.9,1.028,5.1
6.5,2.4,1.035,3.9
6.9,1.1,1.031,4.4
7.0,1.6,1.029,4.8
";

    #[test]
    fn csv_columns_are_taken_verbatim() {
        let ds = read_delimited(FIVE_BY_FOUR.as_bytes(), b',').unwrap();
        assert_eq!(ds.len(), 5);
        assert_eq!(ds.width(), 4);
        assert_eq!(ds.columns(), ["pH", "Turbidity", "Density", "SugarContent"]);
        assert_eq!(ds.rows()[2][1], 2.4);
    }

    #[test]
    fn blank_cells_become_nan() {
        let ds = read_delimited("a,b\n1,\n,2\n".as_bytes(), b',').unwrap();
        assert!(ds.rows()[0][1].is_nan());
        assert!(ds.rows()[1][0].is_nan());
        assert_eq!(ds.rows()[1][1], 2.0);
    }

    #[test]
    fn non_numeric_cell_is_reported() {
        let err = read_delimited("a,b\n1,oops\n".as_bytes(), b',').unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("'b'"), "{msg}");
        assert!(msg.contains("oops"), "{msg}");
    }

    #[test]
    fn tab_delimited_input() {
        let ds = read_delimited("pH\tDensity\n6.5\t1.01\n".as_bytes(), b'\t').unwrap();
        assert_eq!(ds.columns(), ["pH", "Density"]);
        assert_eq!(ds.rows()[0], vec![6.5, 1.01]);
    }

    #[test]
    fn header_only_file_gives_empty_table() {
        let ds = read_delimited("pH,Density\n".as_bytes(), b',').unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.width(), 2);
    }

    #[test]
    fn json_records_keep_key_order() {
        let ds = parse_json(r#"[{"pH": 6.8, "Density": 1.0}, {"pH": null, "Density": 2}]"#)
            .unwrap();
        assert_eq!(ds.columns(), ["pH", "Density"]);
        assert!(ds.rows()[1][0].is_nan());
        assert_eq!(ds.rows()[1][1], 2.0);
    }

    #[test]
    fn json_rejects_text_values() {
        assert!(parse_json(r#"[{"pH": "acidic"}]"#).is_err());
        assert!(parse_json(r#"{"pH": 1}"#).is_err());
    }

    #[test]
    fn parquet_columns_are_cast_to_float() {
        use std::sync::Arc;

        use arrow::array::Int64Array;
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("pH", DataType::Float64, true),
            Field::new("Count", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Float64Array::from(vec![Some(6.5), None])) as ArrayRef,
                Arc::new(Int64Array::from(vec![3, 4])) as ArrayRef,
            ],
        )
        .unwrap();

        let path = std::env::temp_dir()
            .join(format!("adulteration-loader-{}.parquet", std::process::id()));
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.columns(), ["pH", "Count"]);
        assert_eq!(ds.rows()[0], vec![6.5, 3.0]);
        assert!(ds.rows()[1][0].is_nan());
        assert_eq!(ds.rows()[1][1], 4.0);
    }

    #[test]
    fn repeated_headers_keep_every_cell() {
        let ds = read_delimited("pH,pH,Density,pH\n6.5,7.5,1.0,8.5\n".as_bytes(), b',').unwrap();
        assert_eq!(ds.columns(), ["pH", "pH.1", "Density", "pH.2"]);
        assert_eq!(ds.rows()[0], vec![6.5, 7.5, 1.0, 8.5]);
    }

    #[test]
    fn header_whitespace_is_kept() {
        let ds = read_delimited("pH, Turbidity\n6.5, 1.2\n".as_bytes(), b',').unwrap();
        assert_eq!(ds.columns(), ["pH", " Turbidity"]);
        assert_eq!(ds.rows()[0], vec![6.5, 1.2]);
    }

    fn write_parquet_file(tag: &str, columns: Vec<(&str, ArrayRef)>) -> std::path::PathBuf {
        use std::sync::Arc;

        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(
            columns
                .iter()
                .map(|(name, arr)| Field::new(*name, arr.data_type().clone(), true))
                .collect::<Vec<_>>(),
        ));
        let batch =
            RecordBatch::try_new(schema.clone(), columns.into_iter().map(|(_, a)| a).collect())
                .unwrap();

        let path = std::env::temp_dir()
            .join(format!("adulteration-loader-{tag}-{}.parquet", std::process::id()));
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        path
    }

    #[test]
    fn parquet_text_that_is_not_a_number_is_rejected() {
        use std::sync::Arc;

        use arrow::array::StringArray;

        let path = write_parquet_file(
            "text",
            vec![("pH", Arc::new(StringArray::from(vec!["6.5", "acidic"])) as ArrayRef)],
        );
        let result = load_file(&path);
        std::fs::remove_file(&path).ok();

        let msg = format!("{:#}", result.unwrap_err());
        assert!(msg.contains("'pH'"), "{msg}");
        assert!(msg.contains("acidic"), "{msg}");
        assert!(msg.contains("Row 1"), "{msg}");
    }

    #[test]
    fn parquet_numeric_text_and_nulls_load() {
        use std::sync::Arc;

        use arrow::array::StringArray;

        let path = write_parquet_file(
            "numeric-text",
            vec![("pH", Arc::new(StringArray::from(vec![Some("6.5"), None, Some("")])) as ArrayRef)],
        );
        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.rows()[0], vec![6.5]);
        assert!(ds.rows()[1][0].is_nan());
        assert!(ds.rows()[2][0].is_nan());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("samples.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
