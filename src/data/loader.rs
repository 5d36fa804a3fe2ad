use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{LaunchDataset, LaunchRecord};

pub const LAUNCH_SITE: &str = "Launch Site";
pub const PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const CLASS: &str = "class";
pub const BOOSTER_CATEGORY: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; `Launch Site`, `Payload Mass (kg)`, `class`,
///   `Booster Version Category` columns (others ignored)
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 0.0, ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv(file)?
        }
        "json" => {
            let file = std::fs::File::open(path).context("opening JSON file")?;
            read_json(file)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let dataset = LaunchDataset::from_records(records)
        .with_context(|| format!("validating {}", path.display()))?;
    log::info!(
        "Loaded {} launches from {} ({} sites)",
        dataset.len(),
        path.display(),
        dataset.sites().len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Deserialize rows by header name; extra columns (flight number, mission
/// outcome, the unnamed index column pandas writes) are skipped.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in [LAUNCH_SITE, PAYLOAD_MASS, CLASS, BOOSTER_CATEGORY] {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    reader
        .deserialize::<LaunchRecord>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, i.e. `df.to_json(orient='records')`.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<LaunchRecord>> {
    serde_json::from_reader(reader).context("parsing JSON launch records")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Payload may be any numeric type and
/// `class` any integer type; both are cast before reading.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        records.extend(records_from_batch(&batch)?);
    }
    Ok(records)
}

pub fn records_from_batch(batch: &RecordBatch) -> Result<Vec<LaunchRecord>> {
    let sites = cast(column(batch, LAUNCH_SITE)?, &DataType::Utf8)
        .context("casting launch site column")?;
    let payloads = cast(column(batch, PAYLOAD_MASS)?, &DataType::Float64)
        .context("casting payload column")?;
    let classes = cast(column(batch, CLASS)?, &DataType::Int64)
        .context("casting class column")?;
    let boosters = cast(column(batch, BOOSTER_CATEGORY)?, &DataType::Utf8)
        .context("casting booster category column")?;

    let sites = sites.as_string::<i32>();
    let payloads = payloads.as_primitive::<Float64Type>();
    let classes = classes.as_primitive::<Int64Type>();
    let boosters = boosters.as_string::<i32>();

    (0..batch.num_rows())
        .map(|row| {
            for (name, col) in [
                (LAUNCH_SITE, sites as &dyn Array),
                (PAYLOAD_MASS, payloads as &dyn Array),
                (CLASS, classes as &dyn Array),
                (BOOSTER_CATEGORY, boosters as &dyn Array),
            ] {
                if col.is_null(row) {
                    bail!("Row {row}: null value in '{name}'");
                }
            }
            let class = classes.value(row);
            let outcome_class = u8::try_from(class)
                .with_context(|| format!("Row {row}: class {class} out of range"))?;
            Ok(LaunchRecord {
                launch_site: sites.value(row).to_string(),
                payload_mass_kg: payloads.value(row),
                outcome_class,
                booster_version_category: boosters.value(row).to_string(),
            })
        })
        .collect()
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}
