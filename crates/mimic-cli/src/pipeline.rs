//! Pipeline stage functions: ingest, normalize, output.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use mimic_ingest::CsvTable;
use mimic_model::{BmiOptions, NormalizedColumn, RawValue};
use mimic_transform::fields::{
    CategoricalField, parse_anchor_year, parse_bmi, parse_categorical, parse_time_of_day,
};
use mimic_transform::population_mean_height;

/// Configuration for the normalize stage.
#[derive(Debug, Clone, Default)]
pub struct NormalizeConfig {
    /// Substitute the cohort mean height for missing heights in BMI rows.
    pub impute_height: bool,
}

/// Load the cohort extract.
pub fn ingest(path: &Path) -> Result<CsvTable> {
    mimic_ingest::load_csv(path)
}

/// Apply every transformation whose source columns are present.
///
/// Each derivation yields one row-aligned label column; per-row problems
/// are carried as issues on the column rather than failing the run.
pub fn normalize(table: &CsvTable, config: &NormalizeConfig) -> Result<Vec<NormalizedColumn>> {
    let mut derived = Vec::new();

    for field in CategoricalField::ALL {
        let Some(values) = table.text_column(field.source_column()) else {
            debug!(
                field = field.name(),
                column = field.source_column(),
                "source column absent"
            );
            continue;
        };
        let column = parse_categorical(field, &values);
        log_field(&column);
        derived.push(column);
    }

    if let Some(values) = timestamp_column(table) {
        let column = parse_time_of_day(&values);
        log_field(&column);
        derived.push(column);
    }

    if let (Some(groups), Some(dates), Some(years)) = (
        table.text_column("anchor_year_group"),
        table.text_column("admittime"),
        table.text_column("anchor_year"),
    ) {
        let column = parse_anchor_year(&groups, &dates, &years)?;
        log_field(&column);
        derived.push(column);
    }

    if let (Some(weights), Some(heights)) = (
        table.numeric_column("weight"),
        table.numeric_column("height"),
    ) {
        let ethnicities = table
            .text_column("race")
            .unwrap_or_else(|| vec![RawValue::Missing; table.height()]);
        let mut options = BmiOptions::new();
        if config.impute_height
            && let Some(mean) = population_mean_height(&heights)
        {
            options = options.with_imputation(mean);
        }
        let column = parse_bmi(&weights, &heights, &ethnicities, &options)?;
        log_field(&column);
        derived.push(column);
    }

    Ok(derived)
}

fn log_field(column: &NormalizedColumn) {
    info!(
        field = %column.field,
        records = column.len(),
        issues = column.issue_count(),
        "field normalized"
    );
}

// Intervention timestamps come from the ICU stay when available, otherwise
// from the hospital admission.
fn timestamp_column(table: &CsvTable) -> Option<Vec<RawValue>> {
    table
        .text_column("intime")
        .or_else(|| table.text_column("admittime"))
}

/// Write the input columns plus one `<field>_label` column per derivation.
/// Rows whose derivation failed write an empty label cell.
pub fn output(table: &CsvTable, derived: &[NormalizedColumn], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;

    let mut headers = table.headers.clone();
    headers.extend(derived.iter().map(|column| format!("{}_label", column.field)));
    writer
        .write_record(&headers)
        .with_context(|| format!("write headers to {}", path.display()))?;

    for (index, row) in table.rows.iter().enumerate() {
        let mut record: Vec<&str> = row.iter().map(String::as_str).collect();
        for column in derived {
            let label = column
                .values
                .get(index)
                .and_then(|value| value.as_deref())
                .unwrap_or("");
            record.push(label);
        }
        writer
            .write_record(&record)
            .with_context(|| format!("write row {} to {}", index + 1, path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}
