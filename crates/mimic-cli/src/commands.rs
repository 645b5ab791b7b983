use std::time::Instant;

use anyhow::Result;
use comfy_table::Table;
use tracing::{debug, info, info_span};

use mimic_cli::logging::redact_value;
use mimic_model::ANCHOR_BUCKETS;
use mimic_transform::fields::{CategoricalField, TIME_OF_DAY_LABELS};
use mimic_transform::normalization::bmi::BMI_CATEGORIES;

use crate::cli::CohortArgs;
use crate::pipeline::{NormalizeConfig, ingest, normalize, output};
use crate::summary::apply_table_style;
use crate::types::{CohortResult, FieldSummary};

pub fn run_fields() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Source column", "Labels"]);
    apply_table_style(&mut table);
    for field in CategoricalField::ALL {
        let rules = field.rules();
        table.add_row(vec![
            field.name().to_string(),
            field.source_column().to_string(),
            rules.labels().join(", "),
        ]);
    }
    let mut time_labels: Vec<&str> = TIME_OF_DAY_LABELS.to_vec();
    time_labels.push("Unknown");
    table.add_row(vec![
        "time_of_day".to_string(),
        "intime".to_string(),
        time_labels.join(", "),
    ]);
    table.add_row(vec![
        "anchor_year_group".to_string(),
        "anchor_year_group".to_string(),
        ANCHOR_BUCKETS
            .iter()
            .map(|bucket| bucket.label())
            .collect::<Vec<_>>()
            .join(", "),
    ]);
    table.add_row(vec![
        "bmi".to_string(),
        "weight".to_string(),
        BMI_CATEGORIES.join(", "),
    ]);
    println!("{table}");
    Ok(())
}

pub fn run_cohort(args: &CohortArgs) -> Result<CohortResult> {
    let cohort_span = info_span!("cohort", source = %args.csv.display());
    let _cohort_guard = cohort_span.enter();

    let ingest_start = Instant::now();
    let table = ingest(&args.csv)?;
    info!(
        rows = table.height(),
        columns = table.headers.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let config = NormalizeConfig {
        impute_height: args.impute_height,
    };
    let normalize_start = Instant::now();
    let derived = normalize(&table, &config)?;
    info!(
        fields = derived.len(),
        duration_ms = normalize_start.elapsed().as_millis(),
        "normalization complete"
    );
    for column in &derived {
        for issue in &column.issues {
            debug!(
                field = %column.field,
                row = issue.row,
                message = redact_value(&issue.message),
                "row issue"
            );
        }
    }

    let mut errors = Vec::new();
    let output_dir = args.output_dir.clone().unwrap_or_else(|| {
        args.csv
            .parent()
            .map_or_else(|| "output".into(), |parent| parent.join("output"))
    });
    let stem = args
        .csv
        .file_stem()
        .and_then(|name| name.to_str())
        .unwrap_or("cohort");
    let output_path = output_dir.join(format!("{stem}_normalized.csv"));

    let written = if args.dry_run {
        None
    } else {
        match output(&table, &derived, &output_path) {
            Ok(()) => {
                info!(path = %output_path.display(), "output written");
                Some(output_path)
            }
            Err(error) => {
                errors.push(format!("{error:#}"));
                None
            }
        }
    };

    let fields: Vec<FieldSummary> = derived
        .into_iter()
        .map(|column| FieldSummary {
            field: column.field.clone(),
            records: column.len(),
            issues: column.issues,
        })
        .collect();
    let issue_total: usize = fields.iter().map(|field| field.issues.len()).sum();
    let has_errors = !errors.is_empty() || (args.strict && issue_total > 0);

    Ok(CohortResult {
        source: args.csv.clone(),
        output: written,
        records: table.height(),
        fields,
        errors,
        has_errors,
    })
}
