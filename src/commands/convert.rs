//! Converting raw budget CSV files into JSON trees, one fiscal year at a time.

use crate::commands::Out;
use crate::layout::YearLayout;
use crate::model::{Amount, Dataset};
use crate::parse::{self, ParsedCsv};
use crate::{utils, Result};
use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// What happened to one dataset of one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// The CSV was read and the JSON tree was written.
    Created {
        input: PathBuf,
        output: PathBuf,
        amount_column: Option<String>,
        rows: usize,
        total: Option<Amount>,
    },
    /// There was no CSV to read.
    Missing { input: PathBuf },
    /// Reading the CSV or writing the JSON failed; a parse failure leaves earlier output untouched.
    Failed { input: PathBuf, error: String },
}

impl FileOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            FileOutcome::Created { .. } => "created",
            FileOutcome::Missing { .. } => "missing",
            FileOutcome::Failed { .. } => "failed",
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, FileOutcome::Created { .. })
    }
}

/// The outcome of both datasets for one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearReport {
    year: u32,
    revenue: FileOutcome,
    expenditure: FileOutcome,
}

impl YearReport {
    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn outcome(&self, dataset: Dataset) -> &FileOutcome {
        match dataset {
            Dataset::Revenue => &self.revenue,
            Dataset::Expenditure => &self.expenditure,
        }
    }

    fn outcomes(&self) -> impl Iterator<Item = &FileOutcome> {
        [&self.revenue, &self.expenditure].into_iter()
    }
}

/// A year that could not be processed at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearFailure {
    year: u32,
    error: String,
}

impl YearFailure {
    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn error(&self) -> &str {
        &self.error
    }
}

/// The outcome of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    years: Vec<YearReport>,
    failed_years: Vec<YearFailure>,
}

impl BatchReport {
    pub fn years(&self) -> &[YearReport] {
        &self.years
    }

    pub fn failed_years(&self) -> &[YearFailure] {
        &self.failed_years
    }

    fn count(&self, status: &str) -> usize {
        self.years
            .iter()
            .flat_map(YearReport::outcomes)
            .filter(|o| o.status() == status)
            .count()
    }
}

/// Converts every year in `years`, in order.
///
/// A failure in one year is logged and recorded in the report, and the remaining years are still
/// processed. This function does not fail.
pub fn convert(base_dir: &Path, years: &[u32]) -> Out<BatchReport> {
    info!("Processing years: {years:?}");
    let mut report = BatchReport::default();
    for &year in years {
        match convert_year(base_dir, year) {
            Ok(out) => {
                out.print();
                report.years.extend(out.into_structure());
            }
            Err(e) => {
                error!("Error processing year {year}: {e:#}");
                report.failed_years.push(YearFailure {
                    year,
                    error: format!("{e:#}"),
                });
            }
        }
    }
    let message = format!(
        "Processing complete! {} created, {} missing, {} failed, {} year(s) skipped",
        report.count("created"),
        report.count("missing"),
        report.count("failed"),
        report.failed_years.len()
    );
    Out::new(message, report)
}

/// Converts the revenue and expenditure CSV files of `year` found under `base_dir`.
///
/// The two datasets are independent: a missing or broken file for one of them does not stop the
/// other from being written.
///
/// # Errors
/// - Returns an error if the output directory cannot be created.
pub fn convert_year(base_dir: &Path, year: u32) -> Result<Out<YearReport>> {
    info!("Processing year {year}...");
    let layout = YearLayout::new(base_dir, year);
    layout
        .create_output_dir()
        .with_context(|| format!("Unable to prepare the output directory for {year}"))?;

    let revenue = convert_dataset(&layout, Dataset::Revenue);
    let expenditure = convert_dataset(&layout, Dataset::Expenditure);
    let message = format!(
        "Finished {year}: revenue {}, expenditure {}",
        revenue.status(),
        expenditure.status()
    );
    Ok(Out::new(
        message,
        YearReport {
            year,
            revenue,
            expenditure,
        },
    ))
}

/// Converts one dataset of the year described by `layout`, reporting rather than returning
/// errors.
pub fn convert_dataset(layout: &YearLayout, dataset: Dataset) -> FileOutcome {
    let input = layout.csv(dataset).to_path_buf();
    if !input.exists() {
        warn!("{} CSV not found: {}", dataset.label(), input.display());
        return FileOutcome::Missing { input };
    }

    info!("Processing {dataset} data: {}", input.display());
    let output = layout.output(dataset);
    match write_tree(&input, &output, dataset) {
        Ok(parsed) => {
            let total = parsed.tree().total();
            info!("Created: {}", output.display());
            debug!(
                "{} rows summed into {} leaves, total {} yen",
                parsed.rows(),
                parsed.tree().leaf_count(),
                total.map(|t| t.to_string()).unwrap_or_else(|| "n/a".into())
            );
            FileOutcome::Created {
                input,
                output,
                amount_column: parsed.amount_column().map(|h| h.to_string()),
                rows: parsed.rows(),
                total,
            }
        }
        Err(e) => {
            error!("Error processing {dataset} data: {e:#}");
            FileOutcome::Failed {
                input,
                error: format!("{e:#}"),
            }
        }
    }
}

/// The tree is fully built before `output` is opened, so a parse failure leaves any earlier
/// output untouched.
fn write_tree(input: &Path, output: &Path, dataset: Dataset) -> Result<ParsedCsv> {
    let parsed = parse::parse_file(input, dataset)?;
    utils::write_json(output, parsed.tree())?;
    Ok(parsed)
}
