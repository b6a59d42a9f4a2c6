//! Reading raw budget CSV files into a `BudgetTree`.

use crate::model::{resolve_amount_column, Amount, BudgetTree, Dataset, Header, Mapping};
use crate::{utils, Result};
use anyhow::{bail, Context};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;
use tracing::{debug, trace, warn};

/// The outcome of reading one raw CSV file.
#[derive(Debug, Clone)]
pub struct ParsedCsv {
    tree: BudgetTree,
    amount_column: Option<Header>,
    rows: usize,
}

impl ParsedCsv {
    pub fn tree(&self) -> &BudgetTree {
        &self.tree
    }

    /// The header the amounts were read from, or `None` if every amount was taken as zero.
    pub fn amount_column(&self) -> Option<&Header> {
        self.amount_column.as_ref()
    }

    /// The number of data rows that were summed into the tree.
    pub fn rows(&self) -> usize {
        self.rows
    }
}

/// Read the CSV file at `path` as `dataset`.
pub fn parse_file(path: impl AsRef<Path>, dataset: Dataset) -> Result<ParsedCsv> {
    let path = path.as_ref();
    let reader = utils::open(path)?;
    parse_reader(reader, dataset).with_context(|| format!("Unable to parse {}", path.display()))
}

/// Read CSV data as `dataset`.
///
/// Category fields are trimmed and every one of them must be present in every row. The amount
/// column is chosen once from the header row, and any amount that is absent, empty or not an
/// integer counts as zero.
pub fn parse_reader<R>(reader: R, dataset: Dataset) -> Result<ParsedCsv>
where
    R: Read,
{
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let mapping = Mapping::from_record(rdr.headers().context("Unable to read the header row")?);
    if mapping.is_empty() {
        bail!("The file has no header row");
    }

    let amount_column = resolve_amount_column(dataset, mapping.headers()).cloned();
    match &amount_column {
        Some(header) => debug!("Reading {dataset} amounts from column '{header}'"),
        None => warn!(
            "No amount column found among {} headers, all {dataset} amounts will be zero",
            mapping.len()
        ),
    }

    let mut tree = BudgetTree::for_dataset(dataset);
    let mut rows = 0;
    for result in rdr.records() {
        let record = result.context("Unable to read CSV record")?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let keys = dataset
            .key_columns()
            .iter()
            .map(|&column| {
                mapping
                    .get(&record, column)
                    .map(str::trim)
                    .with_context(|| format!("Line {line} has no value for column '{column}'"))
            })
            .collect::<Result<Vec<&str>>>()?;
        let cell = amount_column
            .as_ref()
            .and_then(|header| mapping.get(&record, header.as_ref()));
        let amount = Amount::from_cell(cell);
        trace!("line {line}: {keys:?} += {amount}");
        tree.add(&keys, amount)
            .with_context(|| format!("Unable to add line {line} to the {dataset} tree"))?;
        rows += 1;
    }

    Ok(ParsedCsv {
        tree,
        amount_column,
        rows,
    })
}
