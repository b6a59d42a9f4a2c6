//! These structs provide the CLI interface for the budget-json CLI.

use clap::Parser;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::{Deref, RangeInclusive};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// The fiscal years converted when neither --years nor --range is given.
pub const DEFAULT_YEARS: RangeInclusive<u32> = 2011..=2025;

/// budget-json: Convert government budget CSV files into nested JSON.
///
/// For each fiscal year Y, the revenue file
/// `<base>/front/src/data/raw/DLY11001/DLY11001a.csv` and the expenditure file
/// `<base>/front/src/data/raw/DLY11001/DLY11001b.csv` are read, amounts are summed by their
/// category columns, and the results are written to `<base>/front/src/data/japan/Y/revenue.json`
/// and `<base>/front/src/data/japan/Y/expenditure.json`.
///
/// Missing or broken files are reported and skipped. The program always exits successfully.
#[derive(Debug, Parser, Clone)]
#[command(version)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    /// Specific fiscal years to process, e.g. --years 2023 2024. Takes precedence over --range.
    #[arg(long, num_args = 1.., value_name = "YEAR")]
    years: Vec<u32>,

    /// An inclusive range of fiscal years to process, e.g. --range 2015 2020.
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    range: Option<Vec<u32>>,
}

impl Args {
    pub fn new(common: Common, years: Vec<u32>, range: Option<(u32, u32)>) -> Self {
        Self {
            common,
            years,
            range: range.map(|(start, end)| vec![start, end]),
        }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    /// The years to process: the explicit list if one was given, otherwise the range, otherwise
    /// `DEFAULT_YEARS`. A range whose start is after its end selects nothing.
    pub fn years(&self) -> Vec<u32> {
        if !self.years.is_empty() {
            return self.years.clone();
        }
        match self.range.as_deref() {
            Some([start, end]) => (*start..=*end).collect(),
            _ => DEFAULT_YEARS.collect(),
        }
    }
}

/// Arguments that configure the run rather than select what it converts.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber EnvFilter documentation.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The base directory of the project, the one that contains `front`. Defaults to the current
    /// directory.
    #[arg(long, env = "BUDGET_JSON_BASE_DIR", default_value_t = default_base_dir())]
    base_dir: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, base_dir: PathBuf) -> Self {
        Self {
            log_level,
            base_dir: base_dir.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn base_dir(&self) -> &DisplayPath {
        &self.base_dir
    }
}

fn default_base_dir() -> DisplayPath {
    DisplayPath(PathBuf::from("."))
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
