//! File locations for one fiscal year.
//!
//! Raw files live at `<base>/front/src/data/raw/DL{year}11001/DL{year}11001{a,b}.csv` and the
//! converted trees are written to `<base>/front/src/data/japan/{year}/{revenue,expenditure}.json`.

use crate::model::Dataset;
use crate::{utils, Result};
use std::path::{Path, PathBuf};

const DATA_DIR: [&str; 3] = ["front", "src", "data"];
const RAW: &str = "raw";
const OUTPUT: &str = "japan";

/// The `YearLayout` object represents the input and output paths of a single fiscal year.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct YearLayout {
    revenue_csv: PathBuf,
    expenditure_csv: PathBuf,
    output_dir: PathBuf,
}

impl YearLayout {
    pub fn new(base_dir: impl AsRef<Path>, year: u32) -> Self {
        let data_dir: PathBuf = DATA_DIR
            .iter()
            .fold(base_dir.as_ref().to_path_buf(), |p, s| p.join(s));
        let stem = format!("DL{year}11001");
        let raw_dir = data_dir.join(RAW).join(&stem);
        let raw_csv =
            |dataset: Dataset| raw_dir.join(format!("{stem}{}.csv", dataset.file_suffix()));
        Self {
            revenue_csv: raw_csv(Dataset::Revenue),
            expenditure_csv: raw_csv(Dataset::Expenditure),
            output_dir: data_dir.join(OUTPUT).join(year.to_string()),
        }
    }

    /// The path of the raw CSV file for `dataset`.
    pub fn csv(&self, dataset: Dataset) -> &Path {
        match dataset {
            Dataset::Revenue => &self.revenue_csv,
            Dataset::Expenditure => &self.expenditure_csv,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The path of the JSON file for `dataset`.
    pub fn output(&self, dataset: Dataset) -> PathBuf {
        self.output_dir.join(dataset.output_file_name())
    }

    /// Creates the output directory, and its parents, if they do not exist.
    pub fn create_output_dir(&self) -> Result<()> {
        utils::make_dir(&self.output_dir)
    }
}

#[test]
fn test_year_layout_paths() {
    let layout = YearLayout::new("/base", 2023);
    assert_eq!(
        layout.csv(Dataset::Revenue),
        Path::new("/base/front/src/data/raw/DL202311001/DL202311001a.csv")
    );
    assert_eq!(
        layout.csv(Dataset::Expenditure),
        Path::new("/base/front/src/data/raw/DL202311001/DL202311001b.csv")
    );
    assert_eq!(
        layout.output(Dataset::Revenue),
        PathBuf::from("/base/front/src/data/japan/2023/revenue.json")
    );
    assert_eq!(
        layout.output(Dataset::Expenditure),
        PathBuf::from("/base/front/src/data/japan/2023/expenditure.json")
    );
}

#[test]
fn test_create_output_dir() {
    let dir = tempfile::TempDir::new().unwrap();
    let layout = YearLayout::new(dir.path(), 2011);
    layout.create_output_dir().unwrap();
    layout.create_output_dir().unwrap();
    assert!(layout.output_dir().is_dir());
    assert!(dir.path().join("front/src/data/japan/2011").is_dir());
}
