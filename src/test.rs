//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::layout::YearLayout;
use crate::model::Dataset;
use std::path::Path;
use tempfile::TempDir;

/// A revenue file with a duplicated (after trimming) path and one malformed amount.
pub const REVENUE_CSV: &str = "\
主管,款名,項名,目名,令和5年度予算額(千円),前年度予算額(千円),比較増△減額(千円)
財務省,租税及印紙収入,租税,所得税,5,4,1
財務省,租税及印紙収入,租税, 所得税 ,3,3,0
財務省,租税及印紙収入,租税,法人税,2,2,0
財務省,雑収入,諸収入,雑入,-,0,0
";

/// An expenditure file whose 項名 column is not part of the tree, so two rows share a leaf.
pub const EXPENDITURE_CSV: &str = "\
所管,組織,項名,目名,令和5年度要求額(千円),前年度予算額(千円)
皇室費,皇室費,皇室費,内廷費,324000,324000
皇室費,皇室費,宮廷費,宮廷費,5,5
国会,衆議院,衆議院,議員歳費,1000,1000
";

/// Test environment that provides an empty base directory.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    temp_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn base(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn layout(&self, year: u32) -> YearLayout {
        YearLayout::new(self.base(), year)
    }

    /// Writes `contents` to the raw CSV location of `dataset` for `year`.
    pub fn write_csv(&self, year: u32, dataset: Dataset, contents: &str) {
        let layout = self.layout(year);
        let path = layout.csv(dataset);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    pub fn output_exists(&self, year: u32, dataset: Dataset) -> bool {
        self.layout(year).output(dataset).is_file()
    }

    /// Reads and parses the JSON output of `dataset` for `year`.
    pub fn read_json(&self, year: u32, dataset: Dataset) -> serde_json::Value {
        let content = std::fs::read_to_string(self.layout(year).output(dataset)).unwrap();
        serde_json::from_str(&content).unwrap()
    }
}
