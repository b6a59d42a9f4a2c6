use serde::{Deserialize, Serialize};

/// Substrings that mark a prior-year or comparison column, which must never be used as the amount.
pub(crate) const EXCLUDED_MARKERS: &[&str] = &["前年度", "比較"];

/// The two kinds of budget data published for each fiscal year.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    /// Revenue (歳入): 主管 → 款名 → 項名 → 目名
    Revenue,
    /// Expenditure (歳出): 所管 → 組織 → 目名
    Expenditure,
}

serde_plain::derive_display_from_serialize!(Dataset);
serde_plain::derive_fromstr_from_deserialize!(Dataset);

impl Dataset {
    /// The category columns, in the order they nest in the output tree.
    pub fn key_columns(&self) -> &'static [&'static str] {
        match self {
            Dataset::Revenue => &["主管", "款名", "項名", "目名"],
            Dataset::Expenditure => &["所管", "組織", "目名"],
        }
    }

    /// A header containing any one of these is a candidate amount column.
    pub fn amount_markers(&self) -> &'static [&'static str] {
        match self {
            Dataset::Revenue => &["予算額(千円)"],
            Dataset::Expenditure => &["年度要求額(千円)", "年度予算額(千円)"],
        }
    }

    /// The column used for amounts when no header carries an amount marker.
    ///
    /// These positions match a specific revision of the published files and are not checked
    /// against the header label.
    pub fn fallback_amount_index(&self) -> usize {
        match self {
            Dataset::Revenue => 9,
            Dataset::Expenditure => 11,
        }
    }

    /// The suffix that follows `DL{year}11001` in the raw CSV file name.
    pub(crate) fn file_suffix(&self) -> char {
        match self {
            Dataset::Revenue => 'a',
            Dataset::Expenditure => 'b',
        }
    }

    pub fn output_file_name(&self) -> String {
        format!("{self}.json")
    }

    /// Capitalized name used in console messages.
    pub fn label(&self) -> &'static str {
        match self {
            Dataset::Revenue => "Revenue",
            Dataset::Expenditure => "Expenditure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display_and_parse() {
        assert_eq!(Dataset::Revenue.to_string(), "revenue");
        assert_eq!(Dataset::Expenditure.to_string(), "expenditure");
        assert_eq!(Dataset::from_str("expenditure").unwrap(), Dataset::Expenditure);
        assert!(Dataset::from_str("income").is_err());
    }

    #[test]
    fn test_depths() {
        assert_eq!(Dataset::Revenue.key_columns().len(), 4);
        assert_eq!(Dataset::Expenditure.key_columns().len(), 3);
    }

    #[test]
    fn test_output_file_names() {
        assert_eq!(Dataset::Revenue.output_file_name(), "revenue.json");
        assert_eq!(Dataset::Expenditure.output_file_name(), "expenditure.json");
    }
}
