//! Header lookup for raw budget CSV files, including selection of the amount column.

use super::dataset::{Dataset, EXCLUDED_MARKERS};
use csv::StringRecord;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

const BOM: char = '\u{feff}';

/// Maps header names to column positions.
///
/// Lookups behave like a dictionary keyed by header name. When a header appears more than once,
/// the rightmost column with that name wins.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Mapping {
    headers: Vec<Header>,
    header_map: HashMap<Header, usize>,
}

impl Mapping {
    pub fn new<S, I>(headers: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        let headers: Vec<Header> = headers.into_iter().map(|s| Header(s.into())).collect();

        // Later entries overwrite earlier ones.
        let header_map: HashMap<Header, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, key)| (key.to_owned(), idx))
            .collect();

        Self {
            headers,
            header_map,
        }
    }

    /// Build a mapping from a CSV header row, ignoring a UTF-8 byte-order mark before the first
    /// header.
    pub fn from_record(record: &StringRecord) -> Self {
        Self::new(
            record
                .iter()
                .enumerate()
                .map(|(idx, h)| if idx == 0 { h.trim_start_matches(BOM) } else { h }),
        )
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn index(&self, header: &str) -> Option<usize> {
        self.header_map.get(header).copied()
    }

    /// Get the field of `record` that sits under `header`, if both the header and the field exist.
    pub fn get<'r>(&self, record: &'r StringRecord, header: &str) -> Option<&'r str> {
        self.index(header).and_then(|idx| record.get(idx))
    }
}

/// Chooses the header that holds the amount to aggregate for `dataset`.
///
/// The first header that contains one of the dataset's amount markers, and none of the prior-year
/// or comparison markers, is chosen. Otherwise the header at the dataset's fallback position is
/// chosen, if the header list is long enough to have one.
pub fn resolve_amount_column(dataset: Dataset, headers: &[Header]) -> Option<&Header> {
    headers
        .iter()
        .find(|h| is_amount_header(dataset, h.as_ref()))
        .or_else(|| headers.get(dataset.fallback_amount_index()))
}

fn is_amount_header(dataset: Dataset, header: &str) -> bool {
    dataset.amount_markers().iter().any(|m| header.contains(m))
        && !EXCLUDED_MARKERS.iter().any(|m| header.contains(m))
}

/// Represents a header in a raw CSV file, for example, `目名`
#[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Header(String);

impl AsRef<str> for Header {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Borrow<str> for Header {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

impl<S: Into<String>> From<S> for Header {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

impl Display for Header {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn headers(names: &[&str]) -> Vec<Header> {
        names.iter().map(|&s| Header::from(s)).collect()
    }

    fn resolved(dataset: Dataset, names: &[&str]) -> Option<String> {
        let headers = headers(names);
        resolve_amount_column(dataset, &headers).map(|h| h.to_string())
    }

    #[test]
    fn test_revenue_marker() {
        let actual = resolved(
            Dataset::Revenue,
            &["主管", "款名", "項名", "目名", "令和5年度予算額(千円)"],
        );
        assert_eq!(actual.as_deref(), Some("令和5年度予算額(千円)"));
    }

    #[test]
    fn test_revenue_skips_prior_year_and_comparison() {
        let actual = resolved(
            Dataset::Revenue,
            &[
                "主管",
                "前年度予算額(千円)",
                "比較増△減額予算額(千円)",
                "令和5年度予算額(千円)",
            ],
        );
        assert_eq!(actual.as_deref(), Some("令和5年度予算額(千円)"));
    }

    #[test]
    fn test_revenue_first_candidate_wins() {
        let actual = resolved(
            Dataset::Revenue,
            &["当初予算額(千円)", "補正予算額(千円)"],
        );
        assert_eq!(actual.as_deref(), Some("当初予算額(千円)"));
    }

    #[test]
    fn test_expenditure_markers() {
        let request = resolved(
            Dataset::Expenditure,
            &["所管", "組織", "目名", "令和6年度要求額(千円)"],
        );
        assert_eq!(request.as_deref(), Some("令和6年度要求額(千円)"));

        let budget = resolved(
            Dataset::Expenditure,
            &["所管", "組織", "目名", "前年度予算額(千円)", "令和6年度予算額(千円)"],
        );
        assert_eq!(budget.as_deref(), Some("令和6年度予算額(千円)"));
    }

    #[test]
    fn test_expenditure_ignores_revenue_marker_without_year() {
        // "予算額(千円)" alone is not an expenditure marker, so the fallback applies.
        let names: Vec<String> = (0..12).map(|i| format!("c{i}")).collect();
        let mut names: Vec<&str> = names.iter().map(String::as_str).collect();
        names[0] = "予算額(千円)";
        let actual = resolved(Dataset::Expenditure, &names);
        assert_eq!(actual.as_deref(), Some("c11"));
    }

    #[test]
    fn test_revenue_fallback_index() {
        let names: Vec<String> = (0..10).map(|i| format!("c{i}")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        assert_eq!(resolved(Dataset::Revenue, &names).as_deref(), Some("c9"));
    }

    #[test]
    fn test_fallback_too_short() {
        let names: Vec<String> = (0..9).map(|i| format!("c{i}")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        assert_eq!(resolved(Dataset::Revenue, &names), None);

        let names: Vec<String> = (0..11).map(|i| format!("c{i}")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        assert_eq!(resolved(Dataset::Expenditure, &names), None);
    }

    #[test]
    fn test_empty_headers() {
        assert_eq!(resolved(Dataset::Revenue, &[]), None);
    }

    #[test]
    fn test_mapping_lookup() {
        let mapping = Mapping::new(["所管", "組織", "目名"]);
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.index("組織"), Some(1));
        assert_eq!(mapping.index("主管"), None);
    }

    #[test]
    fn test_mapping_duplicate_header_rightmost_wins() {
        let mapping = Mapping::new(["目名", "x", "目名"]);
        assert_eq!(mapping.index("目名"), Some(2));
        let record = StringRecord::from(vec!["left", "x", "right"]);
        assert_eq!(mapping.get(&record, "目名"), Some("right"));
    }

    #[test]
    fn test_mapping_from_record_strips_byte_order_mark() {
        let record = StringRecord::from(vec!["\u{feff}主管", "款名"]);
        let mapping = Mapping::from_record(&record);
        assert_eq!(mapping.index("主管"), Some(0));
        assert_eq!(mapping.headers()[0].as_ref(), "主管");
        assert_eq!(mapping.index("款名"), Some(1));
    }

    #[test]
    fn test_mapping_get_short_record() {
        let mapping = Mapping::new(["a", "b", "c"]);
        let record = StringRecord::from(vec!["1"]);
        assert_eq!(mapping.get(&record, "a"), Some("1"));
        assert_eq!(mapping.get(&record, "c"), None);
    }
}
