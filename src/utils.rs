use crate::Result;
use anyhow::Context;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Create a directory and any missing parents. Does nothing if it already exists.
pub(crate) fn make_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path)
        .with_context(|| format!("Unable to create directory {}", path.display()))
}

/// Open a file for buffered reading.
pub(crate) fn open(path: impl AsRef<Path>) -> Result<BufReader<File>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Unable to open file {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Serialize `value` as pretty JSON with two-space indentation and write it to `path`, replacing
/// anything that was there before. Non-ASCII characters are written as-is.
pub(crate) fn write_json<T>(path: impl AsRef<Path>, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("Unable to create file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Unable to write JSON to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Unable to write data to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_make_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        make_dir(&nested).unwrap();
        make_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_write_json_unescaped_two_space() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        let mut inner = BTreeMap::new();
        inner.insert("目名", 8000);
        let mut value = BTreeMap::new();
        value.insert("主管", inner);
        write_json(&path, &value).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"主管\": {\n    \"目名\": 8000\n  }\n}");
    }

    #[test]
    fn test_write_json_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "a much longer previous file that must disappear").unwrap();
        write_json(&path, &Vec::<u8>::new()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = open(dir.path().join("nope.csv")).unwrap_err();
        assert!(err.to_string().contains("nope.csv"));
    }
}
