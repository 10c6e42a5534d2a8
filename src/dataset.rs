use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{PatchsetError, Result};
use crate::models::record::CanonicalRecord;

/// A flat, densely indexed collection of canonical records.
///
/// This is the boundary shape handed to persistence: one JSON object per
/// line, nine named fields, nothing else. Filtering always builds a new
/// dataset, so positional indexes never carry meaning across stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<CanonicalRecord>,
}

/// Shape summary for the `stats` command.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub records: usize,
    /// Record counts per language extension.
    pub languages: BTreeMap<String, usize>,
    /// Records with equal addition/deletion counts.
    pub balanced: usize,
    /// Records with exactly one addition and one deletion.
    pub single_line: usize,
}

impl Dataset {
    #[must_use]
    pub fn new(records: Vec<CanonicalRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<CanonicalRecord> {
        self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the dataset as JSON lines, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        let mut writer = BufWriter::new(file);
        for record in &self.records {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Load a dataset previously written by [`Dataset::save`].
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PatchsetError::DatasetNotFound {
                path: path.display().to_string(),
            });
        }
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(Self { records })
    }

    #[must_use]
    pub fn summary(&self) -> DatasetSummary {
        let mut languages: BTreeMap<String, usize> = BTreeMap::new();
        for record in &self.records {
            *languages.entry(record.lang.clone()).or_insert(0) += 1;
        }
        DatasetSummary {
            records: self.records.len(),
            languages,
            balanced: self
                .records
                .iter()
                .filter(|r| r.additions == r.deletions)
                .count(),
            single_line: self
                .records
                .iter()
                .filter(|r| r.additions == 1 && r.deletions == 1)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(lang: &str, hunk: &str, additions: u32, deletions: u32) -> CanonicalRecord {
        CanonicalRecord {
            project: "proj".into(),
            commit: "abc".into(),
            cve_year: "2014".into(),
            cve_number: "0160".into(),
            name: "file".into(),
            lang: lang.into(),
            hunk: hunk.into(),
            additions,
            deletions,
            hunk_name: "@@ -1 +1 @@".into(),
        }
    }

    #[test]
    fn save_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("transformed/test.jsonl");

        let dataset = Dataset::new(vec![
            record(".c", "line one\nline two", 1, 1),
            record(".h", "other", 2, 0),
        ]);
        dataset.save(&path).unwrap();

        let loaded = Dataset::load(&path).unwrap();
        assert_eq!(loaded, dataset);
    }

    #[test]
    fn load_missing_dataset_is_a_typed_error() {
        let err = Dataset::load(Path::new("/nonexistent/x.jsonl")).unwrap_err();
        assert!(matches!(err, PatchsetError::DatasetNotFound { .. }));
    }

    #[test]
    fn hunks_with_newlines_survive_jsonl() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ds.jsonl");

        let body = "int main() {\n-int x = 1;\n+int x = 2;\n}";
        Dataset::new(vec![record(".c", body, 1, 1)]).save(&path).unwrap();

        let loaded = Dataset::load(&path).unwrap();
        assert_eq!(loaded.records()[0].hunk, body);
        // One record, one line.
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw.trim_end().lines().count(), 1);
    }

    #[test]
    fn summary_counts_shapes() {
        let dataset = Dataset::new(vec![
            record(".c", "a", 1, 1),
            record(".c", "b", 2, 2),
            record(".h", "c", 3, 1),
        ]);
        let summary = dataset.summary();
        assert_eq!(summary.records, 3);
        assert_eq!(summary.languages[".c"], 2);
        assert_eq!(summary.languages[".h"], 1);
        assert_eq!(summary.balanced, 2);
        assert_eq!(summary.single_line, 1);
    }

    #[test]
    fn empty_dataset_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.jsonl");
        Dataset::default().save(&path).unwrap();
        let loaded = Dataset::load(&path).unwrap();
        assert!(loaded.is_empty());
    }
}
