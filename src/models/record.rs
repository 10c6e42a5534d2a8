use serde::{Deserialize, Serialize};

use crate::models::patch::Patch;

/// Canonical per-item metadata supplied by a source adapter.
///
/// Any field may be empty: sources without a VCS expose no commit, and not
/// every catalog entry carries a CVE identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMeta {
    pub project: String,
    pub commit: String,
    pub cve_year: String,
    pub cve_number: String,
}

impl RecordMeta {
    #[must_use]
    pub fn new(
        project: impl Into<String>,
        commit: impl Into<String>,
        cve_year: impl Into<String>,
        cve_number: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            commit: commit.into(),
            cve_year: cve_year.into(),
            cve_number: cve_number.into(),
        }
    }
}

/// The normalized row unit consumed by the filter pipeline.
///
/// Created once per `(Patch, Hunk)` pair during expansion and immutable
/// afterwards; filtering always builds a new collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub project: String,
    pub commit: String,
    pub cve_year: String,
    pub cve_number: String,
    /// File stem of the originating file diff.
    pub name: String,
    /// File extension of the originating file diff (e.g. ".c").
    pub lang: String,
    /// Hunk body joined as text.
    pub hunk: String,
    pub additions: u32,
    pub deletions: u32,
    /// The hunk header line.
    pub hunk_name: String,
}

/// Explode one patch into one record per hunk, file-diff order then hunk
/// order, attaching the canonical metadata to every row.
///
/// An empty patch yields zero records; callers use that to skip the source
/// item entirely.
#[must_use]
pub fn expand(patch: &Patch, meta: &RecordMeta) -> Vec<CanonicalRecord> {
    let mut records = Vec::with_capacity(patch.hunk_count());
    for diff in &patch.files {
        for hunk in &diff.hunks {
            records.push(CanonicalRecord {
                project: meta.project.clone(),
                commit: meta.commit.clone(),
                cve_year: meta.cve_year.clone(),
                cve_number: meta.cve_number.clone(),
                name: diff.name.clone(),
                lang: diff.lang.clone(),
                hunk: hunk.body(),
                additions: hunk.additions(),
                deletions: hunk.deletions(),
                hunk_name: hunk.name.clone(),
            });
        }
    }
    records
}
