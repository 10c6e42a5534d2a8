use std::collections::HashMap;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::models::record::CanonicalRecord;

/// Row counts before and after deduplication, for observability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DedupMetrics {
    /// Total hunks produced across the collection.
    pub hunks: usize,
    /// Hunks retained after dropping duplicated content.
    pub unique_hunks: usize,
}

/// SHA-256 of a hunk body, the grouping key for deduplication.
fn hunk_key(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Drop every record whose hunk text appears more than once in the
/// collection.
///
/// All occurrences are removed, not merged: duplicated content means the
/// same underlying fix was seen via multiple catalogs and cannot be
/// attributed to one canonical source. This step must run once, over the
/// complete merged collection, before any other filtering.
#[must_use]
pub fn dedup_by_hunk(records: Vec<CanonicalRecord>) -> (Vec<CanonicalRecord>, DedupMetrics) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in &records {
        *counts.entry(hunk_key(&record.hunk)).or_insert(0) += 1;
    }

    let hunks = records.len();
    let unique: Vec<CanonicalRecord> = records
        .into_iter()
        .filter(|r| counts[&hunk_key(&r.hunk)] == 1)
        .collect();

    let metrics = DedupMetrics {
        hunks,
        unique_hunks: unique.len(),
    };
    (unique, metrics)
}

/// Keep records whose `lang` is in the allow-list (e.g. `.c`/`.h`).
#[must_use]
pub fn language(records: Vec<CanonicalRecord>, allowed: &[String]) -> Vec<CanonicalRecord> {
    records
        .into_iter()
        .filter(|r| allowed.iter().any(|l| l == &r.lang))
        .collect()
}

/// Keep records with equal addition and deletion counts.
#[must_use]
pub fn balanced_edits(records: Vec<CanonicalRecord>) -> Vec<CanonicalRecord> {
    records
        .into_iter()
        .filter(|r| r.additions == r.deletions)
        .collect()
}

/// Keep records with exactly one added line. Together with the balanced
/// filter this selects strict single-line substitutions.
#[must_use]
pub fn single_addition(records: Vec<CanonicalRecord>) -> Vec<CanonicalRecord> {
    records.into_iter().filter(|r| r.additions == 1).collect()
}

/// The structural filter chain applied after ingestion-time deduplication.
///
/// The three predicates read disjoint fields, so their order does not
/// affect the result; they run in a fixed sequence here.
pub struct FilterPipeline {
    languages: Vec<String>,
}

impl FilterPipeline {
    #[must_use]
    pub fn new(languages: Vec<String>) -> Self {
        Self { languages }
    }

    #[must_use]
    pub fn apply(&self, records: Vec<CanonicalRecord>) -> Vec<CanonicalRecord> {
        let records = language(records, &self.languages);
        let records = balanced_edits(records);
        single_addition(records)
    }
}
