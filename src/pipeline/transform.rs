use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;

use crate::config::Settings;
use crate::dataset::Dataset;
use crate::diff::comments::{strip_comments, style_for};
use crate::diff::compute::unified_diff;
use crate::diff::parser::{parse, parse_lines};
use crate::diff::split_lines;
use crate::error::{PatchsetError, Result};
use crate::models::patch::Patch;
use crate::models::record::{expand, CanonicalRecord};
use crate::pipeline::filters::dedup_by_hunk;
use crate::sources::{PatchInput, SourceAdapter, SourceItem};

/// Statistics from one source's transform run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransformMetrics {
    /// Items the adapter enumerated.
    pub items: usize,
    /// Items whose patch turned out empty (no usable diff content).
    pub empty_patches: usize,
    /// Items skipped because artifact bytes were not valid text.
    pub skipped_decode: usize,
    /// Items skipped because an artifact exceeds the size limit.
    pub skipped_too_large: usize,
    /// Items skipped due to IO errors.
    pub skipped_io: usize,
    /// Total hunks produced before deduplication.
    pub hunks: usize,
    /// Hunks retained after deduplication.
    pub unique_hunks: usize,
}

enum ItemOutcome {
    Records(Vec<CanonicalRecord>),
    Empty,
    SkippedDecode,
    SkippedTooLarge,
    SkippedIo,
}

/// Expand one source into raw records: enumerate collected artifacts,
/// resolve and parse each item in parallel, one patch per worker. No
/// deduplication happens here; that must run exactly once, over whatever
/// collection (single source or several merged) is being ingested.
///
/// Per-item failures never abort the run; they are logged and tallied.
pub fn expand_source(
    adapter: &dyn SourceAdapter,
    collected_dir: &Path,
    settings: &Settings,
) -> Result<(Vec<CanonicalRecord>, TransformMetrics)> {
    let items = adapter.enumerate(collected_dir)?;
    tracing::info!(source = adapter.name(), items = items.len(), "transforming");

    let outcomes: Vec<ItemOutcome> = items
        .par_iter()
        .map(|item| resolve_item(item, settings))
        .collect();

    let mut metrics = TransformMetrics {
        items: items.len(),
        ..Default::default()
    };
    let mut all_records = Vec::new();
    for outcome in outcomes {
        match outcome {
            ItemOutcome::Records(mut records) => all_records.append(&mut records),
            ItemOutcome::Empty => metrics.empty_patches += 1,
            ItemOutcome::SkippedDecode => metrics.skipped_decode += 1,
            ItemOutcome::SkippedTooLarge => metrics.skipped_too_large += 1,
            ItemOutcome::SkippedIo => metrics.skipped_io += 1,
        }
    }
    Ok((all_records, metrics))
}

/// Run one source end to end: expand, then deduplicate over the source's
/// full record collection.
pub fn transform_source(
    adapter: &dyn SourceAdapter,
    collected_dir: &Path,
    settings: &Settings,
) -> Result<(Dataset, TransformMetrics)> {
    let (records, mut metrics) = expand_source(adapter, collected_dir, settings)?;

    let (unique, dedup) = dedup_by_hunk(records);
    metrics.hunks = dedup.hunks;
    metrics.unique_hunks = dedup.unique_hunks;
    tracing::info!(hunks = metrics.hunks, unique = metrics.unique_hunks, "deduplicated");

    Ok((Dataset::new(unique), metrics))
}

fn resolve_item(item: &SourceItem, settings: &Settings) -> ItemOutcome {
    match patch_for_item(item, settings) {
        Ok(patch) => {
            let records = expand(&patch, &item.meta);
            if records.is_empty() {
                tracing::debug!(project = %item.meta.project, "item has no usable patch");
                ItemOutcome::Empty
            } else {
                ItemOutcome::Records(records)
            }
        }
        Err(PatchsetError::Decode { path }) => {
            tracing::warn!(%path, "skipping undecodable artifact");
            ItemOutcome::SkippedDecode
        }
        Err(PatchsetError::TooLarge { path }) => {
            tracing::warn!(%path, "skipping oversized artifact");
            ItemOutcome::SkippedTooLarge
        }
        Err(e) => {
            tracing::warn!(error = %e, "skipping item");
            ItemOutcome::SkippedIo
        }
    }
}

/// Resolve one item's input into a `Patch`.
///
/// Diff inputs go straight to the parser; file pairs are comment-stripped
/// (when enabled), split into lines, diffed with the configured context
/// width, and fed through the same parser.
pub fn patch_for_item(item: &SourceItem, settings: &Settings) -> Result<Patch> {
    match &item.input {
        PatchInput::DiffText(text) => Ok(parse(text, &item.identity)),
        PatchInput::DiffFile(path) => {
            let text = read_text(path, settings)?;
            Ok(parse(&text, &item.identity))
        }
        PatchInput::FilePair {
            vulnerable,
            patched,
        } => {
            // Variant markers leak into identifiers inside the files; drop
            // them so they do not show up as spurious edits.
            let vuln = read_text(vulnerable, settings)?.replace("VULN_", "");
            let fixed = read_text(patched, settings)?.replace("PATCHED_", "");

            let (vuln, fixed) = if settings.diff.strip_comments {
                let style = style_for(&item.identity.lang);
                (strip_comments(&vuln, style), strip_comments(&fixed, style))
            } else {
                (vuln, fixed)
            };

            let from = split_lines(&vuln);
            let to = split_lines(&fixed);
            let label = format!("{}{}", item.identity.name, item.identity.lang);
            let diff = unified_diff(&from, &to, &label, &label, settings.diff.context_lines);
            Ok(parse_lines(diff.iter().map(String::as_str), &item.identity))
        }
    }
}

fn read_text(path: &Path, settings: &Settings) -> Result<String> {
    let size = std::fs::metadata(path)?.len();
    if settings.is_file_too_large(size) {
        return Err(PatchsetError::TooLarge {
            path: path.display().to_string(),
        });
    }
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes).map_err(|_| PatchsetError::Decode {
        path: path.display().to_string(),
    })
}
