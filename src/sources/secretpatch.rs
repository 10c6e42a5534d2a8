use std::path::Path;

use ignore::WalkBuilder;
use regex::Regex;

use crate::diff::parser::FileIdentity;
use crate::error::Result;
use crate::models::record::RecordMeta;
use crate::sources::{PatchInput, SourceAdapter, SourceItem};

/// File-name schema of the SecretPatch corpus: the CVE id, CWE class,
/// project, and fixing commit are all encoded in the artifact name.
const NAME_PATTERN: &str = r"CVE-(\d{4})-(\d{4,7})\.([\w\-]+)\.([\w\-]+)\.([0-9a-f]{5,40})";

/// Adapter for a directory of raw diff files with metadata-bearing names.
pub struct SecretPatchAdapter;

impl SourceAdapter for SecretPatchAdapter {
    fn name(&self) -> &'static str {
        "secretpatch"
    }

    fn enumerate(&self, collected_dir: &Path) -> Result<Vec<SourceItem>> {
        let re = Regex::new(NAME_PATTERN)
            .map_err(|e| crate::error::PatchsetError::Other(format!("invalid pattern: {e}")))?;

        let mut paths: Vec<_> = WalkBuilder::new(collected_dir)
            .hidden(true)
            .follow_links(false)
            .build()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .map(ignore::DirEntry::into_path)
            .collect();
        paths.sort_unstable();

        let mut items = Vec::new();
        for path in paths {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let Some(caps) = re.captures(&stem) else {
                tracing::debug!(path = %path.display(), "skipping artifact outside naming schema");
                continue;
            };
            items.push(SourceItem {
                meta: RecordMeta::new(&caps[4], &caps[5], &caps[1], &caps[2]),
                input: PatchInput::DiffFile(path),
                // The diff files carry their own ---/+++ headers.
                identity: FileIdentity::default(),
            });
        }
        Ok(items)
    }
}
