pub mod cve_id;
pub mod nvd;
pub mod secretpatch;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::diff::parser::FileIdentity;
use crate::error::Result;
use crate::models::record::RecordMeta;
use crate::sources::nvd::NvdAdapter;
use crate::sources::secretpatch::SecretPatchAdapter;

/// How one catalog item's patch is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchInput {
    /// A file on disk containing unified-diff text.
    DiffFile(PathBuf),
    /// Unified-diff text held directly.
    DiffText(String),
    /// Vulnerable and patched full-file variants to be diffed.
    FilePair {
        vulnerable: PathBuf,
        patched: PathBuf,
    },
}

/// One catalog item: a patch input plus the canonical metadata the adapter
/// could recover for it, and a fallback file identity for diff fragments
/// that carry no file headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceItem {
    pub input: PatchInput,
    pub meta: RecordMeta,
    pub identity: FileIdentity,
}

/// Capability interface for one external catalog.
///
/// Adapters only map locally collected artifacts to patch inputs and
/// metadata; retrieval of those artifacts is the caller's concern. The
/// core never depends on which adapter produced an item.
pub trait SourceAdapter: Send + Sync {
    /// Catalog name, also the collected/transformed directory name.
    fn name(&self) -> &'static str;

    /// Enumerate the catalog's collected artifacts under `collected_dir`.
    ///
    /// Artifacts that do not match the catalog's naming schema are skipped
    /// with a log line, never an error.
    fn enumerate(&self, collected_dir: &Path) -> Result<Vec<SourceItem>>;
}

/// Routes source names to their adapters.
pub struct SourceRegistry {
    adapters: HashMap<String, Box<dyn SourceAdapter>>,
}

impl SourceRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut adapters: HashMap<String, Box<dyn SourceAdapter>> = HashMap::new();
        adapters.insert("nvd".into(), Box::new(NvdAdapter));
        adapters.insert("secretpatch".into(), Box::new(SecretPatchAdapter));
        Self { adapters }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn SourceAdapter> {
        self.adapters.get(name).map(|adapter| &**adapter)
    }

    #[must_use]
    pub fn supports(&self, name: &str) -> bool {
        self.adapters.contains_key(name)
    }

    /// Registered source names, sorted for stable output.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.adapters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
