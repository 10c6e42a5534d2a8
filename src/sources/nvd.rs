use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::diff::parser::FileIdentity;
use crate::error::Result;
use crate::models::record::RecordMeta;
use crate::sources::{PatchInput, SourceAdapter, SourceItem};

/// Variant marker embedded in NVD artifact names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Vulnerable,
    Patched,
}

/// One artifact parsed out of the NVD naming schema
/// `<project>_CVE-<year>-<number>_{VULN|PATCHED}_<name>.<ext>`.
#[derive(Debug, Clone)]
struct CveFile {
    path: PathBuf,
    project: String,
    year: String,
    number: String,
    variant: Variant,
    name: String,
    lang: String,
}

impl CveFile {
    fn parse(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;
        let (project_part, rest) = stem.split_once("CVE")?;
        let project = project_part.replace('_', "");

        let normalized = rest.replace('-', "_");
        let parts: Vec<&str> = normalized.split('_').collect();
        // parts[0] is the empty slot left of the first separator.
        if parts.len() < 5 {
            return None;
        }
        let year = parts[1].to_string();
        let number = parts[2].to_string();
        let variant = match parts[3] {
            "VULN" => Variant::Vulnerable,
            "PATCHED" => Variant::Patched,
            _ => return None,
        };
        let name = parts[4..].concat();
        let lang = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        Some(Self {
            path: path.to_path_buf(),
            project,
            year,
            number,
            variant,
            name,
            lang,
        })
    }

    /// Pairing key: everything but the variant and path.
    fn key(&self, folder: &Path) -> (PathBuf, String, String, String, String, String) {
        (
            folder.to_path_buf(),
            self.project.clone(),
            self.year.clone(),
            self.number.clone(),
            self.name.clone(),
            self.lang.clone(),
        )
    }
}

/// Adapter for the NVD-derived corpus of paired full files: each CVE folder
/// holds vulnerable and patched variants that must be diffed against each
/// other.
pub struct NvdAdapter;

impl SourceAdapter for NvdAdapter {
    fn name(&self) -> &'static str {
        "nvd"
    }

    fn enumerate(&self, collected_dir: &Path) -> Result<Vec<SourceItem>> {
        let mut paths: Vec<PathBuf> = WalkBuilder::new(collected_dir)
            .hidden(true)
            .follow_links(false)
            .build()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .map(ignore::DirEntry::into_path)
            .collect();
        paths.sort_unstable();

        type Key = (PathBuf, String, String, String, String, String);
        let mut pairs: HashMap<Key, (Option<CveFile>, Option<CveFile>)> = HashMap::new();
        let mut order: Vec<Key> = Vec::new();

        for path in paths {
            let Some(file) = CveFile::parse(&path) else {
                tracing::debug!(path = %path.display(), "skipping artifact outside naming schema");
                continue;
            };
            let folder = path.parent().unwrap_or(collected_dir);
            let key = file.key(folder);
            let slot = pairs.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                (None, None)
            });
            match file.variant {
                Variant::Vulnerable => slot.0 = Some(file),
                Variant::Patched => slot.1 = Some(file),
            }
        }

        let mut items = Vec::new();
        for key in order {
            let Some((vuln, patched)) = pairs
                .remove(&key)
                .and_then(|(v, p)| Some((v?, p?)))
            else {
                tracing::debug!(
                    project = %key.1,
                    year = %key.2,
                    number = %key.3,
                    "skipping unpaired variant"
                );
                continue;
            };
            items.push(SourceItem {
                input: PatchInput::FilePair {
                    vulnerable: vuln.path,
                    patched: patched.path,
                },
                meta: RecordMeta::new(&vuln.project, "", &vuln.year, &vuln.number),
                identity: FileIdentity::new(&vuln.name, &vuln.lang),
            });
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_artifact_name() {
        let f = CveFile::parse(Path::new("libpng_CVE-2014-9495_VULN_pngrutil.c")).unwrap();
        assert_eq!(f.project, "libpng");
        assert_eq!(f.year, "2014");
        assert_eq!(f.number, "9495");
        assert_eq!(f.variant, Variant::Vulnerable);
        assert_eq!(f.name, "pngrutil");
        assert_eq!(f.lang, ".c");
    }

    #[test]
    fn multi_part_names_are_joined() {
        let f = CveFile::parse(Path::new("linux_CVE-2016-0728_PATCHED_keyring_join.c")).unwrap();
        assert_eq!(f.variant, Variant::Patched);
        assert_eq!(f.name, "keyringjoin");
    }

    #[test]
    fn rejects_names_outside_schema() {
        assert!(CveFile::parse(Path::new("README.md")).is_none());
        assert!(CveFile::parse(Path::new("proj_CVE-2014-9495_OTHER_x.c")).is_none());
    }

    #[test]
    fn enumerates_matched_pairs_only() {
        let tmp = TempDir::new().unwrap();
        let folder = tmp.path().join("CVE-2014-9495");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("libpng_CVE-2014-9495_VULN_pngrutil.c"), "int a;\n").unwrap();
        fs::write(
            folder.join("libpng_CVE-2014-9495_PATCHED_pngrutil.c"),
            "int b;\n",
        )
        .unwrap();
        // Unpaired variant in a second folder.
        let lonely = tmp.path().join("CVE-2015-0001");
        fs::create_dir_all(&lonely).unwrap();
        fs::write(lonely.join("zlib_CVE-2015-0001_VULN_inflate.c"), "int c;\n").unwrap();

        let items = NvdAdapter.enumerate(tmp.path()).unwrap();
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.meta.project, "libpng");
        assert_eq!(item.meta.commit, "");
        assert_eq!(item.meta.cve_year, "2014");
        assert_eq!(item.meta.cve_number, "9495");
        assert_eq!(item.identity.name, "pngrutil");
        assert_eq!(item.identity.lang, ".c");
        assert!(matches!(item.input, PatchInput::FilePair { .. }));
    }
}
