//! Library-level flows: parse → expand → filter, end to end on in-memory
//! diffs, covering the dataset shapes the CLI is built around.

use patchset::diff::parser::{parse, FileIdentity};
use patchset::models::record::{expand, RecordMeta};
use patchset::pipeline::filters::{balanced_edits, dedup_by_hunk, language, FilterPipeline};

fn c_langs() -> Vec<String> {
    vec![".c".into(), ".h".into()]
}

#[test]
fn single_line_substitution_survives_all_filters() {
    let text = "\
--- a/src/check.c
+++ b/src/check.c
@@ -10,7 +10,7 @@ int check_bounds(int x)
 {
 	int limit = MAX;
-	int x = 1;
+	int x = 2;
 	if (x > limit)
 		return -1;
 	return x;
";
    let patch = parse(text, &FileIdentity::default());
    let records = expand(&patch, &RecordMeta::new("proj", "abc", "2015", "1234"));

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].additions, 1);
    assert_eq!(records[0].deletions, 1);
    assert_eq!(records[0].lang, ".c");

    let kept = FilterPipeline::new(c_langs()).apply(records);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].name, "check");
}

#[test]
fn balanced_filter_splits_mixed_hunks() {
    let text = "\
--- a/src/parse.c
+++ b/src/parse.c
@@ -5,3 +5,3 @@
 	len = n;
-	if (len > max)
+	if (len >= max)
@@ -20,3 +20,5 @@
-	free(p);
+	if (p) {
+		free(p);
+	}
 	return;
";
    let patch = parse(text, &FileIdentity::default());
    let records = expand(&patch, &RecordMeta::default());
    assert_eq!(records.len(), 2);

    let kept = balanced_edits(records);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].additions, 1);
    assert_eq!(kept[0].deletions, 1);
}

#[test]
fn identical_hunks_from_different_sources_both_vanish() {
    let text = "\
--- a/lib/util.c
+++ b/lib/util.c
@@ -1,3 +1,3 @@
 int f() {
-return 0;
+return 1;
 }
";
    let patch = parse(text, &FileIdentity::default());

    // The same fix seen via two catalogs, under different metadata.
    let mut records = expand(&patch, &RecordMeta::new("proj-a", "", "2016", "0001"));
    records.extend(expand(&patch, &RecordMeta::new("proj-b", "sha", "2016", "0001")));
    assert_eq!(records.len(), 2);

    let (kept, metrics) = dedup_by_hunk(records);
    assert!(kept.is_empty());
    assert_eq!(metrics.hunks, 2);
    assert_eq!(metrics.unique_hunks, 0);
}

#[test]
fn empty_patch_expands_to_nothing() {
    let patch = parse("nothing that looks like a diff\n", &FileIdentity::default());
    assert!(patch.is_empty());

    let records = expand(&patch, &RecordMeta::new("proj", "", "", ""));
    assert!(records.is_empty());
}

#[test]
fn dedup_runs_before_structural_filters() {
    // The duplicated hunk is .py, the unique one .c. Dedup first must drop
    // both .py copies even though the language filter would have dropped
    // them anyway; the .c record is unaffected.
    let c_text = "\
--- a/a.c
+++ b/a.c
@@ -1 +1 @@
-x
+y
";
    let py_text = "\
--- a/b.py
+++ b/b.py
@@ -1 +1 @@
-u
+v
";
    let c_patch = parse(c_text, &FileIdentity::default());
    let py_patch = parse(py_text, &FileIdentity::default());

    let mut records = expand(&c_patch, &RecordMeta::default());
    records.extend(expand(&py_patch, &RecordMeta::default()));
    records.extend(expand(&py_patch, &RecordMeta::default()));

    let (unique, metrics) = dedup_by_hunk(records);
    assert_eq!(metrics.hunks, 3);
    assert_eq!(metrics.unique_hunks, 1);

    let kept = language(unique, &c_langs());
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].lang, ".c");
}

#[test]
fn filtering_twice_changes_nothing() {
    let text = "\
--- a/m.c
+++ b/m.c
@@ -1,4 +1,4 @@
 a
-b
+c
 d
@@ -9,4 +9,5 @@
-e
+f
+g
 h
";
    let patch = parse(text, &FileIdentity::default());
    let records = expand(&patch, &RecordMeta::default());

    let pipeline = FilterPipeline::new(c_langs());
    let once = pipeline.apply(records);
    let twice = pipeline.apply(once.clone());
    assert_eq!(once, twice);
}
