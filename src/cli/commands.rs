use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "patchset",
    version,
    about = "Unified-diff normalization and filtering for vulnerability patch datasets",
    after_help = "Data layout: collected artifacts live under <ROOT>/collected/<SOURCE>/, \
                  transformed datasets under <ROOT>/transformed/<SOURCE>.jsonl. Settings \
                  (language allow-list, diff context, comment stripping) are read from \
                  <ROOT>/patchset.toml when present."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse one source's collected artifacts into a canonical dataset.
    ///
    /// Expands every patch into one record per hunk and deduplicates by
    /// hunk content across the whole source (all occurrences of duplicated
    /// content are dropped). Writes transformed/<SOURCE>.jsonl and prints
    /// run metrics.
    Transform {
        /// Source name (see `patchset sources`)
        source: String,
        /// Data root directory (default: current directory)
        #[arg(long, default_value = ".")]
        root: String,
    },

    /// Apply the structural filter chain to a transformed dataset.
    ///
    /// Keeps records in the configured languages with balanced, single-line
    /// edits. Writes transformed/<SOURCE>.filtered.jsonl.
    Filter {
        /// Source name
        source: String,
        /// Data root directory
        #[arg(long, default_value = ".")]
        root: String,
    },

    /// Transform several sources into one merged dataset.
    ///
    /// Expands every source's collected artifacts and deduplicates by hunk
    /// content once over the union, so fixes seen via multiple catalogs
    /// vanish entirely. Writes transformed/<NAME>.jsonl and prints the row
    /// counts before and after deduplication.
    Merge {
        /// Source names to expand and merge
        #[arg(required = true, num_args = 1..)]
        sources: Vec<String>,
        /// Name of the merged dataset
        #[arg(long, default_value = "merged")]
        name: String,
        /// Data root directory
        #[arg(long, default_value = ".")]
        root: String,
    },

    /// Parse a unified-diff file and print its canonical records.
    Parse {
        /// Path to a diff file
        file: String,
    },

    /// Compute a unified diff between two file variants.
    Diff {
        /// Vulnerable (before) file
        vulnerable: String,
        /// Patched (after) file
        patched: String,
        /// Context lines around each change
        #[arg(short, long, default_value = "10")]
        context: usize,
        /// Keep comments instead of stripping them before diffing
        #[arg(long)]
        keep_comments: bool,
    },

    /// Show shape statistics for a transformed dataset.
    Stats {
        /// Source name
        source: String,
        /// Data root directory
        #[arg(long, default_value = ".")]
        root: String,
        /// Inspect the filtered dataset instead of the transformed one
        #[arg(long)]
        filtered: bool,
    },

    /// List registered source adapters.
    Sources,
}
