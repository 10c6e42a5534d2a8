// Inherit lint configuration from lib.rs for consistency
#![allow(clippy::missing_errors_doc, clippy::too_many_lines)]

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use patchset::cli::commands::{Cli, Command};
use patchset::cli::output;
use patchset::config::Config;
use patchset::dataset::Dataset;
use patchset::diff::comments::{strip_comments, style_for, CommentStyle};
use patchset::diff::parser::{parse, FileIdentity};
use patchset::diff::{split_lines, unified_diff};
use patchset::error::PatchsetError;
use patchset::models::record::{expand, RecordMeta};
use patchset::pipeline::{dedup_by_hunk, expand_source, transform_source, FilterPipeline};
use patchset::sources::{cve_id, SourceRegistry};

fn main() {
    // Progress goes to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

type CmdResult = Result<(), Box<dyn std::fmt::Display>>;

fn map_err(e: impl std::fmt::Display + 'static) -> Box<dyn std::fmt::Display> {
    Box::new(e.to_string())
}

fn run(cli: Cli) -> CmdResult {
    match cli.command {
        Command::Transform { source, root } => cmd_transform(&source, &root),
        Command::Filter { source, root } => cmd_filter(&source, &root),
        Command::Merge {
            sources,
            name,
            root,
        } => cmd_merge(&sources, &name, &root),
        Command::Parse { file } => cmd_parse(&file),
        Command::Diff {
            vulnerable,
            patched,
            context,
            keep_comments,
        } => cmd_diff(&vulnerable, &patched, context, keep_comments),
        Command::Stats {
            source,
            root,
            filtered,
        } => cmd_stats(&source, &root, filtered),
        Command::Sources => cmd_sources(),
    }
}

fn cmd_transform(source: &str, root: &str) -> CmdResult {
    let config = Config::new(root);
    let registry = SourceRegistry::new();
    let adapter = registry.get(source).ok_or_else(|| {
        map_err(PatchsetError::UnknownSource {
            name: source.to_string(),
        })
    })?;

    config.ensure_dirs().map_err(map_err)?;
    let collected = config.collected_path(source);
    let (dataset, metrics) =
        transform_source(adapter, &collected, &config.settings).map_err(map_err)?;
    dataset
        .save(&config.transformed_path(source))
        .map_err(map_err)?;

    println!("{}", output::format_json(&metrics));
    Ok(())
}

fn cmd_filter(source: &str, root: &str) -> CmdResult {
    let config = Config::new(root);
    let dataset = Dataset::load(&config.transformed_path(source)).map_err(map_err)?;

    let pipeline = FilterPipeline::new(config.settings.filters.languages.clone());
    let records_in = dataset.len();
    let filtered = Dataset::new(pipeline.apply(dataset.into_records()));
    filtered
        .save(&config.filtered_path(source))
        .map_err(map_err)?;

    #[derive(serde::Serialize)]
    struct FilterOutput {
        records_in: usize,
        records_out: usize,
    }
    println!(
        "{}",
        output::format_json(&FilterOutput {
            records_in,
            records_out: filtered.len(),
        })
    );
    Ok(())
}

fn cmd_merge(sources: &[String], name: &str, root: &str) -> CmdResult {
    let config = Config::new(root);
    let registry = SourceRegistry::new();
    config.ensure_dirs().map_err(map_err)?;

    // Expand every source raw, then deduplicate exactly once over the
    // union: per-source dedup first would let a fix duplicated inside one
    // catalog but present once in another slip through.
    let mut records = Vec::new();
    for source in sources {
        let adapter = registry.get(source).ok_or_else(|| {
            map_err(PatchsetError::UnknownSource {
                name: source.to_string(),
            })
        })?;
        let (expanded, _) =
            expand_source(adapter, &config.collected_path(source), &config.settings)
                .map_err(map_err)?;
        records.extend(expanded);
    }

    let (unique, metrics) = dedup_by_hunk(records);
    Dataset::new(unique)
        .save(&config.transformed_path(name))
        .map_err(map_err)?;

    println!("{}", output::format_json(&metrics));
    Ok(())
}

fn cmd_parse(file: &str) -> CmdResult {
    let path = Path::new(file);
    let bytes = std::fs::read(path).map_err(map_err)?;
    let text = String::from_utf8(bytes).map_err(|_| {
        map_err(PatchsetError::Decode {
            path: file.to_string(),
        })
    })?;

    // A CVE id embedded in the file name is the only metadata available
    // for a bare diff; everything else stays empty.
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (cve_year, cve_number) = cve_id::parse_cve_id_or_empty(&stem);
    let meta = RecordMeta::new("", "", cve_year, cve_number);

    let patch = parse(&text, &FileIdentity::default());
    let records = expand(&patch, &meta);
    println!("{}", output::format_json(&records));
    Ok(())
}

fn cmd_diff(vulnerable: &str, patched: &str, context: usize, keep_comments: bool) -> CmdResult {
    let vuln = std::fs::read_to_string(vulnerable).map_err(map_err)?;
    let fixed = std::fs::read_to_string(patched).map_err(map_err)?;

    let lang = Path::new(patched)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let style = if keep_comments {
        CommentStyle::Plain
    } else {
        style_for(&lang)
    };
    let from = split_lines(&strip_comments(&vuln, style));
    let to = split_lines(&strip_comments(&fixed, style));

    let lines = unified_diff(&from, &to, vulnerable, patched, context);
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

fn cmd_stats(source: &str, root: &str, filtered: bool) -> CmdResult {
    let config = Config::new(root);
    let path = if filtered {
        config.filtered_path(source)
    } else {
        config.transformed_path(source)
    };
    let dataset = Dataset::load(&path).map_err(map_err)?;
    println!("{}", output::format_json(&dataset.summary()));
    Ok(())
}

fn cmd_sources() -> CmdResult {
    let registry = SourceRegistry::new();
    #[derive(serde::Serialize)]
    struct SourcesOutput<'a> {
        sources: Vec<&'a str>,
    }
    println!(
        "{}",
        output::format_json(&SourcesOutput {
            sources: registry.names(),
        })
    );
    Ok(())
}
