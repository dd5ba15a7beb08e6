//! `doc-merge` — merge the top-level fields of one JSON document into another.
//!
//! Usage:
//!   doc-merge <target.json> <source.json> [--replace]
//!
//! Without `--replace`, fields already in the target are kept. The merged
//! document is written to stdout.

use arango_document::cli::{init_tracing, merge_documents, CliError};
use arango_document::MergePolicy;
use std::io::{self, Write};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut policy = MergePolicy::MergeFields;
    let mut files = Vec::new();
    for arg in &args {
        match arg.as_str() {
            "--replace" => policy = MergePolicy::ReplaceFields,
            _ => files.push(arg.as_str()),
        }
    }
    let [target_path, source_path] = files[..] else {
        eprintln!("Usage: doc-merge <target.json> <source.json> [--replace]");
        std::process::exit(1);
    };

    match run(target_path, source_path, policy) {
        Ok(merged) => {
            let mut out = io::stdout().lock();
            if let Err(e) = writeln!(out, "{merged}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn run(target_path: &str, source_path: &str, policy: MergePolicy) -> Result<String, CliError> {
    let target = std::fs::read_to_string(target_path)?;
    let source = std::fs::read_to_string(source_path)?;
    merge_documents(&target, &source, policy)
}
