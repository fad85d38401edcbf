//! The `quizdrill dedup` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizdrill_core::model::Bank;
use quizdrill_core::parser::{format_line, parse_source};

pub fn execute(files: Vec<PathBuf>, output: PathBuf) -> Result<()> {
    anyhow::ensure!(!files.is_empty(), "no bank files given");

    let mut header: Option<String> = None;
    let mut questions = Vec::new();
    let mut records_read = 0;
    let mut malformed = 0;

    for file in &files {
        let text = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;

        // The merged file reuses the first file's header row
        if header.is_none() {
            header = text.lines().next().map(str::to_string);
        }

        let (parsed, failures) = parse_source(&text, &file.display().to_string());
        for failure in &failures {
            eprintln!(
                "Warning: {}:{}: {}",
                failure.source_id, failure.line, failure.error
            );
        }
        records_read += parsed.len() + failures.len();
        malformed += failures.len();
        questions.extend(parsed);
    }

    let (bank, dropped) = Bank { questions }.dedup_by_id();

    let mut out = header.unwrap_or_else(|| {
        "id,prompt,option_a,option_b,option_c,option_d,answer,explanation".to_string()
    });
    out.push('\n');
    for question in &bank.questions {
        out.push_str(&format_line(question));
        out.push('\n');
    }
    std::fs::write(&output, out).with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "Merged {} file(s): {} record(s) read, {} kept, {} duplicate(s) dropped, {} malformed skipped.",
        files.len(),
        records_read,
        bank.len(),
        dropped,
        malformed
    );
    println!("Wrote {}", output.display());

    Ok(())
}
