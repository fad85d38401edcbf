//! The `quizdrill validate` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quizdrill_core::model::Bank;
use quizdrill_core::parser::{parse_source, validate_bank};

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let files = collect_bank_files(&bank_path)?;
    anyhow::ensure!(
        !files.is_empty(),
        "no bank files found under {}",
        bank_path.display()
    );

    let mut all_questions = Vec::new();
    let mut total_failures = 0;
    let mut total_warnings = 0;

    for file in &files {
        let text = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let (questions, failures) = parse_source(&text, &file.display().to_string());

        println!("{}: {} question(s)", file.display(), questions.len());
        for failure in &failures {
            println!("  line {}: {}", failure.line, failure.error);
        }
        total_failures += failures.len();

        let bank = Bank { questions };
        let warnings = validate_bank(&bank);
        for warning in &warnings {
            let prefix = warning
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", warning.message);
        }
        total_warnings += warnings.len();

        all_questions.extend(bank.questions);
    }

    let total = all_questions.len();
    if files.len() > 1 {
        let (_, dropped) = Bank {
            questions: all_questions,
        }
        .dedup_by_id();
        if dropped > 0 {
            println!(
                "\n{dropped} duplicate id(s) across the combined files; `quizdrill dedup` can merge them."
            );
        }
    }

    if total_failures == 0 && total_warnings == 0 {
        println!("All bank files valid ({total} question(s)).");
    } else {
        println!("\n{total_failures} malformed record(s), {total_warnings} warning(s).");
    }

    Ok(())
}

fn collect_bank_files(path: &Path) -> Result<Vec<PathBuf>> {
    anyhow::ensure!(path.exists(), "bank path not found: {}", path.display());
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    collect_csv_recursive(path, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_csv_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_csv_recursive(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "csv") {
            files.push(path);
        }
    }
    Ok(())
}
