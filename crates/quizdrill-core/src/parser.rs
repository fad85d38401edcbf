//! Bank record parser.
//!
//! Parses the comma-delimited question format: eight cells per record, with
//! double quotes making embedded commas inert. The grammar is deliberately
//! small because bank files are written by hand; there is no escape sequence
//! for a literal quote inside a quoted cell.

use std::collections::HashSet;

use crate::error::ParseError;
use crate::model::{Bank, Question, OPTION_COUNT};

/// Cells per record: id, prompt, four options, answer number, explanation.
pub const CELLS_PER_RECORD: usize = 8;

/// Split one record line into cells.
///
/// Cells are comma-separated; a comma inside a double-quoted stretch does
/// not split. Each cell is trimmed, and wrapping quotes are stripped when a
/// cell both starts and ends with one.
pub fn split_cells(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => {
                cells.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    cells.push(current);

    cells
        .iter()
        .map(|cell| strip_wrapping_quotes(cell.trim()).to_string())
        .collect()
}

fn strip_wrapping_quotes(cell: &str) -> &str {
    if cell.len() >= 2 && cell.starts_with('"') && cell.ends_with('"') {
        &cell[1..cell.len() - 1]
    } else {
        cell
    }
}

/// Parse one record line into a `Question`.
///
/// Cell layout: 0 = id, 1 = prompt, 2..=5 = the four options, 6 = 1-based
/// number of the correct option, 7 = explanation. Extra cells are ignored.
pub fn parse_line(line: &str) -> Result<Question, ParseError> {
    let cells = split_cells(line);
    if cells.len() < CELLS_PER_RECORD {
        return Err(ParseError::TooFewFields {
            found: cells.len(),
        });
    }

    let number: i64 = cells[6].parse().map_err(|_| ParseError::InvalidAnswerNumber {
        cell: cells[6].clone(),
    })?;
    if !(1..=OPTION_COUNT as i64).contains(&number) {
        return Err(ParseError::AnswerOutOfRange { number });
    }

    Ok(Question {
        id: cells[0].clone(),
        prompt: cells[1].clone(),
        options: [
            cells[2].clone(),
            cells[3].clone(),
            cells[4].clone(),
            cells[5].clone(),
        ],
        correct_index: (number - 1) as usize,
        explanation: cells[7].clone(),
    })
}

/// Render a question back into one record line.
///
/// Cells containing a comma are quote-wrapped so the line survives
/// `parse_line`. A cell containing a double quote is not representable in
/// this grammar and will not round-trip.
pub fn format_line(question: &Question) -> String {
    let mut cells: Vec<String> = Vec::with_capacity(CELLS_PER_RECORD);
    cells.push(quote_cell(&question.id));
    cells.push(quote_cell(&question.prompt));
    for option in &question.options {
        cells.push(quote_cell(option));
    }
    cells.push((question.correct_index + 1).to_string());
    cells.push(quote_cell(&question.explanation));
    cells.join(",")
}

fn quote_cell(text: &str) -> String {
    if text.contains(',') {
        format!("\"{text}\"")
    } else {
        text.to_string()
    }
}

/// A record that failed to parse, with enough context to point at the line.
#[derive(Debug, Clone)]
pub struct ParseFailure {
    /// The source the record came from.
    pub source_id: String,
    /// 1-based line number within the source.
    pub line: usize,
    /// What was wrong with it.
    pub error: ParseError,
}

/// Parse a whole bank source.
///
/// The first line of every source is a column-header row and is skipped, as
/// are blank lines. Malformed records are skipped and collected so callers
/// can surface them; one bad line never takes down the rest of the bank.
pub fn parse_source(text: &str, source_id: &str) -> (Vec<Question>, Vec<ParseFailure>) {
    let mut questions = Vec::new();
    let mut failures = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if index == 0 {
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(question) => questions.push(question),
            Err(error) => {
                tracing::warn!("skipping {}:{}: {}", source_id, index + 1, error);
                failures.push(ParseFailure {
                    source_id: source_id.to_string(),
                    line: index + 1,
                    error,
                });
            }
        }
    }

    (questions, failures)
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a bank for issues that do not stop a quiz but degrade it.
pub fn validate_bank(bank: &Bank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Retry rounds correlate questions by id; duplicates make that ambiguous
    let mut seen_ids = HashSet::new();
    for question in &bank.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("duplicate question id: {}", question.id),
            });
        }
    }

    // Check for empty prompts
    for question in &bank.questions {
        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "prompt is empty".into(),
            });
        }
    }

    // Check for empty option texts
    for question in &bank.questions {
        if question.options.iter().any(|option| option.trim().is_empty()) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "one or more options are empty".into(),
            });
        }
    }

    warnings
}
