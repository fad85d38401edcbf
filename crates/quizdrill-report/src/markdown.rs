//! Markdown review generator.
//!
//! Renders a finished session's report as a study sheet: one section per
//! missed question, with the options as displayed and the right answer
//! marked.

use std::path::Path;

use anyhow::{Context, Result};

use quizdrill_core::report::SessionReport;

fn option_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

/// Render a session report as markdown.
pub fn render_markdown(report: &SessionReport) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "# Quiz review: {}\n\n",
        report.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    md.push_str(&format!(
        "**Score:** {}/{} correct ({} source(s), bank of {})\n\n",
        report.correct,
        report.total,
        report.sources.len(),
        report.bank_size
    ));

    if report.wrong.is_empty() {
        md.push_str("Perfect round. Nothing to review.\n");
        return md;
    }

    for item in &report.wrong {
        md.push_str(&format!("## {} {}\n\n", item.question_id, item.prompt));

        for (index, option) in item.options.iter().enumerate() {
            let mut line = format!("- {}. {}", option_letter(index), option);
            if index == item.correct_index {
                line.push_str(" **(correct)**");
            }
            if item.chosen == Some(index) && index != item.correct_index {
                line.push_str(" (your answer)");
            }
            line.push('\n');
            md.push_str(&line);
        }
        md.push('\n');

        if item.chosen.is_none() {
            md.push_str("_Not answered._\n\n");
        }
        if !item.explanation.is_empty() {
            md.push_str(&format!("> {}\n\n", item.explanation));
        }
    }

    md
}

/// Write a markdown review to a file, creating parent directories.
pub fn write_markdown_review(report: &SessionReport, path: &Path) -> Result<()> {
    let md = render_markdown(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, md).with_context(|| format!("failed to write review to {}", path.display()))?;
    Ok(())
}
