//! Session reports.
//!
//! A `SessionReport` is the persistent record of one finished session:
//! score, the questions that went wrong, and enough metadata to replay the
//! run. Reports serialize to JSON on disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::OPTION_COUNT;
use crate::session::ScoreSummary;

/// One missed question as stored in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportItem {
    /// Bank id of the question.
    pub question_id: String,
    /// The prompt text.
    pub prompt: String,
    /// Option texts in the order they were displayed.
    pub options: [String; OPTION_COUNT],
    /// The submitted display-space index, or `None` if never answered.
    pub chosen: Option<usize>,
    /// The correct display-space index.
    pub correct_index: usize,
    /// The question's explanation (may be empty).
    pub explanation: String,
}

/// The persistent record of one finished session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique id of this report.
    pub id: Uuid,
    /// When the session finished.
    pub created_at: DateTime<Utc>,
    /// The source ids the bank was assembled from.
    pub sources: Vec<String>,
    /// How many questions the assembled bank held.
    pub bank_size: usize,
    /// How many questions the session asked for.
    pub requested: usize,
    /// How many questions the session actually had.
    pub total: usize,
    /// How many were answered correctly.
    pub correct: usize,
    /// The missed questions, in session order.
    pub wrong: Vec<ReportItem>,
    /// Whether option order was shuffled.
    pub shuffled: bool,
    /// The master seed of the run, when one was given.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SessionReport {
    /// Build a report from a finished session's score.
    pub fn from_summary(
        summary: &ScoreSummary,
        sources: &[String],
        bank_size: usize,
        requested: usize,
        shuffled: bool,
        seed: Option<u64>,
    ) -> Self {
        let wrong = summary
            .wrong
            .iter()
            .map(|item| ReportItem {
                question_id: item.id.clone(),
                prompt: item.prompt.clone(),
                options: item.options.clone(),
                chosen: item.chosen,
                correct_index: item.correct_index,
                explanation: item.explanation.clone(),
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            sources: sources.to_vec(),
            bank_size,
            requested,
            total: summary.total,
            correct: summary.correct,
            wrong,
            shuffled,
            seed,
        }
    }
}

/// Save a report as pretty-printed JSON, creating parent directories.
pub fn save_json(report: &SessionReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, json).with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

/// Load a report from a JSON file.
pub fn load_json(path: &Path) -> Result<SessionReport> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read report from {}", path.display()))?;
    serde_json::from_str(&contents).context("failed to parse report JSON")
}
