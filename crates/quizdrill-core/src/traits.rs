//! Seam traits.
//!
//! `TextSource` abstracts where bank text comes from so the loader never
//! cares about filesystems or HTTP. `SessionObserver` decouples session
//! progress from whatever front end is rendering it.

use async_trait::async_trait;

use crate::error::SourceError;
use crate::session::{AnswerReview, QuestionView, ScoreSummary};

/// Fetches raw bank text by source id.
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Short transport name for logs and status output ("fs", "http", ...).
    fn name(&self) -> &str;

    /// Fetch the full text of one source.
    async fn fetch_text(&self, source_id: &str) -> Result<String, SourceError>;
}

/// Receives session progress events.
///
/// The session pushes owned snapshots, so an observer never borrows session
/// internals and can hold on to what it receives.
pub trait SessionObserver: Send + Sync {
    /// A question has become current and should be shown.
    fn on_question(&self, view: &QuestionView);

    /// An answer was submitted and graded.
    fn on_answer(&self, review: &AnswerReview);

    /// The session ended.
    fn on_finished(&self, summary: &ScoreSummary);
}

/// Observer that ignores every event. Useful headless and in tests.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_question(&self, _view: &QuestionView) {}
    fn on_answer(&self, _review: &AnswerReview) {}
    fn on_finished(&self, _summary: &ScoreSummary) {}
}
