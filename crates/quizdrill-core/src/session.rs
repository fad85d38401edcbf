//! The quiz session state machine.
//!
//! A session owns its questions and walks them front to back. Each item is
//! either waiting for an answer or showing its review; the session as a
//! whole ends in `Finished`, the only state that can produce a score.
//!
//! All grading happens in display space: when options are shuffled, both
//! the submitted answer and the stored correct index refer to the slots the
//! player actually saw.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::SessionError;
use crate::model::{Question, OPTION_COUNT};
use crate::shuffle::DisplayMapping;
use crate::traits::SessionObserver;

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The current question is shown and has no (accepted) answer yet.
    AwaitingAnswer,
    /// The current question is graded and its review is shown.
    Reviewed,
    /// All questions are done (or the session was quit). Terminal.
    Finished,
}

/// One question plus its display order, decided lazily.
#[derive(Debug, Clone)]
struct SessionItem {
    question: Question,
    display: Option<DisplayMapping>,
}

impl SessionItem {
    fn options(&self) -> &[String; OPTION_COUNT] {
        match &self.display {
            Some(mapping) => &mapping.options,
            None => &self.question.options,
        }
    }

    fn correct_index(&self) -> usize {
        match &self.display {
            Some(mapping) => mapping.correct_index,
            None => self.question.correct_index,
        }
    }
}

/// Snapshot of a question as presented, pushed to observers.
#[derive(Debug, Clone)]
pub struct QuestionView {
    /// 0-based position within the session.
    pub index: usize,
    /// How many questions the session has.
    pub total: usize,
    /// The prompt text.
    pub prompt: String,
    /// Option texts in display order.
    pub options: [String; OPTION_COUNT],
}

/// Snapshot of a graded answer, pushed to observers.
#[derive(Debug, Clone)]
pub struct AnswerReview {
    /// 0-based position within the session.
    pub index: usize,
    /// How many questions the session has.
    pub total: usize,
    /// The submitted display-space index.
    pub chosen: usize,
    /// The correct display-space index.
    pub correct_index: usize,
    /// Whether the submission was right.
    pub is_correct: bool,
    /// The question's explanation (may be empty).
    pub explanation: String,
}

/// A question the session did not get right.
#[derive(Debug, Clone)]
pub struct WrongItem {
    /// Bank id of the question.
    pub id: String,
    /// The prompt text.
    pub prompt: String,
    /// Option texts in display order.
    pub options: [String; OPTION_COUNT],
    /// The submitted display-space index, or `None` if never answered.
    pub chosen: Option<usize>,
    /// The correct display-space index.
    pub correct_index: usize,
    /// The question's explanation (may be empty).
    pub explanation: String,
}

/// Final score of a finished session.
#[derive(Debug, Clone)]
pub struct ScoreSummary {
    /// How many questions the session had.
    pub total: usize,
    /// How many were answered correctly.
    pub correct: usize,
    /// The rest, in session order.
    pub wrong: Vec<WrongItem>,
}

/// What one session item ended up as, for retry selection.
#[derive(Debug, Clone)]
pub struct SessionEntry {
    /// The question as it came from the bank.
    pub question: Question,
    /// The final submitted display-space index, or `None` if unanswered.
    pub chosen: Option<usize>,
    /// The correct display-space index.
    pub correct_index: usize,
}

/// Everything a finished (or abandoned) session asked, for retry selection.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    /// One entry per session item, in session order.
    pub entries: Vec<SessionEntry>,
}

/// An owned, in-progress quiz run over a fixed list of questions.
pub struct QuizSession {
    items: Vec<SessionItem>,
    answers: Vec<Option<usize>>,
    current: usize,
    phase: Phase,
    shuffle: bool,
    rng: StdRng,
    observer: Box<dyn SessionObserver>,
}

impl QuizSession {
    /// Start a session with OS-seeded shuffling.
    pub fn start(
        questions: Vec<Question>,
        shuffle: bool,
        observer: Box<dyn SessionObserver>,
    ) -> Result<Self, SessionError> {
        Self::start_with_rng(questions, shuffle, StdRng::from_os_rng(), observer)
    }

    /// Start a session with a caller-supplied RNG, for reproducible runs.
    ///
    /// Fails with [`SessionError::Empty`] when `questions` is empty; a
    /// session must have at least one question to ask.
    pub fn start_with_rng(
        questions: Vec<Question>,
        shuffle: bool,
        rng: StdRng,
        observer: Box<dyn SessionObserver>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        let answers = vec![None; questions.len()];
        let items = questions
            .into_iter()
            .map(|question| SessionItem {
                question,
                display: None,
            })
            .collect();

        let mut session = Self {
            items,
            answers,
            current: 0,
            phase: Phase::AwaitingAnswer,
            shuffle,
            rng,
            observer,
        };
        session.ensure_display();
        let view = session.view();
        session.observer.on_question(&view);
        Ok(session)
    }

    /// Submit an answer for the current question.
    ///
    /// `chosen` is the display-space index of the picked option. Submitting
    /// again while the review is up overwrites the previous answer and
    /// re-grades; only the final submission counts.
    pub fn submit_answer(&mut self, chosen: usize) -> Result<(), SessionError> {
        if self.phase == Phase::Finished {
            return Err(SessionError::Finished);
        }
        if chosen >= OPTION_COUNT {
            return Err(SessionError::InvalidAnswerIndex {
                chosen,
                limit: OPTION_COUNT,
            });
        }

        self.answers[self.current] = Some(chosen);
        self.phase = Phase::Reviewed;
        let review = self.review(chosen);
        self.observer.on_answer(&review);
        Ok(())
    }

    /// Move past the current review to the next question, or finish.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        match self.phase {
            Phase::AwaitingAnswer => Err(SessionError::AnswerRequired),
            Phase::Finished => Err(SessionError::Finished),
            Phase::Reviewed => {
                if self.current + 1 == self.items.len() {
                    self.finish();
                } else {
                    self.current += 1;
                    self.phase = Phase::AwaitingAnswer;
                    self.ensure_display();
                    let view = self.view();
                    self.observer.on_question(&view);
                }
                Ok(())
            }
        }
    }

    /// End the session now, leaving the remaining questions unanswered.
    ///
    /// Unanswered questions count as wrong in the score and are offered
    /// again by retry selection. Quitting a finished session does nothing.
    pub fn quit(&mut self) {
        if self.phase != Phase::Finished {
            self.finish();
        }
    }

    /// The final score. Only available once the session is finished.
    pub fn score(&self) -> Result<ScoreSummary, SessionError> {
        if self.phase != Phase::Finished {
            return Err(SessionError::NotFinished);
        }
        Ok(self.summary())
    }

    /// What was asked and how it went, for retry selection.
    pub fn record(&self) -> SessionRecord {
        let entries = self
            .items
            .iter()
            .zip(&self.answers)
            .map(|(item, &chosen)| SessionEntry {
                question: item.question.clone(),
                chosen,
                correct_index: item.correct_index(),
            })
            .collect();
        SessionRecord { entries }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 0-based index of the current question.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Number of questions in the session.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the session has no questions. Never true after `start`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // Display order is decided the moment an item first becomes current and
    // reused for every later render of that item.
    fn ensure_display(&mut self) {
        if !self.shuffle || self.items[self.current].display.is_some() {
            return;
        }
        let mapping = DisplayMapping::shuffled(&self.items[self.current].question, &mut self.rng);
        self.items[self.current].display = Some(mapping);
    }

    fn view(&self) -> QuestionView {
        let item = &self.items[self.current];
        QuestionView {
            index: self.current,
            total: self.items.len(),
            prompt: item.question.prompt.clone(),
            options: item.options().clone(),
        }
    }

    fn review(&self, chosen: usize) -> AnswerReview {
        let item = &self.items[self.current];
        let correct_index = item.correct_index();
        AnswerReview {
            index: self.current,
            total: self.items.len(),
            chosen,
            correct_index,
            is_correct: chosen == correct_index,
            explanation: item.question.explanation.clone(),
        }
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        let summary = self.summary();
        self.observer.on_finished(&summary);
    }

    fn summary(&self) -> ScoreSummary {
        let mut correct = 0;
        let mut wrong = Vec::new();

        for (item, &chosen) in self.items.iter().zip(&self.answers) {
            if chosen == Some(item.correct_index()) {
                correct += 1;
            } else {
                wrong.push(WrongItem {
                    id: item.question.id.clone(),
                    prompt: item.question.prompt.clone(),
                    options: item.options().clone(),
                    chosen,
                    correct_index: item.correct_index(),
                    explanation: item.question.explanation.clone(),
                });
            }
        }

        ScoreSummary {
            total: self.items.len(),
            correct,
            wrong,
        }
    }
}
