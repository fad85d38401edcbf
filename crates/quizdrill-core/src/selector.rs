//! Session question selection.
//!
//! `pick_random` seeds a fresh round from the bank; `pick_retry` builds a
//! follow-up round from what the previous session got wrong plus what it
//! never saw.

use std::collections::HashSet;

use rand::Rng;

use crate::model::{Bank, Question};
use crate::session::SessionRecord;

/// Outcome of asking for a retry round.
#[derive(Debug, Clone)]
pub enum RetrySelection {
    /// Questions for the next round, in retry order.
    Next(Vec<Question>),
    /// Everything was answered correctly and the whole bank has been seen.
    NothingToRetry,
}

/// Pick up to `count` distinct questions from the bank, uniformly at random.
///
/// Asking for more questions than the bank holds is not an error; the count
/// is clamped to the bank size. Questions keep the order they were drawn in.
pub fn pick_random(bank: &Bank, count: usize, rng: &mut impl Rng) -> Vec<Question> {
    let amount = count.min(bank.len());
    rand::seq::index::sample(rng, bank.len(), amount)
        .iter()
        .map(|index| bank.questions[index].clone())
        .collect()
}

/// Pick the questions worth a second pass after a finished session.
///
/// Wrong and unanswered questions come first, in the order the session asked
/// them, followed by bank questions the session never showed, in bank order.
/// Returns [`RetrySelection::NothingToRetry`] when both groups are empty.
pub fn pick_retry(bank: &Bank, record: &SessionRecord) -> RetrySelection {
    let mut next: Vec<Question> = record
        .entries
        .iter()
        .filter(|entry| entry.chosen != Some(entry.correct_index))
        .map(|entry| entry.question.clone())
        .collect();

    let seen: HashSet<&str> = record
        .entries
        .iter()
        .map(|entry| entry.question.id.as_str())
        .collect();
    next.extend(
        bank.questions
            .iter()
            .filter(|question| !seen.contains(question.id.as_str()))
            .cloned(),
    );

    if next.is_empty() {
        RetrySelection::NothingToRetry
    } else {
        RetrySelection::Next(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionEntry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bank_of(count: usize) -> Bank {
        let questions = (1..=count)
            .map(|n| Question {
                id: format!("Q{n}"),
                prompt: format!("Prompt {n}"),
                options: ["a".into(), "b".into(), "c".into(), "d".into()],
                correct_index: 0,
                explanation: String::new(),
            })
            .collect();
        Bank { questions }
    }

    fn entry(question: Question, chosen: Option<usize>, correct_index: usize) -> SessionEntry {
        SessionEntry {
            question,
            chosen,
            correct_index,
        }
    }

    #[test]
    fn pick_random_clamps_to_bank_size() {
        let bank = bank_of(4);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_random(&bank, 10, &mut rng).len(), 4);
    }

    #[test]
    fn pick_random_returns_distinct_bank_questions() {
        let bank = bank_of(20);
        let mut rng = StdRng::seed_from_u64(2);
        let picked = pick_random(&bank, 8, &mut rng);
        assert_eq!(picked.len(), 8);

        let mut ids: Vec<&str> = picked.iter().map(|q| q.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8, "picked questions must be distinct");
        for question in &picked {
            assert!(bank.questions.iter().any(|q| q.id == question.id));
        }
    }

    #[test]
    fn pick_random_zero_is_empty() {
        let bank = bank_of(5);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(pick_random(&bank, 0, &mut rng).is_empty());
    }

    #[test]
    fn retry_orders_wrong_before_unseen() {
        let bank = bank_of(5);
        // Session saw Q1..Q3; only Q2 was wrong. Q4, Q5 were never shown.
        let record = SessionRecord {
            entries: vec![
                entry(bank.questions[0].clone(), Some(0), 0),
                entry(bank.questions[1].clone(), Some(2), 0),
                entry(bank.questions[2].clone(), Some(0), 0),
            ],
        };

        let RetrySelection::Next(next) = pick_retry(&bank, &record) else {
            panic!("expected a retry round");
        };
        let ids: Vec<&str> = next.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["Q2", "Q4", "Q5"]);
    }

    #[test]
    fn retry_treats_unanswered_as_wrong() {
        let bank = bank_of(2);
        let record = SessionRecord {
            entries: vec![
                entry(bank.questions[0].clone(), None, 0),
                entry(bank.questions[1].clone(), Some(0), 0),
            ],
        };

        let RetrySelection::Next(next) = pick_retry(&bank, &record) else {
            panic!("expected a retry round");
        };
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, "Q1");
    }

    #[test]
    fn retry_exhausted_when_all_correct_and_seen() {
        let bank = bank_of(2);
        let record = SessionRecord {
            entries: vec![
                entry(bank.questions[0].clone(), Some(0), 0),
                entry(bank.questions[1].clone(), Some(0), 0),
            ],
        };
        assert!(matches!(
            pick_retry(&bank, &record),
            RetrySelection::NothingToRetry
        ));
    }

    #[test]
    fn retry_with_empty_record_is_the_whole_bank() {
        let bank = bank_of(3);
        let record = SessionRecord { entries: vec![] };
        let RetrySelection::Next(next) = pick_retry(&bank, &record) else {
            panic!("expected a retry round");
        };
        let ids: Vec<&str> = next.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["Q1", "Q2", "Q3"]);
    }

    #[test]
    fn retry_grades_in_display_space() {
        // The shuffled correct index differs from the bank one; the entry
        // stores the display-space index, and grading must use that.
        let bank = bank_of(1);
        let record = SessionRecord {
            entries: vec![entry(bank.questions[0].clone(), Some(3), 3)],
        };
        assert!(matches!(
            pick_retry(&bank, &record),
            RetrySelection::NothingToRetry
        ));
    }
}
