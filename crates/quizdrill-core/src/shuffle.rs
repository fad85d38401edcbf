//! Option display order.
//!
//! When shuffling is on, each question gets one `DisplayMapping` for the
//! whole session: the permuted option texts plus the correct answer's slot
//! in that permutation. Grading and review both run in display space.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{Question, OPTION_COUNT};

/// How one question's options are presented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayMapping {
    /// Option texts in display order.
    pub options: [String; OPTION_COUNT],
    /// Index of the correct option within `options`.
    pub correct_index: usize,
}

impl DisplayMapping {
    /// Identity mapping: bank order, bank correct index.
    pub fn unshuffled(question: &Question) -> Self {
        Self {
            options: question.options.clone(),
            correct_index: question.correct_index,
        }
    }

    /// Random permutation of the question's options.
    pub fn shuffled(question: &Question, rng: &mut impl Rng) -> Self {
        let mut order: [usize; OPTION_COUNT] = std::array::from_fn(|i| i);
        order.shuffle(rng);

        let options: [String; OPTION_COUNT] =
            std::array::from_fn(|slot| question.options[order[slot]].clone());
        // order is a permutation of 0..OPTION_COUNT, so the correct index is always found
        let correct_index = order
            .iter()
            .position(|&original| original == question.correct_index)
            .unwrap_or(question.correct_index);

        Self {
            options,
            correct_index,
        }
    }
}
