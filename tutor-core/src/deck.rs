use std::sync::Arc;

use language_utils::{Lesson, VocabItem};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::traversal::TraversalOrder;

/// Unscored browsing over a lesson, for flashcards and pronunciation practice.
///
/// Starts in lesson order. `next`/`prev` stop at the ends; only auto-play
/// wraps around, through [`PracticeDeck::advance_wrapping`].
#[derive(Debug)]
pub struct PracticeDeck {
    lesson: Arc<Lesson>,
    order: TraversalOrder,
    rng: ChaCha8Rng,
}

impl PracticeDeck {
    pub fn new(lesson: Arc<Lesson>) -> Self {
        Self::with_seed(lesson, rand::random())
    }

    /// Seeds the generator used by [`PracticeDeck::shuffle`].
    pub fn with_seed(lesson: Arc<Lesson>, seed: u64) -> Self {
        let order = TraversalOrder::identity(lesson.len());
        Self {
            lesson,
            order,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn lesson(&self) -> &Arc<Lesson> {
        &self.lesson
    }

    pub fn order(&self) -> &TraversalOrder {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// New random order, back to the first card.
    pub fn shuffle(&mut self) {
        self.order = TraversalOrder::shuffled(self.lesson.len(), &mut self.rng);
        log::debug!("Shuffled deck for lesson {}", self.lesson.id);
    }

    pub fn current(&self) -> Option<&VocabItem> {
        self.order.current().and_then(|index| self.lesson.get(index))
    }

    /// Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if self.order.cursor() + 1 >= self.order.len() {
            return false;
        }
        self.order.advance();
        true
    }

    /// Returns whether the cursor moved.
    pub fn prev(&mut self) -> bool {
        match self.order.cursor() {
            0 => false,
            cursor => {
                self.order.seek(cursor - 1);
                true
            }
        }
    }

    /// Like `next`, but goes back to the first card after the last.
    pub fn advance_wrapping(&mut self) {
        if !self.next() {
            self.order.seek(0);
        }
    }

    /// 1-based position of the current card, or 0 for an empty deck.
    pub fn position(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.order.cursor() + 1
        }
    }

    /// Fraction of the deck seen so far, for a progress bar.
    pub fn progress(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.position() as f32 / self.len() as f32
        }
    }
}
