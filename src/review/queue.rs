use log::debug;

use crate::models::Card;

/// Outcome of advancing past the current card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Another card is ready to present
    Next,
    /// The queue is complete; the caller decides whether to reload
    Exhausted,
}

/// Ordered set of due cards for one session, with the position of the
/// card being presented. Holds no network state and performs no I/O.
#[derive(Debug, Default)]
pub struct ReviewQueue {
    cards: Vec<Card>,
    cursor: usize,
}

impl ReviewQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue contents and rewind to the first card.
    /// An empty input is allowed and leaves `current()` with nothing.
    pub fn load(&mut self, cards: Vec<Card>) {
        debug!("queue loaded with {} card(s)", cards.len());
        self.cards = cards;
        self.cursor = 0;
    }

    /// The card at the cursor, or `None` if the queue is empty
    pub fn current(&self) -> Option<&Card> {
        self.cards.get(self.cursor)
    }

    /// Step to the next card. At the last card the cursor stays put and
    /// every further call keeps reporting `Exhausted`.
    pub fn advance(&mut self) -> Advance {
        if self.cursor + 1 < self.cards.len() {
            self.cursor += 1;
            Advance::Next
        } else {
            Advance::Exhausted
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// 1-based position of the current card, for progress display
    pub fn position(&self) -> usize {
        if self.cards.is_empty() {
            0
        } else {
            self.cursor + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::{CardType, TagSet};

    fn card(id: i64) -> Card {
        Card {
            id,
            card_type: CardType::Basic,
            front: format!("front {}", id),
            back: Some(format!("back {}", id)),
            entry_id: None,
            tags: TagSet::new(),
            ease_factor: 2.5,
            interval_days: 0,
            due_at: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_load_rewinds_cursor() {
        let mut queue = ReviewQueue::new();
        queue.load(vec![card(1), card(2)]);
        assert_eq!(queue.advance(), Advance::Next);
        assert_eq!(queue.current().unwrap().id, 2);

        queue.load(vec![card(3)]);
        assert_eq!(queue.current().unwrap().id, 3);
        assert_eq!(queue.position(), 1);
    }

    #[test]
    fn test_advance_walks_in_order() {
        let mut queue = ReviewQueue::new();
        queue.load(vec![card(1), card(2), card(3)]);

        assert_eq!(queue.current().unwrap().id, 1);
        assert_eq!(queue.advance(), Advance::Next);
        assert_eq!(queue.current().unwrap().id, 2);
        assert_eq!(queue.advance(), Advance::Next);
        assert_eq!(queue.current().unwrap().id, 3);
        assert_eq!(queue.advance(), Advance::Exhausted);
    }

    #[test]
    fn test_exhaustion_is_idempotent() {
        let mut queue = ReviewQueue::new();
        queue.load(vec![card(1)]);

        for _ in 0..3 {
            assert_eq!(queue.advance(), Advance::Exhausted);
            assert_eq!(queue.current().unwrap().id, 1);
            assert_eq!(queue.position(), 1);
        }
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = ReviewQueue::new();
        assert!(queue.current().is_none());
        assert_eq!(queue.advance(), Advance::Exhausted);
        assert_eq!(queue.position(), 0);

        queue.load(Vec::new());
        assert!(queue.is_empty());
        assert!(queue.current().is_none());
    }
}
