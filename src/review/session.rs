//! Review session state machine
//!
//! Drives one card at a time through reveal, rate, submit, advance. The
//! scheduler behind [`StudyService`] is the only authority on scheduling
//! state; this controller records its responses and keeps per-session
//! tallies. Exactly one network call is ever outstanding: `Loading` and
//! `Submitting` each suspend on a single request, and ratings arriving
//! while a submission is in flight are dropped rather than queued.

use log::{debug, warn};

use crate::api::{ApiError, StudyService};
use crate::models::{Card, Rating, ReviewOutcome};

use super::queue::{Advance, ReviewQueue};

/// Which operation a retry from the failed state repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPoint {
    /// Re-issue the due-card query
    Load,
    /// Re-submit the same rating for the same card
    Submit(Rating),
}

/// Session state. The variants make illegal combinations (submitting
/// while not revealed, presenting an empty queue) unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Fetching the due-card set
    Loading,
    /// Showing the front of the current card
    Presenting,
    /// Showing the answer; waiting for a rating
    Revealed,
    /// A rating submission is in flight
    Submitting(Rating),
    /// Nothing (more) is due; terminal until the user re-checks
    Complete,
    /// A remote call failed; `retry` names the operation to repeat
    Failed { detail: String, retry: RetryPoint },
}

/// Count of cards reviewed this session plus a per-rating tally
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub reviewed: usize,
    ratings: [usize; 4],
}

impl SessionStats {
    fn record(&mut self, rating: Rating) {
        self.reviewed += 1;
        self.ratings[rating.ordinal() as usize] += 1;
    }

    pub fn rating_count(&self, rating: Rating) -> usize {
        self.ratings[rating.ordinal() as usize]
    }
}

/// One review session over a queue of due cards
pub struct ReviewSession<S> {
    service: S,
    due_limit: usize,
    queue: ReviewQueue,
    state: SessionState,
    stats: SessionStats,
    last_outcome: Option<ReviewOutcome>,
}

impl<S: StudyService> ReviewSession<S> {
    /// Create a session that loads up to `due_limit` cards per queue fill.
    /// Call [`start`](Self::start) to fetch the first queue.
    pub fn new(service: S, due_limit: usize) -> Self {
        Self {
            service,
            due_limit,
            queue: ReviewQueue::new(),
            state: SessionState::Loading,
            stats: SessionStats::default(),
            last_outcome: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// The most recent scheduler response, if any review has completed
    pub fn last_outcome(&self) -> Option<&ReviewOutcome> {
        self.last_outcome.as_ref()
    }

    /// The card being reviewed, in any state that has one
    pub fn current_card(&self) -> Option<&Card> {
        match self.state {
            SessionState::Presenting
            | SessionState::Revealed
            | SessionState::Submitting(_)
            | SessionState::Failed {
                retry: RetryPoint::Submit(_),
                ..
            } => self.queue.current(),
            _ => None,
        }
    }

    /// (1-based position, queue length) for progress display
    pub fn progress(&self) -> (usize, usize) {
        (self.queue.position(), self.queue.len())
    }

    /// Fetch the due set and begin the session
    pub async fn start(&mut self) {
        self.load().await;
    }

    /// Show the answer for the current card. Ignored outside `Presenting`.
    pub fn reveal(&mut self) {
        if self.state == SessionState::Presenting {
            self.state = SessionState::Revealed;
        }
    }

    /// Rate the current card. Ignored unless the answer is revealed, so a
    /// second rating during an in-flight submission is dropped.
    pub async fn rate(&mut self, rating: Rating) {
        if self.state != SessionState::Revealed {
            return;
        }
        self.submit(rating).await;
    }

    /// Repeat the failed operation exactly. Ignored outside `Failed`.
    pub async fn retry(&mut self) {
        match self.state.clone() {
            SessionState::Failed {
                retry: RetryPoint::Load,
                ..
            } => self.load().await,
            SessionState::Failed {
                retry: RetryPoint::Submit(rating),
                ..
            } => self.submit(rating).await,
            _ => {}
        }
    }

    /// Re-check for newly due cards. Ignored outside `Complete`.
    pub async fn check_again(&mut self) {
        if self.state == SessionState::Complete {
            self.load().await;
        }
    }

    /// Summary line for the caught-up screen
    pub fn completion_message(&self) -> String {
        if self.stats.reviewed > 0 {
            format!(
                "Session complete! You reviewed {} card{}.",
                self.stats.reviewed,
                if self.stats.reviewed == 1 { "" } else { "s" }
            )
        } else {
            "No cards are due for review right now. Check back later!".to_string()
        }
    }

    async fn load(&mut self) {
        self.state = SessionState::Loading;
        match self.service.list_due_cards(self.due_limit).await {
            Ok(cards) if cards.is_empty() => {
                debug!("no cards due");
                self.state = SessionState::Complete;
            }
            Ok(cards) => {
                debug!("loaded {} due card(s)", cards.len());
                self.queue.load(cards);
                self.state = SessionState::Presenting;
            }
            Err(err) => {
                warn!("due-card query failed: {}", err);
                self.state = SessionState::Failed {
                    detail: err.to_string(),
                    retry: RetryPoint::Load,
                };
            }
        }
    }

    async fn submit(&mut self, rating: Rating) {
        let card_id = match self.queue.current() {
            Some(card) => card.id,
            // Revealed is only reachable with a loaded queue
            None => unreachable!("rating submitted with no current card"),
        };

        self.state = SessionState::Submitting(rating);
        match self.service.submit_review(card_id, rating).await {
            Ok(outcome) => {
                debug!("card {} rated {}: {}", card_id, rating, outcome.message);
                self.stats.record(rating);
                self.last_outcome = Some(outcome);
                match self.queue.advance() {
                    Advance::Next => self.state = SessionState::Presenting,
                    // The due boundary moves with time; ask the service
                    // again instead of assuming the session is over.
                    Advance::Exhausted => self.load().await,
                }
            }
            Err(err) => {
                warn!("review submission for card {} failed: {}", card_id, err);
                // Queue position is untouched so a retry resubmits the
                // same card; the rating is not counted in stats.
                self.state = SessionState::Failed {
                    detail: err.to_string(),
                    retry: RetryPoint::Submit(rating),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    use super::*;
    use crate::api::{CardPage, CardQuery, EntryPage};
    use crate::models::{CardType, Entry, ReviewRecord, StatsSummary, TagSet};

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

    fn outcome(card_id: i64, rating: Rating) -> ReviewOutcome {
        let mut updated = card(card_id);
        updated.interval_days = 1;
        updated.due_at = Utc::now() + Duration::days(1);
        ReviewOutcome {
            review: ReviewRecord {
                id: 1,
                card_id,
                rating,
                reviewed_at: Utc::now(),
            },
            card: updated,
            message: format!("Recorded {} ({}). Next review in 1 day(s).", rating.label().to_lowercase(), rating.ordinal()),
        }
    }

    /// Scripted service double: each call pops the next queued response.
    #[derive(Default)]
    struct ScriptedService {
        due_responses: Mutex<VecDeque<Result<Vec<Card>, ApiError>>>,
        review_responses: Mutex<VecDeque<Result<ReviewOutcome, ApiError>>>,
        submissions: Mutex<Vec<(i64, Rating)>>,
    }

    impl ScriptedService {
        fn due(self, response: Result<Vec<Card>, ApiError>) -> Self {
            self.due_responses.lock().unwrap().push_back(response);
            self
        }

        fn review(self, response: Result<ReviewOutcome, ApiError>) -> Self {
            self.review_responses.lock().unwrap().push_back(response);
            self
        }

        fn submissions(&self) -> Vec<(i64, Rating)> {
            self.submissions.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StudyService for &ScriptedService {
        async fn list_due_cards(&self, _limit: usize) -> Result<Vec<Card>, ApiError> {
            self.due_responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected due-card query")
        }

        async fn list_cards(&self, _query: &CardQuery) -> Result<CardPage, ApiError> {
            unimplemented!("not used by sessions")
        }

        async fn list_entries(
            &self,
            _limit: usize,
            _offset: usize,
            _tags: &TagSet,
        ) -> Result<EntryPage, ApiError> {
            unimplemented!("not used by sessions")
        }

        async fn get_entry(&self, _id: i64) -> Result<Entry, ApiError> {
            unimplemented!("not used by sessions")
        }

        async fn create_entry(&self, _content: &str, _tags: &TagSet) -> Result<Entry, ApiError> {
            unimplemented!("not used by sessions")
        }

        async fn submit_review(
            &self,
            card_id: i64,
            rating: Rating,
        ) -> Result<ReviewOutcome, ApiError> {
            self.submissions.lock().unwrap().push((card_id, rating));
            self.review_responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected review submission")
        }

        async fn get_stats(&self) -> Result<StatsSummary, ApiError> {
            unimplemented!("not used by sessions")
        }
    }

    #[tokio::test]
    async fn test_empty_due_set_completes_with_nothing_due() {
        let service = ScriptedService::default().due(Ok(Vec::new()));
        let mut session = ReviewSession::new(&service, 50);

        session.start().await;

        assert_eq!(*session.state(), SessionState::Complete);
        assert_eq!(session.stats().reviewed, 0);
        assert_eq!(
            session.completion_message(),
            "No cards are due for review right now. Check back later!"
        );
    }

    #[tokio::test]
    async fn test_single_card_session() {
        let service = ScriptedService::default()
            .due(Ok(vec![card(7)]))
            .review(Ok(outcome(7, Rating::Good)))
            .due(Ok(Vec::new()));
        let mut session = ReviewSession::new(&service, 50);

        session.start().await;
        assert_eq!(*session.state(), SessionState::Presenting);
        assert_eq!(session.current_card().unwrap().id, 7);

        session.reveal();
        assert_eq!(*session.state(), SessionState::Revealed);

        session.rate(Rating::Good).await;

        assert_eq!(*session.state(), SessionState::Complete);
        assert_eq!(session.stats().reviewed, 1);
        assert_eq!(session.stats().rating_count(Rating::Good), 1);
        assert_eq!(session.stats().rating_count(Rating::Again), 0);
        assert_eq!(session.stats().rating_count(Rating::Hard), 0);
        assert_eq!(session.stats().rating_count(Rating::Easy), 0);
        assert_eq!(service.submissions(), vec![(7, Rating::Good)]);
        assert_eq!(
            session.completion_message(),
            "Session complete! You reviewed 1 card."
        );
    }

    #[tokio::test]
    async fn test_rating_without_reveal_is_ignored() {
        let service = ScriptedService::default().due(Ok(vec![card(1)]));
        let mut session = ReviewSession::new(&service, 50);

        session.start().await;
        session.rate(Rating::Easy).await;

        assert_eq!(*session.state(), SessionState::Presenting);
        assert!(service.submissions().is_empty());
        assert_eq!(session.stats().reviewed, 0);
    }

    #[tokio::test]
    async fn test_reveal_outside_presenting_is_ignored() {
        let service = ScriptedService::default().due(Ok(Vec::new()));
        let mut session = ReviewSession::new(&service, 50);

        session.start().await;
        session.reveal();
        assert_eq!(*session.state(), SessionState::Complete);
    }

    #[tokio::test]
    async fn test_submission_failure_then_retry_counts_once() {
        let service = ScriptedService::default()
            .due(Ok(vec![card(3)]))
            .review(Err(ApiError::Transient("connection reset".into())))
            .review(Ok(outcome(3, Rating::Hard)))
            .due(Ok(Vec::new()));
        let mut session = ReviewSession::new(&service, 50);

        session.start().await;
        session.reveal();
        session.rate(Rating::Hard).await;

        // Failure preserves the card and records nothing
        assert!(matches!(
            session.state(),
            SessionState::Failed {
                retry: RetryPoint::Submit(Rating::Hard),
                ..
            }
        ));
        assert_eq!(session.current_card().unwrap().id, 3);
        assert_eq!(session.stats().reviewed, 0);
        assert_eq!(session.stats().rating_count(Rating::Hard), 0);

        session.retry().await;

        assert_eq!(*session.state(), SessionState::Complete);
        assert_eq!(session.stats().reviewed, 1);
        assert_eq!(session.stats().rating_count(Rating::Hard), 1);
        assert_eq!(
            service.submissions(),
            vec![(3, Rating::Hard), (3, Rating::Hard)]
        );
    }

    #[tokio::test]
    async fn test_exhaustion_requeries_and_carries_stats() {
        let service = ScriptedService::default()
            .due(Ok(vec![card(1)]))
            .review(Ok(outcome(1, Rating::Easy)))
            .due(Ok(vec![card(2)]))
            .review(Ok(outcome(2, Rating::Again)))
            .due(Ok(Vec::new()));
        let mut session = ReviewSession::new(&service, 50);

        session.start().await;
        session.reveal();
        session.rate(Rating::Easy).await;

        // The re-query found another card; the session continues
        assert_eq!(*session.state(), SessionState::Presenting);
        assert_eq!(session.current_card().unwrap().id, 2);
        assert_eq!(session.stats().reviewed, 1);

        session.reveal();
        session.rate(Rating::Again).await;

        assert_eq!(*session.state(), SessionState::Complete);
        assert_eq!(session.stats().reviewed, 2);
        assert_eq!(session.stats().rating_count(Rating::Easy), 1);
        assert_eq!(session.stats().rating_count(Rating::Again), 1);
        assert_eq!(
            session.completion_message(),
            "Session complete! You reviewed 2 cards."
        );
    }

    #[tokio::test]
    async fn test_load_failure_then_retry() {
        let service = ScriptedService::default()
            .due(Err(ApiError::Transient("timeout".into())))
            .due(Ok(vec![card(5)]));
        let mut session = ReviewSession::new(&service, 50);

        session.start().await;
        assert!(matches!(
            session.state(),
            SessionState::Failed {
                retry: RetryPoint::Load,
                ..
            }
        ));
        assert!(session.current_card().is_none());

        session.retry().await;
        assert_eq!(*session.state(), SessionState::Presenting);
        assert_eq!(session.current_card().unwrap().id, 5);
    }

    #[tokio::test]
    async fn test_check_again_from_complete() {
        let service = ScriptedService::default()
            .due(Ok(Vec::new()))
            .due(Ok(vec![card(9)]));
        let mut session = ReviewSession::new(&service, 50);

        session.start().await;
        assert_eq!(*session.state(), SessionState::Complete);

        session.check_again().await;
        assert_eq!(*session.state(), SessionState::Presenting);
        assert_eq!(session.current_card().unwrap().id, 9);
    }

    #[tokio::test]
    async fn test_multi_card_advance_resets_reveal() {
        let service = ScriptedService::default()
            .due(Ok(vec![card(1), card(2)]))
            .review(Ok(outcome(1, Rating::Good)));
        let mut session = ReviewSession::new(&service, 50);

        session.start().await;
        session.reveal();
        session.rate(Rating::Good).await;

        // Back to the front of the next card, answer hidden again
        assert_eq!(*session.state(), SessionState::Presenting);
        assert_eq!(session.current_card().unwrap().id, 2);
        assert_eq!(session.progress(), (2, 2));
        assert_eq!(session.last_outcome().unwrap().review.card_id, 1);
    }
}
