//! Interface to the remote study service
//!
//! The service owns all persistent state: entries, cards, and the
//! scheduling algorithm. This module defines the `StudyService` seam the
//! review engine and browse views consume, plus the HTTP implementation.
//! Handing the engine a test double instead of the HTTP client is the
//! intended way to test session logic.

pub mod client;
pub mod error;

pub use client::HttpStudyService;
pub use error::ApiError;

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{Card, CardType, Entry, Rating, ReviewOutcome, StatsSummary, TagSet};

/// Default rows per listing page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Query parameters for the card listing
#[derive(Debug, Clone)]
pub struct CardQuery {
    pub limit: usize,
    pub offset: usize,
    /// Restrict to one card type; `None` lists all types
    pub card_type: Option<CardType>,
    /// Restrict to cards carrying every one of these tags
    pub tags: TagSet,
}

impl Default for CardQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
            card_type: None,
            tags: TagSet::new(),
        }
    }
}

/// One page of cards plus the filter-applied (but unpaginated) total
#[derive(Debug, Clone, Deserialize)]
pub struct CardPage {
    pub cards: Vec<Card>,
    #[serde(default)]
    pub total: u64,
}

/// One page of entries plus the total count
#[derive(Debug, Clone, Deserialize)]
pub struct EntryPage {
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub total: u64,
}

/// Operations the study service provides. All calls are request/response;
/// failures surface as an [`ApiError`] carrying a human-readable detail.
#[async_trait]
pub trait StudyService {
    /// Cards with `due_at <= now`, bounded to `limit`, in the service's
    /// stable order. The client never re-sorts the result.
    async fn list_due_cards(&self, limit: usize) -> Result<Vec<Card>, ApiError>;

    async fn list_cards(&self, query: &CardQuery) -> Result<CardPage, ApiError>;

    async fn list_entries(
        &self,
        limit: usize,
        offset: usize,
        tags: &TagSet,
    ) -> Result<EntryPage, ApiError>;

    async fn get_entry(&self, id: i64) -> Result<Entry, ApiError>;

    /// Create a new entry. Fails with [`ApiError::Validation`] when the
    /// content is empty after trimming.
    async fn create_entry(&self, content: &str, tags: &TagSet) -> Result<Entry, ApiError>;

    /// Submit a rating for a card and receive its rescheduled state. The
    /// scheduler is authoritative; the returned card carries the new
    /// `ease_factor`, `interval_days`, and `due_at`. `Good` and `Easy`
    /// never shrink the interval; `Again` may reset it toward a minimum.
    /// An unknown `card_id` fails with [`ApiError::NotFound`].
    async fn submit_review(&self, card_id: i64, rating: Rating)
        -> Result<ReviewOutcome, ApiError>;

    async fn get_stats(&self) -> Result<StatsSummary, ApiError>;
}
