use log::warn;

use crate::api::{CardQuery, StudyService};
use crate::models::{Card, CardType, TagSet};

/// Card listing with an optional type filter and a pagination window
pub struct CardBrowser<S> {
    service: S,
    page_size: usize,
    offset: usize,
    filter: Option<CardType>,
    tag_filter: TagSet,
    cards: Vec<Card>,
    total: u64,
    error: Option<String>,
}

impl<S: StudyService> CardBrowser<S> {
    pub fn new(service: S, page_size: usize) -> Self {
        Self {
            service,
            page_size,
            offset: 0,
            filter: None,
            tag_filter: TagSet::new(),
            cards: Vec::new(),
            total: 0,
            error: None,
        }
    }

    /// The currently displayed page
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Filter-applied total across all pages
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn filter(&self) -> Option<CardType> {
        self.filter
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Re-issue the query for the current filter and page. The displayed
    /// set is replaced, never appended to. On failure the previous rows
    /// stay visible and the error slot is set.
    pub async fn refresh(&mut self) {
        let query = CardQuery {
            limit: self.page_size,
            offset: self.offset,
            card_type: self.filter,
            tags: self.tag_filter.clone(),
        };
        match self.service.list_cards(&query).await {
            Ok(page) => {
                self.cards = page.cards;
                self.total = page.total;
                self.error = None;
            }
            Err(err) => {
                warn!("card listing failed: {}", err);
                self.error = Some(err.to_string());
            }
        }
    }

    /// Change the type filter and reload from the first page
    pub async fn set_filter(&mut self, filter: Option<CardType>) {
        self.filter = filter;
        self.offset = 0;
        self.refresh().await;
    }

    /// Change the tag filter and reload from the first page
    pub async fn set_tag_filter(&mut self, tags: TagSet) {
        self.tag_filter = tags;
        self.offset = 0;
        self.refresh().await;
    }

    pub async fn next_page(&mut self) {
        if ((self.offset + self.page_size) as u64) < self.total {
            self.offset += self.page_size;
            self.refresh().await;
        }
    }

    pub async fn prev_page(&mut self) {
        if self.offset > 0 {
            self.offset = self.offset.saturating_sub(self.page_size);
            self.refresh().await;
        }
    }
}
