use log::warn;

use crate::api::{ApiError, StudyService};
use crate::models::{Entry, TagSet};

/// Entry listing plus the capture form for new entries
pub struct EntryBrowser<S> {
    service: S,
    page_size: usize,
    offset: usize,
    tag_filter: TagSet,
    entries: Vec<Entry>,
    total: u64,
    error: Option<String>,
}

impl<S: StudyService> EntryBrowser<S> {
    pub fn new(service: S, page_size: usize) -> Self {
        Self {
            service,
            page_size,
            offset: 0,
            tag_filter: TagSet::new(),
            entries: Vec::new(),
            total: 0,
            error: None,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Reload the current page. On failure the previous rows stay
    /// visible and the error slot is set.
    pub async fn refresh(&mut self) {
        match self
            .service
            .list_entries(self.page_size, self.offset, &self.tag_filter)
            .await
        {
            Ok(page) => {
                self.entries = page.entries;
                self.total = page.total;
                self.error = None;
            }
            Err(err) => {
                warn!("entry listing failed: {}", err);
                self.error = Some(err.to_string());
            }
        }
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

    /// Validate and submit the capture form. Content is trimmed and must
    /// be non-empty; the tag string is comma-split and normalized. After
    /// a successful create the list is reloaded from the service rather
    /// than the unconfirmed record being appended locally.
    pub async fn create(&mut self, content: &str, tags_input: &str) -> Result<Entry, ApiError> {
        let content = content.trim();
        if content.is_empty() {
            let detail = "entry content must not be empty".to_string();
            self.error = Some(detail.clone());
            return Err(ApiError::Validation(detail));
        }

        let tags = TagSet::parse(tags_input);
        match self.service.create_entry(content, &tags).await {
            Ok(entry) => {
                self.error = None;
                self.refresh().await;
                Ok(entry)
            }
            Err(err) => {
                warn!("entry creation failed: {}", err);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
