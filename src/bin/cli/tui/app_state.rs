use tokio::runtime::Runtime;

use mneme_lib::api::HttpStudyService;
use mneme_lib::browse::{CardBrowser, EntryBrowser};
use mneme_lib::models::{CardType, Rating};
use mneme_lib::review::ReviewSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Review,
    Cards,
    Entries,
}

/// Which field of the entry capture form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureField {
    Content,
    Tags,
}

/// In-progress entry capture form
#[derive(Debug, Default)]
pub struct CaptureForm {
    pub content: String,
    pub tags: String,
    pub field: Option<CaptureField>,
}

impl CaptureForm {
    pub fn active(&self) -> bool {
        self.field.is_some()
    }
}

/// TUI state: the review session plus the two browse views. Network
/// calls run to completion on the embedded current-thread runtime, so at
/// most one request is in flight and key handling stays sequential.
pub struct TuiState {
    rt: Runtime,
    pub mode: Mode,
    pub session: ReviewSession<HttpStudyService>,
    pub cards: CardBrowser<HttpStudyService>,
    pub entries: EntryBrowser<HttpStudyService>,
    pub capture: CaptureForm,
    pub flash_message: Option<String>,
    pub quit: bool,
}

impl TuiState {
    pub fn new(rt: Runtime, service: HttpStudyService, due_limit: usize, page_size: usize) -> Self {
        Self {
            rt,
            mode: Mode::Review,
            session: ReviewSession::new(service.clone(), due_limit),
            cards: CardBrowser::new(service.clone(), page_size),
            entries: EntryBrowser::new(service, page_size),
            capture: CaptureForm::default(),
            flash_message: None,
            quit: false,
        }
    }

    pub fn start(&mut self) {
        let Self { rt, session, .. } = self;
        rt.block_on(session.start());
    }

    /// Switch surface, reloading the target view from the service
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        match mode {
            Mode::Review => {}
            Mode::Cards => self.cards_refresh(),
            Mode::Entries => self.entries_refresh(),
        }
    }

    pub fn next_mode(&mut self) {
        let next = match self.mode {
            Mode::Review => Mode::Cards,
            Mode::Cards => Mode::Entries,
            Mode::Entries => Mode::Review,
        };
        self.set_mode(next);
    }

    // ==================== Review ====================

    pub fn reveal(&mut self) {
        self.session.reveal();
    }

    pub fn rate(&mut self, rating: Rating) {
        let Self { rt, session, .. } = self;
        rt.block_on(session.rate(rating));
    }

    pub fn retry(&mut self) {
        let Self { rt, session, .. } = self;
        rt.block_on(session.retry());
    }

    pub fn check_again(&mut self) {
        let Self { rt, session, .. } = self;
        rt.block_on(session.check_again());
    }

    // ==================== Cards ====================

    pub fn cards_refresh(&mut self) {
        let Self { rt, cards, .. } = self;
        rt.block_on(cards.refresh());
    }

    /// Cycle the type filter: all, basic, reversible, cloze
    pub fn cards_cycle_filter(&mut self) {
        let next = match self.cards.filter() {
            None => Some(CardType::Basic),
            Some(CardType::Basic) => Some(CardType::Reversible),
            Some(CardType::Reversible) => Some(CardType::Cloze),
            Some(CardType::Cloze) => None,
        };
        let Self { rt, cards, .. } = self;
        rt.block_on(cards.set_filter(next));
    }

    pub fn cards_next_page(&mut self) {
        let Self { rt, cards, .. } = self;
        rt.block_on(cards.next_page());
    }

    pub fn cards_prev_page(&mut self) {
        let Self { rt, cards, .. } = self;
        rt.block_on(cards.prev_page());
    }

    // ==================== Entries ====================

    pub fn entries_refresh(&mut self) {
        let Self { rt, entries, .. } = self;
        rt.block_on(entries.refresh());
    }

    pub fn entries_next_page(&mut self) {
        let Self { rt, entries, .. } = self;
        rt.block_on(entries.next_page());
    }

    pub fn entries_prev_page(&mut self) {
        let Self { rt, entries, .. } = self;
        rt.block_on(entries.prev_page());
    }

    // ==================== Entry capture ====================

    pub fn begin_capture(&mut self) {
        self.capture = CaptureForm {
            field: Some(CaptureField::Content),
            ..CaptureForm::default()
        };
    }

    pub fn cancel_capture(&mut self) {
        self.capture = CaptureForm::default();
    }

    pub fn capture_push(&mut self, c: char) {
        match self.capture.field {
            Some(CaptureField::Content) => self.capture.content.push(c),
            Some(CaptureField::Tags) => self.capture.tags.push(c),
            None => {}
        }
    }

    pub fn capture_pop(&mut self) {
        match self.capture.field {
            Some(CaptureField::Content) => {
                self.capture.content.pop();
            }
            Some(CaptureField::Tags) => {
                self.capture.tags.pop();
            }
            None => {}
        }
    }

    /// Advance the form: content field moves on to tags, tags submits
    pub fn capture_enter(&mut self) {
        match self.capture.field {
            Some(CaptureField::Content) => {
                self.capture.field = Some(CaptureField::Tags);
            }
            Some(CaptureField::Tags) => {
                let content = self.capture.content.clone();
                let tags = self.capture.tags.clone();
                let created = {
                    let Self { rt, entries, .. } = self;
                    rt.block_on(entries.create(&content, &tags))
                };
                match created {
                    Ok(entry) => {
                        self.flash_message = Some(format!("Created entry #{}", entry.id));
                        self.capture = CaptureForm::default();
                    }
                    Err(_) => {
                        // The browser's error slot carries the detail;
                        // keep the form so the input is not lost.
                        self.capture.field = Some(CaptureField::Content);
                    }
                }
            }
            None => {}
        }
    }
}
