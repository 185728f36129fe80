use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use mneme_lib::models::Rating;
use mneme_lib::review::SessionState;

use super::app_state::{Mode, TuiState};
use super::status_bar;

pub fn draw(f: &mut Frame, state: &mut TuiState) {
    let size = f.area();

    // Main layout: content area + status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(size);

    let main_area = outer[0];
    let status_area = outer[1];

    match state.mode {
        Mode::Review => draw_review(f, main_area, state),
        Mode::Cards => draw_cards(f, main_area, state),
        Mode::Entries => draw_entries(f, main_area, state),
    }

    status_bar::draw(f, status_area, state);
}

fn rating_color(rating: Rating) -> Color {
    match rating {
        Rating::Again => Color::Red,
        Rating::Hard => Color::Yellow,
        Rating::Good => Color::Blue,
        Rating::Easy => Color::Green,
    }
}

// ==================== Review surface ====================

fn draw_review(f: &mut Frame, area: Rect, state: &TuiState) {
    match state.session.state().clone() {
        SessionState::Loading => draw_review_message(f, area, "Loading due cards..."),
        SessionState::Presenting => draw_card(f, area, state, false),
        SessionState::Revealed | SessionState::Submitting(_) => draw_card(f, area, state, true),
        SessionState::Complete => draw_complete(f, area, state),
        SessionState::Failed { detail, .. } => draw_review_error(f, area, &detail),
    }
}

fn draw_review_message(f: &mut Frame, area: Rect, message: &str) {
    let block = Block::default().title(" Review ").borders(Borders::ALL);
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_card(f: &mut Frame, area: Rect, state: &TuiState, revealed: bool) {
    let card = match state.session.current_card() {
        Some(card) => card,
        None => return,
    };

    let (position, queue_len) = state.session.progress();
    let title = format!(" Card {} of {} [{}] ", position, queue_len, card.card_type);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", card.front),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if revealed {
        lines.push(Line::from(Span::styled(
            "  ~~~",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(format!("  {}", card.answer_text())));
        lines.push(Line::from(""));
        for rating in Rating::ALL {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {}: {}", rating.ordinal() + 1, rating.label()),
                    Style::default()
                        .fg(rating_color(rating))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", rating.description()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "  Space: show answer",
            Style::default().fg(Color::DarkGray),
        )));
    }

    if !card.tags.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  tags: {}", card.tags),
            Style::default().fg(Color::DarkGray),
        )));
    }

    if let Some(outcome) = state.session.last_outcome() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", outcome.message),
            Style::default().fg(Color::Green),
        )));
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn draw_complete(f: &mut Frame, area: Rect, state: &TuiState) {
    let stats = state.session.stats();
    let block = Block::default().title(" Review ").borders(Borders::ALL);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  All caught up!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("  {}", state.session.completion_message())),
    ];

    if stats.reviewed > 0 {
        lines.push(Line::from(""));
        for rating in Rating::ALL {
            lines.push(Line::from(Span::styled(
                format!("  {} {}", stats.rating_count(rating), rating.label()),
                Style::default().fg(rating_color(rating)),
            )));
        }
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_review_error(f: &mut Frame, area: Rect, detail: &str) {
    let block = Block::default()
        .title(" Review ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Error: {}", detail),
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  r: retry",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

// ==================== Cards surface ====================

fn draw_cards(f: &mut Frame, area: Rect, state: &TuiState) {
    let filter = match state.cards.filter() {
        Some(card_type) => card_type.as_str(),
        None => "all",
    };
    let title = format!(
        " Flashcards [{}] {} of {} ",
        filter,
        state.cards.cards().len(),
        state.cards.total()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = Vec::new();

    if let Some(error) = state.cards.error() {
        lines.push(Line::from(Span::styled(
            format!("  Error: {}", error),
            Style::default().fg(Color::Red),
        )));
    }

    if state.cards.cards().is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  No cards to show.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for card in state.cards.cards() {
        let due = if card.is_due() { " [due]" } else { "" };
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                format!("  #{} [{}]{}", card.id, card.card_type, due),
                Style::default().fg(Color::Magenta),
            ),
            Span::raw(format!(" {}", card.front)),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "      EF {:.2} | interval {}d | due {}",
                card.ease_factor,
                card.interval_days,
                card.due_at.format("%Y-%m-%d")
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

// ==================== Entries surface ====================

fn draw_entries(f: &mut Frame, area: Rect, state: &TuiState) {
    let title = format!(
        " Entries {} of {} ",
        state.entries.entries().len(),
        state.entries.total()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = Vec::new();

    if let Some(error) = state.entries.error() {
        lines.push(Line::from(Span::styled(
            format!("  Error: {}", error),
            Style::default().fg(Color::Red),
        )));
    }

    if state.entries.entries().is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  No entries yet. Press 'a' to add one.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for entry in state.entries.entries() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  #{} {}", entry.id, entry.created_at.format("%Y-%m-%d %H:%M")),
            Style::default().fg(Color::Magenta),
        )));
        lines.push(Line::from(format!("      {}", entry.content)));
        if !entry.tags.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("      tags: {}", entry.tags),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
