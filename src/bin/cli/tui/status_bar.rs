use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use mneme_lib::review::SessionState;

use super::app_state::{CaptureField, Mode, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    // Show flash message if present
    if let Some(ref msg) = state.flash_message {
        let flash = Paragraph::new(format!(" {}", msg))
            .style(Style::default().bg(Color::Green).fg(Color::Black));
        f.render_widget(flash, area);
        return;
    }

    // Entry capture prompt takes over the bar while active
    if state.capture.active() {
        let text = match state.capture.field {
            Some(CaptureField::Content) => format!(" Entry content: {}█", state.capture.content),
            _ => format!(" Tags (comma-separated): {}█", state.capture.tags),
        };
        let prompt = Paragraph::new(text).style(Style::default().bg(Color::Blue).fg(Color::White));
        f.render_widget(prompt, area);
        return;
    }

    let hints = match state.mode {
        Mode::Review => {
            let reviewed = state.session.stats().reviewed;
            match state.session.state() {
                SessionState::Loading => " Loading...  Tab: browse  q: quit ".to_string(),
                SessionState::Presenting => format!(
                    " Space: show answer  Tab: browse  q: quit  | {} reviewed ",
                    reviewed
                ),
                SessionState::Revealed | SessionState::Submitting(_) => format!(
                    " 1-4: rate recall  Tab: browse  q: quit  | {} reviewed ",
                    reviewed
                ),
                SessionState::Complete => {
                    " c: check for more cards  Tab: browse  q: quit ".to_string()
                }
                SessionState::Failed { .. } => " r: retry  Tab: browse  q: quit ".to_string(),
            }
        }
        Mode::Cards => " f: cycle type filter  n/p: page  r: refresh  Tab: next view  q: quit "
            .to_string(),
        Mode::Entries => " a: add entry  n/p: page  r: refresh  Tab: next view  q: quit "
            .to_string(),
    };

    let status = Paragraph::new(hints).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status, area);
}
