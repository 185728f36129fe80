use crossterm::event::{KeyCode, KeyEvent};

use mneme_lib::models::Rating;
use mneme_lib::review::SessionState;

use super::app_state::{Mode, TuiState};

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    // Clear flash message on any keypress
    state.flash_message = None;

    if state.capture.active() {
        handle_capture_key(state, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.quit = true;
            return;
        }
        KeyCode::Tab => {
            state.next_mode();
            return;
        }
        _ => {}
    }

    match state.mode {
        Mode::Review => handle_review_key(state, key),
        Mode::Cards => handle_cards_key(state, key),
        Mode::Entries => handle_entries_key(state, key),
    }
}

fn handle_review_key(state: &mut TuiState, key: KeyEvent) {
    let session_state = state.session.state().clone();
    match session_state {
        SessionState::Presenting => {
            if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
                state.reveal();
            }
        }
        SessionState::Revealed => {
            let rating = match key.code {
                KeyCode::Char('1') => Some(Rating::Again),
                KeyCode::Char('2') => Some(Rating::Hard),
                KeyCode::Char('3') => Some(Rating::Good),
                KeyCode::Char('4') => Some(Rating::Easy),
                _ => None,
            };
            if let Some(rating) = rating {
                state.rate(rating);
            }
        }
        SessionState::Complete => {
            if matches!(key.code, KeyCode::Char('c') | KeyCode::Enter) {
                state.check_again();
            }
        }
        SessionState::Failed { .. } => {
            if matches!(key.code, KeyCode::Char('r') | KeyCode::Enter) {
                state.retry();
            }
        }
        SessionState::Loading | SessionState::Submitting(_) => {}
    }
}

fn handle_cards_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('f') => state.cards_cycle_filter(),
        KeyCode::Char('n') | KeyCode::Right => state.cards_next_page(),
        KeyCode::Char('p') | KeyCode::Left => state.cards_prev_page(),
        KeyCode::Char('r') => state.cards_refresh(),
        _ => {}
    }
}

fn handle_entries_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') => state.begin_capture(),
        KeyCode::Char('n') | KeyCode::Right => state.entries_next_page(),
        KeyCode::Char('p') | KeyCode::Left => state.entries_prev_page(),
        KeyCode::Char('r') => state.entries_refresh(),
        _ => {}
    }
}

fn handle_capture_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.cancel_capture(),
        KeyCode::Enter => state.capture_enter(),
        KeyCode::Backspace => state.capture_pop(),
        KeyCode::Char(c) => state.capture_push(c),
        _ => {}
    }
}
