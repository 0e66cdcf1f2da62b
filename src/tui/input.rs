// Keyboard handling: translates crossterm key events into state changes on
// the ViewState and, where a selection changed, a UserCommand for the
// controller.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::protocol::UserCommand;
use crate::tui::{Focus, ViewState};

/// Process one key event against the view state.
///
/// Returns the command to send to the controller, if the key produced one.
/// Selection moves update the ViewState immediately so the highlight tracks
/// the keystroke without waiting for the controller round trip.
pub fn handle_key(key: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    // Key releases/repeats would double-fire on some terminals.
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C quits unconditionally, even mid-confirmation.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(UserCommand::Quit);
    }

    if state.confirm_quit {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('q') => Some(UserCommand::Quit),
            KeyCode::Char('n') | KeyCode::Esc => {
                state.confirm_quit = false;
                None
            }
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => {
            state.confirm_quit = true;
            None
        }
        KeyCode::Tab => {
            state.focus = state.focus.next();
            None
        }
        KeyCode::BackTab => {
            state.focus = state.focus.prev();
            None
        }
        KeyCode::Up | KeyCode::Char('k') => move_selection(state, -1),
        KeyCode::Down | KeyCode::Char('j') => move_selection(state, 1),
        KeyCode::Char('s') => Some(UserCommand::RequestSummary),
        KeyCode::Char('[') => {
            state.summary_scroll = state.summary_scroll.saturating_sub(1);
            None
        }
        KeyCode::Char(']') => {
            state.summary_scroll = state.summary_scroll.saturating_add(1);
            None
        }
        _ => None,
    }
}

/// Move the focused list by `delta` and emit the matching selection command.
/// On the results panel Up/Down scrolls the table instead.
fn move_selection(state: &mut ViewState, delta: i64) -> Option<UserCommand> {
    match state.focus {
        Focus::Years => {
            let moved = step_index(&mut state.year_index, state.years.len(), delta);
            moved.then(|| UserCommand::SelectYear(state.selected_year()))
        }
        Focus::Teams => {
            let moved = step_index(&mut state.team_index, state.team_options.len(), delta);
            moved.then(|| UserCommand::SelectTeam(state.selected_team().to_string()))
        }
        Focus::Rounds => {
            let moved = step_index(&mut state.round_index, state.round_options.len(), delta);
            moved.then(|| UserCommand::SelectRound(state.selected_round().to_string()))
        }
        Focus::Results => {
            if delta < 0 {
                state.results_scroll = state.results_scroll.saturating_sub(1);
            } else {
                let max = state.filtered.len().saturating_sub(1);
                state.results_scroll = (state.results_scroll + 1).min(max);
            }
            None
        }
    }
}

/// Clamp-step an index within `[0, len)`. Returns whether it changed.
fn step_index(index: &mut usize, len: usize, delta: i64) -> bool {
    if len == 0 {
        return false;
    }
    let current = *index as i64;
    let next = (current + delta).clamp(0, len as i64 - 1) as usize;
    if next != *index {
        *index = next;
        true
    } else {
        false
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
