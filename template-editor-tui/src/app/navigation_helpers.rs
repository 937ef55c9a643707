// src/app/navigation_helpers.rs
use ratatui::widgets::{ListState, TableState};

fn next_index(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(i) if i >= len - 1 => 0,
        Some(i) => i + 1,
        None => 0,
    })
}

fn previous_index(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(0) => len - 1,
        Some(i) => (i - 1).min(len - 1),
        None => len - 1,
    })
}

pub fn list_next(state: &mut ListState, list_len: usize) {
    state.select(next_index(state.selected(), list_len));
}

pub fn list_previous(state: &mut ListState, list_len: usize) {
    state.select(previous_index(state.selected(), list_len));
}

pub fn table_next(state: &mut TableState, len: usize) {
    state.select(next_index(state.selected(), len));
}

pub fn table_previous(state: &mut TableState, len: usize) {
    state.select(previous_index(state.selected(), len));
}

/// Keeps a table selection inside `len` rows after a removal.
pub fn clamp_table(state: &mut TableState, len: usize) {
    state.select(match state.selected() {
        _ if len == 0 => None,
        Some(i) if i >= len => Some(len - 1),
        other => other,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps_both_ways() {
        let mut state = ListState::default();
        list_previous(&mut state, 3);
        assert_eq!(state.selected(), Some(2));
        list_next(&mut state, 3);
        assert_eq!(state.selected(), Some(0));
        list_next(&mut state, 0);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn clamp_follows_shrinking_table() {
        let mut state = TableState::default();
        state.select(Some(4));
        clamp_table(&mut state, 2);
        assert_eq!(state.selected(), Some(1));
        clamp_table(&mut state, 0);
        assert_eq!(state.selected(), None);
    }
}
