//! Search methods for `ViewerApp`.

use super::app::{Effect, Follow, Mode, ViewerApp};
use super::keys::KeyInput;

impl ViewerApp {
    pub(super) fn start_search(&mut self) {
        self.search.input = self.search.query.clone();
        self.mode = Mode::Searching;
    }

    /// Typing edits the query live; Enter keeps it, Esc drops it.
    pub(super) fn handle_searching(&mut self, key: KeyInput) -> Effect {
        match key {
            KeyInput::Enter => self.mode = Mode::Normal,
            KeyInput::Esc => {
                self.search.clear();
                self.mode = Mode::Normal;
                self.on_list_changed();
            }
            KeyInput::Backspace => {
                if self.search.input.pop().is_some() {
                    self.on_query_changed();
                }
            }
            KeyInput::Char(c) => {
                self.search.input.push(c);
                self.on_query_changed();
            }
            _ => {}
        }
        Effect::None
    }

    fn on_query_changed(&mut self) {
        self.search.query = self.search.input.clone();
        self.on_list_changed();
    }

    pub(super) fn next_match(&mut self) {
        if self.match_rows.is_empty() {
            return;
        }
        self.search.current = (self.search.current + 1) % self.match_rows.len();
        self.cursor = self.match_rows[self.search.current];
        self.follow = Follow::Cursor;
    }

    pub(super) fn prev_match(&mut self) {
        if self.match_rows.is_empty() {
            return;
        }
        let len = self.match_rows.len();
        self.search.current = (self.search.current + len - 1) % len;
        self.cursor = self.match_rows[self.search.current];
        self.follow = Follow::Cursor;
    }

    /// Esc in normal mode: drop filters first, then the query.
    pub(super) fn clear_filter_or_search(&mut self) {
        if self.filter.is_active() {
            self.filter.clear();
        } else if self.search.is_active() {
            self.search.clear();
        } else {
            return;
        }
        self.on_list_changed();
    }
}
