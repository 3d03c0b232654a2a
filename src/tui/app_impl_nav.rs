//! Cursor, expansion and viewport methods for `ViewerApp`.

use super::app::{Follow, ViewerApp};

impl ViewerApp {
    /// Move up a row; at the first row scroll the viewport instead.
    pub(super) fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.follow = Follow::Cursor;
        } else {
            self.scroll_by(-1);
        }
    }

    /// Move down a row; at the last row scroll the viewport instead.
    pub(super) fn move_down(&mut self) {
        if self.cursor + 1 < self.displayed.len() {
            self.cursor += 1;
            self.follow = Follow::Cursor;
        } else {
            self.scroll_by(1);
        }
    }

    pub(super) fn goto_top(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    pub(super) fn goto_bottom(&mut self) {
        self.cursor = self.displayed.len().saturating_sub(1);
        self.follow = Follow::Cursor;
    }

    // ------------------------------------------------------------------------
    // Expansion
    // ------------------------------------------------------------------------

    pub(super) fn toggle_expand(&mut self) {
        let Some(&idx) = self.displayed.get(self.cursor) else {
            return;
        };
        if !self.expanded.remove(&idx) {
            self.expanded.insert(idx);
        }
        self.follow = Follow::Expanded;
    }

    pub(super) fn set_expanded(&mut self, expanded: bool) {
        let Some(&idx) = self.displayed.get(self.cursor) else {
            return;
        };
        if expanded {
            self.expanded.insert(idx);
            self.follow = Follow::Expanded;
        } else {
            self.expanded.remove(&idx);
            self.follow = Follow::Cursor;
        }
    }

    pub(super) fn expand_all(&mut self) {
        self.expanded.extend(self.displayed.iter().copied());
        self.follow = Follow::Cursor;
    }

    /// Collapse the displayed resources; hidden ones keep their state.
    pub(super) fn collapse_all(&mut self) {
        for idx in &self.displayed {
            self.expanded.remove(idx);
        }
        self.follow = Follow::Cursor;
    }

    // ------------------------------------------------------------------------
    // Viewport
    // ------------------------------------------------------------------------

    pub(super) fn half_page(&self) -> isize {
        (self.body_height() / 2).max(1) as isize
    }

    pub(super) fn full_page(&self) -> isize {
        self.body_height() as isize
    }

    fn max_offset(&self) -> usize {
        self.layout.lines.len().saturating_sub(1)
    }

    /// Move the viewport without touching the cursor.
    pub(super) fn scroll_by(&mut self, delta: isize) {
        self.offset = self
            .offset
            .saturating_add_signed(delta)
            .min(self.max_offset());
    }

    pub(super) fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    /// Nudge the viewport only if the cursor row is outside it.
    pub(super) fn ensure_cursor_visible(&mut self) {
        let Some(&line) = self.layout.row_starts.get(self.cursor) else {
            return;
        };
        let height = self.body_height();
        if line < self.offset {
            self.offset = line;
        } else if line >= self.offset + height {
            self.offset = line + 1 - height;
        }
    }

    /// After expanding: if the block would run past the bottom of the
    /// viewport, start the viewport at the block's header.
    pub(super) fn scroll_for_expanded(&mut self) {
        let Some(&line) = self.layout.row_starts.get(self.cursor) else {
            return;
        };
        let expanded = self
            .displayed
            .get(self.cursor)
            .is_some_and(|idx| self.expanded.contains(idx));

        if expanded {
            let end = self.layout.row_end(self.cursor);
            let bottom = self.offset + self.body_height();
            if end > bottom {
                self.offset = line;
                return;
            }
        }
        self.ensure_cursor_visible();
    }
}
