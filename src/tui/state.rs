//! Cursor state for the filter and sort pickers.

/// Selection within a fixed-length list.
pub trait ListNavigation {
    fn selected(&self) -> usize;

    fn set_selected(&mut self, idx: usize);

    fn total(&self) -> usize;

    /// Move selection to the next item.
    fn select_next(&mut self) {
        let total = self.total();
        let selected = self.selected();
        if total > 0 && selected < total.saturating_sub(1) {
            self.set_selected(selected + 1);
        }
    }

    /// Move selection to the previous item.
    fn select_prev(&mut self) {
        let selected = self.selected();
        if selected > 0 {
            self.set_selected(selected - 1);
        }
    }

    /// Ensure selection is within valid bounds.
    fn clamp_selection(&mut self) {
        let total = self.total();
        if total == 0 {
            self.set_selected(0);
        } else if self.selected() >= total {
            self.set_selected(total - 1);
        }
    }
}

/// Cursor over a picker with a fixed number of options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerState {
    selected: usize,
    total: usize,
}

impl PickerState {
    #[must_use]
    pub const fn new(total: usize) -> Self {
        Self { selected: 0, total }
    }

    /// Open the picker with the cursor on `idx`.
    pub fn open_at(&mut self, idx: usize) {
        self.selected = idx;
        self.clamp_selection();
    }
}

impl ListNavigation for PickerState {
    fn selected(&self) -> usize {
        self.selected
    }

    fn set_selected(&mut self, idx: usize) {
        self.selected = idx;
    }

    fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picker_bounds() {
        let mut picker = PickerState::new(3);
        picker.select_prev();
        assert_eq!(picker.selected(), 0);
        picker.select_next();
        picker.select_next();
        picker.select_next();
        assert_eq!(picker.selected(), 2);
        picker.open_at(10);
        assert_eq!(picker.selected(), 2);
    }
}
