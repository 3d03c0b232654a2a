//! Viewer state and its transition functions.
//!
//! [`ViewerApp::handle_event`] is the only entry point that mutates state.
//! Every event is routed to the handler of the active [`Mode`], which returns
//! an [`Effect`] for the run loop. After each event the list body is laid out
//! again and the viewport is adjusted, so the state never holds a stale
//! layout.

use super::filter::StatusFilter;
use super::keys::{KeyInput, NormalCommand, ViewerEvent};
use super::render::{layout_body, BodyInput, BodyLayout};
use super::content::ContentOptions;
use super::search::SearchState;
use super::sort::SortMode;
use super::state::{ListNavigation, PickerState};
use super::theme::Theme;
use crate::config::AppConfig;
use crate::diff::MAX_CONTEXT_LINES;
use crate::model::{Action, Plan};
use std::collections::HashSet;

/// Rows taken by the title bar.
pub const HEADER_HEIGHT: u16 = 2;
/// Rows taken by the key hints.
pub const FOOTER_HEIGHT: u16 = 1;
/// Lines moved per mouse wheel notch.
pub const MOUSE_SCROLL_LINES: usize = 3;

const DEFAULT_WIDTH: u16 = 80;
const DEFAULT_HEIGHT: u16 = 24;

/// Input mode. Exactly one is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing a search query
    Searching,
    /// Filter picker open
    Filtering,
    /// Sort picker open
    Sorting,
    /// `a` was pressed once; waiting for `a` or `y`
    ConfirmingApply,
}

/// What the run loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Leave the viewer and run apply
    Apply,
}

/// Viewer behavior taken from configuration and the invoking command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerOptions {
    /// Whether `a` offers to apply the plan
    pub apply_enabled: bool,
    /// Hide rows that do not match the active query
    pub narrow_search: bool,
    pub context_lines: usize,
    pub decode_keys: Vec<String>,
    pub wrap: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl ViewerOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            apply_enabled: false,
            narrow_search: config.tui.narrow_search,
            context_lines: config.display.context_lines.min(MAX_CONTEXT_LINES),
            decode_keys: config.display.decode_keys.clone(),
            wrap: config.display.wrap,
        }
    }

    #[must_use]
    pub fn with_apply(mut self, enabled: bool) -> Self {
        self.apply_enabled = enabled;
        self
    }
}

/// Viewport adjustment owed after the next layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Follow {
    None,
    /// Keep the cursor row on screen
    Cursor,
    /// Show as much of the cursor's expanded block as fits
    Expanded,
}

/// One line of the status area between the title and the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusItem {
    /// Enabled action filters
    Filter(Vec<&'static str>),
    Sort(SortMode),
    /// Search prompt while typing
    SearchInput(String),
    /// Applied query with the current match position
    SearchInfo {
        query: String,
        current: usize,
        total: usize,
    },
    ConfirmApply,
    /// A newer release is available
    Update(String),
}

/// The viewer state machine.
pub struct ViewerApp {
    pub(super) plan: Plan,
    pub(super) theme: Theme,
    pub(super) options: ViewerOptions,
    pub(super) mode: Mode,

    /// Row in `displayed`
    pub(super) cursor: usize,
    /// Expanded resources, by index into the plan
    pub(super) expanded: HashSet<usize>,

    pub(super) filter: StatusFilter,
    pub(super) sort: SortMode,
    pub(super) search: SearchState,
    pub(super) filter_picker: PickerState,
    pub(super) sort_picker: PickerState,

    /// Filtered and sorted resource indices, narrowed to matches when the
    /// query narrows the list
    pub(super) displayed: Vec<usize>,
    /// Rows of `displayed` that match the query
    pub(super) match_rows: Vec<usize>,

    pub(super) layout: BodyLayout,
    pub(super) offset: usize,
    pub(super) width: u16,
    pub(super) height: u16,
    pub(super) follow: Follow,
    pub(super) pending_g: bool,

    pub(super) update_notice: Option<String>,
}

impl ViewerApp {
    #[must_use]
    pub fn new(plan: Plan, theme: Theme, options: ViewerOptions) -> Self {
        let mut app = Self {
            plan,
            theme,
            options,
            mode: Mode::Normal,
            cursor: 0,
            expanded: HashSet::new(),
            filter: StatusFilter::new(),
            sort: SortMode::default(),
            search: SearchState::default(),
            filter_picker: PickerState::new(Action::FILTERABLE.len()),
            sort_picker: PickerState::new(SortMode::ALL.len()),
            displayed: Vec::new(),
            match_rows: Vec::new(),
            layout: BodyLayout::default(),
            offset: 0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            follow: Follow::None,
            pending_g: false,
            update_notice: None,
        };
        app.recompute();
        app.refresh();
        app
    }

    /// Set the terminal size before the first frame.
    #[must_use]
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self.refresh();
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether the apply prompt is offered.
    #[must_use]
    pub fn can_apply(&self) -> bool {
        self.options.apply_enabled
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Resource indices in display order.
    #[must_use]
    pub fn displayed(&self) -> &[usize] {
        &self.displayed
    }

    /// Addresses in display order.
    #[must_use]
    pub fn displayed_addresses(&self) -> Vec<&str> {
        self.displayed
            .iter()
            .map(|&i| self.plan.resources[i].address.as_str())
            .collect()
    }

    /// Address under the cursor.
    #[must_use]
    pub fn selected_address(&self) -> Option<&str> {
        self.displayed
            .get(self.cursor)
            .map(|&i| self.plan.resources[i].address.as_str())
    }

    #[must_use]
    pub fn is_expanded(&self, resource: usize) -> bool {
        self.expanded.contains(&resource)
    }

    #[must_use]
    pub fn filter(&self) -> &StatusFilter {
        &self.filter
    }

    #[must_use]
    pub fn sort(&self) -> SortMode {
        self.sort
    }

    #[must_use]
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    /// Display rows matching the active query.
    #[must_use]
    pub fn match_rows(&self) -> &[usize] {
        &self.match_rows
    }

    #[must_use]
    pub fn layout(&self) -> &BodyLayout {
        &self.layout
    }

    /// First visible body line.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn filter_picker(&self) -> &PickerState {
        &self.filter_picker
    }

    #[must_use]
    pub fn sort_picker(&self) -> &PickerState {
        &self.sort_picker
    }

    #[must_use]
    pub fn update_notice(&self) -> Option<&str> {
        self.update_notice.as_deref()
    }

    /// Show a one-line notice about a newer release.
    pub fn set_update_notice(&mut self, version: impl Into<String>) {
        self.update_notice = Some(version.into());
        self.refresh();
    }

    /// Lines shown between the title and the list, in display order.
    #[must_use]
    pub fn status_items(&self) -> Vec<StatusItem> {
        let mut items = Vec::new();
        if self.filter.is_active() {
            items.push(StatusItem::Filter(self.filter.labels()));
        }
        if self.sort != SortMode::PlanOrder {
            items.push(StatusItem::Sort(self.sort));
        }
        if self.mode == Mode::Searching {
            items.push(StatusItem::SearchInput(self.search.input.clone()));
        } else if self.search.is_active() {
            items.push(StatusItem::SearchInfo {
                query: self.search.query.clone(),
                current: self.search.current,
                total: self.match_rows.len(),
            });
        }
        if self.mode == Mode::ConfirmingApply {
            items.push(StatusItem::ConfirmApply);
        }
        if let Some(version) = &self.update_notice {
            items.push(StatusItem::Update(version.clone()));
        }
        items
    }

    /// Rows available to the list body.
    #[must_use]
    pub fn body_height(&self) -> usize {
        let status = u16::try_from(self.status_items().len()).unwrap_or(u16::MAX);
        usize::from(
            self.height
                .saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT)
                .saturating_sub(status)
                .max(1),
        )
    }

    // ------------------------------------------------------------------------
    // Event dispatch
    // ------------------------------------------------------------------------

    /// Apply one input event and report what the run loop should do.
    pub fn handle_event(&mut self, event: ViewerEvent) -> Effect {
        let effect = match event {
            ViewerEvent::Key(KeyInput::Ctrl('c')) => Effect::Quit,
            ViewerEvent::Key(key) => match self.mode {
                Mode::Normal => self.handle_normal(key),
                Mode::Searching => self.handle_searching(key),
                Mode::Filtering => self.handle_filtering(key),
                Mode::Sorting => self.handle_sorting(key),
                Mode::ConfirmingApply => self.handle_confirming(key),
            },
            ViewerEvent::ScrollUp => {
                self.scroll_by(-(MOUSE_SCROLL_LINES as isize));
                Effect::None
            }
            ViewerEvent::ScrollDown => {
                self.scroll_by(MOUSE_SCROLL_LINES as isize);
                Effect::None
            }
            ViewerEvent::Resize { width, height } => {
                self.width = width;
                self.height = height;
                self.follow = Follow::Cursor;
                Effect::None
            }
        };
        self.refresh();
        effect
    }

    fn handle_normal(&mut self, key: KeyInput) -> Effect {
        let command = NormalCommand::from_key(key);

        if std::mem::take(&mut self.pending_g) && command == Some(NormalCommand::TopPrefix) {
            self.goto_top();
            return Effect::None;
        }

        let Some(command) = command else {
            return Effect::None;
        };

        match command {
            NormalCommand::Quit => return Effect::Quit,
            NormalCommand::MoveUp => self.move_up(),
            NormalCommand::MoveDown => self.move_down(),
            NormalCommand::ToggleExpand => self.toggle_expand(),
            NormalCommand::Expand => self.set_expanded(true),
            NormalCommand::Collapse => self.set_expanded(false),
            NormalCommand::ExpandAll => self.expand_all(),
            NormalCommand::CollapseAll => self.collapse_all(),
            NormalCommand::OpenFilter => {
                self.filter_picker.open_at(0);
                self.mode = Mode::Filtering;
            }
            NormalCommand::OpenSort => {
                self.sort_picker.open_at(self.sort.index());
                self.mode = Mode::Sorting;
            }
            NormalCommand::StartSearch => self.start_search(),
            NormalCommand::NextMatch => self.next_match(),
            NormalCommand::PrevMatch => self.prev_match(),
            NormalCommand::ClearFilterOrSearch => self.clear_filter_or_search(),
            NormalCommand::HalfPageDown => self.scroll_by(self.half_page()),
            NormalCommand::HalfPageUp => self.scroll_by(-self.half_page()),
            NormalCommand::PageDown => self.scroll_by(self.full_page()),
            NormalCommand::PageUp => self.scroll_by(-self.full_page()),
            NormalCommand::TopPrefix => self.pending_g = true,
            NormalCommand::Top => self.goto_top(),
            NormalCommand::Bottom => self.goto_bottom(),
            NormalCommand::Apply => {
                if self.options.apply_enabled {
                    self.mode = Mode::ConfirmingApply;
                }
            }
            NormalCommand::ConfirmApply => {}
        }
        Effect::None
    }

    fn handle_filtering(&mut self, key: KeyInput) -> Effect {
        match key {
            KeyInput::Char('j') | KeyInput::Down => self.filter_picker.select_next(),
            KeyInput::Char('k') | KeyInput::Up => self.filter_picker.select_prev(),
            KeyInput::Char(' ') => {
                if let Some(&action) = Action::FILTERABLE.get(self.filter_picker.selected()) {
                    self.filter.toggle(action);
                    self.on_list_changed();
                }
            }
            KeyInput::Char('a') => {
                self.filter.enable_all();
                self.on_list_changed();
            }
            KeyInput::Char('c') => {
                self.filter.clear();
                self.on_list_changed();
            }
            KeyInput::Enter => self.mode = Mode::Normal,
            KeyInput::Esc => {
                self.filter.clear();
                self.on_list_changed();
                self.mode = Mode::Normal;
            }
            _ => {}
        }
        Effect::None
    }

    fn handle_sorting(&mut self, key: KeyInput) -> Effect {
        match key {
            KeyInput::Char('j') | KeyInput::Down => self.sort_picker.select_next(),
            KeyInput::Char('k') | KeyInput::Up => self.sort_picker.select_prev(),
            KeyInput::Enter | KeyInput::Char(' ') => {
                if let Some(&mode) = SortMode::ALL.get(self.sort_picker.selected()) {
                    self.sort = mode;
                    self.on_list_changed();
                }
                self.mode = Mode::Normal;
            }
            KeyInput::Esc => self.mode = Mode::Normal,
            _ => {}
        }
        Effect::None
    }

    fn handle_confirming(&mut self, key: KeyInput) -> Effect {
        self.mode = Mode::Normal;
        match key {
            KeyInput::Char('a' | 'y') => Effect::Apply,
            KeyInput::Esc => Effect::None,
            other => self.handle_normal(other),
        }
    }

    // ------------------------------------------------------------------------
    // Display computation
    // ------------------------------------------------------------------------

    /// Rebuild the displayed list from the filter, the sort order and the
    /// query. Called after any of the three changes.
    pub(super) fn recompute(&mut self) {
        let resources = &self.plan.resources;
        let mut base: Vec<usize> = (0..resources.len())
            .filter(|&i| self.filter.allows(resources[i].action))
            .collect();
        self.sort.apply(&mut base, resources);

        self.search.resolve(&base, resources);

        if self.options.narrow_search && self.search.is_active() {
            self.displayed = self.search.matches.iter().map(|&pos| base[pos]).collect();
            self.match_rows = (0..self.displayed.len()).collect();
        } else {
            self.displayed = base;
            self.match_rows = self.search.matches.clone();
        }
    }

    /// Filter or sort changed: rebuild and put the cursor somewhere sensible.
    pub(super) fn on_list_changed(&mut self) {
        self.recompute();
        if let Some(&first) = self.match_rows.first() {
            self.cursor = first;
        } else {
            self.clamp_cursor();
        }
        self.follow = Follow::Cursor;
    }

    pub(super) fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.displayed.len().saturating_sub(1));
    }

    /// Lay out the body and settle the viewport.
    pub(super) fn refresh(&mut self) {
        let input = BodyInput {
            plan: &self.plan,
            displayed: &self.displayed,
            expanded: &self.expanded,
            match_rows: &self.match_rows,
            query: &self.search.query,
            content: ContentOptions {
                context_lines: self.options.context_lines,
                decode_keys: &self.options.decode_keys,
                wrap: self.options.wrap,
                width: usize::from(self.width),
            },
        };
        self.layout = layout_body(&input, &self.theme);

        match std::mem::replace(&mut self.follow, Follow::None) {
            Follow::None => {}
            Follow::Cursor => self.ensure_cursor_visible(),
            Follow::Expanded => self.scroll_for_expanded(),
        }
        self.clamp_offset();
    }
}
