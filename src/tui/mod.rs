//! Interactive plan viewer built on ratatui.
//!
//! The viewer is a state machine ([`ViewerApp`]) driven by [`ViewerEvent`]s.
//! Terminal events are mapped to those on a background thread and fed to
//! [`ViewerApp::handle_event`], which returns an [`Effect`] telling the run
//! loop whether to keep going, quit, or hand off to apply. Because the state
//! machine never touches the terminal, every transition can be exercised in
//! tests:
//!
//! ```
//! use planscope::parsers::parse_plan;
//! use planscope::tui::{Effect, KeyInput, Theme, ViewerApp, ViewerEvent, ViewerOptions};
//!
//! let plan = parse_plan("  # aws_instance.web will be created\n");
//! let mut app = ViewerApp::new(plan, Theme::dark(), ViewerOptions::default());
//! assert_eq!(app.handle_event(ViewerEvent::Key(KeyInput::Char('q'))), Effect::Quit);
//! ```
//!
//! # Modes
//!
//! Exactly one [`Mode`] is active. Esc always returns to normal mode and
//! clears whatever the active mode was editing; Ctrl+C quits from any mode.

mod app;
mod app_impl_nav;
mod app_impl_search;
mod content;
mod events;
mod filter;
mod keys;
mod render;
mod search;
mod sort;
pub mod state;
pub mod theme;
mod ui;
mod widgets;

pub use app::{Effect, Mode, StatusItem, ViewerApp, ViewerOptions};
pub use content::DIFF_SEPARATOR;
pub use filter::StatusFilter;
pub use keys::{KeyInput, NormalCommand, ViewerEvent};
pub use render::{BodyLayout, EMPTY_MESSAGE, END_MARKER};
pub use search::{fuzzy_match, matches_resource, SearchState};
pub use sort::SortMode;
pub use theme::{ColorScheme, Theme, ThemeChoice};
pub use ui::{render, run_viewer, RunOptions, ViewerOutcome};
