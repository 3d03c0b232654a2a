//! Terminal input mapped to viewer events.
//!
//! The state machine never sees crossterm types; it works on [`KeyInput`]
//! and [`ViewerEvent`], so transitions can be driven from tests.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

/// A key press, reduced to what the viewer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    /// A letter pressed with Ctrl held
    Ctrl(char),
    Enter,
    Esc,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Tab,
}

impl KeyInput {
    /// Convert a crossterm key event. Releases and unmapped keys yield `None`.
    #[must_use]
    pub fn from_event(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let input = match key.code {
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Self::Ctrl(c.to_ascii_lowercase())
            }
            KeyCode::Char(c) => Self::Char(c),
            KeyCode::Enter => Self::Enter,
            KeyCode::Esc => Self::Esc,
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Up => Self::Up,
            KeyCode::Down => Self::Down,
            KeyCode::Left => Self::Left,
            KeyCode::Right => Self::Right,
            KeyCode::PageUp => Self::PageUp,
            KeyCode::PageDown => Self::PageDown,
            KeyCode::Home => Self::Home,
            KeyCode::End => Self::End,
            KeyCode::Tab => Self::Tab,
            _ => return None,
        };
        Some(input)
    }
}

/// Everything the state machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    Key(KeyInput),
    ScrollUp,
    ScrollDown,
    Resize { width: u16, height: u16 },
}

impl ViewerEvent {
    /// Convert a mouse event; only wheel movement is used.
    #[must_use]
    pub fn from_mouse(mouse: MouseEvent) -> Option<Self> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Self::ScrollUp),
            MouseEventKind::ScrollDown => Some(Self::ScrollDown),
            _ => None,
        }
    }
}

impl From<KeyInput> for ViewerEvent {
    fn from(key: KeyInput) -> Self {
        Self::Key(key)
    }
}

/// Normal-mode commands, looked up from a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalCommand {
    Quit,
    MoveUp,
    MoveDown,
    ToggleExpand,
    Expand,
    Collapse,
    ExpandAll,
    CollapseAll,
    OpenFilter,
    OpenSort,
    StartSearch,
    NextMatch,
    PrevMatch,
    ClearFilterOrSearch,
    HalfPageDown,
    HalfPageUp,
    PageDown,
    PageUp,
    /// First `g` of `g g`
    TopPrefix,
    Top,
    Bottom,
    Apply,
    ConfirmApply,
}

impl NormalCommand {
    #[must_use]
    pub fn from_key(key: KeyInput) -> Option<Self> {
        use KeyInput as K;
        let command = match key {
            K::Char('q') | K::Ctrl('c') => Self::Quit,
            K::Char('k') | K::Up => Self::MoveUp,
            K::Char('j') | K::Down => Self::MoveDown,
            K::Enter | K::Char(' ') => Self::ToggleExpand,
            K::Char('l') | K::Right => Self::Expand,
            K::Char('h') | K::Left | K::Backspace => Self::Collapse,
            K::Char('e') => Self::ExpandAll,
            K::Char('c') => Self::CollapseAll,
            K::Char('f') => Self::OpenFilter,
            K::Char('s') => Self::OpenSort,
            K::Char('/') => Self::StartSearch,
            K::Char('n') => Self::NextMatch,
            K::Char('N') => Self::PrevMatch,
            K::Esc => Self::ClearFilterOrSearch,
            K::Char('d') | K::Ctrl('d') => Self::HalfPageDown,
            K::Char('u') | K::Ctrl('u') => Self::HalfPageUp,
            K::PageDown => Self::PageDown,
            K::PageUp => Self::PageUp,
            K::Char('g') => Self::TopPrefix,
            K::Home => Self::Top,
            K::Char('G') | K::End => Self::Bottom,
            K::Char('a') => Self::Apply,
            K::Char('y') => Self::ConfirmApply,
            _ => return None,
        };
        Some(command)
    }
}
