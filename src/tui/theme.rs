//! Theme and color scheme for the viewer.
//!
//! A [`Theme`] is picked once at startup and passed by reference to every
//! render function. Nothing here is global or mutable.

use crate::model::Action;
use ratatui::prelude::*;

/// Theme requested by the user, before background detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    /// Pick dark or light from the terminal background hint
    Auto,
    Dark,
    Light,
    HighContrast,
}

impl ThemeChoice {
    /// Accepted names, for help text and validation messages.
    pub const NAMES: [&'static str; 4] = ["auto", "dark", "light", "high-contrast"];

    /// Parse a theme name. Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "auto" | "" => Some(Self::Auto),
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            "high-contrast" | "highcontrast" | "hc" => Some(Self::HighContrast),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dark => "dark",
            Self::Light => "light",
            Self::HighContrast => "high-contrast",
        }
    }
}

/// Semantic colors used by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    // Action colors
    pub create: Color,
    pub destroy: Color,
    pub update: Color,
    pub replace: Color,
    pub read: Color,

    // UI element colors
    pub header: Color,
    pub text: Color,
    pub muted: Color,
    pub computed: Color,
    pub accent: Color,
    pub border: Color,
    pub warning: Color,

    // Backgrounds
    pub selection_bg: Color,
    pub match_bg: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorScheme {
    /// Dark palette (Catppuccin Mocha)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            create: Color::Rgb(0xa6, 0xe3, 0xa1),
            destroy: Color::Rgb(0xf3, 0x8b, 0xa8),
            update: Color::Rgb(0xf9, 0xe2, 0xaf),
            replace: Color::Rgb(0xcb, 0xa6, 0xf7),
            read: Color::Rgb(0x74, 0xc7, 0xec),

            header: Color::Rgb(0x89, 0xb4, 0xfa),
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            muted: Color::Rgb(0x7f, 0x84, 0x9c),
            computed: Color::Rgb(0x94, 0xe2, 0xd5),
            accent: Color::Rgb(0xf9, 0xe2, 0xaf),
            border: Color::Rgb(0x45, 0x47, 0x5a),
            warning: Color::Rgb(0xfa, 0xb3, 0x87),

            selection_bg: Color::Rgb(0x45, 0x47, 0x5a),
            match_bg: Color::Rgb(0x58, 0x4b, 0x2a),
        }
    }

    /// Light palette (Catppuccin Latte)
    #[must_use]
    pub const fn light() -> Self {
        Self {
            create: Color::Rgb(0x40, 0xa0, 0x2b),
            destroy: Color::Rgb(0xd2, 0x0f, 0x39),
            update: Color::Rgb(0xdf, 0x8e, 0x1d),
            replace: Color::Rgb(0x88, 0x39, 0xef),
            read: Color::Rgb(0x20, 0x9f, 0xb5),

            header: Color::Rgb(0x1e, 0x66, 0xf5),
            text: Color::Rgb(0x4c, 0x4f, 0x69),
            muted: Color::Rgb(0x8c, 0x8f, 0xa1),
            computed: Color::Rgb(0x17, 0x92, 0x99),
            accent: Color::Rgb(0xdf, 0x8e, 0x1d),
            border: Color::Rgb(0xbc, 0xc0, 0xcc),
            warning: Color::Rgb(0xfe, 0x64, 0x0b),

            selection_bg: Color::Rgb(0xbc, 0xc0, 0xcc),
            match_bg: Color::Rgb(0xf5, 0xe0, 0xb0),
        }
    }

    /// High contrast palette using the basic ANSI colors
    #[must_use]
    pub const fn high_contrast() -> Self {
        Self {
            create: Color::LightGreen,
            destroy: Color::LightRed,
            update: Color::LightYellow,
            replace: Color::LightMagenta,
            read: Color::LightCyan,

            header: Color::White,
            text: Color::White,
            muted: Color::Gray,
            computed: Color::Cyan,
            accent: Color::Yellow,
            border: Color::White,
            warning: Color::LightRed,

            selection_bg: Color::Blue,
            match_bg: Color::Magenta,
        }
    }

    /// Color for an action. The replacement variants share the replace color.
    #[must_use]
    pub const fn action_color(&self, action: Action) -> Color {
        match action {
            Action::Create => self.create,
            Action::Destroy => self.destroy,
            Action::Update => self.update,
            Action::Replace | Action::DeleteCreate | Action::CreateDelete => self.replace,
            Action::Read => self.read,
            Action::NoOp => self.muted,
        }
    }
}

/// Resolved theme passed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub colors: ColorScheme,
    pub name: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            colors: ColorScheme::dark(),
            name: "dark",
        }
    }

    #[must_use]
    pub const fn light() -> Self {
        Self {
            colors: ColorScheme::light(),
            name: "light",
        }
    }

    #[must_use]
    pub const fn high_contrast() -> Self {
        Self {
            colors: ColorScheme::high_contrast(),
            name: "high-contrast",
        }
    }

    /// Resolve a choice, reading the terminal background hint for `Auto`.
    #[must_use]
    pub fn resolve(choice: ThemeChoice) -> Self {
        let hint = std::env::var("COLORFGBG").ok();
        Self::resolve_with_hint(choice, hint.as_deref())
    }

    /// Resolve a choice against an explicit `COLORFGBG` value.
    #[must_use]
    pub fn resolve_with_hint(choice: ThemeChoice, colorfgbg: Option<&str>) -> Self {
        match choice {
            ThemeChoice::Dark => Self::dark(),
            ThemeChoice::Light => Self::light(),
            ThemeChoice::HighContrast => Self::high_contrast(),
            ThemeChoice::Auto => {
                if colorfgbg.is_some_and(is_light_background) {
                    Self::light()
                } else {
                    Self::dark()
                }
            }
        }
    }

    // Style helpers

    #[must_use]
    pub fn action(&self, action: Action) -> Style {
        Style::default().fg(self.colors.action_color(action))
    }

    #[must_use]
    pub fn header(&self) -> Style {
        Style::default().fg(self.colors.header).bold()
    }

    #[must_use]
    pub fn text(&self) -> Style {
        Style::default().fg(self.colors.text)
    }

    #[must_use]
    pub fn muted(&self) -> Style {
        Style::default().fg(self.colors.muted)
    }

    #[must_use]
    pub fn computed(&self) -> Style {
        Style::default().fg(self.colors.computed).italic()
    }

    #[must_use]
    pub fn selected(&self) -> Style {
        Style::default().bg(self.colors.selection_bg)
    }

    #[must_use]
    pub fn search_match(&self) -> Style {
        Style::default()
            .bg(self.colors.match_bg)
            .fg(self.colors.accent)
            .bold()
    }

    #[must_use]
    pub fn warning(&self) -> Style {
        Style::default().fg(self.colors.warning).bold()
    }

    #[must_use]
    pub fn border(&self) -> Style {
        Style::default().fg(self.colors.border)
    }

    #[must_use]
    pub fn shortcut_key(&self) -> Style {
        Style::default().fg(self.colors.accent)
    }

    #[must_use]
    pub fn shortcut_desc(&self) -> Style {
        Style::default().fg(self.colors.muted)
    }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); backgrounds 7 and 15
/// are the white entries of the ANSI palette.
fn is_light_background(colorfgbg: &str) -> bool {
    colorfgbg
        .rsplit(';')
        .next()
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg == 7 || bg == 15)
}

/// Render footer hints as spans.
#[must_use]
pub fn render_footer_hints(theme: &Theme, hints: &[(&str, &str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled((*key).to_string(), theme.shortcut_key()));
        spans.push(Span::styled(format!(" {desc}"), theme.shortcut_desc()));
    }

    spans
}
