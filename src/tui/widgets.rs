//! Popup widgets for the filter and sort pickers.

use super::app::ViewerApp;
use super::state::ListNavigation;
use super::theme::{render_footer_hints, Theme};
use super::sort::SortMode;
use crate::model::Action;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Rectangle of at most `width` x `height` centered in `area`.
#[must_use]
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Render a bordered popup sized to its content.
pub fn render_popup(frame: &mut Frame, area: Rect, title: &str, content: Vec<Line<'static>>, theme: &Theme) {
    let inner_width = content.iter().map(Line::width).max().unwrap_or(0);
    let width = u16::try_from(inner_width + 4).unwrap_or(u16::MAX).max(24);
    let height = u16::try_from(content.len() + 2).unwrap_or(u16::MAX);
    let popup_area = centered_rect(width, height, area);
    frame.render_widget(Clear, popup_area);

    let popup = Paragraph::new(content).block(
        Block::default()
            .title(format!(" {title} "))
            .title_style(theme.header())
            .borders(Borders::ALL)
            .border_style(theme.border()),
    );

    frame.render_widget(popup, popup_area);
}

fn cursor_marker(selected: bool, theme: &Theme) -> Span<'static> {
    if selected {
        Span::styled("› ", theme.shortcut_key())
    } else {
        Span::raw("  ")
    }
}

/// Filter picker: one checkbox per filterable action.
pub fn render_filter_picker(frame: &mut Frame, area: Rect, app: &ViewerApp) {
    let theme = app.theme();
    let selected = app.filter_picker().selected();

    let mut lines: Vec<Line<'static>> = Action::FILTERABLE
        .iter()
        .enumerate()
        .map(|(i, &action)| {
            let check = if app.filter().is_enabled(action) {
                "[x]"
            } else {
                "[ ]"
            };
            let mut style = theme.action(action);
            if i == selected {
                style = style.patch(theme.selected());
            }
            Line::from(vec![
                cursor_marker(i == selected, theme),
                Span::styled(format!("{check} {} {}", action.glyph(), action.label()), style),
            ])
        })
        .collect();

    lines.push(Line::default());
    lines.push(Line::from(render_footer_hints(
        theme,
        &[("space", "toggle"), ("a", "all"), ("c", "clear"), ("enter", "done")],
    )));

    render_popup(frame, area, "Filter by action", lines, theme);
}

/// Sort picker: radio list of sort orders.
pub fn render_sort_picker(frame: &mut Frame, area: Rect, app: &ViewerApp) {
    let theme = app.theme();
    let selected = app.sort_picker().selected();

    let mut lines: Vec<Line<'static>> = SortMode::ALL
        .iter()
        .enumerate()
        .map(|(i, &mode)| {
            let radio = if app.sort() == mode { "(•)" } else { "( )" };
            let mut style = theme.text();
            if i == selected {
                style = style.patch(theme.selected());
            }
            Line::from(vec![
                cursor_marker(i == selected, theme),
                Span::styled(format!("{radio} {}", mode.label()), style),
            ])
        })
        .collect();

    lines.push(Line::default());
    lines.push(Line::from(render_footer_hints(
        theme,
        &[("enter", "select"), ("esc", "cancel")],
    )));

    render_popup(frame, area, "Sort by", lines, theme);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(20, 10, area), Rect::new(40, 15, 20, 10));

        let small = Rect::new(0, 0, 10, 5);
        let rect = centered_rect(20, 10, small);
        assert_eq!((rect.width, rect.height), (10, 5));
    }
}
