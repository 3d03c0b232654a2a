//! Terminal setup, the event loop and frame rendering.

use super::app::{Effect, Mode, StatusItem, ViewerApp, FOOTER_HEIGHT, HEADER_HEIGHT};
use super::events::{Event, EventHandler};
use super::render::selected_line;
use super::theme::{render_footer_hints, Theme};
use super::widgets::{render_filter_picker, render_sort_picker};
use crate::error::{PlanscopeError, Result};
use crate::model::Action;
use crate::utils::truncate;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use std::io::{self, stdout, Stdout};
use std::sync::mpsc;
use std::time::Duration;

/// Terminal behavior for one viewer session.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub mouse: bool,
    pub tick_rate: Duration,
}

/// How the session ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerOutcome {
    /// The user confirmed the apply prompt
    pub apply_requested: bool,
}

/// Run the viewer until the user quits or confirms apply.
///
/// `updates` may deliver one newer version string; a result that arrives
/// after the viewer exits is dropped with the receiver.
pub fn run_viewer(
    app: &mut ViewerApp,
    options: RunOptions,
    updates: Option<mpsc::Receiver<String>>,
) -> Result<ViewerOutcome> {
    enable_raw_mode().map_err(|e| PlanscopeError::terminal("enabling raw mode", e))?;
    let mut out = stdout();
    let setup = if options.mouse {
        execute!(out, EnterAlternateScreen, EnableMouseCapture)
    } else {
        execute!(out, EnterAlternateScreen)
    };
    if let Err(e) = setup {
        let _ = disable_raw_mode();
        return Err(PlanscopeError::terminal("entering alternate screen", e));
    }

    let mut terminal = match Terminal::new(CrosstermBackend::new(out)) {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = restore(None, options.mouse);
            return Err(PlanscopeError::terminal("creating terminal", e));
        }
    };

    let result = event_loop(&mut terminal, app, options, updates);
    let restored = restore(Some(&mut terminal), options.mouse);

    let outcome = result.map_err(|e| PlanscopeError::terminal("running viewer", e))?;
    restored.map_err(|e| PlanscopeError::terminal("restoring terminal", e))?;
    Ok(outcome)
}

fn restore(terminal: Option<&mut Terminal<CrosstermBackend<Stdout>>>, mouse: bool) -> io::Result<()> {
    disable_raw_mode()?;
    let mut out = stdout();
    if mouse {
        execute!(out, LeaveAlternateScreen, DisableMouseCapture)?;
    } else {
        execute!(out, LeaveAlternateScreen)?;
    }
    if let Some(terminal) = terminal {
        terminal.show_cursor()?;
    }
    Ok(())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut ViewerApp,
    options: RunOptions,
    mut updates: Option<mpsc::Receiver<String>>,
) -> io::Result<ViewerOutcome> {
    let size = terminal.size()?;
    app.handle_event(super::keys::ViewerEvent::Resize {
        width: size.width,
        height: size.height,
    });

    let events = EventHandler::new(options.tick_rate);

    loop {
        terminal.draw(|frame| render(frame, app))?;

        let event = match events.next()? {
            Event::Input(event) => event,
            Event::Tick => {
                poll_update(&mut updates, app);
                continue;
            }
        };

        match app.handle_event(event) {
            Effect::None => {}
            Effect::Quit => {
                tracing::debug!("viewer quit");
                return Ok(ViewerOutcome::default());
            }
            Effect::Apply => {
                tracing::info!("apply confirmed in viewer");
                return Ok(ViewerOutcome {
                    apply_requested: true,
                });
            }
        }
    }
}

fn poll_update(updates: &mut Option<mpsc::Receiver<String>>, app: &mut ViewerApp) {
    let Some(rx) = updates else {
        return;
    };
    match rx.try_recv() {
        Ok(version) => {
            tracing::debug!(%version, "update notice received");
            app.set_update_notice(version);
            *updates = None;
        }
        Err(mpsc::TryRecvError::Disconnected) => *updates = None,
        Err(mpsc::TryRecvError::Empty) => {}
    }
}

// ============================================================================
// Frame rendering
// ============================================================================

/// Draw one frame.
pub fn render(frame: &mut Frame, app: &ViewerApp) {
    let area = frame.area();
    let status = app.status_items();
    let status_height = u16::try_from(status.len()).unwrap_or(u16::MAX);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(status_height),
            Constraint::Min(1),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_status(frame, chunks[1], app.theme(), &status);
    render_list(frame, chunks[2], app);
    render_footer(frame, chunks[3], app);

    match app.mode() {
        Mode::Filtering => render_filter_picker(frame, area, app),
        Mode::Sorting => render_sort_picker(frame, area, app),
        _ => {}
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &ViewerApp) {
    let theme = app.theme();
    let plan = app.plan();

    let mut spans = vec![Span::styled(" planscope ", theme.header())];
    if plan.has_summary() {
        for (count, label, action) in [
            (plan.total_add, "to add", Action::Create),
            (plan.total_change, "to change", Action::Update),
            (plan.total_destroy, "to destroy", Action::Destroy),
        ] {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!("{count} {label}"), theme.action(action)));
        }
    } else {
        let room = usize::from(area.width).saturating_sub(13);
        spans.push(Span::styled(
            format!("  {}", truncate(&plan.headline(), room)),
            theme.text(),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme.border()),
    );
    frame.render_widget(header, area);
}

fn render_status(frame: &mut Frame, area: Rect, theme: &Theme, items: &[StatusItem]) {
    let lines: Vec<Line<'static>> = items.iter().map(|item| status_line(item, theme)).collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn status_line(item: &StatusItem, theme: &Theme) -> Line<'static> {
    match item {
        StatusItem::Filter(labels) => Line::from(vec![
            Span::styled(" Filter: ", theme.muted()),
            Span::styled(labels.join(", "), theme.text()),
        ]),
        StatusItem::Sort(mode) => Line::from(vec![
            Span::styled(" Sort: ", theme.muted()),
            Span::styled(mode.label(), theme.text()),
        ]),
        StatusItem::SearchInput(input) => Line::from(vec![
            Span::styled(" /", theme.shortcut_key()),
            Span::styled(input.clone(), theme.text()),
            Span::styled("█", theme.muted()),
        ]),
        StatusItem::SearchInfo {
            query,
            current,
            total,
        } => {
            let position = if *total == 0 {
                "no matches".to_string()
            } else {
                format!("{}/{total}", current + 1)
            };
            Line::from(vec![
                Span::styled(" Search: ", theme.muted()),
                Span::styled(query.clone(), theme.text()),
                Span::styled(format!(" ({position})"), theme.muted()),
            ])
        }
        StatusItem::ConfirmApply => Line::from(Span::styled(
            " Apply this plan? Press 'a' or 'y' to confirm, any other key to cancel.",
            theme.warning(),
        )),
        StatusItem::Update(version) => Line::from(Span::styled(
            format!(" A newer release is available: {version}"),
            theme.muted(),
        )),
    }
}

fn render_list(frame: &mut Frame, area: Rect, app: &ViewerApp) {
    let layout = app.layout();
    let height = usize::from(area.height);
    let cursor_line = layout.row_starts.get(app.cursor()).copied();

    let lines: Vec<Line<'static>> = layout
        .lines
        .iter()
        .enumerate()
        .skip(app.offset())
        .take(height)
        .map(|(i, line)| {
            if Some(i) == cursor_line {
                selected_line(line, usize::from(area.width), app.theme())
            } else {
                line.clone()
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &ViewerApp) {
    let hints: &[(&str, &str)] = match app.mode() {
        Mode::Normal => {
            if app.can_apply() {
                &[
                    ("j/k", "move"),
                    ("enter", "expand"),
                    ("/", "search"),
                    ("f", "filter"),
                    ("s", "sort"),
                    ("a", "apply"),
                    ("q", "quit"),
                ]
            } else {
                &[
                    ("j/k", "move"),
                    ("enter", "expand"),
                    ("e/c", "all"),
                    ("/", "search"),
                    ("n/N", "match"),
                    ("f", "filter"),
                    ("s", "sort"),
                    ("q", "quit"),
                ]
            }
        }
        Mode::Searching => &[("enter", "keep"), ("esc", "clear")],
        Mode::Filtering => &[("space", "toggle"), ("enter", "close"), ("esc", "reset")],
        Mode::Sorting => &[("enter", "select"), ("esc", "cancel")],
        Mode::ConfirmingApply => &[("a/y", "confirm"), ("esc", "cancel")],
    };

    frame.render_widget(
        Paragraph::new(Line::from(render_footer_hints(app.theme(), hints))),
        area,
    );
}
