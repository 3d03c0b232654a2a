//! Expanded resource bodies.
//!
//! Body lines are shown as written, colored by their own `+`/`-`/`~` marker
//! and word-wrapped to the viewport. Three patterns get a richer view:
//! encoded values under a decode key, a removed heredoc followed by an added
//! one, and a run of removed lines followed by a run of added lines.

use super::theme::Theme;
use crate::decode::try_decode;
use crate::diff::{compute_diff, context_diff, DiffLine, DiffOp};
use crate::model::Action;
use crate::utils::{display_width, wrap_text};
use ratatui::prelude::*;

/// Wrapping is skipped when less than this many columns remain for content.
const MIN_CONTENT_WIDTH: usize = 20;

/// Either side of a prefixed block must be at least this long to be diffed.
const MIN_BLOCK_LINES: usize = 3;

pub const DIFF_SEPARATOR: &str = "@@ ··· @@";

/// Rendering knobs taken from the display config.
#[derive(Debug, Clone, Copy)]
pub struct ContentOptions<'a> {
    pub context_lines: usize,
    pub decode_keys: &'a [String],
    pub wrap: bool,
    /// Viewport width in columns; 0 disables wrapping
    pub width: usize,
}

/// Render the body lines of an expanded resource.
#[must_use]
pub fn render_body(
    lines: &[String],
    action: Action,
    theme: &Theme,
    opts: &ContentOptions<'_>,
) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    let mut idx = 0;

    while idx < lines.len() {
        let line = &lines[idx];

        if let Some(decoded) = render_decoded(line, action, theme, opts) {
            out.extend(decoded);
            idx += 1;
            continue;
        }

        if let Some((consumed, rendered)) = render_block_diff(lines, idx, theme, opts) {
            out.extend(rendered);
            idx += consumed;
            continue;
        }

        out.extend(wrap_and_colorize(line, action, theme, opts));
        idx += 1;
    }

    out
}

// ============================================================================
// Line splitting and coloring
// ============================================================================

/// A body line split into indentation, change marker and content.
struct Parts<'a> {
    indent: &'a str,
    marker: Option<char>,
    content: &'a str,
}

impl<'a> Parts<'a> {
    fn split(line: &'a str) -> Self {
        let trimmed = line.trim_start_matches([' ', '\t']);
        let indent = &line[..line.len() - trimmed.len()];
        for (marker, prefix) in [('+', "+ "), ('-', "- "), ('~', "~ ")] {
            if let Some(rest) = trimmed.strip_prefix(prefix) {
                return Self {
                    indent,
                    marker: Some(marker),
                    content: rest,
                };
            }
        }
        Self {
            indent,
            marker: None,
            content: trimmed,
        }
    }

    /// Action implied by the marker, falling back to the resource's own.
    fn action(&self, fallback: Action) -> Action {
        match self.marker {
            Some('+') => Action::Create,
            Some('-') => Action::Destroy,
            Some('~') => Action::Update,
            _ => fallback,
        }
    }

    fn marker_str(&self) -> &'static str {
        match self.marker {
            Some('+') => "+ ",
            Some('-') => "- ",
            Some('~') => "~ ",
            _ => "  ",
        }
    }
}

fn colorize_line(line: &str, action: Action, theme: &Theme) -> Line<'static> {
    let parts = Parts::split(line);
    let line_action = parts.action(action);
    let mut spans = vec![Span::raw(parts.indent.to_string())];
    spans.push(Span::styled(
        parts.marker_str().to_string(),
        if parts.marker.is_some() {
            theme.action(line_action)
        } else {
            theme.text()
        },
    ));
    spans.extend(colorize_content(parts.content, line_action, theme));
    Line::from(spans)
}

fn colorize_content(content: &str, action: Action, theme: &Theme) -> Vec<Span<'static>> {
    if matches!(content, "" | "{" | "}" | "[" | "]" | "}," | "],") {
        return vec![Span::styled(content.to_string(), theme.muted())];
    }

    if let Some((key, value)) = content.split_once(" = ") {
        let mut spans = vec![
            Span::styled(key.to_string(), theme.text()),
            Span::raw(" = "),
        ];
        spans.extend(colorize_value(value, action, theme));
        return spans;
    }

    if let Some(block) = content.strip_suffix(" {") {
        return vec![
            Span::styled(block.to_string(), theme.header()),
            Span::raw(" {"),
        ];
    }

    vec![Span::styled(content.to_string(), theme.text())]
}

fn colorize_value(value: &str, action: Action, theme: &Theme) -> Vec<Span<'static>> {
    let value = value.trim();
    if value.contains("(known after apply)") {
        return vec![Span::styled(value.to_string(), theme.computed())];
    }
    if value.contains("(sensitive") {
        return vec![Span::styled(
            value.to_string(),
            theme.action(Action::Replace).italic(),
        )];
    }
    if let Some((old, new)) = value.split_once(" -> ") {
        return vec![
            Span::styled(old.trim().to_string(), theme.action(Action::Destroy)),
            Span::styled(" -> ".to_string(), theme.muted()),
            Span::styled(new.trim().to_string(), theme.action(Action::Create)),
        ];
    }
    vec![Span::styled(value.to_string(), theme.action(action))]
}

fn wrap_and_colorize(
    line: &str,
    action: Action,
    theme: &Theme,
    opts: &ContentOptions<'_>,
) -> Vec<Line<'static>> {
    if !opts.wrap || opts.width == 0 {
        return vec![colorize_line(line, action, theme)];
    }

    let parts = Parts::split(line);
    let prefix_width = display_width(parts.indent) + 2;
    let available = opts.width.saturating_sub(prefix_width);
    if available < MIN_CONTENT_WIDTH || display_width(parts.content) <= available {
        return vec![colorize_line(line, action, theme)];
    }

    let wrapped = wrap_text(parts.content, available);
    let line_action = parts.action(action);
    let continuation = " ".repeat(prefix_width);

    wrapped
        .iter()
        .enumerate()
        .map(|(i, sub)| {
            if i == 0 {
                colorize_line(&format!("{}{}{sub}", parts.indent, parts.marker_str()), action, theme)
            } else {
                let mut spans = vec![Span::raw(continuation.clone())];
                spans.extend(colorize_content(sub.trim(), line_action, theme));
                Line::from(spans)
            }
        })
        .collect()
}

// ============================================================================
// Diff output
// ============================================================================

fn render_diff_lines(
    diff: &[DiffLine],
    indent: &str,
    theme: &Theme,
    opts: &ContentOptions<'_>,
) -> Vec<Line<'static>> {
    let width = if opts.wrap {
        opts.width.saturating_sub(display_width(indent) + 4)
    } else {
        0
    };
    let mut out = Vec::new();

    for line in diff {
        let (prefix, style) = match line.op {
            DiffOp::Separator => {
                out.push(Line::from(vec![
                    Span::raw(indent.to_string()),
                    Span::styled(DIFF_SEPARATOR, theme.muted()),
                ]));
                continue;
            }
            DiffOp::Delete => ("- ", theme.action(Action::Destroy)),
            DiffOp::Insert => ("+ ", theme.action(Action::Create)),
            DiffOp::Equal => ("  ", theme.muted()),
        };
        for sub in wrap_text(&line.text, width) {
            out.push(Line::from(vec![
                Span::raw(indent.to_string()),
                Span::styled(format!("{prefix}{sub}"), style),
            ]));
        }
    }

    out
}

fn banner(indent: &str, text: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::raw(indent.to_string()),
        Span::styled(format!("┄┄┄ {text} ┄┄┄"), theme.muted()),
    ])
}

// ============================================================================
// Decoded values
// ============================================================================

fn render_decoded(
    line: &str,
    action: Action,
    theme: &Theme,
    opts: &ContentOptions<'_>,
) -> Option<Vec<Line<'static>>> {
    let parts = Parts::split(line);
    let (key, value) = parts.content.split_once(" = ")?;
    let key = key.trim().trim_matches('"');
    if !opts.decode_keys.iter().any(|k| k == key) {
        return None;
    }
    // Drop a trailing annotation such as `# forces replacement`.
    let value = value.split_once(" # ").map_or(value, |(v, _)| v).trim();
    let indent = format!("{}  ", parts.indent);

    let mut out = Vec::new();

    if let Some((old, new)) = value.split_once(" -> ") {
        let old = try_decode(old);
        let new = try_decode(new);
        if old.is_none() && new.is_none() {
            return None;
        }

        out.push(colorize_line(line, action, theme));
        out.push(banner(&indent, &format!("decoded {key}"), theme));

        match (old, new) {
            (Some(old), Some(new)) => {
                let old_lines: Vec<&str> = old.split('\n').collect();
                let new_lines: Vec<&str> = new.split('\n').collect();
                let diff = compute_diff(&old_lines, &new_lines);
                match context_diff(&diff, opts.context_lines) {
                    Some(ctx) => out.extend(render_diff_lines(&ctx, &indent, theme, opts)),
                    None => out.push(Line::from(vec![
                        Span::raw(indent.clone()),
                        Span::styled("  (no changes in decoded content)", theme.muted()),
                    ])),
                }
            }
            (old, new) => {
                let mut one_sided: Vec<DiffLine> = Vec::new();
                if let Some(old) = old {
                    one_sided.extend(old.split('\n').map(|l| DiffLine::new(DiffOp::Delete, l)));
                }
                if let Some(new) = new {
                    one_sided.extend(new.split('\n').map(|l| DiffLine::new(DiffOp::Insert, l)));
                }
                out.extend(render_diff_lines(&one_sided, &indent, theme, opts));
            }
        }

        out.push(banner(&indent, &format!("end {key}"), theme));
        return Some(out);
    }

    let decoded = try_decode(value)?;
    let style = match parts.action(action) {
        Action::Create => theme.action(Action::Create),
        Action::Destroy => theme.action(Action::Destroy),
        _ => theme.text(),
    };
    let width = if opts.wrap {
        opts.width.saturating_sub(display_width(&indent) + 2)
    } else {
        0
    };

    out.push(colorize_line(line, action, theme));
    out.push(banner(&indent, &format!("decoded {key}"), theme));
    for decoded_line in decoded.split('\n') {
        for sub in wrap_text(decoded_line, width) {
            out.push(Line::from(vec![
                Span::raw(indent.clone()),
                Span::styled(format!("  {sub}"), style),
            ]));
        }
    }
    out.push(banner(&indent, &format!("end {key}"), theme));
    Some(out)
}

// ============================================================================
// Block diffs
// ============================================================================

fn render_block_diff(
    lines: &[String],
    idx: usize,
    theme: &Theme,
    opts: &ContentOptions<'_>,
) -> Option<(usize, Vec<Line<'static>>)> {
    let parts = Parts::split(&lines[idx]);
    if parts.marker != Some('-') {
        return None;
    }
    if parts.content.trim_start().starts_with("<<") {
        render_heredoc_pair(lines, idx, theme, opts)
    } else {
        render_prefixed_block(lines, idx, theme, opts)
    }
}

fn heredoc_end_marker(opening: &str) -> &str {
    let s = opening.trim();
    let s = s.strip_prefix("<<-").or_else(|| s.strip_prefix("<<")).unwrap_or(s);
    s.trim()
}

/// Index just past the line closing a heredoc opened before `start`.
fn heredoc_close(lines: &[String], start: usize, end_marker: &str) -> usize {
    let mut idx = start;
    while idx < lines.len() {
        let t = lines[idx].trim();
        idx += 1;
        if t == end_marker || t.strip_suffix(',') == Some(end_marker) {
            break;
        }
    }
    idx
}

/// `- <<EOT ... EOT` followed by `+ <<EOT ... EOT`, content lines unprefixed.
fn render_heredoc_pair(
    lines: &[String],
    idx: usize,
    theme: &Theme,
    opts: &ContentOptions<'_>,
) -> Option<(usize, Vec<Line<'static>>)> {
    let opening = Parts::split(&lines[idx]);
    let end_marker = heredoc_end_marker(opening.content);
    if end_marker.is_empty() {
        return None;
    }

    let old_start = idx + 1;
    let old_end = heredoc_close(lines, old_start, end_marker);
    if old_end >= lines.len() {
        return None;
    }

    let mut add_idx = old_end;
    loop {
        let line = lines.get(add_idx)?;
        if line.trim().is_empty() {
            add_idx += 1;
            continue;
        }
        let parts = Parts::split(line);
        if parts.marker == Some('+') && parts.content.trim_start().starts_with("<<") {
            break;
        }
        return None;
    }

    let new_start = add_idx + 1;
    let new_end = heredoc_close(lines, new_start, end_marker);

    let old_content = heredoc_content(&lines[old_start..old_end - 1]);
    let new_content = heredoc_content(&lines[new_start..new_end.saturating_sub(1).max(new_start)]);
    if old_content.is_empty() && new_content.is_empty() {
        return None;
    }

    let diff = compute_diff(&old_content, &new_content);
    let ctx = context_diff(&diff, opts.context_lines)?;

    let mut out = vec![banner(opening.indent, "heredoc diff", theme)];
    out.extend(render_diff_lines(&ctx, opening.indent, theme, opts));
    out.push(banner(opening.indent, "end heredoc diff", theme));
    Some((new_end - idx, out))
}

fn heredoc_content(lines: &[String]) -> Vec<&str> {
    lines.iter().map(|l| l.trim_end_matches([' ', '\t'])).collect()
}

/// A run of `- ` lines followed by a run of `+ ` lines.
fn render_prefixed_block(
    lines: &[String],
    idx: usize,
    theme: &Theme,
    opts: &ContentOptions<'_>,
) -> Option<(usize, Vec<Line<'static>>)> {
    let run = |from: usize, marker: char| -> Vec<&str> {
        lines[from..]
            .iter()
            .map(|l| Parts::split(l))
            .take_while(|p| p.marker == Some(marker))
            .map(|p| p.content)
            .collect()
    };

    let old_content = run(idx, '-');
    let new_content = run(idx + old_content.len(), '+');
    if old_content.is_empty() || new_content.is_empty() {
        return None;
    }
    if old_content.len() < MIN_BLOCK_LINES && new_content.len() < MIN_BLOCK_LINES {
        return None;
    }

    let diff = compute_diff(&old_content, &new_content);
    let ctx = context_diff(&diff, opts.context_lines)?;

    let indent = Parts::split(&lines[idx]).indent;
    Some((
        old_content.len() + new_content.len(),
        render_diff_lines(&ctx, indent, theme, opts),
    ))
}
