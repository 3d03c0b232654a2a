//! Body layout for the resource list.
//!
//! The whole list is rendered into owned lines once per event, together with
//! the line each displayed resource starts on. Scrolling then only picks a
//! window of those lines.

use super::content::{render_body, ContentOptions};
use super::search::match_positions;
use super::theme::Theme;
use crate::model::{Plan, Resource};
use ratatui::prelude::*;
use std::collections::{BTreeSet, HashSet};

pub const EMPTY_MESSAGE: &str = "No resources match the current filters. Press 'f' to change filters.";
pub const END_MARKER: &str = "── End of Plan ──";

const EXPANDED_MARKER: &str = "▼";
const COLLAPSED_MARKER: &str = "▶";

/// Rendered list body.
#[derive(Debug, Clone, Default)]
pub struct BodyLayout {
    pub lines: Vec<Line<'static>>,
    /// First line of each displayed resource
    pub row_starts: Vec<usize>,
    /// Lines used by resources, before the end marker
    pub content_len: usize,
}

impl BodyLayout {
    /// Line just past the block of the resource at `row`.
    #[must_use]
    pub fn row_end(&self, row: usize) -> usize {
        self.row_starts
            .get(row + 1)
            .copied()
            .unwrap_or(self.content_len)
    }
}

/// What the list shows and how it highlights it.
pub struct BodyInput<'a> {
    pub plan: &'a Plan,
    /// Resource indices in display order
    pub displayed: &'a [usize],
    pub expanded: &'a HashSet<usize>,
    /// Display rows that match the active query
    pub match_rows: &'a [usize],
    pub query: &'a str,
    pub content: ContentOptions<'a>,
}

#[must_use]
pub fn layout_body(input: &BodyInput<'_>, theme: &Theme) -> BodyLayout {
    let mut layout = BodyLayout::default();

    if input.displayed.is_empty() {
        layout
            .lines
            .push(Line::styled(EMPTY_MESSAGE, theme.muted()));
        return layout;
    }

    let matches: HashSet<usize> = input.match_rows.iter().copied().collect();

    for (row, &idx) in input.displayed.iter().enumerate() {
        let resource = &input.plan.resources[idx];
        let expanded = input.expanded.contains(&idx);
        let query = if matches.contains(&row) {
            input.query
        } else {
            ""
        };

        layout.row_starts.push(layout.lines.len());
        layout
            .lines
            .push(resource_header(resource, expanded, query, theme));

        if expanded && !resource.body_lines().is_empty() {
            layout.lines.extend(render_body(
                resource.body_lines(),
                resource.action,
                theme,
                &input.content,
            ));
            layout.lines.push(Line::default());
        }
    }

    layout.content_len = layout.lines.len();
    layout.lines.push(Line::default());
    layout.lines.push(Line::styled(END_MARKER, theme.muted()));
    layout
}

/// Header line: marker, glyph, address, description, body line count.
#[must_use]
pub fn resource_header(
    resource: &Resource,
    expanded: bool,
    query: &str,
    theme: &Theme,
) -> Line<'static> {
    let marker = if expanded {
        EXPANDED_MARKER
    } else {
        COLLAPSED_MARKER
    };
    let action_style = theme.action(resource.action);

    let mut spans = vec![
        Span::styled(format!("{marker} "), theme.muted()),
        Span::styled(format!("{} ", resource.action.glyph()), action_style),
    ];
    spans.extend(highlight(&resource.address, query, action_style, theme));
    spans.push(Span::styled(
        format!(" {}", resource.action.description()),
        theme.muted(),
    ));

    let body = resource.body_lines().len();
    if body > 0 {
        spans.push(Span::styled(format!(" ({body} lines)"), theme.muted()));
    }

    Line::from(spans)
}

/// Split `text` into spans, marking the characters each query term matched.
fn highlight(text: &str, query: &str, base: Style, theme: &Theme) -> Vec<Span<'static>> {
    let hits: BTreeSet<usize> = query
        .split_whitespace()
        .filter_map(|term| match_positions(text, term))
        .flatten()
        .collect();
    if hits.is_empty() {
        return vec![Span::styled(text.to_string(), base)];
    }

    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_hit = false;
    for (pos, c) in text.chars().enumerate() {
        let hit = hits.contains(&pos);
        if hit != run_hit && !run.is_empty() {
            let style = if run_hit { theme.search_match() } else { base };
            spans.push(Span::styled(std::mem::take(&mut run), style));
        }
        run_hit = hit;
        run.push(c);
    }
    if !run.is_empty() {
        let style = if run_hit { theme.search_match() } else { base };
        spans.push(Span::styled(run, style));
    }
    spans
}

/// The cursor row: selection background across the full width, bold text.
#[must_use]
pub fn selected_line(line: &Line<'static>, width: usize, theme: &Theme) -> Line<'static> {
    let selected = theme.selected();
    let mut spans: Vec<Span<'static>> = line
        .spans
        .iter()
        .map(|s| Span::styled(s.content.clone(), s.style.patch(selected).bold()))
        .collect();
    let used = line.width();
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), selected));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Action;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn plan() -> Plan {
        let mut a = Resource::new("aws_instance.web", Action::Create);
        a.raw_lines = vec![
            "  # aws_instance.web will be created".to_string(),
            "  + resource \"aws_instance\" \"web\" {".to_string(),
            "      + ami = \"ami-1\"".to_string(),
            "    }".to_string(),
        ];
        let mut b = Resource::new("aws_s3_bucket.logs", Action::Destroy);
        b.raw_lines = vec!["  # aws_s3_bucket.logs will be destroyed".to_string()];
        Plan {
            resources: vec![a, b],
            ..Plan::default()
        }
    }

    fn opts(keys: &[String]) -> ContentOptions<'_> {
        ContentOptions {
            context_lines: 3,
            decode_keys: keys,
            wrap: false,
            width: 0,
        }
    }

    #[test]
    fn test_header_line() {
        let plan = plan();
        let line = resource_header(&plan.resources[0], false, "", &Theme::dark());
        assert_eq!(
            line_text(&line),
            "▶ + aws_instance.web will be created (3 lines)"
        );
        let line = resource_header(&plan.resources[1], true, "", &Theme::dark());
        assert_eq!(line_text(&line), "▼ - aws_s3_bucket.logs will be destroyed");
    }

    #[test]
    fn test_row_starts_account_for_expansion() {
        let plan = plan();
        let keys = Vec::new();
        let expanded: HashSet<usize> = [0].into_iter().collect();
        let input = BodyInput {
            plan: &plan,
            displayed: &[0, 1],
            expanded: &expanded,
            match_rows: &[],
            query: "",
            content: opts(&keys),
        };
        let layout = layout_body(&input, &Theme::dark());
        // header, 3 body lines, spacer
        assert_eq!(layout.row_starts, vec![0, 5]);
        assert_eq!(layout.content_len, 6);
        assert_eq!(layout.row_end(0), 5);
        assert_eq!(layout.row_end(1), 6);
        assert_eq!(
            layout.lines.last().map(line_text).as_deref(),
            Some(END_MARKER)
        );
    }

    #[test]
    fn test_empty_display() {
        let plan = plan();
        let keys = Vec::new();
        let expanded = HashSet::new();
        let input = BodyInput {
            plan: &plan,
            displayed: &[],
            expanded: &expanded,
            match_rows: &[],
            query: "",
            content: opts(&keys),
        };
        let layout = layout_body(&input, &Theme::dark());
        assert!(layout.row_starts.is_empty());
        assert_eq!(line_text(&layout.lines[0]), EMPTY_MESSAGE);
    }

    #[test]
    fn test_highlight_splits_runs() {
        let theme = Theme::dark();
        let spans = highlight("aws_instance", "inst", Style::default(), &theme);
        let parts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["aws_", "inst", "ance"]);
        assert_eq!(spans[1].style, theme.search_match());
    }

    #[test]
    fn test_selected_line_padded() {
        let theme = Theme::dark();
        let line = Line::from("abc");
        let selected = selected_line(&line, 10, &theme);
        assert_eq!(selected.width(), 10);
    }
}
