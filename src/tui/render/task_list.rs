use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::session::TaskRow;
use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the task list, scrolled so the selected row is visible
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let rows = app.session.rows();

    if rows.is_empty() {
        let empty = Paragraph::new(" No tasks. Press n to add one.")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        app.scroll_offset = 0;
        return;
    }

    let visible_height = (area.height as usize).max(1);
    let scroll = scroll_to_selection(
        app.scroll_offset,
        app.session.selection(),
        visible_height,
        rows.len(),
    );

    let width = area.width as usize;
    let lines: Vec<Line> = rows
        .iter()
        .skip(scroll)
        .take(visible_height)
        .map(|row| task_line(row, &app.theme, width))
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);

    app.scroll_offset = scroll;
}

/// Adjust the scroll offset so `selection` falls inside the window
fn scroll_to_selection(
    scroll: usize,
    selection: Option<usize>,
    visible_height: usize,
    total: usize,
) -> usize {
    let max_scroll = total.saturating_sub(visible_height);
    let scroll = scroll.min(max_scroll);
    match selection {
        Some(sel) if sel < scroll => sel,
        Some(sel) if sel >= scroll + visible_height => sel + 1 - visible_height,
        _ => scroll,
    }
}

/// One list row: `> ✓ 🚨 text`
fn task_line<'a>(row: &TaskRow<'a>, theme: &Theme, width: usize) -> Line<'a> {
    let bg = if row.selected {
        theme.selection_bg
    } else {
        theme.background
    };

    let mut spans: Vec<Span> = Vec::new();

    let marker = if row.selected { " > " } else { "   " };
    spans.push(Span::styled(
        marker,
        Style::default().fg(theme.highlight).bg(bg),
    ));

    let checkbox_color = if row.done { theme.green } else { theme.dim };
    spans.push(Span::styled(
        format!("{} ", row.checkbox),
        Style::default().fg(checkbox_color).bg(bg),
    ));

    if !row.priority_glyph.is_empty() {
        spans.push(Span::styled(
            format!("{} ", row.priority_glyph),
            Style::default().fg(theme.priority_color(row.priority)).bg(bg),
        ));
    }

    let mut text_style = if row.done {
        Style::default()
            .fg(theme.dim)
            .bg(bg)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(theme.text).bg(bg)
    };
    if row.selected {
        text_style = text_style.add_modifier(Modifier::BOLD);
        if !row.done {
            text_style = text_style.fg(theme.text_bright);
        }
    }

    let prefix_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let text = truncate_to_width(row.text, width.saturating_sub(prefix_width));
    spans.push(Span::styled(text, text_style));

    // Pad cursor line
    if row.selected {
        let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        if content_width < width {
            spans.push(Span::styled(
                " ".repeat(width - content_width),
                Style::default().bg(bg),
            ));
        }
    }

    Line::from(spans)
}
