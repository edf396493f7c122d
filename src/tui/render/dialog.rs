use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};

const DIALOG_WIDTH: u16 = 60;

/// Render the modal dialog for the current mode, centered over `area`
pub fn render_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let Some(prompt) = app.session.prompt() else {
        return;
    };

    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor_style = Style::default().fg(app.theme.highlight).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let popup_w = DIALOG_WIDTH.min(area.width.saturating_sub(2));
    // Border plus one column of indent on each side
    let inner_w = (popup_w as usize).saturating_sub(4);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!(" {}", truncate_to_width(prompt.title, inner_w)),
        header_style,
    )));
    lines.push(Line::from(""));

    if prompt.has_input {
        let (before, after) = visible_input(
            app.session.input(),
            app.session.input_cursor(),
            inner_w.saturating_sub(1),
        );
        lines.push(Line::from(vec![
            Span::styled(" ", text_style),
            Span::styled(before, text_style),
            Span::styled("\u{258C}", cursor_style),
            Span::styled(after, text_style),
        ]));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        format!(" {}", truncate_to_width(prompt.hints, inner_w)),
        dim_style,
    )));

    let popup_h = ((lines.len() as u16) + 2).min(area.height);
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

/// Split the input around the cursor, dropping leading text so the cursor
/// stays within `width` columns.
fn visible_input(input: &str, cursor: usize, width: usize) -> (String, String) {
    let cursor = cursor.min(input.len());
    let (before, after) = input.split_at(cursor);

    let mut start = 0;
    for (i, _) in before.char_indices() {
        start = i;
        if display_width(&before[i..]) <= width {
            break;
        }
    }
    let before = if display_width(before) <= width {
        before
    } else {
        &before[start..]
    };

    let remaining = width.saturating_sub(display_width(before));
    (before.to_string(), truncate_to_width(after, remaining))
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
