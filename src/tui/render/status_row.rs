use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::session::Mode;
use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

const NORMAL_HINTS: &str = "n: new  space: toggle  d: delete  p: priority  w: save  a: archive  q: quit";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = (area.width as usize).saturating_sub(1);

    let line = if let Some(ref message) = app.status_message {
        let color = if message.starts_with("error:") {
            app.theme.red
        } else {
            app.theme.green
        };
        Line::from(Span::styled(
            format!(" {}", truncate_to_width(message, width)),
            Style::default().fg(color).bg(bg),
        ))
    } else if app.show_key_hints && app.session.mode() == Mode::Normal {
        Line::from(Span::styled(
            format!(" {}", truncate_to_width(NORMAL_HINTS, width)),
            Style::default().fg(app.theme.dim).bg(bg),
        ))
    } else {
        Line::from(Span::styled(" ".repeat(area.width as usize), Style::default().bg(bg)))
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
