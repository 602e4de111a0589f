// Notification popup
//
// Shows the connection picked by the last click. Drawn over the viewport;
// it never blocks input and goes away on its own.

use crate::app::Notification;
use crate::theme::{status_color, MUTED_GRAY, TEXT_WHITE};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const POPUP_WIDTH: u16 = 44;
const POPUP_HEIGHT: u16 = 8;

/// Rectangle of at most `width` x `height` centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn notification_lines(notification: &Notification) -> Vec<Line<'static>> {
    let record = &notification.record;
    let label = Style::default().fg(MUTED_GRAY);
    let value = Style::default().fg(TEXT_WHITE).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Status:     ", label),
            Span::styled(
                record.status.clone(),
                Style::default()
                    .fg(status_color(&record.status))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Local IP:   ", label),
            Span::styled(record.local_address.clone(), value),
        ]),
        Line::from(vec![
            Span::styled("Local Port: ", label),
            Span::styled(record.local_port.to_string(), value),
        ]),
    ];

    if !record.extra.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("+{} more field(s)", record.extra.len()),
            label,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("any key or click to close", label)));
    lines
}

pub fn render_notification(f: &mut Frame, area: Rect, notification: &Notification) {
    let popup = centered_rect(POPUP_WIDTH, POPUP_HEIGHT, area);
    let border = status_color(&notification.record.status);

    let paragraph = Paragraph::new(notification_lines(notification))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(border))
                .title(vec![Span::styled(
                    " Connection ",
                    Style::default().fg(border).add_modifier(Modifier::BOLD),
                )]),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
