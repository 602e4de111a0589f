// Banner rendering module
//
// One-line header with the feed location and global stats.

use crate::app::AppState;
use crate::theme::{ACCENT_BLUE, MUTED_GRAY, TEXT_WHITE};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn banner_line(app: &AppState) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            " netbubbles ",
            Style::default().fg(ACCENT_BLUE).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("⟵ {} ", app.feed_url), Style::default().fg(MUTED_GRAY)),
        Span::styled(
            format!(
                "  [connections: {}] [bubbles: {}]",
                app.counts.total(),
                app.render.bubbles().len()
            ),
            Style::default().fg(TEXT_WHITE),
        ),
    ])
}

pub fn render_banner(f: &mut Frame, area: Rect, app: &AppState) {
    let banner = Paragraph::new(banner_line(app))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(ACCENT_BLUE)),
        )
        .alignment(Alignment::Left);

    f.render_widget(banner, area);
}
