// Legend rendering module
//
// Lists every known status with its bubble color and its count in the
// current snapshot, plus the catch-all row and the "Show All" button.
// Counts always cover the whole snapshot; the filter only changes which row
// is highlighted.

use crate::app::{AppState, LegendTarget};
use crate::net::ConnectionState;
use crate::theme::status::state_color;
use crate::theme::{ACCENT_BLUE, ACTIVE_GREEN, DEFAULT_STATUS_COLOR, MUTED_GRAY, TEXT_WHITE};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Width the legend panel asks for
pub const LEGEND_WIDTH: u16 = 30;

/// Key that toggles the legend row at `index` ('1'..'9', then '0')
fn row_key(index: usize) -> char {
    char::from_digit(((index + 1) % 10) as u32, 10).unwrap_or(' ')
}

/// One legend line, in display order
#[derive(Debug, Clone, PartialEq)]
pub struct LegendRow {
    pub target: LegendTarget,
    pub line: Line<'static>,
}

/// Build the legend rows for the current state
pub fn build_legend_rows(app: &AppState) -> Vec<LegendRow> {
    let selected = app.filter.selected();
    let mut rows = Vec::with_capacity(ConnectionState::KNOWN.len() + 3);

    for (index, state) in ConnectionState::KNOWN.iter().enumerate() {
        let label = state.label().unwrap_or_default();
        let color = state_color(*state);
        let is_selected = selected == Some(label);

        let text_style = if is_selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_WHITE)
        };

        rows.push(LegendRow {
            target: LegendTarget::Status(*state),
            line: Line::from(vec![
                Span::styled(format!("{} ", row_key(index)), Style::default().fg(MUTED_GRAY)),
                Span::styled("● ", Style::default().fg(color)),
                Span::styled(format!("{:<12}", label), text_style),
                Span::styled(format!("{:>6}", app.counts.get(label)), text_style),
            ]),
        });
    }

    rows.push(LegendRow {
        target: LegendTarget::Other,
        line: Line::from(vec![
            Span::raw("  "),
            Span::styled("● ", Style::default().fg(DEFAULT_STATUS_COLOR)),
            Span::styled(format!("{:<12}", "Other"), Style::default().fg(MUTED_GRAY)),
            Span::styled(format!("{:>6}", app.counts.other()), Style::default().fg(MUTED_GRAY)),
        ]),
    });

    let show_all_style = if app.filter.is_show_all() {
        Style::default().fg(ACTIVE_GREEN).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT_BLUE).add_modifier(Modifier::BOLD)
    };
    rows.push(LegendRow {
        target: LegendTarget::ShowAll,
        line: Line::from(vec![
            Span::styled("a ", Style::default().fg(MUTED_GRAY)),
            Span::styled("[ Show All ]", show_all_style),
        ]),
    });

    rows
}

/// Render the legend panel. Returns the clickable row areas.
pub fn render_legend(f: &mut Frame, area: Rect, app: &AppState) -> Vec<(Rect, LegendTarget)> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_BLUE))
        .title(vec![Span::styled(
            format!("━ Legend ({}) ━", app.counts.total()),
            Style::default().fg(ACCENT_BLUE).add_modifier(Modifier::BOLD),
        )]);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut hit_rows = Vec::new();
    let bottom = inner.y.saturating_add(inner.height);

    for (offset, row) in build_legend_rows(app).into_iter().enumerate() {
        // Leave a blank line above the button
        let gap = u16::from(row.target == LegendTarget::ShowAll);
        let y = inner.y.saturating_add(offset as u16).saturating_add(gap);
        if y >= bottom {
            break;
        }

        let row_area = Rect::new(inner.x, y, inner.width, 1);
        f.render_widget(Paragraph::new(row.line), row_area);
        if row.target != LegendTarget::Other {
            hit_rows.push((row_area, row.target));
        }
    }

    hit_rows
}
