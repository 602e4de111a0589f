// Status bar rendering module
//
// Renders the bottom status bar with keyboard shortcuts, the motion toggle
// and how fresh the connection data is.

use crate::app::AppState;
use crate::theme::{ACCENT_BLUE, ACTIVE_GREEN, MUTED_GRAY, TEXT_WHITE, WARN_ORANGE};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

/// Snapshots older than this are shown as stale (two missed polls)
const STALE_AFTER: Duration = Duration::from_secs(11);

pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    // Calculate available width for hints (subtract borders and icon)
    let available_width = area.width.saturating_sub(4) as usize;

    struct Hint {
        priority: u8,
        key: &'static str,
        desc: &'static str,
        color: Color,
    }

    let hints = [
        Hint {
            priority: 1,
            key: "Q:",
            desc: "Quit | ",
            color: Color::Red,
        },
        Hint {
            priority: 1,
            key: "Click:",
            desc: "Inspect | ",
            color: ACCENT_BLUE,
        },
        Hint {
            priority: 1,
            key: "1-0:",
            desc: "Filter | ",
            color: ACCENT_BLUE,
        },
        Hint {
            priority: 2,
            key: "A:",
            desc: "Show All | ",
            color: ACCENT_BLUE,
        },
        Hint {
            priority: 2,
            key: "Drag/←→↑↓:",
            desc: "Orbit | ",
            color: ACCENT_BLUE,
        },
        Hint {
            priority: 3,
            key: "+/-:",
            desc: "Zoom | ",
            color: ACCENT_BLUE,
        },
        Hint {
            priority: 3,
            key: "R:",
            desc: "Reset | ",
            color: ACCENT_BLUE,
        },
    ];

    let indicators = build_indicators(app, Instant::now());
    let indicator_len: usize = indicators.iter().map(|s| s.width()).sum();

    let mut spans = vec![Span::styled(" 🫧 ", Style::default().fg(ACCENT_BLUE))];
    let mut current_length = 4 + indicator_len;

    // Add hints by priority until we run out of space
    for priority in 1..=3 {
        for hint in hints.iter().filter(|h| h.priority == priority) {
            let hint_length = hint.key.chars().count() + hint.desc.len();
            if current_length + hint_length <= available_width {
                spans.push(Span::styled(
                    hint.key,
                    Style::default().fg(hint.color).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::raw(hint.desc));
                current_length += hint_length;
            }
        }
    }

    spans.extend(indicators);

    let status_bar = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(ACCENT_BLUE)),
        )
        .alignment(Alignment::Left);

    f.render_widget(status_bar, area);
}

/// Human-readable snapshot age
pub fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    if secs < 60 {
        format!("{}s ago", secs)
    } else {
        format!("{}m ago", secs / 60)
    }
}

/// Motion toggle and data freshness, e.g. `[M:ON] [data: 3s ago]`
pub fn build_indicators(app: &AppState, now: Instant) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    let (motion_state, motion_color) = if app.settings.motion_enabled {
        ("ON", ACTIVE_GREEN)
    } else {
        ("OFF", TEXT_WHITE)
    };
    spans.push(Span::styled("[M:", Style::default().fg(TEXT_WHITE)));
    spans.push(Span::styled(
        motion_state,
        Style::default().fg(motion_color).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled("] ", Style::default().fg(TEXT_WHITE)));

    let (freshness, color) = match app.snapshot_age(now) {
        None => ("waiting".to_string(), MUTED_GRAY),
        Some(age) if age >= STALE_AFTER => (format_age(age), WARN_ORANGE),
        Some(age) => (format_age(age), ACTIVE_GREEN),
    };
    spans.push(Span::styled("[data: ", Style::default().fg(TEXT_WHITE)));
    spans.push(Span::styled(freshness, Style::default().fg(color)));
    spans.push(Span::styled("]", Style::default().fg(TEXT_WHITE)));

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::ConnectionRecord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(Duration::from_secs(0)), "0s ago");
        assert_eq!(format_age(Duration::from_secs(59)), "59s ago");
        assert_eq!(format_age(Duration::from_secs(125)), "2m ago");
    }

    #[test]
    fn test_indicators_before_first_snapshot() {
        let app = AppState::with_rng("http://127.0.0.1:5000", StdRng::seed_from_u64(0));
        assert_eq!(text(&build_indicators(&app, Instant::now())), "[M:ON] [data: waiting]");
    }

    #[test]
    fn test_indicators_mark_stale_data() {
        let mut app = AppState::with_rng("http://127.0.0.1:5000", StdRng::seed_from_u64(0));
        app.apply_snapshot(vec![ConnectionRecord::new("LISTEN", "0.0.0.0", 22)]);
        app.toggle_motion();

        let received = app.snapshot.received_at;
        let fresh = build_indicators(&app, received + Duration::from_secs(2));
        assert_eq!(text(&fresh), "[M:OFF] [data: 2s ago]");
        assert_eq!(fresh[4].style.fg, Some(ACTIVE_GREEN));

        let stale = build_indicators(&app, received + Duration::from_secs(30));
        assert_eq!(stale[4].style.fg, Some(WARN_ORANGE));
    }
}
