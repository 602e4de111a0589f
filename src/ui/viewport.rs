// Viewport rendering module
//
// Draws the live bubble set through the scene camera onto a Braille canvas,
// and converts between terminal cells and screen-plane coordinates for
// picking.

use crate::app::config::CELL_ASPECT;
use crate::app::AppState;
use crate::theme::{dim, ACCENT_BLUE, TEXT_WHITE, VOID_BLACK};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Points},
        Block, BorderType, Borders,
    },
    Frame,
};

/// Depth at which bubbles start fading towards the background
const FOG_START: f64 = 120.0;

/// Depth range over which fog reaches its maximum
const FOG_RANGE: f64 = 300.0;

/// Maximum fog darkening (0.0 ~ 1.0)
const FOG_MAX: f32 = 0.6;

/// Below this screen-plane radius a bubble is drawn as a dot
const DOT_RADIUS: f64 = 0.01;

/// Number of concentric rings used to shade a bubble
const SHELLS: usize = 3;

/// Width-to-height ratio of the screen plane for a viewport, in square units
pub fn viewport_aspect(area: Rect) -> f64 {
    if area.height == 0 {
        return 1.0;
    }
    area.width as f64 / (area.height as f64 * CELL_ASPECT)
}

/// Screen-plane point at the center of a terminal cell.
///
/// `None` when the cell is outside `area`.
pub fn cell_to_plane(area: Rect, column: u16, row: u16) -> Option<(f64, f64)> {
    if area.width == 0 || area.height == 0 || !area.contains(Position::new(column, row)) {
        return None;
    }
    let aspect = viewport_aspect(area);
    let nx = ((column - area.x) as f64 + 0.5) / area.width as f64 * 2.0 - 1.0;
    let ny = 1.0 - ((row - area.y) as f64 + 0.5) / area.height as f64 * 2.0;
    Some((nx * aspect, ny))
}

/// Terminal cell containing a screen-plane point, if it is on screen
pub fn plane_to_cell(area: Rect, x: f64, y: f64) -> Option<(u16, u16)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let aspect = viewport_aspect(area);
    let col = ((x / aspect + 1.0) / 2.0 * area.width as f64).floor();
    let row = ((1.0 - y) / 2.0 * area.height as f64).floor();
    if col < 0.0 || row < 0.0 || col >= area.width as f64 || row >= area.height as f64 {
        return None;
    }
    Some((area.x + col as u16, area.y + row as u16))
}

fn fog(depth: f64) -> f32 {
    ((((depth - FOG_START) / FOG_RANGE).clamp(0.0, 1.0)) as f32) * FOG_MAX
}

/// Render the 3D viewport. Returns the drawable area inside the border,
/// which is what clicks are mapped against.
pub fn render_viewport(f: &mut Frame, area: Rect, app: &AppState) -> Rect {
    let filter_label = app.filter.selected().unwrap_or("all").to_string();
    let title = format!(
        "━ 🫧 Connection Bubbles ━ {} shown ━ filter: {} ━",
        app.render.bubbles().len(),
        filter_label
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_BLUE))
        .title(vec![Span::styled(
            title,
            Style::default().fg(ACCENT_BLUE).add_modifier(Modifier::BOLD),
        )]);
    let inner = block.inner(area);
    let aspect = viewport_aspect(inner);

    let visible = app.render.visible_bubbles();
    let waiting = !app.has_snapshot;

    let canvas = Canvas::default()
        .block(block)
        .background_color(VOID_BLACK)
        .marker(Marker::Braille)
        .x_bounds([-aspect, aspect])
        .y_bounds([-1.0, 1.0])
        .paint(move |ctx| {
            if waiting {
                ctx.print(
                    -aspect * 0.4,
                    0.0,
                    Span::styled("waiting for connection feed…", Style::default().fg(TEXT_WHITE)),
                );
                return;
            }

            // Farthest first so nearer bubbles paint over them
            for (bubble, projected) in &visible {
                let color = dim(bubble.color, fog(projected.depth));
                let radius = bubble.radius * projected.scale;

                if radius < DOT_RADIUS {
                    ctx.draw(&Points {
                        coords: &[(projected.x, projected.y)],
                        color,
                    });
                    continue;
                }

                for shell in 0..SHELLS {
                    let ratio = 1.0 - shell as f64 / SHELLS as f64;
                    ctx.draw(&Circle {
                        x: projected.x,
                        y: projected.y,
                        radius: radius * ratio,
                        color,
                    });
                }
            }
        });

    f.render_widget(canvas, area);
    inner
}
