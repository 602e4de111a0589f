// UI rendering module
//
// The main draw() function lays out the panels, renders them, and records
// the clickable regions for the next round of mouse input.

mod banner;
mod legend;
mod notification;
mod status_bar;
pub mod viewport;

use crate::app::{AppState, HitAreas};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use banner::render_banner;
use legend::{render_legend, LEGEND_WIDTH};
use notification::render_notification;
use status_bar::render_status_bar;
use viewport::render_viewport;

/// Main UI drawing function
pub fn draw(f: &mut Frame, app: &mut AppState) {
    let size = f.area();

    // Main layout: banner, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Banner
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Status bar
        ])
        .split(size);

    render_banner(f, chunks[0], app);

    // Body: 3D viewport + legend
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(LEGEND_WIDTH)])
        .split(chunks[1]);

    let viewport = render_viewport(f, body_chunks[0], app);
    let legend = render_legend(f, body_chunks[1], app);
    render_status_bar(f, chunks[2], app);

    if let Some(notification) = &app.notification {
        render_notification(f, body_chunks[0], notification);
    }

    app.hit_areas = HitAreas { viewport, legend };
}
