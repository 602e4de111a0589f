// Keyboard and mouse event handling
//
// Input handlers translate crossterm events into AppState operations. They
// run on the UI thread between frames.

use super::config::{DRAG_ORBIT_PER_CELL, ORBIT_STEP, ZOOM_FACTOR};
use super::{AppState, DragState};
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

/// Handle keyboard events and update application state
///
/// Returns `true` if the application should continue running,
/// `false` if it should exit.
///
/// # Key Bindings
/// - `q`, `Q` - Quit the application
/// - `Esc` - Dismiss the notification, or quit when there is none
/// - `1`-`9`, `0` - Toggle the filter for the 1st-10th legend status
/// - `a`, `A` - Show all statuses
/// - `m`, `M` - Toggle idle motion
/// - Arrow keys - Orbit the camera
/// - `+`, `=` - Zoom in
/// - `-`, `_` - Zoom out
/// - `r`, `R` - Reset the camera
///
/// Any key also dismisses an open notification.
pub fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    let dismissed = app.dismiss_notification();

    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.running = false;
        }
        KeyCode::Esc => {
            if !dismissed {
                app.running = false;
            }
        }
        KeyCode::Char(c @ '0'..='9') => {
            // '1' is the first legend row, '0' the tenth
            let index = (c as usize + 9 - '0' as usize) % 10;
            app.toggle_known_state(index);
        }
        KeyCode::Char('a') | KeyCode::Char('A') => app.show_all(),
        KeyCode::Char('m') | KeyCode::Char('M') => app.toggle_motion(),
        KeyCode::Left => app.render.camera.orbit(-ORBIT_STEP, 0.0),
        KeyCode::Right => app.render.camera.orbit(ORBIT_STEP, 0.0),
        KeyCode::Up => app.render.camera.orbit(0.0, ORBIT_STEP),
        KeyCode::Down => app.render.camera.orbit(0.0, -ORBIT_STEP),
        KeyCode::Char('+') | KeyCode::Char('=') => app.render.camera.zoom(1.0 / ZOOM_FACTOR),
        KeyCode::Char('-') | KeyCode::Char('_') => app.render.camera.zoom(ZOOM_FACTOR),
        KeyCode::Char('r') | KeyCode::Char('R') => app.render.camera.reset(),
        _ => {}
    }

    app.running
}

/// Handle mouse events
///
/// - Left click on a legend row toggles that status (or shows all)
/// - Left click on the viewport picks the bubble under the cursor
/// - Left drag on the viewport orbits the camera
/// - Scroll wheel over the viewport zooms
pub fn handle_mouse_event(app: &mut AppState, mouse: MouseEvent) {
    let (column, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.dismiss_notification();
            app.drag = None;

            if let Some(target) = app.hit_areas.legend_target_at(column, row) {
                app.activate_legend(target);
            } else if app.hit_areas.in_viewport(column, row) {
                app.drag = Some(DragState {
                    last: (column, row),
                    moved: false,
                });
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(drag) = app.drag.as_mut() {
                let dx = column as f64 - drag.last.0 as f64;
                let dy = row as f64 - drag.last.1 as f64;
                if dx != 0.0 || dy != 0.0 {
                    drag.last = (column, row);
                    drag.moved = true;
                    app.render
                        .camera
                        .orbit(-dx * DRAG_ORBIT_PER_CELL, dy * DRAG_ORBIT_PER_CELL);
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            // A press and release without movement is a click
            if let Some(drag) = app.drag.take() {
                if !drag.moved {
                    app.pick_at(column, row);
                }
            }
        }
        MouseEventKind::ScrollUp if app.hit_areas.in_viewport(column, row) => {
            app.render.camera.zoom(1.0 / ZOOM_FACTOR);
        }
        MouseEventKind::ScrollDown if app.hit_areas.in_viewport(column, row) => {
            app.render.camera.zoom(ZOOM_FACTOR);
        }
        _ => {}
    }
}
