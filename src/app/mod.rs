// Application state management
//
// AppState ties the pieces together on the UI thread: it receives feed
// results, owns the current snapshot and filter, drives reconciliation and
// idle motion on the RenderState, and keeps the pick notification.

pub mod config;
pub mod event;
pub mod filter;

pub use config::{FeedConfig, SceneSettings};
pub use filter::FilterState;

use crate::net::feed::FeedEvent;
use crate::net::{count_by_status, ConnectionRecord, ConnectionSnapshot, ConnectionState, StatusCounts};
use crate::scene::RenderState;
use config::NOTIFICATION_TTL;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::layout::{Position, Rect};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Non-blocking notice about a picked connection
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub record: ConnectionRecord,
    pub raised_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.raised_at) >= NOTIFICATION_TTL
    }
}

/// What a legend row does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendTarget {
    Status(ConnectionState),
    /// The catch-all row; display only
    Other,
    ShowAll,
}

/// Screen regions from the last draw, for mouse hit-testing
#[derive(Debug, Clone, Default)]
pub struct HitAreas {
    /// Drawable canvas area of the 3D viewport (inside its border)
    pub viewport: Rect,
    pub legend: Vec<(Rect, LegendTarget)>,
}

impl HitAreas {
    pub fn legend_target_at(&self, column: u16, row: u16) -> Option<LegendTarget> {
        self.legend
            .iter()
            .find(|(rect, _)| rect.contains(Position::new(column, row)))
            .map(|(_, target)| *target)
    }

    pub fn in_viewport(&self, column: u16, row: u16) -> bool {
        self.viewport.contains(Position::new(column, row))
    }
}

/// In-progress mouse drag over the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub last: (u16, u16),
    pub moved: bool,
}

/// Main application state
pub struct AppState {
    /// Whether the application is running
    pub running: bool,

    /// Camera and live bubbles
    pub render: RenderState,

    /// Latest connection snapshot (empty until the first successful poll)
    pub snapshot: Rc<ConnectionSnapshot>,

    /// Per-status totals of `snapshot`, independent of the filter
    pub counts: StatusCounts,

    /// Which status the scene is restricted to
    pub filter: FilterState,

    /// Whether any poll has succeeded yet
    pub has_snapshot: bool,

    /// Feed location, shown in the status bar
    pub feed_url: String,

    /// Runtime visual toggles
    pub settings: SceneSettings,

    /// Connection picked by the last click, if still on screen
    pub notification: Option<Notification>,

    /// Mouse regions recorded by the last draw
    pub hit_areas: HitAreas,

    /// Active viewport drag
    pub drag: Option<DragState>,

    /// Random source for bubble attributes and idle motion
    rng: StdRng,
}

impl AppState {
    pub fn new(feed_url: &str) -> Self {
        Self::with_rng(feed_url, StdRng::from_entropy())
    }

    /// State with a caller-supplied random source (seeded in tests)
    pub fn with_rng(feed_url: &str, rng: StdRng) -> Self {
        Self {
            running: true,
            render: RenderState::new(),
            snapshot: Rc::new(ConnectionSnapshot::empty()),
            counts: StatusCounts::default(),
            filter: FilterState::show_all(),
            has_snapshot: false,
            feed_url: feed_url.to_string(),
            settings: SceneSettings::default(),
            notification: None,
            hit_areas: HitAreas::default(),
            drag: None,
            rng,
        }
    }

    /// Per-frame update: idle motion and notification expiry
    pub fn on_tick(&mut self, now: Instant) {
        if self.settings.motion_enabled {
            self.render.jitter(&mut self.rng);
        }

        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now))
        {
            self.notification = None;
        }
    }

    /// Handle one poll result from the feed worker
    pub fn apply_feed_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Snapshot(records) => self.apply_snapshot(records),
            FeedEvent::Failed(e) => {
                // Keep showing the last good snapshot
                tracing::warn!(error = %e, url = %self.feed_url, "Connection feed poll failed");
            }
        }
    }

    /// Replace the current snapshot and rebuild the scene from it
    pub fn apply_snapshot(&mut self, records: Vec<ConnectionRecord>) {
        if !self.has_snapshot {
            tracing::info!(records = records.len(), "First connection snapshot received");
        }
        self.has_snapshot = true;
        self.snapshot = Rc::new(ConnectionSnapshot::new(records));
        self.counts = count_by_status(&self.snapshot.records);
        self.resync();
    }

    fn resync(&mut self) {
        self.render
            .resync(Rc::clone(&self.snapshot), &self.filter, &mut self.rng);
    }

    fn set_filter(&mut self, filter: FilterState) {
        if filter != self.filter {
            self.filter = filter;
            self.resync();
        }
    }

    /// Select `status` exclusively, or clear the filter if already selected
    pub fn toggle_status(&mut self, status: &str) {
        let next = self.filter.toggle(status);
        self.set_filter(next);
    }

    pub fn show_all(&mut self) {
        let next = self.filter.clear();
        self.set_filter(next);
    }

    /// Toggle the `index`-th known state in legend order
    pub fn toggle_known_state(&mut self, index: usize) {
        if let Some(label) = ConnectionState::KNOWN.get(index).and_then(|s| s.label()) {
            self.toggle_status(label);
        }
    }

    pub fn activate_legend(&mut self, target: LegendTarget) {
        match target {
            LegendTarget::Status(state) => {
                if let Some(label) = state.label() {
                    self.toggle_status(label);
                }
            }
            LegendTarget::ShowAll => self.show_all(),
            LegendTarget::Other => {}
        }
    }

    /// Pick at a terminal cell. Raises a notification on a hit; a miss or a
    /// cell outside the viewport does nothing.
    pub fn pick_at(&mut self, column: u16, row: u16) -> bool {
        let Some((x, y)) = crate::ui::viewport::cell_to_plane(self.hit_areas.viewport, column, row)
        else {
            return false;
        };

        match self.render.pick(x, y) {
            Some(record) => {
                tracing::debug!(connection = %record.format_display(), "Bubble picked");
                self.notification = Some(Notification {
                    record: record.clone(),
                    raised_at: Instant::now(),
                });
                true
            }
            None => false,
        }
    }

    pub fn dismiss_notification(&mut self) -> bool {
        self.notification.take().is_some()
    }

    pub fn toggle_motion(&mut self) {
        self.settings.motion_enabled = !self.settings.motion_enabled;
    }

    /// How old the current snapshot is (`None` before the first poll)
    pub fn snapshot_age(&self, now: Instant) -> Option<Duration> {
        self.has_snapshot
            .then(|| now.duration_since(self.snapshot.received_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::feed::FeedError;
    use crate::theme::status_color;

    fn test_app() -> AppState {
        AppState::with_rng("http://127.0.0.1:5000", StdRng::seed_from_u64(1234))
    }

    fn scenario_records() -> Vec<ConnectionRecord> {
        vec![
            ConnectionRecord::new("ESTABLISHED", "127.0.0.1", 5000),
            ConnectionRecord::new("LISTEN", "0.0.0.0", 22),
            ConnectionRecord::new("ESTABLISHED", "10.0.0.4", 443),
        ]
    }

    /// Viewport the size of a small terminal, as the draw pass would record it
    fn with_viewport(mut app: AppState) -> AppState {
        app.hit_areas.viewport = Rect::new(0, 0, 80, 40);
        app
    }

    #[test]
    fn test_snapshot_show_all() {
        let mut app = test_app();
        app.apply_feed_event(FeedEvent::Snapshot(scenario_records()));

        assert!(app.has_snapshot);
        assert_eq!(app.render.bubbles().len(), 3);
        assert_eq!(app.counts.get("ESTABLISHED"), 2);
        assert_eq!(app.counts.get("LISTEN"), 1);
    }

    #[test]
    fn test_filter_changes_scene_not_counts() {
        let mut app = test_app();
        app.apply_snapshot(scenario_records());
        app.toggle_status("ESTABLISHED");

        assert_eq!(app.render.bubbles().len(), 2);
        for bubble in app.render.bubbles().iter() {
            assert_eq!(bubble.color, status_color("ESTABLISHED"));
        }
        assert_eq!(app.counts.get("ESTABLISHED"), 2);
        assert_eq!(app.counts.get("LISTEN"), 1);

        // Same status again clears the filter
        app.toggle_status("ESTABLISHED");
        assert!(app.filter.is_show_all());
        assert_eq!(app.render.bubbles().len(), 3);
    }

    #[test]
    fn test_filter_applies_to_next_snapshot() {
        let mut app = test_app();
        app.toggle_status("LISTEN");
        app.apply_snapshot(scenario_records());
        assert_eq!(app.render.bubbles().len(), 1);

        app.apply_snapshot(vec![ConnectionRecord::new("ESTABLISHED", "127.0.0.1", 1)]);
        assert!(app.render.bubbles().is_empty());
        assert_eq!(app.filter.selected(), Some("LISTEN"));
    }

    #[test]
    fn test_failed_poll_keeps_last_snapshot() {
        let mut app = test_app();
        app.apply_snapshot(scenario_records());
        let before = Rc::clone(&app.snapshot);

        app.apply_feed_event(FeedEvent::Failed(FeedError::Status(500)));
        app.apply_feed_event(FeedEvent::Failed(FeedError::Transport("refused".into())));

        assert!(Rc::ptr_eq(&app.snapshot, &before));
        assert_eq!(app.render.bubbles().len(), 3);
        assert_eq!(app.counts.total(), 3);
    }

    #[test]
    fn test_empty_snapshot_clears_bubbles() {
        let mut app = test_app();
        app.apply_snapshot(scenario_records());
        app.apply_snapshot(Vec::new());
        assert!(app.render.bubbles().is_empty());
        assert_eq!(app.counts.total(), 0);
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let mut app = test_app();
        app.apply_snapshot(vec![ConnectionRecord::new("UNKNOWN_STATE", "::1", 9)]);
        assert_eq!(app.render.bubbles().len(), 1);
        assert_eq!(app.counts.other(), 1);
    }

    #[test]
    fn test_toggle_known_state_and_legend() {
        let mut app = test_app();
        app.apply_snapshot(scenario_records());

        app.toggle_known_state(1);
        assert_eq!(app.filter.selected(), Some("LISTEN"));

        app.activate_legend(LegendTarget::Status(ConnectionState::Established));
        assert_eq!(app.filter.selected(), Some("ESTABLISHED"));

        app.activate_legend(LegendTarget::Other);
        assert_eq!(app.filter.selected(), Some("ESTABLISHED"));

        app.activate_legend(LegendTarget::ShowAll);
        assert!(app.filter.is_show_all());

        // Out of range index is ignored
        app.toggle_known_state(42);
        assert!(app.filter.is_show_all());
    }

    #[test]
    fn test_pick_outside_viewport_does_nothing() {
        let mut app = with_viewport(test_app());
        app.apply_snapshot(scenario_records());
        assert!(!app.pick_at(200, 200));
        assert!(app.notification.is_none());
    }

    #[test]
    fn test_pick_on_empty_space_raises_nothing() {
        let mut app = with_viewport(test_app());
        app.apply_snapshot(Vec::new());
        assert!(!app.pick_at(40, 20));
        assert!(app.notification.is_none());
    }

    #[test]
    fn test_pick_hit_raises_notification() {
        let mut app = test_app();
        // Fine-grained cells so a cell center always lands inside the bubble
        app.hit_areas.viewport = Rect {
            x: 0,
            y: 0,
            width: 1000,
            height: 500,
        };
        app.apply_snapshot(vec![ConnectionRecord::new("LISTEN", "0.0.0.0", 22)]);

        // Find the cell the bubble's center lands on and click there
        let viewport = app.hit_areas.viewport;
        let (_, projected) = app.render.visible_bubbles()[0];
        let (column, row) = crate::ui::viewport::plane_to_cell(viewport, projected.x, projected.y)
            .expect("bubble center is on screen");

        assert!(app.pick_at(column, row));
        let notification = app.notification.as_ref().unwrap();
        assert_eq!(notification.record.status, "LISTEN");
        assert_eq!(notification.record.local_port, 22);

        assert!(app.dismiss_notification());
        assert!(!app.dismiss_notification());
    }

    #[test]
    fn test_notification_expires_on_tick() {
        let mut app = test_app();
        let raised_at = Instant::now();
        app.notification = Some(Notification {
            record: ConnectionRecord::new("LISTEN", "0.0.0.0", 22),
            raised_at,
        });

        app.on_tick(raised_at + Duration::from_secs(1));
        assert!(app.notification.is_some());
        app.on_tick(raised_at + NOTIFICATION_TTL);
        assert!(app.notification.is_none());
    }

    #[test]
    fn test_motion_toggle_freezes_bubbles() {
        let mut app = test_app();
        app.apply_snapshot(scenario_records());
        app.toggle_motion();
        assert!(!app.settings.motion_enabled);

        let before: Vec<_> = app.render.bubbles().iter().map(|b| b.position).collect();
        for _ in 0..10 {
            app.on_tick(Instant::now());
        }
        let after: Vec<_> = app.render.bubbles().iter().map(|b| b.position).collect();
        assert_eq!(before, after);

        app.toggle_motion();
        app.on_tick(Instant::now());
        let moved: Vec<_> = app.render.bubbles().iter().map(|b| b.position).collect();
        assert_ne!(before, moved);
    }

    #[test]
    fn test_snapshot_age() {
        let mut app = test_app();
        assert_eq!(app.snapshot_age(Instant::now()), None);
        app.apply_snapshot(scenario_records());
        assert!(app.snapshot_age(Instant::now()).is_some());
    }

    #[test]
    fn test_hit_areas_lookup() {
        let areas = HitAreas {
            viewport: Rect::new(0, 0, 10, 10),
            legend: vec![
                (Rect::new(20, 1, 15, 1), LegendTarget::Status(ConnectionState::Listen)),
                (Rect::new(20, 3, 15, 1), LegendTarget::ShowAll),
            ],
        };
        assert_eq!(
            areas.legend_target_at(25, 1),
            Some(LegendTarget::Status(ConnectionState::Listen))
        );
        assert_eq!(areas.legend_target_at(25, 3), Some(LegendTarget::ShowAll));
        assert_eq!(areas.legend_target_at(25, 2), None);
        assert!(areas.in_viewport(5, 5));
        assert!(!areas.in_viewport(10, 10));
    }
}
