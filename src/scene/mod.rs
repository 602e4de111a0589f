// 3D scene state
//
// `RenderState` is the one owner of everything the viewport shows: the
// camera and the live bubble set. Reconciliation, idle motion, drawing and
// picking all go through it.

pub mod bubbles;
pub mod camera;
pub mod math;

pub use bubbles::{reconcile, Bubble, BubbleSet};
pub use camera::{Camera, Projected};
pub use math::Vec3;

use crate::app::config::JITTER_STEP;
use crate::app::filter::FilterState;
use crate::net::{ConnectionRecord, ConnectionSnapshot};
use rand::Rng;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct RenderState {
    pub camera: Camera,
    bubbles: BubbleSet,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bubbles(&self) -> &BubbleSet {
        &self.bubbles
    }

    /// Replace the live bubbles with a fresh reconciliation of `snapshot`.
    ///
    /// The new set is fully built before it is installed.
    pub fn resync<R: Rng>(
        &mut self,
        snapshot: Rc<ConnectionSnapshot>,
        filter: &FilterState,
        rng: &mut R,
    ) {
        let previous = std::mem::take(&mut self.bubbles);
        self.bubbles = reconcile(snapshot, filter, previous, rng);
    }

    /// Idle motion: nudge every bubble by a small random offset
    pub fn jitter<R: Rng>(&mut self, rng: &mut R) {
        let half = JITTER_STEP / 2.0;
        for bubble in self.bubbles.iter_mut() {
            bubble.position += Vec3::new(
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            );
        }
    }

    /// Record of the nearest bubble under a screen-plane point, if any
    pub fn pick(&self, x: f64, y: f64) -> Option<&ConnectionRecord> {
        let ray = self.camera.ray_through(x, y);
        self.bubbles
            .iter()
            .filter_map(|bubble| {
                ray.intersect_sphere(bubble.position, bubble.radius)
                    .filter(|t| *t > self.camera.near)
                    .map(|t| (t, bubble))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .and_then(|(_, bubble)| self.bubbles.record_of(bubble))
    }

    /// Live bubbles projected onto the screen plane, farthest first
    pub fn visible_bubbles(&self) -> Vec<(&Bubble, Projected)> {
        let mut visible: Vec<_> = self
            .bubbles
            .iter()
            .filter_map(|bubble| self.camera.project(bubble.position).map(|p| (bubble, p)))
            .collect();
        visible.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));
        visible
    }
}
