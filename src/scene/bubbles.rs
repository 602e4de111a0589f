// Bubble reconciliation
//
// Every pass throws away the previous bubble set and builds a fresh one from
// the latest snapshot. Records have no identity across polls, so there is
// nothing to match old bubbles against; sizes and positions are re-rolled
// each time, which gives the scene its shuffle on every refresh.

use super::math::Vec3;
use crate::app::config::{BUBBLE_RADIUS_MAX, BUBBLE_RADIUS_MIN, SPAWN_EXTENT};
use crate::app::filter::FilterState;
use crate::net::{ConnectionRecord, ConnectionSnapshot};
use crate::theme::status_color;
use rand::Rng;
use ratatui::style::Color;
use std::rc::Rc;
use tracing::debug;

/// Visual stand-in for one connection record
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub radius: f64,
    pub color: Color,
    pub position: Vec3,
    /// Index of the record in the owning set's snapshot
    record: usize,
}

impl Bubble {
    #[allow(dead_code)]
    pub fn record_index(&self) -> usize {
        self.record
    }
}

/// All live bubbles, together with the snapshot they were built from
///
/// Bubbles resolve their record only through the set that owns them, so a
/// bubble can never point into a snapshot other than its own.
#[derive(Debug, Clone)]
pub struct BubbleSet {
    source: Rc<ConnectionSnapshot>,
    bubbles: Vec<Bubble>,
}

impl Default for BubbleSet {
    fn default() -> Self {
        Self {
            source: Rc::new(ConnectionSnapshot::empty()),
            bubbles: Vec::new(),
        }
    }
}

impl BubbleSet {
    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bubble> {
        self.bubbles.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Bubble> {
        self.bubbles.iter_mut()
    }

    /// Snapshot this set was built from
    #[allow(dead_code)]
    pub fn source(&self) -> &Rc<ConnectionSnapshot> {
        &self.source
    }

    /// Record a bubble stands for
    pub fn record_of(&self, bubble: &Bubble) -> Option<&ConnectionRecord> {
        self.source.records.get(bubble.record)
    }
}

/// Build the bubble set for `snapshot` under `filter`, replacing `previous`.
///
/// One bubble per matching record, in snapshot order. Unknown statuses are
/// valid and get the default color. Never fails.
pub fn reconcile<R: Rng>(
    snapshot: Rc<ConnectionSnapshot>,
    filter: &FilterState,
    previous: BubbleSet,
    rng: &mut R,
) -> BubbleSet {
    let discarded = previous.len();
    drop(previous);

    let bubbles: Vec<Bubble> = snapshot
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.matches(&record.status))
        .map(|(idx, record)| spawn_bubble(idx, record, rng))
        .collect();

    debug!(
        discarded,
        created = bubbles.len(),
        records = snapshot.len(),
        filter = filter.selected().unwrap_or("all"),
        "Reconciled bubbles"
    );

    BubbleSet {
        source: snapshot,
        bubbles,
    }
}

fn spawn_bubble<R: Rng>(idx: usize, record: &ConnectionRecord, rng: &mut R) -> Bubble {
    let radius = rng.gen_range(BUBBLE_RADIUS_MIN..BUBBLE_RADIUS_MAX);
    let position = Vec3::new(
        rng.gen_range(-SPAWN_EXTENT..SPAWN_EXTENT),
        rng.gen_range(-SPAWN_EXTENT..SPAWN_EXTENT),
        rng.gen_range(-SPAWN_EXTENT..SPAWN_EXTENT),
    );
    Bubble {
        radius,
        color: status_color(&record.status),
        position,
        record: idx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn snapshot(statuses: &[&str]) -> Rc<ConnectionSnapshot> {
        let records = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| ConnectionRecord::new(s, "127.0.0.1", 1000 + i as u16))
            .collect();
        Rc::new(ConnectionSnapshot::new(records))
    }

    fn statuses_of(set: &BubbleSet) -> Vec<String> {
        set.iter()
            .map(|b| set.record_of(b).unwrap().status.clone())
            .collect()
    }

    #[test]
    fn test_show_all_creates_one_bubble_per_record() {
        let mut rng = StdRng::seed_from_u64(7);
        let snap = snapshot(&["ESTABLISHED", "LISTEN", "ESTABLISHED"]);
        let set = reconcile(snap, &FilterState::show_all(), BubbleSet::default(), &mut rng);

        assert_eq!(set.len(), 3);
        assert_eq!(statuses_of(&set), vec!["ESTABLISHED", "LISTEN", "ESTABLISHED"]);
    }

    #[test]
    fn test_filter_keeps_only_selected_status() {
        let mut rng = StdRng::seed_from_u64(7);
        let snap = snapshot(&["ESTABLISHED", "LISTEN", "ESTABLISHED"]);
        let set = reconcile(
            snap,
            &FilterState::only("ESTABLISHED"),
            BubbleSet::default(),
            &mut rng,
        );

        assert_eq!(set.len(), 2);
        for bubble in set.iter() {
            assert_eq!(bubble.color, status_color("ESTABLISHED"));
        }
        let ports: Vec<u16> = set.iter().map(|b| set.record_of(b).unwrap().local_port).collect();
        assert_eq!(ports, vec![1000, 1002]);
    }

    #[test]
    fn test_unknown_status_gets_default_bubble() {
        let mut rng = StdRng::seed_from_u64(1);
        let snap = snapshot(&["UNKNOWN_STATE"]);
        let set = reconcile(snap, &FilterState::show_all(), BubbleSet::default(), &mut rng);

        assert_eq!(set.len(), 1);
        let bubble = set.iter().next().unwrap();
        assert_eq!(bubble.color, crate::theme::DEFAULT_STATUS_COLOR);
    }

    #[test]
    fn test_empty_snapshot_clears_scene() {
        let mut rng = StdRng::seed_from_u64(3);
        let full = reconcile(
            snapshot(&["LISTEN", "LISTEN"]),
            &FilterState::show_all(),
            BubbleSet::default(),
            &mut rng,
        );
        assert_eq!(full.len(), 2);

        let empty = reconcile(snapshot(&[]), &FilterState::show_all(), full, &mut rng);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_new_set_references_only_new_snapshot() {
        let mut rng = StdRng::seed_from_u64(11);
        let first = reconcile(
            snapshot(&["LISTEN", "LISTEN", "LISTEN"]),
            &FilterState::show_all(),
            BubbleSet::default(),
            &mut rng,
        );
        let next_snap = snapshot(&["CLOSING"]);
        let second = reconcile(Rc::clone(&next_snap), &FilterState::show_all(), first, &mut rng);

        assert!(Rc::ptr_eq(second.source(), &next_snap));
        assert_eq!(statuses_of(&second), vec!["CLOSING"]);
    }

    #[test]
    fn test_attributes_within_bounds() {
        let mut rng = StdRng::seed_from_u64(99);
        let snap = snapshot(&["ESTABLISHED"; 200]);
        let set = reconcile(snap, &FilterState::show_all(), BubbleSet::default(), &mut rng);

        for bubble in set.iter() {
            assert!(bubble.radius >= BUBBLE_RADIUS_MIN && bubble.radius < BUBBLE_RADIUS_MAX);
            for coord in [bubble.position.x, bubble.position.y, bubble.position.z] {
                assert!((-SPAWN_EXTENT..SPAWN_EXTENT).contains(&coord));
            }
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let snap = snapshot(&["ESTABLISHED", "TIME_WAIT"]);
        let a = reconcile(
            Rc::clone(&snap),
            &FilterState::show_all(),
            BubbleSet::default(),
            &mut StdRng::seed_from_u64(5),
        );
        let b = reconcile(
            snap,
            &FilterState::show_all(),
            BubbleSet::default(),
            &mut StdRng::seed_from_u64(5),
        );
        assert_eq!(a.iter().collect::<Vec<_>>(), b.iter().collect::<Vec<_>>());
    }

    fn status_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("ESTABLISHED".to_string()),
            Just("LISTEN".to_string()),
            Just("TIME_WAIT".to_string()),
            Just("UNKNOWN_STATE".to_string()),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Bubble count equals the number of records passing the filter
        #[test]
        fn prop_cardinality_matches_filter(
            statuses in proptest::collection::vec(status_strategy(), 0..80),
            selected in proptest::option::of(status_strategy()),
            seed in any::<u64>(),
        ) {
            let refs: Vec<&str> = statuses.iter().map(String::as_str).collect();
            let filter = match &selected {
                Some(s) => FilterState::only(s),
                None => FilterState::show_all(),
            };
            let mut rng = StdRng::seed_from_u64(seed);
            let set = reconcile(snapshot(&refs), &filter, BubbleSet::default(), &mut rng);

            let expected = statuses.iter().filter(|s| filter.matches(s)).count();
            prop_assert_eq!(set.len(), expected);
            for bubble in set.iter() {
                let record = set.record_of(bubble).unwrap();
                prop_assert!(filter.matches(&record.status));
                prop_assert_eq!(bubble.color, status_color(&record.status));
            }
        }

        /// Reconciling the same snapshot twice gives the same cardinality and
        /// the same per-record classification
        #[test]
        fn prop_reconcile_is_idempotent(
            statuses in proptest::collection::vec(status_strategy(), 0..40),
            selected in proptest::option::of(status_strategy()),
            seed in any::<u64>(),
        ) {
            let refs: Vec<&str> = statuses.iter().map(String::as_str).collect();
            let filter = match &selected {
                Some(s) => FilterState::only(s),
                None => FilterState::show_all(),
            };
            let snap = snapshot(&refs);
            let mut rng = StdRng::seed_from_u64(seed);

            let once = reconcile(Rc::clone(&snap), &filter, BubbleSet::default(), &mut rng);
            let once_view: Vec<(usize, Color)> =
                once.iter().map(|b| (b.record_index(), b.color)).collect();
            let twice = reconcile(snap, &filter, once, &mut rng);
            let twice_view: Vec<(usize, Color)> =
                twice.iter().map(|b| (b.record_index(), b.color)).collect();

            prop_assert_eq!(once_view, twice_view);
        }
    }
}
