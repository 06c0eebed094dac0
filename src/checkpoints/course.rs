//! Checkpoint course: spatial triggers and one-shot "reached" tracking.
//!
//! Checkpoints may be reached in any order. Each fires at most once until
//! [`CheckpointSet::reset_all`] clears the flags.

use bevy::prelude::*;
use rand::Rng;

/// Role of a checkpoint in the mission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum CheckpointKind {
    /// Intermediate point; reaching it shows a message.
    Waypoint,
    /// Delivery point; reaching it completes the mission.
    Goal,
}

/// A named trigger sphere.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct Checkpoint {
    pub id: String,
    /// Overlay heading shown when reached.
    pub heading: String,
    pub position: Vec3,
    /// Trigger distance from `position`.
    pub radius: f32,
    pub kind: CheckpointKind,
    reached: bool,
}

impl Checkpoint {
    /// Default trigger distance.
    pub const DEFAULT_RADIUS: f32 = 2.0;

    pub fn waypoint(id: impl Into<String>, heading: impl Into<String>, position: Vec3) -> Self {
        Self {
            id: id.into(),
            heading: heading.into(),
            position,
            radius: Self::DEFAULT_RADIUS,
            kind: CheckpointKind::Waypoint,
            reached: false,
        }
    }

    pub fn goal(id: impl Into<String>, heading: impl Into<String>, position: Vec3) -> Self {
        Self {
            kind: CheckpointKind::Goal,
            ..Self::waypoint(id, heading, position)
        }
    }

    pub fn is_reached(&self) -> bool {
        self.reached
    }

    /// Squared-distance test; no square root per frame.
    fn contains(&self, point: Vec3) -> bool {
        self.position.distance_squared(point) < self.radius * self.radius
    }
}

/// A checkpoint transitioning to reached.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckpointEvent {
    pub id: String,
    pub heading: String,
    pub kind: CheckpointKind,
}

impl CheckpointEvent {
    /// `true` for the goal checkpoint.
    pub fn completes_mission(&self) -> bool {
        self.kind == CheckpointKind::Goal
    }
}

/// Ordered set of checkpoints with their reached flags.
#[derive(Clone, Debug, Default)]
pub struct CheckpointSet {
    checkpoints: Vec<Checkpoint>,
}

impl CheckpointSet {
    /// Builds a set with every flag cleared.
    pub fn new(checkpoints: Vec<Checkpoint>) -> Self {
        let mut set = Self { checkpoints };
        set.reset_all();
        set
    }

    /// Flags every unreached checkpoint that contains `position` and reports it.
    pub fn check_all(&mut self, position: Vec3) -> Vec<CheckpointEvent> {
        self.checkpoints
            .iter_mut()
            .filter(|cp| !cp.reached && cp.contains(position))
            .map(|cp| {
                cp.reached = true;
                CheckpointEvent {
                    id: cp.id.clone(),
                    heading: cp.heading.clone(),
                    kind: cp.kind,
                }
            })
            .collect()
    }

    /// Clears every reached flag.
    pub fn reset_all(&mut self) {
        for cp in &mut self.checkpoints {
            cp.reached = false;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.checkpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn reached_count(&self) -> usize {
        self.checkpoints.iter().filter(|cp| cp.reached).count()
    }
}

/// One arrangement of checkpoints in the city.
#[derive(Clone, Debug)]
pub struct CourseLayout {
    pub name: &'static str,
    pub checkpoints: Vec<Checkpoint>,
}

/// The fixed pool of course variants.
pub fn layout_pool() -> Vec<CourseLayout> {
    let delivered = "Package delivered!";
    vec![
        CourseLayout {
            name: "harbour run",
            checkpoints: vec![
                Checkpoint::waypoint("point-1", "Checkpoint 1 reached", Vec3::new(6.7, 5.7, -14.8)),
                Checkpoint::waypoint("point-2", "Checkpoint 2 reached", Vec3::new(-6.5, 7.2, -28.0)),
                Checkpoint::waypoint("point-3", "Checkpoint 3 reached", Vec3::new(-18.0, 4.5, -9.0)),
                Checkpoint::goal("end", delivered, Vec3::new(-26.0, 1.0, 6.5)),
            ],
        },
        CourseLayout {
            name: "tower hop",
            checkpoints: vec![
                Checkpoint::waypoint("point-1", "Checkpoint 1 reached", Vec3::new(12.0, 9.0, -30.0)),
                Checkpoint::waypoint("point-2", "Checkpoint 2 reached", Vec3::new(0.5, 12.0, -42.0)),
                Checkpoint::waypoint("point-3", "Checkpoint 3 reached", Vec3::new(-14.0, 8.0, -35.0)),
                Checkpoint::goal("end", delivered, Vec3::new(-22.0, 1.0, -20.0)),
            ],
        },
        CourseLayout {
            name: "low streets",
            checkpoints: vec![
                Checkpoint::waypoint("point-1", "Checkpoint 1 reached", Vec3::new(20.0, 2.5, -4.0)),
                Checkpoint::waypoint("point-2", "Checkpoint 2 reached", Vec3::new(8.0, 3.0, 10.0)),
                Checkpoint::waypoint("point-3", "Checkpoint 3 reached", Vec3::new(-6.0, 2.5, 16.0)),
                Checkpoint::goal("end", delivered, Vec3::new(-18.0, 1.0, 24.0)),
            ],
        },
    ]
}

/// Picks a layout index: the pinned one when valid, otherwise a random one.
///
/// Returns `None` only for an empty pool.
pub fn choose_layout(pool_len: usize, pinned: Option<usize>, rng: &mut impl Rng) -> Option<usize> {
    if pool_len == 0 {
        return None;
    }
    match pinned {
        Some(index) if index < pool_len => Some(index),
        _ => Some(rng.random_range(0..pool_len)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const CP: Vec3 = Vec3::new(6.7, 5.7, -14.8);

    fn single() -> CheckpointSet {
        CheckpointSet::new(vec![Checkpoint::waypoint("point-1", "Checkpoint 1", CP)])
    }

    /// Point at exactly `dist_sq` squared distance from `CP` along X.
    fn at_squared_distance(dist_sq: f32) -> Vec3 {
        CP + Vec3::X * dist_sq.sqrt()
    }

    #[test]
    fn inside_radius_is_reported() {
        let mut set = single();
        let events = set.check_all(at_squared_distance(3.0));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "point-1");
        assert!(!events[0].completes_mission());
    }

    #[test]
    fn outside_radius_is_not_reported() {
        let mut set = single();
        assert!(set.check_all(at_squared_distance(5.0)).is_empty());
        assert_eq!(set.reached_count(), 0);
    }

    #[test]
    fn lingering_fires_once() {
        let mut set = single();
        let inside = at_squared_distance(1.0);
        assert_eq!(set.check_all(inside).len(), 1);
        for _ in 0..100 {
            assert!(set.check_all(inside).is_empty());
        }
        // Leaving and coming back does not re-fire either.
        assert!(set.check_all(CP + Vec3::X * 50.0).is_empty());
        assert!(set.check_all(inside).is_empty());
    }

    #[test]
    fn reset_allows_exactly_one_more_event() {
        let mut set = single();
        let inside = at_squared_distance(1.0);
        set.check_all(inside);
        set.reset_all();
        assert_eq!(set.reached_count(), 0);
        assert_eq!(set.check_all(inside).len(), 1);
        assert!(set.check_all(inside).is_empty());
    }

    #[test]
    fn checkpoints_can_be_reached_in_any_order() {
        let mut set = CheckpointSet::new(vec![
            Checkpoint::waypoint("a", "A", Vec3::ZERO),
            Checkpoint::waypoint("b", "B", Vec3::new(10.0, 0.0, 0.0)),
            Checkpoint::goal("end", "End", Vec3::new(20.0, 0.0, 0.0)),
        ]);
        let goal = set.check_all(Vec3::new(20.0, 0.5, 0.0));
        assert_eq!(goal.len(), 1);
        assert!(goal[0].completes_mission());
        assert_eq!(set.check_all(Vec3::new(10.0, 0.0, 0.5))[0].id, "b");
        assert_eq!(set.reached_count(), 2);
    }

    #[test]
    fn overlapping_checkpoints_report_together() {
        let mut set = CheckpointSet::new(vec![
            Checkpoint::waypoint("a", "A", Vec3::ZERO),
            Checkpoint {
                radius: 3.0,
                ..Checkpoint::waypoint("b", "B", Vec3::new(0.5, 0.0, 0.0))
            },
        ]);
        let ids: Vec<_> = set.check_all(Vec3::ZERO).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn every_layout_has_exactly_one_goal() {
        let pool = layout_pool();
        assert!(!pool.is_empty());
        for layout in pool {
            let goals = layout
                .checkpoints
                .iter()
                .filter(|cp| cp.kind == CheckpointKind::Goal)
                .count();
            assert_eq!(goals, 1, "{}", layout.name);
        }
    }

    #[test]
    fn pinned_layout_wins_when_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(choose_layout(3, Some(2), &mut rng), Some(2));
        assert!(choose_layout(3, Some(9), &mut rng).is_some_and(|i| i < 3));
        assert!(choose_layout(3, None, &mut rng).is_some_and(|i| i < 3));
        assert_eq!(choose_layout(0, None, &mut rng), None);
    }
}
