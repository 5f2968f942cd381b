//! Collision response against static walls
//!
//! Both bullets and players resolve movement one axis at a time: move along X,
//! push out of anything hit, then do the same for Y. A body grazing a wall
//! therefore keeps sliding along it instead of stopping on contact. Fast, thin
//! geometry can still tunnel and corners are ambiguous, which is acceptable at
//! arena speeds and tile sizes.

use glam::Vec2;

use super::rect::{Rect, rects_overlapping};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }
}

/// Result of moving a bullet for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BounceResult {
    pub bounced_x: bool,
    pub bounced_y: bool,
}

impl BounceResult {
    pub fn any(&self) -> bool {
        self.bounced_x || self.bounced_y
    }

    /// Number of reflections this tick (0, 1 or 2)
    pub fn count(&self) -> u32 {
        self.bounced_x as u32 + self.bounced_y as u32
    }
}

/// Translate `body` by `delta` along `axis`, then push it flush against the
/// walls it now overlaps. Returns the indices of those walls.
///
/// With several overlaps the most restrictive face wins, so the body never
/// ends up inside any of them. A zero delta reports overlaps without moving.
pub fn move_and_clamp_axis(body: &mut Rect, axis: Axis, delta: f32, walls: &[Rect]) -> Vec<usize> {
    let offset = match axis {
        Axis::X => Vec2::new(delta, 0.0),
        Axis::Y => Vec2::new(0.0, delta),
    };
    body.min += offset;
    body.max += offset;

    let hits: Vec<usize> = rects_overlapping(body, walls).collect();
    if hits.is_empty() {
        return hits;
    }

    let extent = axis.of(body.size());
    if delta > 0.0 {
        // Moving toward +axis: leading edge meets the nearest wall's near face
        let face = hits
            .iter()
            .map(|&i| axis.of(walls[i].min))
            .fold(f32::INFINITY, f32::min);
        set_axis_span(body, axis, face - extent, face);
    } else if delta < 0.0 {
        let face = hits
            .iter()
            .map(|&i| axis.of(walls[i].max))
            .fold(f32::NEG_INFINITY, f32::max);
        set_axis_span(body, axis, face, face + extent);
    }

    hits
}

fn set_axis_span(body: &mut Rect, axis: Axis, lo: f32, hi: f32) {
    match axis {
        Axis::X => {
            body.min.x = lo;
            body.max.x = hi;
        }
        Axis::Y => {
            body.min.y = lo;
            body.max.y = hi;
        }
    }
}

/// Advance a bullet by `vel` for one tick, reflecting each blocked axis.
///
/// `pos` is the bullet center. A blocked axis has its velocity component
/// negated; the other axis is untouched.
pub fn ricochet_step(pos: &mut Vec2, vel: &mut Vec2, size: Vec2, walls: &[Rect]) -> BounceResult {
    let mut body = Rect::from_center(*pos, size);
    let mut result = BounceResult::default();

    if !move_and_clamp_axis(&mut body, Axis::X, vel.x, walls).is_empty() {
        vel.x = -vel.x;
        result.bounced_x = true;
    }

    if !move_and_clamp_axis(&mut body, Axis::Y, vel.y, walls).is_empty() {
        vel.y = -vel.y;
        result.bounced_y = true;
    }

    *pos = body.center();
    result
}

/// Moves a body against static walls for one tick.
///
/// The simulation only reads whether the returned set is empty; the stepper
/// owns how overlap is resolved.
pub trait KinematicStepper {
    /// Move `body` by `velocity`, resolve overlap with `walls`, and return the
    /// indices of the walls it collided with (sorted, no duplicates)
    fn step(&mut self, body: &mut Rect, velocity: Vec2, walls: &[Rect]) -> Vec<usize>;
}

/// Axis-separated stop-at-wall movement with no bounce or friction
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleStepper;

impl KinematicStepper for SimpleStepper {
    fn step(&mut self, body: &mut Rect, velocity: Vec2, walls: &[Rect]) -> Vec<usize> {
        let mut hits = move_and_clamp_axis(body, Axis::X, velocity.x, walls);
        hits.extend(move_and_clamp_axis(body, Axis::Y, velocity.y, walls));
        hits.sort_unstable();
        hits.dedup();
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
        Rect::new(Vec2::new(x0, y0), Vec2::new(x1, y1))
    }

    #[test]
    fn test_free_flight() {
        let walls = [wall(500.0, 0.0, 510.0, 1000.0)];
        let mut pos = Vec2::new(100.0, 100.0);
        let mut vel = Vec2::new(3.0, -2.0);
        let result = ricochet_step(&mut pos, &mut vel, Vec2::splat(8.0), &walls);
        assert!(!result.any());
        assert_eq!(pos, Vec2::new(103.0, 98.0));
        assert_eq!(vel, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_right_edge_clamps_to_wall() {
        let walls = [wall(103.0, 50.0, 110.0, 150.0)];
        let mut pos = Vec2::new(100.0, 100.0);
        let mut vel = Vec2::new(5.0, 0.0);
        let size = Vec2::splat(8.0);
        let result = ricochet_step(&mut pos, &mut vel, size, &walls);

        assert!(result.bounced_x);
        assert!(!result.bounced_y);
        assert_eq!(result.count(), 1);
        assert_eq!(Rect::from_center(pos, size).right(), 103.0);
        assert_eq!(vel, Vec2::new(-5.0, 0.0));
    }

    #[test]
    fn test_left_edge_clamps_to_wall() {
        let walls = [wall(80.0, 50.0, 97.0, 150.0)];
        let mut pos = Vec2::new(104.0, 100.0);
        let mut vel = Vec2::new(-5.0, 0.0);
        let size = Vec2::splat(8.0);
        let result = ricochet_step(&mut pos, &mut vel, size, &walls);

        assert!(result.bounced_x);
        assert_eq!(Rect::from_center(pos, size).left(), 97.0);
        assert_eq!(vel.x, 5.0);
    }

    #[test]
    fn test_diagonal_hit_only_reflects_blocked_axis() {
        // Vertical wall to the right; the bullet keeps climbing along it
        let walls = [wall(106.0, 0.0, 120.0, 1000.0)];
        let mut pos = Vec2::new(100.0, 100.0);
        let mut vel = Vec2::new(4.0, 3.0);
        let result = ricochet_step(&mut pos, &mut vel, Vec2::splat(8.0), &walls);

        assert!(result.bounced_x);
        assert!(!result.bounced_y);
        assert_eq!(vel, Vec2::new(-4.0, 3.0));
        assert_eq!(pos.y, 103.0);
    }

    #[test]
    fn test_floor_reflects_y() {
        let walls = [wall(0.0, 0.0, 1000.0, 95.0)];
        let mut pos = Vec2::new(100.0, 100.0);
        let mut vel = Vec2::new(2.0, -3.0);
        let size = Vec2::splat(8.0);
        let result = ricochet_step(&mut pos, &mut vel, size, &walls);

        assert!(!result.bounced_x);
        assert!(result.bounced_y);
        assert_eq!(vel, Vec2::new(2.0, 3.0));
        assert_eq!(Rect::from_center(pos, size).bottom(), 95.0);
    }

    #[test]
    fn test_corner_reflects_both_axes() {
        let walls = [
            wall(106.0, 0.0, 120.0, 1000.0),
            wall(0.0, 106.0, 105.0, 120.0),
        ];
        let mut pos = Vec2::new(100.0, 100.0);
        let mut vel = Vec2::new(4.0, 4.0);
        let result = ricochet_step(&mut pos, &mut vel, Vec2::splat(8.0), &walls);
        assert_eq!(result.count(), 2);
        assert_eq!(vel, Vec2::new(-4.0, -4.0));
    }

    #[test]
    fn test_multiple_overlaps_use_nearest_face() {
        let walls = [wall(106.0, 0.0, 120.0, 50.0), wall(104.0, 50.0, 120.0, 200.0)];
        let mut body = Rect::from_center(Vec2::new(100.0, 50.0), Vec2::splat(8.0));
        let hits = move_and_clamp_axis(&mut body, Axis::X, 5.0, &walls);
        assert_eq!(hits, vec![0, 1]);
        assert_eq!(body.right(), 104.0);
        assert!(!walls.iter().any(|w| w.overlaps(&body)));
    }

    #[test]
    fn test_simple_stepper_slides_along_wall() {
        let walls = [wall(120.0, 0.0, 140.0, 1000.0)];
        let mut body = Rect::from_center(Vec2::new(100.0, 100.0), Vec2::splat(32.0));
        let hits = SimpleStepper.step(&mut body, Vec2::new(5.0, 5.0), &walls);

        assert_eq!(hits, vec![0]);
        assert_eq!(body.right(), 120.0);
        assert_eq!(body.center().y, 105.0);
    }

    #[test]
    fn test_simple_stepper_open_floor() {
        let walls = [wall(500.0, 500.0, 520.0, 520.0)];
        let mut body = Rect::from_center(Vec2::ZERO, Vec2::splat(32.0));
        let hits = SimpleStepper.step(&mut body, Vec2::new(-3.0, 2.0), &walls);
        assert!(hits.is_empty());
        assert_eq!(body.center(), Vec2::new(-3.0, 2.0));
    }
}
