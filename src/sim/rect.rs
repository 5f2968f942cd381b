//! Axis-aligned rectangles and the broad-phase overlap query
//!
//! Every collider in the arena (walls, hazards, actors, bullets) is an
//! axis-aligned box. World y grows upward, so `top` is the larger y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle stored as min/max corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap: rectangles that only share an edge do not overlap.
    ///
    /// Resolution clamps a box flush against the wall it hit, so touching
    /// must not count as a new contact on the next query.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Indices of every candidate overlapping `query`, in candidate order
pub fn rects_overlapping<'a>(
    query: &'a Rect,
    candidates: &'a [Rect],
) -> impl Iterator<Item = usize> + 'a {
    candidates
        .iter()
        .enumerate()
        .filter(move |(_, r)| query.overlaps(r))
        .map(|(i, _)| i)
}

/// Whether `query` overlaps at least one candidate
pub fn overlaps_any(query: &Rect, candidates: &[Rect]) -> bool {
    candidates.iter().any(|r| query.overlaps(r))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(x: f32, y: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(x + 10.0, y + 10.0))
    }

    #[test]
    fn test_overlap() {
        let a = tile(0.0, 0.0);
        assert!(a.overlaps(&tile(5.0, 5.0)));
        assert!(a.overlaps(&tile(-9.0, 9.0)));
        assert!(!a.overlaps(&tile(20.0, 0.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = tile(0.0, 0.0);
        assert!(!a.overlaps(&tile(10.0, 0.0)));
        assert!(!a.overlaps(&tile(0.0, -10.0)));
        assert!(!a.overlaps(&tile(10.0, 10.0)));
    }

    #[test]
    fn test_rects_overlapping_returns_indices() {
        let walls = [tile(0.0, 0.0), tile(100.0, 0.0), tile(8.0, 0.0)];
        let query = Rect::from_center(Vec2::new(9.0, 5.0), Vec2::splat(4.0));
        let hits: Vec<usize> = rects_overlapping(&query, &walls).collect();
        assert_eq!(hits, vec![0, 2]);
        assert!(overlaps_any(&query, &walls));
        assert!(!overlaps_any(&query, &walls[1..2]));
    }

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(100.0, 50.0), Vec2::new(8.0, 4.0));
        assert_eq!(r.left(), 96.0);
        assert_eq!(r.right(), 104.0);
        assert_eq!(r.bottom(), 48.0);
        assert_eq!(r.top(), 52.0);
        assert_eq!(r.center(), Vec2::new(100.0, 50.0));
        assert_eq!(r.size(), Vec2::new(8.0, 4.0));
    }
}
