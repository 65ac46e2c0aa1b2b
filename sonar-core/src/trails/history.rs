use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// One past (angle, range) sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    /// Signed angle in degrees
    pub angle: f64,
    /// Range in meters
    pub range: f64,
}

impl TrailPoint {
    pub fn new(angle: f64, range: f64) -> Self {
        TrailPoint { angle, range }
    }
}

/// Bounded, chronologically ordered trail of samples.
///
/// `len() <= capacity()` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Trail {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append the newest sample, evicting the oldest when full
    pub fn push(&mut self, point: TrailPoint) {
        if self.capacity == 0 {
            return;
        }
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Change the capacity, keeping the newest samples
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.points.len() > capacity {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn newest(&self) -> Option<&TrailPoint> {
        self.points.back()
    }

    pub fn oldest(&self) -> Option<&TrailPoint> {
        self.points.front()
    }

    /// Samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    pub fn to_vec(&self) -> Vec<TrailPoint> {
        self.points.iter().copied().collect()
    }

    /// Apply `f` to every stored sample, keeping their order
    pub fn update(&mut self, f: impl Fn(&mut TrailPoint)) {
        self.points.iter_mut().for_each(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity() {
        let mut trail = Trail::new(3);
        trail.push(TrailPoint::new(0.0, 100.0));
        trail.push(TrailPoint::new(1.0, 110.0));
        assert_eq!(trail.len(), 2);
        assert_eq!(trail.oldest(), Some(&TrailPoint::new(0.0, 100.0)));
        assert_eq!(trail.newest(), Some(&TrailPoint::new(1.0, 110.0)));
    }

    #[test]
    fn test_eviction_keeps_most_recent_in_order() {
        let capacity = 20;
        let extra = 7;
        let mut trail = Trail::new(capacity);
        for i in 0..(capacity + extra) {
            trail.push(TrailPoint::new(i as f64, 0.0));
            assert!(trail.len() <= capacity);
        }
        assert_eq!(trail.len(), capacity);
        let angles: Vec<f64> = trail.iter().map(|p| p.angle).collect();
        let expected: Vec<f64> = (extra..capacity + extra).map(|i| i as f64).collect();
        assert_eq!(angles, expected);
    }

    #[test]
    fn test_shrink_capacity() {
        let mut trail = Trail::new(5);
        for i in 0..5 {
            trail.push(TrailPoint::new(i as f64, 0.0));
        }
        trail.set_capacity(2);
        assert_eq!(trail.len(), 2);
        assert_eq!(trail.oldest().unwrap().angle, 3.0);
        assert_eq!(trail.newest().unwrap().angle, 4.0);
    }

    #[test]
    fn test_zero_capacity_stays_empty() {
        let mut trail = Trail::new(0);
        trail.push(TrailPoint::new(1.0, 1.0));
        assert!(trail.is_empty());
    }

    #[test]
    fn test_update_in_place() {
        let mut trail = Trail::new(3);
        trail.push(TrailPoint::new(1.0, 300.0));
        trail.push(TrailPoint::new(2.0, 500.0));
        trail.update(|p| p.range = p.range.min(400.0));
        assert_eq!(trail.to_vec(), vec![TrailPoint::new(1.0, 300.0), TrailPoint::new(2.0, 400.0)]);
    }

    #[test]
    fn test_clear() {
        let mut trail = Trail::new(4);
        trail.push(TrailPoint::new(1.0, 1.0));
        trail.clear();
        assert!(trail.is_empty());
        assert_eq!(trail.capacity(), 4);
    }
}
