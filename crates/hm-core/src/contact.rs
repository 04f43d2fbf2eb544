//! Active contact point tracking

use std::collections::BTreeMap;
use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Opaque identifier of an input source (hand, controller, pointer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub u32);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for ContactId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Set of currently pressed contacts and their latest world positions.
///
/// Ordered by id so that "the first two contacts" is stable across ticks.
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    contacts: BTreeMap<ContactId, Vec3>,
}

impl ContactTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a contact, overwriting the position if it is already tracked
    pub fn add(&mut self, id: ContactId, position: Vec3) {
        if self.contacts.insert(id, position).is_none() {
            tracing::debug!("Contact {} added at {:?}", id, position);
        }
    }

    /// Move a tracked contact. Unknown ids are ignored.
    pub fn update(&mut self, id: ContactId, position: Vec3) {
        if let Some(p) = self.contacts.get_mut(&id) {
            *p = position;
        }
    }

    /// Drop a contact. Unknown ids are ignored.
    pub fn remove(&mut self, id: ContactId) -> Option<Vec3> {
        let removed = self.contacts.remove(&id);
        if removed.is_some() {
            tracing::debug!("Contact {} removed", id);
        }
        removed
    }

    /// Number of active contacts
    pub fn count(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn contains(&self, id: ContactId) -> bool {
        self.contacts.contains_key(&id)
    }

    /// Position of a single contact
    pub fn get(&self, id: ContactId) -> Option<Vec3> {
        self.contacts.get(&id).copied()
    }

    /// Full id -> position mapping
    pub fn positions(&self) -> &BTreeMap<ContactId, Vec3> {
        &self.contacts
    }

    /// Snapshot of the tracked ids
    pub fn ids(&self) -> Vec<ContactId> {
        self.contacts.keys().copied().collect()
    }

    /// Arithmetic mean of all contact positions, `None` when empty
    pub fn centroid(&self) -> Option<Vec3> {
        centroid(self.contacts.values().copied())
    }

    /// Vector from the first to the second contact (ordered by id)
    pub fn handlebar(&self) -> Option<Vec3> {
        handlebar(&self.contacts)
    }

    /// Smallest distance between any two contacts
    pub fn min_pair_distance(&self) -> Option<f32> {
        min_pair_distance(&self.contacts)
    }
}

/// Arithmetic mean of a set of points
pub fn centroid(points: impl IntoIterator<Item = Vec3>) -> Option<Vec3> {
    let (sum, n) = points
        .into_iter()
        .fold((Vec3::ZERO, 0u32), |(sum, n), p| (sum + p, n + 1));
    (n > 0).then(|| sum / n as f32)
}

/// Vector between the two lowest-id contacts
pub fn handlebar(contacts: &BTreeMap<ContactId, Vec3>) -> Option<Vec3> {
    let mut iter = contacts.values();
    let first = *iter.next()?;
    let second = *iter.next()?;
    Some(second - first)
}

/// Minimum pairwise distance, `None` with fewer than two contacts
pub fn min_pair_distance(contacts: &BTreeMap<ContactId, Vec3>) -> Option<f32> {
    let points: Vec<Vec3> = contacts.values().copied().collect();
    let mut min: Option<f32> = None;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let d = a.distance(*b);
            min = Some(min.map_or(d, |m| m.min(d)));
        }
    }
    min
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_is_idempotent() {
        let mut tracker = ContactTracker::new();
        tracker.add(ContactId(1), Vec3::ZERO);
        tracker.add(ContactId(1), Vec3::X);

        assert_eq!(tracker.count(), 1);
        assert_eq!(tracker.get(ContactId(1)), Some(Vec3::X));
    }

    #[test]
    fn test_update_and_remove_unknown_are_noops() {
        let mut tracker = ContactTracker::new();
        tracker.add(ContactId(1), Vec3::ZERO);

        tracker.update(ContactId(7), Vec3::ONE);
        assert!(!tracker.contains(ContactId(7)));

        assert!(tracker.remove(ContactId(7)).is_none());
        assert_eq!(tracker.count(), 1);
    }

    #[test]
    fn test_update_moves_tracked_contact() {
        let mut tracker = ContactTracker::new();
        tracker.add(ContactId(3), Vec3::ZERO);
        tracker.update(ContactId(3), Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(tracker.get(ContactId(3)), Some(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_centroid() {
        let mut tracker = ContactTracker::new();
        assert!(tracker.centroid().is_none());

        tracker.add(ContactId(1), Vec3::new(0.0, 0.0, 0.0));
        tracker.add(ContactId(2), Vec3::new(2.0, 4.0, 0.0));
        let c = tracker.centroid().unwrap();
        assert!(c.abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1e-6));
    }

    #[test]
    fn test_handlebar_uses_lowest_ids() {
        let mut tracker = ContactTracker::new();
        tracker.add(ContactId(9), Vec3::new(0.0, 5.0, 0.0));
        tracker.add(ContactId(2), Vec3::new(1.0, 0.0, 0.0));
        let h = tracker.handlebar().unwrap();
        assert!(h.abs_diff_eq(Vec3::new(-1.0, 5.0, 0.0), 1e-6));

        tracker.add(ContactId(4), Vec3::new(3.0, 0.0, 0.0));
        let h = tracker.handlebar().unwrap();
        assert!(h.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn test_min_pair_distance() {
        let mut tracker = ContactTracker::new();
        tracker.add(ContactId(1), Vec3::ZERO);
        assert!(tracker.min_pair_distance().is_none());

        tracker.add(ContactId(2), Vec3::new(4.0, 0.0, 0.0));
        tracker.add(ContactId(3), Vec3::new(4.0, 1.5, 0.0));
        assert_relative_eq!(tracker.min_pair_distance().unwrap(), 1.5);
    }
}
