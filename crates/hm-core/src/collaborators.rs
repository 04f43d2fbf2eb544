//! Interfaces to the host application
//!
//! The controller never talks to input devices or a focus manager directly.
//! Hosts implement these traits and pass them in.

use std::collections::{BTreeMap, HashMap};

use glam::Vec3;
use uuid::Uuid;

use crate::contact::ContactId;

/// Live position lookup for active input sources.
///
/// Returning `None` means the source is lost; the controller drops the
/// contact as if it had been released.
pub trait ContactSource {
    fn position(&self, id: ContactId) -> Option<Vec3>;
}

impl ContactSource for HashMap<ContactId, Vec3> {
    fn position(&self, id: ContactId) -> Option<Vec3> {
        self.get(&id).copied()
    }
}

impl ContactSource for BTreeMap<ContactId, Vec3> {
    fn position(&self, id: ContactId) -> Option<Vec3> {
        self.get(&id).copied()
    }
}

impl<S: ContactSource + ?Sized> ContactSource for &S {
    fn position(&self, id: ContactId) -> Option<Vec3> {
        (**self).position(id)
    }
}

/// Exclusive input routing.
///
/// Called once when a manipulation starts and once when it ends, never
/// nested.
pub trait FocusHandler {
    fn acquire_exclusive(&mut self, target: Uuid);
    fn release_exclusive(&mut self, target: Uuid);
}

/// No focus management
impl FocusHandler for () {
    fn acquire_exclusive(&mut self, _target: Uuid) {}
    fn release_exclusive(&mut self, _target: Uuid) {}
}

impl<F: FocusHandler + ?Sized> FocusHandler for Box<F> {
    fn acquire_exclusive(&mut self, target: Uuid) {
        (**self).acquire_exclusive(target);
    }

    fn release_exclusive(&mut self, target: Uuid) {
        (**self).release_exclusive(target);
    }
}
