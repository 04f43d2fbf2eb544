//! Recording focus collaborator

use std::sync::Arc;

use hm_core::FocusHandler;
use parking_lot::Mutex;
use uuid::Uuid;

/// Focus calls observed during a replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusLog {
    pub acquired: u32,
    pub released: u32,
    /// Object currently holding exclusive input
    pub holder: Option<Uuid>,
}

/// Focus log shared between the controller and the replay driver
pub type SharedFocus = Arc<Mutex<FocusLog>>;

/// Controller-side handle to a [`SharedFocus`]
#[derive(Debug, Clone, Default)]
pub struct FocusRecorder {
    log: SharedFocus,
}

impl FocusRecorder {
    pub fn new(log: SharedFocus) -> Self {
        Self { log }
    }

    pub fn log(&self) -> SharedFocus {
        Arc::clone(&self.log)
    }
}

impl FocusHandler for FocusRecorder {
    fn acquire_exclusive(&mut self, target: Uuid) {
        let mut log = self.log.lock();
        if let Some(holder) = log.holder {
            tracing::warn!("Focus acquired by {} while held by {}", target, holder);
        }
        log.acquired += 1;
        log.holder = Some(target);
    }

    fn release_exclusive(&mut self, target: Uuid) {
        let mut log = self.log.lock();
        if log.holder != Some(target) {
            tracing::warn!("Focus released by {} which does not hold it", target);
        }
        log.released += 1;
        log.holder = None;
    }
}
