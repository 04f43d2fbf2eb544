//! Per-tick manipulation orchestration

use glam::Vec3;
use uuid::Uuid;

use crate::collaborators::{ContactSource, FocusHandler};
use crate::config::ManipulationConfig;
use crate::contact::{ContactId, ContactTracker};
use crate::event::ManipulationEvent;
use crate::logic::{MoveLogic, RotateLogic, ScaleLogic};
use crate::state::{ManipulationCapabilities, ManipulationState};
use crate::transform::{HostTransform, TransformTarget};

/// Strategies set up for the current phase
#[derive(Debug, Default)]
struct ActiveLogic {
    moving: Option<MoveLogic>,
    rotating: Option<RotateLogic>,
    scaling: Option<ScaleLogic>,
    /// Contacts the strategies were set up with
    contact_ids: Vec<ContactId>,
}

/// Drives one manipulable object.
///
/// Contact events may arrive at any time through the `on_contact_*` entry
/// points; they take effect at the next [`tick`](Self::tick). The host calls
/// `tick` once per frame.
#[derive(Debug)]
pub struct ManipulationController<F: FocusHandler = ()> {
    target_id: Uuid,
    config: ManipulationConfig,
    contacts: ContactTracker,
    state: ManipulationState,
    active: ActiveLogic,
    focus: F,
}

impl ManipulationController<()> {
    /// Create a controller without focus management
    pub fn unfocused(config: ManipulationConfig) -> Self {
        Self::new(Uuid::new_v4(), config, ())
    }
}

impl<F: FocusHandler> ManipulationController<F> {
    /// Create a new controller for the object identified by `target_id`
    pub fn new(target_id: Uuid, config: ManipulationConfig, focus: F) -> Self {
        Self {
            target_id,
            config,
            contacts: ContactTracker::new(),
            state: ManipulationState::None,
            active: ActiveLogic::default(),
            focus,
        }
    }

    pub fn target_id(&self) -> Uuid {
        self.target_id
    }

    pub fn state(&self) -> ManipulationState {
        self.state
    }

    pub fn is_manipulating(&self) -> bool {
        self.state.is_active()
    }

    pub fn contacts(&self) -> &ContactTracker {
        &self.contacts
    }

    pub fn config(&self) -> &ManipulationConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// A running two-hand phase keeps its state and strategies; the new
    /// capabilities apply from the next crossing into two-hand mode.
    pub fn set_config(&mut self, config: ManipulationConfig) {
        if self.state.is_two_hand() {
            tracing::debug!(
                "Config changed during {:?}, applies to the next two-hand phase",
                self.state
            );
        }
        self.config = config;
    }

    pub fn focus(&self) -> &F {
        &self.focus
    }

    // ============== Contact Entry Points ==============

    /// An input source was pressed on this object
    pub fn on_contact_added(&mut self, id: ContactId, position: Vec3) {
        self.contacts.add(id, position);
    }

    /// A tracked input source moved
    pub fn on_contact_moved(&mut self, id: ContactId, position: Vec3) {
        self.contacts.update(id, position);
    }

    /// An input source was released or lost
    pub fn on_contact_removed(&mut self, id: ContactId) {
        self.contacts.remove(id);
    }

    // ============== Tick ==============

    /// Advance one frame.
    ///
    /// Refreshes contact positions from `source`, recomputes the state and
    /// either sets up the strategies of a new state or applies the running
    /// ones to `target`. Returns the notifications raised, in firing order.
    pub fn tick<S, T>(&mut self, source: &S, target: &mut T) -> Vec<ManipulationEvent>
    where
        S: ContactSource + ?Sized,
        T: TransformTarget + ?Sized,
    {
        self.refresh_contacts(source);

        let next = self.state.next(
            self.contacts.count(),
            self.config.capabilities,
            self.config.one_hand_move,
        );
        // All strategies read the same start-of-tick snapshot
        let snapshot = target.transform();
        let mut events = Vec::new();

        if next != self.state {
            self.transition(next, &snapshot, &mut events);
            return events;
        }

        if self.state.is_active() && self.contacts.ids() != self.active.contact_ids {
            // Same gesture with a different set of hands: re-capture the
            // geometry so the centroid, handlebar and spread do not jump.
            tracing::debug!(
                "Contacts changed during {:?}, re-running setup",
                self.state
            );
            self.active = ActiveLogic::default();
            self.setup(self.state, &snapshot);
            return events;
        }

        let updated = match self.state {
            ManipulationState::None => None,
            ManipulationState::Move => self.update_move(&snapshot),
            _ => Some(self.update_two_hand(&snapshot)),
        };
        if let Some(transform) = updated {
            tracing::trace!("Writing {:?} to {}", transform, self.target_id);
            target.set_transform(transform);
        }

        events
    }

    fn refresh_contacts<S: ContactSource + ?Sized>(&mut self, source: &S) {
        for id in self.contacts.ids() {
            match source.position(id) {
                Some(position) => self.contacts.update(id, position),
                None => {
                    tracing::warn!("Contact {} lost, dropping", id);
                    self.contacts.remove(id);
                }
            }
        }
    }

    fn transition(
        &mut self,
        next: ManipulationState,
        snapshot: &HostTransform,
        events: &mut Vec<ManipulationEvent>,
    ) {
        let prev = self.state;
        tracing::debug!("{:?} -> {:?} with {} contacts", prev, next, self.contacts.count());

        if prev.is_two_hand() {
            events.push(ManipulationEvent::TwoHandEnded(prev));
        } else if prev == ManipulationState::Move {
            events.push(ManipulationEvent::OneHandEnded);
        }

        if prev == ManipulationState::None {
            tracing::info!("Manipulation of {} started", self.target_id);
            self.focus.acquire_exclusive(self.target_id);
            events.push(ManipulationEvent::Started);
        }

        self.active = ActiveLogic::default();
        self.state = next;

        match next {
            ManipulationState::None => {
                tracing::info!("Manipulation of {} ended", self.target_id);
                self.focus.release_exclusive(self.target_id);
                events.push(ManipulationEvent::Ended);
            }
            ManipulationState::Move => {
                self.setup(next, snapshot);
                events.push(ManipulationEvent::OneHandStarted);
            }
            _ => {
                self.setup(next, snapshot);
                events.push(ManipulationEvent::TwoHandStarted(next));
            }
        }
    }

    /// Set up the strategies of `state` against the current contacts
    fn setup(&mut self, state: ManipulationState, snapshot: &HostTransform) {
        self.active.contact_ids = self.contacts.ids();
        match state {
            ManipulationState::None => {}
            ManipulationState::Move => self.setup_move(snapshot),
            _ => self.setup_two_hand(state.capabilities(), snapshot),
        }
    }

    fn setup_move(&mut self, snapshot: &HostTransform) {
        debug_assert!(!self.contacts.is_empty(), "move setup without contacts");
        if let Some(anchor) = self.contacts.centroid() {
            self.active.moving = Some(MoveLogic::setup(anchor, snapshot));
        }
    }

    fn setup_two_hand(&mut self, caps: ManipulationCapabilities, snapshot: &HostTransform) {
        if caps.contains(ManipulationCapabilities::MOVE) {
            self.setup_move(snapshot);
        }
        let positions = self.contacts.positions();
        if caps.contains(ManipulationCapabilities::ROTATE) {
            self.active.rotating = Some(RotateLogic::setup(
                positions,
                self.config.rotation_constraint,
            ));
        }
        if caps.contains(ManipulationCapabilities::SCALE) {
            self.active.scaling = Some(ScaleLogic::setup(
                positions,
                snapshot,
                self.config.scale_limits,
            ));
        }
    }

    fn update_move(&self, snapshot: &HostTransform) -> Option<HostTransform> {
        let anchor = self.contacts.centroid()?;
        let moving = self.active.moving.as_ref()?;
        Some(HostTransform {
            position: moving.update(anchor),
            ..*snapshot
        })
    }

    fn update_two_hand(&mut self, snapshot: &HostTransform) -> HostTransform {
        let positions = self.contacts.positions();
        let mut out = *snapshot;

        if let (Some(moving), Some(anchor)) = (&self.active.moving, self.contacts.centroid()) {
            out.position = moving.update(anchor);
        }
        if let Some(rotating) = &mut self.active.rotating {
            out.rotation = rotating.update(positions, snapshot.rotation);
        }
        if let Some(scaling) = &mut self.active.scaling {
            out.scale = scaling.update(positions);
        }

        out
    }
}
