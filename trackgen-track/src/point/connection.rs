//! Connection points on the border of a tile, and the twin protocol linking them across tiles.
//!
//! Two linked connection points (twins) lie on the shared border of neighbouring tiles.
//! Every update of one of them is mirrored to the other one, so both describe the same
//! point of the track.

use std::sync::{Arc, Weak};

use enum_iterator::all;
use log::{debug, trace};
use parking_lot::Mutex;

use trackgen_types::{border::Border, scalar::Scalar, vector::Vector};

use crate::{
    config::TILE_SIZE,
    error::{InvalidPosition, LinkError, PositionFault},
    point::{normalized, Point},
    road_element::AnyElementId,
};


/// State of a connection point, shared with the weak reference held by its twin.
type Shared = Arc<Mutex<State>>;

#[derive(Debug)]
struct State {
    position: Vector,
    direction: Vector,
    border: Border,
    twin: Option<Weak<Mutex<State>>>,
    fixed_to_border: bool,
    /// Set while an update is forwarded to the twin.
    propagating: bool,
    update_count: u64,
    owner: Option<AnyElementId>,
}

impl State {
    /// Check a new position and direction, without changing the state.
    fn validate(&self, position: Vector, direction: Vector) -> Result<Placement, InvalidPosition> {
        let fixed = self.fixed_to_border.then_some(self.border);
        validate(position, direction, fixed, self.owner.as_ref())
    }

    fn commit(&mut self, placement: Placement) {
        trace!(
            "Move connection point from {:?} to {:?} ({:?} border).",
            self.position,
            placement.position,
            placement.border
        );
        self.position = placement.position;
        self.direction = placement.direction;
        self.border = placement.border;
        self.update_count = self.update_count.saturating_add(1);
    }

    fn twin(&self) -> Option<Shared> {
        self.twin.as_ref().and_then(Weak::upgrade)
    }

    fn placement(&self) -> Placement {
        Placement { position: self.position, direction: self.direction, border: self.border }
    }
}

/// A validated position, direction and border of a connection point.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Placement {
    position: Vector,
    direction: Vector,
    border: Border,
}

impl Placement {
    /// Position and direction of the twin on the neighbouring tile.
    ///
    /// The coordinate perpendicular to the border is reflected, the direction reversed.
    fn mirrored(&self) -> (Vector, Vector) {
        let Placement { position, direction, border } = *self;
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        let position = if border.is_vertical() {
            Vector { x: TILE_SIZE - position.x, y: position.y }
        } else {
            Vector { x: position.x, y: TILE_SIZE - position.y }
        };
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        {
            (position, -direction)
        }
    }
}

/// All borders whose condition holds for the position and direction.
fn matching_borders(position: Vector, direction: Vector) -> impl Iterator<Item = Border> {
    all::<Border>().filter(move |border| match border {
        Border::Left => position.x == Scalar::ZERO && direction.x < Scalar::ZERO,
        Border::Right => position.x == TILE_SIZE && direction.x > Scalar::ZERO,
        Border::Top => position.y == Scalar::ZERO && direction.y < Scalar::ZERO,
        Border::Bottom => position.y == TILE_SIZE && direction.y > Scalar::ZERO,
    })
}

/// The border a connection point with the given (rounded) position
/// and (normalized) direction lies on.
///
/// A point lies on a border, if it is on the border line and its direction points out of the tile.
///
/// ## Errors
///
/// If no border or more than one border matches.
pub fn classify_border(position: Vector, direction: Vector) -> Result<Border, PositionFault> {
    let mut borders = matching_borders(position, direction);
    match (borders.next(), borders.next()) {
        (Some(border), None) => Ok(border),
        (Some(first), Some(second)) => Err(PositionFault::AmbiguousBorder { first, second }),
        (None, _) => Err(PositionFault::NotOnBorder),
    }
}

/// Normalize position and direction and determine the border.
fn validate(
    position: Vector,
    direction: Vector,
    fixed_border: Option<Border>,
    owner: Option<&AnyElementId>,
) -> Result<Placement, InvalidPosition> {
    let (position, direction) = normalized(position, direction, owner)?;
    let invalid = |fault| InvalidPosition { fault, position, direction, origin: owner.copied() };
    let border = classify_border(position, direction).map_err(invalid)?;
    match fixed_border {
        Some(fixed) if fixed != border => {
            Err(invalid(PositionFault::FixedToBorder { fixed, requested: border }))
        },
        _ => Ok(Placement { position, direction, border }),
    }
}

/// Update a shared state and forward the new state to its twin.
///
/// At most one lock is held at any time.
/// The twin is checked before anything is changed,
/// so a rejected update leaves both points untouched.
/// While the update is forwarded, the `propagating` flag stops the twin from echoing it back again.
fn update_shared(
    shared: &Shared,
    position: Vector,
    direction: Vector,
) -> Result<(), InvalidPosition> {
    let (placement, twin) = {
        let state = shared.lock();
        let placement = state.validate(position, direction)?;
        let twin = if state.propagating { None } else { state.twin() };
        (placement, twin)
    };
    let (twin_position, twin_direction) = placement.mirrored();
    if let Some(twin) = &twin {
        let _ = twin.lock().validate(twin_position, twin_direction)?;
    }
    {
        let mut state = shared.lock();
        state.commit(placement);
        state.propagating = twin.is_some();
    }
    if let Some(twin) = twin {
        trace!("Forward update to twin at {twin_position:?}.");
        let result = update_shared(&twin, twin_position, twin_direction);
        shared.lock().propagating = false;
        result?;
    }
    Ok(())
}

/// Read-only copy of the state of a [`ConnectionPoint`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionPointView {
    /// Position on the border, in tile-local millimetres.
    pub position: Vector,
    /// Direction pointing out of the tile.
    pub direction: Vector,
    /// The border the point lies on.
    pub border: Border,
    /// Is the point linked to a twin?
    pub has_twin: bool,
    /// May the point only move along its current border?
    pub fixed_to_border: bool,
}

/// A point on the border of a tile, where a road leaves the tile.
///
/// The direction always points out of the tile, so the point lies on exactly one [`Border`].
/// A connection point may be linked to a twin on the neighbouring tile,
/// see [`ConnectionPoint::set_twin`].
#[derive(Debug)]
pub struct ConnectionPoint(Shared);

impl ConnectionPoint {
    /// Create a new [`ConnectionPoint`] without a twin.
    ///
    /// The position is rounded to whole millimetres, the direction normalized.
    ///
    /// ## Errors
    ///
    /// If the point is not on exactly one border of the tile, with a direction pointing out of it.
    pub fn new(position: Vector, direction: Vector) -> Result<ConnectionPoint, InvalidPosition> {
        let Placement { position, direction, border } = validate(position, direction, None, None)?;
        trace!("New connection point at {position:?} on the {border:?} border.");
        Ok(ConnectionPoint(Arc::new(Mutex::new(State {
            position,
            direction,
            border,
            twin: None,
            fixed_to_border: false,
            propagating: false,
            update_count: 0,
            owner: None,
        }))))
    }

    /// The border the point lies on.
    #[must_use]
    pub fn border(&self) -> Border {
        self.0.lock().border
    }

    /// Is the point linked to a twin?
    #[must_use]
    pub fn has_twin(&self) -> bool {
        self.0.lock().twin().is_some()
    }

    /// Is the point the twin of `other`?
    #[must_use]
    pub fn is_twin_of(&self, other: &ConnectionPoint) -> bool {
        self.0.lock().twin().is_some_and(|twin| Arc::ptr_eq(&twin, &other.0))
    }

    /// May the point only move along its current border?
    #[must_use]
    pub fn is_fixed_to_border(&self) -> bool {
        self.0.lock().fixed_to_border
    }

    /// Number of successful updates applied to this point.
    #[must_use]
    pub fn update_count(&self) -> u64 {
        self.0.lock().update_count
    }

    /// The road element this point belongs to.
    #[must_use]
    pub fn owner(&self) -> Option<AnyElementId> {
        self.0.lock().owner
    }

    pub(crate) fn set_owner(&self, owner: AnyElementId) {
        self.0.lock().owner = Some(owner);
    }

    /// Copy of the current state.
    #[must_use]
    pub fn view(&self) -> ConnectionPointView {
        let state = self.0.lock();
        ConnectionPointView {
            position: state.position,
            direction: state.direction,
            border: state.border,
            has_twin: state.twin.as_ref().is_some_and(|twin| twin.strong_count() > 0),
            fixed_to_border: state.fixed_to_border,
        }
    }

    /// Move the point and change its direction.
    ///
    /// If the point has a twin, the twin receives the mirrored position and reversed direction.
    /// Only the twin point moves, the road element owning the twin is not realigned to it.
    ///
    /// ## Errors
    ///
    /// If the point or its twin can't take the new position.
    /// Neither point is changed in that case.
    pub fn update(&self, position: Vector, direction: Vector) -> Result<(), InvalidPosition> {
        update_shared(&self.0, position, direction)
    }

    /// Link `self` and `other` as twins.
    ///
    /// `other` is moved to the mirror image of `self`,
    /// afterwards both points are fixed to their border.
    ///
    /// ## Errors
    ///
    /// If both are the same point, if one of them already has a twin,
    /// or if `other` can't take the mirrored position. Neither point is changed in that case.
    pub fn set_twin(&self, other: &ConnectionPoint) -> Result<(), LinkError> {
        if Arc::ptr_eq(&self.0, &other.0) {
            return Err(LinkError::SelfLink);
        }
        let placement = {
            let state = self.0.lock();
            if state.twin().is_some() {
                return Err(LinkError::AlreadyLinked);
            }
            state.placement()
        };
        let (twin_position, twin_direction) = placement.mirrored();
        {
            let other_state = other.0.lock();
            if other_state.twin().is_some() {
                return Err(LinkError::AlreadyLinked);
            }
            let _ = other_state.validate(twin_position, twin_direction)?;
        }
        self.0.lock().twin = Some(Arc::downgrade(&other.0));
        other.0.lock().twin = Some(Arc::downgrade(&self.0));
        if let Err(error) = update_shared(&other.0, twin_position, twin_direction) {
            let _ = self.unlink();
            return Err(error.into());
        }
        self.0.lock().fixed_to_border = true;
        other.0.lock().fixed_to_border = true;
        debug!(
            "Linked connection point at {:?} with its twin at {twin_position:?}.",
            placement.position
        );
        Ok(())
    }

    /// Remove the link to the twin, both points may leave their border afterwards.
    ///
    /// Returns if there was a twin.
    pub fn unlink(&self) -> bool {
        let (twin, position) = {
            let mut state = self.0.lock();
            state.fixed_to_border = false;
            (state.twin.take().and_then(|twin| twin.upgrade()), state.position)
        };
        let Some(twin) = twin else {
            return false;
        };
        let mut twin_state = twin.lock();
        if twin_state.twin.as_ref().is_some_and(|weak| weak.as_ptr() == Arc::as_ptr(&self.0)) {
            twin_state.twin = None;
            twin_state.fixed_to_border = false;
        }
        debug!(
            "Unlinked connection point at {position:?} from its twin at {:?}.",
            twin_state.position
        );
        true
    }

    /// Remember the current state of the point and its twin.
    pub(crate) fn save(&self) -> Vec<SavedState> {
        let (saved, twin) = {
            let state = self.0.lock();
            (SavedState::of(&self.0, &state), state.twin())
        };
        let mut result = vec![saved];
        if let Some(twin) = twin {
            let saved_twin = SavedState::of(&twin, &twin.lock());
            result.push(saved_twin);
        }
        result
    }
}

impl Point for ConnectionPoint {
    fn position(&self) -> Vector {
        self.0.lock().position
    }

    fn direction(&self) -> Vector {
        self.0.lock().direction
    }

    fn is_connective(&self) -> bool {
        true
    }
}

impl Drop for ConnectionPoint {
    fn drop(&mut self) {
        let _ = self.unlink();
    }
}

/// Snapshot of a connection point, to undo a partially applied change.
#[derive(Debug)]
pub(crate) struct SavedState {
    shared: Shared,
    placement: Placement,
}

impl SavedState {
    fn of(shared: &Shared, state: &State) -> SavedState {
        SavedState { shared: Arc::clone(shared), placement: state.placement() }
    }

    /// Restore position, direction and border, without touching the twin.
    pub(crate) fn restore(self) {
        let mut state = self.shared.lock();
        let Placement { position, direction, border } = self.placement;
        state.position = position;
        state.direction = direction;
        state.border = border;
    }
}
