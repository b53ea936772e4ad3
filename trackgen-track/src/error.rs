//! Errors raised while placing and updating points of road elements.

use thiserror::Error;

use trackgen_id::NoIdAvailable;
use trackgen_types::{border::Border, vector::Vector};

use crate::{
    point::{AnchorPoint, Point},
    road_element::{AnyElementId, PointKind},
};

/// Why a position/direction pair was rejected for a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionFault {
    /// The position contains an infinite or `NaN` coordinate.
    #[error("position is not finite")]
    NotFinite,
    /// The direction has no length, so it can't be normalized.
    #[error("direction has no length")]
    NoDirection,
    /// No border condition holds.
    #[error("connection point is not on the border of the tile, or its direction is invalid")]
    NotOnBorder,
    /// More than one border condition holds (a corner of the tile).
    #[error("connection point lies on both the {first:?} and the {second:?} border")]
    AmbiguousBorder {
        /// The first matching border.
        first: Border,
        /// The second matching border.
        second: Border,
    },
    /// The point may not leave the border it is fixed to.
    #[error("connection point is fixed to the {fixed:?} border, not to the {requested:?} border")]
    FixedToBorder {
        /// The border the point is fixed to.
        fixed: Border,
        /// The border the update would move the point to.
        requested: Border,
    },
}

/// A point received a position or direction it can't take.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error(
    "Invalid position: {fault} at {} in {}",
    coordinates(.position),
    origin_name(.origin.as_ref())
)]
pub struct InvalidPosition {
    /// What is wrong with the position or direction.
    pub fault: PositionFault,
    /// The offending position.
    pub position: Vector,
    /// The offending direction.
    pub direction: Vector,
    /// The road element owning the point, if it is already owned by one.
    pub origin: Option<AnyElementId>,
}

/// Format a vector for an error message.
fn coordinates(vector: &Vector) -> String {
    format!("({}, {})", vector.x.0, vector.y.0)
}

/// Describe the owner of a point for an error message.
fn origin_name(origin: Option<&AnyElementId>) -> String {
    origin.map_or_else(|| String::from("a detached point"), ToString::to_string)
}

/// Why the geometry of a road element could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TrackFault {
    /// The line doesn't cross the borders of the tile twice.
    #[error("could not find an intersection with the tile borders")]
    NoBorderIntersection,
    /// Both ends of a line coincide, so it has no direction.
    #[error("direction {} has no length", coordinates(.0))]
    DegenerateDirection(Vector),
    /// The road element has no point with the requested index.
    #[error("the road element has no {kind} point with index {index}")]
    UnknownPoint {
        /// Anchor or connection point.
        kind: PointKind,
        /// The requested index.
        index: usize,
    },
    /// No id is available for a new road element.
    #[error(transparent)]
    NoIdAvailable(#[from] NoIdAvailable),
    /// Updating one of the points failed.
    #[error("{0}")]
    Position(#[from] InvalidPosition),
}

/// The track could not be brought into a consistent state.
///
/// The operation raising this error left the track as it was before.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("Invalid track configuration: {fault} at {}", anchor_name(.anchor.as_ref()))]
pub struct InvalidTrack {
    /// What went wrong.
    pub fault: TrackFault,
    /// The anchor point of the affected road element,
    /// or the origin of a failed intersection search.
    pub anchor: Option<AnchorPoint>,
}

/// Describe the anchor point for an error message.
fn anchor_name(anchor: Option<&AnchorPoint>) -> String {
    anchor.map_or_else(
        || String::from("an unknown anchor"),
        |anchor| format!("anchor point {}", coordinates(&anchor.position())),
    )
}

impl InvalidTrack {
    /// Create a new error, with the anchor point as context.
    #[must_use]
    pub fn new(fault: impl Into<TrackFault>, anchor: Option<AnchorPoint>) -> Self {
        InvalidTrack { fault: fault.into(), anchor }
    }

    /// The underlying [`InvalidPosition`] error, if a point rejected an update.
    #[must_use]
    pub fn invalid_position(&self) -> Option<&InvalidPosition> {
        if let TrackFault::Position(invalid_position) = &self.fault {
            Some(invalid_position)
        } else {
            None
        }
    }
}

/// Two connection points could not be linked as twins.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LinkError {
    /// A connection point can't be its own twin.
    #[error("a connection point can't be its own twin")]
    SelfLink,
    /// At least one of the points already has a twin and must be unlinked first.
    #[error("at least one of the connection points is already linked to a twin")]
    AlreadyLinked,
    /// There is no such connection point on the track.
    #[error("there is no connection point {index} on the tile at {coordinate}")]
    UnknownConnectionPoint {
        /// Grid coordinate of the tile.
        coordinate: crate::tile::GridCoordinate,
        /// The requested index.
        index: usize,
    },
    /// The twin can't take the mirrored position.
    #[error(transparent)]
    Position(#[from] InvalidPosition),
}
