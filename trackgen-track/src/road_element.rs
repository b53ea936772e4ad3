//! Road elements: the shape of the road on a single tile.

use std::fmt::{self, Display, Formatter};

use trackgen_types::vector::Vector;
use trackgen_id::ElementId;

use crate::{
    error::InvalidTrack,
    point::{connection::ConnectionPoint, AnchorPoint},
};

pub use self::straight::StraightSegment;

pub mod straight;

/// The two kinds of points of a road element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKind {
    /// An [`AnchorPoint`] inside the tile.
    Anchor,
    /// A [`ConnectionPoint`] on the border of the tile.
    Connection,
}

impl Display for PointKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PointKind::Anchor => write!(f, "anchor"),
            PointKind::Connection => write!(f, "connection"),
        }
    }
}

/// Id of any road element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnyElementId {
    /// Id of a [`StraightSegment`].
    Straight(ElementId<StraightSegment>),
}

impl Display for AnyElementId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AnyElementId::Straight(id) => write!(f, "{id}"),
        }
    }
}

impl From<ElementId<StraightSegment>> for AnyElementId {
    fn from(id: ElementId<StraightSegment>) -> Self {
        AnyElementId::Straight(id)
    }
}

/// Common interface of all road element shapes.
///
/// The shape is computed from the anchor points. Moving a connection point
/// moves the anchor points as well, and the other way around.
pub trait RoadElement {
    /// The id of the road element.
    fn id(&self) -> AnyElementId;

    /// All anchor points, in a fixed order.
    fn anchor_points(&self) -> &[AnchorPoint];

    /// All connection points, in a fixed order.
    fn connection_points(&self) -> &[ConnectionPoint];

    /// Move the anchor point `index` and recompute the shape.
    ///
    /// Without a `direction`, the current heading of the road element is kept.
    ///
    /// ## Errors
    ///
    /// If the new shape doesn't fit the tile, or a twin of a connection point rejects the change.
    /// The road element (and all twins) are unchanged in that case.
    fn update_anchor_point(
        &mut self,
        index: usize,
        position: Vector,
        direction: Option<Vector>,
    ) -> Result<(), InvalidTrack>;

    /// Move the connection point `index` and recompute the shape.
    ///
    /// Without a `direction`, the other connection points stay where they are.
    /// With a `direction`, the road element is turned to it.
    ///
    /// ## Errors
    ///
    /// If the new shape doesn't fit the tile, or a twin of a connection point rejects the change.
    /// The road element (and all twins) are unchanged in that case.
    fn update_connection_point(
        &mut self,
        index: usize,
        position: Vector,
        direction: Option<Vector>,
    ) -> Result<(), InvalidTrack>;
}

/// Any road element.
#[derive(Debug)]
pub enum AnyRoadElement {
    /// A [`StraightSegment`].
    Straight(StraightSegment),
}

impl From<StraightSegment> for AnyRoadElement {
    fn from(segment: StraightSegment) -> Self {
        AnyRoadElement::Straight(segment)
    }
}

impl RoadElement for AnyRoadElement {
    fn id(&self) -> AnyElementId {
        match self {
            AnyRoadElement::Straight(segment) => segment.id(),
        }
    }

    fn anchor_points(&self) -> &[AnchorPoint] {
        match self {
            AnyRoadElement::Straight(segment) => segment.anchor_points(),
        }
    }

    fn connection_points(&self) -> &[ConnectionPoint] {
        match self {
            AnyRoadElement::Straight(segment) => segment.connection_points(),
        }
    }

    fn update_anchor_point(
        &mut self,
        index: usize,
        position: Vector,
        direction: Option<Vector>,
    ) -> Result<(), InvalidTrack> {
        match self {
            AnyRoadElement::Straight(segment) => {
                segment.update_anchor_point(index, position, direction)
            },
        }
    }

    fn update_connection_point(
        &mut self,
        index: usize,
        position: Vector,
        direction: Option<Vector>,
    ) -> Result<(), InvalidTrack> {
        match self {
            AnyRoadElement::Straight(segment) => {
                segment.update_connection_point(index, position, direction)
            },
        }
    }
}
