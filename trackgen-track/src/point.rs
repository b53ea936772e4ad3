//! Points shaping a road element: anchor points inside the tile and
//! [connection points](connection::ConnectionPoint) on its border.

use log::trace;

use trackgen_types::vector::Vector;

use crate::{
    error::{InvalidPosition, PositionFault},
    road_element::AnyElementId,
};

pub mod connection;

#[cfg(test)]
mod test;

/// A position with a heading, both relative to the tile.
pub trait Point {
    /// Position in tile-local millimetres, rounded to whole millimetres.
    fn position(&self) -> Vector;

    /// Heading as unit vector.
    fn direction(&self) -> Vector;

    /// Can the point be linked to a point on a neighbouring tile?
    fn is_connective(&self) -> bool;
}

/// Round the position to whole millimetres and normalize the direction.
///
/// ## Errors
///
/// If the position is not finite, or if the direction has no length.
pub(crate) fn normalized(
    position: Vector,
    direction: Vector,
    origin: Option<&AnyElementId>,
) -> Result<(Vector, Vector), InvalidPosition> {
    let invalid = |fault| InvalidPosition { fault, position, direction, origin: origin.copied() };
    let rounded = position.rounded();
    if !rounded.is_finite() {
        return Err(invalid(PositionFault::NotFinite));
    }
    let unit = direction.unit_vector();
    if !unit.is_finite() {
        return Err(invalid(PositionFault::NoDirection));
    }
    Ok((rounded, unit))
}

/// A point inside a tile the shape of a road element is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPoint {
    position: Vector,
    direction: Vector,
    owner: Option<AnyElementId>,
}

impl AnchorPoint {
    /// Create a new [`AnchorPoint`] not owned by any road element.
    ///
    /// ## Errors
    ///
    /// If the position is not finite, or if the direction has no length.
    pub fn new(position: Vector, direction: Vector) -> Result<AnchorPoint, InvalidPosition> {
        let (position, direction) = normalized(position, direction, None)?;
        Ok(AnchorPoint { position, direction, owner: None })
    }

    /// Move the point and change its heading.
    ///
    /// The position is rounded to whole millimetres, the direction normalized.
    /// An anchor point doesn't check for the tile bounds, this is up to its road element.
    ///
    /// ## Errors
    ///
    /// If the position is not finite, or if the direction has no length.
    /// The point is unchanged in that case.
    pub fn update(&mut self, position: Vector, direction: Vector) -> Result<(), InvalidPosition> {
        let (position, direction) = normalized(position, direction, self.owner.as_ref())?;
        trace!("Move anchor point from {:?} to {position:?}.", self.position);
        self.position = position;
        self.direction = direction;
        Ok(())
    }

    /// The road element this point belongs to.
    #[must_use]
    pub fn owner(&self) -> Option<&AnyElementId> {
        self.owner.as_ref()
    }

    pub(crate) fn set_owner(&mut self, owner: AnyElementId) {
        self.owner = Some(owner);
    }
}

impl Point for AnchorPoint {
    fn position(&self) -> Vector {
        self.position
    }

    fn direction(&self) -> Vector {
        self.direction
    }

    fn is_connective(&self) -> bool {
        false
    }
}
