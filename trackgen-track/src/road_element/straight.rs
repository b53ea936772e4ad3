//! A straight road crossing a tile.

use log::{debug, trace};

use trackgen_id::ElementId;
use trackgen_types::{scalar::Scalar, vector::Vector};

use crate::{
    config::{ANCHOR_RATIO_MAX, ANCHOR_RATIO_MIN},
    error::{InvalidPosition, InvalidTrack, TrackFault},
    geometry::{border_intersection, restrict_to_tile, tile_center, BorderIntersection},
    point::{
        connection::{ConnectionPoint, SavedState},
        AnchorPoint, Point,
    },
    road_element::{AnyElementId, PointKind, RoadElement},
};

#[cfg(test)]
mod test;

/// A straight line from one border of a tile to another one.
///
/// The line is defined by a single anchor point. The two connection points lie where the line
/// crosses the borders: the first one behind the anchor point, the second one ahead of it.
#[derive(Debug)]
pub struct StraightSegment {
    id: ElementId<StraightSegment>,
    anchor_points: [AnchorPoint; 1],
    connection_points: [ConnectionPoint; 2],
    heading: Vector,
}

/// State of a [`StraightSegment`] and all affected twins, to undo a failed update.
struct Backup {
    anchor_point: AnchorPoint,
    heading: Vector,
    connection_points: Vec<SavedState>,
}

impl StraightSegment {
    /// Create a new [`StraightSegment`] through the anchor point.
    ///
    /// A position outside of the tile is moved to the border first.
    ///
    /// ## Errors
    ///
    /// If the line doesn't cross two different borders, or no id is available.
    pub fn from_anchor(position: Vector, direction: Vector) -> Result<Self, InvalidTrack> {
        let position = restrict_to_tile(position, None)?;
        let mut anchor_point = AnchorPoint::new(position, direction)
            .map_err(|error| InvalidTrack::new(error, None))?;
        let BorderIntersection { back, front } =
            border_intersection(anchor_point.position(), anchor_point.direction())?;
        let heading = anchor_point.direction();
        let id = ElementId::new()
            .map_err(|error| InvalidTrack::new(error, Some(anchor_point)))?;
        let owner = AnyElementId::from(id);
        anchor_point.set_owner(owner);
        back.set_owner(owner);
        front.set_owner(owner);
        debug!("New straight segment {id} through {:?}.", anchor_point.position());
        Ok(StraightSegment {
            id,
            anchor_points: [anchor_point],
            connection_points: [back, front],
            heading,
        })
    }

    /// Create a new [`StraightSegment`] between two existing connection points.
    ///
    /// The anchor point lies half way between them, the heading is the direction of the second one.
    ///
    /// ## Errors
    ///
    /// If both connection points are at the same position, or no id is available.
    pub fn from_connection_points(
        connection_points: [ConnectionPoint; 2],
    ) -> Result<Self, InvalidTrack> {
        let [first, second] = &connection_points;
        let start = first.position();
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        let line = second.position() - start;
        if line.length() == Scalar::ZERO {
            return Err(InvalidTrack::new(TrackFault::DegenerateDirection(line), None));
        }
        let heading = second.direction();
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        let mut anchor_point = AnchorPoint::new(start + line * Scalar(0.5), heading)
            .map_err(|error| InvalidTrack::new(error, None))?;
        let id = ElementId::new()
            .map_err(|error| InvalidTrack::new(error, Some(anchor_point)))?;
        let owner = AnyElementId::from(id);
        anchor_point.set_owner(owner);
        for connection_point in &connection_points {
            connection_point.set_owner(owner);
        }
        debug!("New straight segment {id} between {start:?} and {:?}.", second.position());
        Ok(StraightSegment { id, anchor_points: [anchor_point], connection_points, heading })
    }

    /// Create a new horizontal [`StraightSegment`] through the centre of the tile.
    ///
    /// ## Errors
    ///
    /// If no id is available.
    pub fn centered() -> Result<Self, InvalidTrack> {
        StraightSegment::from_anchor(tile_center(), Vector::EX)
    }

    /// The direction of the segment, pointing from the first to the second connection point.
    #[must_use]
    pub fn heading(&self) -> Vector {
        self.heading
    }

    /// The only anchor point.
    #[must_use]
    pub fn anchor_point(&self) -> &AnchorPoint {
        let [anchor_point] = &self.anchor_points;
        anchor_point
    }

    /// Wrap an error of a point, with the anchor point as context.
    fn invalid_track(&self, error: impl Into<TrackFault>) -> InvalidTrack {
        InvalidTrack::new(error, Some(*self.anchor_point()))
    }

    fn backup(&self) -> Backup {
        Backup {
            anchor_point: *self.anchor_point(),
            heading: self.heading,
            connection_points: self
                .connection_points
                .iter()
                .flat_map(ConnectionPoint::save)
                .collect(),
        }
    }

    fn restore(&mut self, backup: Backup) {
        let Backup { anchor_point, heading, connection_points } = backup;
        // restore in reverse order, so the first snapshot of a point wins
        for saved in connection_points.into_iter().rev() {
            saved.restore();
        }
        self.anchor_points = [anchor_point];
        self.heading = heading;
        debug!("Reverted failed update of {}.", self.id);
    }

    /// Run `update`, restore the previous state if it fails.
    fn atomically(
        &mut self,
        update: impl FnOnce(&mut Self) -> Result<(), InvalidTrack>,
    ) -> Result<(), InvalidTrack> {
        let backup = self.backup();
        let result = update(self);
        if result.is_err() {
            self.restore(backup);
        }
        result
    }

    /// Move a connection point, wrapping a rejected position.
    fn move_point(
        &self,
        point: &ConnectionPoint,
        position: Vector,
        direction: Vector,
    ) -> Result<(), InvalidTrack> {
        point
            .update(position, direction)
            .map_err(|error: InvalidPosition| self.invalid_track(error))
    }

    /// Position of the anchor point between the connection points,
    /// as fraction of the segment length.
    fn anchor_ratio(&self) -> Scalar {
        let [first, second] = &self.connection_points;
        let start = first.position();
        let length = start.distance(&second.position());
        let ratio = if length > Scalar::ZERO {
            // Like f32: at worst there are precision errors.
            #[allow(clippy::arithmetic_side_effects)]
            {
                start.distance(&self.anchor_point().position()) / length
            }
        } else {
            Scalar(0.5)
        };
        ratio.clamp(&ANCHOR_RATIO_MIN, &ANCHOR_RATIO_MAX)
    }

    /// The moved connection point and the other one.
    fn moved_and_other(&self, index: usize) -> (&ConnectionPoint, &ConnectionPoint) {
        let [first, second] = &self.connection_points;
        if index == 0 {
            (first, second)
        } else {
            (second, first)
        }
    }

    /// Move a connection point, keeping the other one in place.
    fn drag_connection_point(&self, index: usize, position: Vector) -> Result<(), InvalidTrack> {
        let (moved, fixed) = self.moved_and_other(index);
        let fixed_position = fixed.position();
        let position = restrict_to_tile(position, Some(fixed_position))?;
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        let line = position - fixed_position;
        if line.length() == Scalar::ZERO {
            return Err(self.invalid_track(TrackFault::DegenerateDirection(line)));
        }
        let heading = line.unit_vector();
        let BorderIntersection { front, .. } = border_intersection(fixed_position, heading)?;
        self.move_point(moved, front.position(), front.direction())?;
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        let reversed = -heading;
        self.move_point(fixed, fixed_position, reversed)
    }

    /// Move and turn a connection point, the other one follows the new line.
    fn turn_connection_point(
        &self,
        index: usize,
        position: Vector,
        direction: Vector,
    ) -> Result<(), InvalidTrack> {
        let (moved, other) = self.moved_and_other(index);
        let position = restrict_to_tile(position, Some(other.position()))?;
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        let BorderIntersection { front, .. } = border_intersection(position, -direction)?;
        self.move_point(other, front.position(), front.direction())?;
        self.move_point(moved, position, direction)
    }

    /// Place the anchor point at `ratio` between the connection points.
    fn realign_anchor_point(&mut self, ratio: Scalar) -> Result<(), InvalidTrack> {
        let [first, second] = &self.connection_points;
        let start = first.position();
        let heading = second.direction();
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        let position = start + (second.position() - start) * ratio;
        let [anchor_point] = &mut self.anchor_points;
        let result = anchor_point.update(position, heading);
        result.map_err(|error| self.invalid_track(error))?;
        self.heading = heading;
        trace!("Anchor point of {} at {position:?}, ratio {ratio:?}.", self.id);
        Ok(())
    }
}

impl RoadElement for StraightSegment {
    fn id(&self) -> AnyElementId {
        AnyElementId::from(self.id)
    }

    fn anchor_points(&self) -> &[AnchorPoint] {
        &self.anchor_points
    }

    fn connection_points(&self) -> &[ConnectionPoint] {
        &self.connection_points
    }

    fn update_anchor_point(
        &mut self,
        index: usize,
        position: Vector,
        direction: Option<Vector>,
    ) -> Result<(), InvalidTrack> {
        if index != 0 {
            let fault = TrackFault::UnknownPoint { kind: PointKind::Anchor, index };
            return Err(self.invalid_track(fault));
        }
        let direction = direction.unwrap_or(self.heading);
        self.atomically(|segment| {
            let position = restrict_to_tile(position, None)?;
            let BorderIntersection { back, front } = border_intersection(position, direction)?;
            let [first, second] = &segment.connection_points;
            segment.move_point(first, back.position(), back.direction())?;
            segment.move_point(second, front.position(), front.direction())?;
            let [anchor_point] = &mut segment.anchor_points;
            let result = anchor_point.update(position, direction);
            result.map_err(|error| segment.invalid_track(error))?;
            segment.heading = segment.anchor_point().direction();
            Ok(())
        })
    }

    fn update_connection_point(
        &mut self,
        index: usize,
        position: Vector,
        direction: Option<Vector>,
    ) -> Result<(), InvalidTrack> {
        if index >= self.connection_points.len() {
            return Err(
                self.invalid_track(TrackFault::UnknownPoint { kind: PointKind::Connection, index })
            );
        }
        let ratio = self.anchor_ratio();
        self.atomically(|segment| {
            match direction {
                None => segment.drag_connection_point(index, position)?,
                Some(direction) => segment.turn_connection_point(index, position, direction)?,
            }
            segment.realign_anchor_point(ratio)
        })
    }
}
