//! Intersections of lines with the borders of a tile.

use enum_iterator::all;
use itertools::{Itertools, MinMaxResult};
use log::trace;

use trackgen_types::{border::Border, scalar::Scalar, vector::Vector};

use crate::{
    config::{BORDER_TOLERANCE, TILE_SIZE},
    error::{InvalidTrack, TrackFault},
    point::{connection::ConnectionPoint, AnchorPoint, Point},
};

#[cfg(test)]
mod test;

/// The two connection points where a line crosses the borders of a tile.
#[derive(Debug)]
pub struct BorderIntersection {
    /// Reached by going backwards along the line, its direction is the reversed line direction.
    pub back: ConnectionPoint,
    /// Reached by going forwards along the line, its direction is the line direction.
    pub front: ConnectionPoint,
}

/// The centre of a tile.
#[must_use]
pub fn tile_center() -> Vector {
    Vector { x: TILE_SIZE.halved(), y: TILE_SIZE.halved() }
}

/// Is the position inside the closed square of a tile (borders included)?
#[must_use]
pub fn is_inside_tile(position: &Vector) -> bool {
    let in_range = |value: Scalar| Scalar::ZERO <= value && value <= TILE_SIZE;
    in_range(position.x) && in_range(position.y)
}

/// Signed distance along `direction` from `position` to the line of `border`.
///
/// Infinite, if `direction` is parallel to the border.
fn border_distance(position: &Vector, direction: &Vector, border: Border) -> Scalar {
    let (line, start, step) = match border {
        Border::Left => (Scalar::ZERO, position.x, direction.x),
        Border::Right => (TILE_SIZE, position.x, direction.x),
        Border::Top => (Scalar::ZERO, position.y, direction.y),
        Border::Bottom => (TILE_SIZE, position.y, direction.y),
    };
    if step == Scalar::ZERO {
        Scalar(f32::INFINITY)
    } else {
        // Like f32: at worst there are precision errors.
        #[allow(clippy::arithmetic_side_effects)]
        {
            (line - start) / step
        }
    }
}

/// Does the line hit the border line within the edge of the tile?
fn hits_edge(position: &Vector, direction: &Vector, border: Border, distance: Scalar) -> bool {
    // Like f32: at worst there are precision errors.
    #[allow(clippy::arithmetic_side_effects)]
    let hit = *position + *direction * distance;
    let along = if border.is_vertical() { hit.y } else { hit.x };
    // Like f32: at worst there are precision errors.
    #[allow(clippy::arithmetic_side_effects)]
    {
        -BORDER_TOLERANCE <= along && along <= TILE_SIZE + BORDER_TOLERANCE
    }
}

/// Compare two finite distances.
fn compare(first: &Scalar, second: &Scalar) -> std::cmp::Ordering {
    first.0.total_cmp(&second.0)
}

/// Find the two connection points where the line through `position` with `direction`
/// crosses the borders of the tile.
///
/// For a position inside the tile (borders included), `front` is the first border reached
/// going forward, `back` the first border reached going backward.
/// For a position outside of the tile, only crossings within the edges of the tile count:
/// `back` is where the line enters the tile, `front` where it leaves it.
///
/// ## Errors
///
/// If position or direction are invalid, if the line misses the tile,
/// or if an intersection hits a corner of the tile.
pub fn border_intersection(
    position: Vector,
    direction: Vector,
) -> Result<BorderIntersection, InvalidTrack> {
    let origin =
        AnchorPoint::new(position, direction).map_err(|error| InvalidTrack::new(error, None))?;
    let position = origin.position();
    let direction = origin.direction();
    let no_intersection = || InvalidTrack::new(TrackFault::NoBorderIntersection, Some(origin));
    let distances: Vec<(Border, Scalar)> = all::<Border>()
        .map(|border| (border, border_distance(&position, &direction, border)))
        .filter(|(_border, distance)| distance.is_finite())
        .collect();

    let (back, front) = if is_inside_tile(&position) {
        let front = distances
            .iter()
            .map(|(_border, distance)| *distance)
            .filter(|distance| *distance > Scalar::ZERO)
            .min_by(compare);
        let back = distances
            .iter()
            .map(|(_border, distance)| *distance)
            .filter(|distance| *distance <= Scalar::ZERO)
            .max_by(compare);
        match (back, front) {
            (Some(back), Some(front)) => (back, front),
            _ => return Err(no_intersection()),
        }
    } else {
        let candidates = distances
            .iter()
            .filter(|(border, distance)| {
                *distance > Scalar::ZERO && hits_edge(&position, &direction, *border, *distance)
            })
            .map(|(_border, distance)| *distance);
        match candidates.minmax_by(compare) {
            MinMaxResult::MinMax(entry, exit) if entry < exit => (entry, exit),
            _ => return Err(no_intersection()),
        }
    };

    // Like f32: at worst there are precision errors.
    #[allow(clippy::arithmetic_side_effects)]
    let point_at = |distance: Scalar| position + direction * distance;
    let front = ConnectionPoint::new(point_at(front), direction)
        .map_err(|error| InvalidTrack::new(error, Some(origin)))?;
    // Like f32: at worst there are precision errors.
    #[allow(clippy::arithmetic_side_effects)]
    let back = ConnectionPoint::new(point_at(back), -direction)
        .map_err(|error| InvalidTrack::new(error, Some(origin)))?;
    trace!(
        "Line through {position:?} crosses the {:?} and the {:?} border.",
        back.border(),
        front.border()
    );
    Ok(BorderIntersection { back, front })
}

/// Restrict a position to the tile.
///
/// A position inside the tile is returned unchanged. Otherwise, the position is moved to the
/// border where the line from `anchor` (the tile centre by default) to `position` leaves the tile.
///
/// ## Errors
///
/// If no such border crossing exists, e.g. because `position` is not finite.
pub fn restrict_to_tile(position: Vector, anchor: Option<Vector>) -> Result<Vector, InvalidTrack> {
    if is_inside_tile(&position) {
        return Ok(position);
    }
    let anchor = anchor.unwrap_or_else(tile_center);
    // Like f32: at worst there are precision errors.
    #[allow(clippy::arithmetic_side_effects)]
    let direction = position - anchor;
    let BorderIntersection { front, .. } = border_intersection(anchor, direction)?;
    let restricted = front.position();
    trace!("Restricted {position:?} to {restricted:?}.");
    Ok(restricted)
}
