//! Tiles: square cells of the grid, each holding at most one road element.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use trackgen_types::border::Border;

use crate::road_element::AnyRoadElement;

/// Position of a tile in the grid, counted in tiles.
///
/// The y-coordinate grows downwards, like inside a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridCoordinate {
    /// Column of the tile.
    pub x: u32,
    /// Row of the tile.
    pub y: u32,
}

impl GridCoordinate {
    /// Create a new [`GridCoordinate`].
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        GridCoordinate { x, y }
    }

    /// The coordinate of the tile sharing `border` with this one.
    ///
    /// [`None`] at the edge of the grid.
    #[must_use]
    pub fn neighbor(self, border: Border) -> Option<GridCoordinate> {
        let GridCoordinate { x, y } = self;
        match border {
            Border::Left => x.checked_sub(1).map(|x| GridCoordinate { x, y }),
            Border::Right => x.checked_add(1).map(|x| GridCoordinate { x, y }),
            Border::Top => y.checked_sub(1).map(|y| GridCoordinate { x, y }),
            Border::Bottom => y.checked_add(1).map(|y| GridCoordinate { x, y }),
        }
    }
}

impl Display for GridCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Grid coordinates must be non-negative and fit into an [`u32`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid grid coordinate ({x}, {y}), both values must be between 0 and {}.", u32::MAX)]
pub struct InvalidGridCoordinate {
    /// The requested column.
    pub x: i64,
    /// The requested row.
    pub y: i64,
}

impl TryFrom<(i64, i64)> for GridCoordinate {
    type Error = InvalidGridCoordinate;

    fn try_from((x, y): (i64, i64)) -> Result<Self, Self::Error> {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(column), Ok(row)) => Ok(GridCoordinate { x: column, y: row }),
            _ => Err(InvalidGridCoordinate { x, y }),
        }
    }
}

/// A square cell of the grid.
#[derive(Debug)]
pub struct Tile {
    coordinate: GridCoordinate,
    road_element: Option<AnyRoadElement>,
}

impl Tile {
    /// Create a new [`Tile`], possibly with a road element.
    #[must_use]
    pub fn new(coordinate: GridCoordinate, road_element: Option<AnyRoadElement>) -> Self {
        Tile { coordinate, road_element }
    }

    /// Position of the tile in the grid.
    #[must_use]
    pub fn coordinate(&self) -> GridCoordinate {
        self.coordinate
    }

    /// The road element placed on the tile.
    #[must_use]
    pub fn road_element(&self) -> Option<&AnyRoadElement> {
        self.road_element.as_ref()
    }

    /// Mutable access to the road element placed on the tile.
    pub fn road_element_mut(&mut self) -> Option<&mut AnyRoadElement> {
        self.road_element.as_mut()
    }

    /// Place a new road element on the tile, return the previous one.
    pub fn replace_road_element(
        &mut self,
        road_element: Option<AnyRoadElement>,
    ) -> Option<AnyRoadElement> {
        std::mem::replace(&mut self.road_element, road_element)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use enum_iterator::all;

    use trackgen_test_util::{expect_eq, expect_true, init_test_logging, Expectation};

    use crate::road_element::{RoadElement, StraightSegment};

    #[test]
    fn neighbors() -> Result<(), Expectation> {
        init_test_logging();

        let coordinate = GridCoordinate::new(3, 5);
        for border in all::<Border>() {
            let neighbor = coordinate.neighbor(border).expect("Not at the edge of the grid.");
            expect_eq(neighbor.neighbor(border.opposite()), Some(coordinate))?;
        }
        expect_eq(coordinate.neighbor(Border::Top), Some(GridCoordinate::new(3, 4)))?;
        expect_eq(GridCoordinate::new(0, 0).neighbor(Border::Left), None)?;
        expect_eq(GridCoordinate::new(0, u32::MAX).neighbor(Border::Bottom), None)?;
        Ok(())
    }

    #[test]
    fn negative_coordinates() -> Result<(), Expectation> {
        init_test_logging();

        expect_eq(GridCoordinate::try_from((2, 7)), Ok(GridCoordinate::new(2, 7)))?;
        expect_eq(
            GridCoordinate::try_from((-1, 7)),
            Err(InvalidGridCoordinate { x: -1, y: 7 }),
        )?;
        expect_true(GridCoordinate::try_from((0, i64::MAX)).is_err())?;
        Ok(())
    }

    #[test]
    fn replace_road_element() -> Result<(), Expectation> {
        init_test_logging();

        let mut tile = Tile::new(GridCoordinate::new(0, 0), None);
        expect_true(tile.road_element().is_none())?;
        let segment = StraightSegment::centered().expect("Horizontal line through the centre.");
        let id = segment.id();
        expect_true(tile.replace_road_element(Some(segment.into())).is_none())?;
        expect_eq(tile.road_element().map(RoadElement::id), Some(id))?;
        let previous = tile.replace_road_element(None);
        expect_eq(previous.map(|element| element.id()), Some(id))?;
        expect_true(tile.road_element_mut().is_none())?;
        Ok(())
    }
}
