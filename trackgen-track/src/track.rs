//! The track: all tiles of the grid.

use log::{debug, info};
use thiserror::Error;

use crate::{
    error::LinkError,
    point::connection::ConnectionPoint,
    road_element::{AnyRoadElement, RoadElement},
    tile::{GridCoordinate, Tile},
};


/// There is already a tile at the requested grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("There is already a tile at {0}.")]
pub struct TileOccupied(pub GridCoordinate);

/// All tiles of the grid, at most one per grid coordinate.
#[derive(Debug, Default)]
pub struct Track {
    tiles: Vec<Tile>,
}

impl Track {
    /// Create an empty [`Track`].
    #[must_use]
    pub fn new() -> Self {
        Track::default()
    }

    /// Add a new tile at `coordinate`.
    ///
    /// ## Errors
    ///
    /// If there is already a tile at `coordinate`.
    pub fn add_tile(
        &mut self,
        coordinate: GridCoordinate,
        road_element: Option<AnyRoadElement>,
    ) -> Result<(), TileOccupied> {
        if self.tile(coordinate).is_some() {
            return Err(TileOccupied(coordinate));
        }
        info!(
            "Add tile at {coordinate}{}.",
            road_element
                .as_ref()
                .map_or_else(String::new, |element| format!(" with {}", element.id()))
        );
        self.tiles.push(Tile::new(coordinate, road_element));
        Ok(())
    }

    /// The tile at `coordinate`.
    #[must_use]
    pub fn tile(&self, coordinate: GridCoordinate) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.coordinate() == coordinate)
    }

    /// Mutable access to the tile at `coordinate`.
    pub fn tile_mut(&mut self, coordinate: GridCoordinate) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|tile| tile.coordinate() == coordinate)
    }

    /// All tiles, in the order they were added.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Remove the tile at `coordinate`.
    ///
    /// Twins of its connection points are unlinked, once the tile is dropped.
    pub fn remove_tile(&mut self, coordinate: GridCoordinate) -> Option<Tile> {
        let index = self.tiles.iter().position(|tile| tile.coordinate() == coordinate)?;
        info!("Remove tile at {coordinate}.");
        Some(self.tiles.remove(index))
    }

    /// The connection point `index` of the road element on the tile at `coordinate`.
    #[must_use]
    pub fn connection_point(
        &self,
        coordinate: GridCoordinate,
        index: usize,
    ) -> Option<&ConnectionPoint> {
        self.tile(coordinate)?.road_element()?.connection_points().get(index)
    }

    /// Link two connection points on (usually neighbouring) tiles as twins.
    ///
    /// The second point is moved to the mirror image of the first one.
    ///
    /// ## Errors
    ///
    /// If one of the connection points doesn't exist, or if linking fails.
    pub fn link(
        &self,
        (first_coordinate, first_index): (GridCoordinate, usize),
        (second_coordinate, second_index): (GridCoordinate, usize),
    ) -> Result<(), LinkError> {
        let lookup = |coordinate, index| {
            self.connection_point(coordinate, index)
                .ok_or(LinkError::UnknownConnectionPoint { coordinate, index })
        };
        let first = lookup(first_coordinate, first_index)?;
        let second = lookup(second_coordinate, second_index)?;
        first.set_twin(second)?;
        debug!(
            "Linked connection point {first_index} at {first_coordinate} \
            with connection point {second_index} at {second_coordinate}."
        );
        Ok(())
    }
}
