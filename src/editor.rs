//! An editing session: a track, the current selection and error reporting.

use log::{debug, error, info};
use thiserror::Error;

use trackgen_track::{
    error::{InvalidTrack, LinkError},
    point::connection::ConnectionPoint,
    road_element::{AnyRoadElement, RoadElement, StraightSegment},
    tile::GridCoordinate,
    track::{TileOccupied, Track},
};
use trackgen_types::{border::Border, vector::Vector};


/// A point of the road element on the selected tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointSelection {
    /// The anchor point with the index.
    Anchor(usize),
    /// The connection point with the index.
    Connection(usize),
}

/// Input for the [`TrackEditor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// Place a new straight segment on a tile, creating the tile if necessary.
    ///
    /// Without an anchor (position and direction),
    /// the segment runs horizontally through the centre.
    AddRoadElement {
        /// Grid coordinate of the tile.
        coordinate: GridCoordinate,
        /// Position and direction of the anchor point.
        anchor: Option<(Vector, Vector)>,
    },
    /// Remove a tile, including its road element.
    RemoveTile(GridCoordinate),
    /// Select a tile, or deselect it if it is already selected.
    SelectTile(GridCoordinate),
    /// Select a point of the road element on the selected tile.
    SelectPoint(Option<PointSelection>),
    /// Start dragging the selected point.
    Press,
    /// Move the selected point while dragging, see [`RoadElement`] for the meaning of `direction`.
    Drag {
        /// New tile-local position.
        position: Vector,
        /// New direction, if it should change.
        direction: Option<Vector>,
    },
    /// Stop dragging.
    Release,
    /// Link the selected connection point with the facing connection point
    /// of the neighbouring tile.
    LinkAcrossBorder,
    /// Remove the link of the selected connection point.
    Unlink,
    /// Hide the current message box.
    CloseMessageBox,
}

/// Message shown to the user, usually an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBox {
    title: String,
    message: String,
}

impl MessageBox {
    /// Title of the message box.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Content of the message box.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A [`Message`] could not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EditorError {
    /// The geometry of a road element could not be updated.
    #[error(transparent)]
    InvalidTrack(#[from] InvalidTrack),
    /// Two connection points could not be linked.
    #[error(transparent)]
    Link(#[from] LinkError),
    /// There is already a road element on the tile.
    #[error(transparent)]
    TileOccupied(#[from] TileOccupied),
    /// The message requires a selected tile.
    #[error("No tile is selected.")]
    NoTileSelected,
    /// The message requires a selected point.
    #[error("No point is selected.")]
    NoPointSelected,
    /// The message requires a selected connection point.
    #[error("The selected point is not a connection point.")]
    NoConnectionPointSelected,
    /// There is no tile at the grid coordinate.
    #[error("There is no tile at {0}.")]
    TileNotFound(GridCoordinate),
    /// The tile has no road element.
    #[error("The tile at {0} has no road element.")]
    NoRoadElement(GridCoordinate),
    /// The road element has no such point.
    #[error("The road element at {coordinate} has no point {point:?}.")]
    UnknownPoint {
        /// Grid coordinate of the tile.
        coordinate: GridCoordinate,
        /// The requested point.
        point: PointSelection,
    },
    /// The tile is at the edge of the grid.
    #[error("The tile at {coordinate} has no neighbour across its {border:?} border.")]
    NoNeighbor {
        /// Grid coordinate of the tile.
        coordinate: GridCoordinate,
        /// The border without neighbour.
        border: Border,
    },
    /// The neighbouring tile has no connection point on the shared border.
    #[error("The tile at {coordinate} has no connection point on its {border:?} border.")]
    NoCounterpart {
        /// Grid coordinate of the neighbouring tile.
        coordinate: GridCoordinate,
        /// The shared border, seen from the neighbouring tile.
        border: Border,
    },
}

/// State of an editing session.
#[derive(Debug, Default)]
pub struct TrackEditor {
    track: Track,
    selected_tile: Option<GridCoordinate>,
    selected_point: Option<PointSelection>,
    dragging: bool,
    message_box: Option<MessageBox>,
}

impl TrackEditor {
    /// Start a new session with an empty track.
    #[must_use]
    pub fn new() -> Self {
        TrackEditor::default()
    }

    /// Start a new session with an existing track.
    #[must_use]
    pub fn with_track(track: Track) -> Self {
        TrackEditor { track, ..TrackEditor::default() }
    }

    /// The edited track.
    #[must_use]
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// The selected tile.
    #[must_use]
    pub fn selected_tile(&self) -> Option<GridCoordinate> {
        self.selected_tile
    }

    /// The selected point of the road element on the selected tile.
    #[must_use]
    pub fn selected_point(&self) -> Option<PointSelection> {
        self.selected_point
    }

    /// Is the selected point being dragged?
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The message box currently shown.
    #[must_use]
    pub fn message_box(&self) -> Option<&MessageBox> {
        self.message_box.as_ref()
    }

    /// Show a new [`MessageBox`] with title and message.
    ///
    /// Usually used for an error message.
    pub fn show_message_box(&mut self, title: String, message: String) {
        self.message_box = Some(MessageBox { title, message });
    }

    /// Apply a [`Message`].
    ///
    /// Errors are logged and shown in the [`MessageBox`], the track is unchanged in that case.
    pub fn update(&mut self, message: Message) {
        let title = format!("{message:?}");
        if let Err(error) = self.apply(message) {
            error!("{title} failed: {error}");
            self.show_message_box(title, error.to_string());
        }
    }

    fn apply(&mut self, message: Message) -> Result<(), EditorError> {
        match message {
            Message::AddRoadElement { coordinate, anchor } => {
                self.add_road_element(coordinate, anchor)?;
            },
            Message::RemoveTile(coordinate) => self.remove_tile(coordinate)?,
            Message::SelectTile(coordinate) => self.select_tile(coordinate),
            Message::SelectPoint(point) => self.select_point(point)?,
            Message::Press => {
                let _ = self.selection()?;
                self.dragging = true;
            },
            Message::Drag { position, direction } => {
                if self.dragging {
                    self.drag(position, direction)?;
                }
            },
            Message::Release => self.dragging = false,
            Message::LinkAcrossBorder => self.link_across_border()?,
            Message::Unlink => {
                let (coordinate, index) = self.selected_connection_point()?;
                let unlinked = self.connection_point(coordinate, index)?.unlink();
                debug!("Unlink connection point {index} at {coordinate}: {unlinked}.");
            },
            Message::CloseMessageBox => self.message_box = None,
        }
        Ok(())
    }

    fn add_road_element(
        &mut self,
        coordinate: GridCoordinate,
        anchor: Option<(Vector, Vector)>,
    ) -> Result<(), EditorError> {
        if self.track.tile(coordinate).is_some_and(|tile| tile.road_element().is_some()) {
            return Err(TileOccupied(coordinate).into());
        }
        let segment = match anchor {
            Some((position, direction)) => StraightSegment::from_anchor(position, direction)?,
            None => StraightSegment::centered()?,
        };
        let road_element = AnyRoadElement::from(segment);
        if let Some(tile) = self.track.tile_mut(coordinate) {
            info!("Place {} on the tile at {coordinate}.", road_element.id());
            let _ = tile.replace_road_element(Some(road_element));
        } else {
            self.track.add_tile(coordinate, Some(road_element))?;
        }
        Ok(())
    }

    fn remove_tile(&mut self, coordinate: GridCoordinate) -> Result<(), EditorError> {
        let removed = self.track.remove_tile(coordinate);
        if removed.is_none() {
            return Err(EditorError::TileNotFound(coordinate));
        }
        if self.selected_tile == Some(coordinate) {
            self.deselect();
        }
        Ok(())
    }

    fn deselect(&mut self) {
        self.selected_tile = None;
        self.selected_point = None;
        self.dragging = false;
    }

    /// Toggle the selection of a tile, selecting an empty grid cell clears the selection.
    fn select_tile(&mut self, coordinate: GridCoordinate) {
        let selected = self.selected_tile;
        self.deselect();
        if selected != Some(coordinate) && self.track.tile(coordinate).is_some() {
            self.selected_tile = Some(coordinate);
        }
        debug!("Selected tile: {:?}", self.selected_tile);
    }

    fn select_point(&mut self, point: Option<PointSelection>) -> Result<(), EditorError> {
        self.dragging = false;
        let Some(point) = point else {
            self.selected_point = None;
            return Ok(());
        };
        let coordinate = self.selected_tile.ok_or(EditorError::NoTileSelected)?;
        let road_element = self.road_element(coordinate)?;
        let exists = match point {
            PointSelection::Anchor(index) => index < road_element.anchor_points().len(),
            PointSelection::Connection(index) => index < road_element.connection_points().len(),
        };
        if !exists {
            return Err(EditorError::UnknownPoint { coordinate, point });
        }
        self.selected_point = Some(point);
        Ok(())
    }

    /// The selected tile and point.
    fn selection(&self) -> Result<(GridCoordinate, PointSelection), EditorError> {
        let coordinate = self.selected_tile.ok_or(EditorError::NoTileSelected)?;
        let point = self.selected_point.ok_or(EditorError::NoPointSelected)?;
        Ok((coordinate, point))
    }

    fn selected_connection_point(&self) -> Result<(GridCoordinate, usize), EditorError> {
        match self.selection()? {
            (coordinate, PointSelection::Connection(index)) => Ok((coordinate, index)),
            (_coordinate, PointSelection::Anchor(_index)) => {
                Err(EditorError::NoConnectionPointSelected)
            },
        }
    }

    fn road_element(&self, coordinate: GridCoordinate) -> Result<&AnyRoadElement, EditorError> {
        self.track
            .tile(coordinate)
            .ok_or(EditorError::TileNotFound(coordinate))?
            .road_element()
            .ok_or(EditorError::NoRoadElement(coordinate))
    }

    fn connection_point(
        &self,
        coordinate: GridCoordinate,
        index: usize,
    ) -> Result<&ConnectionPoint, EditorError> {
        self.road_element(coordinate)?.connection_points().get(index).ok_or(
            EditorError::UnknownPoint { coordinate, point: PointSelection::Connection(index) },
        )
    }

    fn drag(&mut self, position: Vector, direction: Option<Vector>) -> Result<(), EditorError> {
        let (coordinate, point) = self.selection()?;
        let road_element = self
            .track
            .tile_mut(coordinate)
            .ok_or(EditorError::TileNotFound(coordinate))?
            .road_element_mut()
            .ok_or(EditorError::NoRoadElement(coordinate))?;
        match point {
            PointSelection::Anchor(index) => {
                road_element.update_anchor_point(index, position, direction)?;
            },
            PointSelection::Connection(index) => {
                road_element.update_connection_point(index, position, direction)?;
            },
        }
        Ok(())
    }

    fn link_across_border(&mut self) -> Result<(), EditorError> {
        let (coordinate, index) = self.selected_connection_point()?;
        let border = self.connection_point(coordinate, index)?.border();
        let neighbor = coordinate
            .neighbor(border)
            .ok_or(EditorError::NoNeighbor { coordinate, border })?;
        let facing = border.opposite();
        let counterpart = self
            .road_element(neighbor)?
            .connection_points()
            .iter()
            .position(|point| point.border() == facing)
            .ok_or(EditorError::NoCounterpart { coordinate: neighbor, border: facing })?;
        self.track.link((coordinate, index), (neighbor, counterpart))?;
        info!("Linked connection point {index} at {coordinate} with its neighbour at {neighbor}.");
        Ok(())
    }
}
