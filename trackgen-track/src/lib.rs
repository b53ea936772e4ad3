//! Topology and geometry of a track composed of tiles.
//!
//! Every [`Tile`](tile::Tile) holds at most one road element.
//! Road elements derive their [`ConnectionPoints`](point::connection::ConnectionPoint)
//! from an [`AnchorPoint`](point::AnchorPoint) or a dragged connection point.
//! Connection points of neighbouring tiles are kept consistent by linking them as twins.

pub mod config;
pub mod error;
pub mod geometry;
pub mod point;
pub mod road_element;
pub mod tile;
pub mod track;
