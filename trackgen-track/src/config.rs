//! Constants shared by the geometry of all tiles.

use trackgen_types::scalar::Scalar;

/// Width and height of every tile in millimetres.
pub const TILE_SIZE: Scalar = Scalar(2000.);

/// Smallest ratio of the anchor point between the two connection points of a segment.
pub const ANCHOR_RATIO_MIN: Scalar = Scalar(0.1);

/// Largest ratio of the anchor point between the two connection points of a segment.
pub const ANCHOR_RATIO_MAX: Scalar = Scalar(0.9);

/// Slack for a border hit lying just outside of `[0, TILE_SIZE]`.
///
/// Positions are rounded to whole millimetres, so half a millimetre ends up on the border anyway.
pub const BORDER_TOLERANCE: Scalar = Scalar(0.5);
