//! The four borders of a tile.

use enum_iterator::Sequence;

use crate::vector::Vector;

/// One of the four edges of a tile, identified by its outward unit normal.
///
/// The y-coordinate grows downwards, so the [`Top`](Border::Top) border is the line `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Sequence)]
pub enum Border {
    /// The line `x = 0`.
    Left,
    /// The line `x = tile size`.
    Right,
    /// The line `y = 0`.
    Top,
    /// The line `y = tile size`.
    Bottom,
}

impl Border {
    /// Outward unit normal of the border.
    #[must_use]
    pub const fn normal(self) -> Vector {
        match self {
            Border::Left => Vector::new(-1., 0.),
            Border::Right => Vector::new(1., 0.),
            Border::Top => Vector::new(0., -1.),
            Border::Bottom => Vector::new(0., 1.),
        }
    }

    /// The border on the other side of the tile.
    ///
    /// Two neighbouring tiles share the `border` of the first
    /// and the `border.opposite()` of the second.
    #[must_use]
    pub const fn opposite(self) -> Border {
        match self {
            Border::Left => Border::Right,
            Border::Right => Border::Left,
            Border::Top => Border::Bottom,
            Border::Bottom => Border::Top,
        }
    }

    /// Is the border a vertical line (constant x-coordinate)?
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Border::Left | Border::Right)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use enum_iterator::all;

    use trackgen_test_util::{expect_eq, init_test_logging, Expectation};

    #[test]
    fn opposite_normals_cancel() -> Result<(), Expectation> {
        init_test_logging();

        for border in all::<Border>() {
            expect_eq(border.opposite().opposite(), border)?;
            expect_eq(border.normal() + border.opposite().normal(), Vector::ZERO)?;
            expect_eq(border.is_vertical(), border.opposite().is_vertical())?;
        }
        Ok(())
    }
}
