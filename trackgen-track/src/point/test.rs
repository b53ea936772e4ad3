use trackgen_test_util::{expect_eq, expect_true, init_test_logging, Expectation};
use trackgen_types::vector::Vector;

use crate::{
    error::{InvalidPosition, PositionFault},
    point::{AnchorPoint, Point},
};

#[test]
fn anchor_point_is_rounded_and_normalized() -> Result<(), Expectation> {
    init_test_logging();

    let anchor = AnchorPoint::new(Vector::new(999.6, 1000.4), Vector::new(-3., 4.))
        .expect("Finite position with a direction.");
    expect_eq(anchor.position(), Vector::new(1000., 1000.))?;
    expect_eq(anchor.direction(), Vector::new(-0.6, 0.8))?;
    expect_true(!anchor.is_connective())?;
    expect_true(anchor.owner().is_none())?;
    Ok(())
}

#[test]
fn failed_update_keeps_anchor_point() -> Result<(), Expectation> {
    init_test_logging();

    let mut anchor = AnchorPoint::new(Vector::new(500., 500.), Vector::EX)
        .expect("Finite position with a direction.");
    let before = anchor;

    let no_direction = anchor.update(Vector::new(700., 700.), Vector::ZERO);
    expect_true(matches!(
        no_direction,
        Err(InvalidPosition { fault: PositionFault::NoDirection, .. })
    ))?;
    let not_finite = anchor.update(Vector::new(f32::NAN, 700.), Vector::EY);
    expect_true(matches!(
        not_finite,
        Err(InvalidPosition { fault: PositionFault::NotFinite, .. })
    ))?;
    expect_eq(anchor, before)?;

    // anchor points are not restricted to the tile on their own
    anchor
        .update(Vector::new(-100., 2500.), Vector::EY)
        .expect("Finite position with a direction.");
    expect_eq(anchor.position(), Vector::new(-100., 2500.))?;
    expect_eq(anchor.direction(), Vector::EY)?;
    Ok(())
}
