use trackgen_test_util::{expect_eq, expect_true, init_test_logging, Expectation};
use trackgen_types::{border::Border, scalar::Scalar, vector::Vector};

use crate::{
    error::{InvalidTrack, PositionFault, TrackFault},
    geometry::{border_intersection, restrict_to_tile, BorderIntersection},
    point::{connection::ConnectionPoint, Point},
};

fn intersection(position: Vector, direction: Vector) -> BorderIntersection {
    border_intersection(position, direction).expect("Line crosses the tile.")
}

fn expect_point(
    point: &ConnectionPoint,
    position: Vector,
    border: Border,
) -> Result<(), Expectation> {
    expect_eq(point.position(), position)?;
    expect_eq(point.border(), border)?;
    Ok(())
}

#[test]
fn horizontal_line_through_the_centre() -> Result<(), Expectation> {
    init_test_logging();

    let BorderIntersection { back, front } =
        intersection(Vector::new(1000., 1000.), Vector::new(1., 0.));
    expect_point(&back, Vector::new(0., 1000.), Border::Left)?;
    expect_eq(back.direction(), Vector::new(-1., 0.))?;
    expect_point(&front, Vector::new(2000., 1000.), Border::Right)?;
    expect_eq(front.direction(), Vector::new(1., 0.))?;
    Ok(())
}

#[test]
fn line_starting_on_the_border() -> Result<(), Expectation> {
    init_test_logging();

    let BorderIntersection { back, front } =
        intersection(Vector::new(0., 1000.), Vector::new(1., 0.));
    expect_point(&back, Vector::new(0., 1000.), Border::Left)?;
    expect_point(&front, Vector::new(2000., 1000.), Border::Right)?;
    Ok(())
}

#[test]
fn diagonal_line() -> Result<(), Expectation> {
    init_test_logging();

    let direction = Vector::new(1., -0.5);
    let BorderIntersection { back, front } = intersection(Vector::new(1000., 1000.), direction);
    expect_point(&back, Vector::new(0., 1500.), Border::Left)?;
    expect_point(&front, Vector::new(2000., 500.), Border::Right)?;
    expect_true(front.direction().distance(&direction.unit_vector()) < Scalar(1e-5))?;
    expect_true(back.direction().distance(&-direction.unit_vector()) < Scalar(1e-5))?;
    Ok(())
}

#[test]
fn origin_outside_in_line_with_the_tile() -> Result<(), Expectation> {
    init_test_logging();

    let BorderIntersection { back, front } =
        intersection(Vector::new(-500., 1000.), Vector::new(1., 0.));
    expect_point(&back, Vector::new(0., 1000.), Border::Left)?;
    expect_point(&front, Vector::new(2000., 1000.), Border::Right)?;
    Ok(())
}

#[test]
fn origin_outside_diagonal() -> Result<(), Expectation> {
    init_test_logging();

    // the closest border line is the left one, but the line meets it above the tile
    let BorderIntersection { back, front } =
        intersection(Vector::new(-1000., -1000.), Vector::new(2., 1.));
    expect_point(&back, Vector::new(1000., 0.), Border::Top)?;
    expect_point(&front, Vector::new(2000., 500.), Border::Right)?;
    Ok(())
}

#[test]
fn origin_outside_almost_parallel() -> Result<(), Expectation> {
    init_test_logging();

    // the closest border line is crossed within the tile, so it is the entry
    let BorderIntersection { back, front } =
        intersection(Vector::new(-500., 10.), Vector::new(1000., -2.));
    expect_point(&back, Vector::new(0., 9.), Border::Left)?;
    expect_point(&front, Vector::new(2000., 5.), Border::Right)?;
    Ok(())
}

#[test]
fn no_intersection() -> Result<(), Expectation> {
    init_test_logging();

    let fault = |position, direction| {
        border_intersection(position, direction).err().map(|error| error.fault)
    };
    // misses the tile
    expect_eq(
        fault(Vector::new(-1000., -1000.), Vector::new(1., -1.)),
        Some(TrackFault::NoBorderIntersection),
    )?;
    // leaves the tile immediately
    expect_eq(
        fault(Vector::new(2000., 500.), Vector::new(1., 0.)),
        Some(TrackFault::NoBorderIntersection),
    )?;
    let no_direction = border_intersection(Vector::new(1000., 1000.), Vector::ZERO);
    expect_true(matches!(
        no_direction,
        Err(InvalidTrack { fault: TrackFault::Position(ref error), anchor: None })
            if error.fault == PositionFault::NoDirection
    ))?;
    Ok(())
}

#[test]
fn corner_is_rejected() -> Result<(), Expectation> {
    init_test_logging();

    let result = border_intersection(Vector::new(1000., 1000.), Vector::new(1., 1.));
    let fault = result.err().and_then(|error| error.invalid_position().map(|error| error.fault));
    expect_true(matches!(fault, Some(PositionFault::AmbiguousBorder { .. })))?;
    Ok(())
}

#[test]
fn restrict_positions_to_the_tile() -> Result<(), Expectation> {
    init_test_logging();

    let inside = Vector::new(123.4, 1999.);
    expect_eq(restrict_to_tile(inside, None).expect("Inside the tile."), inside)?;
    expect_eq(
        restrict_to_tile(Vector::new(500., -300.), Some(Vector::new(2000., 1000.)))
            .expect("Line crosses the top border."),
        Vector::new(846., 0.),
    )?;
    // towards the tile centre by default
    expect_eq(
        restrict_to_tile(Vector::new(3000., 1000.), None).expect("Line crosses the right border."),
        Vector::new(2000., 1000.),
    )?;
    expect_true(restrict_to_tile(Vector::new(f32::NAN, 0.), None).is_err())?;
    Ok(())
}
