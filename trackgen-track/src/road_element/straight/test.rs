use trackgen_test_util::{expect_eq, expect_true, init_test_logging, Expectation};
use trackgen_types::{border::Border, scalar::Scalar, vector::Vector};

use crate::{
    error::{InvalidTrack, PositionFault, TrackFault},
    point::{
        connection::{ConnectionPoint, ConnectionPointView},
        Point,
    },
    road_element::{PointKind, RoadElement, StraightSegment},
};

fn segment(x: f32, y: f32, dx: f32, dy: f32) -> StraightSegment {
    StraightSegment::from_anchor(Vector::new(x, y), Vector::new(dx, dy))
        .expect("Line crosses two borders of the tile.")
}

fn views(segment: &StraightSegment) -> Vec<ConnectionPointView> {
    segment.connection_points().iter().map(ConnectionPoint::view).collect()
}

fn positions(segment: &StraightSegment) -> Vec<Vector> {
    segment.connection_points().iter().map(Point::position).collect()
}

fn pair(segment: &StraightSegment) -> (&ConnectionPoint, &ConnectionPoint) {
    match segment.connection_points() {
        [first, second] => (first, second),
        _ => unreachable!("A straight segment has two connection points."),
    }
}

fn close(first: Vector, second: Vector) -> bool {
    first.distance(&second) < Scalar(1e-5)
}

#[test]
fn from_anchor() -> Result<(), Expectation> {
    init_test_logging();

    let segment = segment(1000., 1000., 1., 0.);
    let (back, front) = pair(&segment);
    expect_eq(back.position(), Vector::new(0., 1000.))?;
    expect_eq(back.direction(), Vector::new(-1., 0.))?;
    expect_eq(back.border(), Border::Left)?;
    expect_eq(front.position(), Vector::new(2000., 1000.))?;
    expect_eq(front.direction(), Vector::new(1., 0.))?;
    expect_eq(front.border(), Border::Right)?;
    expect_eq(segment.anchor_point().position(), Vector::new(1000., 1000.))?;
    expect_eq(segment.heading(), Vector::EX)?;
    // all points know their road element
    expect_eq(back.owner(), Some(segment.id()))?;
    expect_eq(segment.anchor_point().owner().copied(), Some(segment.id()))?;
    Ok(())
}

#[test]
fn centered() -> Result<(), Expectation> {
    init_test_logging();

    let segment = StraightSegment::centered().expect("Horizontal line through the centre.");
    expect_eq(positions(&segment), vec![Vector::new(0., 1000.), Vector::new(2000., 1000.)])?;
    Ok(())
}

#[test]
fn from_connection_points() -> Result<(), Expectation> {
    init_test_logging();

    let first = ConnectionPoint::new(Vector::new(0., 1000.), Vector::new(-1., 0.25))
        .expect("Point on the left border.");
    let second = ConnectionPoint::new(Vector::new(2000., 500.), Vector::new(1., -0.25))
        .expect("Point on the right border.");
    let second_direction = second.direction();
    let segment = StraightSegment::from_connection_points([first, second])
        .expect("Points at different positions.");
    expect_eq(segment.anchor_point().position(), Vector::new(1000., 750.))?;
    expect_eq(segment.heading(), second_direction)?;

    let same = || {
        ConnectionPoint::new(Vector::new(0., 1000.), Vector::new(-1., 0.))
            .expect("Point on the left border.")
    };
    let result = StraightSegment::from_connection_points([same(), same()]);
    expect_true(matches!(
        result,
        Err(InvalidTrack { fault: TrackFault::DegenerateDirection(_), .. })
    ))?;
    Ok(())
}

#[test]
fn update_anchor_point_is_idempotent() -> Result<(), Expectation> {
    init_test_logging();

    let mut segment = segment(1000., 1000., 1., 0.);
    let position = Vector::new(700., 900.);
    let direction = Some(Vector::new(1., 0.25));
    segment.update_anchor_point(0, position, direction).expect("Line crosses two borders.");
    let first_views = views(&segment);
    let first_anchor = *segment.anchor_point();
    segment.update_anchor_point(0, position, direction).expect("Line crosses two borders.");
    expect_eq(views(&segment), first_views)?;
    expect_eq(*segment.anchor_point(), first_anchor)?;
    Ok(())
}

#[test]
fn update_anchor_point_keeps_heading() -> Result<(), Expectation> {
    init_test_logging();

    let mut segment = segment(1000., 1000., 1., 0.);
    segment.update_anchor_point(0, Vector::new(1000., 500.), None).expect("Horizontal line.");
    expect_eq(positions(&segment), vec![Vector::new(0., 500.), Vector::new(2000., 500.)])?;
    expect_eq(segment.heading(), Vector::EX)?;

    // outside of the tile, the anchor point is moved to the border towards the tile centre
    segment.update_anchor_point(0, Vector::new(1000., -500.), None).expect("Horizontal line.");
    expect_eq(segment.anchor_point().position(), Vector::new(1000., 0.))?;
    expect_eq(positions(&segment), vec![Vector::new(0., 0.), Vector::new(2000., 0.)])?;
    Ok(())
}

#[test]
fn unknown_points() -> Result<(), Expectation> {
    init_test_logging();

    let mut segment = segment(1000., 1000., 1., 0.);
    let anchor = segment.update_anchor_point(1, Vector::new(1000., 500.), None);
    expect_true(matches!(
        anchor,
        Err(InvalidTrack {
            fault: TrackFault::UnknownPoint { kind: PointKind::Anchor, index: 1 },
            ..
        })
    ))?;
    let connection = segment.update_connection_point(2, Vector::new(0., 500.), None);
    expect_true(matches!(
        connection,
        Err(InvalidTrack {
            fault: TrackFault::UnknownPoint { kind: PointKind::Connection, index: 2 },
            ..
        })
    ))?;
    Ok(())
}

#[test]
fn drag_connection_point() -> Result<(), Expectation> {
    init_test_logging();

    let mut segment = segment(1000., 1000., 1., 0.);
    segment
        .update_connection_point(0, Vector::new(500., -300.), None)
        .expect("Restricted to the top border.");
    let (first, second) = pair(&segment);
    expect_eq(first.position(), Vector::new(846., 0.))?;
    expect_eq(first.border(), Border::Top)?;
    // the other connection point stays in place, but turns with the line
    expect_eq(second.position(), Vector::new(2000., 1000.))?;
    expect_eq(second.border(), Border::Right)?;
    expect_true(close(second.direction(), Vector::new(1154., 1000.).unit_vector()))?;
    expect_true(close(first.direction(), -second.direction()))?;
    // the anchor point keeps its relative position
    expect_eq(segment.anchor_point().position(), Vector::new(1423., 500.))?;
    expect_eq(segment.heading(), second.direction())?;
    Ok(())
}

#[test]
fn anchor_ratio_is_preserved() -> Result<(), Expectation> {
    init_test_logging();

    let mut segment = segment(1000., 1000., 1., 0.);
    segment.update_connection_point(0, Vector::new(0., 500.), None).expect("Left border.");
    expect_eq(positions(&segment), vec![Vector::new(0., 500.), Vector::new(2000., 1000.)])?;
    expect_eq(segment.anchor_point().position(), Vector::new(1000., 750.))?;
    Ok(())
}

#[test]
fn anchor_ratio_is_clamped() -> Result<(), Expectation> {
    init_test_logging();

    let mut segment = segment(100., 1000., 1., 0.);
    segment.update_connection_point(1, Vector::new(2000., 1000.), None).expect("Right border.");
    expect_eq(segment.anchor_point().position(), Vector::new(200., 1000.))?;
    Ok(())
}

#[test]
fn drag_onto_the_other_point() -> Result<(), Expectation> {
    init_test_logging();

    let mut segment = segment(1000., 1000., 1., 0.);
    let before = views(&segment);
    let result = segment.update_connection_point(0, Vector::new(2000., 1000.), None);
    expect_true(matches!(
        result,
        Err(InvalidTrack { fault: TrackFault::DegenerateDirection(_), anchor: Some(_) })
    ))?;
    expect_eq(views(&segment), before)?;
    Ok(())
}

#[test]
fn turn_connection_point() -> Result<(), Expectation> {
    init_test_logging();

    let mut segment = segment(1000., 1000., 1., 0.);
    let direction = Vector::new(1., -0.25);
    segment
        .update_connection_point(1, Vector::new(2000., 500.), Some(direction))
        .expect("Right border, pointing out of the tile.");
    let (first, second) = pair(&segment);
    expect_eq(second.position(), Vector::new(2000., 500.))?;
    expect_true(close(second.direction(), direction.unit_vector()))?;
    // the other connection point follows the new line
    expect_eq(first.position(), Vector::new(0., 1000.))?;
    expect_eq(first.border(), Border::Left)?;
    expect_true(close(first.direction(), -direction.unit_vector()))?;
    expect_eq(segment.anchor_point().position(), Vector::new(1000., 750.))?;
    Ok(())
}

#[test]
fn failed_turn_is_reverted() -> Result<(), Expectation> {
    init_test_logging();

    let mut segment = segment(1000., 1000., 1., 0.);
    let before = views(&segment);
    let anchor_before = *segment.anchor_point();
    // the other connection point can move to (0, 500), but the turned point is not on a border
    let result = segment.update_connection_point(1, Vector::new(1500., 500.), Some(Vector::EX));
    let fault = result.err().and_then(|error| error.invalid_position().map(|error| error.fault));
    expect_eq(fault, Some(PositionFault::NotOnBorder))?;
    expect_eq(views(&segment), before)?;
    expect_eq(*segment.anchor_point(), anchor_before)?;
    expect_eq(segment.heading(), Vector::EX)?;
    Ok(())
}

#[test]
fn twins_follow_the_segment() -> Result<(), Expectation> {
    init_test_logging();

    let mut west = segment(1000., 1000., 1., 0.);
    let east = segment(1000., 1000., 1., 0.);
    let (_, west_front) = pair(&west);
    let (east_back, _) = pair(&east);
    west_front.set_twin(east_back).expect("Both points are unlinked.");

    west.update_anchor_point(0, Vector::new(1000., 500.), None).expect("Horizontal line.");
    let (_, west_front) = pair(&west);
    expect_eq(west_front.position(), Vector::new(2000., 500.))?;
    expect_eq(east_back.position(), Vector::new(0., 500.))?;
    expect_eq(east_back.direction(), Vector::new(-1., 0.))?;
    Ok(())
}

#[test]
fn rejected_twin_reverts_everything() -> Result<(), Expectation> {
    init_test_logging();

    let mut west = segment(1000., 1000., 1., 0.);
    let east = segment(1000., 1000., 1., 0.);
    let (_, west_front) = pair(&west);
    let (east_back, _) = pair(&east);
    west_front.set_twin(east_back).expect("Both points are unlinked.");
    let west_before = views(&west);
    let east_before = views(&east);

    // the front point would move from the right to the top border
    let result = west.update_anchor_point(0, Vector::new(1000., 1000.), Some(Vector::new(1., -2.)));
    let fault = result.err().and_then(|error| error.invalid_position().map(|error| error.fault));
    expect_eq(
        fault,
        Some(PositionFault::FixedToBorder { fixed: Border::Right, requested: Border::Top }),
    )?;
    expect_eq(views(&west), west_before)?;
    expect_eq(views(&east), east_before)?;
    expect_eq(west.heading(), Vector::EX)?;
    Ok(())
}
