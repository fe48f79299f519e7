//! Properties every navigation must keep, checked on whole decks.

use decklayout_testing::prelude::*;
use decklayout_testing::robot_assertions::{
    assert_front_card_inside, assert_hidden_cards_covered, assert_offsets_approx,
    assert_resting_configuration,
};
use decklayout_ui::{DeckConfig, SizingMode};

fn spread_robot(cards: usize) -> DeckRobot {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = DeckConfig::default().with_left_most(40.0, 200.0);
    let mut robot = DeckRobot::with_config(1200.0, 800.0, config).expect("valid config");
    robot.add_cards(cards, SizingMode::Default);
    robot
}

#[test]
fn settled_navigation_schedules_nothing() {
    let mut robot = spread_robot(3);
    robot.deck().show_next();
    assert!(!robot.deck().is_animating());
    robot.deck().show_previous();
    assert!(!robot.deck().is_animating());

    robot.deck().drag_by(-300.0);
    robot.deck().show_previous();
    robot.wait_for_idle();
    let spread = robot.card_offsets();
    robot.deck().show_previous();
    assert!(!robot.deck().is_animating());
    assert_offsets_approx(robot.deck(), &spread, "previous twice");
}

#[test]
fn fling_outcome_ignores_magnitude() {
    for velocity in [-8000.0, -1200.0, -0.01] {
        let mut robot = spread_robot(3);
        robot.deck().drag_by(-300.0);
        robot.deck().fling(velocity);
        robot.wait_for_idle();
        assert_offsets_approx(robot.deck(), &[40.0, 40.0, 620.0], &format!("fling {velocity}"));
    }
    for velocity in [0.0, 0.01, 1200.0, 8000.0] {
        let mut robot = spread_robot(3);
        robot.deck().drag_by(-300.0);
        robot.deck().fling(velocity);
        robot.wait_for_idle();
        assert_offsets_approx(robot.deck(), &[40.0, 620.0, 1200.0], &format!("fling {velocity}"));
    }
}

#[test]
fn previous_then_next_round_trips_a_three_card_deck() {
    let mut robot = spread_robot(3);
    let rest = robot.card_offsets();
    robot.deck().drag_by(-150.0);

    robot.deck().show_previous();
    robot.wait_for_idle();
    assert_resting_configuration(robot.deck(), "after previous");
    robot.deck().show_next();
    robot.wait_for_idle();
    assert_offsets_approx(robot.deck(), &rest, "back at rest");
}

#[test]
fn next_then_previous_round_trips_the_resting_stack() {
    let mut robot = spread_robot(3);
    let rest = robot.card_offsets();
    robot.deck().show_next();
    robot.wait_for_idle();
    robot.deck().show_previous();
    robot.wait_for_idle();
    assert_offsets_approx(robot.deck(), &rest, "round trip");
}

#[test]
fn next_then_previous_from_a_spread_stack_stays_stacked() {
    let mut robot = spread_robot(3);
    robot.deck().drag_by(-300.0);
    robot.deck().show_previous();
    robot.wait_for_idle();
    assert_offsets_approx(robot.deck(), &[40.0, 620.0, 1200.0], "spread");

    robot.deck().show_next();
    robot.wait_for_idle();
    assert_offsets_approx(robot.deck(), &[40.0, 40.0, 620.0], "after next");
    robot.deck().show_previous();
    robot.wait_for_idle();
    assert_offsets_approx(robot.deck(), &[40.0, 40.0, 620.0], "after previous");
    assert_resting_configuration(robot.deck(), "after previous");
}

#[test]
fn back_to_back_navigation_matches_settling_in_between() {
    let mut stepped = spread_robot(3);
    stepped.deck().show_first();
    stepped.wait_for_idle();
    stepped.deck().show_next();
    stepped.wait_for_idle();
    assert_offsets_approx(stepped.deck(), &[40.0, 620.0, 620.0], "stepped");

    let mut chained = spread_robot(3);
    chained.deck().show_first();
    chained.deck().show_next();
    chained.wait_for_idle();
    assert_offsets_approx(chained.deck(), &stepped.card_offsets(), "back to back");
    assert_resting_configuration(chained.deck(), "back to back");
    assert_front_card_inside(chained.deck(), "back to back");
}

#[test]
fn navigation_mid_slide_reaches_the_rest_of_the_new_target() {
    let mut robot = spread_robot(3);
    robot.deck().drag_by(-300.0);
    robot.deck().show_previous();
    robot.advance_frame();
    robot.advance_frame();
    assert!(robot.deck().is_animating());

    robot.deck().show_next();
    robot.wait_for_idle();
    assert_offsets_approx(robot.deck(), &[40.0, 40.0, 620.0], "after next");
    assert_resting_configuration(robot.deck(), "after next");
}

#[test]
fn show_next_keeps_the_front_card_inside() {
    let mut robot = spread_robot(4);
    robot.deck().drag_by(-450.0);
    robot.deck().show_next();
    robot.wait_for_idle();
    assert_resting_configuration(robot.deck(), "after next");
    assert_front_card_inside(robot.deck(), "after next");
    assert_hidden_cards_covered(robot.deck(), "after next");
}

#[test]
fn lone_card_returns_to_max_left_most() {
    let mut robot = spread_robot(1);
    robot.deck().drag_by(150.0);
    assert_offsets_approx(robot.deck(), &[50.0], "dragged left");
    robot.deck().show_next();
    robot.wait_for_idle();
    assert_resting_configuration(robot.deck(), "lone card");
}

#[test]
fn show_first_reveals_the_whole_deck() {
    let mut robot = spread_robot(5);
    robot.deck().show_first();
    robot.wait_for_idle();
    assert!(robot.deck().cards().iter().all(|card| card.is_visible()));
    assert_offsets_approx(
        robot.deck(),
        &[200.0, 780.0, 1360.0, 1940.0, 2520.0],
        "after show_first",
    );

    // Already showing the first card: nothing to do.
    robot.deck().show_first();
    assert!(!robot.deck().is_animating());

    robot.swipe(900.0, 100.0);
    assert_resting_configuration(robot.deck(), "swiped back");
    assert_hidden_cards_covered(robot.deck(), "swiped back");
}

#[test]
fn bounce_overshoots_and_returns() {
    let mut robot = spread_robot(3);
    robot.deck().drag_by(-300.0);
    robot.deck().show_previous();

    let front = robot.deck().card(2).expect("three cards");
    let mut peak = front.offset();
    while robot.deck().is_animating() {
        robot.advance_frame();
        peak = peak.max(front.offset());
    }
    assert!(peak > 1200.0, "peak {peak}");
    assert!(peak <= 1220.0 + 0.01, "peak {peak}");
    assert_approx_eq(front.offset(), 1200.0, 0.01, "rests after the bounce");
}
