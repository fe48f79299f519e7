//! End-to-end deck scenarios driven through pointer events and simulated
//! frames.

use decklayout_testing::prelude::*;
use decklayout_testing::robot_assertions::{
    assert_hidden_cards_covered, assert_offsets_approx, assert_resting_configuration,
};
use decklayout_ui::{Card, DeckConfig, EdgeInsets, GestureState, Size, SizingMode};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn robot() -> DeckRobot {
    init_logging();
    let config = DeckConfig::default().with_left_most(40.0, 200.0);
    DeckRobot::with_config(1200.0, 800.0, config).expect("valid config")
}

#[test]
fn inserted_cards_come_to_rest() {
    let mut robot = robot();
    robot.add_cards(3, SizingMode::Default);
    assert_offsets_approx(robot.deck(), &[40.0, 40.0, 620.0], "after insertion");
    assert_resting_configuration(robot.deck(), "after insertion");
}

#[test]
fn swipe_right_then_left_returns_to_rest() {
    let mut robot = robot();
    robot.add_cards(3, SizingMode::Default);
    let rest = robot.card_offsets();

    robot.swipe(600.0, 900.0);
    assert_offsets_approx(robot.deck(), &[40.0, 620.0, 1200.0], "after swipe right");
    assert_resting_configuration(robot.deck(), "after swipe right");

    robot.swipe(900.0, 600.0);
    assert_offsets_approx(robot.deck(), &rest, "after swipe left");
    assert_resting_configuration(robot.deck(), "after swipe left");
}

#[test]
fn drag_follows_the_pointer_until_release() {
    let mut robot = robot();
    robot.add_cards(3, SizingMode::Default);

    robot.press(600.0, 400.0);
    robot.advance_frame();
    assert!(robot.move_to(620.0, 400.0));
    assert_eq!(robot.deck().gesture_state(), GestureState::Dragging);
    robot.advance_frame();
    robot.move_to(720.0, 400.0);
    assert_offsets_approx(robot.deck(), &[40.0, 140.0, 720.0], "mid drag");
    assert!(!robot.deck().is_animating());

    robot.advance_frame();
    robot.release();
    robot.wait_for_idle();
    assert_resting_configuration(robot.deck(), "after release");
}

#[test]
fn leftward_drag_hides_covered_cards() {
    let mut robot = robot();
    let cards = robot.add_cards(5, SizingMode::Default);
    assert_hidden_cards_covered(robot.deck(), "after insertion");
    assert!(!cards[0].is_visible());

    robot.swipe(600.0, 900.0);
    assert!(cards[1].is_visible());
    assert_hidden_cards_covered(robot.deck(), "after swipe right");

    robot.swipe(900.0, 300.0);
    assert_resting_configuration(robot.deck(), "after swipe left");
    assert_hidden_cards_covered(robot.deck(), "after swipe left");
}

#[test]
fn slow_release_still_settles() {
    let mut robot = robot();
    robot.add_cards(3, SizingMode::Default);

    robot.press(600.0, 400.0);
    robot.advance_frame();
    robot.move_to(650.0, 400.0);
    robot.advance_frame();
    robot.move_to(760.0, 400.0);
    // Hold still long enough for the release velocity to drop to zero.
    robot.advance_time(200);
    robot.release();
    robot.wait_for_idle();

    assert_offsets_approx(robot.deck(), &[40.0, 620.0, 1200.0], "after slow release");
}

#[test]
fn cancelled_drag_leaves_cards_in_place() {
    let mut robot = robot();
    robot.add_cards(3, SizingMode::Default);

    robot.press(600.0, 400.0);
    robot.advance_frame();
    robot.move_to(620.0, 400.0);
    robot.advance_frame();
    robot.move_to(720.0, 400.0);
    assert!(robot.cancel());
    robot.wait_for_idle();

    assert_offsets_approx(robot.deck(), &[40.0, 140.0, 720.0], "after cancel");
    assert_eq!(robot.deck().gesture_state(), GestureState::Idle);
}

#[test]
fn new_drag_picks_up_a_card_mid_slide() {
    let mut robot = robot();
    let cards = robot.add_cards(3, SizingMode::Default);
    robot.drag(600.0, 900.0);
    robot.advance_frame();
    robot.advance_frame();
    assert!(robot.deck().is_animating());

    robot.press(1000.0, 400.0);
    robot.advance_frame();
    robot.move_to(990.0, 400.0);
    assert!(!robot.deck().is_animating());
    let caught = cards[2].offset();
    assert!(caught > 890.0 && caught < 1200.0, "caught at {caught}");
    robot.advance_frame();
    robot.move_to(980.0, 400.0);
    assert_approx_eq(cards[2].offset(), caught - 10.0, 0.01, "drag continues");
}

#[test]
fn listener_sees_every_drag_frame_and_the_release() {
    let mut robot = robot();
    let cards = robot.add_cards(2, SizingMode::Default);
    let listener = RecordingListener::new();
    robot.deck().set_listener(listener.clone());

    robot.swipe(600.0, 900.0);
    let first = cards[0].id();
    // The first move only crosses the touch slop.
    assert_eq!(listener.count(DeckEvent::RemoveDrag(first)), DRAG_STEPS - 1);
    assert_eq!(listener.count(DeckEvent::RemoveDragEnd), 1);
    assert_eq!(listener.events().last(), Some(&DeckEvent::RemoveDragEnd));
}

#[test]
fn resize_rechains_the_stack() {
    let mut robot = robot();
    let listener = RecordingListener::new();
    robot.deck().set_listener(listener.clone());
    robot.add_cards(3, SizingMode::Default);

    robot.resize(1000.0, 800.0);
    assert_offsets_approx(robot.deck(), &[40.0, 40.0, 520.0], "after resize");
    assert_eq!(listener.count(DeckEvent::Layout), 1);
}

#[test]
fn padded_cards_stack_by_their_content() {
    let mut robot = robot();
    let padding = EdgeInsets::horizontal(10.0);
    for _ in 0..3 {
        robot.add_card(Card::new(SizingMode::Default).with_padding(padding));
    }
    let deck = robot.deck();
    assert!(deck.cards().iter().all(|card| card.width() == 600.0));
    assert_offsets_approx(deck, &[30.0, 30.0, 610.0], "padded stack");
    assert_resting_configuration(deck, "padded stack");
}

#[test]
fn fill_card_covers_everything_right_of_the_parking_bound() {
    let mut robot = robot();
    robot.add_cards(2, SizingMode::Default);
    let fill = robot.add_card(Card::fill());
    assert_eq!(fill.width(), 1160.0);
    assert_eq!(fill.offset(), 40.0);
    assert_eq!(robot.deck().card_at(100.0), Some(fill));
}

#[test]
fn portrait_deck_gives_default_cards_the_width_right_of_max() {
    init_logging();
    let config = DeckConfig::default().with_left_most(10.0, 40.0);
    let mut robot = DeckRobot::with_config(600.0, 800.0, config).expect("valid config");
    let card = robot.add_card(
        Card::new(SizingMode::Default).with_padding(EdgeInsets::from_components(4.0, 0.0, 6.0, 0.0)),
    );
    assert_eq!(card.width(), 570.0);
    assert_eq!(card.left(), 40.0);
}

#[test]
fn oversized_card_is_pulled_inside_the_right_edge() {
    init_logging();
    let config = DeckConfig::default().with_left_most(10.0, 40.0);
    let mut robot = DeckRobot::with_config(600.0, 800.0, config).expect("valid config");
    let first = robot.add_card(Card::fixed(Size::new(600.0, 800.0)));
    let second = robot.add_card(Card::fixed(Size::new(600.0, 800.0)));
    assert_eq!(second.offset(), 0.0);
    assert_eq!(first.offset(), 10.0);
}
