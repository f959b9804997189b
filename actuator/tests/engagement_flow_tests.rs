use std::time::Duration;

use actuator::{Actuator, ActuatorConfig, EngagementState, GateOutcome, Tint};
use engine::ViewTree;

const DISMISS: Duration = Duration::from_millis(1500);
const REPROMPT: Duration = Duration::from_millis(500);

fn actuator() -> Actuator<ViewTree> {
    Actuator::headless(ActuatorConfig::default())
}

fn open_dialog(actuator: &mut Actuator<ViewTree>) {
    for _ in 0..6 {
        actuator.click(None);
    }
    assert!(actuator.state().dialog_active);
}

fn modal_count(actuator: &Actuator<ViewTree>) -> usize {
    actuator.surface().find_by_class("forced-modal").len()
}

/// Wrong answer, then let the dismiss and re-prompt delays run out.
fn wrong_and_wait(actuator: &mut Actuator<ViewTree>) {
    actuator.answer(1).expect("option B exists");
    actuator.advance(DISMISS);
    assert_eq!(modal_count(actuator), 0);
    assert!(actuator.state().dialog_active);
    actuator.advance(REPROMPT);
    assert_eq!(modal_count(actuator), 1);
}

#[test]
fn sixth_click_opens_dialog_exactly_once() {
    let mut actuator = actuator();
    for _ in 0..5 {
        assert_eq!(actuator.click(None), GateOutcome::Counted);
    }
    assert_eq!(modal_count(&actuator), 0);

    assert_eq!(actuator.click(None), GateOutcome::Triggered);
    assert_eq!(modal_count(&actuator), 1);
    assert_eq!(actuator.state().click_count, 0);

    // Further clicks while the dialog is up neither count nor open another one.
    for _ in 0..10 {
        assert_eq!(actuator.click(None), GateOutcome::Suppressed);
    }
    assert_eq!(modal_count(&actuator), 1);
    assert_eq!(actuator.state().click_count, 0);
}

#[test]
fn three_wrong_answers_then_correct_clears_everything() {
    let mut actuator = actuator();
    open_dialog(&mut actuator);

    for _ in 0..3 {
        wrong_and_wait(&mut actuator);
    }

    let state = actuator.state();
    assert_eq!(state.wrong_answer_count, 3);
    let level = actuator.penalty_level();
    assert!(level.pulsing);
    assert!(!level.blinking);
    assert_eq!(level.tint, Some(Tint::Alert));

    let page = actuator.mount().page;
    assert!(actuator.surface().has_class(page, "alert"));
    assert!(!actuator.surface().has_class(page, "alert-extreme"));

    actuator.answer(0).expect("option A exists");
    let state = actuator.state();
    assert_eq!(state.wrong_answer_count, 0);
    assert!(!state.dialog_active);
    assert_eq!(modal_count(&actuator), 0);
    assert!(!actuator.surface().has_class(page, "alert"));
    assert!(!actuator.penalty_level().is_visible());
}

#[test]
fn correct_answer_inside_penalty_window_stops_the_reprompt() {
    let mut actuator = actuator();
    open_dialog(&mut actuator);

    actuator.answer(1).expect("wrong");
    actuator.advance(Duration::from_millis(700));
    actuator.answer(0).expect("correct");
    assert_eq!(actuator.engagement_state(), EngagementState::Idle);

    // Both the dismiss and the re-open fire into a resolved session and do nothing.
    actuator.advance(DISMISS + REPROMPT);
    assert_eq!(modal_count(&actuator), 0);
    assert_eq!(actuator.engagement_state(), EngagementState::Idle);
    assert_eq!(actuator.pending_timers(), 0);

    // The gate is live again and starts from zero.
    for _ in 0..5 {
        assert_eq!(actuator.click(None), GateOutcome::Counted);
    }
    assert_eq!(actuator.click(None), GateOutcome::Triggered);
    assert_eq!(modal_count(&actuator), 1);
}

#[test]
fn clicks_on_dialog_buttons_answer_and_are_not_counted() {
    let mut actuator = actuator();
    open_dialog(&mut actuator);
    let buttons = actuator.dialog().expect("dialog shown").options().to_vec();

    assert_eq!(actuator.click(Some(buttons[1])), GateOutcome::Suppressed);
    assert_eq!(actuator.state().wrong_answer_count, 1);
    let dialog = actuator.dialog().expect("still shown").dialog();
    assert!(actuator.surface().has_class(dialog, "forced-wrong"));
    assert_eq!(actuator.surface().find_by_class("forced-hint").len(), 1);

    assert_eq!(actuator.click(Some(buttons[0])), GateOutcome::Suppressed);
    assert_eq!(actuator.state().click_count, 0);
    assert!(!actuator.state().dialog_active);
}

#[test]
fn rapid_wrong_answers_escalate_without_duplicating_dialogs() {
    let mut actuator = actuator();
    open_dialog(&mut actuator);

    for _ in 0..4 {
        actuator.answer(1).expect("wrong");
    }
    assert_eq!(actuator.state().wrong_answer_count, 4);
    assert_eq!(actuator.pending_timers(), 1);

    actuator.advance(DISMISS + REPROMPT);
    assert_eq!(modal_count(&actuator), 1);
    assert_eq!(
        actuator.engagement_state(),
        EngagementState::AwaitingAnswer
    );

    // An explicit open while one is up is ignored.
    actuator.open_forced_question();
    assert_eq!(modal_count(&actuator), 1);
}

#[test]
fn answers_while_dialog_is_hidden_are_ignored() {
    let mut actuator = actuator();
    open_dialog(&mut actuator);
    actuator.answer(1).expect("wrong");
    actuator.advance(DISMISS);

    actuator.answer(0).expect("valid index");
    assert_eq!(
        actuator.engagement_state(),
        EngagementState::Penalized { dismissed: true }
    );
    assert_eq!(actuator.state().wrong_answer_count, 1);
}

#[test]
fn nag_loop_escalates_to_extreme_tint() {
    let mut actuator = actuator();
    open_dialog(&mut actuator);
    for _ in 0..6 {
        wrong_and_wait(&mut actuator);
    }

    let level = actuator.penalty_level();
    assert_eq!(level.tint, Some(Tint::AlertExtreme));
    assert!(level.blinking);
    let overlay = actuator.surface().find_by_class("penalty-overlay")[0];
    assert_eq!(actuator.surface().style(overlay, "opacity"), Some("0.70"));
}

#[test]
fn game_restart_does_not_reset_penalty() {
    let mut actuator = actuator();
    open_dialog(&mut actuator);
    wrong_and_wait(&mut actuator);
    actuator.continue_game();
    assert_eq!(actuator.state().wrong_answer_count, 1);
    assert!(actuator.state().dialog_active);
}
