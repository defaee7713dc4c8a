//! Setup flow and score persistence across rounds.

mod common;

use common::{ScriptedResolver, coordinator, over, started};
use strictly_xo::{
    BOT_NAME, Difficulty, GameMode, GameSession, Mark, MovePhase, NoopHooks, Screen,
    SessionController, SetupField, SetupForm, Winner,
};

#[test]
fn test_empty_setup_flags_both_fields_and_changes_nothing() {
    let mut controller = SessionController::new();
    let mut session = GameSession::new();

    let err = controller
        .start_round(&mut session, &SetupForm::default())
        .unwrap_err();

    assert_eq!(err.fields, vec![SetupField::PlayerX, SetupField::PlayerO]);
    assert_eq!(controller.screen(), Screen::Setup);
    assert_eq!(session.round(), 0);
    assert_eq!(session.scoreboard().rounds(), 0);
    assert_eq!(session.board().board().empty_count(), 9);
    assert!(!session.board().is_active());
}

#[test]
fn test_mode_toggle_has_no_validation() {
    let mut controller = SessionController::new();
    controller.select_mode(GameMode::HumanVsAutomated);
    controller.select_mode(GameMode::HumanVsAutomated.toggle());
    assert_eq!(controller.selected_mode(), GameMode::HumanVsHuman);
    assert_eq!(controller.screen(), Screen::Setup);
}

#[test]
fn test_bot_round_ignores_second_name() {
    let mut controller = SessionController::new();
    let mut session = GameSession::new();
    controller.select_mode(GameMode::HumanVsAutomated);

    controller
        .start_round(
            &mut session,
            &SetupForm::new("Ana".to_string(), "ignored".to_string(), Difficulty::Easy),
        )
        .unwrap();

    assert_eq!(session.board().names().name(Mark::O), BOT_NAME);
    assert_eq!(session.difficulty(), Difficulty::Easy);
}

#[tokio::test]
async fn test_scores_survive_play_again_and_setup() {
    let resolver = ScriptedResolver::new([
        over(["X", "X", "X", "O", "O", "", "", "", ""], Some(Winner::X)),
        over(["O", "O", "O", "X", "X", "", "X", "", ""], Some(Winner::O)),
    ]);
    let coordinator = coordinator(resolver);
    let (mut controller, mut session) = started(GameMode::HumanVsHuman);

    coordinator.play(&mut session, 0, &NoopHooks).await.unwrap();
    assert_eq!(session.phase(), MovePhase::Terminal);

    controller.reset(&mut session);
    assert_eq!(session.phase(), MovePhase::Idle);
    assert!(session.board().is_active());
    assert_eq!(session.board().board().empty_count(), 9);
    assert_eq!(session.board().names().name(Mark::X), "Ana");

    coordinator.play(&mut session, 6, &NoopHooks).await.unwrap();

    controller.return_to_setup();
    controller
        .start_round(
            &mut session,
            &SetupForm::new("Cy".to_string(), "Di".to_string(), Difficulty::Hard),
        )
        .unwrap();

    assert_eq!(session.scoreboard().wins(Mark::X), 1);
    assert_eq!(session.scoreboard().wins(Mark::O), 1);
    assert_eq!(session.scoreboard().draws(), 0);
    assert_eq!(session.round(), 3);
}
