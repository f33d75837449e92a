//! Tests for the command controller and its view snapshots.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_millions::{
    GameCommand, GameController, Hint, LadderError, OptionLabel, Question, QuestionOptions,
    QuestionPool, TOTAL_QUESTIONS, TerminationReason,
};

fn pool(size: usize) -> Arc<QuestionPool> {
    let labels = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];
    let questions = (0..size)
        .map(|i| {
            Question::new(
                format!("Pool question {i}?"),
                QuestionOptions::new(
                    format!("{i}-a"),
                    format!("{i}-b"),
                    format!("{i}-c"),
                    format!("{i}-d"),
                ),
                labels[i % labels.len()],
            )
        })
        .collect();
    Arc::new(QuestionPool::new(questions))
}

fn controller(seed: u64) -> GameController<StdRng> {
    GameController::start(pool(20), StdRng::seed_from_u64(seed)).expect("Pool is large enough")
}

fn correct_label(controller: &GameController<StdRng>) -> OptionLabel {
    *controller
        .session()
        .current_question()
        .expect("Question available")
        .correct()
}

fn wrong_label(controller: &GameController<StdRng>) -> OptionLabel {
    let correct = correct_label(controller);
    OptionLabel::all()
        .find(|label| *label != correct)
        .expect("Three wrong options")
}

#[test]
fn test_start_requires_enough_questions() {
    let result = GameController::start(pool(TOTAL_QUESTIONS - 1), StdRng::seed_from_u64(1));
    assert!(matches!(
        result,
        Err(LadderError::InsufficientQuestions {
            available: 10,
            required: 11
        })
    ));
}

#[test]
fn test_draws_distinct_questions() {
    let controller = controller(5);
    let mut prompts: Vec<_> = controller
        .session()
        .questions()
        .iter()
        .map(|q| q.prompt().clone())
        .collect();
    prompts.sort();
    prompts.dedup();
    assert_eq!(prompts.len(), TOTAL_QUESTIONS);
}

#[test]
fn test_same_seed_same_game() {
    assert_eq!(
        controller(42).session().questions(),
        controller(42).session().questions()
    );
}

#[test]
fn test_view_hides_answer_until_resolved() {
    let mut controller = controller(7);
    let view = controller.view();
    assert_eq!(view.question_number, 1);
    assert_eq!(view.total_questions, TOTAL_QUESTIONS);
    assert_eq!(view.prize_at_stake, 1_000);
    assert_eq!(view.stop_prize, None);
    assert!(view.feedback.is_none());
    assert_eq!(view.question.as_ref().map(|q| q.options.len()), Some(4));

    let correct = correct_label(&controller);
    let view = controller
        .execute(GameCommand::Answer { option: correct })
        .unwrap();
    assert!(view.awaiting_advance);
    assert!(view.question.is_none());
    let feedback = view.feedback.expect("Feedback after answering");
    assert_eq!(*feedback.question().correct(), correct);

    let view = controller.execute(GameCommand::Advance).unwrap();
    assert_eq!(view.question_number, 2);
    assert_eq!(view.accumulated, 1_000);
    assert_eq!(view.stop_prize, Some(1_000));
    assert_eq!(view.forfeit_if_wrong, 500);
}

#[test]
fn test_rejected_command_leaves_state() {
    let mut controller = controller(8);
    let before = controller.view();
    let err = controller.execute(GameCommand::Advance).unwrap_err();
    assert!(matches!(err, LadderError::InvalidTransition { .. }));
    assert_eq!(controller.view(), before);
}

#[test]
fn test_elimination_hides_options_in_view() {
    for seed in 0..16 {
        let mut controller = controller(seed);
        let correct = correct_label(&controller);
        let view = controller.execute(GameCommand::UseElimination).unwrap();

        let Some(Hint::Cards { card, eliminated }) = view.hints.last() else {
            panic!("Expected a cards hint");
        };
        assert_eq!(eliminated.len(), card.eliminates());
        let question = view.question.expect("Question still active");
        assert_eq!(question.options.len(), 4 - eliminated.len());
        assert!(question.options.iter().any(|o| o.label == correct));
        assert!(!view.lifelines.cards);
    }
}

#[test]
fn test_audience_and_ai_name_correct_option() {
    let mut controller = controller(9);
    let correct = correct_label(&controller);

    let view = controller.execute(GameCommand::UseAudience).unwrap();
    assert_eq!(
        view.hints.last(),
        Some(&Hint::Audience {
            suggestion: correct
        })
    );
    let view = controller.execute(GameCommand::UseAi).unwrap();
    assert_eq!(view.hints.last(), Some(&Hint::Ai { suggestion: correct }));
    assert!(!view.lifelines.audience);
    assert!(!view.lifelines.ai);
}

#[test]
fn test_wrong_answer_ends_game() {
    let mut controller = controller(10);
    let wrong = wrong_label(&controller);
    let view = controller
        .execute(GameCommand::Answer { option: wrong })
        .unwrap();
    assert!(view.ended);
    assert_eq!(view.termination_reason, Some(TerminationReason::Lost));
    assert_eq!(view.accumulated, 0);
    assert!(!view.lifelines.skip);
}

#[test]
fn test_start_restarts_game() {
    let mut controller = controller(12);
    let wrong = wrong_label(&controller);
    controller
        .execute(GameCommand::Answer { option: wrong })
        .unwrap();

    let view = controller.execute(GameCommand::Start).unwrap();
    assert!(!view.ended);
    assert_eq!(view.position, 0);
    assert_eq!(view.accumulated, 0);
    assert!(view.lifelines.audience && view.lifelines.cards && view.lifelines.ai);
}

#[test]
fn test_command_json_shape() {
    let command: GameCommand =
        serde_json::from_str(r#"{"command": "answer", "option": "C"}"#).unwrap();
    assert_eq!(
        command,
        GameCommand::Answer {
            option: OptionLabel::C
        }
    );

    let command: GameCommand = serde_json::from_str(r#"{"command": "use_elimination"}"#).unwrap();
    assert_eq!(command, GameCommand::UseElimination);

    assert!(serde_json::from_str::<GameCommand>(r#"{"command": "cheat"}"#).is_err());
}
