use std::time::Duration;

use vocab_core::model::{StudyMode, TimerEpoch};

use super::GameIntent;
use super::test_harness::{Fixture, ViewKind, setup_view_harness};
use crate::vm::{DefinitionIntent, SpellingIntent, StudyIntent};

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_renders_start_screen() {
    let mut harness = setup_view_harness(ViewKind::Game, Fixture::default());
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Welcome to Vocab"), "missing title in {html}");
    assert!(html.contains("2 words, 5s per word"), "missing summary in {html}");
    assert!(html.contains("Start Study Session"), "missing start in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_offers_retry_when_decrypt_fails() {
    let fixture = Fixture {
        decrypt_fails: true,
        ..Fixture::default()
    };
    let mut harness = setup_view_harness(ViewKind::Game, fixture);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Please try again later."), "missing error in {html}");
    assert!(html.contains("game-retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_requires_a_seed() {
    let fixture = Fixture {
        seed: None,
        ..Fixture::default()
    };
    let mut harness = setup_view_harness(ViewKind::Game, fixture);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Please try again later."), "missing error in {html}");
    assert!(!html.contains("Welcome to Vocab"), "start screen shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_empty_seed_is_a_dead_end() {
    let fixture = Fixture {
        words: Vec::new(),
        ..Fixture::default()
    };
    let mut harness = setup_view_harness(ViewKind::Game, fixture);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("No words to practice"), "missing no-data in {html}");
    assert!(!html.contains("game-start"), "start button shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_carries_time_to_next_word() {
    let mut harness = setup_view_harness(ViewKind::Study(StudyMode::Sequential), Fixture::default());
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("cat"), "missing first word in {html}");
    assert!(html.contains("Time left: 0:05"), "missing timer in {html}");

    harness.study(StudyIntent::Tick(TimerEpoch::default()));
    harness.study(StudyIntent::Tick(TimerEpoch::default()));
    harness.study(StudyIntent::NextWord);

    let html = harness.render();
    assert!(html.contains("dog"), "missing second word in {html}");
    assert!(html.contains("Time left: 0:08"), "missing carried time in {html}");
    assert!(html.contains("Finish"), "missing finish label in {html}");

    // Ticks armed for the first word no longer count.
    harness.study(StudyIntent::Tick(TimerEpoch::default()));
    assert!(harness.render().contains("Time left: 0:08"));

    harness.study(StudyIntent::NextWord);
    assert!(harness.render().contains("Study complete!"));
    assert_eq!(harness.log.study_completed.get(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_lists_every_card_at_once() {
    let mut harness =
        setup_view_harness(ViewKind::Study(StudyMode::Simultaneous), Fixture::default());
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("study-grid"), "missing grid in {html}");
    assert!(html.contains("a small animal"), "missing first card in {html}");
    assert!(html.contains("a loyal animal"), "missing second card in {html}");
    assert!(html.contains("Time left: 0:10"), "missing shared timer in {html}");
    assert!(!html.contains("study-next"), "next button shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn spelling_view_smoke_flags_a_miss_and_moves_on() {
    let mut harness = setup_view_harness(ViewKind::Spelling, Fixture::default());
    harness.rebuild();
    assert!(harness.render().contains("Word 1 of 2"));

    harness.spelling(SpellingIntent::Listen);
    assert_eq!(harness.speaker.spoken(), vec!["cat".to_string()]);

    harness.spelling(SpellingIntent::Input("cot".to_string()));
    harness.spelling(SpellingIntent::Submit);
    let html = harness.render();
    assert!(html.contains("Oops! The correct spelling is"), "missing feedback in {html}");

    assert!(harness.wait_for_text("Word 2 of 2", Duration::from_secs(3)).await);
    let html = harness.render();
    assert!(!html.contains("Oops!"), "stale feedback in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn spelling_view_smoke_start_over_clears_progress() {
    let mut harness = setup_view_harness(ViewKind::Spelling, Fixture::default());
    harness.rebuild();

    harness.spelling(SpellingIntent::Input("cat".to_string()));
    harness.spelling(SpellingIntent::Submit);
    assert!(harness.render().contains("Awesome!"));

    harness.spelling(SpellingIntent::Restart);
    let html = harness.render();
    assert!(html.contains("Word 1 of 2"), "missing progress in {html}");
    assert!(!html.contains("Awesome!"), "feedback kept in {html}");
    assert!(harness.log.spelling_results.borrow().is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn definition_view_smoke_shows_graded_rows() {
    let mut harness = setup_view_harness(ViewKind::Definition, Fixture::default());
    harness.rebuild();
    assert!(harness.render().contains("Enter the Definitions"));

    harness.definition(DefinitionIntent::Answer {
        index: 0,
        text: "a little pet".to_string(),
    });
    harness.definition(DefinitionIntent::Submit);
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Results"), "missing results in {html}");
    assert!(html.contains("No answer"), "missing empty answer label in {html}");
    assert!(html.contains("Incorrect"), "missing failed verdict in {html}");
    assert!(html.contains("1 of 2 definitions accepted"), "missing score in {html}");
    assert!(!html.contains("definition-submit"), "submit still shown in {html}");
    assert_eq!(harness.grader.batches().len(), 1);
    assert!(harness.log.graded.borrow().is_some());
}

#[tokio::test(flavor = "current_thread")]
async fn definition_view_smoke_keeps_answers_when_grading_fails() {
    let fixture = Fixture {
        verdicts: None,
        ..Fixture::default()
    };
    let mut harness = setup_view_harness(ViewKind::Definition, fixture);
    harness.rebuild();

    harness.definition(DefinitionIntent::Answer {
        index: 1,
        text: "faithful".to_string(),
    });
    harness.definition(DefinitionIntent::Submit);
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("grade your answers"), "missing error in {html}");
    assert!(html.contains("Try again"), "missing retry label in {html}");
    assert!(html.contains("faithful"), "answer lost in {html}");
    assert!(harness.log.graded.borrow().is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_ticker_advances_and_completes_once() {
    let fixture = Fixture {
        difficulty: Some(1.0),
        ..Fixture::default()
    };
    let mut harness = setup_view_harness(ViewKind::Study(StudyMode::Sequential), fixture);
    harness.rebuild();
    assert!(harness.render().contains("Word 1 of 2"));

    assert!(
        harness
            .wait_for_text("Study complete!", Duration::from_secs(5))
            .await,
        "ticker never finished study"
    );
    assert_eq!(harness.log.study_completed.get(), 1);

    // The ticker is dropped on completion, so nothing else lands.
    harness.wait(Duration::from_millis(1500)).await;
    assert_eq!(harness.log.study_completed.get(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_manual_advance_rearms_the_ticker() {
    let mut harness = setup_view_harness(ViewKind::Study(StudyMode::Sequential), Fixture::default());
    harness.rebuild();

    assert!(
        harness
            .wait_for_text("Time left: 0:04", Duration::from_secs(3))
            .await
    );
    harness.study(StudyIntent::NextWord);
    assert!(harness.render().contains("Time left: 0:09"));

    assert!(
        harness
            .wait_for_text("Time left: 0:08", Duration::from_secs(3))
            .await
    );
    let html = harness.render();
    assert!(html.contains("dog"), "lost second word in {html}");
    assert!(!html.contains("Time left: 0:07"), "double tick in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_unmount_stops_the_ticker() {
    let fixture = Fixture {
        words: vec![("cat", "a small animal")],
        difficulty: Some(1.0),
        ..Fixture::default()
    };
    let mut harness = setup_view_harness(ViewKind::Study(StudyMode::Sequential), fixture);
    harness.rebuild();
    assert!(harness.render().contains("Time left: 0:01"));

    harness.set_mounted(false);
    assert!(harness.render().contains("unmounted"));

    harness.wait(Duration::from_millis(2500)).await;
    harness.wait(Duration::from_millis(100)).await;
    assert_eq!(harness.log.study_completed.get(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn spelling_view_smoke_last_word_signals_results() {
    let fixture = Fixture {
        words: vec![("cat", "a small animal")],
        ..Fixture::default()
    };
    let mut harness = setup_view_harness(ViewKind::Spelling, fixture);
    harness.rebuild();

    harness.spelling(SpellingIntent::Input("Cat ".to_string()));
    harness.spelling(SpellingIntent::Submit);
    assert!(
        harness
            .wait_for_text("Spelling complete!", Duration::from_secs(3))
            .await
    );

    let results = harness.log.spelling_results.borrow().clone().unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].correct);
    assert_eq!(results[0].user_answer, "Cat ");
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_runs_every_phase_in_order() {
    let fixture = Fixture {
        study_mode: StudyMode::Sequential,
        verdicts: Some(vec![true, true]),
        ..Fixture::default()
    };
    let mut harness = setup_view_harness(ViewKind::Game, fixture);
    harness.rebuild();
    harness.drive_async().await;
    assert!(harness.render().contains("Welcome to Vocab"));

    harness.game(GameIntent::Begin);
    let html = harness.render();
    assert!(html.contains("study-timer"), "study not shown in {html}");
    assert!(!html.contains("Welcome to Vocab"), "start screen kept in {html}");

    harness.study(StudyIntent::NextWord);
    harness.study(StudyIntent::NextWord);
    let html = harness.render();
    assert!(html.contains("Spelling Adventure"), "spelling not shown in {html}");
    assert!(!html.contains("study-timer"), "study kept in {html}");

    harness.spelling(SpellingIntent::Input("cot".to_string()));
    harness.spelling(SpellingIntent::Submit);
    assert!(
        harness
            .wait_for_text("Word 2 of 2", Duration::from_secs(3))
            .await
    );
    harness.spelling(SpellingIntent::Input("dog".to_string()));
    harness.spelling(SpellingIntent::Submit);
    assert!(
        harness
            .wait_for_text("Enter the Definitions", Duration::from_secs(3))
            .await
    );

    let html = harness.render();
    assert!(!html.contains("Spelling Adventure"), "spelling kept in {html}");
    assert!(html.contains("Spelling: 1 / 2"), "missing spelling score in {html}");
    assert!(html.contains("cat (you wrote: cot)"), "missing miss in {html}");
    assert!(!html.contains("Definitions:"), "definitions scored early in {html}");

    harness.definition(DefinitionIntent::Answer {
        index: 0,
        text: "a little pet".to_string(),
    });
    harness.definition(DefinitionIntent::Submit);
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Definitions: 1 / 2"), "missing definition score in {html}");
    assert_eq!(harness.grader.batches().len(), 1);
}
