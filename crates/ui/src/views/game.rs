use dioxus::prelude::*;
use tracing::{debug, info, warn};
use vocab_core::model::{
    DefinitionForm, GameSession, PhaseError, QuestionKind, SessionPhase, SessionReport,
    SpellingResult, StudyMode,
};

use crate::context::AppContext;
use crate::views::{
    DefinitionView, SpellingView, StudyView, ViewError, ViewState, view_state_from_resource,
};

#[cfg(test)]
use crate::views::test_harness::IntentHandles;

/// Phase signals raised by the start screen and the phase views.
#[derive(Clone, Debug, PartialEq)]
pub enum GameIntent {
    Begin,
    StudyComplete,
    SpellingComplete(Vec<SpellingResult>),
    Graded(DefinitionForm),
}

#[component]
pub fn GameView() -> Element {
    let ctx = use_context::<AppContext>();
    let resource = use_resource(move || {
        let ctx = ctx.clone();
        async move {
            let Some(seed) = ctx.seed().map(str::to_string) else {
                warn!("no seed was provided");
                return Err(ViewError::Bootstrap);
            };
            ctx.services().load_session(&seed).await.map_err(|err| {
                warn!(error = %err, "cannot start session");
                ViewError::Bootstrap
            })
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page game-page",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "view-status", "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "view-error-panel",
                        p { class: "view-error", "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            id: "game-retry",
                            r#type: "button",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            "Retry"
                        }
                    }
                },
                ViewState::Ready(session) => rsx! {
                    GamePhases { session }
                },
            }
        }
    }
}

fn log_phase(result: Result<SessionPhase, PhaseError>) {
    match result {
        Ok(phase) => debug!(%phase, "phase entered"),
        Err(err) => warn!(error = %err, "phase signal rejected"),
    }
}

#[component]
fn GamePhases(session: GameSession) -> Element {
    let ctx = use_context::<AppContext>();
    let game = use_signal(|| session.clone());
    let study_mode = use_signal(|| None::<StudyMode>);
    let report = use_signal(|| SessionReport::new(session.seed()));

    let dispatch = use_callback(move |intent: GameIntent| {
        let mut game = game;
        let mut study_mode = study_mode;
        let mut report = report;
        match intent {
            GameIntent::Begin => {
                let mode = ctx.pick_study_mode();
                let result = game.write().begin();
                if result.is_ok() {
                    study_mode.set(Some(mode));
                    debug!(?mode, "study mode picked");
                }
                log_phase(result);
            }
            GameIntent::StudyComplete => log_phase(game.write().complete_study()),
            GameIntent::SpellingComplete(results) => {
                report.write().record_spelling(&results);
                log_phase(game.write().complete_spelling());
            }
            GameIntent::Graded(form) => {
                let mut current = report.write();
                current.record_definitions(&form);
                info!(
                    seed = %current.seed,
                    spelling_passed = current.passed(QuestionKind::Spelling),
                    spelling_total = current.total(QuestionKind::Spelling),
                    definitions_passed = current.passed(QuestionKind::Definition),
                    definitions_total = current.total(QuestionKind::Definition),
                    "session finished"
                );
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<IntentHandles<GameIntent>>() {
                handles.register(dispatch);
            }
        }
    }

    let (dead_end, phase, words, difficulty) = {
        let current = game.read();
        (
            current.is_dead_end(),
            current.phase(),
            current.words(),
            current.difficulty(),
        )
    };

    if dead_end {
        return rsx! {
            div { class: "no-data",
                h2 { "No words to practice" }
                p { "This seed does not contain any words." }
            }
        };
    }

    match phase {
        SessionPhase::Start => {
            let count = words.len();
            rsx! {
                div { class: "start-screen",
                    h2 { class: "view-title", "Welcome to Vocab" }
                    p { class: "view-subtitle", "{count} words, {difficulty} per word" }
                    button {
                        class: "btn btn-primary",
                        id: "game-start",
                        r#type: "button",
                        onclick: move |_| dispatch.call(GameIntent::Begin),
                        "Start Study Session"
                    }
                }
            }
        }
        SessionPhase::Study => match study_mode() {
            Some(mode) => rsx! {
                StudyView {
                    words,
                    difficulty,
                    mode,
                    on_complete: move |()| dispatch.call(GameIntent::StudyComplete),
                }
            },
            None => rsx! {},
        },
        SessionPhase::Spelling => rsx! {
            SpellingView {
                words,
                on_complete: move |results| dispatch.call(GameIntent::SpellingComplete(results)),
            }
        },
        SessionPhase::Definition => rsx! {
            DefinitionView {
                words,
                on_graded: move |form| dispatch.call(GameIntent::Graded(form)),
            }
            ReportSummary { report: report() }
        },
    }
}

#[component]
fn ReportSummary(report: SessionReport) -> Element {
    let spelling_passed = report.passed(QuestionKind::Spelling);
    let spelling_total = report.total(QuestionKind::Spelling);
    let definitions_total = report.total(QuestionKind::Definition);
    let definitions_passed = report.passed(QuestionKind::Definition);
    let misses = report
        .questions
        .iter()
        .filter(|question| question.kind == QuestionKind::Spelling && !question.pass)
        .map(|question| (question.content.clone(), question.answer_given.clone()))
        .collect::<Vec<_>>();

    rsx! {
        section { class: "session-report",
            h3 { "Session so far" }
            p { class: "session-report__line", "Spelling: {spelling_passed} / {spelling_total}" }
            if !misses.is_empty() {
                ul { class: "session-report__misses",
                    for (word, given) in misses {
                        li { key: "{word}", "{word} (you wrote: {given})" }
                    }
                }
            }
            if definitions_total > 0 {
                p { class: "session-report__line", "Definitions: {definitions_passed} / {definitions_total}" }
            }
        }
    }
}
