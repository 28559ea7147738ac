use std::sync::Arc;

use dioxus::prelude::*;
use tracing::debug;
use vocab_core::model::{Difficulty, StudyMode, StudyTransition, TimerEpoch, WordSet};

use crate::views::ViewError;
use crate::vm::{StudyIntent, StudyVm, TimerSlot, spawn_ticker};

#[cfg(test)]
use crate::views::test_harness::IntentHandles;

#[component]
pub fn StudyView(
    words: Arc<WordSet>,
    difficulty: Difficulty,
    mode: StudyMode,
    on_complete: EventHandler<()>,
) -> Element {
    let vm = use_signal(|| StudyVm::start(Arc::clone(&words), difficulty, mode).ok());
    let mut ticker = use_signal(TimerSlot::default);
    let armed = use_memo(move || vm.read().as_ref().and_then(StudyVm::armed_epoch));

    let dispatch = use_callback(move |intent: StudyIntent| {
        let mut vm = vm;
        if intent == StudyIntent::NextWord
            && vm.read().as_ref().is_some_and(StudyVm::can_advance)
        {
            ticker.write().cancel();
        }
        let Some(transition) = vm.write().as_mut().map(|study| study.apply(intent)) else {
            return;
        };
        match transition {
            // The effect below drops the ticker once no epoch is armed.
            StudyTransition::Completed => {
                debug!("study complete");
                on_complete.call(());
            }
            StudyTransition::Advanced { index, time_left } => {
                debug!(index, time_left, "study advanced");
            }
            StudyTransition::Counted { .. } | StudyTransition::Ignored => {}
        }
    });
    let on_tick = use_callback(move |epoch: TimerEpoch| dispatch.call(StudyIntent::Tick(epoch)));

    use_effect(move || {
        let epoch = armed();
        let mut slot = ticker.write();
        slot.cancel();
        if let Some(epoch) = epoch {
            slot.arm(spawn_ticker(epoch, on_tick));
        }
    });
    use_drop(move || {
        if let Ok(mut slot) = ticker.try_write() {
            slot.cancel();
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<IntentHandles<StudyIntent>>() {
                handles.register(dispatch);
            }
        }
    }

    let Some(study) = vm.read().clone() else {
        let message = ViewError::Unknown.message();
        return rsx! {
            p { class: "view-error", "{message}" }
        };
    };
    let title = study.title();
    let time_label = study.time_label();

    rsx! {
        div { class: "page study-page",
            header { class: "view-header",
                h2 { class: "view-title", "{title}" }
                span { class: "study-timer", id: "study-timer", "{time_label}" }
            }
            div { class: "view-divider" }
            if study.is_complete() {
                p { class: "view-status", "Study complete!" }
            } else if study.mode() == StudyMode::Sequential {
                SequentialCard {
                    study: study.clone(),
                    on_next: move |_| dispatch.call(StudyIntent::NextWord),
                }
            } else {
                div { class: "study-grid",
                    for card in study.cards() {
                        div { key: "{card.word}", class: "study-card",
                            h3 { class: "study-word", style: "{card.word_style()}", "{card.word}" }
                            p { class: "study-meaning", style: "{card.meaning_style()}", "{card.meaning}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SequentialCard(study: StudyVm, on_next: EventHandler<()>) -> Element {
    let Some(card) = study.current_card() else {
        return rsx! {};
    };
    let progress = study.progress_label();
    let next_label = study.next_label();

    rsx! {
        div { class: "study-card study-card--single",
            p { class: "study-progress", "{progress}" }
            h3 { class: "study-word", style: "{card.word_style()}", "{card.word}" }
            p { class: "study-meaning", style: "{card.meaning_style()}", "{card.meaning}" }
        }
        div { class: "study-actions",
            button {
                class: "btn btn-primary",
                id: "study-next",
                r#type: "button",
                onclick: move |_| on_next.call(()),
                "{next_label}"
            }
        }
    }
}
