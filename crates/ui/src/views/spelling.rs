use std::sync::Arc;

use dioxus::prelude::*;
use tracing::debug;
use vocab_core::model::spelling::FEEDBACK_DELAY;
use vocab_core::model::{SpellingAdvance, SpellingResult, TimerEpoch, WordSet};

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{SpellingIntent, SpellingVm, TimerSlot, spawn_after};

#[cfg(test)]
use crate::views::test_harness::IntentHandles;

#[component]
pub fn SpellingView(words: Arc<WordSet>, on_complete: EventHandler<Vec<SpellingResult>>) -> Element {
    let ctx = use_context::<AppContext>();
    let clock = ctx.clock();
    let speaker = ctx.speaker();
    let vm = use_signal(|| SpellingVm::start(Arc::clone(&words), clock.now()).ok());
    let mut pending = use_signal(TimerSlot::default);

    let on_advance = use_callback(move |epoch: TimerEpoch| {
        let mut vm = vm;
        pending.write().release();
        let Some(outcome) = vm
            .write()
            .as_mut()
            .map(|spelling| spelling.advance(epoch, clock.now()))
        else {
            return;
        };
        match outcome {
            SpellingAdvance::Completed => {
                let results = vm
                    .read()
                    .as_ref()
                    .map(|spelling| spelling.results().to_vec())
                    .unwrap_or_default();
                debug!(answered = results.len(), "spelling complete");
                on_complete.call(results);
            }
            SpellingAdvance::NextWord { index } => debug!(index, "next spelling word"),
            SpellingAdvance::Stale => {}
        }
    });

    let dispatch = use_callback(move |intent: SpellingIntent| {
        let mut vm = vm;
        match intent {
            SpellingIntent::Listen => {
                if let Some(word) = vm.read().as_ref().and_then(SpellingVm::current_word) {
                    speaker.speak(word);
                }
            }
            SpellingIntent::Input(text) => {
                if let Some(spelling) = vm.write().as_mut() {
                    spelling.set_input(text);
                }
            }
            SpellingIntent::Submit => {
                let epoch = vm
                    .write()
                    .as_mut()
                    .and_then(|spelling| spelling.submit(clock.now()));
                if let Some(epoch) = epoch {
                    pending
                        .write()
                        .arm(spawn_after(FEEDBACK_DELAY, epoch, on_advance));
                }
            }
            SpellingIntent::Restart => {
                pending.write().cancel();
                if let Some(spelling) = vm.write().as_mut() {
                    spelling.restart(clock.now());
                }
            }
        }
    });

    use_drop(move || {
        if let Ok(mut slot) = pending.try_write() {
            slot.cancel();
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<IntentHandles<SpellingIntent>>() {
                handles.register(dispatch);
            }
        }
    }

    let Some(spelling) = vm.read().clone() else {
        let message = ViewError::Unknown.message();
        return rsx! {
            p { class: "view-error", "{message}" }
        };
    };

    rsx! {
        div { class: "page spelling-page",
            header { class: "view-header",
                h2 { class: "view-title", "Spelling Adventure" }
            }
            div { class: "view-divider" }
            if spelling.is_complete() {
                p { class: "view-status", "Spelling complete!" }
            } else {
                SpellingPrompt { spelling: spelling.clone(), dispatch }
            }
        }
    }
}

#[component]
fn SpellingPrompt(spelling: SpellingVm, dispatch: Callback<SpellingIntent>) -> Element {
    let progress = spelling.progress_label();
    let input = spelling.input().to_string();
    let feedback = spelling.feedback();
    let can_submit = spelling.can_submit();

    rsx! {
        p { class: "spelling-progress", "{progress}" }
        div { class: "spelling-listen",
            button {
                class: "btn btn-round",
                id: "spelling-listen",
                r#type: "button",
                aria_label: "Listen to word",
                onclick: move |_| dispatch.call(SpellingIntent::Listen),
                "Listen"
            }
        }
        if let Some(feedback) = feedback {
            div { class: "{feedback.class()}", "{feedback.message}" }
        }
        form {
            class: "spelling-form",
            onsubmit: move |evt| {
                evt.prevent_default();
                dispatch.call(SpellingIntent::Submit);
            },
            input {
                class: "spelling-input",
                id: "spelling-input",
                r#type: "text",
                autocomplete: "off",
                placeholder: "Type the word you hear",
                value: "{input}",
                oninput: move |evt| dispatch.call(SpellingIntent::Input(evt.value())),
            }
            button {
                class: "btn btn-primary",
                id: "spelling-submit",
                r#type: "submit",
                disabled: !can_submit,
                "Next"
            }
        }
        div { class: "spelling-actions",
            button {
                class: "btn btn-secondary",
                id: "spelling-restart",
                r#type: "button",
                onclick: move |_| dispatch.call(SpellingIntent::Restart),
                "Start over"
            }
        }
    }
}
