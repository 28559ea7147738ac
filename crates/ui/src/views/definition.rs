use std::sync::Arc;

use dioxus::prelude::*;
use tracing::info;
use vocab_core::model::{DefinitionForm, DefinitionStatus, WordSet};

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{DefinitionIntent, DefinitionPromptVm, DefinitionVm};

#[cfg(test)]
use crate::views::test_harness::IntentHandles;

#[component]
pub fn DefinitionView(words: Arc<WordSet>, on_graded: EventHandler<DefinitionForm>) -> Element {
    let ctx = use_context::<AppContext>();
    let clock = ctx.clock();
    let grader = ctx.services().grader();
    let vm = use_signal(|| DefinitionVm::start(&words, clock.now()).ok());

    let dispatch = use_callback(move |intent: DefinitionIntent| {
        let mut vm = vm;
        match intent {
            DefinitionIntent::Answer { index, text } => {
                if let Some(form) = vm.write().as_mut() {
                    form.set_answer(index, text);
                }
            }
            DefinitionIntent::Submit => {
                let Some(Ok(requests)) = vm
                    .write()
                    .as_mut()
                    .map(|form| form.begin_submit(clock.now()))
                else {
                    return;
                };
                let grader = Arc::clone(&grader);
                spawn(async move {
                    info!(answers = requests.len(), "submitting definitions for grading");
                    let graded = grader.grade(&requests).await;
                    let finished = vm.write().as_mut().map(|form| form.finish(graded));
                    if finished == Some(Ok(())) {
                        let form = vm.read().as_ref().map(|form| form.form().clone());
                        if let Some(form) = form {
                            on_graded.call(form);
                        }
                    }
                });
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<IntentHandles<DefinitionIntent>>() {
                handles.register(dispatch);
            }
        }
    }

    let Some(form) = vm.read().clone() else {
        let message = ViewError::Unknown.message();
        return rsx! {
            p { class: "view-error", "{message}" }
        };
    };
    let editable = form.is_editable();
    let submitting = form.status() == DefinitionStatus::Submitting;
    let graded = form.status() == DefinitionStatus::Graded;
    let submit_label = form.submit_label();
    let error = form.error();

    rsx! {
        div { class: "page definition-page",
            header { class: "view-header",
                h2 { class: "view-title", "Enter the Definitions" }
            }
            div { class: "view-divider" }
            form {
                class: "definition-form",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    dispatch.call(DefinitionIntent::Submit);
                },
                for prompt in form.prompts() {
                    DefinitionPrompt { key: "{prompt.index}", prompt: prompt.clone(), editable, dispatch }
                }
                if let Some(err) = error {
                    p { class: "view-error", "{err.message()}" }
                }
                if !graded {
                    button {
                        class: "btn btn-primary",
                        id: "definition-submit",
                        r#type: "submit",
                        disabled: submitting,
                        "{submit_label}"
                    }
                }
            }
            if submitting {
                p { class: "view-status", "Loading..." }
            }
            if graded {
                DefinitionResults { form: form.clone() }
            }
        }
    }
}

#[component]
fn DefinitionPrompt(
    prompt: DefinitionPromptVm,
    editable: bool,
    dispatch: Callback<DefinitionIntent>,
) -> Element {
    let index = prompt.index;

    rsx! {
        div { class: "definition-entry",
            label { r#for: "definition-{index}", "{prompt.word}" }
            input {
                id: "definition-{index}",
                r#type: "text",
                autocomplete: "off",
                value: "{prompt.answer}",
                disabled: !editable,
                onpaste: move |evt| evt.prevent_default(),
                oncopy: move |evt| evt.prevent_default(),
                oninput: move |evt| {
                    dispatch.call(DefinitionIntent::Answer { index, text: evt.value() });
                },
            }
        }
    }
}

#[component]
fn DefinitionResults(form: DefinitionVm) -> Element {
    let score = form.score_label();

    rsx! {
        section { class: "definition-results",
            h3 { "Results" }
            p { class: "definition-score", "{score}" }
            for (index, row) in form.results().into_iter().enumerate() {
                div { key: "{index}", class: "definition-result",
                    p {
                        strong { "{row.word}: " }
                        "{row.answer_label}"
                    }
                    p {
                        strong { "Correct: " }
                        "{row.expected}"
                    }
                    p { class: "{row.verdict_class()}",
                        strong { "Result: " }
                        "{row.verdict_label}"
                    }
                }
            }
        }
    }
}
