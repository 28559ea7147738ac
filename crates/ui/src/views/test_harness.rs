use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{
    AppServices, Clock, DecryptError, GradingError, SeedDecryptor, StudyModePicker,
    SubjectiveGrader,
};
use vocab_core::model::{
    DecryptedSeed, DefinitionForm, Difficulty, GradingRequest, SpellingResult, StudyMode, WordSet,
};
use vocab_core::time::fixed_now;

use crate::context::{UiApp, build_app_context};
use crate::platform::{SpeakerRef, UiSpeaker};
use crate::views::{DefinitionView, GameIntent, GameView, SpellingView, StudyView};
use crate::vm::{DefinitionIntent, SpellingIntent, StudyIntent};

/// Lets a test reach the dispatch callback a view registered.
pub(crate) struct IntentHandles<I: 'static> {
    dispatch: Rc<RefCell<Option<Callback<I>>>>,
}

impl<I: 'static> Clone for IntentHandles<I> {
    fn clone(&self) -> Self {
        Self {
            dispatch: Rc::clone(&self.dispatch),
        }
    }
}

impl<I: 'static> Default for IntentHandles<I> {
    fn default() -> Self {
        Self {
            dispatch: Rc::new(RefCell::new(None)),
        }
    }
}

impl<I: 'static> IntentHandles<I> {
    pub(crate) fn register(&self, dispatch: Callback<I>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<I> {
        self.dispatch
            .borrow()
            .clone()
            .expect("dispatch registered")
    }
}

struct FakeSeeds {
    seed: Option<DecryptedSeed>,
}

#[async_trait]
impl SeedDecryptor for FakeSeeds {
    async fn decrypt(&self, _seed: &str) -> Result<DecryptedSeed, DecryptError> {
        self.seed.clone().ok_or(DecryptError::MissingToken)
    }
}

pub struct FakeGrader {
    verdicts: Option<Vec<bool>>,
    requests: Mutex<Vec<Vec<GradingRequest>>>,
}

impl FakeGrader {
    pub fn batches(&self) -> Vec<Vec<GradingRequest>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubjectiveGrader for FakeGrader {
    async fn grade(&self, requests: &[GradingRequest]) -> Result<Vec<bool>, GradingError> {
        self.requests.lock().unwrap().push(requests.to_vec());
        self.verdicts
            .clone()
            .ok_or(GradingError::HttpStatus(reqwest::StatusCode::BAD_GATEWAY))
    }
}

#[derive(Default)]
pub struct RecordingSpeaker {
    spoken: Mutex<Vec<String>>,
}

impl RecordingSpeaker {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl UiSpeaker for RecordingSpeaker {
    fn speak(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }
}

struct TestApp {
    services: AppServices,
    seed: Option<String>,
    speaker: Arc<RecordingSpeaker>,
}

impl UiApp for TestApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }

    fn seed(&self) -> Option<String> {
        self.seed.clone()
    }

    fn speaker(&self) -> SpeakerRef {
        self.speaker.clone()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Game,
    Study(StudyMode),
    Spelling,
    Definition,
}

/// What the mounted phase view reported back to its parent.
#[derive(Clone, Default)]
pub struct HarnessLog {
    pub study_completed: Rc<Cell<u32>>,
    pub spelling_results: Rc<RefCell<Option<Vec<SpellingResult>>>>,
    pub graded: Rc<RefCell<Option<DefinitionForm>>>,
}

pub struct Fixture {
    pub seed: Option<&'static str>,
    pub words: Vec<(&'static str, &'static str)>,
    pub difficulty: Option<f64>,
    pub decrypt_fails: bool,
    /// `None` makes every grading call fail.
    pub verdicts: Option<Vec<bool>>,
    pub study_mode: StudyMode,
}

impl Default for Fixture {
    fn default() -> Self {
        Self {
            seed: Some("seed-1"),
            words: vec![("cat", "a small animal"), ("dog", "a loyal animal")],
            difficulty: Some(5.0),
            decrypt_fails: false,
            verdicts: Some(vec![true, true]),
            study_mode: StudyMode::Sequential,
        }
    }
}

#[derive(Clone)]
struct HarnessContext {
    view: ViewKind,
    seed: DecryptedSeed,
    log: HarnessLog,
    game: IntentHandles<GameIntent>,
    study: IntentHandles<StudyIntent>,
    spelling: IntentHandles<SpellingIntent>,
    definition: IntentHandles<DefinitionIntent>,
    mount: IntentHandles<bool>,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    context: HarnessContext,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.context.game.clone());
    use_context_provider(|| props.context.study.clone());
    use_context_provider(|| props.context.spelling.clone());
    use_context_provider(|| props.context.definition.clone());
    use_context_provider(|| props.context.clone());
    rsx! { PhaseUnderTest {} }
}

#[component]
fn PhaseUnderTest() -> Element {
    let context = use_context::<HarnessContext>();
    let mut mounted = use_signal(|| true);
    let set_mounted = use_callback(move |on: bool| mounted.set(on));
    context.mount.register(set_mounted);
    if !mounted() {
        return rsx! {
            p { "unmounted" }
        };
    }
    let words = Arc::new(context.seed.words.clone());
    let difficulty = Difficulty::from_seed_value(context.seed.difficulty);
    let log = context.log;
    match context.view {
        ViewKind::Game => rsx! { GameView {} },
        ViewKind::Study(mode) => rsx! {
            StudyView {
                words,
                difficulty,
                mode,
                on_complete: move |_| log.study_completed.set(log.study_completed.get() + 1),
            }
        },
        ViewKind::Spelling => rsx! {
            SpellingView {
                words,
                on_complete: move |results| *log.spelling_results.borrow_mut() = Some(results),
            }
        },
        ViewKind::Definition => rsx! {
            DefinitionView {
                words,
                on_graded: move |form| *log.graded.borrow_mut() = Some(form),
            }
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub speaker: Arc<RecordingSpeaker>,
    pub grader: Arc<FakeGrader>,
    pub log: HarnessLog,
    game: IntentHandles<GameIntent>,
    study: IntentHandles<StudyIntent>,
    spelling: IntentHandles<SpellingIntent>,
    definition: IntentHandles<DefinitionIntent>,
    mount: IntentHandles<bool>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        self.wait(Duration::from_millis(50)).await;
    }

    /// Let spawned tasks run for up to `limit`, then flush renders.
    pub async fn wait(&mut self, limit: Duration) {
        let _ = tokio::time::timeout(limit, self.dom.wait_for_work()).await;
        drive_dom(&mut self.dom);
    }

    /// Keep driving timers until `needle` shows up in the render or `limit` passes.
    pub async fn wait_for_text(&mut self, needle: &str, limit: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + limit;
        loop {
            if self.render().contains(needle) {
                return true;
            }
            let now = tokio::time::Instant::now();
            if now >= deadline {
                return false;
            }
            self.wait((deadline - now).min(Duration::from_millis(100))).await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn game(&mut self, intent: GameIntent) {
        let dispatch = self.game.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    /// Mount or unmount the view under test.
    pub fn set_mounted(&mut self, on: bool) {
        let dispatch = self.mount.dispatch();
        self.dom.in_runtime(|| dispatch.call(on));
        drive_dom(&mut self.dom);
    }

    pub fn study(&mut self, intent: StudyIntent) {
        let dispatch = self.study.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub fn spelling(&mut self, intent: SpellingIntent) {
        let dispatch = self.spelling.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub fn definition(&mut self, intent: DefinitionIntent) {
        let dispatch = self.definition.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, fixture: Fixture) -> ViewHarness {
    let words = WordSet::from_pairs(fixture.words.iter().copied()).expect("fixture words");
    let seed = DecryptedSeed {
        difficulty: fixture.difficulty,
        words,
    };
    let seeds = Arc::new(FakeSeeds {
        seed: (!fixture.decrypt_fails).then(|| seed.clone()),
    });
    let grader = Arc::new(FakeGrader {
        verdicts: fixture.verdicts,
        requests: Mutex::new(Vec::new()),
    });
    let services = AppServices::new(Clock::fixed(fixed_now()), seeds, grader.clone())
        .with_study_modes(StudyModePicker::Fixed(fixture.study_mode));
    let speaker = Arc::new(RecordingSpeaker::default());

    let app = Arc::new(TestApp {
        services,
        seed: fixture.seed.map(str::to_string),
        speaker: Arc::clone(&speaker),
    });
    let context = HarnessContext {
        view,
        seed,
        log: HarnessLog::default(),
        game: IntentHandles::default(),
        study: IntentHandles::default(),
        spelling: IntentHandles::default(),
        definition: IntentHandles::default(),
        mount: IntentHandles::default(),
    };

    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app,
            context: context.clone(),
        },
    );

    ViewHarness {
        dom,
        speaker,
        grader,
        log: context.log,
        game: context.game,
        study: context.study,
        spelling: context.spelling,
        definition: context.definition,
        mount: context.mount,
    }
}
