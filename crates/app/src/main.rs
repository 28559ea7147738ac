use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock, ServiceConfig, StudyModePicker};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, DesktopSpeaker, SpeakerRef, UiApp, build_app_context};
use vocab_core::model::GameSession;

const SEED_VAR: &str = "VOCAB_SEED";
const DEFAULT_LOG_FILTER: &str = "app=info,services=info,ui=info";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidMode { raw: String },
    MissingSeed,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidMode { raw } => {
                write!(f, "invalid --fixed-mode value: {raw} (sequential|simultaneous)")
            }
            ArgsError::MissingSeed => write!(f, "decrypt needs --seed or {SEED_VAR}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    seed: Option<String>,
    speaker: SpeakerRef,
}

impl UiApp for DesktopApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }

    fn seed(&self) -> Option<String> {
        self.seed.clone()
    }

    fn speaker(&self) -> SpeakerRef {
        Arc::clone(&self.speaker)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui      [--seed <seed>] [options]");
    eprintln!("  cargo run -p app -- decrypt  --seed <seed>  [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --api-base <url>       grading API base url");
    eprintln!("  --decrypt-url <url>    seed decrypt service base url");
    eprintln!("  --token-file <path>    file holding the student token");
    eprintln!("  --fixed-mode <mode>    sequential | simultaneous");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  VOCAB_SEED, VOCAB_API_BASE_URL, VOCAB_DECRYPT_URL,");
    eprintln!("  VOCAB_STUDENT_TOKEN, VOCAB_TOKEN_FILE, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Decrypt,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "decrypt" => Some(Self::Decrypt),
            _ => None,
        }
    }
}

struct Args {
    seed: Option<String>,
    config: ServiceConfig,
    study_modes: StudyModePicker,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut seed = std::env::var(SEED_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty());
        let mut config = ServiceConfig::from_env()?;
        let mut study_modes = StudyModePicker::Random;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => seed = Some(require_value(args, "--seed")?),
                "--api-base" => {
                    config = config.with_api_base_url(require_value(args, "--api-base")?)?;
                }
                "--decrypt-url" => {
                    config = config.with_decrypt_base_url(require_value(args, "--decrypt-url")?)?;
                }
                "--token-file" => {
                    config = config.with_token_file(require_value(args, "--token-file")?)?;
                }
                "--fixed-mode" => {
                    let value = require_value(args, "--fixed-mode")?;
                    study_modes = StudyModePicker::parse_fixed(&value)
                        .ok_or(ArgsError::InvalidMode { raw: value })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg).into()),
            }
        }

        Ok(Self {
            seed,
            config,
            study_modes,
        })
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn print_session(session: &GameSession) {
    println!(
        "{} words, {} per word",
        session.words().len(),
        session.difficulty()
    );
    for entry in session.words().iter() {
        println!("  {}: {}", entry.word(), entry.meaning());
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the window.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let services = AppServices::from_config(&parsed.config, Clock::system())
        .with_study_modes(parsed.study_modes);

    match cmd {
        Command::Ui => {
            info!(seed = parsed.seed.is_some(), "launching desktop window");
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                services,
                seed: parsed.seed,
                speaker: Arc::new(DesktopSpeaker),
            });
            let context = build_app_context(&app);

            // Some dev setups open the window always-on-top; keep it a normal window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Vocab")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Decrypt => {
            let seed = parsed.seed.ok_or(ArgsError::MissingSeed)?;
            let session = services.load_session(&seed).await?;
            print_session(&session);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
