use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use draw_core::model::{SpinSettings, Student, Term};
use services::{AppServices, SpinController};
use storage::JsonRosterRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidDataDir { raw: String },
    InvalidSpinMs { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidDataDir { raw } => write!(f, "invalid --data-dir value: {raw:?}"),
            ArgsError::InvalidSpinMs { raw } => write!(f, "invalid --spin-ms value: {raw}"),
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
    controller: Arc<SpinController>,
}

impl UiApp for DesktopApp {
    fn spin_controller(&self) -> Arc<SpinController> {
        Arc::clone(&self.controller)
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    data_dir: PathBuf,
    spin_ms: u64,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- ui   [--db <sqlite_url>] [--data-dir <path>] [--spin-ms <ms>]"
    );
    eprintln!("  cargo run -p app -- seed [--data-dir <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://draw.sqlite3");
    eprintln!("  --data-dir data");
    eprintln!("  --spin-ms {}", SpinSettings::DEFAULT_SPIN_MS);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DRAW_DB_URL, DRAW_DATA_DIR, DRAW_SPIN_MS, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

fn parse_spin_ms(raw: String) -> Result<u64, ArgsError> {
    let ms: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ArgsError::InvalidSpinMs { raw: raw.clone() })?;
    if ms == 0 || ms > SpinSettings::MAX_SPIN_MS {
        return Err(ArgsError::InvalidSpinMs { raw });
    }
    Ok(ms)
}

impl Args {
    fn from_env() -> Result<Self, ArgsError> {
        let db_url = std::env::var("DRAW_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://draw.sqlite3".into(), normalize_sqlite_url);
        let data_dir = std::env::var("DRAW_DATA_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from("data"), PathBuf::from);
        let spin_ms = match std::env::var("DRAW_SPIN_MS") {
            Ok(value) => parse_spin_ms(value)?,
            Err(_) => SpinSettings::DEFAULT_SPIN_MS,
        };
        Ok(Self {
            db_url,
            data_dir,
            spin_ms,
        })
    }

    fn parse(cmd: Command, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::from_env()?;

        while let Some(arg) = args.next() {
            match (cmd, arg.as_str()) {
                (Command::Ui, "--db") => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = normalize_sqlite_url(value);
                }
                (Command::Ui, "--spin-ms") => {
                    parsed.spin_ms = parse_spin_ms(require_value(args, "--spin-ms")?)?;
                }
                (_, "--data-dir") => {
                    let value = require_value(args, "--data-dir")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDataDir { raw: value });
                    }
                    parsed.data_dir = PathBuf::from(value);
                }
                (_, "--help" | "-h") => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn sample_terms() -> Vec<Term> {
    vec![
        Term::new(
            "Métaphore",
            "Figure de style qui désigne une chose par une autre qui lui ressemble.",
        ),
        Term::new(
            "Allitération",
            "Répétition d'un même son consonantique dans une suite de mots.",
        ),
        Term::new("Oxymore", "Alliance de deux mots de sens contraires."),
        Term::new("Hyperbole", "Exagération de l'expression pour frapper l'esprit."),
        Term::new("Anaphore", "Répétition d'un mot en tête de plusieurs vers ou phrases."),
        Term::new("Litote", "Dire moins pour faire entendre davantage."),
    ]
}

fn sample_students() -> Vec<Student> {
    ["Alice", "Bruno", "Chloé", "David", "Emma", "Farid", "Gabrielle", "Hugo"]
        .iter()
        .enumerate()
        .map(|(index, name)| Student::new((index + 1).to_string(), *name))
        .collect()
}

async fn seed(data_dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let repo = JsonRosterRepository::new(data_dir);
    let wrote_terms = repo.write_terms_if_absent(&sample_terms()).await?;
    let wrote_students = repo.write_students_if_absent(&sample_students()).await?;
    if !wrote_terms && !wrote_students {
        tracing::info!(
            data_dir = %repo.data_dir().display(),
            "roster files already present, nothing to seed"
        );
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
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
    let parsed = Args::parse(cmd, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    match cmd {
        Command::Ui => {
            prepare_sqlite_file(&parsed.db_url)?;
            let settings = SpinSettings::with_spin_ms(parsed.spin_ms)?;
            tracing::info!(
                db = %parsed.db_url,
                data_dir = %parsed.data_dir.display(),
                spin_ms = parsed.spin_ms,
                "starting draw window"
            );
            let services =
                AppServices::new_sqlite(&parsed.db_url, &parsed.data_dir, settings).await?;
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                controller: services.controller(),
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Double Tirage au Sort")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            services.controller().shutdown();
            Ok(())
        }
        Command::Seed => seed(parsed.data_dir).await,
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        tracing::error!(error = %err, "draw app failed");
        std::process::exit(2);
    }
}
