use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use drill_core::model::AudioRoot;
use services::{AppServices, Clock};
use storage::LessonLocation;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_LESSONS: &str = "data/lessons.json";
const DEFAULT_AUDIO_ROOT: &str = "audio";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingMarkdown,
    UnknownArg(String),
    InvalidAudioRoot { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingMarkdown => write!(f, "import requires a markdown file"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidAudioRoot { raw } => write!(f, "invalid --audio-root value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next()
        .filter(|value| !value.trim().is_empty())
        .ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: Arc<AppServices>,
}

impl UiApp for DesktopApp {
    fn services(&self) -> Arc<AppServices> {
        Arc::clone(&self.services)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui     [--lessons <path-or-url>] [--audio-root <dir-or-url>]");
    eprintln!("  cargo run -p app -- import <markdown> [--out <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --lessons {DEFAULT_LESSONS}");
    eprintln!("  --audio-root {DEFAULT_AUDIO_ROOT}");
    eprintln!("  --out {DEFAULT_LESSONS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DRILL_LESSONS, DRILL_AUDIO_ROOT, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Import,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "import" => Some(Self::Import),
            _ => None,
        }
    }
}

struct UiArgs {
    lessons: LessonLocation,
    audio_root: AudioRoot,
}

impl UiArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut lessons =
            std::env::var("DRILL_LESSONS").unwrap_or_else(|_| DEFAULT_LESSONS.to_string());
        let mut audio_root =
            std::env::var("DRILL_AUDIO_ROOT").unwrap_or_else(|_| DEFAULT_AUDIO_ROOT.to_string());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--lessons" => lessons = require_value(args, "--lessons")?,
                "--audio-root" => audio_root = require_value(args, "--audio-root")?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let audio_root = AudioRoot::parse(&audio_root)
            .map_err(|_| ArgsError::InvalidAudioRoot { raw: audio_root })?;
        Ok(Self {
            lessons: LessonLocation::parse(&lessons),
            audio_root,
        })
    }
}

struct ImportArgs {
    markdown: PathBuf,
    out: PathBuf,
}

impl ImportArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut markdown = None;
        let mut out = PathBuf::from(DEFAULT_LESSONS);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out" => out = PathBuf::from(require_value(args, "--out")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                flag if flag.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ if markdown.is_none() => markdown = Some(PathBuf::from(arg)),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            markdown: markdown.ok_or(ArgsError::MissingMarkdown)?,
            out,
        })
    }
}

fn launch_ui(args: UiArgs) {
    info!(lessons = %args.lessons, "starting study app");
    let services = AppServices::from_location(&args.lessons, args.audio_root, Clock::default());
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services: Arc::new(services),
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Chinese Driving Drill")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
}

fn run_import(args: &ImportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    let services = AppServices::from_location(
        &LessonLocation::File(args.out.clone()),
        AudioRoot::parse(DEFAULT_AUDIO_ROOT)?,
        Clock::default(),
    );
    let report = runtime.block_on(services.import().import_file(&args.markdown, &args.out))?;
    if !report.skipped.is_empty() {
        warn!(skipped = report.skipped.len(), "some lesson blocks were skipped");
    }
    println!(
        "wrote {} lessons ({} with French) to {}",
        report.document.total_lessons,
        report.document.lessons_with_french.unwrap_or(0),
        args.out.display()
    );
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
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
    let report_args_error = |e: ArgsError| {
        eprintln!("{e}");
        print_usage();
        e
    };
    match cmd {
        Command::Ui => {
            let args = UiArgs::parse(&mut iter).map_err(report_args_error)?;
            launch_ui(args);
            Ok(())
        }
        Command::Import => {
            let args = ImportArgs::parse(&mut iter).map_err(report_args_error)?;
            run_import(&args)
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> std::vec::IntoIter<String> {
        raw.iter().map(|s| (*s).to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn import_defaults_output_path() {
        let parsed = ImportArgs::parse(&mut args(&["lessons.md"])).unwrap();
        assert_eq!(parsed.markdown, PathBuf::from("lessons.md"));
        assert_eq!(parsed.out, PathBuf::from(DEFAULT_LESSONS));
    }

    #[test]
    fn import_accepts_out_flag() {
        let parsed =
            ImportArgs::parse(&mut args(&["--out", "build/lessons.json", "lessons.md"])).unwrap();
        assert_eq!(parsed.out, PathBuf::from("build/lessons.json"));
    }

    #[test]
    fn import_without_markdown_is_rejected() {
        assert!(matches!(
            ImportArgs::parse(&mut args(&["--out", "x.json"])),
            Err(ArgsError::MissingMarkdown)
        ));
        assert!(matches!(
            ImportArgs::parse(&mut args(&["a.md", "--out"])),
            Err(ArgsError::MissingValue { flag: "--out" })
        ));
    }

    #[test]
    fn subcommands_are_recognised() {
        assert_eq!(Command::from_arg("ui"), Some(Command::Ui));
        assert_eq!(Command::from_arg("import"), Some(Command::Import));
        assert_eq!(Command::from_arg("serve"), None);
    }
}
