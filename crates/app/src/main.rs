mod logging;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    ApiConfig, AppServices, AuthService, CatalogService, Clock, InstructorService, PlayerService,
    QuizService,
};
use tracing::{debug, info};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDb { raw: String },
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(name) => write!(f, "unknown command: {name}"),
            ArgsError::InvalidDb { raw } => write!(f, "invalid database location: {raw}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api value: {raw}"),
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
}

impl UiApp for DesktopApp {
    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn player(&self) -> Arc<PlayerService> {
        self.services.player()
    }

    fn quizzes(&self) -> Arc<QuizService> {
        self.services.quizzes()
    }

    fn instructor(&self) -> Arc<InstructorService> {
        self.services.instructor()
    }
}

/// Where the local session database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Database {
    Memory,
    File(PathBuf),
}

impl Database {
    const DEFAULT_FILE: &'static str = "coursehub.sqlite3";

    /// Accepts a bare path, `sqlite:<path>`, `sqlite://<path>` or `sqlite::memory:`.
    fn from_arg(raw: &str) -> Result<Self, ArgsError> {
        let trimmed = raw.trim();
        if trimmed == "sqlite::memory:" {
            return Ok(Self::Memory);
        }
        let path = trimmed
            .strip_prefix("sqlite://")
            .or_else(|| trimmed.strip_prefix("sqlite:"))
            .unwrap_or(trimmed);
        let path = path.split('?').next().unwrap_or_default();
        if path.is_empty() {
            return Err(ArgsError::InvalidDb {
                raw: raw.to_string(),
            });
        }
        Ok(Self::File(PathBuf::from(path)))
    }

    fn from_env() -> Result<Self, ArgsError> {
        match std::env::var("COURSEHUB_DB_URL") {
            Ok(value) if !value.trim().is_empty() => Self::from_arg(&value),
            _ => Ok(Self::File(PathBuf::from(Self::DEFAULT_FILE))),
        }
    }

    /// `mode=rwc` has sqlx create the file on first launch.
    fn url(&self) -> String {
        match self {
            Self::Memory => "sqlite::memory:".to_string(),
            Self::File(path) => format!("sqlite://{}?mode=rwc", path.display()),
        }
    }

    fn create_parent_dir(&self) -> std::io::Result<()> {
        let Self::File(path) = self else {
            return Ok(());
        };
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Status,
    Logout,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "status" => Some(Self::Status),
            "logout" => Some(Self::Logout),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    command: Command,
    db: Database,
    api: ApiConfig,
}

impl Args {
    /// Parse everything after the program name. `Ok(None)` means help was asked for.
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut args = args.into_iter();
        let mut command = None;
        let mut db = Database::from_env()?;
        let mut api = ApiConfig::from_env();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => db = Database::from_arg(&require_value(&mut args, "--db")?)?,
                "--api" => {
                    let value = require_value(&mut args, "--api")?;
                    if !(value.starts_with("http://") || value.starts_with("https://")) {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    api = api.with_base_url(value);
                }
                "--help" | "-h" => return Ok(None),
                name if !name.starts_with('-') && command.is_none() => {
                    command = Some(
                        Command::from_arg(name)
                            .ok_or_else(|| ArgsError::UnknownCommand(name.to_string()))?,
                    );
                }
                _ => return Err(ArgsError::UnknownArg(arg.clone())),
            }
        }

        Ok(Some(Self {
            command: command.unwrap_or(Command::Ui),
            db,
            api,
        }))
    }
}

fn print_usage() {
    eprintln!("Usage: app [ui|status|logout] [--db <path>] [--api <url>]");
    eprintln!();
    eprintln!("With no command the desktop window opens.");
    eprintln!("  --db   {} (or sqlite::memory:)", Database::DEFAULT_FILE);
    eprintln!("  --api  {}", ApiConfig::default().base_url);
    eprintln!();
    eprintln!("Environment (also read from .env):");
    eprintln!("  COURSEHUB_DB_URL, COURSEHUB_API_URL, COURSEHUB_HTTP_TIMEOUT_SECS, COURSEHUB_LOG");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(std::env::args().skip(1)).inspect_err(|err| {
        eprintln!("{err}");
        print_usage();
    })?;
    let Some(Args { command, db, api }) = parsed else {
        print_usage();
        return Ok(());
    };
    debug!(?command, ?db, api = %api.base_url, "starting");

    db.create_parent_dir()?;
    let services = AppServices::new_sqlite(api, &db.url(), Clock::system()).await?;

    match command {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Coursehub")
                    .with_always_on_top(false),
            );

            info!("launching desktop window");
            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Status => {
            let auth = services.auth();
            match auth.current_user() {
                Some(user) => println!(
                    "signed in as {} ({}, {:?})",
                    user.display_name(),
                    user.username,
                    user.role
                ),
                None if auth.is_authenticated() => println!("signed in (profile not loaded yet)"),
                None => println!("not signed in"),
            }
            Ok(())
        }
        Command::Logout => {
            services.auth().logout().await?;
            println!("signed out");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    logging::init_tracing();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn database_accepts_paths_and_sqlite_urls() {
        assert_eq!(Database::from_arg("sqlite::memory:").unwrap(), Database::Memory);
        assert_eq!(
            Database::from_arg("sqlite:///tmp/course.db").unwrap(),
            Database::File(PathBuf::from("/tmp/course.db"))
        );
        assert_eq!(
            Database::from_arg("sqlite:data/course.db?mode=ro").unwrap(),
            Database::File(PathBuf::from("data/course.db"))
        );
        assert!(matches!(
            Database::from_arg("sqlite://"),
            Err(ArgsError::InvalidDb { .. })
        ));
        assert_eq!(
            Database::File(PathBuf::from("/tmp/course.db")).url(),
            "sqlite:///tmp/course.db?mode=rwc"
        );
    }

    #[test]
    fn parse_reads_command_and_flags_in_any_order() {
        let parsed = Args::parse(args(&[
            "--db",
            "sqlite::memory:",
            "status",
            "--api",
            "https://learn.example.com/api/",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(parsed.command, Command::Status);
        assert_eq!(parsed.db, Database::Memory);
        assert_eq!(parsed.api.base_url, "https://learn.example.com/api");
    }

    #[test]
    fn no_command_opens_the_window() {
        let parsed = Args::parse(args(&["--db", "sqlite::memory:"])).unwrap().unwrap();
        assert_eq!(parsed.command, Command::Ui);
        assert!(Args::parse(args(&["--help"])).unwrap().is_none());
    }

    #[test]
    fn parse_rejects_unknown_and_incomplete_input() {
        assert!(matches!(
            Args::parse(args(&["--course", "3"])),
            Err(ArgsError::UnknownArg(arg)) if arg == "--course"
        ));
        assert!(matches!(
            Args::parse(args(&["enroll"])),
            Err(ArgsError::UnknownCommand(name)) if name == "enroll"
        ));
        assert!(matches!(
            Args::parse(args(&["status", "logout"])),
            Err(ArgsError::UnknownArg(arg)) if arg == "logout"
        ));
        assert!(matches!(
            Args::parse(args(&["--api"])),
            Err(ArgsError::MissingValue { flag: "--api" })
        ));
        assert!(matches!(
            Args::parse(args(&["--api", "localhost:8000"])),
            Err(ArgsError::InvalidApiUrl { .. })
        ));
    }
}
