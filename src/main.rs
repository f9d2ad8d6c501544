//! Rusky CLI - A technical debt tracker for your codebase.

use clap::Parser;
use rusky::cli::{Cli, Commands, ConfigCommands};
use rusky::commands::{self, Manager, Output, ScanMode};
use rusky::config::{ConfigOverrides, OutputFormat, ResolvedConfig, resolve_config, system_config_dir};
use rusky::models::ScanResult;
use rusky::storage::{JsonFileBackend, find_git_root, resolve_data_file};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "RUSKY_LOG";

/// Log file written while a full-screen view owns the terminal.
const LOG_FILE: &str = "rusky.log";

fn main() {
    let cli = Cli::parse();

    // Determine repo path: --repo flag > RUSKY_REPO env > auto-detect git root > cwd
    let explicit_repo = cli.repo_path.is_some();
    let repo_path = resolve_repo_path(cli.repo_path.clone(), cli.json);

    let mut overrides = ConfigOverrides::new();
    if cli.json {
        overrides = overrides.with_output_format(OutputFormat::Json);
    }
    if let Some(path) = cli.data_file.clone() {
        overrides = overrides.with_data_file(path);
    }

    let config = match resolve_config(&repo_path, &overrides) {
        Ok(config) => config,
        Err(e) => exit_with_error(&e, cli.json),
    };
    let human = config.output_format() == OutputFormat::Human;

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(uses_full_screen(&cli.command, human));

    if let Err(e) = run_command(cli.command, &repo_path, explicit_repo, &config, human) {
        exit_with_error(&e, !human);
    }
}

/// Report an error on stderr and exit with status 1.
fn exit_with_error(e: &rusky::Error, json: bool) -> ! {
    if json {
        eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
    } else {
        eprintln!("Error: {}", e);
    }
    process::exit(1);
}

/// Resolve the repository path based on explicit flag, environment variable, or auto-detection.
///
/// Priority: --repo flag > RUSKY_REPO env var > git root detection > current working directory
///
/// An explicit path is used literally, without git root detection.
fn resolve_repo_path(explicit_path: Option<PathBuf>, json: bool) -> PathBuf {
    match explicit_path {
        Some(path) => {
            if !path.exists() {
                let message = format!("Specified repo path does not exist: {}", path.display());
                exit_with_error(&rusky::Error::InvalidInput(message), json);
            }
            path
        }
        None => {
            let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            find_git_root(&cwd).unwrap_or(cwd)
        }
    }
}

/// True when the command takes over the terminal with a full-screen view.
fn uses_full_screen(command: &Option<Commands>, human: bool) -> bool {
    match command {
        None => true,
        Some(Commands::Scan {
            dry_run, add_all, ..
        }) => human && !dry_run && !add_all,
        Some(_) => false,
    }
}

/// Initialize tracing. Full-screen views log to a file in the config
/// directory; everything else logs to stderr.
fn init_logging(full_screen: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    if !full_screen {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .without_time()
            .with_target(false)
            .init();
        return None;
    }

    let log_dir = system_config_dir().filter(|dir| fs::create_dir_all(dir).is_ok());
    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            // Nowhere to write a log file; never draw over the screen
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init();
            None
        }
    }
}

fn run_command(
    command: Option<Commands>,
    repo_path: &Path,
    explicit_repo: bool,
    config: &ResolvedConfig,
    human: bool,
) -> Result<(), rusky::Error> {
    let data_file = resolve_data_file(repo_path, config.data_file());
    let mut manager = Manager::new(JsonFileBackend::new(data_file));

    match command {
        None => browse(&mut manager)?,

        Some(Commands::Add { description }) => {
            let result = commands::add(&mut manager, &description.join(" "))?;
            output(&result, human);
        }

        Some(Commands::Complete { identifier }) => {
            let result = commands::complete(&mut manager, &identifier)?;
            output(&result, human);
        }

        Some(Commands::Reopen { identifier }) => {
            let result = commands::reopen(&mut manager, &identifier)?;
            output(&result, human);
        }

        Some(Commands::List { status }) => {
            let result = commands::list(&manager, status)?;
            output(&result, human);
        }

        Some(Commands::Scan {
            path,
            dry_run,
            add_all,
        }) => {
            let mode = if dry_run {
                ScanMode::DryRun
            } else if add_all {
                ScanMode::AddAll
            } else {
                ScanMode::Review
            };

            let root = scan_root(&path, explicit_repo.then_some(repo_path));
            let report = commands::scan(&mut manager, &root, mode, config.preview_limit())?;
            output(&report, human);

            // JSON output reports the findings instead of prompting
            if mode == ScanMode::Review && human && report.total > 0 {
                review_findings(&mut manager, report.findings)?;
            }
        }

        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => {
                let result = commands::config_show(repo_path, config);
                output(&result, human);
            }
            ConfigCommands::Set { key, value, system } => {
                let result = commands::config_set(repo_path, &key, &value, system)?;
                output(&result, human);
            }
        },
    }

    Ok(())
}

/// Relative scan paths follow an explicit repo path, as if rusky had been
/// started there.
fn scan_root(path: &Path, repo_path: Option<&Path>) -> PathBuf {
    match repo_path {
        Some(repo) if path.is_relative() => repo.join(path),
        _ => path.to_path_buf(),
    }
}

#[cfg(feature = "tui")]
fn browse(manager: &mut Manager<JsonFileBackend>) -> Result<(), rusky::Error> {
    rusky::tui::run_browser(manager)
}

#[cfg(not(feature = "tui"))]
fn browse(_manager: &mut Manager<JsonFileBackend>) -> Result<(), rusky::Error> {
    Err(rusky::Error::Other(
        "interactive browser requires the 'tui' feature; use 'rusky list'".to_string(),
    ))
}

#[cfg(feature = "tui")]
fn review_findings(
    manager: &mut Manager<JsonFileBackend>,
    findings: Vec<ScanResult>,
) -> Result<(), rusky::Error> {
    use rusky::tui::SelectorOutcome;

    match rusky::tui::run_selector(manager, findings)? {
        SelectorOutcome::Added(count) => {
            println!("Added {} items to {}", count, manager.location())
        }
        SelectorOutcome::Cancelled => println!("Cancelled"),
    }
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn review_findings(
    _manager: &mut Manager<JsonFileBackend>,
    _findings: Vec<ScanResult>,
) -> Result<(), rusky::Error> {
    Err(rusky::Error::Other(
        "interactive review requires the 'tui' feature; use --dry-run or --add-all".to_string(),
    ))
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
