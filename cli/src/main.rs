//! Equiviz CLI - terminal client for chemical equipment datasets.
//!
//! # Usage
//!
//! ```bash
//! equiviz login alice             # password read from stdin
//! equiviz list
//! equiviz upload plant.csv
//! equiviz show 7
//! equiviz report 7 --output ~/reports
//! equiviz logout
//! ```

mod config;
mod error;
mod keychain;
mod render;
mod report;

use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use equiviz_core::{
    AuthMode, Controller, Credentials, HttpBackend, SharedState, StateHandle, TokenStore,
    UploadFile,
};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::keychain::KeyringTokens;
use crate::report::FileReportSink;

type CliController = Controller<HttpBackend, KeyringTokens, SharedState>;

/// Upload equipment CSVs and inspect their statistics from the terminal.
#[derive(Parser)]
#[command(name = "equiviz", version, about)]
struct Cli {
    /// Backend API base URL (overrides the config file)
    #[arg(long, global = true, env = "EQUIVIZ_API_URL")]
    api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token in the OS keychain
    Login {
        username: String,
        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account and log in with it
    Register {
        username: String,
        #[arg(short, long)]
        password: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show which API is configured and whether a session is stored
    Status,
    /// List the most recent datasets
    List,
    /// Upload a CSV file and show the resulting dataset
    Upload { file: PathBuf },
    /// Show statistics, charts and records for a dataset
    Show { id: i64 },
    /// Download the PDF report for a dataset
    Report {
        id: i64,
        /// Directory the report is written to
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let file_config = match config::config_path() {
        Some(path) => config::load_file(&path)?,
        None => config::FileConfig::default(),
    };
    // clap already folded the environment variable into `api_url`.
    let api = config::resolve(&file_config, None, cli.api_url.as_deref())?;

    let tokens = KeyringTokens::new(api.base_url());
    let controller: CliController = Controller::new(
        HttpBackend::new(api.clone()),
        tokens.clone(),
        SharedState::default(),
    );

    match cli.command {
        Commands::Login { username, password } => {
            let password = password_or_stdin(password)?;
            let credentials = Credentials::new(username.clone(), password);
            authenticate(&controller, AuthMode::Login, credentials).await?;
            println!("Logged in as {}", username);
        }
        Commands::Register {
            username,
            password,
            email,
        } => {
            let password = password_or_stdin(password)?;
            let mut credentials = Credentials::new(username.clone(), password);
            if let Some(email) = email {
                credentials = credentials.with_email(email);
            }
            authenticate(&controller, AuthMode::Register, credentials).await?;
            println!("Registered and logged in as {}", username);
        }
        Commands::Logout => {
            controller.logout();
            println!("Logged out");
        }
        Commands::Status => {
            println!("API: {}", api.base_url());
            let stored = tokens.load().map_err(|e| CliError::Keychain(e.to_string()))?;
            match stored {
                Some(token) if !token.is_empty() => println!("Session: stored"),
                _ => println!("Session: none (run `equiviz login`)"),
            }
        }
        Commands::List => {
            if !controller.restore_session().await {
                bail!(equiviz_core::controller::NOT_LOGGED_IN);
            }
            check(&controller)?;
            println!("{}", render::dataset_list(&controller.snapshot().datasets));
        }
        Commands::Upload { file } => {
            let upload = read_upload(&file)?;
            attach_session(&controller, &tokens);
            if controller.upload_dataset(Some(upload)).await.is_err() {
                check(&controller)?;
            }
            if let Some(detail) = controller.snapshot().selected {
                println!("{}", render::dataset_detail(&detail));
            }
        }
        Commands::Show { id } => {
            attach_session(&controller, &tokens);
            if controller.select_dataset(id).await.is_err() {
                check(&controller)?;
            }
            if let Some(detail) = controller.snapshot().selected {
                println!("{}", render::dataset_detail(&detail));
            }
        }
        Commands::Report { id, output } => {
            attach_session(&controller, &tokens);
            let sink = FileReportSink::new(output);
            if controller.download_report(id, &sink).await.is_err() {
                check(&controller)?;
            }
            let filename = equiviz_core::types::report_filename(id);
            println!("Saved {}", sink.path_for(&filename).display());
        }
    }

    Ok(())
}

async fn authenticate(
    controller: &CliController,
    mode: AuthMode,
    credentials: Credentials,
) -> Result<()> {
    if controller.authenticate(mode, credentials).await.is_err() {
        check(controller)?;
    }
    Ok(())
}

/// Load the stored token into the view state without listing datasets.
fn attach_session(controller: &CliController, tokens: &KeyringTokens) {
    let token = match tokens.load() {
        Ok(Some(token)) if !token.is_empty() => token,
        _ => return,
    };
    controller.state().update(|s| {
        s.token = Some(token);
        s.authenticated = true;
    });
}

/// Turn the controller's error field into a process failure.
fn check(controller: &CliController) -> Result<()> {
    match controller.snapshot().error {
        Some(message) => bail!(message),
        None => Ok(()),
    }
}

fn password_or_stdin(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn read_upload(path: &Path) -> Result<UploadFile> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::Validation(format!("Not a file: {}", path.display())))?;
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let upload = UploadFile::new(name, bytes);
    if !upload.is_csv() {
        return Err(CliError::Validation("Only .csv files can be uploaded".to_string()).into());
    }
    Ok(upload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cli_parses_report_output() {
        let cli = Cli::try_parse_from(["equiviz", "report", "7", "--output", "/tmp/out"]).unwrap();
        match cli.command {
            Commands::Report { id, output } => {
                assert_eq!(id, 7);
                assert_eq!(output, PathBuf::from("/tmp/out"));
            }
            _ => panic!("expected report"),
        }
    }

    #[test]
    fn test_read_upload_rejects_non_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let err = read_upload(&path).unwrap_err();
        assert_eq!(err.to_string(), "Only .csv files can be uploaded");
    }

    #[test]
    fn test_read_upload_keeps_file_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plant.csv");
        std::fs::write(&path, "Equipment Name,Type\n").unwrap();

        let upload = read_upload(&path).unwrap();
        assert_eq!(upload.name, "plant.csv");
        assert_eq!(upload.bytes, b"Equipment Name,Type\n");
    }
}
