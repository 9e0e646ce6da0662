//! Calendar source backed by `gcalcli`
//!
//! Any failure is logged and reported as an empty agenda, so a broken
//! calendar only hides events and never stops the display.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use chrono::{Days, NaiveDate};
use log::{debug, warn};
use thiserror::Error;
use tokio::process::Command;

const GCALCLI_CONFIG_ENV: &str = "GCALCLI_CONFIG";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("failed to run calendar command: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("calendar command timed out after {0:?}")]
    Timeout(Duration),
    #[error("calendar command exited with {status}: {stderr}")]
    Exit { status: std::process::ExitStatus, stderr: String },
    #[error("calendar output is not UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSettings {
    pub command: String,
    pub args: Vec<String>,
    pub config_path: Option<PathBuf>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct CalendarSource {
    settings: CalendarSettings,
}

impl CalendarSource {
    pub fn new(settings: CalendarSettings) -> Self {
        Self { settings }
    }

    /// Agenda arguments for `day`, covering `day` up to the next midnight
    pub fn agenda_args(&self, day: NaiveDate) -> Vec<String> {
        let next = day.checked_add_days(Days::new(1)).unwrap_or(day);
        let mut args = self.settings.args.clone();
        args.extend([
            "agenda".to_string(),
            "--tsv".to_string(),
            "--military".to_string(),
            day.format(DATE_FORMAT).to_string(),
            next.format(DATE_FORMAT).to_string(),
        ]);
        args
    }

    /// Fetch the raw TSV agenda of `day`, or an empty string on any failure
    pub async fn fetch_agenda(&self, day: NaiveDate) -> String {
        match self.run(day).await {
            Ok(agenda) => {
                debug!("calendar agenda for {day}:\n{agenda}");
                agenda
            }
            Err(e) => {
                warn!("Error fetching calendar events: {e}");
                String::new()
            }
        }
    }

    async fn run(&self, day: NaiveDate) -> Result<String, CalendarError> {
        let mut command = Command::new(&self.settings.command);
        command
            .args(self.agenda_args(day))
            .stdin(Stdio::null())
            .kill_on_drop(true);
        if let Some(path) = self.settings.config_path.as_ref() {
            command.env(GCALCLI_CONFIG_ENV, path);
        }

        let output = tokio::time::timeout(self.settings.timeout, command.output())
            .await
            .map_err(|_| CalendarError::Timeout(self.settings.timeout))??;

        if !output.status.success() {
            return Err(CalendarError::Exit {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8(output.stdout)?)
    }
}
