//! Command output for the tabboard CLI.
//!
//! Every command builds a [`Report`] and prints it in one of three modes:
//! a sectioned human summary, a `tabboard.v1` JSON envelope on stdout, or
//! nothing at all.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

pub const SCHEMA_VERSION: &str = "tabboard.v1";

/// How a command result reaches stdout. `--json` wins over `--quiet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Quiet,
}

impl OutputMode {
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        match (json, quiet) {
            (true, _) => Self::Json,
            (false, true) => Self::Quiet,
            (false, false) => Self::Human,
        }
    }
}

/// Result of one command: the envelope command name, a headline and
/// optional bulleted sections.
#[derive(Debug, Clone)]
pub struct Report {
    command: String,
    headline: String,
    summary: Vec<String>,
    details: Vec<String>,
    warnings: Vec<String>,
    next_steps: Vec<String>,
}

impl Report {
    pub fn new(command: impl Into<String>, headline: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            headline: headline.into(),
            summary: Vec::new(),
            details: Vec::new(),
            warnings: Vec::new(),
            next_steps: Vec::new(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// A `key: value` line, or just `key` when the value is empty.
    pub fn push_summary(&mut self, key: &str, value: impl AsRef<str>) {
        let value = value.as_ref();
        self.summary.push(if value.is_empty() {
            key.to_string()
        } else {
            format!("{key}: {value}")
        });
    }

    pub fn push_detail(&mut self, line: impl Into<String>) {
        self.details.push(line.into());
    }

    pub fn push_warning(&mut self, line: impl Into<String>) {
        self.warnings.push(line.into());
    }

    pub fn push_next_step(&mut self, line: impl Into<String>) {
        self.next_steps.push(line.into());
    }

    /// Print the report. `data` becomes the envelope payload in JSON mode.
    pub fn emit<T: Serialize>(&self, mode: OutputMode, data: &T) -> Result<()> {
        match mode {
            OutputMode::Quiet => {}
            OutputMode::Human => println!("{self}"),
            OutputMode::Json => {
                let envelope = Envelope {
                    schema_version: SCHEMA_VERSION,
                    command: &self.command,
                    body: Body::Success { data },
                    warnings: &self.warnings,
                    next_steps: &self.next_steps,
                };
                println!("{}", serde_json::to_string_pretty(&envelope)?);
            }
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tabboard {}: {}", self.command, self.headline)?;
        let sections = [
            ("Summary", &self.summary),
            ("Details", &self.details),
            ("Warnings", &self.warnings),
            ("Next steps", &self.next_steps),
        ];
        for (title, lines) in sections {
            if lines.is_empty() {
                continue;
            }
            write!(f, "\n\n{title}:")?;
            for line in lines {
                write!(f, "\n- {line}")?;
            }
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    schema_version: &'static str,
    command: &'a str,
    #[serde(flatten)]
    body: Body<'a, T>,
    #[serde(skip_serializing_if = "is_empty")]
    warnings: &'a [String],
    #[serde(skip_serializing_if = "is_empty")]
    next_steps: &'a [String],
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Body<'a, T> {
    Success { data: &'a T },
    Error { error: ErrorBody },
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    code: i32,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

fn is_empty(lines: &&[String]) -> bool {
    lines.is_empty()
}

/// Report a failed command: an error envelope on stdout in JSON mode,
/// otherwise `error:` and an optional `hint:` line on stderr.
pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    let hint = error_hint(err);
    if !json {
        eprintln!("error: {err}");
        if let Some(hint) = hint {
            eprintln!("hint: {hint}");
        }
        return Ok(());
    }

    let next_steps: Vec<String> = hint.into_iter().collect();
    let envelope: Envelope<'_, ()> = Envelope {
        schema_version: SCHEMA_VERSION,
        command,
        body: Body::Error {
            error: ErrorBody {
                message: err.to_string(),
                code: err.exit_code(),
                kind: if err.exit_code() == 2 {
                    "user_error"
                } else {
                    "operation_failed"
                },
                details: err.details(),
            },
        },
        warnings: &[],
        next_steps: &next_steps,
    };
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn error_hint(err: &Error) -> Option<String> {
    match err {
        Error::InvalidConfig(_) => Some("fix tabboard.toml then retry".to_string()),
        Error::ConfigNotFound(_) => Some("check --config / TABBOARD_CONFIG".to_string()),
        Error::ProfileNotFound(username) => Some(format!("check the spelling of '{username}'")),
        Error::ProfileLookup(_) | Error::Http(_) => {
            Some("check network access and profile.api_base".to_string())
        }
        _ => None,
    }
}

pub fn command_name_from_args() -> String {
    command_name(std::env::args().skip(1))
}

/// Envelope command name for an argv tail: `todo <sub>`, `profile` or `ui`.
pub fn command_name<I>(args: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut positional = Vec::with_capacity(2);
    let mut args = args.into_iter();
    while positional.len() < 2 {
        let Some(arg) = args.next() else { break };
        if matches!(arg.as_str(), "--data-dir" | "--config") {
            args.next();
        } else if !arg.starts_with('-') {
            positional.push(arg);
        }
    }

    match positional.as_slice() {
        [] => "ui".to_string(),
        [group, sub] if group == "todo" => format!("todo {sub}"),
        [command, ..] => command.clone(),
    }
}
