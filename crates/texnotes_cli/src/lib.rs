//! Shared plumbing for the `notes-init` and `new-note` executables.
//!
//! # Responsibility
//! - Parse arguments with clap while keeping the documented exit codes.
//! - Wire the opt-in file logger from command-line flags.
//! - Turn `NotesError` into a stderr message and a process exit status.

use clap::{Args, Parser};
use log::error;
use std::io;
use std::path::PathBuf;
use std::process;
use texnotes_core::{default_log_level, init_logging, NotesError};

/// Exit status for malformed invocations.
pub const USAGE_EXIT_CODE: i32 = 1;

/// Logging flags accepted by both executables.
#[derive(Args, Debug, Clone, Default)]
pub struct LogArgs {
    /// Log level: trace, debug, info, warn or error
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logging stays off without it
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl LogArgs {
    /// Starts file logging when `--log-dir` was given.
    pub fn init(&self, program: &str) -> Result<(), NotesError> {
        let Some(log_dir) = &self.log_dir else {
            return Ok(());
        };
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| NotesError::Usage("--log-dir must be valid UTF-8".to_string()))?;
        let level = self.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(program, level, log_dir).map_err(NotesError::Usage)
    }
}

/// Parses `T` from the process arguments.
///
/// Help and version requests exit 0; every other parse failure exits with
/// `USAGE_EXIT_CODE` instead of clap's default.
pub fn parse_args<T: Parser>() -> T {
    T::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { USAGE_EXIT_CODE } else { 0 };
        let _ = err.print();
        process::exit(code)
    })
}

/// Reports `err` on stderr and exits with its status.
pub fn fail(program: &str, err: NotesError) -> ! {
    error!(
        "event=cli_exit module=cli status=error program={} error_code={} exit_code={}",
        program,
        err.code(),
        err.exit_code()
    );
    eprintln!("{err}");
    process::exit(err.exit_code())
}

/// Path of executable `name` installed next to the running one.
pub fn sibling_executable(name: &str) -> Result<PathBuf, NotesError> {
    let file_name = format!("{name}{}", std::env::consts::EXE_SUFFIX);
    let current = std::env::current_exe().map_err(|source| NotesError::EntryCreatorUnavailable {
        path: PathBuf::from(&file_name),
        source,
    })?;
    current
        .parent()
        .map(|dir| dir.join(&file_name))
        .ok_or_else(|| NotesError::EntryCreatorUnavailable {
            path: PathBuf::from(&file_name),
            source: io::Error::new(io::ErrorKind::NotFound, "executable has no parent directory"),
        })
}

#[cfg(test)]
mod tests {
    use super::LogArgs;

    #[test]
    fn logging_stays_off_without_log_dir() {
        let args = LogArgs {
            log_level: Some("not-a-level".to_string()),
            log_dir: None,
        };
        assert!(args.init("new-note").is_ok());
    }

    #[test]
    fn relative_log_dir_is_a_usage_error() {
        let args = LogArgs {
            log_level: None,
            log_dir: Some("logs".into()),
        };
        let err = args.init("new-note").unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
