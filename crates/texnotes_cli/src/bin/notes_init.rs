//! `notes-init <project-name>`: create a LaTeX notes directory.

use clap::Parser;
use log::info;
use std::path::Path;
use texnotes_cli::{fail, parse_args, sibling_executable, LogArgs};
use texnotes_core::{init_project, NotesError, ProjectLayout};

const PROGRAM: &str = "notes-init";
const ENTRY_CREATOR_BIN: &str = "new-note";

/// Create a notes directory with a master document and an entry creator
#[derive(Parser, Debug)]
#[command(name = "notes-init", version)]
struct Cli {
    /// Name of the directory to create in the current location
    project_name: Option<String>,

    #[command(flatten)]
    log: LogArgs,
}

fn main() {
    let cli: Cli = parse_args();
    if let Err(err) = cli.log.init(PROGRAM) {
        fail(PROGRAM, err);
    }

    let Some(project_name) = cli.project_name else {
        fail(
            PROGRAM,
            NotesError::Usage("Please enter a name for the directory.".to_string()),
        );
    };
    let entry_creator = sibling_executable(ENTRY_CREATOR_BIN).unwrap_or_else(|err| fail(PROGRAM, err));

    let layout = ProjectLayout::default();
    match init_project(Path::new("."), &project_name, &entry_creator, &layout, |step| {
        println!("{step}")
    }) {
        Ok(project) => info!(
            "event=cli_exit module=cli status=ok program={} project_dir={}",
            PROGRAM,
            project.project_dir.display()
        ),
        Err(err) => fail(PROGRAM, err),
    }
}
