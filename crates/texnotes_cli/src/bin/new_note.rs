//! `new-note`: create today's entry and register it in `master.tex`.

use chrono::NaiveDate;
use clap::Parser;
use log::info;
use std::io;
use std::path::{Path, PathBuf};
use texnotes_cli::{fail, parse_args, LogArgs};
use texnotes_core::model::entry::parse_stamp;
use texnotes_core::{create_entry, project_status, today, NotesError, ProjectLayout, ProjectStatus};

const PROGRAM: &str = "new-note";

/// Create a dated entry file and register it in the master document
#[derive(Parser, Debug)]
#[command(name = "new-note", version)]
struct Cli {
    /// Notes directory to work in
    #[arg(long, value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// Entry date instead of today
    #[arg(long, value_name = "YYYYMMDD", value_parser = parse_date, conflicts_with = "list")]
    date: Option<NaiveDate>,

    /// List registered and unregistered entries instead of creating one
    #[arg(long)]
    list: bool,

    /// Print the listing as JSON
    #[arg(long, requires = "list")]
    json: bool,

    #[command(flatten)]
    log: LogArgs,
}

fn main() {
    let cli: Cli = parse_args();
    if let Err(err) = cli.log.init(PROGRAM) {
        fail(PROGRAM, err);
    }

    let layout = ProjectLayout::default();
    if cli.list {
        match project_status(&cli.dir, &layout) {
            Ok(status) => print_status(&cli.dir, &status, cli.json),
            Err(err) => fail(PROGRAM, err),
        }
        return;
    }

    let date = cli.date.unwrap_or_else(today);
    match create_entry(&cli.dir, date, &layout, |step| println!("{step}")) {
        Ok(created) => info!(
            "event=cli_exit module=cli status=ok program={} entry_path={}",
            PROGRAM,
            created.entry_path.display()
        ),
        Err(err) => fail(PROGRAM, err),
    }
}

fn print_status(dir: &Path, status: &ProjectStatus, json: bool) {
    if json {
        match serde_json::to_string_pretty(status) {
            Ok(rendered) => println!("{rendered}"),
            Err(err) => fail(PROGRAM, NotesError::Io {
                path: dir.to_path_buf(),
                source: io::Error::other(err),
            }),
        }
        return;
    }

    for entry in &status.registered {
        let missing = if entry.exists { "" } else { " (missing)" };
        println!("{}\tline {}{missing}", entry.file_name, entry.line_number);
    }
    for file_name in &status.unregistered {
        println!("{file_name}\tunregistered");
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_stamp(raw).ok_or_else(|| format!("`{raw}` is not a YYYYMMDD date"))
}
