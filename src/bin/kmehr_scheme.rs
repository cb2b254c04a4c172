//! Inspect the compiled KMEHR `CD-ITEM` scheme catalog.
//!
//! `list` prints one `S<TAB>SV` line per scheme, `resolve` looks up a single
//! wire name, `export` prints the JSON snapshot, and `diff` compares a
//! snapshot file against this build.

use anyhow::{Result, bail};
use kmehr_schemes::{
    CatalogSnapshot, CdItemScheme, diff_against_catalog, load_snapshot, validate_snapshot,
};
use serde_json::json;
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    match parse_args()? {
        Command::List => {
            for scheme in CdItemScheme::all() {
                println!("{}\t{}", scheme.wire_name(), scheme.version());
            }
        }
        Command::Resolve(wire_name) => {
            let scheme = CdItemScheme::from_wire_name(&wire_name)?;
            let record = json!({"S": scheme.wire_name(), "SV": scheme.version()});
            println!("{}", serde_json::to_string(&record)?);
        }
        Command::Export => {
            let value = CatalogSnapshot::current().to_value()?;
            validate_snapshot(&value)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::Diff(path) => {
            let snapshot = load_snapshot(&path)?;
            let diff = diff_against_catalog(&snapshot);
            if !diff.is_empty() {
                print!("{diff}");
                bail!("{} differs from the compiled catalog", path.display());
            }
        }
        Command::Help => print_usage(),
    }
    Ok(())
}

enum Command {
    List,
    Resolve(String),
    Export,
    Diff(PathBuf),
    Help,
}

fn parse_args() -> Result<Command> {
    let mut args = env::args_os();
    let _program = args.next();

    let Some(subcommand) = args.next() else {
        bail!(usage());
    };

    let command = match subcommand.to_str() {
        Some("list") => Command::List,
        Some("export") => Command::Export,
        Some("resolve") => {
            let Some(wire_name) = args.next() else {
                bail!("resolve expects exactly one wire name");
            };
            let Some(wire_name) = wire_name.to_str() else {
                bail!("wire name must be valid Unicode");
            };
            Command::Resolve(wire_name.to_string())
        }
        Some("diff") => {
            let Some(path) = args.next() else {
                bail!("diff expects a snapshot path");
            };
            Command::Diff(PathBuf::from(path))
        }
        Some("--help") | Some("-h") => Command::Help,
        Some(other) => bail!("Unknown subcommand: {other}"),
        None => bail!("Subcommand must be valid Unicode"),
    };

    if args.next().is_some() {
        bail!("unexpected extra arguments\n{}", usage());
    }
    Ok(command)
}

fn usage() -> &'static str {
    "Usage: kmehr-scheme <list | resolve <S> | export | diff <snapshot.json>>"
}

fn print_usage() {
    println!("{}", usage());
}
