extern crate clap;
extern crate rpassword;
extern crate treecrypt;

pub mod cli;
pub mod error;
pub mod utils;

use treecrypt::{Action, SevenZip, TreeWalker};

use crate::error::{Error, Result};

/// Everything the walk needs, pulled out of the parsed command line.
#[derive(Debug)]
pub struct Options {
    pub action: Action,
    pub root: std::path::PathBuf,
    pub program: String,
    pub force: bool,
    pub dry_run: bool,
}

impl Options {
    pub fn from_matches(matches: &clap::ArgMatches) -> Result<Options> {
        let action = matches
            .value_of("action")
            .ok_or_else(|| Error::CliInputError("action is required".to_string()))?
            .parse::<Action>()?;
        let program = matches
            .value_of("7z")
            .unwrap_or(treecrypt::archiver::DEFAULT_PROGRAM)
            .to_string();
        Ok(Options {
            action,
            root: utils::resolve_root(matches.value_of("path"))?,
            program,
            force: matches.is_present("force"),
            dry_run: matches.is_present("dry-run"),
        })
    }
}

pub fn run(options: &Options, password: &str) -> Result<()> {
    let archiver = SevenZip::new(&options.program)
        .overwrite(options.force)
        .dry_run(options.dry_run);
    let walker = TreeWalker::new(archiver)
        .force(options.force)
        .dry_run(options.dry_run);

    let empty = walker.process(options.action, &options.root, password)?;
    tracing::debug!("{} finished, root empty: {}", options.action, empty);
    Ok(())
}
