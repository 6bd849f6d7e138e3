//! The archiving engine behind the tree walk.
//!
//! [`Archiver`] is the seam between the traversal and the program that actually
//! compresses and encrypts. [`SevenZip`] drives the `7z` executable with a
//! structured argument vector; no shell is ever involved, so file names with
//! spaces, quotes or other metacharacters reach `7z` untouched.

use crate::error::{Error, Result};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Extension of every archive the tool creates or looks for.
pub const ARCHIVE_EXTENSION: &str = "7z";

/// Default name of the 7-Zip executable.
pub const DEFAULT_PROGRAM: &str = "7z";

pub trait Archiver {
    /// Compresses `file_names`, relative to `working_dir`, into a
    /// password-protected `archive`. Names and metadata must be encrypted too.
    fn compress(
        &self,
        working_dir: &Path,
        file_names: &[OsString],
        archive: &Path,
        password: &str,
    ) -> Result<()>;

    /// Extracts `archive` into the existing directory `destination`.
    fn extract(&self, archive: &Path, password: &str, destination: &Path) -> Result<()>;
}

impl<A: Archiver + ?Sized> Archiver for &A {
    fn compress(
        &self,
        working_dir: &Path,
        file_names: &[OsString],
        archive: &Path,
        password: &str,
    ) -> Result<()> {
        (**self).compress(working_dir, file_names, archive, password)
    }

    fn extract(&self, archive: &Path, password: &str, destination: &Path) -> Result<()> {
        (**self).extract(archive, password, destination)
    }
}

#[derive(Debug, Clone)]
enum Arg {
    Plain(OsString),
    Password(String),
}

/// A single external program run: program, arguments and working directory.
///
/// `Display` renders a copy-pasteable command line with the password masked.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<Arg>,
    working_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new<P: Into<PathBuf>>(program: P) -> Invocation {
        Invocation {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Invocation {
        self.args.push(Arg::Plain(arg.as_ref().to_os_string()));
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self = self.arg(arg);
        }
        self
    }

    /// Adds the `-p<password>` switch.
    pub fn password(mut self, password: &str) -> Invocation {
        self.args.push(Arg::Password(password.to_string()));
        self
    }

    pub fn current_dir<P: Into<PathBuf>>(mut self, dir: P) -> Invocation {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Arguments exactly as they are handed to the child process.
    pub fn os_args(&self) -> Vec<OsString> {
        self.args
            .iter()
            .map(|arg| match arg {
                Arg::Plain(value) => value.clone(),
                Arg::Password(password) => OsString::from(format!("-p{password}")),
            })
            .collect()
    }

    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.os_args()).stdin(Stdio::null());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

fn quote(arg: &OsStr) -> String {
    let arg = arg.to_string_lossy();
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c));
    if safe {
        arg.into_owned()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&quote(self.program.as_os_str()))?;
        for arg in &self.args {
            match arg {
                Arg::Plain(value) => write!(f, " {}", quote(value))?,
                Arg::Password(_) => f.write_str(" -p***")?,
            }
        }
        Ok(())
    }
}

/// [`Archiver`] backed by the 7-Zip command line tool.
#[derive(Debug, Clone)]
pub struct SevenZip {
    program: PathBuf,
    overwrite: bool,
    dry_run: bool,
}

impl Default for SevenZip {
    fn default() -> Self {
        SevenZip::new(DEFAULT_PROGRAM)
    }
}

impl SevenZip {
    pub fn new<P: Into<PathBuf>>(program: P) -> SevenZip {
        SevenZip {
            program: program.into(),
            overwrite: false,
            dry_run: false,
        }
    }

    /// Overwrite existing files on extraction instead of renaming the
    /// extracted copies.
    pub fn overwrite(mut self, overwrite: bool) -> SevenZip {
        self.overwrite = overwrite;
        self
    }

    /// Only print commands, never spawn them.
    pub fn dry_run(mut self, dry_run: bool) -> SevenZip {
        self.dry_run = dry_run;
        self
    }

    pub fn compress_invocation(
        &self,
        working_dir: &Path,
        file_names: &[OsString],
        archive: &Path,
        password: &str,
    ) -> Invocation {
        // -mhe encrypts the headers, so the file list needs the password as well.
        // -spd keeps names such as `*.txt` literal.
        Invocation::new(&self.program)
            .args(["a", "-mhe=on", "-mhc=on", "-spd"])
            .password(password)
            .arg("--")
            .arg(archive)
            .args(file_names)
            .current_dir(working_dir)
    }

    pub fn extract_invocation(
        &self,
        archive: &Path,
        password: &str,
        destination: &Path,
    ) -> Invocation {
        let mut output = OsString::from("-o");
        output.push(destination);
        let overwrite_mode = if self.overwrite { "-aoa" } else { "-aou" };
        Invocation::new(&self.program)
            .arg("e")
            .password(password)
            .arg(output)
            .arg(overwrite_mode)
            .arg("--")
            .arg(archive)
    }

    fn run(&self, invocation: &Invocation) -> Result<()> {
        println!("{invocation}");
        if self.dry_run {
            return Ok(());
        }

        let output = invocation
            .to_command()
            .output()
            .map_err(|source| Error::ArchiverSpawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stdout.trim().is_empty() {
            tracing::debug!("{} stdout:\n{}", self.program.display(), stdout.trim_end());
        }
        if !stderr.trim().is_empty() {
            tracing::debug!("{} stderr:\n{}", self.program.display(), stderr.trim_end());
        }

        if !output.status.success() {
            return Err(Error::ArchiverInvocation {
                command: invocation.to_string(),
                code: output.status.code(),
                stderr: stderr.into_owned(),
            });
        }
        Ok(())
    }
}

impl Archiver for SevenZip {
    fn compress(
        &self,
        working_dir: &Path,
        file_names: &[OsString],
        archive: &Path,
        password: &str,
    ) -> Result<()> {
        self.run(&self.compress_invocation(working_dir, file_names, archive, password))
    }

    fn extract(&self, archive: &Path, password: &str, destination: &Path) -> Result<()> {
        self.run(&self.extract_invocation(archive, password, destination))
    }
}
