use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    ArchiverInvocation {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
    ArchiverSpawn {
        program: PathBuf,
        source: std::io::Error,
    },
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },
    ArchiveExists(PathBuf),
    NotADirectory(PathBuf),
    InvalidPath(PathBuf),
    UnknownAction(String),
}

impl Error {
    /// Wraps an I/O error with the path it was raised for.
    pub fn filesystem(path: &Path, source: std::io::Error) -> Error {
        Error::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::ArchiverInvocation {
                ref command,
                code,
                ref stderr,
            } => {
                match code {
                    Some(code) => write!(f, "archiver exited with code {code}: {command}")?,
                    None => write!(f, "archiver terminated by signal: {command}")?,
                }
                if !stderr.trim().is_empty() {
                    write!(f, "\n{}", stderr.trim())?;
                }
                Ok(())
            }
            Error::ArchiverSpawn {
                ref program,
                ref source,
            } => write!(f, "failed to run '{}': {source}", program.display()),
            Error::Filesystem {
                ref path,
                ref source,
            } => write!(f, "{}: {source}", path.display()),
            Error::ArchiveExists(ref path) => write!(
                f,
                "archive already exists: {} (use --force to overwrite)",
                path.display()
            ),
            Error::NotADirectory(ref path) => write!(f, "not a directory: {}", path.display()),
            Error::InvalidPath(ref path) => write!(
                f,
                "cannot place a sibling archive next to {}",
                path.display()
            ),
            Error::UnknownAction(ref action) => write!(
                f,
                "unknown action '{action}', expected one of e, encrypt, d, decrypt"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::ArchiverSpawn { ref source, .. } => Some(source),
            Error::Filesystem { ref source, .. } => Some(source),
            _ => None,
        }
    }
}
