use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    TreecryptError(treecrypt::error::Error),
    IoError(std::io::Error),
    PasswordMissing,
    CliInputError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TreecryptError(err) => write!(f, "{}", err),
            Error::IoError(err) => write!(f, "IO error: {}", err),
            Error::PasswordMissing => write!(
                f,
                "no password given: use --password, set {} or enter one at the prompt",
                crate::cli::PASSWORD_ENV
            ),
            Error::CliInputError(msg) => write!(f, "CLI input error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::TreecryptError(err) => Some(err),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl std::convert::From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        Error::IoError(error)
    }
}

impl std::convert::From<treecrypt::error::Error> for Error {
    fn from(error: treecrypt::error::Error) -> Error {
        Error::TreecryptError(error)
    }
}
