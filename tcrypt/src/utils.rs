use std::io::{self, IsTerminal};
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Logs go to stderr so stdout only carries progress and commands.
/// `RUST_LOG` wins over `--debug`.
pub fn init_logging(debug: bool) {
    let filter = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .without_time()
        .init();
}

/// Flag or environment value first, then an interactive prompt when stdin is
/// a terminal. Empty passwords are refused.
pub fn resolve_password(given: Option<&str>) -> Result<String> {
    let password = match given {
        Some(p) if !p.is_empty() => return Ok(p.to_string()),
        _ if io::stdin().is_terminal() => {
            rpassword::prompt_password("password: ").map_err(|_| Error::PasswordMissing)?
        }
        _ => return Err(Error::PasswordMissing),
    };
    if password.is_empty() {
        return Err(Error::PasswordMissing);
    }
    Ok(password)
}

pub fn resolve_root(path: Option<&str>) -> Result<PathBuf> {
    match path {
        Some("") => Err(Error::CliInputError("path must not be empty".to_string())),
        Some(p) => Ok(PathBuf::from(p)),
        None => Ok(std::env::current_dir()?),
    }
}
