use crate::error::{Error, Result};
use std::str::FromStr;

/// Names accepted on the command line for each action.
pub const ACTION_NAMES: &[&str] = &["e", "encrypt", "d", "decrypt"];

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Action {
    Encrypt,
    Decrypt,
}

impl Action {
    pub fn new(name: &str) -> Result<Action> {
        Ok(match name {
            "e" | "encrypt" => Action::Encrypt,
            "d" | "decrypt" => Action::Decrypt,
            _ => return Err(Error::UnknownAction(name.to_string())),
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Encrypt => "encrypt",
            Action::Decrypt => "decrypt",
        }
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Action> {
        Action::new(s)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
