//! Recursively encrypt the files of every directory in a tree into
//! password-protected 7z archives, and turn those archives back into
//! directories.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use treecrypt::{Action, SevenZip, TreeWalker};
//!
//! fn main() -> treecrypt::Result<()> {
//!     let walker = TreeWalker::new(SevenZip::default());
//!     walker.process(Action::Encrypt, Path::new("/srv/private"), "correct horse")?;
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod archiver;
pub mod error;
pub mod tree;

pub use action::Action;
pub use archiver::{Archiver, Invocation, SevenZip};
pub use error::{Error, Result};
pub use tree::TreeWalker;
