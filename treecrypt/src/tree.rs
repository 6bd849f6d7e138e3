//! Depth-first, pre-order walk of a directory tree.
//!
//! Each directory is listed exactly once, before anything in it is touched.
//! Its own files are then encrypted into (or decrypted from) sibling
//! archives, and only afterwards are the subdirectories from that first
//! listing visited. Directories created while acting on a level are never
//! entered during the same pass.

use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::action::Action;
use crate::archiver::{Archiver, ARCHIVE_EXTENSION};
use crate::error::{Error, Result};

/// Shallow listing of one directory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Listing {
    pub dirs: Vec<OsString>,
    pub files: Vec<OsString>,
}

impl Listing {
    /// Lists `path` without recursing. Entries are classified by their own
    /// type, so symbolic links count as files and are never followed.
    pub fn read(path: &Path) -> Result<Listing> {
        let mut listing = Listing::default();
        for entry in fs::read_dir(path).map_err(|e| Error::filesystem(path, e))? {
            let entry = entry.map_err(|e| Error::filesystem(path, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| Error::filesystem(&entry.path(), e))?;
            if file_type.is_dir() {
                listing.dirs.push(entry.file_name());
            } else {
                listing.files.push(entry.file_name());
            }
        }
        listing.dirs.sort();
        listing.files.sort();
        Ok(listing)
    }
}

/// Path of the archive that replaces the files directly inside `dir`:
/// `<dir>.7z`, next to `dir` in its parent.
pub fn archive_path(dir: &Path) -> Result<PathBuf> {
    let parent = dir
        .parent()
        .ok_or_else(|| Error::InvalidPath(dir.to_path_buf()))?;
    let mut name = dir
        .file_name()
        .ok_or_else(|| Error::InvalidPath(dir.to_path_buf()))?
        .to_os_string();
    name.push(".");
    name.push(ARCHIVE_EXTENSION);
    Ok(parent.join(name))
}

/// Makes `path` absolute against the current directory and drops `.` and
/// `..` lexically. Symbolic links are kept as written, so a root reached
/// through a link gets its archive next to the link.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| Error::filesystem(path, e))?
            .join(path)
    };
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

/// For `name.7z` returns `name`; `None` for anything else.
pub fn archive_stem(file_name: &OsString) -> Option<OsString> {
    let path = Path::new(file_name);
    match (path.extension(), path.file_stem()) {
        (Some(ext), Some(stem)) if ext == ARCHIVE_EXTENSION => Some(stem.to_os_string()),
        _ => None,
    }
}

pub struct TreeWalker<A: Archiver> {
    archiver: A,
    force: bool,
    dry_run: bool,
    reverse_dirs: bool,
}

impl<A: Archiver> TreeWalker<A> {
    pub fn new(archiver: A) -> TreeWalker<A> {
        TreeWalker {
            archiver,
            force: false,
            dry_run: false,
            reverse_dirs: false,
        }
    }

    /// Replace archives that already exist instead of refusing to run.
    pub fn force(mut self, force: bool) -> TreeWalker<A> {
        self.force = force;
        self
    }

    /// Report every step without touching the filesystem.
    pub fn dry_run(mut self, dry_run: bool) -> TreeWalker<A> {
        self.dry_run = dry_run;
        self
    }

    /// Visits subdirectories in descending name order.
    #[cfg(test)]
    fn reverse_dirs(mut self) -> TreeWalker<A> {
        self.reverse_dirs = true;
        self
    }

    /// Applies `action` to every directory under `root`, root included.
    ///
    /// Returns whether `root` itself had no files to act on. The first error
    /// stops the walk; directories handled before it stay handled.
    pub fn process(&self, action: Action, root: &Path, password: &str) -> Result<bool> {
        let root = absolute_path(root)?;
        let metadata = fs::metadata(&root).map_err(|e| Error::filesystem(&root, e))?;
        if !metadata.is_dir() {
            return Err(Error::NotADirectory(root));
        }
        tracing::info!("{} {}", action, root.display());
        self.visit(action, &root, password)
    }

    fn visit(&self, action: Action, dir: &Path, password: &str) -> Result<bool> {
        let listing = Listing::read(dir)?;
        let empty = listing.files.is_empty();

        if !empty {
            println!("{}", dir.display());
            match action {
                Action::Encrypt => self.encrypt_files(dir, &listing.files, password)?,
                Action::Decrypt => self.decrypt_files(dir, &listing.files, password)?,
            }
        }

        let mut dirs = listing.dirs;
        if self.reverse_dirs {
            dirs.reverse();
        }
        for name in &dirs {
            let child = dir.join(name);
            let child_empty = self.visit(action, &child, password)?;
            tracing::debug!("{} empty: {}", child.display(), child_empty);
        }

        Ok(empty)
    }

    fn encrypt_files(&self, dir: &Path, files: &[OsString], password: &str) -> Result<()> {
        let archive = archive_path(dir)?;
        if archive.exists() {
            if !self.force {
                return Err(Error::ArchiveExists(archive));
            }
            tracing::warn!("replacing existing archive {}", archive.display());
            self.remove(&archive)?;
        }

        if let Err(err) = self.archiver.compress(dir, files, &archive, password) {
            if !self.dry_run && archive.is_file() {
                tracing::debug!("removing partial archive {}", archive.display());
                if let Err(e) = fs::remove_file(&archive) {
                    tracing::warn!(
                        "could not remove partial archive {}: {}",
                        archive.display(),
                        e
                    );
                }
            }
            return Err(err);
        }

        if !archive.is_file() {
            if !self.dry_run {
                tracing::warn!(
                    "no archive at {} after compressing, keeping files",
                    archive.display()
                );
            }
            return Ok(());
        }

        for name in files {
            self.remove(&dir.join(name))?;
        }
        Ok(())
    }

    fn decrypt_files(&self, dir: &Path, files: &[OsString], password: &str) -> Result<()> {
        for name in files {
            let stem = match archive_stem(name) {
                Some(stem) => stem,
                None => continue,
            };
            let archive = dir.join(name);
            let destination = dir.join(stem);

            if !self.dry_run {
                fs::create_dir_all(&destination)
                    .map_err(|e| Error::filesystem(&destination, e))?;
            }
            self.archiver.extract(&archive, password, &destination)?;
            self.remove(&archive)?;
        }
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<()> {
        if self.dry_run {
            println!("rm {}", path.display());
            return Ok(());
        }
        tracing::debug!("rm {}", path.display());
        fs::remove_file(path).map_err(|e| Error::filesystem(path, e))
    }
}
