//! Shared fixtures: an in-process archiver and tree snapshot helpers.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use treecrypt::error::{Error, Result};
use treecrypt::Archiver;

pub const TEST_PASSWORD: &str = "pw";

const MAGIC: &[u8] = b"FAKE7Z\n";

/// Stores files in a trivial length-prefixed container keyed by password.
/// Good enough to observe what the walker hands to an archiver.
#[derive(Default)]
pub struct FakeArchiver {
    pub calls: RefCell<Vec<String>>,
    /// Directory base name whose compression fails after writing a partial archive.
    pub fail_compress_in: Option<OsString>,
}

impl FakeArchiver {
    pub fn failing_in(dir_name: &str) -> FakeArchiver {
        FakeArchiver {
            fail_compress_in: Some(OsString::from(dir_name)),
            ..Default::default()
        }
    }

    fn failure(what: &str, stderr: &str) -> Error {
        Error::ArchiverInvocation {
            command: format!("fake {what}"),
            code: Some(2),
            stderr: stderr.to_string(),
        }
    }
}

fn push_chunk(out: &mut Vec<u8>, chunk: &[u8]) {
    out.extend_from_slice(&(chunk.len() as u64).to_le_bytes());
    out.extend_from_slice(chunk);
}

fn take_chunk<'a>(data: &mut &'a [u8]) -> Option<&'a [u8]> {
    let rest: &'a [u8] = *data;
    if rest.len() < 8 {
        return None;
    }
    let mut len = [0u8; 8];
    len.copy_from_slice(&rest[..8]);
    let len = u64::from_le_bytes(len) as usize;
    let chunk = rest.get(8..8 + len)?;
    *data = &rest[8 + len..];
    Some(chunk)
}

impl Archiver for FakeArchiver {
    fn compress(
        &self,
        working_dir: &Path,
        file_names: &[OsString],
        archive: &Path,
        password: &str,
    ) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(format!("compress {}", working_dir.display()));

        if working_dir.file_name() == self.fail_compress_in.as_deref() {
            fs::write(archive, b"partial").unwrap();
            return Err(FakeArchiver::failure("compress", "disk full"));
        }

        let mut out = MAGIC.to_vec();
        push_chunk(&mut out, password.as_bytes());
        for name in file_names {
            let data = fs::read(working_dir.join(name)).unwrap();
            push_chunk(&mut out, name.to_str().unwrap().as_bytes());
            push_chunk(&mut out, &data);
        }
        fs::write(archive, out).unwrap();
        Ok(())
    }

    fn extract(&self, archive: &Path, password: &str, destination: &Path) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(format!("extract {}", archive.display()));

        assert!(destination.is_dir(), "destination must exist before extract");
        let raw = fs::read(archive).unwrap();
        let mut data = match raw.strip_prefix(MAGIC) {
            Some(rest) => rest,
            None => return Err(FakeArchiver::failure("extract", "Can not open the file as archive")),
        };
        if take_chunk(&mut data) != Some(password.as_bytes()) {
            return Err(FakeArchiver::failure("extract", "Wrong password"));
        }
        while let Some(name) = take_chunk(&mut data) {
            let contents = take_chunk(&mut data).unwrap();
            let name = std::str::from_utf8(name).unwrap();
            fs::write(destination.join(name), contents).unwrap();
        }
        Ok(())
    }
}

/// `None` marks a directory, `Some` holds file contents.
pub type Snapshot = BTreeMap<PathBuf, Option<Vec<u8>>>;

pub fn snapshot(root: &Path) -> Snapshot {
    let mut out = Snapshot::new();
    collect(root, Path::new(""), &mut out);
    out
}

fn collect(base: &Path, rel: &Path, out: &mut Snapshot) {
    for entry in fs::read_dir(base.join(rel)).unwrap() {
        let entry = entry.unwrap();
        let rel_child = rel.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            out.insert(rel_child.clone(), None);
            collect(base, &rel_child, out);
        } else {
            out.insert(rel_child, Some(fs::read(entry.path()).unwrap()));
        }
    }
}

/// Builds files from `(relative path, contents)` pairs, creating parents.
pub fn build_tree(root: &Path, files: &[(&str, &str)]) {
    fs::create_dir_all(root).unwrap();
    for (rel, contents) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
}

/// The `root/{a.txt, b.txt, sub/{c.txt}}` layout most tests start from.
pub fn sample_tree(parent: &Path) -> PathBuf {
    let root = parent.join("root");
    build_tree(
        &root,
        &[("a.txt", "alpha"), ("b.txt", "bravo"), ("sub/c.txt", "charlie")],
    );
    root
}
