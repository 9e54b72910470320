//! Resource resolution for script modules.
//!
//! A [`ResourceProvider`] turns a resource name into an open
//! [`ResourceStream`], or nothing when the resource does not exist. Streams
//! are released when dropped; callers that must release a stream at a
//! precise point (before raising a script error, for instance) drop it
//! explicitly.
//!
//! Two providers ship with the crate:
//! - [`DirectoryProvider`] – searches a list of root directories in order
//! - [`MemoryProvider`] – serves resources registered in memory (embedding, tests)

use log::debug;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

/// An open resource. Dropping it releases the underlying handle.
pub trait ResourceStream {
    /// Reads the remaining content of the stream.
    fn read_all(&mut self) -> io::Result<Vec<u8>>;
}

/// Resolves resource names to streams.
pub trait ResourceProvider {
    /// Opens `name`, or returns `None` when it cannot be found.
    fn open(&self, name: &str) -> Option<Box<dyn ResourceStream>>;
}

/// Stream over a file on disk.
pub struct FileStream {
    file: File,
}

impl ResourceStream for FileStream {
    fn read_all(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.file.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

/// Provider that looks resources up under a list of root directories.
///
/// Names are relative paths using `/` separators. Absolute names and names
/// that climb out of the root with `..` are rejected.
#[derive(Debug, Clone, Default)]
pub struct DirectoryProvider {
    roots: Vec<PathBuf>,
}

impl DirectoryProvider {
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the first existing file for `name`, if any.
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let escapes = relative.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            debug!("Rejected resource name outside of script roots: {}", name);
            return None;
        }
        self.roots
            .iter()
            .map(|root| root.join(relative))
            .find(|candidate| candidate.is_file())
    }
}

impl ResourceProvider for DirectoryProvider {
    fn open(&self, name: &str) -> Option<Box<dyn ResourceStream>> {
        let path = self.locate(name)?;
        match File::open(&path) {
            Ok(file) => Some(Box::new(FileStream { file })),
            Err(e) => {
                debug!("Failed to open {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Stream over an in-memory buffer.
pub struct MemoryStream {
    data: Vec<u8>,
    position: usize,
}

impl MemoryStream {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            position: 0,
        }
    }
}

impl ResourceStream for MemoryStream {
    fn read_all(&mut self) -> io::Result<Vec<u8>> {
        let rest = self.data[self.position..].to_vec();
        self.position = self.data.len();
        Ok(rest)
    }
}

/// Provider serving resources registered in memory.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    files: RefCell<FxHashMap<String, Vec<u8>>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to register a resource.
    pub fn with(self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(name, content);
        self
    }

    /// Registers or replaces a resource.
    pub fn insert(&self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.borrow_mut().insert(name.into(), content.into());
    }
}

impl ResourceProvider for MemoryProvider {
    fn open(&self, name: &str) -> Option<Box<dyn ResourceStream>> {
        let data = self.files.borrow().get(name).cloned()?;
        Some(Box::new(MemoryStream::new(data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_provider_open_and_missing() {
        let provider = MemoryProvider::new().with("a.lua", "return 1");
        let mut stream = provider.open("a.lua").unwrap();
        assert_eq!(stream.read_all().unwrap(), b"return 1");
        assert_eq!(stream.read_all().unwrap(), b"");
        assert!(provider.open("b.lua").is_none());
    }

    #[test]
    fn test_directory_provider_searches_roots_in_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(second.path().join("only_second.lua"), "x = 2").unwrap();
        std::fs::write(first.path().join("both.lua"), "x = 1").unwrap();
        std::fs::write(second.path().join("both.lua"), "x = 2").unwrap();

        let provider = DirectoryProvider::new([first.path(), second.path()]);
        let mut both = provider.open("both.lua").unwrap();
        assert_eq!(both.read_all().unwrap(), b"x = 1");
        let mut only = provider.open("only_second.lua").unwrap();
        assert_eq!(only.read_all().unwrap(), b"x = 2");
        assert!(provider.open("missing.lua").is_none());
    }

    #[test]
    fn test_directory_provider_nested_names() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("api")).unwrap();
        std::fs::write(root.path().join("api/all.lua"), "-- api").unwrap();
        let provider = DirectoryProvider::new([root.path()]);
        assert!(provider.open("api/all.lua").is_some());
    }

    #[test]
    fn test_directory_provider_rejects_escaping_names() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("scripts")).unwrap();
        std::fs::write(root.path().join("secret.lua"), "x = 1").unwrap();
        let provider = DirectoryProvider::new([root.path().join("scripts")]);
        assert!(provider.open("../secret.lua").is_none());
    }
}
