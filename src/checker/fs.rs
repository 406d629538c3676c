//! Filesystem access used by the checker.
//!
//! The checker only needs three primitives. Keeping them behind a trait lets
//! tests simulate failures (permission denial, unreadable files) that are
//! awkward to reproduce on a real filesystem.

use std::fs;
use std::io;
use std::path::Path;

/// Mockable filesystem primitives.
pub trait FileSystem: Send + Sync {
    /// Whether `path` exists. Errors when existence cannot be determined.
    fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace the contents of a file.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        path.try_exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}
