//! Recursive directory listing with depth indentation.

use crate::render::Palette;
use log::debug;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Prepended once per level below the root.
pub const INDENT_UNIT: &str = ".";

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Path {} was not found.", path.display())]
    NotFound { path: PathBuf },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    pub fn tag(self) -> &'static str {
        match self {
            EntryKind::Directory => "[dir]",
            EntryKind::File => "[file]",
        }
    }
}

/// One visited entry. `depth` is 0 for direct children of the root.
#[derive(Debug, Clone, Copy)]
pub struct TreeEntry<'a> {
    pub name: &'a str,
    pub kind: EntryKind,
    pub depth: usize,
}

impl TreeEntry<'_> {
    pub fn render(&self, palette: &Palette) -> String {
        let name = match self.kind {
            EntryKind::Directory => palette.directory(self.name),
            EntryKind::File => palette.file(self.name),
        };
        format!("{}{} {}", INDENT_UNIT.repeat(self.depth), self.kind.tag(), name)
    }
}

/// Visit everything below `root` depth-first, each directory right before
/// its contents.
///
/// Siblings come in file-name order. Links are not followed, so only real
/// directories are descended into; everything else counts as a file.
pub fn walk<F>(root: &Path, mut visit: F) -> Result<(), TreeError>
where
    F: FnMut(TreeEntry<'_>) -> io::Result<()>,
{
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|e| classify(root, e))?;
        let kind = if entry.file_type().is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        let name = entry.file_name().to_string_lossy();
        debug!("visit {}", entry.path().display());
        visit(TreeEntry {
            name: &name,
            kind,
            depth: entry.depth() - 1,
        })?;
    }
    Ok(())
}

/// Write one rendered line per entry below `root` to `out`.
pub fn print_tree(root: &Path, out: &mut dyn Write, palette: &Palette) -> Result<(), TreeError> {
    walk(root, |entry| writeln!(out, "{}", entry.render(palette)))
}

fn classify(root: &Path, err: walkdir::Error) -> TreeError {
    let missing_root = err.depth() == 0
        && err
            .io_error()
            .is_some_and(|e| e.kind() == io::ErrorKind::NotFound);
    if missing_root {
        TreeError::NotFound {
            path: root.to_path_buf(),
        }
    } else {
        TreeError::Walk(err)
    }
}
