//! Directory traversal for recursive runs.
//!
//! Yields the directories to index, depth-first, starting with the target
//! itself. Traversal policy lives here so the per-directory pipeline never
//! has to know whether it is part of a sweep.

use std::path::PathBuf;
use walkdir::WalkDir;

/// Every directory under `target` (inclusive), in depth-first order.
///
/// Symlinked directories are not descended into. Hidden directories are
/// walked like any other; hidden-entry filtering only decides what a page
/// lists, not which directories get a page.
pub fn directories(
    target: impl Into<PathBuf>,
) -> impl Iterator<Item = Result<PathBuf, walkdir::Error>> {
    WalkDir::new(target.into())
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_dir() => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(err) => Some(Err(err)),
        })
}
